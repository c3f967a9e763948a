//! Export resumption after the authorization round trip.
//!
//! Runs once per page load. The return detector and the intent store are
//! consulted together; only when both a code and a pending export exist does
//! the session talk to the backend.

use tracing::{debug, info, warn};

use crate::authorize::AuthorizationOutcome;
use crate::backend::{CreatePlaylistOutcome, CreatePlaylistRequest, ExportBackend};
use crate::export::{AuthorizationResult, PendingExport};
use crate::presenter::ExportStatus;
use crate::session::ExportSession;

/// What this page load found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeState {
    /// Nothing pending. A code without an export is discarded here too.
    NoIntent,
    /// An export waits for a future authorization round trip.
    IntentWithoutCode(PendingExport),
    /// The user came back from authorization with an export pending.
    IntentWithCode {
        /// The stored export.
        export: PendingExport,
        /// The captured authorization code.
        code: String,
    },
}

/// How the page-load resume ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Nothing to do.
    NoIntent,
    /// An export is stored but no code arrived; left untouched.
    IntentWithoutCode,
    /// The playlist was created and the stored export removed.
    Completed {
        /// Link to the playlist, if returned.
        playlist_url: Option<String>,
        /// Backend confirmation message.
        message: String,
    },
    /// The code was refused; a fresh authorization was started with the
    /// export still stored.
    Reauthorizing(AuthorizationOutcome),
    /// The export was abandoned and the stored export removed.
    Failed {
        /// Message shown to the user.
        message: String,
    },
}

impl<B: ExportBackend> ExportSession<B> {
    /// Inspect the URL and the intent store.
    ///
    /// Strips the authorization code from the address bar as a side effect.
    pub fn determine(&self) -> ResumeState {
        let authorization = self.detector.detect();
        let pending = self.store.load();

        match (pending, authorization) {
            (None, AuthorizationResult::Absent) => ResumeState::NoIntent,
            (None, AuthorizationResult::Code(_)) => {
                debug!("Authorization code without a pending export, discarding");
                ResumeState::NoIntent
            }
            (Some(export), AuthorizationResult::Absent) => {
                debug!(playlist = %export.playlist_name, "Pending export awaits authorization");
                ResumeState::IntentWithoutCode(export)
            }
            (Some(export), AuthorizationResult::Code(code)) => {
                ResumeState::IntentWithCode { export, code }
            }
        }
    }

    /// Finish a pending export if the user just returned from authorization.
    pub async fn resume(&self) -> ResumeOutcome {
        match self.determine() {
            ResumeState::NoIntent => ResumeOutcome::NoIntent,
            ResumeState::IntentWithoutCode(_) => ResumeOutcome::IntentWithoutCode,
            ResumeState::IntentWithCode { export, code } => {
                self.complete_export(export, code).await
            }
        }
    }

    async fn complete_export(&self, export: PendingExport, code: String) -> ResumeOutcome {
        info!(playlist = %export.playlist_name, "Resuming export after authorization");
        self.presenter.present(ExportStatus::Creating {
            playlist_name: export.playlist_name.clone(),
        });

        let request = CreatePlaylistRequest {
            playlist_name: export.playlist_name.clone(),
            track_ids: export.track_ids.clone(),
            auth_code: code,
        };

        match self.backend.create_playlist(&request).await {
            Ok(CreatePlaylistOutcome::Created {
                playlist_url,
                message,
            }) => {
                self.discard_pending();
                info!(url = ?playlist_url, "Spotify playlist created");
                self.presenter.present(ExportStatus::Succeeded {
                    message: message.clone(),
                    playlist_url: playlist_url.clone(),
                });
                ResumeOutcome::Completed {
                    playlist_url,
                    message,
                }
            }
            Ok(CreatePlaylistOutcome::NeedsAuth) => {
                // No retry cap: a backend that always answers needs_auth loops.
                info!("Authorization code refused, authorizing again");
                ResumeOutcome::Reauthorizing(self.begin_authorization(&export).await)
            }
            Ok(CreatePlaylistOutcome::Rejected { error }) => {
                warn!(%error, "Backend rejected playlist creation");
                self.abandon(error)
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "Playlist creation request failed: {}", e);
                self.abandon(e.user_message())
            }
        }
    }

    fn abandon(&self, message: String) -> ResumeOutcome {
        self.discard_pending();
        self.presenter.present(ExportStatus::Failed {
            message: message.clone(),
        });
        ResumeOutcome::Failed { message }
    }

    fn discard_pending(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear pending export: {}", e);
        }
    }
}
