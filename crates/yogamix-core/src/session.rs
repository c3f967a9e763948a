//! Export session.
//!
//! [`ExportSession`] is the page-level owner of everything the Spotify
//! export needs: the intent store, the return detector, the backend, and the
//! page surface. The UI builds one at startup and routes both the export
//! button and the page-load resume through it.

use std::rc::Rc;

use tracing::{info, warn};

use crate::address::ReturnDetector;
use crate::authorize::AuthorizationOutcome;
use crate::backend::ExportBackend;
use crate::error::Result;
use crate::export::PendingExport;
use crate::presenter::{ExportPresenter, ExportStatus, Navigator};
use crate::storage::IntentStore;

/// Owner of the export flow's collaborators.
pub struct ExportSession<B> {
    pub(crate) backend: B,
    pub(crate) store: IntentStore,
    pub(crate) detector: ReturnDetector,
    pub(crate) navigator: Rc<dyn Navigator>,
    pub(crate) presenter: Rc<dyn ExportPresenter>,
}

impl<B> std::fmt::Debug for ExportSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportSession")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<B: ExportBackend> ExportSession<B> {
    /// Assemble a session.
    pub fn new(
        backend: B,
        store: IntentStore,
        detector: ReturnDetector,
        navigator: Rc<dyn Navigator>,
        presenter: Rc<dyn ExportPresenter>,
    ) -> Self {
        Self {
            backend,
            store,
            detector,
            navigator,
            presenter,
        }
    }

    /// The intent store.
    pub const fn store(&self) -> &IntentStore {
        &self.store
    }

    /// The backend client.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Start an export the user asked for.
    ///
    /// Input is validated before anything is stored or sent; a validation
    /// failure is shown to the user and returned as `Err`.
    pub async fn request_export(
        &self,
        playlist_name: &str,
        track_ids: Vec<String>,
    ) -> Result<AuthorizationOutcome> {
        let export = match PendingExport::new(playlist_name, track_ids) {
            Ok(export) => export,
            Err(e) => {
                warn!("Export request rejected: {}", e);
                self.presenter.present(ExportStatus::Failed {
                    message: e.user_message(),
                });
                return Err(e);
            }
        };

        info!(
            playlist = %export.playlist_name,
            tracks = export.track_ids.len(),
            "Export requested"
        );
        Ok(self.begin_authorization(&export).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::Harness;

    #[tokio::test]
    async fn test_request_export_rejects_blank_name_without_side_effects() {
        let harness = Harness::new("https://yoga.example.com/");
        let session = harness.session();

        let err = session
            .request_export("  ", vec!["t1".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(session.store().load(), None);
        assert_eq!(harness.backend.auth_calls(), 0);
        assert_eq!(
            harness.presenter.last(),
            Some(ExportStatus::Failed {
                message: "Please enter a playlist name".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_request_export_rejects_empty_tracks() {
        let harness = Harness::new("https://yoga.example.com/");
        let session = harness.session();

        let err = session
            .request_export("Vinyasa Flow - 2024-01-01", Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No Spotify tracks available for export");
        assert!(harness.navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_request_export_redirects() {
        let harness = Harness::new("https://yoga.example.com/");
        harness
            .backend
            .push_auth_url(Ok("https://accounts.spotify.com/authorize?x=1".to_string()));
        let session = harness.session();

        let outcome = session
            .request_export(" Hatha - 2024-01-01 ", vec!["t1".to_string()])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthorizationOutcome::Redirected {
                auth_url: "https://accounts.spotify.com/authorize?x=1".to_string()
            }
        );
        assert_eq!(
            session.store().load().unwrap().playlist_name,
            "Hatha - 2024-01-01"
        );
    }
}
