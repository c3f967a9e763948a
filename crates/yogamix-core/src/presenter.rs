//! User-visible surface of the export flow.

use crate::error::Result;

/// What the export area of the page should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportStatus {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Asking the backend for an authorization URL.
    Authorizing,
    /// Leaving the page for the authorization URL.
    Redirecting {
        /// Where the browser is being sent.
        auth_url: String,
    },
    /// Asking the backend to create the playlist.
    Creating {
        /// Name of the playlist being created.
        playlist_name: String,
    },
    /// The playlist was created.
    Succeeded {
        /// Backend's confirmation message.
        message: String,
        /// Link to the created playlist, when the backend returned one.
        playlist_url: Option<String>,
    },
    /// The attempt failed.
    Failed {
        /// Error text for the user.
        message: String,
    },
}

impl ExportStatus {
    /// Whether a request is outstanding and the export control should stay disabled.
    pub const fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Authorizing | Self::Redirecting { .. } | Self::Creating { .. }
        )
    }

    /// Label for the export button in this state.
    pub const fn button_label(&self) -> &'static str {
        match self {
            Self::Authorizing => "Getting Spotify Authorization...",
            Self::Redirecting { .. } => "Redirecting to Spotify...",
            Self::Creating { .. } => "Creating Spotify Playlist...",
            _ => "Create Spotify Playlist",
        }
    }
}

/// Renders [`ExportStatus`] updates.
pub trait ExportPresenter {
    /// Show `status` to the user.
    fn present(&self, status: ExportStatus);
}

/// Performs full-page navigations.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Leave the current page for `url`.
    fn navigate(&self, url: &str) -> Result<()>;
}
