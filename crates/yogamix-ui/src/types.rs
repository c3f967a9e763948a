//! Page-level types.

use serde::{Deserialize, Serialize};
use yogamix_core::{ExportStatus, GeneratedPlaylist, Result};

/// A service shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// The playlist API (`/health`).
    Backend,
    /// The backend's Spotify connection (`/test-spotify`).
    Spotify,
}

impl Service {
    /// Short label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backend => "API",
            Self::Spotify => "Spotify",
        }
    }

    /// Status text for `state`.
    pub const fn describe(self, state: ServiceState) -> &'static str {
        match (self, state) {
            (_, ServiceState::Checking) => "Checking...",
            (Self::Backend, ServiceState::Up) => "Online",
            (Self::Backend, ServiceState::Degraded) => "Issues",
            (Self::Backend, ServiceState::Unreachable) => "Offline",
            (Self::Spotify, ServiceState::Up) => "Connected",
            (Self::Spotify, ServiceState::Degraded) => "Not Connected",
            (Self::Spotify, ServiceState::Unreachable) => "Error",
        }
    }
}

/// Outcome of a status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceState {
    /// Check in flight.
    #[default]
    Checking,
    /// Answered and reported itself fine.
    Up,
    /// Answered but reported a problem.
    Degraded,
    /// The request failed.
    Unreachable,
}

impl ServiceState {
    /// Map a check result. `Err` means no usable answer came back.
    pub const fn from_check(result: &Result<bool>) -> Self {
        match result {
            Ok(true) => Self::Up,
            Ok(false) => Self::Degraded,
            Err(_) => Self::Unreachable,
        }
    }

    /// CSS modifier class.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Checking => "status-checking",
            Self::Up => "status-up",
            Self::Degraded => "status-degraded",
            Self::Unreachable => "status-down",
        }
    }
}

/// What the playlist output slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    /// Nothing requested yet.
    #[default]
    Empty,
    /// Request in flight.
    Generating,
    /// The backend returned a playlist.
    Ready {
        /// Class the playlist was generated for.
        class_name: String,
        /// The playlist.
        playlist: GeneratedPlaylist,
    },
    /// The last request failed; kept until the next one.
    Failed(String),
}

impl GenerationState {
    /// Whether the generate button should stay disabled.
    pub const fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }

    /// The generated playlist, if any.
    pub const fn playlist(&self) -> Option<&GeneratedPlaylist> {
        match self {
            Self::Ready { playlist, .. } => Some(playlist),
            _ => None,
        }
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Something finished.
    Success,
    /// Something failed.
    Error,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier, used for dismissal.
    pub id: u64,
    /// Severity.
    pub notification_type: NotificationType,
    /// Text shown.
    pub message: String,
    /// Milliseconds before auto-dismiss (None = manual dismiss only).
    pub duration_ms: Option<u32>,
}

impl Notification {
    fn new(notification_type: NotificationType, message: impl Into<String>, duration_ms: u32) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);

        Self {
            id: COUNTER.fetch_add(1, Ordering::Relaxed),
            notification_type,
            message: message.into(),
            duration_ms: Some(duration_ms),
        }
    }

    /// Success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Success, message, 5000)
    }

    /// Error toast. Errors stay longer.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Error, message, 8000)
    }

    /// Toast mirroring a finished export, if `status` is one.
    #[must_use]
    pub fn for_export(status: &ExportStatus) -> Option<Self> {
        match status {
            ExportStatus::Succeeded { message, .. } => Some(Self::success(message.clone())),
            ExportStatus::Failed { message } => Some(Self::error(message.clone())),
            _ => None,
        }
    }

    /// Toast for a freshly generated playlist.
    #[must_use]
    pub fn playlist_generated(playlist: &GeneratedPlaylist) -> Self {
        Self::success(format!("Playlist generated ({})", playlist.spotify_summary()))
    }

    /// Toast for a class saved from the picker.
    #[must_use]
    pub fn class_added(name: &str) -> Self {
        Self::success(format!("Class \"{name}\" added successfully!"))
    }

    /// Keep this toast until dismissed.
    #[must_use]
    pub const fn persistent(mut self) -> Self {
        self.duration_ms = None;
        self
    }
}
