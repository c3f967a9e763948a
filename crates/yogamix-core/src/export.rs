//! Pending export model.
//!
//! A [`PendingExport`] is the only piece of state that has to survive the
//! round trip through the Spotify authorization page.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An export request waiting for the user to come back from authorization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingExport {
    /// Name of the playlist to create. Never empty.
    pub playlist_name: String,
    /// Opaque Spotify track identifiers, in playlist order. Never empty.
    pub track_ids: Vec<String>,
    /// Creation time in Unix epoch milliseconds. Informational only.
    #[serde(default)]
    pub created_at: u64,
}

impl PendingExport {
    /// Build a validated export stamped with the current time.
    ///
    /// The playlist name is trimmed before it is stored.
    pub fn new(playlist_name: &str, track_ids: Vec<String>) -> Result<Self> {
        let playlist_name = validate_playlist_name(playlist_name)?;
        validate_track_ids(&track_ids)?;
        Ok(Self {
            playlist_name,
            track_ids,
            created_at: now_millis(),
        })
    }

    /// Whether the record satisfies the invariants of a stored export.
    pub fn is_well_formed(&self) -> bool {
        !self.playlist_name.trim().is_empty() && !self.track_ids.is_empty()
    }
}

/// Outcome of inspecting the page URL for an authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorizationResult {
    /// The provider redirected back with this code.
    Code(String),
    /// No usable code on this page load.
    #[default]
    Absent,
}

impl AuthorizationResult {
    /// The captured code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Code(code) => Some(code),
            Self::Absent => None,
        }
    }

    /// Whether a code was captured.
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

/// Validate a playlist name and return it trimmed.
pub fn validate_playlist_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(
            "Please enter a playlist name".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate that there is at least one track to export.
pub fn validate_track_ids(track_ids: &[String]) -> Result<()> {
    if track_ids.is_empty() {
        return Err(Error::Validation(
            "No Spotify tracks available for export".to_string(),
        ));
    }
    Ok(())
}

/// Current time in Unix epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Current time in Unix epoch milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
