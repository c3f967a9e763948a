//! Yoga class catalog and generated playlists.
//!
//! These types mirror the backend's `/classes` and `/generate-playlist`
//! responses. The page only needs enough of them to fill the class picker,
//! show the generated playlist, and collect track identifiers for export.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shortest class the generator accepts, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;
/// Longest class the generator accepts, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 120;
/// Duration preselected in the form, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// A yoga class type offered by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YogaClass {
    /// Class name, also used as the generator input.
    pub name: String,
    /// Short description shown in the picker.
    #[serde(default)]
    pub description: String,
}

impl YogaClass {
    /// Label used in the class picker.
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.description)
        }
    }
}

/// `GET /classes` response body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ClassesResponse {
    /// Whether the backend succeeded.
    #[serde(default)]
    pub success: bool,
    /// Available classes.
    #[serde(default)]
    pub classes: Vec<YogaClass>,
    /// Error text on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl ClassesResponse {
    /// Convert into the class list or a backend error.
    pub fn into_result(self) -> Result<Vec<YogaClass>> {
        if self.success {
            Ok(self.classes)
        } else {
            Err(Error::Backend(
                self.error
                    .unwrap_or_else(|| "Failed to load classes".to_string()),
            ))
        }
    }
}

/// Shown when a new class is missing its name or description.
pub const NEW_CLASS_FIELDS_MESSAGE: &str = "Please fill in both the class name and description";

/// `POST /classes` request body: a class type the user adds from the picker.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewClass {
    /// Class name; becomes the picker value once saved.
    pub name: String,
    /// Short description.
    pub description: String,
}

impl NewClass {
    /// Build a validated class from form input.
    pub fn new(name: &str, description: &str) -> Result<Self> {
        let class = Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        };
        class.validate()?;
        Ok(class)
    }

    /// Both fields must be non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(Error::Validation(NEW_CLASS_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// `POST /classes` response body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct AddClassResponse {
    /// Whether the class was stored.
    #[serde(default)]
    pub success: bool,
    /// Error text on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl AddClassResponse {
    /// Convert into success or a backend error.
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Backend(
                self.error.unwrap_or_else(|| "Failed to add class".to_string()),
            ))
        }
    }
}

/// `POST /generate-playlist` request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Selected class name.
    pub class_name: String,
    /// Free-text music preferences.
    pub music_preferences: String,
    /// Class length in minutes.
    pub duration: u32,
}

impl GenerateRequest {
    /// Build a validated request.
    pub fn new(class_name: &str, music_preferences: &str, duration: u32) -> Result<Self> {
        let class_name = class_name.trim();
        let music_preferences = music_preferences.trim();
        if class_name.is_empty() || music_preferences.is_empty() {
            return Err(Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
            return Err(Error::Validation(format!(
                "Duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes"
            )));
        }
        Ok(Self {
            class_name: class_name.to_string(),
            music_preferences: music_preferences.to_string(),
            duration,
        })
    }
}

/// Spotify identifiers of one matched track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpotifyData {
    /// Spotify track ID.
    #[serde(default)]
    pub spotify_id: Option<String>,
}

/// A track the backend found on Spotify.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FoundTrack {
    /// Spotify identifiers.
    #[serde(default)]
    pub spotify_data: SpotifyData,
}

/// Spotify search statistics for a generated playlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchResults {
    /// Tracks matched on Spotify.
    #[serde(default)]
    pub found_count: u32,
    /// Tracks searched for.
    #[serde(default)]
    pub total_tracks: u32,
    /// Matched tracks with their identifiers.
    #[serde(default)]
    pub successful_tracks: Vec<FoundTrack>,
}

/// Spotify side of a generated playlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpotifyIntegration {
    /// Track IDs ready for export, when the backend collected them.
    #[serde(default)]
    pub track_ids: Option<Vec<String>>,
    /// Search statistics.
    #[serde(default)]
    pub search_results: Option<SearchResults>,
}

/// A playlist produced by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GeneratedPlaylist {
    /// Human-readable playlist text, phase by phase.
    #[serde(default)]
    pub playlist: String,
    /// Spotify matching results.
    #[serde(default)]
    pub spotify_integration: Option<SpotifyIntegration>,
    /// Whether the playlist can be exported to Spotify.
    #[serde(default)]
    pub ready_for_export: bool,
}

impl GeneratedPlaylist {
    /// Track IDs to export.
    ///
    /// Uses the backend's `track_ids` list when present, otherwise the IDs of
    /// the successfully matched tracks. IDs are passed through unchanged.
    pub fn export_track_ids(&self) -> Vec<String> {
        let Some(integration) = &self.spotify_integration else {
            return Vec::new();
        };
        if let Some(ids) = &integration.track_ids {
            return ids.clone();
        }
        integration
            .search_results
            .as_ref()
            .map(|results| {
                results
                    .successful_tracks
                    .iter()
                    .filter_map(|track| track.spotify_data.spotify_id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// "found/total tracks found on Spotify", or a placeholder.
    pub fn spotify_summary(&self) -> String {
        match self
            .spotify_integration
            .as_ref()
            .and_then(|i| i.search_results.as_ref())
        {
            Some(results) => format!(
                "{}/{} tracks found on Spotify",
                results.found_count, results.total_tracks
            ),
            None => "No Spotify data".to_string(),
        }
    }
}

/// `POST /generate-playlist` response body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct GenerateResponse {
    /// Whether the backend succeeded.
    #[serde(default)]
    pub success: bool,
    /// The generated playlist, flattened into the response.
    #[serde(flatten)]
    pub playlist: GeneratedPlaylist,
    /// Error text on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Convert into the generated playlist or a backend error.
    pub fn into_result(self) -> Result<GeneratedPlaylist> {
        if self.success {
            Ok(self.playlist)
        } else {
            Err(Error::Backend(
                self.error
                    .unwrap_or_else(|| "Failed to generate playlist".to_string()),
            ))
        }
    }
}

/// Default export name: class name plus the ISO date, e.g. `"Vinyasa Flow - 2024-01-01"`.
pub fn default_playlist_name(class_name: &str, iso_date: &str) -> String {
    format!("{} - {}", class_name.trim(), iso_date)
}
