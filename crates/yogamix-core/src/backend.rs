//! Backend API client.
//!
//! The backend exposes one export endpoint that serves two purposes,
//! selected by the `action` field of the request body: handing out a Spotify
//! authorization URL, and creating a playlist with an authorization code.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::catalog::{
    AddClassResponse, ClassesResponse, GenerateRequest, GenerateResponse, GeneratedPlaylist,
    NewClass, YogaClass,
};
use crate::config::{ClientConfig, with_trailing_slash};
use crate::error::{Error, Result};

/// Export endpoint, relative to the API base.
pub const EXPORT_ENDPOINT: &str = "create-spotify-playlist";
/// Class catalog endpoint.
pub const CLASSES_ENDPOINT: &str = "classes";
/// Playlist generation endpoint.
pub const GENERATE_ENDPOINT: &str = "generate-playlist";
/// Backend health endpoint.
pub const HEALTH_ENDPOINT: &str = "health";
/// Spotify connectivity endpoint.
pub const SPOTIFY_STATUS_ENDPOINT: &str = "test-spotify";

/// Shown when the backend refuses an authorization URL without saying why.
pub const DEFAULT_AUTH_URL_ERROR: &str = "Failed to get Spotify authorization URL";
/// Shown when the backend refuses to create a playlist without saying why.
pub const DEFAULT_CREATE_ERROR: &str = "Failed to create playlist";

/// Playlist creation request, sent with an authorization code.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePlaylistRequest {
    /// Playlist name.
    pub playlist_name: String,
    /// Track IDs, in order.
    pub track_ids: Vec<String>,
    /// Authorization code from the Spotify redirect.
    pub auth_code: String,
}

/// Request body of the export endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ExportAction<'a> {
    /// Ask for an authorization URL.
    GetAuthUrl,
    /// Create the playlist.
    CreatePlaylist(&'a CreatePlaylistRequest),
}

/// Response body for [`ExportAction::GetAuthUrl`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct AuthUrlResponse {
    /// Whether the backend succeeded.
    #[serde(default)]
    pub success: bool,
    /// Spotify authorization URL.
    #[serde(default)]
    pub auth_url: Option<String>,
    /// Error text on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl AuthUrlResponse {
    /// The authorization URL, or the backend's reason for not providing one.
    pub fn into_result(self) -> Result<String> {
        match (self.success, self.auth_url) {
            (true, Some(url)) if !url.is_empty() => Ok(url),
            _ => Err(Error::Backend(
                self.error
                    .unwrap_or_else(|| DEFAULT_AUTH_URL_ERROR.to_string()),
            )),
        }
    }
}

/// Response body for [`ExportAction::CreatePlaylist`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct CreatePlaylistResponse {
    /// Whether the playlist was created.
    #[serde(default)]
    pub success: bool,
    /// Link to the created playlist.
    #[serde(default)]
    pub playlist_url: Option<String>,
    /// Confirmation message.
    #[serde(default)]
    pub message: Option<String>,
    /// Set when the authorization code was rejected.
    #[serde(default)]
    pub needs_auth: bool,
    /// Error text on failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// Interpreted result of a playlist creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePlaylistOutcome {
    /// The playlist exists now.
    Created {
        /// Link to the playlist, if returned.
        playlist_url: Option<String>,
        /// Confirmation message.
        message: String,
    },
    /// The code was invalid or expired; authorization must be redone.
    NeedsAuth,
    /// Any other backend failure.
    Rejected {
        /// Backend error text.
        error: String,
    },
}

impl From<CreatePlaylistResponse> for CreatePlaylistOutcome {
    fn from(response: CreatePlaylistResponse) -> Self {
        if response.success {
            Self::Created {
                playlist_url: response.playlist_url.filter(|url| !url.is_empty()),
                message: response
                    .message
                    .unwrap_or_else(|| "Playlist created".to_string()),
            }
        } else if response.needs_auth {
            Self::NeedsAuth
        } else {
            Self::Rejected {
                error: response
                    .error
                    .unwrap_or_else(|| DEFAULT_CREATE_ERROR.to_string()),
            }
        }
    }
}

/// The backend calls the export flow depends on.
///
/// `Err` means the request never produced a readable answer (transport
/// failure) or, for [`request_auth_url`](Self::request_auth_url), that the
/// backend declined. Backend-reported outcomes of playlist creation come back
/// as `Ok`.
#[allow(async_fn_in_trait)]
pub trait ExportBackend {
    /// Ask for a Spotify authorization URL.
    async fn request_auth_url(&self) -> Result<String>;

    /// Create the playlist using an authorization code.
    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistOutcome>;
}

impl<T: ExportBackend> ExportBackend for Rc<T> {
    async fn request_auth_url(&self) -> Result<String> {
        (**self).request_auth_url().await
    }

    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistOutcome> {
        (**self).create_playlist(request).await
    }
}

/// HTTP implementation of the backend API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client rooted at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Create a client from configuration, resolving a relative base against `origin`.
    pub fn from_config(config: &ClientConfig, origin: &str) -> Result<Self> {
        Ok(Self::new(config.resolve_api_base(origin)?))
    }

    /// The API base URL.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(name)?)
    }

    /// Read a JSON body regardless of the HTTP status.
    ///
    /// The backend reports failures as `{"success": false, ...}` with 4xx
    /// codes, so the status alone says nothing about the outcome.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%status, "Unreadable backend response: {}", e);
            Error::Transport(format!("Unreadable response from backend (HTTP {status}): {e}"))
        })
    }

    async fn post_json<B, T>(&self, name: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(name)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let url = self.endpoint(name)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    /// List the available yoga classes.
    pub async fn list_classes(&self) -> Result<Vec<YogaClass>> {
        let response: ClassesResponse = self.get_json(CLASSES_ENDPOINT).await?;
        response.into_result()
    }

    /// Store a new class type. Blank fields fail before any request is sent.
    pub async fn add_class(&self, class: &NewClass) -> Result<()> {
        class.validate()?;
        let response: AddClassResponse = self.post_json(CLASSES_ENDPOINT, class).await?;
        response.into_result()?;
        info!(name = %class.name, "Class added");
        Ok(())
    }

    /// Generate a playlist for a class.
    pub async fn generate_playlist(&self, request: &GenerateRequest) -> Result<GeneratedPlaylist> {
        let response: GenerateResponse = self.post_json(GENERATE_ENDPOINT, request).await?;
        response.into_result()
    }

    /// Whether the backend reports itself healthy.
    pub async fn backend_healthy(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct Health {
            #[serde(default)]
            status: String,
        }

        let health: Health = self.get_json(HEALTH_ENDPOINT).await?;
        Ok(health.status == "healthy")
    }

    /// Whether the backend can reach Spotify.
    pub async fn spotify_connected(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct SpotifyStatus {
            #[serde(default)]
            success: bool,
            #[serde(default)]
            connected: bool,
        }

        let status: SpotifyStatus = self.get_json(SPOTIFY_STATUS_ENDPOINT).await?;
        Ok(status.success && status.connected)
    }
}

impl ExportBackend for HttpBackend {
    async fn request_auth_url(&self) -> Result<String> {
        let response: AuthUrlResponse = self
            .post_json(EXPORT_ENDPOINT, &ExportAction::GetAuthUrl)
            .await?;
        response.into_result()
    }

    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistOutcome> {
        let response: CreatePlaylistResponse = self
            .post_json(EXPORT_ENDPOINT, &ExportAction::CreatePlaylist(request))
            .await?;
        Ok(response.into())
    }
}
