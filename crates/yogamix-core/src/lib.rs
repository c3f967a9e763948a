//! `Yogamix` Core Library
//!
//! This crate provides the client-side logic behind the Yogamix page:
//! - The pending export record and its single-slot intent store
//! - Detection of the Spotify authorization redirect
//! - The authorization redirect and the page-load export resumer
//! - The backend API client (export, class catalog, new classes, playlist generation)
//! - Client configuration
//!
//! Browser facilities (storage, address bar, navigation, rendering) are
//! reached through the traits in [`storage`], [`address`], and
//! [`presenter`], so the whole flow runs natively under test.
//!
//! # Error Handling
//!
//! Every fallible operation returns [`Result`]. See the [`error`] module for
//! how failures map to what the user sees.
//!
//! ```rust,ignore
//! use yogamix_core::{ExportSession, ResumeOutcome};
//!
//! async fn on_page_load(session: &ExportSession<HttpBackend>) {
//!     if let ResumeOutcome::Completed { playlist_url, .. } = session.resume().await {
//!         // show the link
//!     }
//! }
//! ```

pub mod address;
pub mod authorize;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod presenter;
pub mod resume;
pub mod session;
pub mod storage;

#[cfg(test)]
mod testing;

pub use address::{AddressBar, MemoryAddressBar, ReturnDetector};
pub use authorize::AuthorizationOutcome;
pub use backend::{
    AuthUrlResponse, CreatePlaylistOutcome, CreatePlaylistRequest, CreatePlaylistResponse,
    EXPORT_ENDPOINT, ExportAction, ExportBackend, HttpBackend,
};
pub use catalog::{
    DEFAULT_DURATION_MINUTES, GenerateRequest, GeneratedPlaylist, MAX_DURATION_MINUTES,
    MIN_DURATION_MINUTES, NewClass, SpotifyIntegration, YogaClass, default_playlist_name,
};
pub use config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_STORAGE_KEY};
pub use error::{Error, ErrorKind, NETWORK_ERROR_MESSAGE, Result};
pub use export::{AuthorizationResult, PendingExport, now_millis};
pub use presenter::{ExportPresenter, ExportStatus, Navigator};
pub use resume::{ResumeOutcome, ResumeState};
pub use session::ExportSession;
pub use storage::{IntentStore, KeyValueStorage, MemoryStorage};
