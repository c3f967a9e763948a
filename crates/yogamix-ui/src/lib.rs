//! `Yogamix` UI - Leptos-based page.
//!
//! Wires the browser (local storage, address bar, navigation) into the
//! `yogamix_core` export session and renders the generate/export page.

// Component files tend to be large by nature - they contain view logic
#![allow(clippy::too_many_lines)]
// Pass by value suggestions for small types like bool - not always clearer
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod app;
pub mod browser;
pub mod components;
pub mod logging;
pub mod presenter;
pub mod theme;
pub mod types;

pub use app::App;
pub use logging::LoggingConfig;
