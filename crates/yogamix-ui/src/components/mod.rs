//! UI components for the Yogamix page.

mod export_panel;
mod generate_form;
mod header;
mod playlist_output;
mod status_bar;
mod toast;

pub use export_panel::{ExportPanel, ExportStatusView};
pub use generate_form::GenerateForm;
pub use header::Header;
pub use playlist_output::{GenerationError, PlaylistOutput};
pub use status_bar::StatusBar;
pub use toast::{ToastStack, Toasts, use_toasts};
