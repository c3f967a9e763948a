//! Renders export progress into the page's reactive state.

use leptos::prelude::*;
use yogamix_core::{ExportPresenter, ExportStatus};

use crate::components::Toasts;
use crate::types::Notification;

/// Pushes [`ExportStatus`] into a signal and mirrors outcomes as toasts.
#[derive(Clone, Copy)]
pub struct PagePresenter {
    status: WriteSignal<ExportStatus>,
    toasts: Toasts,
}

impl PagePresenter {
    /// Create a presenter writing to `status`.
    pub const fn new(status: WriteSignal<ExportStatus>, toasts: Toasts) -> Self {
        Self { status, toasts }
    }
}

impl ExportPresenter for PagePresenter {
    fn present(&self, status: ExportStatus) {
        leptos::logging::log!("Export status: {:?}", status);
        if let Some(notification) = Notification::for_export(&status) {
            self.toasts.show(notification);
        }
        self.status.set(status);
    }
}
