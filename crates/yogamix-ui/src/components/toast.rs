//! Toast stack for export, generation and class outcomes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::types::{Notification, NotificationType};

/// Oldest toasts are dropped beyond this many.
const MAX_VISIBLE: usize = 4;

/// Handle to the page's toast stack.
#[derive(Clone, Copy)]
pub struct Toasts {
    stack: RwSignal<Vec<Notification>>,
}

impl Toasts {
    /// Create the stack and make it available to descendants.
    pub fn provide() -> Self {
        let toasts = Self {
            stack: RwSignal::new(Vec::new()),
        };
        provide_context(toasts);
        toasts
    }

    /// Show `notification`, scheduling its removal when it has a duration.
    pub fn show(self, notification: Notification) {
        let id = notification.id;
        let duration_ms = notification.duration_ms;

        self.stack.update(|stack| {
            stack.push(notification);
            if stack.len() > MAX_VISIBLE {
                stack.remove(0);
            }
        });

        if let Some(duration) = duration_ms {
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(duration).await;
                // The page may have been torn down meanwhile.
                self.stack.try_update(|stack| stack.retain(|n| n.id != id));
            });
        }
    }

    fn dismiss(self, id: u64) {
        self.stack.update(|stack| stack.retain(|n| n.id != id));
    }
}

/// The toast stack provided by [`Toasts::provide`].
///
/// # Panics
/// Panics if no stack was provided above the caller.
pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

/// Renders the toast stack in the page corner.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-container" data-testid="toast-container">
            <For
                each=move || toasts.stack.get()
                key=|notification| notification.id
                children=move |notification| {
                    let id = notification.id;
                    let kind = notification.notification_type;
                    let icon = match kind {
                        NotificationType::Success => "\u{2713}",
                        NotificationType::Error => "!",
                    };
                    view! {
                        <div
                            class=format!("toast toast-{kind}")
                            role="alert"
                            data-toast-type=kind.to_string()
                        >
                            <span class="toast-icon" aria-hidden="true">{icon}</span>
                            <p class="toast-message">{notification.message}</p>
                            <button
                                class="toast-dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "\u{00d7}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
