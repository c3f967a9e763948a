//! Backend and Spotify reachability indicators.

use leptos::prelude::*;

use crate::types::{Service, ServiceState};

/// Two status indicators: API health and Spotify connectivity.
#[component]
pub fn StatusBar(
    /// Result of the `/health` check.
    #[prop(into)]
    backend: Signal<ServiceState>,
    /// Result of the `/test-spotify` check.
    #[prop(into)]
    spotify: Signal<ServiceState>,
) -> impl IntoView {
    view! {
        <div class="status-bar" data-testid="status-bar">
            <StatusIndicator service=Service::Backend state=backend />
            <StatusIndicator service=Service::Spotify state=spotify />
        </div>
    }
}

#[component]
fn StatusIndicator(service: Service, state: Signal<ServiceState>) -> impl IntoView {
    view! {
        <span class=move || format!("status-indicator {}", state.get().class())>
            <span class="status-dot" aria-hidden="true"></span>
            <span class="status-label">
                {service.name()}": "{move || service.describe(state.get())}
            </span>
        </span>
    }
}
