//! Header component.

use leptos::prelude::*;

/// Page header.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="logo">
                <span class="logo-text">"Yogamix"</span>
            </div>
            <p class="tagline">"Music for your practice, straight to Spotify"</p>
        </header>
    }
}
