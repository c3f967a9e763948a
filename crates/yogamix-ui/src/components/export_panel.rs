//! Spotify export controls and result area.

use leptos::prelude::*;
use yogamix_core::ExportStatus;

/// Name input and export button.
#[component]
pub fn ExportPanel(
    /// Prefilled playlist name.
    default_name: String,
    /// Current export status.
    #[prop(into)]
    status: Signal<ExportStatus>,
    /// Called with the entered name.
    on_export: Callback<String>,
) -> impl IntoView {
    let (name, set_name) = signal(default_name);

    view! {
        <section class="export-panel" data-testid="export-panel">
            <h2>"Export to Spotify"</h2>
            <label for="playlist-name">"Playlist name"</label>
            <input
                id="playlist-name"
                type="text"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <button
                class="btn btn-spotify"
                disabled=move || status.get().is_busy()
                on:click=move |_| on_export.run(name.get())
            >
                {move || status.get().button_label()}
            </button>
        </section>
    }
}

/// Export progress and result.
///
/// Rendered outside the panel so the outcome of a resumed export shows even
/// though no playlist was generated on this page load.
#[component]
pub fn ExportStatusView(
    /// Current export status.
    #[prop(into)]
    status: Signal<ExportStatus>,
) -> impl IntoView {
    view! {
        <div class="export-result" aria-live="polite" data-testid="export-result">
            {move || match status.get() {
                ExportStatus::Idle => ().into_any(),
                ExportStatus::Authorizing => {
                    view! { <p class="export-progress">"Getting Spotify authorization..."</p> }
                        .into_any()
                }
                ExportStatus::Redirecting { .. } => {
                    view! { <p class="export-progress">"Redirecting to Spotify..."</p> }.into_any()
                }
                ExportStatus::Creating { playlist_name } => {
                    view! {
                        <p class="export-progress">"Creating \"" {playlist_name} "\" on Spotify..."</p>
                    }
                        .into_any()
                }
                ExportStatus::Succeeded { message, playlist_url } => {
                    view! {
                        <div class="export-success">
                            <p>{message}</p>
                            {playlist_url
                                .map(|url| {
                                    view! {
                                        <a href=url target="_blank" rel="noopener" class="btn btn-spotify">
                                            "Open in Spotify"
                                        </a>
                                    }
                                })}
                        </div>
                    }
                        .into_any()
                }
                ExportStatus::Failed { message } => {
                    view! { <p class="export-error">{message}</p> }.into_any()
                }
            }}
        </div>
    }
}
