//! Generated playlist display.

use leptos::prelude::*;
use yogamix_core::GeneratedPlaylist;

/// Playlist text plus the Spotify match summary.
#[component]
pub fn PlaylistOutput(playlist: GeneratedPlaylist) -> impl IntoView {
    let summary = playlist.spotify_summary();

    view! {
        <section class="playlist-output" data-testid="playlist-output">
            <h2>"Your playlist"</h2>
            <pre class="playlist-text">{playlist.playlist}</pre>
            <p class="spotify-summary">{summary}</p>
        </section>
    }
}

/// Occupies the output slot after a failed generation.
#[component]
pub fn GenerationError(message: String) -> impl IntoView {
    view! {
        <section class="playlist-output generation-error" role="alert" data-testid="generation-error">
            <h2>"Error"</h2>
            <p>{message}</p>
            <p class="hint">"Please try again or contact support if the problem persists."</p>
        </section>
    }
}
