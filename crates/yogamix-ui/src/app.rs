//! Main application component.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use yogamix_core::{
    AuthorizationOutcome, ExportSession, ExportStatus, GenerateRequest, HttpBackend, NewClass,
    ResumeOutcome, YogaClass, default_playlist_name,
};

use crate::browser::{connect_session, read_client_config, today_iso};
use crate::components::{
    ExportPanel, ExportStatusView, GenerateForm, GenerationError, Header, PlaylistOutput,
    StatusBar, ToastStack, Toasts, use_toasts,
};
use crate::presenter::PagePresenter;
use crate::theme::generate_css_variables;
use crate::types::{GenerationState, Notification, ServiceState};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let css_vars = generate_css_variables();
    Toasts::provide();

    view! {
        <style>{css_vars}</style>
        <style>{include_str!("../styles/main.css")}</style>
        <AppContent />
        <ToastStack />
    }
}

/// Builds the export session, or explains why it could not.
#[component]
fn AppContent() -> impl IntoView {
    let toasts = use_toasts();
    let (export_status, set_export_status) = signal(ExportStatus::default());
    let presenter = PagePresenter::new(set_export_status, toasts);

    let config = read_client_config();
    match connect_session(&config, Rc::new(presenter)) {
        Ok(session) => view! { <PlaylistPage session=session export_status=export_status /> }
            .into_any(),
        Err(e) => {
            tracing::error!("Page setup failed: {}", e);
            toasts.show(Notification::error(e.user_message()).persistent());
            view! {
                <Header />
                <main class="setup-error">
                    <p>"Yogamix could not reach its backend configuration."</p>
                </main>
            }
            .into_any()
        }
    }
}

/// Replace the class list with the backend's. Returns whether it worked.
async fn refresh_classes(
    backend: &HttpBackend,
    set_classes: WriteSignal<Vec<YogaClass>>,
    toasts: Toasts,
) -> bool {
    match backend.list_classes().await {
        Ok(list) => {
            set_classes.set(list);
            true
        }
        Err(e) => {
            leptos::logging::error!("Failed to load classes: {}", e);
            toasts.show(Notification::error(format!(
                "Failed to load classes: {}",
                e.user_message()
            )));
            false
        }
    }
}

#[component]
fn PlaylistPage(
    session: ExportSession<HttpBackend>,
    export_status: ReadSignal<ExportStatus>,
) -> impl IntoView {
    let toasts = use_toasts();
    let session = StoredValue::new_local(Rc::new(session));

    let (classes, set_classes) = signal::<Vec<YogaClass>>(vec![]);
    let selected_class = RwSignal::new(String::new());
    let (saving_class, set_saving_class) = signal(false);
    let (backend_state, set_backend_state) = signal(ServiceState::Checking);
    let (spotify_state, set_spotify_state) = signal(ServiceState::Checking);
    let (generation, set_generation) = signal(GenerationState::Empty);

    // Runs once: nothing reactive is read synchronously. Each request gets
    // its own task so a slow endpoint holds up only its own indicator.
    Effect::new(move || {
        spawn_local(async move {
            let session = session.get_value();
            match session.resume().await {
                ResumeOutcome::NoIntent => {}
                ResumeOutcome::IntentWithoutCode => {
                    leptos::logging::log!("Pending export kept until authorization completes");
                }
                outcome => leptos::logging::log!("Resumed export: {:?}", outcome),
            }
        });

        spawn_local(async move {
            let session = session.get_value();
            refresh_classes(session.backend(), set_classes, toasts).await;
        });

        spawn_local(async move {
            let session = session.get_value();
            let health = session.backend().backend_healthy().await;
            if let Err(e) = &health {
                leptos::logging::error!("Backend health check failed: {}", e);
            }
            set_backend_state.set(ServiceState::from_check(&health));
        });

        spawn_local(async move {
            let session = session.get_value();
            let spotify = session.backend().spotify_connected().await;
            if let Err(e) = &spotify {
                leptos::logging::error!("Spotify check failed: {}", e);
            }
            set_spotify_state.set(ServiceState::from_check(&spotify));
        });
    });

    let on_generate = Callback::new(move |request: GenerateRequest| {
        set_generation.set(GenerationState::Generating);
        spawn_local(async move {
            let session = session.get_value();
            let state = match session.backend().generate_playlist(&request).await {
                Ok(playlist) => {
                    leptos::logging::log!(
                        "Generated playlist for {}: {}",
                        request.class_name,
                        playlist.spotify_summary()
                    );
                    toasts.show(Notification::playlist_generated(&playlist));
                    GenerationState::Ready {
                        class_name: request.class_name,
                        playlist,
                    }
                }
                Err(e) => {
                    leptos::logging::error!("Playlist generation failed: {}", e);
                    GenerationState::Failed(e.user_message())
                }
            };
            set_generation.set(state);
        });
    });

    let on_add_class = Callback::new(move |class: NewClass| {
        set_saving_class.set(true);
        spawn_local(async move {
            let session = session.get_value();
            let backend = session.backend();
            match backend.add_class(&class).await {
                Ok(()) => {
                    refresh_classes(backend, set_classes, toasts).await;
                    selected_class.set(class.name.clone());
                    toasts.show(Notification::class_added(&class.name));
                }
                Err(e) => {
                    leptos::logging::error!("Adding class {} failed: {}", class.name, e);
                    toasts.show(Notification::error(e.user_message()));
                }
            }
            set_saving_class.set(false);
        });
    });

    let on_export = Callback::new(move |playlist_name: String| {
        let track_ids = generation.with_untracked(|state| {
            state
                .playlist()
                .map(|playlist| playlist.export_track_ids())
                .unwrap_or_default()
        });
        spawn_local(async move {
            let session = session.get_value();
            match session.request_export(&playlist_name, track_ids).await {
                Ok(AuthorizationOutcome::Redirected { auth_url }) => {
                    leptos::logging::log!("Leaving for {}", auth_url);
                }
                Ok(AuthorizationOutcome::Failed { kind, message }) => {
                    leptos::logging::warn!("Authorization not started ({:?}): {}", kind, message);
                }
                Err(e) => leptos::logging::warn!("Export not started: {}", e),
            }
        });
    });

    view! {
        <Header />
        <StatusBar backend=backend_state spotify=spotify_state />
        <main class="app-main">
            <GenerateForm
                classes=classes
                selected_class=selected_class
                generating=Signal::derive(move || generation.with(GenerationState::is_generating))
                saving_class=saving_class
                on_generate=on_generate
                on_add_class=on_add_class
            />
            <ExportStatusView status=export_status />
            {move || match generation.get() {
                GenerationState::Empty | GenerationState::Generating => ().into_any(),
                GenerationState::Failed(message) => {
                    view! { <GenerationError message=message /> }.into_any()
                }
                GenerationState::Ready { class_name, playlist } => {
                    let export_panel = playlist
                        .ready_for_export
                        .then(|| {
                            view! {
                                <ExportPanel
                                    default_name=default_playlist_name(&class_name, &today_iso())
                                    status=export_status
                                    on_export=on_export
                                />
                            }
                        });
                    view! {
                        <PlaylistOutput playlist=playlist />
                        {export_panel}
                    }
                        .into_any()
                }
            }}
        </main>
    }
}
