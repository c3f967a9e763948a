//! Class, preferences and duration inputs for playlist generation.
//!
//! The class picker ends with an "Add New Class..." entry. Choosing it swaps
//! the picker for an inline form; saving selects the new class once the
//! backend has stored it, cancelling restores the picker.

use leptos::prelude::*;
use yogamix_core::{
    DEFAULT_DURATION_MINUTES, GenerateRequest, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
    NewClass, YogaClass,
};

use crate::components::use_toasts;
use crate::types::Notification;

/// Picker value that opens the add-class form.
pub const ADD_NEW_CLASS_VALUE: &str = "__ADD_NEW__";

/// Playlist generation form.
///
/// Validates input locally and hands a ready [`GenerateRequest`] to
/// `on_generate`, or a ready [`NewClass`] to `on_add_class`.
#[component]
pub fn GenerateForm(
    /// Classes offered by the backend.
    #[prop(into)]
    classes: Signal<Vec<YogaClass>>,
    /// Picker value; the page selects a class here after adding it.
    selected_class: RwSignal<String>,
    /// Whether a generation request is in flight.
    #[prop(into)]
    generating: Signal<bool>,
    /// Whether a new class is being saved.
    #[prop(into)]
    saving_class: Signal<bool>,
    /// Called with a validated generation request.
    on_generate: Callback<GenerateRequest>,
    /// Called with a validated new class.
    on_add_class: Callback<NewClass>,
) -> impl IntoView {
    let toasts = use_toasts();
    let (preferences, set_preferences) = signal(String::new());
    let (duration, set_duration) = signal(DEFAULT_DURATION_MINUTES);
    let adding = move || selected_class.get() == ADD_NEW_CLASS_VALUE;

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let class_name = selected_class.get_untracked();
        let class_name = if class_name == ADD_NEW_CLASS_VALUE {
            String::new()
        } else {
            class_name
        };
        match GenerateRequest::new(&class_name, &preferences.get_untracked(), duration.get_untracked()) {
            Ok(request) => on_generate.run(request),
            Err(e) => toasts.show(Notification::error(e.user_message())),
        }
    };

    view! {
        <form class="generate-form" on:submit=submit>
            <label for="class-select">"Yoga class"</label>
            <Show
                when=adding
                fallback=move || {
                    view! {
                        <select
                            id="class-select"
                            on:change=move |ev| selected_class.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || selected_class.get().is_empty()>
                                "Select a class..."
                            </option>
                            <For
                                each=move || classes.get()
                                key=|class| class.name.clone()
                                children=move |class| {
                                    let label = class.label();
                                    let name = class.name.clone();
                                    view! {
                                        <option
                                            value=class.name
                                            selected=move || selected_class.get() == name
                                        >
                                            {label}
                                        </option>
                                    }
                                }
                            />
                            <option value=ADD_NEW_CLASS_VALUE>"\u{2795} Add New Class..."</option>
                        </select>
                    }
                }
            >
                <AddClassForm
                    saving=saving_class
                    on_save=on_add_class
                    on_cancel=Callback::new(move |()| selected_class.set(String::new()))
                />
            </Show>

            <label for="music-preferences">"Music preferences"</label>
            <textarea
                id="music-preferences"
                placeholder="e.g. ambient, acoustic, no lyrics"
                prop:value=move || preferences.get()
                on:input=move |ev| set_preferences.set(event_target_value(&ev))
            ></textarea>

            <label for="duration">
                "Duration: " <span class="duration-value">{move || duration.get()}</span> " minutes"
            </label>
            <input
                id="duration"
                type="range"
                min=MIN_DURATION_MINUTES.to_string()
                max=MAX_DURATION_MINUTES.to_string()
                step="5"
                prop:value=move || duration.get().to_string()
                on:input=move |ev| {
                    if let Ok(minutes) = event_target_value(&ev).parse::<u32>() {
                        set_duration.set(minutes);
                    }
                }
            />

            <button class="btn btn-primary" type="submit" disabled=move || generating.get()>
                {move || if generating.get() { "Generating..." } else { "Generate Playlist" }}
            </button>
        </form>
    }
}

/// Inline name/description form shown in place of the picker.
#[component]
fn AddClassForm(
    saving: Signal<bool>,
    on_save: Callback<NewClass>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let save = move |_: leptos::ev::MouseEvent| match NewClass::new(&name.get_untracked(), &description.get_untracked()) {
        Ok(class) => on_save.run(class),
        Err(e) => toasts.show(Notification::error(e.user_message())),
    };

    view! {
        <div class="add-class-form" data-testid="add-class-form">
            <input
                id="new-class-name"
                type="text"
                placeholder="Class name, e.g. Restorative Yoga"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <textarea
                id="new-class-description"
                placeholder="Describe the class: pace, intensity, focus"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
            <div class="add-class-actions">
                <button
                    class="btn btn-primary"
                    type="button"
                    disabled=move || saving.get()
                    on:click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save & Use This Class" }}
                </button>
                <button class="btn btn-secondary" type="button" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
