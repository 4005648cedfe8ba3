use dioxus::prelude::*;

use k53_core::model::Preferences;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let preferences = ctx.preferences();

    let prefs = use_signal(|| None::<Preferences>);
    let mut save_error = use_signal(|| false);

    let preferences_for_resource = preferences.clone();
    let resource = use_resource(move || {
        let preferences = preferences_for_resource.clone();
        let mut prefs = prefs;
        async move {
            // current() already maps a corrupt record to defaults
            prefs.set(Some(preferences.current().await));
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);

    let toggle_sound = {
        let preferences = preferences.clone();
        use_callback(move |()| {
            let preferences = preferences.clone();
            let mut prefs = prefs;
            let mut save_error = save_error;
            spawn(async move {
                match preferences.toggle_sound().await {
                    Ok(updated) => {
                        save_error.set(false);
                        prefs.set(Some(updated));
                    }
                    Err(_) => save_error.set(true),
                }
            });
        })
    };
    let toggle_communication = {
        let preferences = preferences.clone();
        use_callback(move |()| {
            let preferences = preferences.clone();
            let mut prefs = prefs;
            let mut save_error = save_error;
            spawn(async move {
                match preferences.toggle_communication().await {
                    Ok(updated) => {
                        save_error.set(false);
                        prefs.set(Some(updated));
                    }
                    Err(_) => save_error.set(true),
                }
            });
        })
    };

    let prefs_guard = prefs.read();

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Profile" }
                p { class: "view-subtitle muted", "Your study stats and app settings." }
            }

            div { class: "stat-strip",
                div { class: "stat-tile",
                    span { class: "stat-tile__value", "1 247" }
                    span { class: "stat-tile__caption muted", "Questions completed" }
                }
                div { class: "stat-tile",
                    span { class: "stat-tile__value", "85%" }
                    span { class: "stat-tile__caption muted", "Average score" }
                }
                div { class: "stat-tile",
                    span { class: "stat-tile__value", "24h" }
                    span { class: "stat-tile__caption muted", "Study time" }
                }
                div { class: "stat-tile",
                    span { class: "stat-tile__value", "12 days" }
                    span { class: "stat-tile__caption muted", "Longest streak" }
                }
            }

            h3 { class: "section-title", "Settings" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(current) = prefs_guard.as_ref() {
                        div { class: "card settings-card",
                            SettingRow {
                                label: "Sound effects",
                                description: "Play a cue after each answer",
                                enabled: current.sound_enabled,
                                on_toggle: toggle_sound,
                            }
                            SettingRow {
                                label: "Communications",
                                description: "Study reminders and product updates",
                                enabled: current.communication_enabled,
                                on_toggle: toggle_communication,
                            }
                            if save_error() {
                                p { class: "settings-error", "Couldn't save that change. Please try again." }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SettingRow(
    label: &'static str,
    description: &'static str,
    enabled: bool,
    on_toggle: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "setting-row",
            div { class: "setting-row__text",
                span { class: "setting-row__label", "{label}" }
                span { class: "muted", "{description}" }
            }
            button {
                class: if enabled { "toggle toggle--on" } else { "toggle" },
                r#type: "button",
                role: "switch",
                aria_checked: "{enabled}",
                onclick: move |_| on_toggle.call(()),
                span { class: "toggle__thumb" }
            }
        }
    }
}
