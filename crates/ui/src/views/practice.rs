use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct TopicChoice {
    id: u64,
    name: String,
    question_count: u64,
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let lessons = ctx.lessons();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            let path = lessons
                .learning_path()
                .await
                .map_err(|_| ViewError::Unknown)?;
            let topics = path
                .into_iter()
                .map(|node| TopicChoice {
                    id: node.topic.id().value(),
                    name: node.topic.name().to_string(),
                    question_count: node.question_count,
                })
                .collect::<Vec<_>>();
            Ok::<_, ViewError>(topics)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page practice-page",
            header { class: "view-header",
                h2 { class: "view-title", "Practice" }
                p { class: "view-subtitle muted", "Pick a session type to get started." }
            }

            div { class: "practice-grid",
                div { class: "card practice-card practice-card--primary",
                    h4 { "Mock Theory Test" }
                    p { class: "muted", "Timed, the full bank, pass mark 86%. Just like the real thing." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Quiz { mode: "mock".to_string() });
                        },
                        "Start Mock Test"
                    }
                }
                div { class: "card practice-card",
                    h4 { "Quick Practice" }
                    p { class: "muted", "A short shuffled round. No timer, instant feedback." }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Quiz { mode: "quick".to_string() });
                        },
                        "Start Quick Practice"
                    }
                }
            }

            h3 { class: "section-title", "By topic" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(topics) => rsx! {
                    if topics.is_empty() {
                        p { class: "muted", "No topics yet." }
                    } else {
                        div { class: "topic-grid",
                            for topic in topics {
                                div { class: "card topic-card", key: "{topic.id}",
                                    h4 { "{topic.name}" }
                                    p { class: "muted", "{topic.question_count} questions" }
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let _ = navigator.push(Route::Quiz {
                                                mode: format!("topic-{}", topic.id),
                                            });
                                        },
                                        "Practice This Topic"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
