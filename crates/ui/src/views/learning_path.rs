use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct PathNodeVm {
    topic_id: u64,
    name: String,
    category: String,
    summary: String,
    question_count: u64,
}

#[component]
pub fn LearningPathView() -> Element {
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
            let nodes = path
                .into_iter()
                .map(|node| PathNodeVm {
                    topic_id: node.topic.id().value(),
                    name: node.topic.name().to_string(),
                    category: node.topic.category().to_string(),
                    summary: node.topic.summary().to_string(),
                    question_count: node.question_count,
                })
                .collect::<Vec<_>>();
            Ok::<_, ViewError>(nodes)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page learning-path-page",
            header { class: "view-header",
                h2 { class: "view-title", "Learning Path" }
                p { class: "view-subtitle muted", "Work through each topic, then practice it." }
            }

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
                ViewState::Ready(nodes) => rsx! {
                    div { class: "path-list",
                        for node in nodes {
                            div { class: "card path-card", key: "{node.topic_id}",
                                div { class: "path-card__main",
                                    div { class: "path-card__heading",
                                        h4 { "{node.name}" }
                                        span { class: "badge badge--category", "{node.category}" }
                                    }
                                    p { class: "muted", "{node.summary}" }
                                    span { class: "muted path-card__count", "{node.question_count} practice questions" }
                                }
                                div { class: "path-card__actions",
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let _ = navigator.push(Route::Lesson {
                                                topic_id: node.topic_id,
                                            });
                                        },
                                        "Open Lesson"
                                    }
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let _ = navigator.push(Route::Quiz {
                                                mode: format!("topic-{}", node.topic_id),
                                            });
                                        },
                                        "Practice"
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
