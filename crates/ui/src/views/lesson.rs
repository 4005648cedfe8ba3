use dioxus::prelude::*;
use dioxus_router::use_navigator;

use k53_core::model::TopicId;
use services::LessonError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::markdown_to_safe_html;

#[derive(Clone, Debug, PartialEq)]
struct SectionVm {
    title: String,
    body_html: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
struct LessonVm {
    name: String,
    category: String,
    duration_label: String,
    xp_reward: u32,
    sections: Vec<SectionVm>,
    key_points: Vec<String>,
}

#[component]
pub fn LessonView(topic_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let lessons = ctx.lessons();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            let (topic, lesson) = lessons
                .lesson(TopicId::new(topic_id))
                .await
                .map_err(|err| match err {
                    LessonError::NotFound => ViewError::NotFound,
                    _ => ViewError::Unknown,
                })?;
            let sections = lesson
                .sections()
                .iter()
                .map(|section| SectionVm {
                    title: section.title.clone(),
                    body_html: section
                        .paragraphs
                        .iter()
                        .map(|paragraph| markdown_to_safe_html(paragraph))
                        .collect(),
                })
                .collect();
            Ok::<_, ViewError>(LessonVm {
                name: topic.name().to_string(),
                category: topic.category().to_string(),
                duration_label: lesson.duration_label().to_string(),
                xp_reward: lesson.xp_reward(),
                sections,
                key_points: lesson.key_points().to_vec(),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page lesson-page",
            header { class: "view-header",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::LearningPath {});
                    },
                    "Back to Learning Path"
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    // terminal not-found state: one recovery action, no crash
                    div { class: "card empty-card",
                        p { class: "muted", "{err.message()}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::LearningPath {});
                            },
                            "Back to Learning Path"
                        }
                    }
                },
                ViewState::Ready(lesson) => rsx! {
                    div { class: "lesson-heading",
                        h2 { "{lesson.name}" }
                        div { class: "lesson-meta",
                            span { class: "badge badge--category", "{lesson.category}" }
                            span { class: "muted", "{lesson.duration_label}" }
                            span { class: "muted", "+{lesson.xp_reward} XP" }
                        }
                    }

                    for (index, section) in lesson.sections.iter().enumerate() {
                        div { class: "card lesson-section", key: "{index}",
                            h3 { "{section.title}" }
                            for (p_index, paragraph) in section.body_html.iter().enumerate() {
                                div {
                                    key: "{p_index}",
                                    class: "lesson-paragraph",
                                    dangerous_inner_html: "{paragraph}",
                                }
                            }
                        }
                    }

                    if !lesson.key_points.is_empty() {
                        div { class: "card lesson-keypoints",
                            h3 { "Key Points" }
                            ul {
                                for (index, point) in lesson.key_points.iter().enumerate() {
                                    li { key: "{index}", "{point}" }
                                }
                            }
                        }
                    }

                    div { class: "lesson-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Quiz { mode: format!("topic-{topic_id}") });
                            },
                            "Practice This Topic"
                        }
                    }
                },
            }
        }
    }
}
