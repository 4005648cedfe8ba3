use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

// Display-only gamification numbers; no algorithm computes these.
const GO_SCORE: u32 = 94;
const TOTAL_XP: u32 = 2_847;
const DAILY_XP: u32 = 150;
const STREAK_DAYS: u32 = 7;
const QUESTIONS_COMPLETED: u32 = 1_247;
const AVERAGE_SCORE: u32 = 85;

struct PracticeOption {
    title: &'static str,
    description: &'static str,
    mode: &'static str,
    primary: bool,
}

const PRACTICE_OPTIONS: &[PracticeOption] = &[
    PracticeOption {
        title: "Mock Theory Test",
        description: "The full question bank under timed test conditions",
        mode: "mock",
        primary: true,
    },
    PracticeOption {
        title: "Quick Practice",
        description: "A short shuffled round to keep you sharp",
        mode: "quick",
        primary: false,
    },
];

#[component]
pub fn HomeView() -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page home-page",
            div { class: "card go-score-card",
                div { class: "go-score-card__text",
                    h3 { "GO Score" }
                    p { class: "muted", "Your overall readiness score" }
                }
                div { class: "go-score-card__value", "{GO_SCORE}" }
            }

            div { class: "stat-strip",
                StatTile { value: "{TOTAL_XP} XP", caption: "Total earned" }
                StatTile { value: "+{DAILY_XP} XP", caption: "Today" }
                StatTile { value: "{STREAK_DAYS} day streak", caption: "Keep it going" }
                StatTile { value: "{QUESTIONS_COMPLETED}", caption: "Questions completed" }
                StatTile { value: "{AVERAGE_SCORE}%", caption: "Average score" }
            }

            h3 { class: "section-title", "Practice" }
            div { class: "practice-grid",
                for option in PRACTICE_OPTIONS {
                    div {
                        class: if option.primary { "card practice-card practice-card--primary" } else { "card practice-card" },
                        h4 { "{option.title}" }
                        p { class: "muted", "{option.description}" }
                        button {
                            class: if option.primary { "btn btn-primary" } else { "btn btn-secondary" },
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Quiz { mode: option.mode.to_string() });
                            },
                            "Start"
                        }
                    }
                }
                div { class: "card practice-card",
                    h4 { "Topic Practice" }
                    p { class: "muted", "Focus on one topic from the learning path" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::LearningPath {});
                        },
                        "Choose a Topic"
                    }
                }
            }
        }
    }
}

#[component]
fn StatTile(value: String, caption: &'static str) -> Element {
    rsx! {
        div { class: "stat-tile",
            span { class: "stat-tile__value", "{value}" }
            span { class: "stat-tile__caption muted", "{caption}" }
        }
    }
}
