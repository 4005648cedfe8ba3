use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ReportVm, map_report};

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let report = ctx.report_handoff().current();

    let Some(report) = report else {
        // reached directly, without a finished session to show
        return rsx! {
            div { class: "page results-page",
                div { class: "card empty-card",
                    p { class: "muted", "No results yet. Finish a practice session first." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Practice {});
                        },
                        "Go to Practice"
                    }
                }
            }
        };
    };
    let vm = map_report(&report);

    rsx! {
        div { class: "page results-page",
            header { class: "view-header",
                h2 { class: "view-title", "Test Results" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Dashboard"
                }
            }

            PassBanner { vm: vm.clone() }

            div { class: "results-grid",
                div { class: "card score-card",
                    h3 { class: "muted", "Final Score" }
                    div { class: "score-card__value", "{vm.score}%" }
                    p { class: "muted", "{vm.correct} out of {vm.total} correct" }
                    div { class: "progress-track",
                        div {
                            class: if vm.passed { "progress-fill progress-fill--pass" } else { "progress-fill progress-fill--fail" },
                            style: "width: {vm.score}%",
                        }
                    }
                }
                div { class: "results-side",
                    div { class: "card stat-row",
                        span { class: "stat-row__value", "{vm.correct} / {vm.total}" }
                        span { class: "muted", "Correct answers" }
                    }
                    div { class: "card stat-row",
                        span { class: "stat-row__value", "{vm.unanswered}" }
                        span { class: "muted", "Unanswered" }
                    }
                    div { class: "card stat-row",
                        span { class: "stat-row__value", "{vm.completed_at_str}" }
                        span { class: "muted", "Completed" }
                    }
                }
            }

            if !vm.badges.is_empty() {
                div { class: "card badges-card",
                    h3 { "New Achievements Unlocked!" }
                    div { class: "badges-row",
                        for badge in vm.badges.iter() {
                            span { class: "badge", "🏆 {badge}" }
                        }
                    }
                }
            }

            div { class: "results-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Review {});
                    },
                    "Review Answers"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Practice {});
                    },
                    "Try Again"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::LearningPath {});
                    },
                    "Continue Learning"
                }
            }
        }
    }
}

#[component]
fn PassBanner(vm: ReportVm) -> Element {
    rsx! {
        div {
            class: if vm.passed { "card pass-banner pass-banner--pass" } else { "card pass-banner pass-banner--fail" },
            h2 { "{vm.title}" }
            if vm.passed {
                p { class: "muted", "You passed with a score of {vm.score}%" }
            } else {
                p { class: "muted",
                    "You need {vm.needed_more} more correct answers to pass (pass mark: {vm.pass_mark})"
                }
            }
            if vm.time_expired {
                p { class: "pass-banner__expired", "Time expired before you finished." }
            }
            div { class: "xp-pill", "+{vm.xp_earned} XP" }
        }
    }
}
