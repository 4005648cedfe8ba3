use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::map_review_rows;

#[component]
pub fn ReviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let report = ctx.report_handoff().current();

    let Some(report) = report else {
        return rsx! {
            div { class: "page review-page",
                div { class: "card empty-card",
                    p { class: "muted", "No answers to review" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Home {});
                        },
                        "Back to Dashboard"
                    }
                }
            }
        };
    };
    let rows = map_review_rows(&report);

    rsx! {
        div { class: "page review-page",
            header { class: "view-header",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Results {});
                    },
                    "Back to Results"
                }
                h2 { class: "view-title", "Review Answers" }
            }
            p { class: "muted", "Review all questions and see the correct answers" }

            div { class: "review-list",
                for row in rows {
                    div {
                        key: "{row.number}",
                        class: if row.user_answer.is_none() {
                            "card review-card"
                        } else if row.is_correct {
                            "card review-card review-card--correct"
                        } else {
                            "card review-card review-card--incorrect"
                        },
                        div { class: "review-card__header",
                            span { class: "badge", "Q{row.number}" }
                            if row.user_answer.is_none() {
                                span { class: "muted", "Not answered" }
                            } else if row.is_correct {
                                span { class: "review-card__verdict review-card__verdict--correct", "Correct" }
                            } else {
                                span { class: "review-card__verdict review-card__verdict--incorrect", "Incorrect" }
                            }
                        }
                        h4 { class: "review-card__prompt", "{row.prompt}" }
                        ul { class: "review-card__options",
                            for (index, option) in row.options.iter().enumerate() {
                                li {
                                    key: "{index}",
                                    class: if index == row.correct_answer {
                                        "review-option review-option--correct"
                                    } else if row.user_answer == Some(index) {
                                        "review-option review-option--chosen"
                                    } else {
                                        "review-option"
                                    },
                                    "{option}"
                                }
                            }
                        }
                        p { class: "muted review-card__explanation", "{row.explanation}" }
                    }
                }
            }
        }
    }
}
