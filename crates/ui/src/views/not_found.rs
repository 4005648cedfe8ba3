use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    let path = segments.join("/");

    rsx! {
        div { class: "page not-found-page",
            div { class: "card empty-card",
                h2 { "Page not found" }
                p { class: "muted", "There is nothing at \"/{path}\"." }
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
    }
}
