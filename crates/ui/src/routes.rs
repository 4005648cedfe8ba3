use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    HomeView, LearningPathView, LessonView, NotFoundView, PracticeView, ProfileView, QuizView,
    ResultsView, ReviewView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/practice", PracticeView)] Practice {},
        #[route("/quiz/:mode", QuizView)] Quiz { mode: String },
        #[route("/results", ResultsView)] Results {},
        #[route("/review", ReviewView)] Review {},
        #[route("/learning-path", LearningPathView)] LearningPath {},
        #[route("/lesson/:topic_id", LessonView)] Lesson { topic_id: u64 },
        #[route("/profile", ProfileView)] Profile {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopNav {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopNav() -> Element {
    rsx! {
        nav { class: "topnav",
            div { class: "topnav__brand",
                h1 { "GO53" }
                span { class: "topnav__tagline", "South African K53 Prep" }
            }
            ul { class: "topnav__links",
                li { Link { to: Route::Home {}, "Dashboard" } }
                li { Link { to: Route::Practice {}, "Practice" } }
                li { Link { to: Route::LearningPath {}, "Learning Path" } }
                li { Link { to: Route::Profile {}, "Profile" } }
            }
        }
    }
}
