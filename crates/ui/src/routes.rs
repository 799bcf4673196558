use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{LandingView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/quiz/:topic/:count", QuizView)] Quiz { topic: String, count: usize },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
