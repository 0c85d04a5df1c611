use dioxus::prelude::*;

use crate::routes::Route;

/// 404 Not Found page.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "page narrow not-found",
            div { class: "not-found-code", "404" }
            h1 { class: "page-title", "Page not found" }
            p {
                "Nothing lives at "
                code { "{path}" }
                "."
            }
            Link { to: Route::Home {}, class: "text-link", "Back to the home page" }
        }
    }
}
