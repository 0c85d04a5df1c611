use dioxus::prelude::*;
use server::api::list_sports;
use shared_types::{Collection, FetchState};

use crate::components::SportsList;

#[component]
pub fn Sports() -> Element {
    let sports = use_resource(|| async move {
        FetchState::resolve_server(Collection::Sports, list_sports().await)
    });
    let state = sports.read().clone().unwrap_or_default();

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Sports" }
            p { class: "page-lead",
                "Clubs and casual sessions open to every member. Just turn up, kit can be borrowed."
            }
            SportsList { state }
        }
    }
}
