use dioxus::prelude::*;
use server::api::list_gallery;
use shared_types::{Collection, FetchState};

use crate::components::GalleryGrid;

/// Gallery page. Fetches once on mount; the request is dropped if the page unmounts first.
#[component]
pub fn Gallery() -> Element {
    let gallery = use_resource(|| async move {
        FetchState::resolve_server(Collection::Gallery, list_gallery().await)
    });
    let state = gallery.read().clone().unwrap_or_default();

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Gallery" }
            p { class: "page-lead", "Photos from union events, newest first." }
            GalleryGrid { state }
        }
    }
}
