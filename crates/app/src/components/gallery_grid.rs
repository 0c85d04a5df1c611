use dioxus::prelude::*;
use shared_types::{FetchState, GalleryItem};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardMedia, CardTitle, EmptyState, Skeleton};

use super::SKELETON_COUNT;

pub const GALLERY_EMPTY_MESSAGE: &str = "No gallery items yet.";

/// Gallery listing. Rows render in the order the backend returned them.
#[component]
pub fn GalleryGrid(state: FetchState<GalleryItem>) -> Element {
    match state {
        FetchState::Loading => rsx! {
            div { class: "content-grid", "aria-busy": "true",
                for i in 0..SKELETON_COUNT {
                    Skeleton { key: "{i}", class: "content-card-skeleton" }
                }
            }
        },
        FetchState::Empty => rsx! {
            EmptyState { message: GALLERY_EMPTY_MESSAGE }
        },
        FetchState::Populated(items) => rsx! {
            div { class: "content-grid",
                for item in items {
                    GalleryCard { key: "{item.id}", item: item.clone() }
                }
            }
        },
    }
}

#[component]
fn GalleryCard(item: GalleryItem) -> Element {
    let taken = item
        .created_at
        .map(|at| at.format("%-d %B %Y").to_string());

    rsx! {
        Card { class: "content-card",
            CardMedia { src: item.image_url.clone(), alt: item.title.clone() }
            CardHeader {
                CardTitle { "{item.title}" }
                if let Some(taken) = taken {
                    CardDescription { "{taken}" }
                }
            }
            if let Some(description) = item.description.clone() {
                CardContent {
                    p { "{description}" }
                }
            }
        }
    }
}
