use dioxus::prelude::*;
use shared_types::{FetchState, SportItem};
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardMedia, CardTitle, EmptyState, Skeleton};

use super::SKELETON_COUNT;

pub const SPORTS_EMPTY_MESSAGE: &str = "No sports activities scheduled yet.";

#[component]
pub fn SportsList(state: FetchState<SportItem>) -> Element {
    match state {
        FetchState::Loading => rsx! {
            div { class: "content-list", "aria-busy": "true",
                for i in 0..SKELETON_COUNT {
                    Skeleton { key: "{i}", class: "content-row-skeleton" }
                }
            }
        },
        FetchState::Empty => rsx! {
            EmptyState { message: SPORTS_EMPTY_MESSAGE }
        },
        FetchState::Populated(items) => rsx! {
            div { class: "content-list",
                for item in items {
                    SportCard { key: "{item.id}", item: item.clone() }
                }
            }
        },
    }
}

#[component]
fn SportCard(item: SportItem) -> Element {
    rsx! {
        Card { class: "content-card sport-card",
            CardMedia { src: item.image_url.clone(), alt: item.name.clone() }
            CardHeader {
                CardTitle { "{item.name}" }
                if let Some(schedule) = item.schedule.clone() {
                    CardDescription { "{schedule}" }
                }
            }
            CardContent {
                if let Some(location) = item.location.clone() {
                    Badge { variant: BadgeVariant::Outline, "{location}" }
                }
                if let Some(description) = item.description.clone() {
                    p { "{description}" }
                }
            }
        }
    }
}
