use dioxus::prelude::*;
use server::api::list_gallery;
use shared_types::{Collection, FetchState};
use shared_ui::{Button, ButtonVariant};

use crate::components::GalleryGrid;
use crate::routes::Route;

/// Gallery items shown in the home page teaser.
const TEASER_COUNT: usize = 3;

#[component]
pub fn Home() -> Element {
    let gallery = use_resource(|| async move {
        FetchState::resolve_server(Collection::Gallery, list_gallery().await)
    });

    let teaser = match gallery.read().clone().unwrap_or_default() {
        FetchState::Populated(rows) => {
            FetchState::Populated(rows.into_iter().take(TEASER_COUNT).collect())
        }
        other => other,
    };

    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Your union, your campus" }
            p { class: "hero-lead",
                "Societies, sport, events and support, all run by students. Find out what's on this week."
            }
            div { class: "hero-actions",
                Link { to: Route::Gallery {},
                    Button { variant: ButtonVariant::Primary, "See what's on" }
                }
                Link { to: Route::About {},
                    Button { variant: ButtonVariant::Outline, "About the union" }
                }
            }
        }

        section { class: "page",
            div { class: "section-heading",
                h2 { "Latest from the gallery" }
                Link { to: Route::Gallery {}, class: "text-link", "View all" }
            }
            GalleryGrid { state: teaser }
        }
    }
}
