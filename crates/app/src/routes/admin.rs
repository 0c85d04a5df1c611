use dioxus::prelude::*;
use server::api::{list_gallery, list_sports};
use shared_types::{Collection, FetchState};
use shared_ui::{Badge, BadgeVariant};

use crate::components::{GalleryGrid, SportsList};
use crate::session::use_session;

/// Admin overview: the most recent gallery and sports rows side by side.
#[component]
pub fn AdminOverview() -> Element {
    let session = use_session();
    let role = session.session().map(|s| s.role.display_name()).unwrap_or_default();

    let gallery = use_resource(|| async move {
        FetchState::resolve_server(Collection::Gallery, list_gallery().await)
    });
    let sports = use_resource(|| async move {
        FetchState::resolve_server(Collection::Sports, list_sports().await)
    });
    let gallery_state = gallery.read().clone().unwrap_or_default();
    let sports_state = sports.read().clone().unwrap_or_default();

    rsx! {
        section { class: "page",
            div { class: "section-heading",
                h1 { class: "page-title", "Admin Overview" }
                Badge { variant: BadgeVariant::Primary, "{role}" }
            }
            div { class: "admin-columns",
                div {
                    h2 { "Recent gallery items" }
                    GalleryGrid { state: gallery_state }
                }
                div {
                    h2 { "Recent sports activities" }
                    SportsList { state: sports_state }
                }
            }
        }
    }
}
