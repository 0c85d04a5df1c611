use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::routes::Route;
use crate::session::use_session;

/// Lecturer hub. Reachable only through the lecturer guard.
#[component]
pub fn LecturerHub() -> Element {
    let session = use_session();
    let name = session
        .session()
        .map(|s| s.greeting_name().to_string())
        .unwrap_or_default();

    rsx! {
        section { class: "page",
            h1 { class: "page-title", "Lecturer Hub" }
            p { class: "page-lead", "Welcome, {name}. Resources for staff who support student activities." }
            div { class: "content-grid",
                Card {
                    CardHeader {
                        CardTitle { "Society sponsorship" }
                        CardDescription { "Act as academic sponsor for a society or sports club." }
                    }
                    CardContent {
                        Link { to: Route::Contact {}, class: "text-link", "Contact the activities team" }
                    }
                }
                Card {
                    CardHeader {
                        CardTitle { "Upcoming events" }
                        CardDescription { "See what students are running this term." }
                    }
                    CardContent {
                        Link { to: Route::Gallery {}, class: "text-link", "Browse the gallery" }
                    }
                }
                Card {
                    CardHeader {
                        CardTitle { "Sport and wellbeing" }
                        CardDescription { "Staff are welcome at most casual sessions." }
                    }
                    CardContent {
                        Link { to: Route::Sports {}, class: "text-link", "View sports" }
                    }
                }
            }
        }
    }
}
