use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardHeader, CardTitle};

use crate::routes::Route;

struct Pillar {
    title: &'static str,
    body: &'static str,
}

const PILLARS: &[Pillar] = &[
    Pillar {
        title: "Representation",
        body: "Elected officers sit on university committees and take student concerns to the people who can fix them.",
    },
    Pillar {
        title: "Activities",
        body: "Over sixty societies and twenty sports clubs, funded and supported by the union.",
    },
    Pillar {
        title: "Advice",
        body: "Free, confidential help with housing, money, and academic appeals.",
    },
];

#[component]
pub fn About() -> Element {
    rsx! {
        section { class: "page",
            h1 { class: "page-title", "About the union" }
            p { class: "page-lead",
                "Every student is a member. The union is led by officers you elect each spring and run day to day by student staff and volunteers."
            }
            div { class: "content-grid",
                for pillar in PILLARS {
                    Card { key: "{pillar.title}",
                        CardHeader {
                            CardTitle { "{pillar.title}" }
                        }
                        CardContent {
                            p { "{pillar.body}" }
                        }
                    }
                }
            }
            p {
                "Want to get involved? "
                Link { to: Route::Contact {}, class: "text-link", "Get in touch" }
                "."
            }
        }
    }
}
