use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClock, LdMail};
use dioxus_free_icons::Icon;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

const UNION_EMAIL: &str = "hello@studentunion.example";

#[component]
pub fn Contact() -> Element {
    rsx! {
        section { class: "page narrow",
            h1 { class: "page-title", "Contact" }
            Card {
                CardHeader {
                    CardTitle { "Union office" }
                    CardDescription { "Ground floor, Student Centre" }
                }
                CardContent {
                    p { class: "contact-line",
                        Icon::<LdMail> { icon: LdMail, width: 16, height: 16 }
                        a { class: "text-link", href: "mailto:{UNION_EMAIL}", "{UNION_EMAIL}" }
                    }
                    p { class: "contact-line",
                        Icon::<LdClock> { icon: LdClock, width: 16, height: 16 }
                        "Open Monday to Friday, 10:00 to 16:00 during term."
                    }
                }
            }
        }
    }
}
