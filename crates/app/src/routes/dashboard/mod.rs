mod profile_editor;

use dioxus::prelude::*;
use shared_types::{build_entries, DashboardCard, DASHBOARD_CARDS};
use shared_ui::{Badge, BadgeVariant, Button, ButtonVariant, Card, CardDescription, CardHeader, CardTitle};

use crate::routes::route_for;
use crate::session::use_session;
use profile_editor::ProfileEditDialog;

/// Signed-in landing page: role-gated cards plus the profile editor.
#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let mut editing = use_signal(|| false);

    let Some(user) = session.session() else {
        return rsx! {};
    };
    let cards = build_entries(Some(user.role), &DASHBOARD_CARDS);
    let name = user.greeting_name().to_string();
    let role_label = user.role.display_name();

    rsx! {
        section { class: "page",
            div { class: "section-heading",
                div {
                    h1 { class: "page-title", "Welcome back, {name}" }
                    p { class: "page-lead", "{user.email}" }
                }
                div { class: "dashboard-account",
                    Badge { variant: BadgeVariant::Secondary, "{role_label}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| editing.set(true),
                        "Edit profile"
                    }
                }
            }

            div { class: "content-grid dashboard-cards",
                for card in cards {
                    DashboardTile { key: "{card.entry.route}", card }
                }
            }
        }

        ProfileEditDialog { open: editing }
    }
}

#[component]
fn DashboardTile(card: DashboardCard) -> Element {
    rsx! {
        Link { to: route_for(card.entry.route), class: "dashboard-card-link",
            Card { class: "dashboard-card",
                CardHeader {
                    CardTitle { "{card.entry.label}" }
                    CardDescription { "{card.summary}" }
                }
            }
        }
    }
}
