pub mod about;
pub mod admin;
pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod gallery;
pub mod home;
pub mod lecturer;
pub mod login;
pub mod not_found;
pub mod sports;

use crate::session::use_session;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdLogIn, LdLogOut};
use dioxus_free_icons::Icon;
use shared_types::{build_entries, NavigationEntry, RoleGroup, SessionStatus, SITE_NAVIGATION};
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Skeleton};

use about::About;
use admin::AdminOverview;
use blog::Blog;
use contact::Contact;
use dashboard::Dashboard;
use gallery::Gallery;
use home::Home;
use lecturer::LecturerHub;
use login::Login;
use not_found::NotFound;
use sports::Sports;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Home {},
    #[route("/about")]
    About {},
    #[route("/blog")]
    Blog {},
    #[route("/gallery")]
    Gallery {},
    #[route("/sports")]
    Sports {},
    #[route("/contact")]
    Contact {},
    #[route("/login")]
    Login {},
    #[layout(RequireSession)]
    #[route("/dashboard")]
    Dashboard {},
    #[end_layout]
    #[layout(LecturerGate)]
    #[route("/lecturer")]
    LecturerHub {},
    #[end_layout]
    #[layout(AdminGate)]
    #[route("/admin")]
    AdminOverview {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Route for a catalog path. Catalog paths are all declared above; anything
/// else falls back to Home.
pub fn route_for(path: &str) -> Route {
    path.parse().unwrap_or(Route::Home {})
}

/// Site chrome: top navigation built from the caller's role, then the page.
///
/// Resolves the session once per page load. `use_server_future` with `?`
/// suspends during SSR until the lookup finishes, so the first render
/// already knows who is signed in.
#[component]
fn SiteLayout() -> Element {
    let mut session = use_session();
    let lookup = use_server_future(server::api::get_session)?;

    if session.is_pending() {
        if let Some(result) = lookup.read().as_ref().cloned() {
            session.resolve(result);
        }
    }

    let route: Route = use_route();
    let status = session.status.read().clone();
    let entries = build_entries(status.role(), &SITE_NAVIGATION);

    let handle_sign_out = move |_| async move {
        if let Err(e) = server::api::sign_out().await {
            tracing::warn!(error = %e, "sign-out request failed");
        }
        session.sign_out();
        navigator().push(Route::Home {});
    };

    rsx! {
        header { class: "site-header",
            Link { to: Route::Home {}, class: "site-brand", "Student Union" }
            nav { class: "site-nav", "aria-label": "Main",
                for entry in entries {
                    NavLink { entry, active: route_for(entry.route) == route }
                }
            }
            div { class: "site-account",
                match status {
                    SessionStatus::Pending => rsx! {
                        Skeleton { class: "site-account-skeleton" }
                    },
                    SessionStatus::Anonymous => rsx! {
                        Link { to: Route::Login {}, class: "site-sign-in",
                            Icon::<LdLogIn> { icon: LdLogIn, width: 16, height: 16 }
                            "Sign in"
                        }
                    },
                    SessionStatus::Authenticated(user) => {
                        let name = user.greeting_name().to_string();
                        let initials = user.initials();
                        rsx! {
                            span { class: "site-account-initials", title: "{name}", "{initials}" }
                            Button {
                                variant: ButtonVariant::Ghost,
                                onclick: handle_sign_out,
                                Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                                "Sign out"
                            }
                        }
                    }
                }
            }
        }
        main { class: "site-main",
            Outlet::<Route> {}
        }
        footer { class: "site-footer",
            p { "Run by students, for students." }
        }
    }
}

#[component]
fn NavLink(entry: NavigationEntry, active: bool) -> Element {
    rsx! {
        Link {
            to: route_for(entry.route),
            class: if active { "site-nav-link active" } else { "site-nav-link" },
            "{entry.label}"
        }
    }
}

/// Auth guard layout. Redirects anonymous visitors to /login.
#[component]
fn RequireSession() -> Element {
    let session = use_session();
    let status = session.status.read().clone();

    match status {
        SessionStatus::Pending => rsx! { GuardPlaceholder {} },
        SessionStatus::Anonymous => {
            navigator().push(Route::Login {});
            rsx! {
                div { class: "guard-loading",
                    p { "Redirecting to sign in..." }
                }
            }
        }
        SessionStatus::Authenticated(_) => rsx! { Outlet::<Route> {} },
    }
}

#[component]
fn LecturerGate() -> Element {
    rsx! { RequireRole { required: RoleGroup::Lecturer } }
}

#[component]
fn AdminGate() -> Element {
    rsx! { RequireRole { required: RoleGroup::Admin } }
}

/// Role guard. Signed-in users outside `required` see a notice instead of the page.
#[component]
fn RequireRole(required: RoleGroup) -> Element {
    let session = use_session();
    let status = session.status.read().clone();

    match status {
        SessionStatus::Pending => rsx! { GuardPlaceholder {} },
        SessionStatus::Anonymous => {
            navigator().push(Route::Login {});
            rsx! {
                div { class: "guard-loading",
                    p { "Redirecting to sign in..." }
                }
            }
        }
        SessionStatus::Authenticated(user) if user.role.can_access(required) => {
            rsx! { Outlet::<Route> {} }
        }
        SessionStatus::Authenticated(user) => rsx! {
            NotAuthorized { role_name: user.role.display_name().to_string() }
        },
    }
}

#[component]
fn GuardPlaceholder() -> Element {
    rsx! {
        div { class: "guard-loading", "aria-busy": "true",
            Skeleton { class: "guard-skeleton-title" }
            Skeleton { class: "guard-skeleton-body" }
        }
    }
}

#[component]
fn NotAuthorized(role_name: String) -> Element {
    rsx! {
        div { class: "page narrow",
            Card {
                CardHeader {
                    CardTitle { "Not authorized" }
                    CardDescription { "Your account ({role_name}) does not have access to this page." }
                }
                CardContent {
                    Link { to: Route::Dashboard {}, class: "text-link", "Back to your dashboard" }
                }
            }
        }
    }
}
