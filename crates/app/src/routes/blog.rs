use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlogPost {
    pub title: &'static str,
    pub published: &'static str,
    pub tag: &'static str,
    pub summary: &'static str,
}

/// Newest first.
pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        title: "Elections open for spring officer roles",
        published: "2026-10-12",
        tag: "Democracy",
        summary: "Nominations are open for president and five vice-president posts. Any member can stand; voting runs for a week online.",
    },
    BlogPost {
        title: "Late-night study space extended",
        published: "2026-10-02",
        tag: "Campaigns",
        summary: "After last term's petition the library will stay open until 2am through exam season.",
    },
    BlogPost {
        title: "Welcome, freshers",
        published: "2026-09-18",
        tag: "News",
        summary: "Everything you need for your first fortnight: the fair, the clubs, and where to find help.",
    },
];

#[component]
pub fn Blog() -> Element {
    rsx! {
        section { class: "page narrow",
            h1 { class: "page-title", "Blog" }
            for post in BLOG_POSTS {
                PostCard { key: "{post.title}", post: *post }
            }
        }
    }
}

#[component]
fn PostCard(post: BlogPost) -> Element {
    rsx! {
        Card { class: "blog-post",
            CardHeader {
                CardTitle { "{post.title}" }
                CardDescription {
                    time { datetime: "{post.published}", "{post.published}" }
                }
            }
            CardContent {
                Badge { variant: BadgeVariant::Secondary, "{post.tag}" }
                p { "{post.summary}" }
            }
        }
    }
}
