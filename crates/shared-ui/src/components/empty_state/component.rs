use dioxus::prelude::*;

/// Centered notice shown when a listing resolved with nothing to render.
#[component]
pub fn EmptyState(
    message: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    #[props(default)] children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "ui-empty-state", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            role: "status",
            ..merged,
            p { class: "ui-empty-state-message", "{message}" }
            {children}
        }
    }
}
