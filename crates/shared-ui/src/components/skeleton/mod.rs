use dioxus::prelude::*;

/// Loading placeholder with an animated pulse.
#[component]
pub fn Skeleton(#[props(default = 3)] rows: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "skeleton-group",
            for _ in 0..rows {
                div { class: "skeleton" }
            }
        }
    }
}
