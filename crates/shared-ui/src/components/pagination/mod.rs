use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Page-based pagination controls with Previous/Next buttons.
#[component]
pub fn Pagination(
    current_page: usize,
    total_pages: usize,
    total_items: usize,
    #[props(default)] on_prev: EventHandler<()>,
    #[props(default)] on_next: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current_page <= 1,
                onclick: move |_| on_prev.call(()),
                "Previous"
            }
            span { class: "pagination-info",
                "Page {current_page} of {total_pages} ({total_items} total)"
            }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current_page >= total_pages,
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}
