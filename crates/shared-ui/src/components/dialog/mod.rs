use dioxus::prelude::*;

/// A modal dialog over a dimmed overlay. Clicking the overlay (but not the
/// dialog itself) closes it.
#[component]
pub fn Dialog(
    open: bool,
    on_close: EventHandler<()>,
    #[props(default)] title: String,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        if open {
            div {
                class: "dialog-overlay",
                onclick: move |_| on_close.call(()),
                div {
                    class: "dialog",
                    role: "dialog",
                    onclick: move |evt| evt.stop_propagation(),
                    if !title.is_empty() {
                        h3 { class: "dialog-title", "{title}" }
                    }
                    {children}
                }
            }
        }
    }
}

/// Action row pinned to the bottom of a dialog.
#[component]
pub fn DialogActions(children: Element) -> Element {
    rsx! {
        div { class: "dialog-actions", {children} }
    }
}
