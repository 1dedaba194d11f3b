use dioxus::prelude::*;

/// Severity of an inline alert.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Error,
}

impl AlertVariant {
    fn class(&self) -> &'static str {
        match self {
            AlertVariant::Info => "info",
            AlertVariant::Success => "success",
            AlertVariant::Error => "error",
        }
    }
}

/// Inline message box for errors and confirmations.
#[component]
pub fn Alert(#[props(default)] variant: AlertVariant, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "alert",
            "data-style": variant.class(),
            role: "alert",
            {children}
        }
    }
}
