//! Reusable Dioxus components with co-located styles.
//!
//! Every component links its own stylesheet through `asset!`, so pages pay
//! only for what they render.

pub mod components;

pub use components::*;
