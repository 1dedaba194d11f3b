use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        div { class: "not-found",
            h1 { "404" }
            p { "No page at \"/{path}\"." }
            Link { to: Route::PlatesDashboard {}, "Back to plates" }
        }
    }
}
