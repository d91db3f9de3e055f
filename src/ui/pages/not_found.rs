use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::styles::auth_card_style;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    log::debug!("no route for {path}");

    rsx! {
        div {
            style: auth_card_style(),
            h2 { style: "margin: 0;", "Page not found" }
            p { "Nothing lives at {path}." }
            Link { to: Route::Home {}, "Back to the dashboard" }
        }
    }
}
