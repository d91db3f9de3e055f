use dioxus::prelude::*;

use crate::app::sections;
use crate::ui::styles::page_style;
use crate::usecase::services::session_service::SessionContext;

pub fn greeting(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) if !id.trim().is_empty() => format!("Welcome back, {}", id.trim()),
        _ => "Welcome back".to_string(),
    }
}

#[component]
pub fn Home() -> Element {
    let session = use_context::<SessionContext>();
    let heading = greeting(session.user_id().as_deref());

    rsx! {
        div {
            style: page_style(),
            h2 { style: "margin: 0 0 4px;", "{heading}" }
            p { style: "color: #555; margin: 0 0 16px;", "Choose a section to manage." }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px;",
                for section in sections() {
                    Link {
                        key: "{section.label}",
                        to: section.route.clone(),
                        div {
                            style: "border: 1px solid #ddd; border-radius: 8px; padding: 14px; color: #222;",
                            strong { "{section.label}" }
                            p { style: "margin: 6px 0 0; color: #666; font-size: 0.9em;", "{section.blurb}" }
                        }
                    }
                }
            }
        }
    }
}
