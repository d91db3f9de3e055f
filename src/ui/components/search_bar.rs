use dioxus::prelude::*;

use crate::ui::styles::input_style;

#[component]
pub fn SearchBar(value: String, placeholder: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            r#type: "search",
            style: input_style(),
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |event| on_input.call(event.value()),
        }
    }
}
