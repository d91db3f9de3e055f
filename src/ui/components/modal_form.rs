use dioxus::prelude::*;

use crate::domain::entities::form::{FormField, FormValues};
use crate::ui::styles::{
    button_style, input_style, modal_backdrop_style, modal_panel_style, status_style, ButtonKind,
};

fn input_type(field: &FormField) -> &'static str {
    if field.secret {
        "password"
    } else {
        "text"
    }
}

#[component]
pub fn ModalForm(
    title: String,
    fields: Vec<FormField>,
    values: FormValues,
    error: Option<String>,
    busy: bool,
    on_change: EventHandler<(String, String)>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: modal_backdrop_style(),
            onclick: move |_| on_cancel.call(()),
            div {
                style: modal_panel_style(),
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin-top: 0;", "{title}" }
                for field in fields.iter().copied() {
                    label {
                        key: "{field.key}",
                        style: "display: flex; flex-direction: column; gap: 4px; margin-bottom: 10px;",
                        span {
                            "{field.label}"
                            if field.required {
                                span { style: "color: #c62828;", " *" }
                            }
                        }
                        input {
                            r#type: input_type(&field),
                            style: input_style(),
                            value: values.get(field.key).cloned().unwrap_or_default(),
                            oninput: move |event| on_change.call((field.key.to_string(), event.value())),
                        }
                    }
                }
                if let Some(message) = error.as_ref() {
                    p { style: status_style(true), "{message}" }
                }
                div {
                    style: "display: flex; gap: 8px; justify-content: flex-end; margin-top: 12px;",
                    button {
                        style: button_style(ButtonKind::Plain),
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        style: button_style(ButtonKind::Primary),
                        disabled: busy,
                        onclick: move |_| on_submit.call(()),
                        "Save"
                    }
                }
            }
        }
    }
}
