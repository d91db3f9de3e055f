use dioxus::prelude::*;

use crate::ui::styles::{button_style, ButtonKind};

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn dropdown_label(options: &[DropdownOption], selected: &str, placeholder: &str) -> String {
    options
        .iter()
        .find(|opt| opt.value == selected)
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| placeholder.to_string())
}

#[component]
pub fn DropdownSelect(
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: String,
    placeholder: &'static str,
    on_select: EventHandler<String>,
) -> Element {
    let mut is_open = use_signal(|| false);
    let selected_label = dropdown_label(&options, &selected, placeholder);

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: button_style(ButtonKind::Plain),
                onclick: move |event| {
                    event.stop_propagation();
                    is_open.set(!is_open());
                },
                "{selected_label}"
            }

            if is_open() {
                div {
                    style: "position: absolute; left: 0; top: 100%; margin-top: 4px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                    onclick: move |event| event.stop_propagation(),
                    {options.iter().map(|opt| {
                        let value = opt.value.clone();
                        let label = opt.label.clone();
                        let background = if value == selected { "#eef4ff" } else { "transparent" };
                        rsx!(
                            div {
                                key: "{value}",
                                style: "padding: 8px 10px; cursor: pointer; background: {background};",
                                onclick: move |_| {
                                    on_select.call(value.clone());
                                    is_open.set(false);
                                },
                                "{label}"
                            }
                        )
                    })}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_placeholder() {
        let options = vec![
            DropdownOption::new("nameAsc", "Name (A-Z)"),
            DropdownOption::new("nameDesc", "Name (Z-A)"),
        ];
        assert_eq!(dropdown_label(&options, "nameDesc", "Default"), "Name (Z-A)");
        assert_eq!(dropdown_label(&options, "", "Default"), "Default");
    }
}
