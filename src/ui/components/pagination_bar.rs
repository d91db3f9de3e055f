use dioxus::prelude::*;

use crate::ui::styles::{button_style, ButtonKind};

/// Page buttons shown around the current page; the first and last page are
/// always present.
pub fn visible_page_buttons(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total_pages);
    let mut pages = Vec::new();
    if start > 1 {
        pages.push(1);
    }
    pages.extend(start..=end);
    if end < total_pages {
        pages.push(total_pages);
    }
    pages
}

fn page_button_style(active: bool) -> &'static str {
    if active {
        button_style(ButtonKind::Primary)
    } else {
        button_style(ButtonKind::Plain)
    }
}

#[component]
pub fn PaginationBar(page: usize, total_pages: usize, on_page: EventHandler<usize>) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }
    let buttons = visible_page_buttons(page, total_pages);

    rsx! {
        div {
            style: "display: flex; gap: 4px; align-items: center; margin-top: 8px;",
            button {
                style: button_style(ButtonKind::Plain),
                disabled: page <= 1,
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "Prev"
            }
            for number in buttons {
                button {
                    key: "{number}",
                    style: page_button_style(number == page),
                    onclick: move |_| on_page.call(number),
                    "{number}"
                }
            }
            button {
                style: button_style(ButtonKind::Plain),
                disabled: page >= total_pages,
                onclick: move |_| on_page.call((page + 1).min(total_pages)),
                "Next"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_window_around_current_page() {
        assert_eq!(visible_page_buttons(1, 3), vec![1, 2, 3]);
        assert_eq!(visible_page_buttons(6, 12), vec![1, 4, 5, 6, 7, 8, 12]);
        assert_eq!(visible_page_buttons(12, 12), vec![1, 10, 11, 12]);
        assert!(visible_page_buttons(1, 0).is_empty());
    }
}
