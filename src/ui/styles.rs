pub fn root_container_style() -> &'static str {
    "font-family: 'Segoe UI', 'Noto Sans', sans-serif; height: 100vh; display: flex; flex-direction: column; overflow: hidden; background: #fff;"
}

pub fn header_style() -> &'static str {
    "display: flex; gap: 12px; align-items: center; padding: 8px 16px; border-bottom: 1px solid #ddd; background: #fafafa; position: sticky; top: 0; z-index: 900;"
}

pub fn body_style() -> &'static str {
    "display: flex; flex: 1; min-height: 0;"
}

pub fn sidebar_style() -> &'static str {
    "width: 200px; flex-shrink: 0; border-right: 1px solid #ddd; padding: 12px 8px; display: flex; flex-direction: column; gap: 4px; overflow-y: auto;"
}

pub fn page_style() -> &'static str {
    "flex: 1; min-width: 0; display: flex; flex-direction: column; padding: 12px 16px; overflow: hidden;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 8px; align-items: center; flex-wrap: wrap; margin-bottom: 12px;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 2; background: #f3f3f3; border-bottom: 1px solid #ccc; padding: 6px 8px; text-align: left; white-space: nowrap;"
}

pub fn table_cell_style(align: &str) -> String {
    format!("padding: 6px 8px; border-bottom: 1px solid #eee; text-align: {align};")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Plain,
    Primary,
    Danger,
}

pub fn button_style(kind: ButtonKind) -> &'static str {
    match kind {
        ButtonKind::Plain => {
            "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
        }
        ButtonKind::Primary => {
            "border: 1px solid #2f6fde; background: #2f6fde; color: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;"
        }
        ButtonKind::Danger => {
            "border: 1px solid #c62828; background: #fff; color: #c62828; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
        }
    }
}

pub fn input_style() -> &'static str {
    "border: 1px solid #bbb; padding: 5px 8px; border-radius: 6px; min-width: 220px;"
}

pub fn status_style(is_error: bool) -> &'static str {
    if is_error {
        "color: #c62828; margin-top: 8px; min-height: 1.2em;"
    } else {
        "color: #555; margin-top: 8px; min-height: 1.2em;"
    }
}

pub fn modal_backdrop_style() -> &'static str {
    "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1300;"
}

pub fn modal_panel_style() -> &'static str {
    "background: #fff; border-radius: 8px; padding: 16px 20px; min-width: 360px; max-height: 80vh; overflow-y: auto; box-shadow: 0 10px 24px rgba(0,0,0,0.2);"
}

pub fn auth_card_style() -> &'static str {
    "max-width: 360px; margin: 10vh auto 0; padding: 24px; border: 1px solid #ddd; border-radius: 8px; display: flex; flex-direction: column; gap: 10px;"
}

fn is_numeric_text(value: &str) -> bool {
    let cleaned = value.trim().replace(',', "");
    !cleaned.is_empty() && cleaned.parse::<f64>().is_ok()
}

/// Right-aligns a column when every non-empty cell is a number.
pub fn column_alignment(rows: &[Vec<String>], idx: usize) -> &'static str {
    let mut saw_value = false;
    for row in rows {
        let Some(cell) = row.get(idx) else {
            continue;
        };
        if cell.trim().is_empty() {
            continue;
        }
        if !is_numeric_text(cell) {
            return "left";
        }
        saw_value = true;
    }
    if saw_value {
        "right"
    } else {
        "left"
    }
}
