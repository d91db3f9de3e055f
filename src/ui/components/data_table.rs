use dioxus::prelude::*;

use crate::domain::entities::record::RecordId;
use crate::ui::styles::{
    button_style, column_alignment, table_cell_style, table_container_style,
    table_header_cell_style, ButtonKind,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub id: RecordId,
    pub cells: Vec<String>,
}

#[component]
pub fn DataTable(
    headers: Vec<String>,
    rows: Vec<TableRow>,
    first_row: usize,
    editable: bool,
    busy: bool,
    on_edit: EventHandler<RecordId>,
    on_delete: EventHandler<RecordId>,
) -> Element {
    let cell_rows: Vec<Vec<String>> = rows.iter().map(|row| row.cells.clone()).collect();
    let alignments: Vec<&'static str> = (0..headers.len())
        .map(|idx| column_alignment(&cell_rows, idx))
        .collect();
    let header_style = table_header_cell_style();
    let delete_style = format!("{} margin-left: 4px;", button_style(ButtonKind::Danger));
    let column_count = headers.len() + 2;
    let numbered: Vec<(usize, TableRow)> = rows
        .iter()
        .cloned()
        .enumerate()
        .map(|(offset, row)| (first_row + offset, row))
        .collect();

    rsx! {
        div {
            style: table_container_style(),
            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        th { style: header_style, "#" }
                        for header in headers.iter() {
                            th { style: header_style, "{header}" }
                        }
                        if editable {
                            th { style: header_style, "" }
                        }
                    }
                }
                tbody {
                    if rows.is_empty() {
                        tr {
                            td {
                                colspan: "{column_count}",
                                style: "padding: 16px; text-align: center; color: #888;",
                                "No records"
                            }
                        }
                    }
                    for (number, row) in numbered.iter() {
                        tr { key: "{row.id}",
                            td { style: table_cell_style("right"), "{number}" }
                            for (idx, cell) in row.cells.iter().enumerate() {
                                td {
                                    style: table_cell_style(alignments.get(idx).copied().unwrap_or("left")),
                                    "{cell}"
                                }
                            }
                            if editable {
                                td { style: table_cell_style("right"),
                                    button {
                                        style: button_style(ButtonKind::Plain),
                                        disabled: busy,
                                        onclick: {
                                            let id = row.id.clone();
                                            move |_| on_edit.call(id.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        style: "{delete_style}",
                                        disabled: busy,
                                        onclick: {
                                            let id = row.id.clone();
                                            move |_| on_delete.call(id.clone())
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
