//! The list page every section shares: fetch on mount, search, sort,
//! paging, CSV export and, for editable records, the modal form.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::app::Route;
use crate::config::AppConfig;
use crate::domain::debounce::Debouncer;
use crate::domain::entities::form::{empty_form, visible_fields, Editable, FormMode, FormValues};
use crate::domain::entities::record::{remove_record, upsert_record, Record, RecordId};
use crate::domain::list_filter::ListFilter;
use crate::domain::pagination::Pagination;
use crate::infra::export::csv::{default_export_file_name, export_records_to_csv};
use crate::infra::http::client::{ApiClient, ApiError};
use crate::ui::components::data_table::{DataTable, TableRow};
use crate::ui::components::dropdown::{DropdownOption, DropdownSelect};
use crate::ui::components::modal_form::ModalForm;
use crate::ui::components::pagination_bar::PaginationBar;
use crate::ui::components::search_bar::SearchBar;
use crate::ui::state::app_state::{EditTarget, EditorState, ListPageState};
use crate::ui::styles::{button_style, page_style, status_style, toolbar_style, ButtonKind};
use crate::usecase::services::crud_service::CrudService;
use crate::usecase::services::session_service::SessionContext;

pub struct PageView<R> {
    pub rows: Vec<R>,
    pub page: usize,
    pub total_pages: usize,
    pub first_row: usize,
    pub total: usize,
}

pub fn count_label(total: usize, first_row: usize, shown: usize) -> String {
    match total {
        0 => "No records".to_string(),
        1 => "1 record".to_string(),
        _ if shown == total => format!("{total} records"),
        _ => format!(
            "Showing {first_row}-{} of {total}",
            first_row + shown.saturating_sub(1)
        ),
    }
}

pub struct ListController<R: Record> {
    pub state: ListPageState<R>,
    pub filter: ListFilter<R>,
    pub service: CrudService<R>,
    pub pagination: Pagination,
    session: SessionContext,
    nav: Navigator,
}

impl<R: Record> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            filter: self.filter.clone(),
            service: self.service.clone(),
            pagination: self.pagination,
            session: self.session.clone(),
            nav: self.nav,
        }
    }
}

pub fn use_list_controller<R: Record>() -> ListController<R> {
    let config = use_context::<AppConfig>();
    let api = use_context::<ApiClient>();
    let session = use_context::<SessionContext>();
    let nav = navigator();
    let state = ListPageState::<R>::new();

    let visible = state.visible;
    let filter = use_hook(|| {
        ListFilter::new(
            R::sort_options(),
            R::search_field,
            Debouncer::new(config.search_debounce()),
            move |rows: Vec<R>| {
                let mut visible = visible;
                visible.set(rows);
            },
        )
    });

    let controller = ListController {
        state,
        filter,
        service: CrudService::new(api),
        pagination: Pagination::new(config.page_size),
        session,
        nav,
    };
    let loader = controller.clone();
    use_hook(move || loader.reload());
    controller
}

impl<R: Record> ListController<R> {
    pub fn set_status(&self, message: impl Into<String>, is_error: bool) {
        let mut status = self.state.status;
        let mut status_is_error = self.state.status_is_error;
        status.set(message.into());
        status_is_error.set(is_error);
    }

    pub fn set_busy(&self, value: bool) {
        let mut busy = self.state.busy;
        busy.set(value);
    }

    /// A 401 ends the session; anything else lands on the status line.
    pub fn report_error(&self, action: &str, err: ApiError) {
        if err.is_unauthorized() {
            log::info!("server rejected the session, signing out");
            self.session.clear_token();
            self.nav.replace(Route::SignIn {});
            return;
        }
        log::warn!("{action} {} failed: {err}", R::COLLECTION);
        self.set_status(format!("{action} failed: {err}"), true);
    }

    pub fn reload(&self) {
        let this = self.clone();
        spawn(async move {
            this.set_busy(true);
            this.set_status("Loading...", false);
            match this.service.list().await {
                Ok(records) => {
                    let count = records.len();
                    this.replace_records(records);
                    this.set_status(
                        format!("Loaded {count} {}", R::TITLE.to_lowercase()),
                        false,
                    );
                }
                Err(err) => this.report_error("Loading", err),
            }
            this.set_busy(false);
        });
    }

    pub fn replace_records(&self, records: Vec<R>) {
        let mut stored = self.state.records;
        stored.set(records.clone());
        self.filter.set_records(records);
    }

    /// Edits the local record set in place and re-runs the filter.
    pub fn apply_change(&self, change: impl FnOnce(&mut Vec<R>)) {
        let mut stored = self.state.records;
        change(&mut *stored.write());
        let snapshot = stored.read().clone();
        self.filter.set_records(snapshot);
    }

    pub fn on_query(&self, value: String) {
        let mut query = self.state.query;
        query.set(value.clone());
        let pending = self.filter.set_query(&value);
        let mut page = self.state.page;
        spawn(async move {
            if pending.await {
                page.set(1);
            }
        });
    }

    pub fn on_sort(&self, key: String) {
        let mut sort_key = self.state.sort_key;
        let mut page = self.state.page;
        self.filter.set_sort_key(&key);
        sort_key.set(key);
        page.set(1);
    }

    pub fn on_page(&self, number: usize) {
        let mut page = self.state.page;
        page.set(number);
    }

    pub fn page_view(&self) -> PageView<R> {
        let visible = self.state.visible.read();
        let total = visible.len();
        let page = self.pagination.clamp_page(*self.state.page.read(), total);
        PageView {
            rows: self.pagination.page_slice(visible.as_slice(), page).to_vec(),
            page,
            total_pages: self.pagination.total_pages(total),
            first_row: self.pagination.first_row(page, total),
            total,
        }
    }

    pub fn export_csv(&self) {
        let rows = self.state.visible.read().clone();
        let file_name =
            default_export_file_name(R::COLLECTION, chrono::Local::now().date_naive());
        let Some(path) = FileDialog::new()
            .set_file_name(file_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match export_records_to_csv(&path, &R::columns(), &rows) {
            Ok(written) => {
                self.set_status(format!("Exported {written} rows to {}", path.display()), false)
            }
            Err(err) => self.set_status(format!("Export failed: {err:#}"), true),
        }
    }
}

pub struct ListExtras {
    pub toolbar: Element,
    pub modal: Element,
    pub on_edit: Option<EventHandler<RecordId>>,
    pub on_delete: Option<EventHandler<RecordId>>,
}

impl ListExtras {
    pub fn none() -> Self {
        Self {
            toolbar: rsx! {},
            modal: rsx! {},
            on_edit: None,
            on_delete: None,
        }
    }
}

fn sort_dropdown_options<R: Record>() -> Vec<DropdownOption> {
    std::iter::once(DropdownOption::new("", "Default order"))
        .chain(
            R::sort_options()
                .iter()
                .map(|option| DropdownOption::new(option.key, option.label)),
        )
        .collect()
}

fn table_rows<R: Record>(records: &[R]) -> Vec<TableRow> {
    let columns = R::columns();
    records
        .iter()
        .map(|record| TableRow {
            id: record.id().clone(),
            cells: columns.iter().map(|column| (column.cell)(record)).collect(),
        })
        .collect()
}

pub fn render_list<R: Record>(ctrl: &ListController<R>, extras: ListExtras) -> Element {
    let state = ctrl.state;
    let view = ctrl.page_view();
    let title = R::TITLE;
    let placeholder = format!("Search {}", title.to_lowercase());
    let headers: Vec<String> = R::columns()
        .iter()
        .map(|column| column.header.to_string())
        .collect();
    let rows = table_rows(&view.rows);
    let searching = *state.query.read() != ctrl.filter.applied_query();
    let counts = if searching {
        "Searching...".to_string()
    } else {
        count_label(view.total, view.first_row, view.rows.len())
    };
    let busy = *state.busy.read();
    let status = state.status.read().clone();
    let is_error = *state.status_is_error.read();
    let editable = extras.on_edit.is_some() && extras.on_delete.is_some();
    let on_edit = extras
        .on_edit
        .unwrap_or_else(|| EventHandler::new(|_: RecordId| {}));
    let on_delete = extras
        .on_delete
        .unwrap_or_else(|| EventHandler::new(|_: RecordId| {}));

    let query_ctrl = ctrl.clone();
    let sort_ctrl = ctrl.clone();
    let reload_ctrl = ctrl.clone();
    let export_ctrl = ctrl.clone();
    let page_ctrl = ctrl.clone();

    rsx! {
        div {
            style: page_style(),
            h2 { style: "margin: 0 0 12px;", "{title}" }
            div {
                style: toolbar_style(),
                SearchBar {
                    value: state.query.read().clone(),
                    placeholder,
                    on_input: move |value| query_ctrl.on_query(value),
                }
                DropdownSelect {
                    label: "Sort",
                    options: sort_dropdown_options::<R>(),
                    selected: state.sort_key.read().clone(),
                    placeholder: "Default order",
                    on_select: move |key| sort_ctrl.on_sort(key),
                }
                button {
                    style: button_style(ButtonKind::Plain),
                    disabled: busy,
                    onclick: move |_| reload_ctrl.reload(),
                    "Refresh"
                }
                button {
                    style: button_style(ButtonKind::Plain),
                    onclick: move |_| export_ctrl.export_csv(),
                    "Export CSV"
                }
                {extras.toolbar}
                span { style: "margin-left: auto; color: #555;", "{counts}" }
            }
            DataTable {
                headers,
                rows,
                first_row: view.first_row,
                editable,
                busy,
                on_edit,
                on_delete,
            }
            PaginationBar {
                page: view.page,
                total_pages: view.total_pages,
                on_page: move |number| page_ctrl.on_page(number),
            }
            p { style: status_style(is_error), "{status}" }
            {extras.modal}
        }
    }
}

/// List page without create, edit or delete.
pub fn read_only_list_page<R: Record>() -> Element {
    let ctrl = use_list_controller::<R>();
    render_list(&ctrl, ListExtras::none())
}

struct Editor<R: Editable> {
    ctrl: ListController<R>,
    form: EditorState,
}

impl<R: Editable> Clone for Editor<R> {
    fn clone(&self) -> Self {
        Self {
            ctrl: self.ctrl.clone(),
            form: self.form,
        }
    }
}

impl<R: Editable> Editor<R> {
    fn open(&self, target: EditTarget, values: FormValues) {
        let mut form_target = self.form.target;
        let mut form_values = self.form.values;
        let mut form_error = self.form.error;
        form_values.set(values);
        form_error.set(None);
        form_target.set(Some(target));
    }

    fn open_create(&self) {
        self.open(EditTarget::create(), empty_form(&R::form_fields()));
    }

    fn open_edit(&self, id: RecordId) {
        let existing = self
            .ctrl
            .state
            .records
            .read()
            .iter()
            .find(|record| record.id() == &id)
            .map(|record| record.to_form());
        match existing {
            Some(values) => self.open(EditTarget::edit(id), values),
            None => self
                .ctrl
                .set_status(format!("Record {id} is no longer loaded"), true),
        }
    }

    fn close(&self) {
        let mut form_target = self.form.target;
        form_target.set(None);
    }

    fn set_value(&self, key: String, value: String) {
        let mut form_values = self.form.values;
        form_values.write().insert(key, value);
    }

    fn submit(&self) {
        let Some(target) = self.form.target.read().clone() else {
            return;
        };
        let draft = R::draft_from_form(&self.form.values.read(), target.mode);
        let draft = match draft {
            Ok(draft) => draft,
            Err(err) => {
                let mut form_error = self.form.error;
                form_error.set(Some(err.to_string()));
                return;
            }
        };

        let this = self.clone();
        spawn(async move {
            this.ctrl.set_busy(true);
            let result = match &target.id {
                Some(id) => this.ctrl.service.update(id, &draft).await,
                None => this.ctrl.service.create(&draft).await,
            };
            match result {
                Ok(saved) => {
                    this.ctrl.apply_change(|records| upsert_record(records, saved));
                    this.close();
                    this.ctrl.set_status("Saved", false);
                }
                Err(ApiError::Decode(reason)) => {
                    log::debug!("save reply not a record ({reason}), reloading");
                    this.close();
                    this.ctrl.reload();
                }
                Err(err) if err.is_unauthorized() => this.ctrl.report_error("Saving", err),
                Err(err) => {
                    let mut form_error = this.form.error;
                    form_error.set(Some(err.to_string()));
                }
            }
            this.ctrl.set_busy(false);
        });
    }

    fn delete(&self, id: RecordId) {
        let confirm = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Delete record")
            .set_description("Delete this record? This cannot be undone.")
            .set_buttons(MessageButtons::YesNo)
            .show();
        if confirm != MessageDialogResult::Yes {
            return;
        }

        let this = self.clone();
        spawn(async move {
            this.ctrl.set_busy(true);
            match this.ctrl.service.delete(&id).await {
                Ok(()) => {
                    this.ctrl.apply_change(|records| {
                        remove_record(records, &id);
                    });
                    this.ctrl.set_status("Deleted", false);
                }
                Err(err) => this.ctrl.report_error("Deleting", err),
            }
            this.ctrl.set_busy(false);
        });
    }
}

fn form_title(mode: FormMode, title: &str) -> String {
    match mode {
        FormMode::Create => format!("New in {title}"),
        FormMode::Edit => format!("Edit in {title}"),
    }
}

/// List page with New, Edit and Delete. `extra_toolbar` renders further
/// buttons next to New.
pub fn editable_list_page<R, F>(extra_toolbar: F) -> Element
where
    R: Editable,
    F: FnOnce(&ListController<R>) -> Element,
{
    let ctrl = use_list_controller::<R>();
    let editor = Editor {
        ctrl: ctrl.clone(),
        form: EditorState::new(),
    };

    let busy = *ctrl.state.busy.read();
    let new_editor = editor.clone();
    let extra = extra_toolbar(&ctrl);
    let toolbar = rsx! {
        button {
            style: button_style(ButtonKind::Primary),
            disabled: busy,
            onclick: move |_| new_editor.open_create(),
            "New"
        }
        {extra}
    };

    let modal = match editor.form.target.read().clone() {
        Some(target) => {
            let change_editor = editor.clone();
            let submit_editor = editor.clone();
            let cancel_editor = editor.clone();
            rsx! {
                ModalForm {
                    title: form_title(target.mode, R::TITLE),
                    fields: visible_fields(&R::form_fields(), target.mode),
                    values: editor.form.values.read().clone(),
                    error: editor.form.error.read().clone(),
                    busy,
                    on_change: move |(key, value)| change_editor.set_value(key, value),
                    on_submit: move |_| submit_editor.submit(),
                    on_cancel: move |_| cancel_editor.close(),
                }
            }
        }
        None => rsx! {},
    };

    let edit_editor = editor.clone();
    let delete_editor = editor.clone();
    let extras = ListExtras {
        toolbar,
        modal,
        on_edit: Some(EventHandler::new(move |id: RecordId| edit_editor.open_edit(id))),
        on_delete: Some(EventHandler::new(move |id: RecordId| delete_editor.delete(id))),
    };
    render_list(&ctrl, extras)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_describes_the_visible_window() {
        assert_eq!(count_label(0, 0, 0), "No records");
        assert_eq!(count_label(1, 1, 1), "1 record");
        assert_eq!(count_label(7, 1, 7), "7 records");
        assert_eq!(count_label(23, 21, 3), "Showing 21-23 of 23");
    }

    #[test]
    fn form_title_follows_mode() {
        assert_eq!(form_title(FormMode::Create, "Schools"), "New in Schools");
        assert_eq!(form_title(FormMode::Edit, "Users"), "Edit in Users");
    }
}
