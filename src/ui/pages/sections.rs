use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::account::{AuditLog, UserAccount};
use crate::domain::entities::billing::PricingPlan;
use crate::domain::entities::directory::{Class, School, Student, Teacher};
use crate::domain::entities::messaging::{DefaultReply, ForbiddenKeyword};
use crate::ui::pages::list_page::{editable_list_page, read_only_list_page, ListController};
use crate::usecase::services::crud_service::StudentService;
use crate::ui::styles::{button_style, ButtonKind};

#[component]
pub fn Schools() -> Element {
    editable_list_page::<School, _>(|_| rsx! {})
}

#[component]
pub fn Classes() -> Element {
    editable_list_page::<Class, _>(|_| rsx! {})
}

#[component]
pub fn Teachers() -> Element {
    editable_list_page::<Teacher, _>(|_| rsx! {})
}

fn import_roster(ctrl: &ListController<Student>) {
    let Some(path) = FileDialog::new()
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
    else {
        return;
    };

    let ctrl = ctrl.clone();
    let service: StudentService = ctrl.service.clone();
    spawn(async move {
        ctrl.set_busy(true);
        ctrl.set_status(format!("Importing {}", path.display()), false);
        match service.import_file(&path).await {
            Ok(summary) => {
                ctrl.set_status(summary.describe(), false);
                ctrl.reload();
            }
            Err(err) => ctrl.report_error("Import", err),
        }
        ctrl.set_busy(false);
    });
}

#[component]
pub fn Students() -> Element {
    editable_list_page::<Student, _>(|ctrl| {
        let busy = *ctrl.state.busy.read();
        let ctrl = ctrl.clone();
        rsx! {
            button {
                style: button_style(ButtonKind::Plain),
                disabled: busy,
                onclick: move |_| import_roster(&ctrl),
                "Import"
            }
        }
    })
}

#[component]
pub fn Replies() -> Element {
    editable_list_page::<DefaultReply, _>(|_| rsx! {})
}

#[component]
pub fn Keywords() -> Element {
    editable_list_page::<ForbiddenKeyword, _>(|_| rsx! {})
}

#[component]
pub fn Pricing() -> Element {
    editable_list_page::<PricingPlan, _>(|_| rsx! {})
}

#[component]
pub fn Users() -> Element {
    editable_list_page::<UserAccount, _>(|_| rsx! {})
}

#[component]
pub fn Logs() -> Element {
    read_only_list_page::<AuditLog>()
}
