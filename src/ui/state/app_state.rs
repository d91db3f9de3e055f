use dioxus::prelude::{use_signal, use_signal_sync, Signal, SyncSignal};

use crate::domain::entities::form::{FormMode, FormValues};
use crate::domain::entities::record::RecordId;

/// What the modal form is currently editing.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    pub mode: FormMode,
    pub id: Option<RecordId>,
}

impl EditTarget {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            id: None,
        }
    }

    pub fn edit(id: RecordId) -> Self {
        Self {
            mode: FormMode::Edit,
            id: Some(id),
        }
    }
}

/// Per-page view state. Recreated on every visit to a list page.
pub struct ListPageState<R: Send + Sync + 'static> {
    pub records: Signal<Vec<R>>,
    /// Filtered and sorted rows, written by the list filter.
    pub visible: SyncSignal<Vec<R>>,
    pub query: Signal<String>,
    pub sort_key: Signal<String>,
    pub page: Signal<usize>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub status_is_error: Signal<bool>,
}

impl<R: Send + Sync + 'static> Clone for ListPageState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Send + Sync + 'static> Copy for ListPageState<R> {}

impl<R: Send + Sync + 'static> ListPageState<R> {
    pub fn new() -> Self {
        Self {
            records: use_signal(Vec::<R>::new),
            visible: use_signal_sync(Vec::<R>::new),
            query: use_signal(String::new),
            sort_key: use_signal(String::new),
            page: use_signal(|| 1_usize),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            status_is_error: use_signal(|| false),
        }
    }
}

pub struct EditorState {
    pub target: Signal<Option<EditTarget>>,
    pub values: Signal<FormValues>,
    pub error: Signal<Option<String>>,
}

impl Clone for EditorState {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for EditorState {}

impl EditorState {
    pub fn new() -> Self {
        Self {
            target: use_signal(|| None::<EditTarget>),
            values: use_signal(FormValues::new),
            error: use_signal(|| None::<String>),
        }
    }
}
