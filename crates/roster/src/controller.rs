use shared::domain::RecordId;

use crate::{seed::seeded_store, store::RecordStore};

/// The two UI modes: `Idle` shows the list and the add control, `Editing`
/// shows the entry form instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing,
}

/// One user intent against the list. Intents are applied synchronously and
/// to completion, in the order issued; there is no batching or reordering.
#[derive(Debug, Clone)]
pub enum Intent {
    OpenForm,
    Cancel,
    Submit { first: String, last: String },
    Update { id: RecordId, first: String, last: String },
    Remove { id: RecordId },
    RemoveAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub label: String,
    pub first: String,
    pub last: String,
}

/// Pure projection of the controller: everything the page renders is derived
/// from the store, the mode, and the last status message. Rows are never
/// mutated independently of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub rows: Vec<RowView>,
    pub form_visible: bool,
    pub add_visible: bool,
    pub delete_all_visible: bool,
    pub message: String,
}

/// Translates user intents into record-store calls and tracks the visible
/// mode and status line. One instance per page session.
#[derive(Debug, Clone)]
pub struct ListController {
    store: RecordStore,
    mode: Mode,
    message: String,
}

impl ListController {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            mode: Mode::Idle,
            message: String::new(),
        }
    }

    /// A controller over a freshly seeded store, as served on page load.
    pub fn seeded() -> Self {
        Self::new(seeded_store())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::OpenForm => {
                // message intentionally untouched
                self.mode = Mode::Editing;
            }
            Intent::Cancel => {
                self.mode = Mode::Idle;
            }
            Intent::Submit { first, last } => self.submit(&first, &last),
            Intent::Update { id, first, last } => self.update(id, &first, &last),
            Intent::Remove { id } => self.remove(id),
            Intent::RemoveAll => {
                let removed = self.store.remove_all();
                self.message = format!("removed: {removed}");
            }
        }
    }

    pub fn view(&self) -> ViewState {
        let rows = self
            .store
            .records()
            .iter()
            .map(|record| RowView {
                id: record.id,
                label: record.full_name(),
                first: record.first.clone(),
                last: record.last.clone(),
            })
            .collect();
        let form_visible = self.mode == Mode::Editing;
        ViewState {
            rows,
            form_visible,
            add_visible: !form_visible,
            delete_all_visible: !self.store.is_empty(),
            message: self.message.clone(),
        }
    }

    fn submit(&mut self, first: &str, last: &str) {
        match self.store.add(first, last) {
            Ok(_) => {
                self.message = "added".to_string();
                self.mode = Mode::Idle;
            }
            // stays in Editing so the user can correct the form
            Err(err) => self.message = err.status_message(),
        }
    }

    fn update(&mut self, id: RecordId, first: &str, last: &str) {
        match self.store.update(id, first, last) {
            Ok(record) => self.message = format!("updated: {}", record.id),
            Err(err) => self.message = err.status_message(),
        }
    }

    fn remove(&mut self, id: RecordId) {
        match self.store.remove(id) {
            Ok(record) => self.message = format!("removed: {}", record.id),
            Err(err) => self.message = err.status_message(),
        }
    }
}
