//! Synchronous driver tying the list, the form and a store together.
//!
//! The command line runs every operation to completion before the next one, so
//! it drives the controllers through a `Board`. The terminal UI drives the same
//! controllers asynchronously instead (see `tui::dispatch`).

use crate::api::TaskStore;
use crate::error::{ApiError, AppError};
use crate::fields::Field;
use crate::form::FormController;
use crate::list::ListController;
use crate::sequence::Applied;
use crate::surface::Surface;
use crate::task::{Task, TaskId};

pub struct Board<S: TaskStore> {
    store: S,
    list: ListController,
    form: FormController,
}

impl<S: TaskStore> Board<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            list: ListController::new(),
            form: FormController::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn refresh(&mut self) -> Result<Applied, ApiError> {
        self.list.refresh(&self.store)
    }

    /// Empty draft handed to the form, modal requested.
    pub fn begin_create(&mut self, surface: &mut dyn Surface) {
        self.list.begin_create(surface);
        self.load_draft();
    }

    /// Fetched record handed to the form, modal requested.
    pub fn begin_edit(&mut self, id: &TaskId, surface: &mut dyn Surface) -> Result<(), ApiError> {
        if self.list.begin_edit(&self.store, id, surface)? == Applied::Current {
            self.load_draft();
        }
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Save the form; on success the list is refreshed before the modal closes.
    pub fn save(&mut self, surface: &mut dyn Surface) -> Result<bool, AppError> {
        let list = &mut self.list;
        let store = &self.store;
        self.form.save(store, surface, || {
            let _ = list.refresh(store);
        })
    }

    pub fn delete(&mut self, id: &TaskId, surface: &mut dyn Surface) -> Result<bool, ApiError> {
        self.list.delete(&self.store, id, surface)
    }

    fn load_draft(&mut self) {
        if let Some(draft) = self.list.draft() {
            self.form.load(draft);
        }
    }
}
