//! Enumerations for TUI state management.

/// Which screen has input focus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    /// The add/edit form is shown over the list.
    Form,
    /// Delete confirmation is shown over the list.
    Confirm,
    Help,
}
