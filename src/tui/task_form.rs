//! Task form view state for the terminal user interface.
//!
//! The form controller owns the working copy; this view only tracks focus,
//! cursors and selector positions. Every edit reports the changed field so
//! the caller can push it into the controller.

use crate::{
    fields::{Field, Finish, Priority},
    task::TaskFields,
    tui::input::InputField,
};

/// Focus order of the form fields.
pub const TITLE_ORDER: usize = 0;
pub const DUE_DAY_ORDER: usize = 1;
pub const DETAIL_ORDER: usize = 2;
pub const FINISH_ORDER: usize = 3;
pub const PRIORITY_ORDER: usize = 4;
pub const CATEGORY_ORDER: usize = 5;

const FIELD_COUNT: usize = 6;

/// One field change produced by a key press.
pub type Change = (Field, String);

pub struct TaskFormView {
    pub title: InputField,
    pub due_day: InputField,
    pub detail: InputField,
    pub category: InputField,
    pub finish: usize,
    pub priority: usize,
    pub current_field: usize,
}

impl TaskFormView {
    /// Build the view from the controller's working copy, focus on Title.
    pub fn from_fields(fields: &TaskFields) -> Self {
        Self {
            title: InputField::with_value(&fields.title),
            due_day: InputField::with_value(&fields.due_day),
            detail: InputField::with_value(&fields.detail),
            category: InputField::with_value(&fields.category),
            finish: Finish::from_wire(&fields.finish)
                .and_then(|f| Finish::ALL.iter().position(|&x| x == f))
                .unwrap_or(0),
            priority: Priority::from_wire(&fields.priority)
                .and_then(|p| Priority::ALL.iter().position(|&x| x == p))
                .unwrap_or(0),
            current_field: TITLE_ORDER,
        }
    }

    /// The field that has focus.
    pub fn current(&self) -> Field {
        match self.current_field {
            TITLE_ORDER => Field::Title,
            DUE_DAY_ORDER => Field::DueDay,
            DETAIL_ORDER => Field::Detail,
            FINISH_ORDER => Field::Finish,
            PRIORITY_ORDER => Field::Priority,
            CATEGORY_ORDER => Field::Category,
            _ => Field::Title,
        }
    }

    /// Text input backing `field`, if it is a text field.
    pub fn input(&self, field: Field) -> Option<&InputField> {
        match field {
            Field::Title => Some(&self.title),
            Field::DueDay => Some(&self.due_day),
            Field::Detail => Some(&self.detail),
            Field::Category => Some(&self.category),
            Field::Finish | Field::Priority => None,
        }
    }

    fn input_mut(&mut self, field: Field) -> Option<&mut InputField> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::DueDay => Some(&mut self.due_day),
            Field::Detail => Some(&mut self.detail),
            Field::Category => Some(&mut self.category),
            Field::Finish | Field::Priority => None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    fn text_change(&self, field: Field) -> Option<Change> {
        self.input(field).map(|input| (field, input.value.clone()))
    }

    /// Type a character into the focused text field.
    pub fn handle_char(&mut self, c: char) -> Option<Change> {
        let field = self.current();
        self.input_mut(field)?.handle_char(c);
        self.text_change(field)
    }

    pub fn handle_backspace(&mut self) -> Option<Change> {
        let field = self.current();
        if self.input_mut(field)?.handle_backspace() {
            self.text_change(field)
        } else {
            None
        }
    }

    pub fn handle_delete(&mut self) -> Option<Change> {
        let field = self.current();
        if self.input_mut(field)?.handle_delete() {
            self.text_change(field)
        } else {
            None
        }
    }

    /// Move the cursor in a text field, or cycle a selector.
    pub fn handle_left_right(&mut self, right: bool) -> Option<Change> {
        match self.current() {
            Field::Finish => {
                self.finish = cycle(self.finish, Finish::ALL.len(), right);
                Some((Field::Finish, Finish::ALL[self.finish].as_str().to_string()))
            }
            Field::Priority => {
                self.priority = cycle(self.priority, Priority::ALL.len(), right);
                Some((Field::Priority, Priority::ALL[self.priority].as_str().to_string()))
            }
            field => {
                let input = self.input_mut(field)?;
                if right {
                    input.move_cursor_right();
                } else {
                    input.move_cursor_left();
                }
                None
            }
        }
    }

    pub fn handle_home_end(&mut self, end: bool) {
        if let Some(input) = self.input_mut(self.current()) {
            if end {
                input.move_end();
            } else {
                input.move_home();
            }
        }
    }
}

fn cycle(idx: usize, len: usize, forward: bool) -> usize {
    if forward {
        (idx + 1) % len
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_start_at_stored_values() {
        let fields = TaskFields {
            finish: "No".into(),
            priority: "High".into(),
            ..TaskFields::default()
        };
        let view = TaskFormView::from_fields(&fields);
        assert_eq!(Finish::ALL[view.finish], Finish::No);
        assert_eq!(Priority::ALL[view.priority], Priority::High);
    }

    #[test]
    fn typing_reports_the_whole_field_value() {
        let mut view = TaskFormView::from_fields(&TaskFields {
            title: "Bu".into(),
            ..TaskFields::default()
        });
        assert_eq!(view.handle_char('y'), Some((Field::Title, "Buy".to_string())));
        view.next_field();
        assert_eq!(view.current(), Field::DueDay);
        assert_eq!(view.handle_backspace(), None);
    }

    #[test]
    fn selectors_cycle_and_ignore_typing() {
        let mut view = TaskFormView::from_fields(&TaskFields::default());
        view.current_field = PRIORITY_ORDER;
        assert_eq!(view.handle_char('x'), None);
        assert_eq!(view.handle_left_right(false), Some((Field::Priority, "High".to_string())));
        assert_eq!(view.handle_left_right(true), Some((Field::Priority, String::new())));
    }

    #[test]
    fn focus_wraps_around() {
        let mut view = TaskFormView::from_fields(&TaskFields::default());
        view.prev_field();
        assert_eq!(view.current(), Field::Category);
        view.next_field();
        assert_eq!(view.current(), Field::Title);
    }
}
