//! Edit state owned by a single task row.
//!
//! Row state lives beside the task list, never inside it: the list only
//! receives `EditField` intents carrying the new text.

use crate::task::{Field, Task};
use crate::tui::{enums::EditMode, input::InputField};

/// Inline-edit state machine for one row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowState {
    mode: EditMode,
    input: InputField,
}

impl RowState {
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode != EditMode::Idle
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    /// Click on the name: Idle or EditingDescription -> EditingName.
    pub fn click_name(&mut self, task: &Task) {
        self.begin(task, Field::Name);
    }

    /// Click on the description: Idle or EditingName -> EditingDescription.
    pub fn click_description(&mut self, task: &Task) {
        self.begin(task, Field::Description);
    }

    /// Enter, Escape or focus loss: back to Idle.
    pub fn finish(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Switch to the other field (Tab while editing).
    pub fn switch_field(&mut self, task: &Task) {
        if let Some(field) = self.mode.field() {
            self.begin(task, field.other());
        }
    }

    fn begin(&mut self, task: &Task, field: Field) {
        if self.mode.field() == Some(field) {
            return;
        }
        self.mode = EditMode::editing(field);
        self.input = InputField::with_value(task.field(field));
    }
}
