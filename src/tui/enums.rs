//! Enumerations for TUI state management.

use crate::task::{Field, TaskId};

/// Screen shown by the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    Help,
}

/// Per-row edit mode: which field, if any, is being edited inline.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EditMode {
    #[default]
    Idle,
    EditingName,
    EditingDescription,
}

impl EditMode {
    /// The field under edit, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            EditMode::Idle => None,
            EditMode::EditingName => Some(Field::Name),
            EditMode::EditingDescription => Some(Field::Description),
        }
    }

    pub fn editing(field: Field) -> Self {
        match field {
            Field::Name => EditMode::EditingName,
            Field::Description => EditMode::EditingDescription,
        }
    }
}

/// Clickable region of the last rendered frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hit {
    Name(TaskId),
    Description(TaskId),
    Toggle(TaskId),
    Delete(TaskId),
    MoveUp(TaskId),
    MoveDown(TaskId),
    Card(TaskId),
    Add,
}

impl Hit {
    /// Task the region belongs to, if any.
    pub fn task(self) -> Option<TaskId> {
        match self {
            Hit::Name(id)
            | Hit::Description(id)
            | Hit::Toggle(id)
            | Hit::Delete(id)
            | Hit::MoveUp(id)
            | Hit::MoveDown(id)
            | Hit::Card(id) => Some(id),
            Hit::Add => None,
        }
    }
}
