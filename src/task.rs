//! Task data structure and related functionality.
//!
//! This module defines the `Task` struct that represents a single to-do entry,
//! along with the field and direction selectors used by list operations.

use serde::Serialize;

/// Title given to every newly created task.
pub const DEFAULT_NAME: &str = "New task ✨";
/// Description given to every newly created task.
pub const DEFAULT_DESCRIPTION: &str = "Task description.";

/// Stable identifier assigned to a task when it is created.
///
/// Identity is independent of `position`, so a row keeps its identity
/// (and its edit state) when tasks around it are moved or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TaskId(pub u64);

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub position: usize,
}

impl Task {
    /// Create a task with the default title and description at `position`.
    pub fn new(id: TaskId, position: usize) -> Self {
        Task {
            id,
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            completed: false,
            position,
        }
    }

    /// 1-based label shown in the index badge.
    pub fn badge(&self) -> String {
        (self.position + 1).to_string()
    }

    /// Text of the given field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
        }
    }
}

/// Editable text fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    /// The other editable field.
    pub fn other(self) -> Self {
        match self {
            Field::Name => Field::Description,
            Field::Description => Field::Name,
        }
    }
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Index of the neighbor of `index` in this direction, if one exists in a list of `len`.
    pub fn neighbor(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1).filter(|_| index < len),
            Direction::Down => index.checked_add(1).filter(|&n| n < len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(TaskId(7), 3);
        assert_eq!(task.name, "New task ✨");
        assert_eq!(task.description, "Task description.");
        assert!(!task.completed);
        assert_eq!(task.position, 3);
        assert_eq!(task.badge(), "4");
    }

    #[test]
    fn test_neighbor_bounds() {
        assert_eq!(Direction::Up.neighbor(0, 3), None);
        assert_eq!(Direction::Up.neighbor(2, 3), Some(1));
        assert_eq!(Direction::Up.neighbor(3, 3), None);
        assert_eq!(Direction::Down.neighbor(1, 3), Some(2));
        assert_eq!(Direction::Down.neighbor(2, 3), None);
        assert_eq!(Direction::Down.neighbor(0, 0), None);
    }

    #[test]
    fn test_field_other() {
        assert_eq!(Field::Name.other(), Field::Description);
        assert_eq!(Field::Description.other(), Field::Name);
    }
}
