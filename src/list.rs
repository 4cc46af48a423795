//! In-memory task list and the operations that transform it.
//!
//! `TaskList` is a value: every operation borrows the current list and returns
//! the next one, leaving the original untouched. Tasks are kept in `position`
//! order and positions are always the dense range `0..len`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::task::{Direction, Field, Task, TaskId};

/// A user gesture translated into a list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create,
    ToggleComplete(usize),
    Delete(usize),
    EditField(usize, Field, String),
    Move(usize, Direction),
}

/// Ordered collection of tasks for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskList {
    tasks: Vec<Task>,
    #[serde(skip)]
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by index.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Current index of the task with the given id.
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn is_top(&self, index: usize) -> bool {
        index == 0
    }

    pub fn is_bottom(&self, index: usize) -> bool {
        index + 1 == self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Check that positions are exactly `0..len` in storage order.
    pub fn check_positions(&self) -> bool {
        self.tasks.iter().enumerate().all(|(i, t)| t.position == i)
    }

    /// Apply an intent, producing the next list.
    pub fn apply(&self, intent: &Intent) -> TaskList {
        debug!(?intent, len = self.len(), "applying intent");
        let next = match intent {
            Intent::Create => self.create(),
            Intent::ToggleComplete(index) => self.toggle_complete(*index),
            Intent::Delete(index) => self.delete(*index),
            Intent::EditField(index, field, value) => self.edit_field(*index, *field, value),
            Intent::Move(index, direction) => self.move_task(*index, *direction),
        };
        debug_assert!(next.check_positions(), "positions out of order after {intent:?}");
        next
    }

    /// Append a task with default text at the end of the list.
    pub fn create(&self) -> TaskList {
        let mut next = self.clone();
        let id = TaskId(next.next_id);
        next.next_id += 1;
        next.tasks.push(Task::new(id, self.tasks.len()));
        next
    }

    /// Flip the completion flag of the task at `index`.
    pub fn toggle_complete(&self, index: usize) -> TaskList {
        if !self.in_range(index, "toggle_complete") {
            return self.clone();
        }
        let mut next = self.clone();
        let task = &mut next.tasks[index];
        task.completed = !task.completed;
        next
    }

    /// Remove the task at `index`, closing the gap it leaves in the positions.
    pub fn delete(&self, index: usize) -> TaskList {
        if !self.in_range(index, "delete") {
            return self.clone();
        }
        let tasks = self
            .tasks
            .iter()
            .filter(|t| t.position != index)
            .map(|t| {
                if t.position > index {
                    Task { position: t.position - 1, ..t.clone() }
                } else {
                    t.clone()
                }
            })
            .collect();
        TaskList { tasks, next_id: self.next_id }
    }

    /// Replace the text of one field on the task at `index`.
    pub fn edit_field(&self, index: usize, field: Field, value: &str) -> TaskList {
        if !self.in_range(index, "edit_field") {
            return self.clone();
        }
        let mut next = self.clone();
        let task = &mut next.tasks[index];
        match field {
            Field::Name => task.name = value.to_string(),
            Field::Description => task.description = value.to_string(),
        }
        next
    }

    /// Swap the task at `index` with its neighbor in `direction`.
    ///
    /// Callers hide the control at the list boundaries; a boundary move is
    /// ignored.
    pub fn move_task(&self, index: usize, direction: Direction) -> TaskList {
        let Some(neighbor) = direction.neighbor(index, self.tasks.len()) else {
            warn!(index, ?direction, len = self.len(), "ignoring move past list boundary");
            return self.clone();
        };
        let mut next = self.clone();
        next.tasks.swap(index, neighbor);
        next.tasks[index].position = index;
        next.tasks[neighbor].position = neighbor;
        next
    }

    fn in_range(&self, index: usize, op: &str) -> bool {
        if index < self.tasks.len() {
            true
        } else {
            warn!(op, index, len = self.len(), "ignoring out-of-range index");
            false
        }
    }
}
