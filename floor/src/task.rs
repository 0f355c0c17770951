use std::fmt;

use crate::{TaskId, TaskIdAllocator};

/// A cell on the floor grid. Not checked against any floor bounds.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A task waiting at a fixed position on the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    position: Position,
}

impl Task {
    /// Create a task at `position`, taking its id from `ids`.
    pub fn new(ids: &TaskIdAllocator, position: impl Into<Position>) -> Self {
        let task = Self {
            id: ids.next_id(),
            position: position.into(),
        };
        log::trace!("created {} at {}", task, task.position);
        task
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task{}", self.id)
    }
}
