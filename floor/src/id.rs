use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a task. Unique among the tasks created from one [`TaskIdAllocator`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(u64);

impl From<TaskId> for u64 {
    fn from(id: TaskId) -> u64 {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out task ids in increasing order, starting at 1.
///
/// Whatever spawns tasks owns the allocator and passes it to [`crate::Task::new`].
/// The counter is atomic, so a shared reference can be used from several
/// threads at once; ids stay unique, but tasks created concurrently get them
/// in no particular order.
#[derive(Debug)]
pub struct TaskIdAllocator {
    next: AtomicU64,
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl TaskIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id.
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next call to `next_id` will return, absent concurrent callers.
    pub fn peek(&self) -> TaskId {
        TaskId(self.next.load(Ordering::Relaxed))
    }
}
