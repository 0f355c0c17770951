//! Tasks placed on a factory floor grid.

mod id;
pub use id::{TaskId, TaskIdAllocator};

mod task;
pub use task::{Position, Task};
