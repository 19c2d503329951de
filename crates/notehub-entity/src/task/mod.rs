//! Kanban task entities.

pub mod model;
pub mod status;

pub use model::{CreateTask, Task};
pub use status::{TaskPriority, TaskStatus};
