use serde::Serialize;

use super::types::{QueueId, TaskId};

/// One customer order waiting in a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub item: String,
    /// Preparation time in minutes, fixed when the order was taken
    pub prep_minutes: u32,
    pub queue: QueueId,
}

impl Task {
    pub fn new(id: TaskId, item: impl Into<String>, prep_minutes: u32, queue: QueueId) -> Self {
        Self {
            id,
            item: item.into(),
            prep_minutes,
            queue,
        }
    }
}
