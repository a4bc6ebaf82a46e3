use serde::{Deserialize, Serialize};

/// Identifier of a customer queue (the customer-type name, e.g. `Mobile`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueueId(String);

impl QueueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QueueId {
    fn from(id: &str) -> Self {
        QueueId::new(id)
    }
}

impl From<String> for QueueId {
    fn from(id: String) -> Self {
        QueueId(id)
    }
}

/// Task identifier formatted as `<queue-id>-NNN`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Build the identifier for the `sequence`-th task of a queue (1-based).
    /// The number is zero-padded to at least three digits.
    pub fn for_queue(queue: &QueueId, sequence: u32) -> Self {
        Self(format!("{}-{:03}", queue, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
