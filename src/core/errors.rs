use super::types::QueueId;

/// Error types for scheduler operations.
///
/// Every variant is recoverable: the operation that produced it has left the
/// scheduler untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No queue with this id
    UnknownQueue(QueueId),
    /// A queue with this id already exists
    DuplicateQueue(QueueId),
    /// Item has no base menu entry
    UnknownItem(String),
    /// Queue already holds `capacity` tasks
    CapacityExceeded(QueueId),
    /// Dequeue on an empty queue
    EmptyQueue(QueueId),
    /// Weight must be at least 1
    InvalidWeight(i64),
    /// Special needs a positive preparation time and use count
    InvalidSpecial { prep_minutes: i64, uses: i64 },
    /// RUN steps must be within `1..=queues`
    InvalidStepCount { steps: usize, queues: usize },
    /// Capacity must be at least 1
    InvalidCapacity(usize),
    /// Quantum must be at least 1
    InvalidQuantum(u32),
    /// Nothing to rotate over
    NoQueues,
}

impl SchedulerError {
    /// Sentence shown to the customer for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SchedulerError::CapacityExceeded(_) => "Sorry, we're at capacity.".to_string(),
            SchedulerError::UnknownItem(_) => "Sorry, we don't serve that.".to_string(),
            SchedulerError::UnknownQueue(q) => format!("Sorry, there is no {} line.", q),
            SchedulerError::DuplicateQueue(q) => format!("Sorry, the {} line already exists.", q),
            SchedulerError::EmptyQueue(q) => format!("Sorry, the {} line is empty.", q),
            SchedulerError::InvalidWeight(_) => "Sorry, weights start at 1.".to_string(),
            SchedulerError::InvalidSpecial { .. } => {
                "Sorry, a special needs a positive time and use count.".to_string()
            }
            SchedulerError::InvalidStepCount { queues: 0, .. } => "Sorry, there are no lines to serve.".to_string(),
            SchedulerError::InvalidStepCount { queues, .. } => {
                format!("Sorry, we can only run between 1 and {} steps.", queues)
            }
            SchedulerError::InvalidCapacity(_) => "Sorry, a line needs room for at least one order.".to_string(),
            SchedulerError::InvalidQuantum(_) => "Sorry, the quantum must be at least 1.".to_string(),
            SchedulerError::NoQueues => "Sorry, there are no lines to serve.".to_string(),
        }
    }

    /// Short machine-readable reason used in `event=error` log lines
    pub fn reason(&self) -> &'static str {
        match self {
            SchedulerError::UnknownQueue(_) => "unknown_queue",
            SchedulerError::DuplicateQueue(_) => "duplicate_queue",
            SchedulerError::UnknownItem(_) => "unknown_item",
            SchedulerError::CapacityExceeded(_) => "full",
            SchedulerError::EmptyQueue(_) => "empty",
            SchedulerError::InvalidWeight(_) => "bad_weight",
            SchedulerError::InvalidSpecial { .. } => "bad_special",
            SchedulerError::InvalidStepCount { .. } => "invalid_steps",
            SchedulerError::InvalidCapacity(_) => "bad_create",
            SchedulerError::InvalidQuantum(_) => "bad_quantum",
            SchedulerError::NoQueues => "no_queues",
        }
    }
}

impl std::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerError::UnknownQueue(q) => write!(f, "Unknown queue: {}", q),
            SchedulerError::DuplicateQueue(q) => write!(f, "Duplicate queue: {}", q),
            SchedulerError::UnknownItem(item) => write!(f, "Unknown item: {}", item),
            SchedulerError::CapacityExceeded(q) => write!(f, "Capacity exceeded: {}", q),
            SchedulerError::EmptyQueue(q) => write!(f, "Empty queue: {}", q),
            SchedulerError::InvalidWeight(w) => write!(f, "Invalid weight: {}", w),
            SchedulerError::InvalidSpecial { prep_minutes, uses } => {
                write!(f, "Invalid special: prep_minutes={} uses={}", prep_minutes, uses)
            }
            SchedulerError::InvalidStepCount { steps, queues } => {
                write!(f, "Invalid step count: {} (queues: {})", steps, queues)
            }
            SchedulerError::InvalidCapacity(c) => write!(f, "Invalid capacity: {}", c),
            SchedulerError::InvalidQuantum(q) => write!(f, "Invalid quantum: {}", q),
            SchedulerError::NoQueues => write!(f, "No queues"),
        }
    }
}

impl std::error::Error for SchedulerError {}
