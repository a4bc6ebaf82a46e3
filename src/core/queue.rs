use std::collections::VecDeque;

use super::errors::SchedulerError;
use super::task::Task;
use super::types::{QueueId, TaskId};

/// Upper bound on storage reserved up front; larger queues grow on demand
const PREALLOC_LIMIT: usize = 64;

/// Bounded FIFO of orders for one customer type.
///
/// The capacity bound is enforced on enqueue; enqueue and dequeue are
/// amortized O(1).
#[derive(Debug, Clone)]
pub struct OrderQueue {
    id: QueueId,
    capacity: usize,
    tasks: VecDeque<Task>,
    weight: u32,
    skip: bool,
    /// Tasks ever accepted; drives id generation
    issued: u32,
}

impl OrderQueue {
    /// Create an empty queue. Capacity must be at least 1.
    pub fn new(id: QueueId, capacity: usize) -> Result<Self, SchedulerError> {
        if capacity == 0 {
            return Err(SchedulerError::InvalidCapacity(capacity));
        }
        Ok(Self {
            id,
            capacity,
            tasks: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT)),
            weight: 1,
            skip: false,
            issued: 0,
        })
    }

    pub fn id(&self) -> &QueueId {
        &self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= self.capacity
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Id the next accepted task will receive
    pub fn next_task_id(&self) -> TaskId {
        TaskId::for_queue(&self.id, self.issued + 1)
    }

    /// Append a task at the back.
    ///
    /// The id counter only moves on success, so a rejected order never burns
    /// an identifier.
    pub fn enqueue(&mut self, task: Task) -> Result<(), SchedulerError> {
        if self.is_full() {
            return Err(SchedulerError::CapacityExceeded(self.id.clone()));
        }
        self.tasks.push_back(task);
        self.issued += 1;
        Ok(())
    }

    /// Remove the earliest-inserted task
    pub fn dequeue_front(&mut self) -> Result<Task, SchedulerError> {
        self.tasks
            .pop_front()
            .ok_or_else(|| SchedulerError::EmptyQueue(self.id.clone()))
    }

    pub fn set_weight(&mut self, weight: i64) -> Result<(), SchedulerError> {
        let weight = u32::try_from(weight)
            .ok()
            .filter(|w| *w >= 1)
            .ok_or(SchedulerError::InvalidWeight(weight))?;
        self.weight = weight;
        Ok(())
    }

    pub fn set_skip(&mut self, skip: bool) {
        self.skip = skip;
    }

    /// Pending tasks, front first
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}
