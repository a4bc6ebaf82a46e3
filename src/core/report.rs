use serde::Serialize;

use super::types::{QueueId, TaskId};

/// A task completed during a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServedTask {
    pub id: TaskId,
    pub item: String,
    pub prep_minutes: u32,
    /// Simulated minute the task started
    pub started_at: u64,
}

/// What happened when the rotation reached a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VisitOutcome {
    Served(Vec<ServedTask>),
    Idle,
    Skipped,
}

/// One scheduler step addressing exactly one queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitEvent {
    /// Global turn number, 1-based
    pub turn: u64,
    pub queue: QueueId,
    pub started_at: u64,
    pub outcome: VisitOutcome,
    /// Minutes of work done during this visit
    pub minutes: u64,
}

impl VisitEvent {
    pub fn served(&self) -> &[ServedTask] {
        match &self.outcome {
            VisitOutcome::Served(tasks) => tasks,
            _ => &[],
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == VisitOutcome::Skipped
    }

    pub fn is_idle(&self) -> bool {
        self.outcome == VisitOutcome::Idle
    }
}

/// Result of a single RUN call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub run_id: String,
    pub visits: Vec<VisitEvent>,
    /// Minutes worked during this run
    pub minutes: u64,
    /// Minutes worked since the session started
    pub total_minutes: u64,
    /// Turns taken since the session started
    pub turn: u64,
}

impl TurnReport {
    pub fn served_count(&self) -> usize {
        self.visits.iter().map(|v| v.served().len()).sum()
    }
}

/// Pending task as shown on the café display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTask {
    pub id: TaskId,
    pub prep_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    pub id: QueueId,
    pub len: usize,
    pub capacity: usize,
    pub weight: u32,
    pub skip: bool,
    pub tasks: Vec<PendingTask>,
}

/// Point-in-time view of the whole café
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CafeSnapshot {
    pub time: u64,
    pub next: Option<QueueId>,
    pub menu: Vec<(String, u32)>,
    pub queues: Vec<QueueSnapshot>,
}
