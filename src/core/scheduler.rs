use std::collections::HashMap;

use log::{debug, info, warn};
use uuid::Uuid;

use super::config::CafeConfig;
use super::errors::SchedulerError;
use super::menu::MenuCatalog;
use super::queue::OrderQueue;
use super::report::{CafeSnapshot, PendingTask, QueueSnapshot, ServedTask, TurnReport, VisitEvent, VisitOutcome};
use super::task::Task;
use super::types::{QueueId, TaskId};

/// Observer trait for scheduler runs
///
/// Observers see a run only after it has fully completed.
pub trait SchedulerObserver {
    /// Called once per visit, in rotation order
    fn on_visit(&mut self, visit: &VisitEvent);

    /// Called after all visits of a run have been reported
    fn on_run_complete(&mut self, report: &TurnReport);
}

/// Round-robin scheduler over the café's customer queues.
///
/// Queues are visited in creation order. A visit serves up to
/// `quantum * weight` tasks from the front of the queue; skipped and empty
/// queues still use up their step but add no time.
pub struct Scheduler {
    queues: Vec<OrderQueue>,
    index: HashMap<QueueId, usize>,
    menu: MenuCatalog,
    quantum: u32,
    /// Rotation pointer; always `< queues.len()` once a queue exists
    cursor: usize,
    turn: u64,
    total_minutes: u64,
    observers: Vec<Box<dyn SchedulerObserver>>,
}

impl Scheduler {
    /// Create a scheduler with the house menu
    pub fn new() -> Self {
        let config = CafeConfig::default();
        Self::build(config.catalog(), config.quantum)
    }

    pub fn with_config(config: &CafeConfig) -> Result<Self, SchedulerError> {
        if config.quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(config.quantum));
        }
        Ok(Self::build(config.catalog(), config.quantum))
    }

    fn build(menu: MenuCatalog, quantum: u32) -> Self {
        Self {
            queues: Vec::new(),
            index: HashMap::new(),
            menu,
            quantum,
            cursor: 0,
            turn: 0,
            total_minutes: 0,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the scheduler
    pub fn add_observer(&mut self, observer: Box<dyn SchedulerObserver>) {
        self.observers.push(observer);
    }

    /// Append a new queue to the end of the rotation
    pub fn create_queue(&mut self, name: &str, capacity: usize) -> Result<QueueId, SchedulerError> {
        let id = QueueId::new(name);
        if self.index.contains_key(&id) {
            return Err(SchedulerError::DuplicateQueue(id));
        }
        let queue = OrderQueue::new(id.clone(), capacity)?;

        self.index.insert(id.clone(), self.queues.len());
        self.queues.push(queue);
        info!("[Scheduler] Created queue {} (capacity {})", id, capacity);
        Ok(id)
    }

    /// Take an order for `item` on queue `queue`.
    ///
    /// All checks run before the menu is asked to resolve the time, so a
    /// rejected order never consumes a special.
    pub fn enqueue(&mut self, queue: &str, item: &str) -> Result<TaskId, SchedulerError> {
        self.enqueue_task(queue, item).map(|task| task.id)
    }

    /// Like [`Scheduler::enqueue`], returning a copy of the accepted task
    pub fn enqueue_task(&mut self, queue: &str, item: &str) -> Result<Task, SchedulerError> {
        let idx = self.position(queue)?;
        self.menu.lookup(item)?;
        let order_queue = &mut self.queues[idx];
        if order_queue.is_full() {
            warn!(
                "[Scheduler] Rejected {} on {} - at capacity ({}/{})",
                item,
                queue,
                order_queue.len(),
                order_queue.capacity()
            );
            return Err(SchedulerError::CapacityExceeded(order_queue.id().clone()));
        }

        let prep_minutes = self.menu.resolve_prep_time(item)?;
        let id = order_queue.next_task_id();
        let task = Task::new(id.clone(), item, prep_minutes, order_queue.id().clone());
        order_queue.enqueue(task.clone())?;

        debug!("[Scheduler] Enqueued {} ({} for {} min)", id, item, prep_minutes);
        Ok(task)
    }

    pub fn set_special(&mut self, item: &str, prep_minutes: i64, uses: i64) -> Result<(), SchedulerError> {
        self.menu.set_special(item, prep_minutes, uses)?;
        info!("[Scheduler] Special on {}: {} min for {} orders", item, prep_minutes, uses);
        Ok(())
    }

    pub fn set_weight(&mut self, queue: &str, weight: i64) -> Result<(), SchedulerError> {
        let idx = self.position(queue)?;
        self.queues[idx].set_weight(weight)
    }

    /// Mark a queue to be passed over on its next visit
    pub fn set_skip(&mut self, queue: &str) -> Result<(), SchedulerError> {
        let idx = self.position(queue)?;
        self.queues[idx].set_skip(true);
        Ok(())
    }

    /// Execute `steps` visits with the configured quantum
    pub fn run(&mut self, steps: usize) -> Result<TurnReport, SchedulerError> {
        self.run_with_quantum(self.quantum, steps)
    }

    /// Execute `steps` visits, serving up to `quantum * weight` tasks per visit.
    ///
    /// Arguments are validated before the first visit; a rejected call
    /// leaves the rotation untouched.
    pub fn run_with_quantum(&mut self, quantum: u32, steps: usize) -> Result<TurnReport, SchedulerError> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        if steps < 1 || steps > self.queues.len() {
            return Err(SchedulerError::InvalidStepCount {
                steps,
                queues: self.queues.len(),
            });
        }

        let start_minutes = self.total_minutes;
        let visits = (0..steps).map(|_| self.visit(quantum)).collect();
        Ok(self.finish_run(visits, start_minutes))
    }

    /// Keep rotating until every queue is empty and no skip is pending.
    ///
    /// At least one visit is made. Nothing is enqueued while a run is in
    /// progress, so every full rotation either serves a task or clears a
    /// skip flag and the loop terminates.
    pub fn run_until_drained(&mut self, quantum: u32) -> Result<TurnReport, SchedulerError> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        if self.queues.is_empty() {
            return Err(SchedulerError::NoQueues);
        }

        let start_minutes = self.total_minutes;
        let mut visits = Vec::new();
        loop {
            visits.push(self.visit(quantum));
            if self.is_drained() {
                break;
            }
        }
        Ok(self.finish_run(visits, start_minutes))
    }

    /// True when no queue holds a task or a pending skip
    pub fn is_drained(&self) -> bool {
        self.queues.iter().all(|q| q.is_empty() && !q.is_skipped())
    }

    fn finish_run(&mut self, visits: Vec<VisitEvent>, start_minutes: u64) -> TurnReport {
        let run_id = Uuid::new_v4().to_string();
        let report = TurnReport {
            run_id,
            visits,
            minutes: self.total_minutes - start_minutes,
            total_minutes: self.total_minutes,
            turn: self.turn,
        };
        info!(
            "[Scheduler] Run {} finished: {} visits, {} served, {} min (total {})",
            report.run_id,
            report.visits.len(),
            report.served_count(),
            report.minutes,
            report.total_minutes
        );

        for observer in &mut self.observers {
            for visit in &report.visits {
                observer.on_visit(visit);
            }
            observer.on_run_complete(&report);
        }
        report
    }

    fn visit(&mut self, quantum: u32) -> VisitEvent {
        self.turn += 1;
        let started_at = self.total_minutes;
        let queue = &mut self.queues[self.cursor];
        debug!("=== Turn {} at {} ===", self.turn, queue.id());

        let outcome = if queue.is_skipped() {
            queue.set_skip(false);
            VisitOutcome::Skipped
        } else if queue.is_empty() {
            VisitOutcome::Idle
        } else {
            let limit = quantum.saturating_mul(queue.weight());
            let mut served = Vec::new();
            let mut clock = started_at;
            for _ in 0..limit {
                let Ok(task) = queue.dequeue_front() else {
                    break;
                };
                debug!("[Scheduler] Serving {} ({}) at {}", task.id, task.item, clock);
                served.push(ServedTask {
                    id: task.id,
                    item: task.item,
                    prep_minutes: task.prep_minutes,
                    started_at: clock,
                });
                clock += u64::from(task.prep_minutes);
            }
            VisitOutcome::Served(served)
        };

        let event = VisitEvent {
            turn: self.turn,
            queue: queue.id().clone(),
            started_at,
            minutes: outcome_minutes(&outcome),
            outcome,
        };
        self.total_minutes += event.minutes;
        self.cursor = (self.cursor + 1) % self.queues.len();
        event
    }

    fn position(&self, queue: &str) -> Result<usize, SchedulerError> {
        self.index
            .get(&QueueId::new(queue))
            .copied()
            .ok_or_else(|| SchedulerError::UnknownQueue(QueueId::new(queue)))
    }

    pub fn queue(&self, queue: &str) -> Option<&OrderQueue> {
        self.position(queue).ok().map(|idx| &self.queues[idx])
    }

    /// Queues in rotation order
    pub fn queues(&self) -> &[OrderQueue] {
        &self.queues
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn menu(&self) -> &MenuCatalog {
        &self.menu
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Queue the next visit will address
    pub fn next_queue(&self) -> Option<&QueueId> {
        self.queues.get(self.cursor).map(|q| q.id())
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }

    pub fn snapshot(&self) -> CafeSnapshot {
        CafeSnapshot {
            time: self.total_minutes,
            next: self.next_queue().cloned(),
            menu: self.menu.items().map(|(name, minutes)| (name.to_string(), minutes)).collect(),
            queues: self
                .queues
                .iter()
                .map(|q| QueueSnapshot {
                    id: q.id().clone(),
                    len: q.len(),
                    capacity: q.capacity(),
                    weight: q.weight(),
                    skip: q.is_skipped(),
                    tasks: q
                        .iter()
                        .map(|t| PendingTask {
                            id: t.id.clone(),
                            prep_minutes: t.prep_minutes,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome_minutes(outcome: &VisitOutcome) -> u64 {
    match outcome {
        VisitOutcome::Served(tasks) => tasks.iter().map(|t| u64::from(t.prep_minutes)).sum(),
        VisitOutcome::Idle | VisitOutcome::Skipped => 0,
    }
}
