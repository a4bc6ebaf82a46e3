//! Interactive session: feeds parsed commands into the scheduler and renders
//! the results as text lines.

use log::debug;

use crate::command::{parse_command, Command};
use crate::core::errors::SchedulerError;
use crate::core::report::{CafeSnapshot, TurnReport, VisitOutcome};
use crate::core::scheduler::Scheduler;

pub const FAREWELL: &str = "Break time!";

/// Result of feeding one line to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// Lines to print; the session continues
    Output(Vec<String>),
    /// Blank line received
    Closed,
}

pub struct Session {
    scheduler: Scheduler,
}

impl Session {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Handle one raw input line
    pub fn execute(&mut self, line: &str) -> SessionStep {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return SessionStep::Closed;
        }

        let lines = match parse_command(line) {
            None => Vec::new(),
            Some(Err(err)) => {
                debug!("[Session] {}", err);
                vec![format!("time={} event=error reason={}", self.scheduler.total_minutes(), err.reason())]
            }
            Some(Ok(command)) => self.dispatch(command),
        };
        SessionStep::Output(lines)
    }

    fn dispatch(&mut self, command: Command) -> Vec<String> {
        let sched = &mut self.scheduler;
        let now = sched.total_minutes();
        let result = match command {
            Command::Create { queue, capacity } => sched
                .create_queue(&queue, capacity)
                .map(|id| vec![format!("time={} event=create queue={} capacity={}", now, id, capacity)]),
            Command::Enqueue { queue, item } => sched.enqueue_task(&queue, &item).map(|task| {
                vec![format!(
                    "time={} event=enqueue queue={} task={} item={} prep={}",
                    now, task.queue, task.id, task.item, task.prep_minutes
                )]
            }),
            Command::Skip { queue } => sched
                .set_skip(&queue)
                .map(|()| vec![format!("time={} event=skip queue={}", now, queue)]),
            Command::SetWeight { queue, weight } => sched
                .set_weight(&queue, weight)
                .map(|()| vec![format!("time={} event=setweight queue={} weight={}", now, queue, weight)]),
            Command::Special {
                item,
                prep_minutes,
                uses,
            } => sched.set_special(&item, prep_minutes, uses).map(|()| {
                vec![format!(
                    "time={} event=special item={} prep={} uses={}",
                    now, item, prep_minutes, uses
                )]
            }),
            Command::Run { quantum, steps } => {
                let report = match quantum {
                    Some(quantum) => sched.run_with_quantum(quantum, steps),
                    None => sched.run(steps),
                };
                report.map(|report| render_run(&report, sched))
            }
            Command::Drain { quantum } => {
                let quantum = quantum.unwrap_or_else(|| sched.quantum());
                sched
                    .run_until_drained(quantum)
                    .map(|report| render_run(&report, sched))
            }
            Command::Menu => Ok(vec![render_menu(&sched.snapshot())]),
            Command::Status => Ok(render_snapshot(&sched.snapshot())),
        };

        result.unwrap_or_else(|err| render_error(now, &err))
    }
}

fn render_run(report: &TurnReport, sched: &Scheduler) -> Vec<String> {
    let mut lines = render_report(report);
    lines.extend(render_snapshot(&sched.snapshot()));
    lines
}

fn render_error(now: u64, err: &SchedulerError) -> Vec<String> {
    vec![
        err.user_message(),
        format!("time={} event=error reason={}", now, err.reason()),
    ]
}

/// Render every visit of a run followed by a one-line summary
pub fn render_report(report: &TurnReport) -> Vec<String> {
    let mut lines = Vec::new();
    for visit in &report.visits {
        lines.push(format!("time={} event=run queue={}", visit.started_at, visit.queue));
        match &visit.outcome {
            VisitOutcome::Skipped => {
                lines.push(format!("time={} event=skipped queue={}", visit.started_at, visit.queue));
            }
            VisitOutcome::Idle => {
                lines.push(format!("time={} event=idle queue={}", visit.started_at, visit.queue));
            }
            VisitOutcome::Served(tasks) => {
                for task in tasks {
                    lines.push(format!(
                        "time={} event=work queue={} task={} item={} minutes={}",
                        task.started_at, visit.queue, task.id, task.item, task.prep_minutes
                    ));
                    lines.push(format!(
                        "time={} event=finish queue={} task={}",
                        task.started_at + u64::from(task.prep_minutes),
                        visit.queue,
                        task.id
                    ));
                }
            }
        }
    }
    lines.push(format!(
        "time={} event=summary turns={} served={} minutes={} total_minutes={}",
        report.total_minutes,
        report.visits.len(),
        report.served_count(),
        report.minutes,
        report.total_minutes
    ));
    lines
}

fn render_menu(snapshot: &CafeSnapshot) -> String {
    let items: Vec<String> = snapshot
        .menu
        .iter()
        .map(|(name, minutes)| format!("{}:{}", name, minutes))
        .collect();
    format!("display menu=[{}]", items.join(","))
}

/// Render the café display: clock, next queue, menu and every queue
pub fn render_snapshot(snapshot: &CafeSnapshot) -> Vec<String> {
    let next = snapshot
        .next
        .as_ref()
        .map(|q| q.to_string())
        .unwrap_or_else(|| "none".to_string());
    let mut lines = vec![
        format!("display time={} next={}", snapshot.time, next),
        render_menu(snapshot),
    ];

    for queue in &snapshot.queues {
        let skip = if queue.skip { " [skip]" } else { "" };
        let weight = if queue.weight != 1 {
            format!(" w={}", queue.weight)
        } else {
            String::new()
        };
        let tasks: Vec<String> = queue
            .tasks
            .iter()
            .map(|t| format!("{}:{}", t.id, t.prep_minutes))
            .collect();
        lines.push(format!(
            "display {} [{}/{}]{}{} -> [{}]",
            queue.id,
            queue.len,
            queue.capacity,
            skip,
            weight,
            tasks.join(",")
        ));
    }
    lines
}
