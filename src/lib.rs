//! Round-robin café simulator.
//!
//! Customer queues take turns at the counter: each visit serves up to
//! `quantum * weight` orders from one queue, skipped and empty queues pass
//! their turn, and menu specials override preparation times for a limited
//! number of orders.
pub mod command;
pub mod core;
pub mod generator;
pub mod session;

// Re-export commonly used types
pub use crate::core::config::CafeConfig;
pub use crate::core::errors::SchedulerError;
pub use crate::core::report::{TurnReport, VisitEvent, VisitOutcome};
pub use crate::core::scheduler::{Scheduler, SchedulerObserver};
pub use crate::core::types::{QueueId, TaskId};
