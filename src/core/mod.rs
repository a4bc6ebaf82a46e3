pub mod config;
pub mod errors;
pub mod menu;
pub mod queue;
pub mod report;
pub mod scheduler;
pub mod task;
pub mod types;

#[cfg(test)]
mod tests;
