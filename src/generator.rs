use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::scheduler::Scheduler;
use crate::core::types::TaskId;

/// Tally of a generated batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub accepted: Vec<TaskId>,
    /// Orders turned away because their queue was full
    pub rejected: usize,
}

/// Seeded random order stream for demos and soak tests.
///
/// Picks a queue and a menu item uniformly at random for each order.
pub struct OrderGenerator {
    rng: StdRng,
}

impl OrderGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Place `count` random orders. Nothing is generated when the scheduler
    /// has no queues or an empty menu.
    pub fn generate(&mut self, scheduler: &mut Scheduler, count: usize) -> GenerationStats {
        let queues: Vec<String> = scheduler.queues().iter().map(|q| q.id().to_string()).collect();
        let items: Vec<String> = scheduler.menu().items().map(|(name, _)| name.to_string()).collect();
        let mut stats = GenerationStats::default();
        if queues.is_empty() || items.is_empty() {
            return stats;
        }

        for _ in 0..count {
            let queue = &queues[self.rng.gen_range(0..queues.len())];
            let item = &items[self.rng.gen_range(0..items.len())];
            match scheduler.enqueue(queue, item) {
                Ok(id) => stats.accepted.push(id),
                Err(err) => {
                    debug!("[Generator] {} on {} rejected: {}", item, queue, err);
                    stats.rejected += 1;
                }
            }
        }
        info!(
            "[Generator] Placed {} orders ({} accepted, {} rejected)",
            count,
            stats.accepted.len(),
            stats.rejected
        );
        stats
    }
}
