//! Rush-hour demo: three customer lines, a stream of random orders and a
//! few full rotations of the counter.

use rr_cafe::generator::OrderGenerator;
use rr_cafe::session::{render_report, render_snapshot};
use rr_cafe::Scheduler;

const ORDERS: usize = 24;
const ROTATIONS: usize = 4;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    println!("Starting rush-hour simulation");

    let mut scheduler = Scheduler::new();
    scheduler.create_queue("Mobile", 6)?;
    scheduler.create_queue("WalkIns", 8)?;
    scheduler.create_queue("DriveThru", 4)?;
    scheduler.set_weight("WalkIns", 2)?;
    scheduler.set_special("latte", 1, 3)?;

    let stats = OrderGenerator::new(SEED).generate(&mut scheduler, ORDERS);
    println!(
        "Orders: {} accepted, {} turned away",
        stats.accepted.len(),
        stats.rejected
    );

    for rotation in 1..=ROTATIONS {
        if rotation == 2 {
            scheduler.set_skip("DriveThru")?;
        }
        let report = scheduler.run(scheduler.queue_count())?;
        println!();
        println!("-- Rotation {} --", rotation);
        for line in render_report(&report) {
            println!("{}", line);
        }
    }

    println!();
    for line in render_snapshot(&scheduler.snapshot()) {
        println!("{}", line);
    }
    println!(
        "Worked {} minutes over {} turns",
        scheduler.total_minutes(),
        scheduler.turn()
    );
    Ok(())
}
