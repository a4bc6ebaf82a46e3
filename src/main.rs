use std::io::{self, BufRead, Write};

use rr_cafe::session::{Session, SessionStep, FAREWELL};
use rr_cafe::{CafeConfig, Scheduler};

fn print_usage() {
    println!("Usage: rr_cafe [--config <menu.json>]");
    println!("Reads commands from stdin; a blank line ends the session.");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--config") => {
            let path = args.next().ok_or("--config needs a path")?;
            CafeConfig::from_json_file(path)?
        }
        Some("--help") | Some("-h") => {
            print_usage();
            return Ok(());
        }
        Some(other) => {
            eprintln!("unknown argument: {}", other);
            print_usage();
            std::process::exit(2);
        }
        None => CafeConfig::default(),
    };

    let mut session = Session::new(Scheduler::with_config(&config)?);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        match session.execute(&line?) {
            SessionStep::Output(lines) => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            SessionStep::Closed => {
                writeln!(out, "{}", FAREWELL)?;
                break;
            }
        }
    }
    out.flush()?;
    Ok(())
}
