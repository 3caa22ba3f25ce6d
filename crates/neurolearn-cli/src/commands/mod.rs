pub mod assist;
pub mod config;
pub mod data;
pub mod focus;
pub mod history;
pub mod session;
pub mod stats;
pub mod streak;
pub mod xp;

use std::io::Write;
use std::sync::Arc;

use neurolearn_core::{Config, Database, ProgressEngine, SystemClock};
use serde::Serialize;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Engine over the on-disk store, using the local calendar date.
pub fn open_engine() -> CliResult<ProgressEngine> {
    let config = Config::load()?;
    let db = Database::open()?;
    tracing::debug!(xp_per_session = config.progress.xp_per_session, "progress store opened");
    Ok(ProgressEngine::new(
        Arc::new(db),
        Arc::new(SystemClock),
        config,
    ))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    write_json(&mut std::io::stdout().lock(), value)
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    out.flush()?;
    Ok(())
}

/// Print a streamed event. A failed write is logged and the stream goes on.
pub fn emit_event<W: Write, T: Serialize + ?Sized>(out: &mut W, event: &T) -> bool {
    match write_json(out, event) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to print event");
            false
        }
    }
}
