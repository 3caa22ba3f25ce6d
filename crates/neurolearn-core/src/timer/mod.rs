mod engine;
mod ticks;

pub use engine::{FocusTimer, TimerStatus};
pub use ticks::{run_to_handoff, Handoff, ImmediateTicks, IntervalTicks, TickSource};
