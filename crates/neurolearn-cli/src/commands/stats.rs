use clap::Subcommand;

use super::{open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Totals, weekday activity and the contribution series
    Summary,
    /// XP, streak and minutes focused today
    Today,
    /// Progress towards the daily XP goal
    Goal,
}

pub async fn run(action: StatsAction) -> CliResult {
    let engine = open_engine()?;
    match action {
        StatsAction::Summary => print_json(&engine.summary().await?)?,
        StatsAction::Today => print_json(&engine.header_stats().await?)?,
        StatsAction::Goal => print_json(&engine.daily_goal().await?)?,
    }
    Ok(())
}
