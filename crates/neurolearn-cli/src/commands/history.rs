use clap::Subcommand;

use super::{open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded sessions, oldest first
    List {
        /// Only show the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub async fn run(action: HistoryAction) -> CliResult {
    let engine = open_engine()?;
    match action {
        HistoryAction::List { limit } => {
            let history = engine.get_session_history().await?;
            let start = limit.map_or(0, |n| history.len().saturating_sub(n));
            print_json(&history[start..])?;
        }
    }
    Ok(())
}
