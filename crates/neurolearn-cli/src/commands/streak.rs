use clap::Subcommand;
use serde_json::json;

use super::{open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the current streak and the last session date
    Show,
    /// Reset the streak to zero
    Reset,
}

pub async fn run(action: StreakAction) -> CliResult {
    let engine = open_engine()?;
    match action {
        StreakAction::Show => {
            let streak = engine.streak().get_streak().await?;
            let last = engine.streak().get_last_session_date().await?;
            print_json(&json!({ "streak": streak, "lastSessionDate": last }))?;
        }
        StreakAction::Reset => {
            engine.reset_streak().await?;
            print_json(&json!({ "streak": 0 }))?;
        }
    }
    Ok(())
}
