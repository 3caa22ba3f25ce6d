use clap::Subcommand;
use serde_json::json;

use super::{open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum XpAction {
    /// Print total XP
    Show,
    /// Add XP without recording a session
    Add {
        amount: u64,
    },
}

pub async fn run(action: XpAction) -> CliResult {
    let engine = open_engine()?;
    match action {
        XpAction::Show => {
            let xp = engine.xp().get_xp().await?;
            print_json(&json!({ "xp": xp }))?;
        }
        XpAction::Add { amount } => {
            let xp = engine.xp().add_xp(amount).await?;
            print_json(&json!({ "xp": xp }))?;
        }
    }
    Ok(())
}
