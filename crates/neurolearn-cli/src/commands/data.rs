use clap::Subcommand;

use super::{open_engine, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Delete XP, streak and session history
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(action: DataAction) -> CliResult {
    match action {
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear data without --yes".into());
            }
            open_engine()?.clear_all_data().await?;
            println!("all data cleared");
        }
    }
    Ok(())
}
