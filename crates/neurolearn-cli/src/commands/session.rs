use clap::Subcommand;
use neurolearn_core::{GoalStatus, Mood, SessionReview};

use super::{open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Rate a finished session and commit XP, streak and history
    Complete {
        #[arg(long)]
        topic: String,
        /// Concentration rating, 1-5
        #[arg(long)]
        concentration: u8,
        /// happy, neutral or sad
        #[arg(long)]
        mood: Mood,
        /// yes, no or not_yet
        #[arg(long)]
        goal: GoalStatus,
        /// Focused minutes (defaults to the configured session length)
        #[arg(long)]
        minutes: Option<u32>,
    },
}

pub async fn run(action: SessionAction) -> CliResult {
    match action {
        SessionAction::Complete {
            topic,
            concentration,
            mood,
            goal,
            minutes,
        } => {
            let engine = open_engine()?;
            let minutes = minutes.unwrap_or(engine.config().session.duration_minutes);
            let review = SessionReview {
                topic,
                concentration,
                mood,
                goal_achieved: goal,
            };
            let outcome = engine.complete_session(review, minutes).await?;
            print_json(&outcome)?;
        }
    }
    Ok(())
}
