use clap::Subcommand;
use neurolearn_core::timer::{run_to_handoff, IntervalTicks};
use neurolearn_core::{FocusTimer, GoalStatus, Mood, SessionReview};

use super::{emit_event, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Count down one focus session, printing each event as JSON
    Run {
        /// What you are studying
        #[arg(long)]
        topic: String,
        /// Override the configured session length
        #[arg(long)]
        minutes: Option<u32>,
        /// Commit the session right away with this concentration (1-5)
        #[arg(long, requires_all = ["mood", "goal"])]
        concentration: Option<u8>,
        /// Mood for the immediate commit: happy, neutral, sad
        #[arg(long)]
        mood: Option<Mood>,
        /// Goal status for the immediate commit: yes, no, not_yet
        #[arg(long)]
        goal: Option<GoalStatus>,
    },
}

pub async fn run(action: FocusAction) -> CliResult {
    match action {
        FocusAction::Run {
            topic,
            minutes,
            concentration,
            mood,
            goal,
        } => {
            let engine = open_engine()?;
            let session = &engine.config().session;
            let total_secs = minutes
                .map(|m| m.saturating_mul(60))
                .unwrap_or_else(|| session.duration_seconds());
            let mut timer = FocusTimer::new(total_secs, session.grace_seconds);

            if let Some(event) = timer.start(&topic)? {
                print_json(&event)?;
            }

            let mut ticks = IntervalTicks::every_second();
            let handoff = tokio::select! {
                handoff = run_to_handoff(&mut timer, &mut ticks, |event| {
                    emit_event(&mut std::io::stdout().lock(), event);
                }) => handoff,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(handoff) = handoff else {
                if let Some(event) = timer.reset() {
                    print_json(&event)?;
                }
                return Ok(());
            };

            match (concentration, mood, goal) {
                (Some(concentration), Some(mood), Some(goal_achieved)) => {
                    let review = SessionReview {
                        topic: handoff.topic,
                        concentration,
                        mood,
                        goal_achieved,
                    };
                    let outcome = engine
                        .complete_session(review, handoff.focused_minutes)
                        .await?;
                    print_json(&outcome.to_event())?;
                }
                _ => {
                    eprintln!(
                        "review with: neurolearn session complete --topic {:?} --minutes {} \
                         --concentration <1-5> --mood <mood> --goal <yes|no|not_yet>",
                        handoff.topic, handoff.focused_minutes
                    );
                }
            }
        }
    }
    Ok(())
}
