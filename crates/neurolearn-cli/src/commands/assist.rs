use clap::Subcommand;
use neurolearn_core::assistant::{self, keyring_store, AssistantClient, API_KEY_ENTRY};

use super::{open_engine, CliResult};

#[derive(Subcommand)]
pub enum AssistAction {
    /// Ask the learning assistant a question
    Ask {
        question: String,
    },
    /// Print the prompt that would be sent, without calling the API
    Prompt {
        question: String,
    },
    /// Store the API key in the OS keyring
    SetKey {
        key: String,
    },
    /// Remove the stored API key
    ClearKey,
}

pub async fn run(action: AssistAction) -> CliResult {
    match action {
        AssistAction::Ask { question } => {
            let engine = open_engine()?;
            let prompt = prompt_for(&engine, &question).await?;
            let client = AssistantClient::from_config(&engine.config().assistant)?;
            println!("{}", client.ask(&prompt).await?);
        }
        AssistAction::Prompt { question } => {
            let engine = open_engine()?;
            println!("{}", prompt_for(&engine, &question).await?);
        }
        AssistAction::SetKey { key } => {
            keyring_store::set(API_KEY_ENTRY, key.trim())?;
            println!("api key stored");
        }
        AssistAction::ClearKey => {
            keyring_store::delete(API_KEY_ENTRY)?;
            println!("api key removed");
        }
    }
    Ok(())
}

async fn prompt_for(engine: &neurolearn_core::ProgressEngine, question: &str) -> CliResult<String> {
    let history = engine.get_session_history().await?;
    let context = assistant::session_context(&history, engine.config().assistant.recent_sessions);
    Ok(assistant::build_prompt(&context, question))
}
