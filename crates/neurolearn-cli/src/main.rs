use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "neurolearn", version, about = "NeuroLearn focus session tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a focus countdown
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Commit a reviewed session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Experience points
    Xp {
        #[command(subcommand)]
        action: commands::xp::XpAction,
    },
    /// Daily streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Session history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Session statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stored data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Learning assistant
    Assist {
        #[command(subcommand)]
        action: commands::assist::AssistAction,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("NEUROLEARN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Focus { action } => commands::focus::run(action).await,
        Commands::Session { action } => commands::session::run(action).await,
        Commands::Xp { action } => commands::xp::run(action).await,
        Commands::Streak { action } => commands::streak::run(action).await,
        Commands::History { action } => commands::history::run(action).await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action).await,
        Commands::Assist { action } => commands::assist::run(action).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
