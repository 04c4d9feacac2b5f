use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{
    current_uid, AuthCommand, BadgesCommand, ChatCommand, ConfigCommand, DiscoverCommand,
    LikeCommand, MatchesCommand, PassCommand, ProfileCommand, ResetCommand,
};
use matchbook::api::ApiClient;
use matchbook::config::Config;
use matchbook::session::SessionStore;
use matchbook::store::{FileBackend, SocialStore};

#[derive(Parser)]
#[command(name = "matchbook")]
#[command(version)]
#[command(about = "A dating app prototype client", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, log out, or show session status
    Auth(AuthCommand),

    /// Like a user
    Like(LikeCommand),

    /// Pass on a user
    Pass(PassCommand),

    /// List your matches
    Matches(MatchesCommand),

    /// Read or send chat messages
    Chat(ChatCommand),

    /// Show unseen-activity counters
    Badges(BadgesCommand),

    /// Fetch discovery candidates from the server
    Discover(DiscoverCommand),

    /// Show or edit profile extras
    Profile(ProfileCommand),

    /// Wipe the local social state
    Reset(ResetCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchbook=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    let session = SessionStore::new(config.data_dir.clone());
    let store = SocialStore::new(Box::new(FileBackend::new(config.state_path())));

    match cli.command {
        Some(Commands::Auth(cmd)) => {
            cmd.run(&config, &session).await?;
        }
        Some(Commands::Like(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me);
        }
        Some(Commands::Pass(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me);
        }
        Some(Commands::Matches(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me)?;
        }
        Some(Commands::Chat(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me)?;
        }
        Some(Commands::Badges(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me)?;
        }
        Some(Commands::Discover(cmd)) => {
            let api = ApiClient::new(config.server_url.as_str(), session.load_token()?);
            cmd.run(&api).await?;
        }
        Some(Commands::Profile(cmd)) => {
            let me = current_uid(&session)?;
            cmd.run(&store, &me)?;
        }
        Some(Commands::Reset(cmd)) => {
            cmd.run(&store)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
