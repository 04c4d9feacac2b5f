//! CLI command implementations.

mod auth;
mod chat;
mod config_cmd;
mod discover;
mod matches_cmd;
mod profile_cmd;
mod reset;
mod swipe;

use clap::ValueEnum;

use matchbook::session::{resolve_user_id, SessionStore};

pub use auth::AuthCommand;
pub use chat::ChatCommand;
pub use config_cmd::ConfigCommand;
pub use discover::DiscoverCommand;
pub use matches_cmd::{BadgesCommand, MatchesCommand};
pub use profile_cmd::ProfileCommand;
pub use reset::ResetCommand;
pub use swipe::{LikeCommand, PassCommand};

/// Output format shared by listing commands.
#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolves the logged-in uid from the stored session token.
pub fn current_uid(session: &SessionStore) -> Result<String, Box<dyn std::error::Error>> {
    let token = session
        .load_token()?
        .ok_or("not logged in; run 'matchbook auth login' first")?;
    Ok(resolve_user_id(&token))
}
