//! Match listing and badge counters.

use clap::Args;

use super::OutputFormat;
use matchbook::store::SocialStore;

/// List your matches, most recently active first
#[derive(Args)]
pub struct MatchesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl MatchesCommand {
    pub fn run(&self, store: &SocialStore, me: &str) -> Result<(), Box<dyn std::error::Error>> {
        let matches = store.matches_for(me);
        // Viewing the list marks the new-match badge as seen.
        store.clear_new_matches(me);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            }
            OutputFormat::Text => {
                if matches.is_empty() {
                    println!("No matches yet.");
                    return Ok(());
                }
                for m in &matches {
                    let other = m.other(me).unwrap_or("?");
                    let preview = m.last_message_text.as_deref().unwrap_or("(no messages)");
                    println!("{}  {}  {}", m.id, other, preview);
                }
            }
        }
        Ok(())
    }
}

/// Show unseen-activity counters
#[derive(Args)]
pub struct BadgesCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl BadgesCommand {
    pub fn run(&self, store: &SocialStore, me: &str) -> Result<(), Box<dyn std::error::Error>> {
        let badges = store.badges(me);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&badges)?);
            }
            OutputFormat::Text => {
                println!("New matches:     {}", badges.matches);
                println!("Unread messages: {}", badges.messages);
                println!("Total:           {}", badges.total);
            }
        }
        Ok(())
    }
}
