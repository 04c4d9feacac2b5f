//! Chat thread commands.

use clap::{Args, Subcommand};

use super::OutputFormat;
use matchbook::store::SocialStore;

/// Read or send chat messages
#[derive(Args)]
pub struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Subcommand)]
enum ChatSubcommand {
    /// Show a thread and clear its unread counter
    Show {
        /// Match id
        match_id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Send a message in a thread
    Send {
        /// Match id
        match_id: String,

        /// Message text
        text: String,

        /// Recipient uid (required when the match is unknown locally)
        #[arg(long)]
        to: Option<String>,
    },
}

impl ChatCommand {
    pub fn run(&self, store: &SocialStore, me: &str) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ChatSubcommand::Show { match_id, format } => {
                let messages = store.messages(match_id);
                store.clear_unread_for_match(me, match_id);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&messages)?);
                    }
                    OutputFormat::Text => {
                        if messages.is_empty() {
                            println!("No messages yet.");
                            return Ok(());
                        }
                        for msg in &messages {
                            let who = if msg.from == me { "me" } else { msg.from.as_str() };
                            println!(
                                "[{}] {}: {}",
                                msg.created_at.format("%Y-%m-%d %H:%M"),
                                who,
                                msg.text
                            );
                        }
                    }
                }
            }
            ChatSubcommand::Send { match_id, text, to } => {
                let recipient = match to {
                    Some(uid) => uid.clone(),
                    None => store
                        .find_match(match_id)
                        .and_then(|m| m.other(me).map(String::from))
                        .ok_or("unknown match; pass --to to address the recipient directly")?,
                };
                let message = store.send_message(match_id, me, &recipient, text);
                println!("Sent {} to {}.", message.id, recipient);
            }
        }
        Ok(())
    }
}
