//! Local state reset.

use clap::Args;
use std::io::{self, Write};

use matchbook::store::SocialStore;

/// Wipe the local social state
#[derive(Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl ResetCommand {
    pub fn run(&self, store: &SocialStore) -> Result<(), Box<dyn std::error::Error>> {
        if !self.force {
            print!("This wipes all local likes, matches and messages. Continue? [y/N] ");
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                println!("Aborted.");
                return Ok(());
            }
        }

        store.reset_all();
        println!("Local social state cleared.");
        Ok(())
    }
}
