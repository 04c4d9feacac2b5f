//! Discovery command: fetch swipe candidates from the server.

use clap::Args;

use super::OutputFormat;
use matchbook::api::ApiClient;

/// Fetch discovery candidates
#[derive(Args)]
pub struct DiscoverCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl DiscoverCommand {
    pub async fn run(&self, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
        let profiles = api.discover().await?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&profiles)?);
            }
            OutputFormat::Text => {
                if profiles.is_empty() {
                    println!("No candidates right now.");
                    return Ok(());
                }
                for profile in &profiles {
                    let age = profile
                        .age
                        .map(|a| format!(", {}", a))
                        .unwrap_or_default();
                    let headline = profile
                        .headline
                        .as_deref()
                        .map(|h| format!("  — {}", h))
                        .unwrap_or_default();
                    println!("{}  {}{}{}", profile.uid, profile.display_name, age, headline);
                }
            }
        }
        Ok(())
    }
}
