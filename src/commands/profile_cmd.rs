//! Profile extras commands.

use clap::{Args, Subcommand};

use super::OutputFormat;
use matchbook::models::ProfileExtrasUpdate;
use matchbook::store::SocialStore;

/// Show or edit profile extras
#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand)]
enum ProfileSubcommand {
    /// Show profile extras
    Show {
        /// User id (defaults to the logged-in user)
        uid: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Set profile extras (only provided fields change)
    Set {
        /// Short headline shown on your card
        #[arg(long)]
        headline: Option<String>,

        /// Longer free-form bio
        #[arg(long)]
        about: Option<String>,

        /// ZIP code
        #[arg(long)]
        zip: Option<String>,
    },
}

impl ProfileCommand {
    pub fn run(&self, store: &SocialStore, me: &str) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { uid, format } => {
                let uid = uid.as_deref().unwrap_or(me);
                let extras = store.profile_extras(uid);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&extras)?);
                    }
                    OutputFormat::Text => {
                        println!("headline: {}", extras.headline.as_deref().unwrap_or("(unset)"));
                        println!("about:    {}", extras.about.as_deref().unwrap_or("(unset)"));
                        println!("zip:      {}", extras.zip.as_deref().unwrap_or("(unset)"));
                    }
                }
            }
            ProfileSubcommand::Set {
                headline,
                about,
                zip,
            } => {
                let merged = store.set_profile_extras(
                    me,
                    ProfileExtrasUpdate {
                        headline: headline.clone(),
                        about: about.clone(),
                        zip: zip.clone(),
                    },
                );
                println!("Profile updated.");
                println!("headline: {}", merged.headline.as_deref().unwrap_or("(unset)"));
                println!("about:    {}", merged.about.as_deref().unwrap_or("(unset)"));
                println!("zip:      {}", merged.zip.as_deref().unwrap_or("(unset)"));
            }
        }
        Ok(())
    }
}
