//! Authentication commands for the Matchbook CLI.
//!
//! Provides login (one-time passcode over email), logout, and status.

use clap::{Args, Subcommand};
use std::io::{self, Write};

use matchbook::api::{ApiClient, ApiError};
use matchbook::config::Config;
use matchbook::session::{resolve_user_id, SessionError, SessionStore};

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Log in with a one-time passcode sent to your email
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out (remove the stored session token)
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub async fn run(&self, config: &Config, session: &SessionStore) -> Result<(), AuthError> {
        match &self.command {
            AuthSubcommand::Login { email } => login(config, session, email.clone()).await,
            AuthSubcommand::Logout => logout(session),
            AuthSubcommand::Status => status(session),
        }
    }
}

/// Errors that can occur during authentication
#[derive(Debug)]
pub enum AuthError {
    /// I/O error
    IoError(io::Error),
    /// Request to the backend failed
    Api(ApiError),
    /// Session token could not be persisted
    Session(SessionError),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::IoError(e) => write!(f, "I/O error: {}", e),
            AuthError::Api(e) => write!(f, "{}", e),
            AuthError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<io::Error> for AuthError {
    fn from(e: io::Error) -> Self {
        AuthError::IoError(e)
    }
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        AuthError::Api(e)
    }
}

impl From<SessionError> for AuthError {
    fn from(e: SessionError) -> Self {
        AuthError::Session(e)
    }
}

/// Interactive login flow
async fn login(
    config: &Config,
    session: &SessionStore,
    email: Option<String>,
) -> Result<(), AuthError> {
    let email = match email {
        Some(email) => email,
        None => prompt("Enter your email: ")?,
    };
    if email.is_empty() {
        return Err(AuthError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Email cannot be empty",
        )));
    }

    let client = ApiClient::new(config.server_url.as_str(), None);
    client.request_code(&email).await?;
    println!("Passcode sent to {}. Check your inbox.", email);

    let code = prompt("Enter the passcode: ")?;
    let token = client.verify_code(&email, &code).await?;
    session.save_token(&token)?;

    println!("Logged in as {}", resolve_user_id(&token));
    Ok(())
}

fn logout(session: &SessionStore) -> Result<(), AuthError> {
    session.clear_token()?;
    println!("Logged out.");
    Ok(())
}

fn status(session: &SessionStore) -> Result<(), AuthError> {
    match session.load_token()? {
        Some(token) => {
            // Mask the token for display
            let masked = if token.len() > 8 {
                format!("{}...{}", &token[..4], &token[token.len() - 4..])
            } else {
                "****".to_string()
            };
            println!("Logged in as {} (token: {})", resolve_user_id(&token), masked);
        }
        None => {
            println!("Not logged in. Run 'matchbook auth login' to authenticate.");
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
