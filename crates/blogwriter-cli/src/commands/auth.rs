use crate::app::App;
use anyhow::{Context, Result};
use blogwriter_core::identity::{Credentials, SignUpOutcome};
use clap::Args;
use colored::Colorize;

const PASSWORD_VAR: &str = "BLOGWRITER_PASSWORD";

#[derive(Args)]
pub struct CredentialArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password (falls back to BLOGWRITER_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,
}

impl CredentialArgs {
    fn into_credentials(self) -> Result<Credentials> {
        let password = match self.password.or_else(|| std::env::var(PASSWORD_VAR).ok()) {
            Some(password) => password,
            None => prompt_password()?,
        };
        Ok(Credentials::new(self.email.trim(), password))
    }
}

/// Reads the password from the terminal without echoing it.
fn prompt_password() -> Result<String> {
    rpassword::prompt_password("Password: ").context("Failed to read password")
}

pub async fn sign_up(app: &App, args: CredentialArgs) -> Result<()> {
    let credentials = args.into_credentials()?;

    match app.controller.sign_up(&credentials).await? {
        SignUpOutcome::SignedIn(session) => {
            let email = session.email().unwrap_or(&credentials.email);
            println!("{}", format!("Signed up and signed in as {}", email).green());
        }
        SignUpOutcome::ConfirmationRequired => {
            let state = app.controller.state().await;
            println!("{}", state.usage_message.yellow());
        }
    }
    Ok(())
}

pub async fn sign_in(app: &App, args: CredentialArgs) -> Result<()> {
    let credentials = args.into_credentials()?;
    let session = app.controller.sign_in(&credentials).await?;

    let email = session.email().unwrap_or(&credentials.email);
    println!("{}", format!("Signed in as {}", email).green());

    match app.controller.refresh_history().await {
        Ok(items) => println!("{} post(s) in history", items.len()),
        Err(e) => eprintln!("{}", format!("Warning: {}", e).yellow()),
    }
    Ok(())
}

pub async fn sign_out(app: &App) -> Result<()> {
    if !app.controller.is_signed_in() {
        println!("Not signed in");
        return Ok(());
    }
    app.controller.sign_out().await?;
    println!("{}", "Signed out".green());
    Ok(())
}
