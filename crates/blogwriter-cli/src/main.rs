use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod logging;

use app::App;

#[derive(Parser)]
#[command(name = "blogwriter")]
#[command(about = "Blog Writer - generate SEO blog posts from a keyword", long_about = None)]
struct Cli {
    /// Directory holding config.toml, session.toml and logs (default: ~/.config/blogwriter)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Writer(WriterCommand),
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that talk to the identity provider or the backend.
#[derive(Subcommand)]
enum WriterCommand {
    /// Create an account with email and password
    Signup(commands::auth::CredentialArgs),
    /// Sign in and keep the session for later commands
    Signin(commands::auth::CredentialArgs),
    /// Sign out and forget the local session
    Signout,
    /// Generate a blog post for a keyword
    Generate(commands::generate::GenerateArgs),
    /// List previously generated posts, in server order
    History {
        /// Print the raw items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the generation backend is reachable
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Print the config file path
    Path,
    /// Set a value in config.toml
    Set {
        /// One of: api_base_url, identity.url, identity.anon_key, log_level, request_timeout_secs
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        // Config commands must work even when the configuration is incomplete.
        Commands::Config { action } => {
            let paths = app::paths(config_dir);
            match action {
                ConfigAction::Show => commands::config::show(&paths)?,
                ConfigAction::Path => commands::config::path(&paths)?,
                ConfigAction::Set { key, value } => commands::config::set(&paths, &key, &value)?,
            }
        }
        Commands::Writer(command) => {
            let app = App::init(config_dir).await?;
            run(&app, command).await?;
        }
    }

    Ok(())
}

async fn run(app: &App, command: WriterCommand) -> Result<()> {
    match command {
        WriterCommand::Signup(args) => commands::auth::sign_up(app, args).await,
        WriterCommand::Signin(args) => commands::auth::sign_in(app, args).await,
        WriterCommand::Signout => commands::auth::sign_out(app).await,
        WriterCommand::Generate(args) => commands::generate::run(app, args).await,
        WriterCommand::History { json } => commands::history::run(app, json).await,
        WriterCommand::Status => commands::status::run(app).await,
    }
}
