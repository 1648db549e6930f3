use crate::app::App;
use anyhow::{Context, Result, bail};
use blogwriter_core::generation::{DEFAULT_LENGTH, DEFAULT_TONE};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Target keyword for the post
    pub keyword: String,

    /// Writing tone
    #[arg(long, default_value = DEFAULT_TONE)]
    pub tone: String,

    /// Target length in characters (500-5000)
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    pub length: u32,

    /// Write the markdown to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(app: &App, args: GenerateArgs) -> Result<()> {
    let GenerateArgs {
        keyword,
        tone,
        length,
        output,
    } = args;

    app.controller
        .edit(|state| {
            state.keyword = keyword;
            state.tone = tone;
            state.length = length;
        })
        .await;

    eprintln!("{}", "Generating...".dimmed());
    let Some(result) = app.controller.generate().await? else {
        bail!("Keyword is required");
    };

    match &output {
        Some(path) => {
            std::fs::write(path, &result.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", format!("Saved to {}", path.display()).green());
        }
        None => println!("{}", result.content),
    }

    let state = app.controller.state().await;
    eprintln!("{}", state.usage_message.cyan());
    // Generation succeeded; a failed history refresh is only a warning.
    if let Some(error) = &state.error {
        eprintln!("{}", format!("Warning: {}", error).yellow());
    }
    Ok(())
}
