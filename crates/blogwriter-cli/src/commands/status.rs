use crate::app::App;
use anyhow::Result;
use blogwriter_core::WriterError;
use blogwriter_core::generation::BackendHealth;
use blogwriter_core::session::SessionSource;
use colored::Colorize;

pub async fn run(app: &App) -> Result<()> {
    let config = &app.config;

    println!(
        "API base URL:      {}",
        config.api_base_url().unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "Identity provider: {}",
        config.identity_url().unwrap_or_else(|| "(not set)".to_string())
    );

    let session = app.controller.sessions().current_session();
    match session.as_ref() {
        Some(session) => println!(
            "Signed in:         {}",
            session.email().unwrap_or("(unknown email)")
        ),
        None => println!("Signed in:         no"),
    }

    let health = app.controller.check_health().await;
    println!("Backend:           {}", backend_status(&health));
    health?;
    Ok(())
}

/// Describes the health check result. Only transport failures read as unreachable.
fn backend_status(health: &blogwriter_core::Result<BackendHealth>) -> String {
    match health {
        Ok(health) if health.is_ok() => "ok".green().to_string(),
        Ok(health) => health.status.yellow().to_string(),
        Err(e @ WriterError::Transport { .. }) => format!("unreachable ({})", e.user_message())
            .red()
            .to_string(),
        Err(e) => e.user_message().red().to_string(),
    }
}
