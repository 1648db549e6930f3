//! Wiring for one CLI invocation.

use crate::logging;
use anyhow::{Context, Result};
use blogwriter_application::{GenerationWorkflow, SessionHub, WriterController};
use blogwriter_core::config::ClientConfig;
use blogwriter_core::generation::GenerationBackend;
use blogwriter_core::identity::IdentityProvider;
use blogwriter_infrastructure::{ConfigService, FileSessionStore, WriterPaths};
use blogwriter_interaction::{GoTrueIdentityProvider, HttpGenerationBackend};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

pub fn paths(config_dir: Option<&Path>) -> WriterPaths {
    WriterPaths::new(config_dir)
}

pub struct App {
    pub config: ClientConfig,
    pub controller: WriterController,
    // Flushes the log file on drop.
    _log_guard: Option<WorkerGuard>,
}

impl App {
    /// Loads configuration, installs logging and restores the saved session.
    pub async fn init(config_dir: Option<&Path>) -> Result<Self> {
        let paths = paths(config_dir);
        let config = ConfigService::new(paths.clone())
            .get_config()
            .context("Failed to load configuration")?;

        let log_guard = logging::init(config.log_level.as_deref(), paths.logs_dir().ok().as_deref());

        let store = FileSessionStore::new(&paths).context("Failed to locate session file")?;
        let sessions = Arc::new(SessionHub::with_store(Arc::new(store)).await);

        let backend = HttpGenerationBackend::from_config(&config)
            .map(|backend| Arc::new(backend) as Arc<dyn GenerationBackend>);
        if backend.is_none() {
            tracing::debug!("No API base URL configured");
        }

        let identity = match GoTrueIdentityProvider::from_config(&config) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn IdentityProvider>),
            Err(e) => {
                tracing::debug!(error = %e, "Identity provider unavailable");
                None
            }
        };

        let controller = WriterController::new(GenerationWorkflow::new(backend), identity, sessions);

        Ok(Self {
            config,
            controller,
            _log_guard: log_guard,
        })
    }
}
