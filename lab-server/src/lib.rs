//! vulnlab HTTP server
//!
//! Serves the command injection lab and the help/source disclosure pages on
//! top of `lab-engine`.

use thiserror::Error;
use tokio::net::TcpListener;

pub mod cli;
pub mod config;
pub mod health;
pub mod http;
pub mod logging;
pub mod pages;

pub use cli::Cli;
pub use config::{ConfigError, LabConfig};
pub use http::{build_router, AppState};
pub use logging::{init_logging, LoggingConfig};

/// Errors raised while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Lab engine error: {0}")]
    Engine(#[from] lab_engine::LabError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lab server bound to its configuration
pub struct LabServer {
    config: LabConfig,
}

impl LabServer {
    pub fn new(config: LabConfig) -> Self {
        Self { config }
    }

    /// Bind the configured address and serve until shutdown
    pub async fn start(&self) -> Result<(), ServerError> {
        let state = AppState::from_config(&self.config)?;
        let listener = TcpListener::bind(self.config.listen_address()).await?;
        http::serve(listener, state).await
    }
}
