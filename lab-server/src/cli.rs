use crate::config::{ConfigError, LabConfig};
use clap::Parser;
use lab_common::SecurityLevel;
use std::path::PathBuf;

/// vulnlab - command injection and source disclosure teaching lab
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    pub bind_address: Option<String>,

    /// HTTP port
    #[arg(long)]
    pub http_port: Option<u16>,

    /// Directory containing vulnerabilities/<id>/{help,source}
    #[arg(long)]
    pub content_root: Option<PathBuf>,

    /// Security level used when a request does not name one
    #[arg(long)]
    pub security: Option<SecurityLevel>,

    /// Locale served from help.html
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Ping executable name or path
    #[arg(long)]
    pub ping_program: Option<String>,

    /// Number of echo requests per diagnostic
    #[arg(long)]
    pub ping_count: Option<u32>,

    /// Upper bound for one diagnostic run, in seconds
    #[arg(long)]
    pub ping_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON formatted logs
    #[arg(long)]
    pub log_json: bool,

    /// Also write logs to this file (rotated daily)
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied, validated
    pub fn load_config(&self) -> Result<LabConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => LabConfig::from_file(path)?,
            None => LabConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, mut config: LabConfig) -> LabConfig {
        if let Some(bind_address) = &self.bind_address {
            config.bind_address = bind_address.clone();
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(root) = &self.content_root {
            config.content_root = root.clone();
        }
        if let Some(level) = self.security {
            config.default_security = level;
        }
        if let Some(locale) = &self.default_locale {
            config.default_locale = locale.clone();
        }
        if let Some(program) = &self.ping_program {
            config.ping.program = program.clone();
        }
        if let Some(count) = self.ping_count {
            config.ping.count = count;
        }
        if let Some(timeout) = self.ping_timeout {
            config.ping.timeout_secs = timeout;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.log_json {
            config.logging.json_format = true;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.log_file = Some(log_file.clone());
        }
        config
    }
}
