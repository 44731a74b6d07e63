use anyhow::Context;
use clap::Parser;
use lab_server::{init_logging, Cli, LabServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config().context("Failed to load configuration")?;

    // held for the life of the process so buffered file logs are flushed
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        content_root = %config.content_root.display(),
        default_security = %config.default_security,
        ping_program = %config.ping.program,
        "vulnlab starting"
    );

    println!("🚀 vulnlab starting...");
    println!("🌐 Lab available at: http://{}", config.listen_address());
    println!("📁 Content root: {}", config.content_root.display());
    println!();
    println!("💡 Tip: Use --help to see all available options");
    println!();

    LabServer::new(config)
        .start()
        .await
        .context("Lab server failed")?;

    Ok(())
}
