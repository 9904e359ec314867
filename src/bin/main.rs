// Main entry point for MoltMarkets agent setup

use anyhow::Result;
use moltmarkets_agent_setup::config::CliConfig;
use moltmarkets_agent_setup::setup::{next_steps, run_setup};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging (tracing to stderr, quiet unless RUST_LOG is set)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("✗ Setup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = <CliConfig as clap::Parser>::parse();
    let config = cli.resolve()?;
    info!(
        "🚀 Starting MoltMarkets agent setup | memory_dir={} | credentials={} | api_url={}",
        config.memory_dir.display(),
        config.credentials_path.display(),
        config.api_url
    );

    let summary = run_setup(&config).await?;
    info!(
        "Setup finished for {} | balance={} | created={} | skipped={}",
        summary.username,
        summary.user.balance,
        summary.files.created.len(),
        summary.files.skipped.len()
    );

    println!("\n✅ Setup complete!");
    println!("\nNext steps:");
    for step in next_steps(&config.memory_dir.display().to_string()) {
        println!("{}", step);
    }

    Ok(())
}
