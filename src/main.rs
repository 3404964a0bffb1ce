use anyhow::Context;
use clap::Parser;
use versioning_guard::config::cli::read_event_file;
use versioning_guard::utils::logger;
use versioning_guard::{replay, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting versioning-guard CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let payload = read_event_file(&cli.event)
        .with_context(|| format!("failed to load event from {}", cli.event))?;

    let config = cli.guard_config();
    if let Err(e) = &config {
        eprintln!("{}", e.user_friendly_message());
    }

    let outcome = replay(config, payload).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
