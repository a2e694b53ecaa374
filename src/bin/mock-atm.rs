use std::fs::File;

use anyhow::{Context, Result};
use mock_atm::bin_utils::Service;
use mock_atm::config::BANK_NAME;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        // keep stdout free for the account report
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(bank = BANK_NAME, "running session script");

    let filename = std::env::args()
        .nth(1)
        .context("Expected a session script file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| eprintln!("Error at line {line}: {err}")),
    };
    service.run()
}
