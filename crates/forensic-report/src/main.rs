use std::fs;

use analysis_orchestrator::{AnalysisConfig, AnalysisInput, Orchestrator};
use anyhow::{Context, Result};

mod summary;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    let show_summary = args.iter().any(|a| a == "--summary");
    let strategy_override = args
        .iter()
        .position(|a| a == "--strategy")
        .and_then(|i| args.get(i + 1));
    let path = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, a)| !a.starts_with("--") && args[*i - 1] != "--strategy")
        .map(|(_, a)| a.as_str())
        .context("usage: forensic-report <snapshot.json> [--strategy growth|value] [--summary]")?;

    let mut config = AnalysisConfig::from_env().context("Invalid analysis configuration")?;
    if let Some(strategy) = strategy_override {
        config.strategy = strategy
            .parse()
            .with_context(|| format!("Invalid --strategy value: {strategy}"))?;
    }
    tracing::debug!("Analysis config: {:?}", config);

    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let input: AnalysisInput =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse snapshot {path}"))?;

    let result = Orchestrator::new(config).analyze(&input);

    if show_summary {
        print!("{}", summary::render(&result));
    } else {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{json}");
    }

    Ok(())
}
