//! ShareLink CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;
use sharelink_core::config::AppConfig;
use sharelink_core::config::logging::LoggingConfig;

/// Filter directives for the subscriber: an explicit `RUST_LOG` wins over
/// the configured level.
fn filter_directives(env_value: Option<String>, configured: &str) -> String {
    env_value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn init_tracing(logging: &LoggingConfig) {
    let directives = filter_directives(std::env::var("RUST_LOG").ok(), &logging.level);
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(directives));
    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A broken config file still surfaces through the command itself;
    // logging falls back to its defaults so the failure is visible.
    let logging = AppConfig::load(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
