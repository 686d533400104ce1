use anyhow::Result;
use clap::Parser;
use quarry_cli::cli::Cli;
use quarry_cli::{commands, telemetry};
use quarry_core::config::Config;
use quarry_rs::{Client, SearchError};
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(search_err) = e.downcast_ref::<SearchError>() {
                if !search_err.body().is_null() {
                    let body = serde_json::to_string_pretty(search_err.body())
                        .unwrap_or_else(|_| search_err.body().to_string());
                    eprintln!("{}", body);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let loaded = Config::load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }

    let _guard = telemetry::init_telemetry(&config.logging)?;

    if let Err(e) = &loaded {
        if Path::new(&cli.config).exists() {
            tracing::warn!("{:#}, using defaults", e);
        } else {
            tracing::debug!("No {} found, using defaults", cli.config);
        }
    }
    tracing::debug!("  Host: {}", config.host);
    tracing::debug!(
        "  Timeouts: connect={}s, request={}s",
        config.transport.connect_timeout_secs,
        config.transport.request_timeout_secs
    );

    let client = Client::from_config(&config)?;
    let result = commands::run(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
