use std::io::Read;

use datastream_cli::{CliConfig, CliError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configure logging from env var `DATASTREAM_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("DATASTREAM_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("datastream_cli: log filter: {}", log_env);

    let source = std::env::args().nth(1).ok_or_else(|| {
        CliError::Usage("datastream-cli <workout.json | - | --catalog>".into())
    })?;
    let config = CliConfig::from_env()?;

    if source == "--catalog" {
        let catalog = datastream_cli::show_catalog(&config).await?;
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let submission = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        tokio::fs::read_to_string(&source).await?
    };
    let view = datastream_cli::run(&config, &submission).await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
