use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use hdock_common::observability::{LogConfig, LogFormat, init_logging};
use hdock_compile::{CompileOptions, Compiler};
use hdock_config::{HdockConfig, HdockConfigLoader};
use hdock_http::{ClientOptions, HttpClient};

use cli::{Cli, DEFAULT_CONFIG_FILE};
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.input.is_file() {
        Cli::command()
            .error(
                ErrorKind::InvalidValue,
                format!("input file not found: {}", cli.input.display()),
            )
            .exit();
    }

    // 1) Settings: defaults < YAML < HDOCK_* env
    let loader = match &cli.config {
        Some(path) => HdockConfigLoader::new().with_file(path),
        None => HdockConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let cfg: HdockConfig = loader.load().context("failed to load settings")?;

    // 2) Logging
    let log_path = init_logging(LogConfig {
        log_dir: cli.log_dir.clone(),
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;
    tracing::debug!(log_file = %log_path.display(), ?cfg, "app.start");

    // 3) Compile
    let client = HttpClient::new(ClientOptions {
        user_agent: cfg.http.user_agent.clone(),
        timeout: cfg.http.timeout(),
        connect_timeout: cfg.http.connect_timeout(),
    })
    .context("failed to build HTTP client")?;
    let compiler = Compiler::new(
        client,
        CompileOptions {
            pause: cfg.compile.pause(),
            sheet_name: cfg.compile.sheet_name.clone(),
        },
    );

    let summary = compiler.compile(&cli.input, &cli.output).await?;
    tracing::info!(
        output = %cli.output.display(),
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped_lines = summary.skipped.len(),
        "app.done"
    );
    Ok(())
}
