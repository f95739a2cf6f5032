mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::{Cli, OutputFormat};
use crate::error::{gateway_exit_code, CliError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.logging().init();

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::debug!(%error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let output = commands::run(cli).await?;

    match cli.format {
        OutputFormat::Json => output::write_json(&output.json, cli.pretty)?,
        OutputFormat::Table => output::write_text(&output.text)?,
    }

    Ok(match &output.failure {
        Some(failure) => ExitCode::from(gateway_exit_code(failure.kind())),
        None => ExitCode::SUCCESS,
    })
}
