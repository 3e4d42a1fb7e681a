use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> miette::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = cli.limits();
    let policy = cli.upload_policy();

    match &cli.command {
        Commands::Calculate { file, format, output } => {
            commands::calculate_file(file, &policy, &limits, (*format).into(), output.as_deref())?
        }
        Commands::Preview { file, lines } => {
            commands::preview_file(file, &policy, &limits, *lines)?
        }
        Commands::Api { input } => return commands::api(input.as_deref(), &limits),
        Commands::Transliterate { text } => commands::transliterate(text),
    }

    Ok(ExitCode::SUCCESS)
}
