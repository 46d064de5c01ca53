//! romtag CLI - keep archive labels in sync with an emulator catalog

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod runlog;

use cli::Cli;
use commands::common::ExitCode;
use commands::{build, clean, show, tag};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::ExitCode::from(code.0),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = context::load_config(&cli.global)?;
    runlog::install(&config.log_file, cli.global.verbose)?;

    match &cli.command {
        cli::Commands::Build(args) => build::execute(args, &cli.global, config).await,
        cli::Commands::Tag(args) => tag::execute(args, &cli.global, config).await,
        cli::Commands::Show(args) => show::execute(args, &cli.global, config).await,
        cli::Commands::Clean(args) => clean::execute(args, &config).await,
    }
}
