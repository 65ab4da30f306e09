// ABOUTME: Entry point for the elastic-package CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;
use elastic_package::error::Result;
use elastic_package::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output_mode());
    let result = run(cli, &output).await;

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Stack(command) => {
            let ctx = Context::new(cli.verbose)?;
            commands::stack(&ctx, command, output).await
        }
        Commands::Profiles(command) => {
            let ctx = Context::new(cli.verbose)?;
            commands::profiles(&ctx, command, output)
        }
        Commands::Query(command) => commands::query(command, output),
    }
}
