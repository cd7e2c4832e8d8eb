//! mbutil CLI - Command-line interface for the multiboot utilities

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "mbutil")]
#[command(about = "Multiboot utilities: installer generation and ROM wipes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the mbutil CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    // Malformed invocations exit 1, not clap's default 2; --help/--version
    // still print to stdout and exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            std::process::exit(i32::from(err.use_stderr()));
        }
    };
    cli.command.execute()?;

    Ok(())
}
