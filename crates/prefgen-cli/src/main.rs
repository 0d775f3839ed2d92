//! prefgen CLI - Checker and code generator for preference declarations
//!
//! Commands:
//! - `prefgen check` - Validate a declaration source and print its diagnostics
//! - `prefgen generate` - Generate the preference accessors as a Rust source file

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod check;
mod generate;

#[derive(Parser)]
#[command(name = "prefgen")]
#[command(author, version, about = "Typed preference accessors from a TOML declaration", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a declaration source
    Check {
        /// Path to the declaration source
        #[arg(short, long)]
        input: PathBuf,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate Rust source from a declaration source
    Generate {
        /// Path to the declaration source
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the generated Rust source
        #[arg(short, long)]
        output: PathBuf,

        /// Write the raw token stream instead of pretty-printed code
        #[arg(long)]
        no_format: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { input, json } => {
            check::run(&input, json)?;
        }
        Commands::Generate {
            input,
            output,
            no_format,
        } => {
            generate::run(&input, &output, !no_format)?;
        }
    }

    Ok(())
}
