// trainset CLI - scheduled training-set assembly
// Intended to run from cron/CI right before the model-fitting step

mod assemble;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trainset")]
#[command(about = "Assemble deduplicated appointment-duration training sets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one assembly pass from a TOML config file
    #[command(after_help = "\
Examples:
  trainset run weekly.toml
  trainset run weekly.toml --json
  trainset run weekly.toml --output training-set.json
  trainset run weekly.toml --include-used --json

Exit code 5 means the assembled set is below min_samples and the
scheduler should skip the training step this cycle.")]
    Run {
        /// Path to the assembly config file
        config: PathBuf,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also keep export entries already marked used_for_training
        #[arg(long)]
        include_used: bool,
    },

    /// Validate an assembly config without loading any batches
    #[command(after_help = "\
Examples:
  trainset validate weekly.toml")]
    Validate {
        /// Path to the assembly config file
        config: PathBuf,
    },
}

/// CLI-level error: an exit code plus what to print on stderr.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            include_used,
        } => assemble::cmd_run(config, json, output, include_used),
        Commands::Validate { config } => assemble::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
