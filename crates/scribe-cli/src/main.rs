//! scribe CLI - Inspect scribe logs and level rules
//!
//! Commands:
//! - `scribe read` - Decode a binary log (`.blog`) into text lines
//! - `scribe check` - Parse a level rule string and report problems

use clap::{Parser, Subcommand};
use scribe_core::Severity;

mod check;
mod read;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(author, version, about = "Tools for scribe logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a binary log file
    Read {
        /// Path to the `.blog` file
        file: String,

        /// Only show events at or above this severity
        #[arg(short, long, default_value = "trace")]
        level: Severity,

        /// Print one JSON object per event instead of text lines
        #[arg(long)]
        json: bool,
    },

    /// Validate a level rule string
    Check {
        /// Rules to check (default: the SCRIBE_LOG_LEVELS environment variable)
        rules: Option<String>,

        /// Program name used to show fully-qualified matches
        #[arg(short, long)]
        program: Option<String>,

        /// Logger names to resolve against the rules
        #[arg(short, long = "resolve")]
        names: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Read { file, level, json } => {
            read::run(&file, level, json)?;
        }
        Commands::Check {
            rules,
            program,
            names,
        } => {
            check::run(rules, program, &names)?;
        }
    }

    Ok(())
}
