//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "taxrelay")]
#[command(about = "Tax-filing questionnaire risk analysis relay")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind: port, host, or host:port
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// Analyze a questionnaire once and print the result as JSON
    Analyze {
        /// JSON file holding the answers object
        answers: PathBuf,
        /// Salary slip (PDF, PNG or JPEG)
        #[arg(long)]
        salary_slip: Option<PathBuf>,
        /// Form 26AS (PDF, PNG or JPEG)
        #[arg(long)]
        form26as: Option<PathBuf>,
    },

    /// Show which providers are configured
    Status,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Analyze {
            answers,
            salary_slip,
            form26as,
        } => {
            analyze::cmd_analyze(
                &settings,
                &answers,
                salary_slip.as_deref(),
                form26as.as_deref(),
            )
            .await
        }
        Commands::Status => status::cmd_status(&settings),
    }
}
