//! CLI definitions for JobPilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// JobPilot CLI.
#[derive(Parser)]
#[command(name = "jobpilot")]
#[command(about = "Browser automation for searching and applying to hh.ru vacancies")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP gateway in foreground (default)
    Serve {
        /// Server host
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Submit one application from the command line
    Apply {
        /// Vacancy page URL
        url: String,

        /// Cover letter text
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Search vacancies and print them as JSON
    Search {
        /// Search query (configured default when omitted)
        #[arg(short, long)]
        text: Option<String>,

        /// Zero-based result page
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },

    /// Log in interactively and save the session
    Login {
        /// How long to wait for the login to complete, in seconds
        #[arg(long, default_value_t = 900)]
        timeout: u64,
    },
}
