//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Week-grid calendar layout.
///
/// Computes the day headers of a week and packs events into non-overlapping
/// rows, the way a week view draws them.
#[derive(Debug, Parser)]
#[command(name = "wg", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the seven day headers of a week.
    Header {
        /// Any date in the week to show (e.g. 2016-06-28, "1 week ago"). Defaults to now.
        #[arg(long)]
        date: Option<String>,

        /// Date that counts as today for past/future flags. Defaults to the current date.
        #[arg(long)]
        today: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Pack a week's events into rows.
    Layout {
        /// Any date in the week to show. Defaults to now.
        #[arg(long)]
        date: Option<String>,

        /// JSON file with an array of events (`-` for stdin). Defaults to the configured path.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show headers and rows together.
    Show {
        /// Any date in the week to show. Defaults to now.
        #[arg(long)]
        date: Option<String>,

        /// Date that counts as today for past/future flags. Defaults to the current date.
        #[arg(long)]
        today: Option<String>,

        /// JSON file with an array of events (`-` for stdin). Defaults to the configured path.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
