use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wg_cli::commands::{header, layout, show, util};
use wg_cli::{Cli, Commands, Config};

/// Load config, logging what was resolved.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Read the clock once so every date argument resolves against the same instant
    let now = Local::now().naive_local();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Header { date, today, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let reference = util::reference_or_now(date.as_deref(), now)?;
            let today = util::today_or_now(today.as_deref(), now)?;
            header::run(&mut stdout, reference, today, &config.week_config(), *json)?;
        }
        Some(Commands::Layout { date, events, json }) => {
            let config = load_config(cli.config.as_deref())?;
            let reference = util::reference_or_now(date.as_deref(), now)?;
            let events = util::load_events(events.as_deref().unwrap_or(config.events_path.as_path()))?;
            layout::run(&mut stdout, reference, &events, &config.week_config(), *json)?;
        }
        Some(Commands::Show {
            date,
            today,
            events,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let reference = util::reference_or_now(date.as_deref(), now)?;
            let today = util::today_or_now(today.as_deref(), now)?;
            let events = util::load_events(events.as_deref().unwrap_or(config.events_path.as_path()))?;
            show::run(
                &mut stdout,
                reference,
                today,
                &events,
                &config.week_config(),
                *json,
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
