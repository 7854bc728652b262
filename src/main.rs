mod calc;
mod cmd;
mod data;
mod logging;
mod ui;

use crate::calc::ViewMode;
use crate::cmd::ViewOptions;
use crate::data::AppSettings;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schedcal", about = "month/week calendar with per-day schedule notes")]
struct Cli {
    /// Directory holding config.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Anchor date to open on (YYYY-MM-DD, default: today)
    #[arg(long, global = true, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// View mode to open in (overrides default_view from config)
    #[arg(long, global = true, value_enum)]
    view: Option<ViewMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write config.yaml with default settings
    Init,
    /// Print the days shown by a month or week view
    Days {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    calc::dates::parse_day_key(s)
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(logging::LogTarget::select(
        cli.log_file.as_deref(),
        cli.command.is_none(),
    ))?;

    // Resolve config_dir to an absolute path so file I/O is unaffected by
    // later directory changes.
    let config_dir = if cli.config_dir.is_absolute() {
        cli.config_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.config_dir)
    };
    data::persistence::set_config_dir(config_dir);

    let today = Local::now().date_naive();
    let settings = AppSettings::load()?;
    let opts = ViewOptions::resolve(&settings, cli.date, cli.view, today);

    match cli.command {
        None => cmd::root::run(&opts, today),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Days { json }) => cmd::days::run(&opts, today, json),
    }
}
