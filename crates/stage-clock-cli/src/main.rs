//! Stage Clock
//!
//! A full-screen terminal clock, timer, countdown and stopwatch for stages
//! and presentations.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use stage_clock_core::countdown::TargetInput;
use stage_clock_core::customizer::TEMPLATES;
use stage_clock_core::format::parse_duration;
use stage_clock_core::timezone::TIMEZONES;
use stage_clock_core::{ClockError, Customizer, DisplayZone, Mode, StageClockConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod app;
mod event;
mod keymap;
mod terminal;
mod ticker;
mod ui;

use app::AppOptions;

#[derive(Parser)]
#[command(name = "stage-clock")]
#[command(version, about = "Full-screen clock, timer, countdown and stopwatch for the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the clock (the default)
    Run(RunArgs),
    /// List the template gallery
    Templates,
    /// List the suggested display timezones
    Timezones,
}

#[derive(Args)]
struct RunArgs {
    /// Mode to start in: clock, timer, countdown or stopwatch
    #[arg(long, value_parser = Mode::from_str)]
    mode: Option<Mode>,

    /// Timer duration, e.g. 5m, 1h30m, 90 or 05:00
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    timer: Option<u64>,

    /// Countdown target: HH:MM or "YYYY-MM-DD HH:MM"
    #[arg(long, value_name = "TIME", value_parser = parse_target)]
    target: Option<String>,

    /// Display timezone: local or an IANA name
    #[arg(long, value_name = "ZONE", value_parser = DisplayZone::parse)]
    timezone: Option<DisplayZone>,

    /// Start with a template from `stage-clock templates`
    #[arg(long, value_name = "NAME")]
    template: Option<String>,

    /// Use a 12-hour clock
    #[arg(long = "12h")]
    twelve_hour: bool,

    /// Ring the terminal bell when the timer or countdown finishes
    #[arg(long)]
    bell: bool,

    /// Config file (default: <config dir>/stage-clock/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (default: <cache dir>/stage-clock/stage-clock.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_target(input: &str) -> Result<String, ClockError> {
    TargetInput::parse(input)?;
    Ok(input.trim().to_string())
}

/// Send tracing output to a file; the terminal belongs to the UI.
fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let path = match log_file {
        Some(path) => path,
        None => dirs::cache_dir()
            .context("no cache directory on this platform; pass --log-file")?
            .join("stage-clock")
            .join("stage-clock.log"),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    Ok(())
}

/// Defaults, then the config file, then flags.
fn session_options(args: RunArgs) -> Result<AppOptions> {
    let mut config = StageClockConfig::load(args.config.as_deref()).context("failed to load config")?;
    let mut zone = config.zone().context("invalid timezone in config")?;

    if let Some(name) = &args.template {
        config.settings = Customizer::new()
            .apply_template(&config.settings, name)
            .context("see `stage-clock templates` for the gallery")?;
    }
    if args.twelve_hour {
        config.settings.is_24_hour = false;
    }
    if args.bell {
        config.bell_on_finish = true;
    }
    if let Some(seconds) = args.timer {
        config.timer_seconds = seconds;
    }
    if let Some(timezone) = args.timezone {
        zone = timezone;
    }
    match args.mode {
        Some(mode) => config.initial_mode = mode,
        // A target on the command line implies the countdown.
        None if args.target.is_some() => config.initial_mode = Mode::Countdown,
        None => {}
    }

    Ok(AppOptions {
        config,
        zone,
        initial_target: args.target,
    })
}

fn list_templates() {
    for template in TEMPLATES {
        println!(
            "{:<18} background {}  text {}  font {}",
            template.name, template.background, template.text, template.font
        );
    }
}

fn list_timezones() {
    println!("{:<20} local", "Local time");
    for (label, name) in TIMEZONES {
        println!("{label:<20} {name}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = match cli.command {
        Some(Commands::Templates) => {
            list_templates();
            return Ok(());
        }
        Some(Commands::Timezones) => {
            list_timezones();
            return Ok(());
        }
        Some(Commands::Run(args)) => args,
        None => cli.run,
    };

    init_tracing(args.log_file.clone())?;
    let options = session_options(args)?;
    app::run(options).await
}
