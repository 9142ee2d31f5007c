mod config;
mod diagnostics;
mod ui;
mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use crate::config::load_watch_config;
use crate::watch::display::HourFormat;
use crate::watch::engine::Watch;

#[derive(Parser, Debug)]
#[command(
    name = "deskwatch",
    version,
    about = "Multi-timezone desk watch with alarm and stopwatch modes"
)]
struct Cli {
    #[arg(long, default_value = "watch.json")]
    config: PathBuf,

    #[arg(long)]
    diagnostics: bool,

    #[arg(long, default_value_t = 3)]
    tick_check_secs: u16,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_watch_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let format = if config.use_24h {
        HourFormat::Hour24
    } else {
        HourFormat::Hour12
    };
    let mut watch = Watch::new(format);
    let now = Local::now();
    for spec in &config.clocks {
        watch
            .add_clock(spec, now)
            .with_context(|| format!("failed to add clock from {}", cli.config.display()))?;
    }

    if cli.diagnostics {
        return diagnostics::run_diagnostics(&mut watch, cli.tick_check_secs);
    }

    ui::app::run_gui(watch, config, cli.config)
}
