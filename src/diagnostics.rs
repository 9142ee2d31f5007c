use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;

use crate::watch::engine::Watch;

/// Headless tick check: runs the engine against the real clock for a few
/// seconds and reports the refresh pacing and final display texts.
pub fn run_diagnostics(watch: &mut Watch, seconds: u16) -> Result<()> {
    println!("Deskwatch diagnostics");
    println!("Configured displays: {}", watch.displays().len());
    println!(
        "Hour format: {}",
        if watch.is_24_hour() { "24-hour" } else { "12-hour" }
    );
    println!("Current mode: {}", watch.mode().label());

    println!("Running {seconds} second tick check...");
    watch.start(Instant::now(), Local::now());
    let end = Instant::now() + Duration::from_secs(u64::from(seconds));
    let mut refreshes = 0;
    while Instant::now() < end {
        refreshes += watch.poll(Instant::now(), Local::now());
        thread::sleep(Duration::from_millis(20));
    }
    watch.stop();

    println!("Tick check summary:");
    println!("  Refresh passes: {refreshes}");
    for display in watch.displays() {
        println!("  {}", display.text());
    }
    Ok(())
}
