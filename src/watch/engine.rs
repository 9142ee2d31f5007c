use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Timelike};
use thiserror::Error;

use crate::watch::display::{ClockDisplay, DisplayId, HourFormat, parse_offset_hours};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Upper bound on catch-up refreshes per poll after a stall.
const MAX_TICKS_PER_POLL: u32 = 60;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("invalid timezone offset '{0}', expected GMT+N or GMT-N")]
    InvalidOffsetFormat(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Time,
    Alarm,
    Stopwatch,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Mode::Time => Mode::Alarm,
            Mode::Alarm => Mode::Stopwatch,
            Mode::Stopwatch => Mode::Time,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Time => "time",
            Mode::Alarm => "alarm",
            Mode::Stopwatch => "stopwatch",
        }
    }
}

/// Process-wide alarm setting. Hours stay in 0..24.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct AlarmTime {
    pub hours: u32,
    pub minutes: u32,
}

impl AlarmTime {
    fn advance(&mut self) {
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
            self.hours += 1;
            if self.hours >= 24 {
                self.hours = 0;
            }
        }
    }
}

/// Process-wide stopwatch accumulator. Hours are unbounded.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StopwatchTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl StopwatchTime {
    fn advance(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes >= 60 {
                self.minutes = 0;
                self.hours += 1;
            }
        }
    }
}

/// The watch engine: display collection, shared mode state machine,
/// alarm/stopwatch accumulators and the 1-second tick pacer. All operations
/// are synchronous; the UI layer drives `poll` from its own loop.
pub struct Watch {
    displays: Vec<ClockDisplay>,
    mode: Mode,
    alarm: AlarmTime,
    stopwatch: StopwatchTime,
    format: HourFormat,
    running: bool,
    next_tick: Instant,
}

impl Watch {
    /// A watch always carries one default display at offset 0.
    pub fn new(format: HourFormat) -> Self {
        Self {
            displays: vec![ClockDisplay::new(DisplayId(0), "Local", format)],
            mode: Mode::Time,
            alarm: AlarmTime::default(),
            stopwatch: StopwatchTime::default(),
            format,
            running: false,
            next_tick: Instant::now(),
        }
    }

    pub fn default_display_id(&self) -> DisplayId {
        DisplayId(0)
    }

    pub fn displays(&self) -> &[ClockDisplay] {
        &self.displays
    }

    pub fn display(&self, id: DisplayId) -> Option<&ClockDisplay> {
        self.displays.get(id.0)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn alarm_time(&self) -> AlarmTime {
        self.alarm
    }

    pub fn stopwatch_time(&self) -> StopwatchTime {
        self.stopwatch
    }

    pub fn is_24_hour(&self) -> bool {
        self.format.is_24_hour()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Performs one immediate refresh pass and arms the 1-second tick.
    /// Calling `start` while already running is a no-op, so duplicate
    /// registrations cannot stack.
    pub fn start(&mut self, instant_now: Instant, now: DateTime<Local>) {
        if self.running {
            return;
        }
        self.running = true;
        self.refresh(now);
        self.next_tick = instant_now + TICK_PERIOD;
    }

    /// Releases the tick; safe to call when no tick is armed.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Runs every refresh pass that has come due since the last poll and
    /// returns how many were performed. After a long stall the backlog is
    /// dropped rather than replayed.
    pub fn poll(&mut self, instant_now: Instant, now: DateTime<Local>) -> u32 {
        if !self.running {
            return 0;
        }
        let mut ticks = 0;
        while instant_now >= self.next_tick && ticks < MAX_TICKS_PER_POLL {
            self.refresh(now);
            self.next_tick += TICK_PERIOD;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_POLL && instant_now >= self.next_tick {
            self.next_tick = instant_now + TICK_PERIOD;
        }
        ticks
    }

    /// Time until the next armed tick, for repaint scheduling.
    pub fn until_next_tick(&self, instant_now: Instant) -> Duration {
        if self.running {
            self.next_tick.saturating_duration_since(instant_now)
        } else {
            TICK_PERIOD
        }
    }

    pub fn change_mode(&mut self) {
        self.mode = self.mode.next();
    }

    /// Mode-dependent increase command, routed to one target display.
    /// In Time mode the command has no meaning and does nothing.
    pub fn increase(&mut self, target: DisplayId) {
        match self.mode {
            Mode::Time => {}
            Mode::Alarm => {
                self.alarm.advance();
                let alarm = self.alarm;
                if let Some(display) = self.displays.get_mut(target.0) {
                    display.update(alarm.hours, alarm.minutes, 0);
                }
            }
            Mode::Stopwatch => {
                self.stopwatch.advance();
                let stopwatch = self.stopwatch;
                if let Some(display) = self.displays.get_mut(target.0) {
                    display.update(stopwatch.hours, stopwatch.minutes, stopwatch.seconds);
                }
            }
        }
    }

    /// Toggles dark mode on the targeted display only.
    pub fn light(&mut self, target: DisplayId) {
        if let Some(display) = self.displays.get_mut(target.0) {
            display.toggle_dark_mode();
        }
    }

    /// Flips the shared 12/24-hour flag on every display and re-renders each
    /// with the current wall-clock time, regardless of mode.
    pub fn toggle_format(&mut self, now: DateTime<Local>) {
        self.format = match self.format {
            HourFormat::Hour12 => HourFormat::Hour24,
            HourFormat::Hour24 => HourFormat::Hour12,
        };
        let format = self.format;
        for display in &mut self.displays {
            display.set_format(format);
            push_wall_time(display, now);
        }
    }

    /// Registers a new display for a `GMT+N`/`GMT-N` offset and applies an
    /// immediate offset-adjusted update. A spec that does not match the
    /// pattern is rejected without any state change.
    pub fn add_clock(&mut self, spec: &str, now: DateTime<Local>) -> Result<DisplayId, WatchError> {
        if parse_offset_hours(spec).is_none() {
            return Err(WatchError::InvalidOffsetFormat(spec.to_string()));
        }
        let id = DisplayId(self.displays.len());
        let mut display = ClockDisplay::new(id, spec, self.format);
        push_wall_time(&mut display, now);
        self.displays.push(display);
        Ok(id)
    }

    /// The periodic refresh pass: reads the captured instant once and pushes
    /// each display its offset-adjusted local time. Runs only in Time mode;
    /// in Alarm or Stopwatch mode displays keep whatever they last showed.
    fn refresh(&mut self, now: DateTime<Local>) {
        if self.mode != Mode::Time {
            return;
        }
        for display in &mut self.displays {
            push_wall_time(display, now);
        }
    }
}

/// Offsets are whole hours only: the hour wraps into 0..24 while minutes and
/// seconds pass through unchanged.
fn push_wall_time(display: &mut ClockDisplay, now: DateTime<Local>) {
    let hour = (now.hour() as i32 + display.offset_hours()).rem_euclid(24) as u32;
    display.update(hour, now.minute(), now.second());
}
