#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HourFormat {
    Hour12,
    Hour24,
}

impl HourFormat {
    pub fn is_24_hour(self) -> bool {
        matches!(self, HourFormat::Hour24)
    }
}

/// Stable handle for a display. Displays are never removed during a session,
/// so the handle stays valid for the lifetime of the watch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DisplayId(pub(crate) usize);

/// One visual time readout. Holds no timers of its own; the watch engine
/// pushes already offset-adjusted times into it.
#[derive(Debug, Clone)]
pub struct ClockDisplay {
    id: DisplayId,
    label: String,
    offset_hours: i32,
    format: HourFormat,
    last_time: (u32, u32, u32),
    dark_mode: bool,
    rendered: String,
}

impl ClockDisplay {
    /// The offset is parsed from the label once here; a label that does not
    /// match `GMT+N`/`GMT-N` yields offset 0 (defined fallback, not an error).
    pub fn new(id: DisplayId, label: impl Into<String>, format: HourFormat) -> Self {
        let label = label.into();
        let offset_hours = parse_offset_hours(&label).unwrap_or(0);
        let mut display = Self {
            id,
            label,
            offset_hours,
            format,
            last_time: (0, 0, 0),
            dark_mode: false,
            rendered: String::new(),
        };
        display.update(0, 0, 0);
        display
    }

    pub fn id(&self) -> DisplayId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn offset_hours(&self) -> i32 {
        self.offset_hours
    }

    /// Last rendered text, ready for a UI layer to mount.
    pub fn text(&self) -> &str {
        &self.rendered
    }

    /// Overwrites the visible text with the given display-local time.
    pub fn update(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.last_time = (hours, minutes, seconds);
        self.rendered = self.render(hours, minutes, seconds);
    }

    /// Switches the format flag and re-renders the last known time. Displays
    /// always hold a prior time because construction renders 00:00:00.
    pub fn set_format(&mut self, format: HourFormat) {
        self.format = format;
        let (hours, minutes, seconds) = self.last_time;
        self.update(hours, minutes, seconds);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    fn render(&self, hours: u32, minutes: u32, seconds: u32) -> String {
        match self.format {
            HourFormat::Hour24 => {
                format!("{hours:02}:{minutes:02}:{seconds:02} ({})", self.label)
            }
            HourFormat::Hour12 => {
                let (hour12, meridiem) = to_12_hour(hours);
                format!(
                    "{hour12:02}:{minutes:02}:{seconds:02} {meridiem} ({})",
                    self.label
                )
            }
        }
    }
}

fn to_12_hour(hours: u32) -> (u32, &'static str) {
    match hours {
        0 => (12, "AM"),
        1..=11 => (hours, "AM"),
        12 => (12, "PM"),
        _ => (hours - 12, "PM"),
    }
}

/// Parses an offset label of the exact form `GMT` `+`/`-` digits. The hour
/// count is folded modulo 24 digit by digit, so a digit run of any length
/// yields an offset within a single day.
pub(crate) fn parse_offset_hours(spec: &str) -> Option<i32> {
    let rest = spec.strip_prefix("GMT")?;
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut hours: i32 = 0;
    for digit in digits.bytes() {
        hours = (hours * 10 + i32::from(digit - b'0')) % 24;
    }
    Some(sign * hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(label: &str, format: HourFormat) -> ClockDisplay {
        ClockDisplay::new(DisplayId(0), label, format)
    }

    #[test]
    fn initializes_to_midnight() {
        let clock = display("Local", HourFormat::Hour24);
        assert_eq!(clock.text(), "00:00:00 (Local)");
    }

    #[test]
    fn renders_24_hour_zero_padded_without_meridiem() {
        let mut clock = display("Local", HourFormat::Hour24);
        for hour in 0u32..24 {
            clock.update(hour, 5, 9);
            assert_eq!(clock.text(), format!("{hour:02}:05:09 (Local)"));
        }
    }

    #[test]
    fn renders_12_hour_boundaries() {
        let mut clock = display("Local", HourFormat::Hour12);
        clock.update(0, 0, 0);
        assert_eq!(clock.text(), "12:00:00 AM (Local)");
        clock.update(12, 0, 0);
        assert_eq!(clock.text(), "12:00:00 PM (Local)");
        clock.update(13, 0, 0);
        assert_eq!(clock.text(), "01:00:00 PM (Local)");
        clock.update(11, 59, 59);
        assert_eq!(clock.text(), "11:59:59 AM (Local)");
    }

    #[test]
    fn set_format_reformats_last_time() {
        let mut clock = display("GMT+2", HourFormat::Hour24);
        clock.update(15, 30, 45);
        clock.set_format(HourFormat::Hour12);
        assert_eq!(clock.text(), "03:30:45 PM (GMT+2)");
        clock.set_format(HourFormat::Hour24);
        assert_eq!(clock.text(), "15:30:45 (GMT+2)");
    }

    #[test]
    fn dark_mode_double_toggle_restores_state() {
        let mut clock = display("Local", HourFormat::Hour24);
        assert!(!clock.is_dark());
        clock.toggle_dark_mode();
        assert!(clock.is_dark());
        clock.toggle_dark_mode();
        assert!(!clock.is_dark());
    }

    #[test]
    fn offset_parses_from_gmt_labels() {
        assert_eq!(parse_offset_hours("GMT+5"), Some(5));
        assert_eq!(parse_offset_hours("GMT-3"), Some(-3));
        assert_eq!(parse_offset_hours("GMT+12"), Some(12));
    }

    #[test]
    fn offset_folds_large_digit_runs_into_a_day() {
        assert_eq!(parse_offset_hours("GMT+27"), Some(3));
        assert_eq!(parse_offset_hours("GMT+2147483647"), Some(7));
        assert_eq!(parse_offset_hours("GMT-2147483647"), Some(-7));
        assert_eq!(parse_offset_hours("GMT+99999999999"), Some(15));
    }

    #[test]
    fn offset_falls_back_to_zero_on_unmatched_label() {
        assert_eq!(parse_offset_hours("Local"), None);
        assert_eq!(parse_offset_hours("GMT"), None);
        assert_eq!(parse_offset_hours("GMT5"), None);
        assert_eq!(parse_offset_hours("GMT+"), None);
        assert_eq!(parse_offset_hours("GMT+5x"), None);
        assert_eq!(parse_offset_hours("UTC+5"), None);
        assert_eq!(display("not-a-timezone", HourFormat::Hour24).offset_hours(), 0);
    }
}
