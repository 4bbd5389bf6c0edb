//! Value synchronization.
//!
//! [`SyncCore`] is the single source of truth for the field's value. It owns
//! the structured date-time and the display string, recomputes both together
//! on every mutation, and reports what the caller must do next (push a new
//! canonical value to the host, close the overlay) through [`SyncOutcome`].
//!
//! The display string and the structured value never disagree about
//! validity: a committed valid value always renders through the configured
//! format, and invalid typed text leaves the structured value absent while
//! the raw text stays on screen for correction.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::format::{self, DateTimeFormat};

/// What a mutation of [`SyncCore`] requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    /// The canonical value to push to the host, if a push is due.
    /// `Some(None)` pushes an absent value (cleared or invalid).
    pub commit: Option<Option<String>>,
    /// Whether the overlay must be force-closed.
    pub close_overlay: bool,
}

impl SyncOutcome {
    fn commit(canonical: Option<String>) -> Self {
        Self {
            commit: Some(canonical),
            close_overlay: false,
        }
    }

    fn commit_and_close(canonical: Option<String>) -> Self {
        Self {
            commit: Some(canonical),
            close_overlay: true,
        }
    }
}

/// Owns the canonical value and its derived representations.
pub struct SyncCore {
    /// Display format, fixed for the field's lifetime.
    format: DateTimeFormat,
    /// The structured value, absent when no valid value exists.
    value: Option<NaiveDateTime>,
    /// The text shown in the input. May be raw in-progress keystrokes.
    display: String,
}

impl SyncCore {
    /// Create an empty core with the given display format.
    pub fn new(format: DateTimeFormat) -> Self {
        Self {
            format,
            value: None,
            display: String::new(),
        }
    }

    /// The configured display format.
    pub fn format(&self) -> DateTimeFormat {
        self.format
    }

    /// The current structured value, if valid.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// The current display string.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The current canonical machine string, if a valid value exists.
    pub fn canonical(&self) -> Option<String> {
        self.value.map(format::to_canonical)
    }

    /// Accept an authoritative value from the host.
    ///
    /// Called at construction and whenever the host pushes a new value
    /// inbound. Recomputes the display string but never commits back, so a
    /// host-initiated update cannot echo.
    pub fn accept_host_value(&mut self, canonical: Option<&str>) {
        match canonical.and_then(|text| format::parse_canonical(text).ok()) {
            Some(value) => {
                self.value = Some(value);
                self.display = format::format_display(value, self.format);
            }
            None => {
                self.value = None;
                self.display.clear();
            }
        }
    }

    /// Apply user-typed text.
    ///
    /// The display string always becomes the raw text verbatim. Valid text
    /// commits the parsed value and closes the overlay. Invalid text commits
    /// an absent value and leaves the overlay alone, keeping the typed text
    /// on screen for correction.
    pub fn set_from_text(&mut self, raw: &str) -> SyncOutcome {
        self.display = raw.to_string();

        match format::parse_input(raw, self.format) {
            Ok(value) => {
                self.value = Some(value);
                tracing::debug!(
                    target: "datetime_field::sync",
                    canonical = %format::to_canonical(value),
                    "text parsed, committing value"
                );
                SyncOutcome::commit_and_close(self.canonical())
            }
            Err(error) => {
                self.value = None;
                tracing::debug!(
                    target: "datetime_field::sync",
                    %error,
                    "text did not parse, committing absent value"
                );
                SyncOutcome::commit(None)
            }
        }
    }

    /// Apply a day picked in the calendar.
    ///
    /// The calendar only ever changes the date part. The current
    /// time-of-day is preserved, defaulting to 0:00 when no value existed.
    pub fn set_from_calendar_day(&mut self, day: NaiveDate) -> SyncOutcome {
        let time = self
            .value
            .map(|value| value.time())
            .unwrap_or_else(|| NaiveTime::MIN);
        self.replace(NaiveDateTime::new(day, time))
    }

    /// Apply a new hour from the hour slider.
    ///
    /// The date and minute parts are untouched. With no prior value, the
    /// base is anchored to today at 0:00.
    pub fn adjust_hour(&mut self, hour: u32) -> SyncOutcome {
        let base = self.value.unwrap_or_else(today_midnight);
        let time = NaiveTime::from_hms_opt(hour.min(23), base.time().minute(), 0)
            .unwrap_or_else(|| base.time());
        self.replace(NaiveDateTime::new(base.date(), time))
    }

    /// Apply a new minute from the minute slider.
    ///
    /// A raw reading of 60 is clamped to 59. The date and hour parts are
    /// untouched; with no prior value, the base is anchored to today at 0:00.
    pub fn adjust_minute(&mut self, minute: u32) -> SyncOutcome {
        let base = self.value.unwrap_or_else(today_midnight);
        let time = NaiveTime::from_hms_opt(base.time().hour(), format::clamp_minute(minute), 0)
            .unwrap_or_else(|| base.time());
        self.replace(NaiveDateTime::new(base.date(), time))
    }

    /// Reset to the empty state, committing an absent value.
    pub fn clear(&mut self) -> SyncOutcome {
        self.value = None;
        self.display.clear();
        SyncOutcome::commit_and_close(None)
    }

    fn replace(&mut self, value: NaiveDateTime) -> SyncOutcome {
        self.value = Some(value);
        self.display = format::format_display(value, self.format);
        SyncOutcome::commit(self.canonical())
    }
}

fn today_midnight() -> NaiveDateTime {
    NaiveDateTime::new(Local::now().date_naive(), NaiveTime::MIN)
}
