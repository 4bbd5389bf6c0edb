//! Date-time parsing and formatting.
//!
//! Pure conversions between the three value representations the field works
//! with: the canonical machine string exchanged with the host form, the
//! display string shown in the text input, and the structured
//! [`NaiveDateTime`] that drives the calendar and sliders.
//!
//! Parsing is two-tier. Text containing the long format's literal `"at"`
//! token is parsed strictly against the configured format, so the long
//! form's natural-language words are never mis-read by the lenient parser.
//! Everything else goes through a fixed list of accepted lenient forms.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ParseError;

/// The machine-readable wall-clock format exchanged with the host form.
///
/// Time-zone-less ISO-8601, independent of the configured display format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The marker token that selects strict parsing.
///
/// Only the long display format embeds it, so its presence means the text is
/// an attempt at the long form and must match it exactly.
const STRICT_MARKER: &str = "at";

/// Display formats for the text input.
///
/// Chosen once at construction and held for the field's lifetime. Only
/// affects the display string; the committed canonical value always uses
/// [`CANONICAL_FORMAT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeFormat {
    /// "March 3, 2024 at 5:00 pm"
    #[default]
    Long,
    /// "March 3, 2024"
    LongDate,
    /// "2024 Mar 3, 5:00 pm"
    Medium,
    /// "2024 Mar 3"
    MediumDate,
    /// "2024-03-03 17:00"
    Short,
    /// "2024-03-03"
    ShortDate,
}

impl DateTimeFormat {
    /// The chrono pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Long => "%B %-d, %Y at %-I:%M %P",
            Self::LongDate => "%B %-d, %Y",
            Self::Medium => "%Y %b %-d, %-I:%M %P",
            Self::MediumDate => "%Y %b %-d",
            Self::Short => "%Y-%m-%d %H:%M",
            Self::ShortDate => "%Y-%m-%d",
        }
    }

    /// Whether this format carries a time-of-day component.
    pub fn has_time(self) -> bool {
        matches!(self, Self::Long | Self::Medium | Self::Short)
    }
}

/// Render a structured date-time using the given display format.
pub fn format_display(value: NaiveDateTime, format: DateTimeFormat) -> String {
    value.format(format.pattern()).to_string()
}

/// Encode a structured date-time as the canonical machine string.
pub fn to_canonical(value: NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// Decode a canonical machine string from the host.
///
/// Accepts the bare canonical form and an RFC 3339 `Z`-suffixed variant,
/// which some hosts hand back after persisting the value.
pub fn parse_canonical(text: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(text, CANONICAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%SZ"))
        .map_err(|_| ParseError::InvalidCanonical(text.to_string()))
}

/// Date-time forms accepted by the lenient parser, tried in order.
const LENIENT_DATETIME_FORMATS: &[&str] = &[
    CANONICAL_FORMAT,
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y %b %-d, %-I:%M %P",
];

/// Date-only forms accepted by the lenient parser; time defaults to 0:00.
const LENIENT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y %b %-d",
    "%B %-d, %Y",
];

/// Parse user-typed text into a structured date-time.
///
/// If `text` contains the `"at"` marker token it is parsed strictly against
/// `format` and a mismatch is an error. A failed strict parse never falls
/// back to lenient parsing. Text without the marker is tried against the
/// lenient form lists; date-only matches land at midnight.
pub fn parse_input(text: &str, format: DateTimeFormat) -> Result<NaiveDateTime, ParseError> {
    let trimmed = text.trim();

    if trimmed.contains(STRICT_MARKER) {
        return parse_strict(trimmed, format);
    }

    for pattern in LENIENT_DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(value);
        }
    }
    for pattern in LENIENT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, pattern) {
            if let Some(value) = date.and_hms_opt(0, 0, 0) {
                return Ok(value);
            }
        }
    }

    Err(ParseError::Unrecognized(trimmed.to_string()))
}

fn parse_strict(text: &str, format: DateTimeFormat) -> Result<NaiveDateTime, ParseError> {
    let mismatch = || ParseError::StrictMismatch {
        format,
        input: text.to_string(),
    };

    if format.has_time() {
        NaiveDateTime::parse_from_str(text, format.pattern()).map_err(|_| mismatch())
    } else {
        let date = NaiveDate::parse_from_str(text, format.pattern()).map_err(|_| mismatch())?;
        date.and_hms_opt(0, 0, 0).ok_or_else(mismatch)
    }
}

/// Clamp a raw minute reading to the valid 0-59 range.
///
/// Slider widgets with range 0-59 can still report the exclusive upper
/// bound 60 when the handle is dragged to the end stop.
pub fn clamp_minute(raw: u32) -> u32 {
    raw.min(59)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_format_long() {
        assert_eq!(
            format_display(dt(2024, 3, 3, 17, 0), DateTimeFormat::Long),
            "March 3, 2024 at 5:00 pm"
        );
    }

    #[test]
    fn test_format_variants() {
        let value = dt(2024, 3, 3, 17, 5);
        assert_eq!(
            format_display(value, DateTimeFormat::LongDate),
            "March 3, 2024"
        );
        assert_eq!(
            format_display(value, DateTimeFormat::Medium),
            "2024 Mar 3, 5:05 pm"
        );
        assert_eq!(
            format_display(value, DateTimeFormat::MediumDate),
            "2024 Mar 3"
        );
        assert_eq!(
            format_display(value, DateTimeFormat::Short),
            "2024-03-03 17:05"
        );
        assert_eq!(
            format_display(value, DateTimeFormat::ShortDate),
            "2024-03-03"
        );
    }

    #[test]
    fn test_round_trip_long_format() {
        let value = dt(2024, 3, 3, 17, 0);
        let text = format_display(value, DateTimeFormat::Long);
        assert_eq!(parse_input(&text, DateTimeFormat::Long), Ok(value));
    }

    #[test]
    fn test_strict_parse_with_marker() {
        assert_eq!(
            parse_input("March 3, 2024 at 5:00 pm", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 17, 0))
        );
    }

    #[test]
    fn test_strict_failure_does_not_fall_back() {
        let result = parse_input("not a date at all", DateTimeFormat::Long);
        assert!(matches!(result, Err(ParseError::StrictMismatch { .. })));
    }

    #[test]
    fn test_lenient_slash_date() {
        assert_eq!(
            parse_input("03/03/2024", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 0, 0))
        );
    }

    #[test]
    fn test_lenient_iso_forms() {
        assert_eq!(
            parse_input("2024-03-03T17:00:00", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 17, 0))
        );
        assert_eq!(
            parse_input("2024-03-03T17:00:00Z", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 17, 0))
        );
        assert_eq!(
            parse_input("2024-03-03 17:00", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 17, 0))
        );
        assert_eq!(
            parse_input("2024-03-03", DateTimeFormat::Long),
            Ok(dt(2024, 3, 3, 0, 0))
        );
    }

    #[test]
    fn test_lenient_garbage_rejected() {
        assert!(matches!(
            parse_input("tomorrow-ish", DateTimeFormat::Long),
            Err(ParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_canonical_round_trip() {
        let value = dt(2024, 12, 31, 23, 59);
        assert_eq!(to_canonical(value), "2024-12-31T23:59:00");
        assert_eq!(parse_canonical(&to_canonical(value)), Ok(value));
    }

    #[test]
    fn test_canonical_accepts_z_suffix() {
        assert_eq!(
            parse_canonical("2024-03-03T17:00:00Z"),
            Ok(dt(2024, 3, 3, 17, 0))
        );
    }

    #[test]
    fn test_canonical_rejects_display_text() {
        assert!(parse_canonical("March 3, 2024 at 5:00 pm").is_err());
    }

    #[test]
    fn test_clamp_minute() {
        assert_eq!(clamp_minute(60), 59);
        assert_eq!(clamp_minute(59), 59);
        assert_eq!(clamp_minute(0), 0);
    }

    #[test]
    fn test_date_only_strict_format() {
        // A date-only configured format still parses strictly when the
        // marker appears in the text.
        let result = parse_input("March 3, 2024 at 5:00 pm", DateTimeFormat::LongDate);
        assert!(matches!(result, Err(ParseError::StrictMismatch { .. })));
    }
}
