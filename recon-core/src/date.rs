//! Best-effort date and date-time cleaning.
//!
//! Statements arrive with whatever date layout the exporting system liked.
//! Shapes are tried in a fixed order: zoned timestamps first, then date with
//! an optional trailing time. Month-first wins over day-first when both are
//! valid (`01/02/2024` is January 2nd), which matches the default of common
//! tabular tooling. This is inference, not a guarantee: an ambiguous layout
//! can be read the wrong way round.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::value::RawValue;

/// Date followed by a clock time, separated by `T` or whitespace.
static DATE_AND_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<date>.*?)[T\s]+(?P<time>\d{1,2}:\d{2}(?::\d{2}(?:\.\d{1,9})?)?(?:\s*[AaPp][Mm])?)$",
    )
    .expect("date-time split pattern")
});

/// Trailing UTC designator: `10:30:00 UTC`, `10:30 AM GMT`, `10:30:00Z`.
static UTC_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<rest>.*(?:\d|[AP]M))\s*(?:Z|UTC|GMT)$").expect("utc suffix pattern")
});

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}$").expect("year-month pattern"));

/// Timestamps carrying an explicit UTC offset.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Date layouts in priority order. `%Y` entries come before their `%y`
/// counterparts; two-digit years are caught by the century check below.
const DATE_FORMATS: &[&str] = &[
    // ISO and year-first
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    // month-first
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    // day-first
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    // two-digit years
    "%m/%d/%y",
    "%m-%d-%y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    // month names (%B accepts both "Jan" and "January")
    "%d %B %Y",
    "%d-%B-%Y",
    "%d/%B/%Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%A, %d %B %Y",
    "%A %d %B %Y",
    "%A, %B %d, %Y",
    "%d %B %y",
    "%d-%B-%y",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

/// Clean a date-like value. Unparsable or blank input yields `None`.
pub fn clean_date(raw: &RawValue) -> Option<NaiveDateTime> {
    let rendered = match raw {
        // integral floats read back as integers so 20240115.0 stays a date
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_text()?,
    };
    let s = rendered.trim();
    if s.is_empty() {
        return None;
    }
    parse_datetime(s)
}

/// Parse a trimmed, non-empty string using the inference order above.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_zoned(s) {
        return Some(dt);
    }

    // already UTC, so the naive reading is the canonical one
    if let Some(caps) = UTC_SUFFIX.captures(s) {
        return parse_datetime(caps["rest"].trim());
    }

    if let Some(caps) = DATE_AND_TIME.captures(s) {
        let date = parse_date_part(caps["date"].trim_end_matches(',').trim())?;
        let time = parse_time_part(&caps["time"])?;
        return Some(date.and_time(time));
    }

    parse_date_part(s).map(|d| d.and_time(NaiveTime::MIN))
}

fn parse_zoned(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.naive_utc())
}

fn parse_date_part(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(s, "%Y%m%d").ok().filter(plausible_year);
    }

    if let Some(d) = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(plausible_year)
    {
        return Some(d);
    }

    parse_partial(s)
}

/// Year-month and bare year resolve to the first day of the period.
fn parse_partial(s: &str) -> Option<NaiveDate> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).filter(plausible_year);
    }

    if YEAR_MONTH.is_match(s) {
        let (year, month) = s.split_once(['-', '/'])?;
        return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
    }

    // "Jan 2024", "January 2024"
    NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y")
        .ok()
        .filter(plausible_year)
}

fn parse_time_part(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

fn plausible_year(d: &NaiveDate) -> bool {
    use chrono::Datelike;
    d.year() >= 1000
}
