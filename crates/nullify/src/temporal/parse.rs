//! Free-form date parsing.
//!
//! Candidates are tried from most to least specific:
//!
//! 1. RFC 3339 and RFC 2822
//! 2. Numeric `a/b/yyyy` dates (`/`, `.` or `-` separated, optional time)
//! 3. ISO-like date-times with an explicit offset
//! 4. Date-times and dates without an offset, placed at
//!    [`ParseOptions::default_offset`]
//! 5. Bare digits: `yyyymmdd` or a Unix epoch in seconds, millis, micros or nanos
//!
//! Only step 2 can be ambiguous. Strict parsing rejects a date whose day and
//! month could be swapped, and reads any other numeric date the one way it
//! fits. Lenient parsing always reads the preferred order first and falls
//! back to the swapped order only when
//! [`ParseOptions::retry_ambiguous_with_swap`] is set.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

/// Month-first preference used when no default has been installed
pub const DEFAULT_PREFER_MONTH_FIRST: bool = true;

static INSTALLED_DEFAULT: OnceCell<ParseOptions> = OnceCell::new();

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([/.-])(\d{1,2})([/.-])(\d{4}|\d{2})(?:[ T,]+(.+))?$")
        .expect("numeric date pattern is valid")
});

const OFFSET_DATE_TIMES: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_DATE_TIMES: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
];

const NAIVE_DATES: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%Y-%b-%d",
];

const TIMES: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

// ============================================================================
// ERRORS
// ============================================================================

/// Free-form date parsing failure
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("empty date text")]
    Empty,

    /// Day and month could be read either way
    #[error("ambiguous date {input:?}: day and month order cannot be determined")]
    Ambiguous { input: String },

    #[error("unrecognized date format {input:?}")]
    Unrecognized { input: String },

    /// Recognized shape, but the fields do not form a representable instant
    #[error("date {input:?} is out of range")]
    OutOfRange { input: String },
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Configuration for free-form parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    prefer_month_first: bool,
    retry_ambiguous_with_swap: bool,
    default_offset: FixedOffset,
}

impl ParseOptions {
    /// Built-in options, ignoring any installed default
    pub fn builtin() -> Self {
        Self {
            prefer_month_first: DEFAULT_PREFER_MONTH_FIRST,
            retry_ambiguous_with_swap: true,
            default_offset: Utc.fix(),
        }
    }

    /// Read `a/b/yyyy` as month/day when both orders are possible
    pub fn with_prefer_month_first(mut self, prefer: bool) -> Self {
        self.prefer_month_first = prefer;
        self
    }

    /// In lenient mode, retry with day and month swapped when the preferred
    /// order does not form a valid date. Without it a day-first
    /// `12/25/2020` is out of range.
    pub fn with_retry_ambiguous_with_swap(mut self, retry: bool) -> Self {
        self.retry_ambiguous_with_swap = retry;
        self
    }

    /// Offset applied to inputs that carry none
    pub fn with_default_offset(mut self, offset: FixedOffset) -> Self {
        self.default_offset = offset;
        self
    }

    pub fn prefer_month_first(&self) -> bool {
        self.prefer_month_first
    }

    pub fn retry_ambiguous_with_swap(&self) -> bool {
        self.retry_ambiguous_with_swap
    }

    pub fn default_offset(&self) -> FixedOffset {
        self.default_offset
    }

    /// Set the process-wide default returned by [`ParseOptions::default`].
    ///
    /// Succeeds once; later calls hand the rejected options back.
    pub fn install_default(options: Self) -> Result<(), Self> {
        INSTALLED_DEFAULT.set(options)?;
        debug!(
            prefer_month_first = options.prefer_month_first,
            retry_ambiguous_with_swap = options.retry_ambiguous_with_swap,
            default_offset = %options.default_offset,
            "installed default date parse options"
        );
        Ok(())
    }
}

impl Default for ParseOptions {
    /// The installed process-wide default, or [`ParseOptions::builtin`]
    fn default() -> Self {
        INSTALLED_DEFAULT.get().copied().unwrap_or_else(Self::builtin)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse, rejecting dates whose day and month order is ambiguous
pub fn parse_strict(
    text: &str,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    parse(text, true, options)
}

/// Parse, resolving ambiguous day and month order from `options`
pub fn parse_any(
    text: &str,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    parse(text, false, options)
}

fn parse(
    text: &str,
    strict: bool,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let input = text.trim();
    trace!(input, strict, "parsing date text");
    if input.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return Ok(parsed);
    }
    // Ahead of the %Y-led formats: %Y accepts a one or two digit year
    if let Some(caps) = NUMERIC_DATE.captures(input) {
        return parse_numeric(&caps, input, strict, options);
    }
    for format in OFFSET_DATE_TIMES {
        if let Ok(parsed) = DateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }
    for format in NAIVE_DATE_TIMES {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return localize(naive, input, options);
        }
    }
    for format in NAIVE_DATES {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return localize(date.and_time(NaiveTime::MIN), input, options);
        }
    }
    if input.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digits(input, options);
    }

    trace!(input, "no date format matched");
    Err(unrecognized(input))
}

// ============================================================================
// HELPERS
// ============================================================================

fn unrecognized(input: &str) -> TimeParseError {
    TimeParseError::Unrecognized {
        input: input.to_owned(),
    }
}

fn out_of_range(input: &str) -> TimeParseError {
    TimeParseError::OutOfRange {
        input: input.to_owned(),
    }
}

fn localize(
    naive: NaiveDateTime,
    input: &str,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    options
        .default_offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| out_of_range(input))
}

fn parse_numeric(
    caps: &regex::Captures<'_>,
    input: &str,
    strict: bool,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    if caps[2] != caps[4] {
        return Err(unrecognized(input));
    }

    let first: u32 = caps[1].parse().map_err(|_| unrecognized(input))?;
    let second: u32 = caps[3].parse().map_err(|_| unrecognized(input))?;
    let year = expand_year(&caps[5]).ok_or_else(|| unrecognized(input))?;

    let time = match caps.get(6) {
        Some(m) => parse_time_of_day(m.as_str().trim()).ok_or_else(|| unrecognized(input))?,
        None => NaiveTime::MIN,
    };

    let date = if !strict {
        read_preferred(year, first, second, options).ok_or_else(|| out_of_range(input))?
    } else if first > 12 || second > 12 || first == 0 || second == 0 || first == second {
        // At most one reading has both parts in range
        let (month, day) = if first > 12 { (second, first) } else { (first, second) };
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| out_of_range(input))?
    } else {
        return Err(TimeParseError::Ambiguous {
            input: input.to_owned(),
        });
    };

    localize(date.and_time(time), input, options)
}

/// Lenient reading: the preferred order, then the swapped order if allowed
fn read_preferred(year: i32, first: u32, second: u32, options: &ParseOptions) -> Option<NaiveDate> {
    let (month, day) = if options.prefer_month_first {
        (first, second)
    } else {
        (second, first)
    };
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        options
            .retry_ambiguous_with_swap
            .then(|| NaiveDate::from_ymd_opt(year, day, month))
            .flatten()
    })
}

/// Two-digit years below 69 are in the 2000s, the rest in the 1900s
fn expand_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    Some(match text.len() {
        2 if year < 69 => 2000 + year,
        2 => 1900 + year,
        _ => year,
    })
}

fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    TIMES
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}

fn parse_digits(
    input: &str,
    options: &ParseOptions,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    if input.len() == 8 {
        let date = NaiveDate::parse_from_str(input, "%Y%m%d").map_err(|_| out_of_range(input))?;
        return localize(date.and_time(NaiveTime::MIN), input, options);
    }

    let epoch: i64 = input.parse().map_err(|_| out_of_range(input))?;
    let utc = match input.len() {
        10 => DateTime::from_timestamp(epoch, 0),
        13 => DateTime::from_timestamp_millis(epoch),
        16 => DateTime::from_timestamp_micros(epoch),
        19 => Some(DateTime::from_timestamp_nanos(epoch)),
        _ => return Err(unrecognized(input)),
    };
    utc.map(|t| t.with_timezone(&options.default_offset))
        .ok_or_else(|| out_of_range(input))
}
