//! Output layouts for instants, in `chrono` strftime syntax.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::error::Cause;

/// `2006-01-02T15:04:05Z07:00`, rendered with `Z` for UTC
pub const RFC3339: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// RFC 3339 with as many fractional-second digits as needed
pub const RFC3339_NANO: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

pub const RFC2822: &str = "%a, %d %b %Y %H:%M:%S %z";

pub const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

pub const DATE_ONLY: &str = "%Y-%m-%d";

pub const TIME_ONLY: &str = "%H:%M:%S";

/// Layout used when none is configured
pub const DEFAULT_LAYOUT: &str = RFC3339;

/// Which layout [`Time::format`](crate::types::Time::format) renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatLayout<'a> {
    /// [`DEFAULT_LAYOUT`], ignoring the wrapper's configuration
    #[default]
    Default,
    /// The layout configured on the wrapper
    Configured,
    /// An explicit layout; empty falls back to [`DEFAULT_LAYOUT`]
    Custom(&'a str),
}

/// Render `instant` with `layout`, reporting unknown directives instead of panicking
pub(crate) fn render(instant: &DateTime<FixedOffset>, layout: &str) -> Result<String, Cause> {
    match layout {
        "" | RFC3339 => Ok(instant.to_rfc3339_opts(SecondsFormat::Secs, true)),
        RFC3339_NANO => Ok(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        _ => {
            let mut out = String::with_capacity(layout.len() + 16);
            write!(out, "{}", instant.format(layout))
                .map_err(|_| Cause::InvalidLayout(layout.to_owned()))?;
            Ok(out)
        }
    }
}
