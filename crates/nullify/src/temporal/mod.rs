//! Time layouts and free-form date parsing used by [`Time`](crate::types::Time).

pub mod layout;
pub mod parse;

pub use layout::{
    DATE_ONLY, DATE_TIME, DEFAULT_LAYOUT, FormatLayout, RFC2822, RFC3339, RFC3339_NANO, TIME_ONLY,
};
pub use parse::{DEFAULT_PREFER_MONTH_FIRST, ParseOptions, TimeParseError, parse_any, parse_strict};
