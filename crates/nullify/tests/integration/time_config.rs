//! Time layout and parse-mode configuration

use chrono::{FixedOffset, TimeZone, Utc};
use nullify::prelude::*;
use nullify::temporal::{DATE_ONLY, DATE_TIME, RFC2822, RFC3339_NANO, TIME_ONLY};
use nullify::types::Time;
use nullify::{FormatLayout, ParseOptions, TimeParseError};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn sample() -> Time {
    Time::from(Utc.with_ymd_and_hms(2023, 7, 9, 8, 7, 6).unwrap())
}

#[rstest]
#[case(DATE_ONLY, "2023-07-09")]
#[case(TIME_ONLY, "08:07:06")]
#[case(DATE_TIME, "2023-07-09 08:07:06")]
#[case(RFC2822, "Sun, 09 Jul 2023 08:07:06 +0000")]
#[case(RFC3339_NANO, "2023-07-09T08:07:06Z")]
#[case("%d/%m/%Y", "09/07/2023")]
#[case("", "2023-07-09T08:07:06Z")]
fn test_configured_layout_drives_output(#[case] layout: &'static str, #[case] expected: &str) {
    let t = sample().with_layout(layout);
    assert_eq!(t.marshal_text().unwrap(), expected.as_bytes());
    assert_eq!(t.marshal_json().unwrap(), format!("\"{expected}\"").into_bytes());
    assert_eq!(t.format(FormatLayout::Configured).unwrap(), expected);
}

#[test]
fn test_owned_layout() {
    let layout = format!("{}T{}", DATE_ONLY, TIME_ONLY);
    let t = sample().with_layout(layout);
    assert_eq!(t.layout(), "%Y-%m-%dT%H:%M:%S");
    assert_eq!(t.format(FormatLayout::Configured).unwrap(), "2023-07-09T08:07:06");
    assert_eq!(t.format(FormatLayout::Default).unwrap(), "2023-07-09T08:07:06Z");
}

#[test]
fn test_strict_rejects_ambiguous_dates() {
    let mut t = Time::default();
    let err = t.unmarshal_text(b"03/04/2020").unwrap_err();
    assert!(err.is_unmarshal());
    assert!(err.has_cause(|c| matches!(
        c,
        nullify::Cause::Time(TimeParseError::Ambiguous { .. })
    )));
}

#[test]
fn test_lenient_resolves_ambiguous_dates() {
    let mut t = Time::default().with_lenient_parsing();
    t.unmarshal_text(b"03/04/2020").unwrap();
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2020, 3, 4, 0, 0, 0).unwrap());
}

#[test]
fn test_modes_agree_on_unambiguous_input() {
    let mut strict = Time::default();
    let mut lenient = Time::default().with_lenient_parsing();
    strict.unmarshal_text(b"2020-03-04T05:06:07+02:00").unwrap();
    lenient.unmarshal_text(b"2020-03-04T05:06:07+02:00").unwrap();
    assert_eq!(strict.must_value(), lenient.must_value());
    assert_eq!(strict.must_value().offset().local_minus_utc(), 7200);
}

#[test]
fn test_day_first_options() {
    let options = ParseOptions::builtin()
        .with_prefer_month_first(false)
        .with_default_offset(FixedOffset::east_opt(9 * 3600).unwrap());
    let mut t = Time::default()
        .with_lenient_parsing()
        .with_parse_options(options);

    t.unmarshal_text(b"03/04/2020 10:00").unwrap();
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2020, 4, 3, 1, 0, 0).unwrap());
    assert_eq!(t.marshal_text().unwrap(), b"2020-04-03T10:00:00+09:00");
}

#[test]
fn test_day_first_without_swap_retry() {
    let no_retry = ParseOptions::builtin()
        .with_prefer_month_first(false)
        .with_retry_ambiguous_with_swap(false);
    let mut t = Time::default().with_lenient_parsing().with_parse_options(no_retry);
    t.unmarshal_text(b"12/11/2020").unwrap();
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2020, 11, 12, 0, 0, 0).unwrap());

    assert!(t.unmarshal_text(b"12/25/2020").is_err());
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2020, 11, 12, 0, 0, 0).unwrap());

    let mut retry = Time::default()
        .with_lenient_parsing()
        .with_parse_options(no_retry.with_retry_ambiguous_with_swap(true));
    retry.unmarshal_text(b"12/25/2020").unwrap();
    assert_eq!(retry.must_value(), Utc.with_ymd_and_hms(2020, 12, 25, 0, 0, 0).unwrap());
}

#[test]
fn test_epoch_inputs() {
    let mut t = Time::default();
    t.unmarshal_text(b"1688889926").unwrap();
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2023, 7, 9, 8, 5, 26).unwrap());

    t.scan(DriverValue::Int64(0)).unwrap();
    assert!(t.is_valid());
    assert!(t.is_zero());
}
