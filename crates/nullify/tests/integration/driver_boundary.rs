//! Scan and driver_value across the wrapper family

use std::fmt::Debug;

use chrono::{TimeZone, Utc};
use nullify::prelude::*;
use nullify::types::{
    Bool, Byte, Bytes, Float32, Float64, Int, Int8, Int16, Int32, Int64, Json, String as NullString,
    Time, Uint, Uint8, Uint16, Uint32, Uint64, Uuid,
};
use nullify::{Cause, IntegerKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn assert_scan_null<N>(mut n: N)
where
    N: NullableValue + Debug,
{
    assert!(n.is_valid(), "fixture should start valid: {n:?}");
    n.scan(DriverValue::Null).unwrap();
    assert!(!n.is_valid());
    assert!(n.is_zero());
    assert_eq!(n.driver_value().unwrap(), DriverValue::Null);
}

#[test]
fn test_scan_null_resets_every_wrapper() {
    assert_scan_null(Bool::from_value(true));
    assert_scan_null(Byte::from_value(b'x'));
    assert_scan_null(Bytes::from_value(b"x".to_vec()));
    assert_scan_null(Float32::from_value(1.5));
    assert_scan_null(Float64::from_value(1.5));
    assert_scan_null(Int::from_value(1));
    assert_scan_null(Int8::from_value(1));
    assert_scan_null(Int16::from_value(1));
    assert_scan_null(Int32::from_value(1));
    assert_scan_null(Int64::from_value(1));
    assert_scan_null(Json::from_value(b"[]".to_vec()));
    assert_scan_null(NullString::from_value("x".to_owned()));
    assert_scan_null(Time::from(Utc::now()));
    assert_scan_null(Uint::from_value(1));
    assert_scan_null(Uint8::from_value(1));
    assert_scan_null(Uint16::from_value(1));
    assert_scan_null(Uint32::from_value(1));
    assert_scan_null(Uint64::from_value(1));
    assert_scan_null(Uuid::random());
}

fn assert_driver_round_trip<N>(original: N)
where
    N: NullableValue + Default + Debug,
{
    let stored = original.driver_value().unwrap();
    let mut back = N::default();
    back.scan(stored.clone()).unwrap();
    assert!(back.equal(&original), "{stored:?} scanned into {back:?}");
}

#[test]
fn test_driver_round_trips() {
    assert_driver_round_trip(Bool::from_value(false));
    assert_driver_round_trip(Byte::from_value(b'q'));
    assert_driver_round_trip(Bytes::from_value(vec![0, 1, 2, 255]));
    assert_driver_round_trip(Float32::from_value(-0.25));
    assert_driver_round_trip(Float64::from_value(6.02e23));
    assert_driver_round_trip(Int::from_value(isize::MIN));
    assert_driver_round_trip(Int8::from_value(-128));
    assert_driver_round_trip(Int32::from_value(0));
    assert_driver_round_trip(Int64::from_value(i64::MAX));
    assert_driver_round_trip(NullString::from_value(String::new()));
    assert_driver_round_trip(Time::from(Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap()));
    assert_driver_round_trip(Uint16::from_value(u16::MAX));
    assert_driver_round_trip(Uint64::from_value(u64::MAX));
    assert_driver_round_trip(Uuid::random());
}

#[rstest]
#[case(100, Ok(DriverValue::Int8(100)))]
#[case(-128, Ok(DriverValue::Int8(-128)))]
#[case(127, Ok(DriverValue::Int8(127)))]
#[case(300, Err(()))]
#[case(-129, Err(()))]
fn test_int16_into_int8(#[case] value: i16, #[case] expected: Result<DriverValue, ()>) {
    let n = Int16::from_value(value).with_valuer(IntegerKind::Int8);
    match (n.driver_value(), expected) {
        (Ok(got), Ok(want)) => assert_eq!(got, want),
        (Err(err), Err(())) => {
            assert!(err.is_valuer());
            assert!(err.is_overflow());
            assert!(err.has_cause(|c| matches!(c, Cause::IntegerOverflow)));
        }
        (got, want) => panic!("got {got:?}, want {want:?}"),
    }
}

#[rstest]
#[case(IntegerKind::Int8, true)]
#[case(IntegerKind::Int16, true)]
#[case(IntegerKind::Int32, true)]
#[case(IntegerKind::Int64, true)]
#[case(IntegerKind::Uint8, false)]
#[case(IntegerKind::Uint16, false)]
#[case(IntegerKind::Uint32, false)]
fn test_negative_value_destinations(#[case] dest: IntegerKind, #[case] fits: bool) {
    let n = Int64::from_value(-1).with_valuer(dest);
    assert_eq!(n.driver_value().is_ok(), fits, "-1 into {dest}");
}

#[test]
fn test_valuer_tag_ignored_for_null() {
    let n = Int64::default().with_valuer(IntegerKind::Int8);
    assert_eq!(n.driver_value().unwrap(), DriverValue::Null);
}

#[test]
fn test_scan_coercions() {
    let mut n = Int32::default();
    n.scan(DriverValue::Text("12".into())).unwrap();
    assert_eq!(n.must_value(), 12);

    let mut b = Bool::default();
    b.scan(DriverValue::Int64(1)).unwrap();
    assert!(b.must_value());

    let mut s = NullString::default();
    s.scan(DriverValue::Int64(5)).unwrap();
    assert_eq!(s.must_value(), "5");

    let mut f = Float64::default();
    f.scan(DriverValue::Text("2.5".into())).unwrap();
    assert_eq!(f.must_value(), 2.5);
}

#[test]
fn test_scan_failures_keep_state() {
    let mut n = Int8::from_value(1);
    let err = n.scan(DriverValue::Int64(1000)).unwrap_err();
    assert!(err.is_scan());
    assert_eq!(n, Int8::from_value(1));

    let mut b = Bool::from_value(true);
    let err = b.scan(DriverValue::Text("perhaps".into())).unwrap_err();
    assert!(err.is_scan());
    assert!(err.has_cause(|c| matches!(c, Cause::Convert(_))));
    assert_eq!(b, Bool::from_value(true));

    let mut t = Time::from_value(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap().fixed_offset());
    assert!(t.scan(DriverValue::Text("soon".into())).is_err());
    assert!(t.scan(DriverValue::Bool(true)).is_err());
    assert_eq!(t.must_value(), Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap());

    let mut byte = Byte::from_value(b'x');
    assert!(byte.scan(DriverValue::Text("xy".into())).is_err());
    assert!(byte.scan(DriverValue::Int64(256)).is_err());
    assert_eq!(byte, Byte::from_value(b'x'));

    let id = Uuid::random();
    let mut copy = id;
    assert!(copy.scan(DriverValue::Text("nope".into())).is_err());
    assert_eq!(copy, id);

    let mut absent = Float64::default();
    assert!(absent.scan(DriverValue::Time(Default::default())).is_err());
    assert!(!absent.is_valid());
}

#[test]
fn test_error_codes() {
    let err = Int16::from_value(300)
        .with_valuer(IntegerKind::Int8)
        .driver_value()
        .unwrap_err();
    assert_eq!(err.code(), "NULL_VALUER");

    let err = Int8::default().scan(DriverValue::Bool(true)).unwrap_err();
    assert_eq!(err.code(), "NULL_SCAN");
}
