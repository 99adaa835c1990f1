//! Wrappers with no behaviour beyond the generic container.

use crate::nullable::Nullable;

/// Nullable `bool`. `false` is a value, not null.
pub type Bool = Nullable<bool>;

/// Nullable `f32`. Non-finite values cannot be marshaled to JSON.
pub type Float32 = Nullable<f32>;

/// Nullable `f64`. Non-finite values cannot be marshaled to JSON.
pub type Float64 = Nullable<f64>;

/// Nullable string. A blank string is a value; only absence is null.
pub type String = Nullable<std::string::String>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertError;
    use crate::driver::DriverValue;
    use crate::error::Cause;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bool_zero_is_not_null() {
        let b = Bool::new(false, true);
        assert!(b.is_valid());
        assert_eq!(b.marshal_json().unwrap(), b"false");
        assert_eq!(b.marshal_text().unwrap(), b"false");
    }

    #[test]
    fn test_blank_string_is_valid() {
        let mut s = String::default();
        s.unmarshal_json(br#""""#).unwrap();
        assert!(s.is_valid());
        assert!(s.is_zero());

        s.scan(DriverValue::Bytes(b"hi".to_vec())).unwrap();
        assert_eq!(s.must_value(), "hi");
    }

    #[test]
    fn test_float_text_is_shortest_decimal() {
        assert_eq!(Float64::from_value(0.1).marshal_text().unwrap(), b"0.1");
        assert_eq!(Float64::from_value(1e21).marshal_text().unwrap(), b"1000000000000000000000");
        assert_eq!(Float32::from_value(2.5).marshal_json().unwrap(), b"2.5");

        let mut f = Float32::default();
        f.unmarshal_text(b"0").unwrap();
        assert!(f.is_valid());
        assert_eq!(f.must_value(), 0.0);
    }

    #[test]
    fn test_float_text_overflow_is_rejected() {
        let mut f32_wrapper = Float32::from_value(1.5);
        let err = f32_wrapper.unmarshal_text(b"1e39").unwrap_err();
        assert!(err.is_unmarshal());
        assert!(err.has_cause(|c| matches!(c, Cause::FloatRange(text) if text == "1e39")));
        assert_eq!(f32_wrapper, Float32::from_value(1.5));

        let mut f64_wrapper = Float64::default();
        assert!(f64_wrapper.unmarshal_text(b"1e400").is_err());
        assert!(!f64_wrapper.is_valid());

        f64_wrapper.unmarshal_text(b"-inf").unwrap();
        assert_eq!(f64_wrapper.must_value(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_float_scan_overflow_is_rejected() {
        let mut f32_wrapper = Float32::from_value(1.5);
        let err = f32_wrapper.scan(DriverValue::Text("1e39".into())).unwrap_err();
        assert!(err.is_scan());
        assert_eq!(f32_wrapper, Float32::from_value(1.5));

        let mut f64_wrapper = Float64::from_value(2.0);
        let err = f64_wrapper.scan(DriverValue::Text("1e400".into())).unwrap_err();
        assert!(err.has_cause(|c| matches!(c, Cause::Convert(ConvertError::Invalid { .. }))));
        assert_eq!(f64_wrapper, Float64::from_value(2.0));

        f64_wrapper.scan(DriverValue::Text("inf".into())).unwrap();
        assert_eq!(f64_wrapper.must_value(), f64::INFINITY);
    }

    #[test]
    fn test_float_scan_from_integer() {
        let mut f = Float64::default();
        f.scan(DriverValue::Int64(3)).unwrap();
        assert_eq!(f.driver_value().unwrap(), DriverValue::Float64(3.0));
    }
}
