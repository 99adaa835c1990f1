//! Per-base-type capabilities consumed by [`Nullable`](crate::Nullable).
//!
//! The text codec, the driver coercion and the storage form all differ by
//! base type. Each primitive resolves them at compile time through
//! [`BaseValue`]; any other type gets the defaults, which fall back to JSON
//! for text output and report the remaining operations as unsupported.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::convert::{self, ConvertError};
use crate::driver::DriverValue;
use crate::error::Cause;
use crate::literal;

/// A type that can sit inside a [`Nullable`](crate::Nullable)
///
/// # Examples
///
/// ```
/// use nullify::{BaseValue, Nullable};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl BaseValue for Point {}
///
/// let p = Nullable::from_value(Point { x: 1, y: 2 });
/// assert_eq!(p.marshal_text().unwrap(), br#"{"x":1,"y":2}"#);
/// ```
pub trait BaseValue: Clone + Default + PartialEq + Serialize + DeserializeOwned {
    /// Descriptor used in error contexts
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Structured encoding of a present value
    fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Text encoding of a present value. Defaults to the structured encoding.
    fn encode_text(&self) -> Result<Vec<u8>, Cause> {
        self.encode_json().map_err(Cause::from)
    }

    /// Parse non-empty text. `None` means this type has no text parser.
    fn decode_text(_text: &[u8]) -> Option<Result<Self, Cause>> {
        None
    }

    /// Coerce a non-null driver value into this type
    fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
        Err(ConvertError::unsupported(&src, Self::type_name()))
    }

    /// Storage form of a present value
    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Err(Cause::TypeUnsupported)
    }
}

fn utf8(text: &[u8]) -> Result<&str, Cause> {
    std::str::from_utf8(text).map_err(Cause::from)
}

macro_rules! impl_integer_base {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BaseValue for $ty {
                fn type_name() -> &'static str {
                    stringify!($ty)
                }

                fn encode_text(&self) -> Result<Vec<u8>, Cause> {
                    Ok(self.to_string().into_bytes())
                }

                fn decode_text(text: &[u8]) -> Option<Result<Self, Cause>> {
                    Some(utf8(text).and_then(|s| s.parse::<$ty>().map_err(Cause::from)))
                }

                fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
                    convert::to_integer::<$ty>(&src, stringify!($ty))
                }

                fn to_driver(&self) -> Result<DriverValue, Cause> {
                    Ok(DriverValue::from(*self))
                }
            }
        )*
    };
}

impl_integer_base!(isize, i8, i16, i32, i64, usize, u8, u16, u32, u64);

macro_rules! impl_float_base {
    ($($ty:ty => $convert:path),* $(,)?) => {
        $(
            impl BaseValue for $ty {
                fn type_name() -> &'static str {
                    stringify!($ty)
                }

                // serde_json writes non-finite floats as `null`, which would
                // read back as an absent value.
                fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error> {
                    if self.is_finite() {
                        serde_json::to_vec(self)
                    } else {
                        Err(serde::ser::Error::custom(format_args!(
                            "unsupported value: {self}"
                        )))
                    }
                }

                fn encode_text(&self) -> Result<Vec<u8>, Cause> {
                    Ok(self.to_string().into_bytes())
                }

                fn decode_text(text: &[u8]) -> Option<Result<Self, Cause>> {
                    Some(utf8(text).and_then(|s| s.parse::<$ty>().map_err(Cause::from)))
                }

                fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
                    $convert(&src)
                }

                fn to_driver(&self) -> Result<DriverValue, Cause> {
                    Ok(DriverValue::from(*self))
                }
            }
        )*
    };
}

impl_float_base!(f32 => convert::to_f32, f64 => convert::to_f64);

impl BaseValue for bool {
    fn type_name() -> &'static str {
        "bool"
    }

    fn encode_text(&self) -> Result<Vec<u8>, Cause> {
        Ok(if *self { literal::TRUE } else { literal::FALSE }.to_vec())
    }

    fn decode_text(text: &[u8]) -> Option<Result<Self, Cause>> {
        Some(utf8(text).and_then(|s| {
            convert::parse_bool(s).ok_or_else(|| Cause::ParseBool(s.to_owned()))
        }))
    }

    fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
        convert::to_bool(&src)
    }

    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Ok(DriverValue::Bool(*self))
    }
}

impl BaseValue for String {
    fn type_name() -> &'static str {
        "string"
    }

    fn encode_text(&self) -> Result<Vec<u8>, Cause> {
        Ok(self.clone().into_bytes())
    }

    fn decode_text(text: &[u8]) -> Option<Result<Self, Cause>> {
        Some(utf8(text).map(str::to_owned))
    }

    fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
        convert::to_string(src)
    }

    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Ok(DriverValue::Text(self.clone()))
    }
}

/// Byte sequences render as raw text but have no generic text parser; the
/// `Bytes` wrapper supplies its own.
impl BaseValue for Vec<u8> {
    fn type_name() -> &'static str {
        "bytes"
    }

    fn encode_text(&self) -> Result<Vec<u8>, Cause> {
        Ok(self.clone())
    }

    fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
        convert::to_bytes(src)
    }

    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Ok(DriverValue::Bytes(self.clone()))
    }
}

/// Instants keep the structured text fallback; the `Time` wrapper layers
/// layouts and free-form parsing on top.
impl BaseValue for DateTime<FixedOffset> {
    fn type_name() -> &'static str {
        "time"
    }

    fn convert_from(src: DriverValue) -> Result<Self, ConvertError> {
        convert::to_time(&src)
    }

    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Ok(DriverValue::Time(*self))
    }
}

impl BaseValue for uuid::Uuid {
    fn type_name() -> &'static str {
        "uuid"
    }

    fn encode_text(&self) -> Result<Vec<u8>, Cause> {
        Ok(self.hyphenated().to_string().into_bytes())
    }

    fn decode_text(text: &[u8]) -> Option<Result<Self, Cause>> {
        Some(Self::try_parse_ascii(text).map_err(Cause::from))
    }

    fn to_driver(&self) -> Result<DriverValue, Cause> {
        Ok(DriverValue::Text(self.hyphenated().to_string()))
    }
}
