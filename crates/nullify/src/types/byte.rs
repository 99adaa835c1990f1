//! Single-character byte wrapper.
//!
//! Unlike [`Uint8`](super::Uint8), `Byte` treats its value as a character:
//! JSON carries a one-character string and text carries the raw byte. A valid
//! zero renders as the empty string in both forms.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::driver::DriverValue;
use crate::error::{Cause, NullError, Result};
use crate::literal;
use crate::nullable::Nullable;
use crate::traits::NullableValue;
use crate::valuer::{IntegerKind, check_integer};

const TYPE_NAME: &str = "Byte";

/// Nullable single byte with character semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Byte {
    inner: Nullable<u8>,
}

impl Byte {
    pub const fn new(value: u8, valid: bool) -> Self {
        Self {
            inner: Nullable::new(value, valid),
        }
    }

    pub const fn from_value(value: u8) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<u8>) -> Self {
        Self {
            inner: Nullable::from_option(value),
        }
    }

    pub fn from_ref(value: Option<&u8>) -> Self {
        Self::from_option(value.copied())
    }

    /// Character form of the stored byte; empty for zero
    fn as_text(self) -> String {
        match self.inner.value {
            0 => String::new(),
            b => char::from(b).to_string(),
        }
    }
}

/// Byte carried by a string: `None` when empty, the code point when it is a
/// single character up to U+00FF
fn byte_from_str(text: &str) -> std::result::Result<Option<u8>, Cause> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => u8::try_from(c).map(Some).map_err(|_| Cause::ByteLength),
        _ => Err(Cause::ByteLength),
    }
}

impl NullableValue for Byte {
    type Base = u8;

    fn nullable(&self) -> &Nullable<u8> {
        &self.inner
    }

    fn nullable_mut(&mut self) -> &mut Nullable<u8> {
        &mut self.inner
    }

    fn marshal_json(&self) -> Result<Vec<u8>> {
        if !self.inner.valid {
            return Ok(literal::NULL.to_vec());
        }
        serde_json::to_vec(&self.as_text())
            .map_err(|e| NullError::marshal(TYPE_NAME).with_cause(e))
    }

    fn marshal_text(&self) -> Result<Vec<u8>> {
        if !self.inner.valid || self.inner.value == 0 {
            return Ok(literal::EMPTY.to_vec());
        }
        Ok(vec![self.inner.value])
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_json_null(data) {
            self.inner.reset();
            return Ok(());
        }
        let text: String = match serde_json::from_slice(data) {
            Ok(text) => text,
            Err(e) => {
                trace!(error = %e, "byte json decode failed");
                self.inner.reset();
                return Err(NullError::decode(e, TYPE_NAME));
            }
        };
        match byte_from_str(&text) {
            Ok(value) => {
                self.inner.set_value(value.unwrap_or_default());
                Ok(())
            }
            Err(cause) => {
                self.inner.reset();
                Err(NullError::unmarshal("json", TYPE_NAME).with_cause(cause))
            }
        }
    }

    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        match data {
            [] => self.inner.reset(),
            [b] => self.inner.set_value(*b),
            _ => {
                return Err(NullError::unmarshal("text", TYPE_NAME).with_cause(Cause::ByteLength));
            }
        }
        Ok(())
    }

    fn scan(&mut self, src: DriverValue) -> Result<()> {
        let kind = src.kind_name();
        match src {
            DriverValue::Null => self.inner.reset(),
            DriverValue::Text(text) => match byte_from_str(&text) {
                Ok(Some(b)) => self.inner.set_value(b),
                Ok(None) => self.inner.reset(),
                Err(cause) => return Err(NullError::scan(kind, TYPE_NAME).with_cause(cause)),
            },
            src if src.is_integer() => match check_integer(src, Some(IntegerKind::Uint8)) {
                Ok(DriverValue::Uint8(b)) => self.inner.set_value(b),
                Ok(_) => return Err(NullError::scan(kind, TYPE_NAME)),
                Err(cause) => return Err(NullError::scan(kind, TYPE_NAME).with_cause(cause)),
            },
            _ => return Err(NullError::scan(kind, TYPE_NAME)),
        }
        Ok(())
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<u8>> for Byte {
    fn from(value: Option<u8>) -> Self {
        Self::from_option(value)
    }
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.valid {
            f.write_str(&self.as_text())
        } else {
            f.write_str("null")
        }
    }
}

impl Serialize for Byte {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.inner.valid {
            serializer.serialize_some(&self.as_text())
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for Byte {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        let value = byte_from_str(&text).map_err(D::Error::custom)?;
        Ok(Self::from_value(value.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_forms() {
        assert_eq!(Byte::default().marshal_json().unwrap(), b"null");
        assert_eq!(Byte::from_value(0).marshal_json().unwrap(), br#""""#);
        assert_eq!(Byte::from_value(b'a').marshal_json().unwrap(), br#""a""#);
        assert_eq!(Byte::from_value(0xE9).marshal_json().unwrap(), "\"\u{e9}\"".as_bytes());
    }

    #[test]
    fn test_json_roundtrip_latin1() {
        let original = Byte::from_value(0xE9);
        let mut back = Byte::default();
        back.unmarshal_json(&original.marshal_json().unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_json_rejects_multi_char() {
        let mut b = Byte::from_value(b'x');
        let err = b.unmarshal_json(br#""ab""#).unwrap_err();
        assert!(err.is_unmarshal());
        assert!(err.has_cause(|c| matches!(c, Cause::ByteLength)));
        assert_eq!(b, Byte::default());

        let err = b.unmarshal_json(b"7").unwrap_err();
        assert!(err.is_unmarshal());
    }

    #[test]
    fn test_json_empty_string_is_valid_zero() {
        let mut b = Byte::default();
        b.unmarshal_json(br#""""#).unwrap();
        assert!(b.is_valid());
        assert!(b.is_zero());
    }

    #[test]
    fn test_text_forms() {
        let mut b = Byte::default();
        assert_eq!(b.marshal_text().unwrap(), b"");

        b.unmarshal_text(b"z").unwrap();
        assert_eq!(b.must_value(), b'z');
        assert_eq!(b.marshal_text().unwrap(), b"z");

        let err = b.unmarshal_text(b"ab").unwrap_err();
        assert!(err.is_unmarshal());
        assert_eq!(b.must_value(), b'z');

        b.unmarshal_text(b"").unwrap();
        assert_eq!(b, Byte::default());
    }

    #[test]
    fn test_scan_sources() {
        let mut b = Byte::default();
        b.scan(DriverValue::Text("q".into())).unwrap();
        assert_eq!(b.must_value(), b'q');

        b.scan(DriverValue::Int64(65)).unwrap();
        assert_eq!(b.must_value(), b'A');

        b.scan(DriverValue::Text(String::new())).unwrap();
        assert!(!b.is_valid());

        let err = b.scan(DriverValue::Int64(256)).unwrap_err();
        assert!(err.is_scan());
        assert!(err.is_overflow());

        let err = b.scan(DriverValue::Text("long".into())).unwrap_err();
        assert!(err.has_cause(|c| matches!(c, Cause::ByteLength)));

        let err = b.scan(DriverValue::Float64(1.0)).unwrap_err();
        assert!(err.is_scan());
        assert!(err.causes().is_empty());

        b.scan(DriverValue::Null).unwrap();
        assert_eq!(b, Byte::default());
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Byte::from_value(b'k')).unwrap(), r#""k""#);
        let b: Byte = serde_json::from_str(r#""k""#).unwrap();
        assert_eq!(b, Byte::from_value(b'k'));
        assert!(serde_json::from_str::<Byte>(r#""kk""#).is_err());
        let b: Byte = serde_json::from_str("null").unwrap();
        assert!(!b.is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(Byte::from_value(b'x').to_string(), "x");
        assert_eq!(Byte::default().to_string(), "null");
    }
}
