//! Byte-sequence wrapper.
//!
//! The structured form embeds the stored bytes verbatim, so a valid `Bytes`
//! must already hold a JSON document to marshal into a well-formed one. The
//! structured input side decodes a JSON string. An empty sequence marshals as
//! `null` even when valid.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::trace;

use crate::error::{NullError, Result};
use crate::literal;
use crate::nullable::Nullable;
use crate::traits::NullableValue;

const TYPE_NAME: &str = "Bytes";

/// Nullable byte sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes {
    inner: Nullable<Vec<u8>>,
}

impl Bytes {
    pub const fn new(value: Vec<u8>, valid: bool) -> Self {
        Self {
            inner: Nullable::new(value, valid),
        }
    }

    pub const fn from_value(value: Vec<u8>) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<Vec<u8>>) -> Self {
        Self {
            inner: Nullable::from_option(value),
        }
    }

    pub fn from_ref(value: Option<&[u8]>) -> Self {
        Self::from_option(value.map(<[u8]>::to_vec))
    }

    /// Stored bytes, empty when null
    pub fn as_bytes(&self) -> &[u8] {
        if self.inner.valid { &self.inner.value } else { &[] }
    }

    /// Stored bytes if valid and non-empty
    pub(crate) fn present(&self) -> Option<&[u8]> {
        (self.inner.valid && !self.inner.value.is_empty()).then_some(self.inner.value.as_slice())
    }
}

impl NullableValue for Bytes {
    type Base = Vec<u8>;

    fn nullable(&self) -> &Nullable<Vec<u8>> {
        &self.inner
    }

    fn nullable_mut(&mut self) -> &mut Nullable<Vec<u8>> {
        &mut self.inner
    }

    fn marshal_json(&self) -> Result<Vec<u8>> {
        Ok(self.present().unwrap_or(literal::NULL).to_vec())
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_json_null(data) {
            self.inner.reset();
            return Ok(());
        }
        match serde_json::from_slice::<String>(data) {
            Ok(text) => {
                self.inner.set_value(text.into_bytes());
                Ok(())
            }
            Err(e) => {
                trace!(error = %e, "bytes json decode failed");
                self.inner.reset();
                Err(NullError::decode(e, TYPE_NAME))
            }
        }
    }

    /// Refills the existing buffer, keeping its allocation
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_text_null(data) {
            self.inner.reset();
            return Ok(());
        }
        let buffer = &mut self.inner.value;
        buffer.clear();
        buffer.extend_from_slice(data);
        self.inner.valid = true;
        Ok(())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self::from_value(value)
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Self::from_value(value.to_vec())
    }
}

impl From<Option<Vec<u8>>> for Bytes {
    fn from(value: Option<Vec<u8>>) -> Self {
        Self::from_option(value)
    }
}

/// Embed `bytes` as a raw JSON document
pub(crate) fn serialize_raw<S>(bytes: Option<&[u8]>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let Some(bytes) = bytes else {
        return serializer.serialize_none();
    };
    let text = std::str::from_utf8(bytes).map_err(S::Error::custom)?;
    let raw = RawValue::from_string(text.to_owned()).map_err(S::Error::custom)?;
    serializer.serialize_some(&raw)
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_raw(self.present(), serializer)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)
            .map(|text| Self::from_option(text.map(String::into_bytes)))
    }
}
