//! Unique identifier wrapper.
//!
//! The nil identifier is a value, so a scanned empty string is valid and
//! [`is_zero`](NullableValue::is_zero) rather than null.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::convert::ConvertError;
use crate::driver::DriverValue;
use crate::error::{NullError, Result};
use crate::nullable::Nullable;
use crate::traits::NullableValue;

const TYPE_NAME: &str = "Uuid";

/// Nullable UUID, rendered as lowercase hyphenated text
///
/// ```
/// use nullify::prelude::*;
/// use nullify::types::Uuid;
///
/// let id = Uuid::from_value("67e55044-10b1-426f-9247-bb680e5fe0c8");
/// assert_eq!(id.marshal_text().unwrap(), b"67e55044-10b1-426f-9247-bb680e5fe0c8");
/// assert!(Uuid::parse("not-a-uuid").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid {
    inner: Nullable<uuid::Uuid>,
}

impl Uuid {
    /// Build from anything with a text form, including a `uuid::Uuid`.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a UUID. Use [`Uuid::parse`] for untrusted input.
    #[track_caller]
    pub fn new(value: impl ToString, valid: bool) -> Self {
        let text = value.to_string();
        match uuid::Uuid::parse_str(&text) {
            Ok(id) => Self::from_uuid(id, valid),
            Err(e) => panic!("null: invalid uuid {text:?}: {e}"),
        }
    }

    /// # Panics
    ///
    /// Panics if `value` is not a UUID.
    #[track_caller]
    pub fn from_value(value: impl ToString) -> Self {
        Self::new(value, true)
    }

    /// # Panics
    ///
    /// Panics if `value` is `Some` and not a UUID.
    #[track_caller]
    pub fn from_option(value: Option<impl ToString>) -> Self {
        value.map_or_else(Self::default, Self::from_value)
    }

    pub const fn from_uuid(value: uuid::Uuid, valid: bool) -> Self {
        Self {
            inner: Nullable::new(value, valid),
        }
    }

    /// Parse `text` into a valid identifier
    pub fn parse(text: &str) -> Result<Self> {
        uuid::Uuid::parse_str(text)
            .map(|id| Self::from_uuid(id, true))
            .map_err(|e| NullError::unmarshal("string", TYPE_NAME).with_cause(e))
    }

    /// A fresh random (v4) identifier
    pub fn random() -> Self {
        Self::from_uuid(uuid::Uuid::new_v4(), true)
    }
}

impl NullableValue for Uuid {
    type Base = uuid::Uuid;

    fn nullable(&self) -> &Nullable<uuid::Uuid> {
        &self.inner
    }

    fn nullable_mut(&mut self) -> &mut Nullable<uuid::Uuid> {
        &mut self.inner
    }

    /// Accepts text (empty is the nil identifier), 16 raw bytes, or textual
    /// bytes. A failed parse leaves the instance unchanged.
    fn scan(&mut self, src: DriverValue) -> Result<()> {
        let kind = src.kind_name();
        let parsed = match &src {
            DriverValue::Null => {
                self.inner.reset();
                return Ok(());
            }
            DriverValue::Text(text) if text.is_empty() => Ok(uuid::Uuid::nil()),
            DriverValue::Text(text) => uuid::Uuid::parse_str(text),
            DriverValue::Bytes(bytes) if bytes.is_empty() => Ok(uuid::Uuid::nil()),
            DriverValue::Bytes(bytes) if bytes.len() == 16 => uuid::Uuid::from_slice(bytes),
            DriverValue::Bytes(bytes) => uuid::Uuid::try_parse_ascii(bytes),
            other => {
                return Err(NullError::scan(kind, TYPE_NAME)
                    .with_cause(ConvertError::unsupported(other, TYPE_NAME)));
            }
        };
        let id = parsed.map_err(|e| NullError::scan(kind, TYPE_NAME).with_cause(e))?;
        self.inner.set_value(id);
        Ok(())
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(value: uuid::Uuid) -> Self {
        Self::from_uuid(value, true)
    }
}

impl From<Option<uuid::Uuid>> for Uuid {
    fn from(value: Option<uuid::Uuid>) -> Self {
        Self {
            inner: Nullable::from_option(value),
        }
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
