//! Instant wrapper with a configurable output layout and free-form parsing.
//!
//! Parsing goes through [`parse_strict`] or [`parse_any`] depending on the
//! wrapper's mode, so the same wrapper accepts RFC 3339, RFC 2822, numeric
//! dates and Unix epoch digits. Output always uses the configured layout.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::driver::DriverValue;
use crate::error::{Cause, NullError, Result};
use crate::literal;
use crate::nullable::Nullable;
use crate::temporal::layout::{self, DEFAULT_LAYOUT, FormatLayout};
use crate::temporal::{ParseOptions, TimeParseError, parse_any, parse_strict};
use crate::traits::NullableValue;

const TYPE_NAME: &str = "Time";

/// Nullable instant with a fixed UTC offset
///
/// ```
/// use nullify::prelude::*;
/// use nullify::temporal::DATE_ONLY;
/// use nullify::types::Time;
///
/// let mut t = Time::default().with_lenient_parsing();
/// t.unmarshal_text(b"03/04/2020").unwrap();
/// assert_eq!(t.marshal_json().unwrap(), br#""2020-03-04T00:00:00Z""#);
///
/// let t = t.with_layout(DATE_ONLY);
/// assert_eq!(t.marshal_text().unwrap(), b"2020-03-04");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Time {
    inner: Nullable<DateTime<FixedOffset>>,
    layout: Cow<'static, str>,
    strict: bool,
    parse_options: ParseOptions,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            inner: Nullable::default(),
            layout: Cow::Borrowed(DEFAULT_LAYOUT),
            strict: true,
            parse_options: ParseOptions::default(),
        }
    }
}

impl Time {
    pub fn new(value: DateTime<FixedOffset>, valid: bool) -> Self {
        Self {
            inner: Nullable::new(value, valid),
            ..Self::default()
        }
    }

    pub fn from_value(value: DateTime<FixedOffset>) -> Self {
        Self::new(value, true)
    }

    pub fn from_option(value: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            inner: Nullable::from_option(value),
            ..Self::default()
        }
    }

    pub fn from_ref(value: Option<&DateTime<FixedOffset>>) -> Self {
        Self::from_option(value.copied())
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Output layout in strftime syntax; empty renders as [`DEFAULT_LAYOUT`]
    #[must_use]
    pub fn with_layout(mut self, layout: impl Into<Cow<'static, str>>) -> Self {
        self.layout = layout.into();
        self
    }

    #[must_use]
    pub fn with_default_layout(self) -> Self {
        self.with_layout(DEFAULT_LAYOUT)
    }

    /// Reject dates whose day and month order is ambiguous
    #[must_use]
    pub fn with_strict_parsing(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Resolve ambiguous day and month order from the parse options
    #[must_use]
    pub fn with_lenient_parsing(mut self) -> Self {
        self.strict = false;
        self
    }

    #[must_use]
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    // ------------------------------------------------------------------
    // Formatting and parsing
    // ------------------------------------------------------------------

    /// Render the stored instant, valid or not, with the selected layout
    pub fn format(&self, layout: FormatLayout<'_>) -> Result<String> {
        let layout = match layout {
            FormatLayout::Default => DEFAULT_LAYOUT,
            FormatLayout::Configured => &*self.layout,
            FormatLayout::Custom(layout) => layout,
        };
        layout::render(&self.inner.value, layout)
            .map_err(|e| NullError::marshal(TYPE_NAME).with_cause(e))
    }

    fn parse(&self, text: &str) -> std::result::Result<DateTime<FixedOffset>, TimeParseError> {
        if self.strict {
            parse_strict(text, &self.parse_options)
        } else {
            parse_any(text, &self.parse_options)
        }
    }
}

impl NullableValue for Time {
    type Base = DateTime<FixedOffset>;

    fn nullable(&self) -> &Nullable<DateTime<FixedOffset>> {
        &self.inner
    }

    fn nullable_mut(&mut self) -> &mut Nullable<DateTime<FixedOffset>> {
        &mut self.inner
    }

    fn marshal_json(&self) -> Result<Vec<u8>> {
        if !self.inner.valid {
            return Ok(literal::NULL.to_vec());
        }
        let text = self.format(FormatLayout::Configured)?;
        serde_json::to_vec(&text).map_err(|e| NullError::marshal(TYPE_NAME).with_cause(e))
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_json_null(data) {
            self.inner.reset();
            return Ok(());
        }
        let text: String = match serde_json::from_slice(data) {
            Ok(text) => text,
            Err(e) => {
                trace!(error = %e, "time json decode failed");
                self.inner.reset();
                return Err(NullError::decode(e, TYPE_NAME));
            }
        };
        match self.parse(&text) {
            Ok(instant) => {
                self.inner.set_value(instant);
                Ok(())
            }
            Err(e) => {
                self.inner.reset();
                Err(NullError::unmarshal("json", TYPE_NAME).with_cause(e))
            }
        }
    }

    fn marshal_text(&self) -> Result<Vec<u8>> {
        if !self.inner.valid {
            return Ok(literal::EMPTY.to_vec());
        }
        self.format(FormatLayout::Configured).map(String::into_bytes)
    }

    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_text_null(data) {
            self.inner.reset();
            return Ok(());
        }
        let text = std::str::from_utf8(data)
            .map_err(|e| NullError::unmarshal("text", TYPE_NAME).with_cause(e))?;
        let instant = self
            .parse(text)
            .map_err(|e| NullError::unmarshal("text", TYPE_NAME).with_cause(e))?;
        self.inner.set_value(instant);
        Ok(())
    }

    /// Accepts instants, date text, and `Int64` Unix seconds. Empty text is
    /// null; a failed parse leaves the instance unchanged.
    fn scan(&mut self, src: DriverValue) -> Result<()> {
        let kind = src.kind_name();
        let text = match src {
            DriverValue::Null => {
                self.inner.reset();
                return Ok(());
            }
            DriverValue::Time(instant) => {
                self.inner.set_value(instant);
                return Ok(());
            }
            DriverValue::Int64(secs) => {
                let instant = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                    NullError::scan(kind, TYPE_NAME).with_cause(TimeParseError::OutOfRange {
                        input: secs.to_string(),
                    })
                })?;
                self.inner.set_value(instant.fixed_offset());
                return Ok(());
            }
            DriverValue::Text(text) => text,
            DriverValue::Bytes(bytes) => String::from_utf8(bytes)
                .map_err(|e| NullError::scan(kind, TYPE_NAME).with_cause(e.utf8_error()))?,
            _ => return Err(NullError::scan(kind, TYPE_NAME)),
        };
        if text.is_empty() {
            self.inner.reset();
            return Ok(());
        }
        let instant = self
            .parse(&text)
            .map_err(|e| NullError::scan(kind, TYPE_NAME).with_cause(Cause::Time(e)))?;
        self.inner.set_value(instant);
        Ok(())
    }
}

impl From<DateTime<FixedOffset>> for Time {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::from_value(value)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_value(value.fixed_offset())
    }
}

impl From<Option<DateTime<FixedOffset>>> for Time {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        Self::from_option(value)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.valid {
            return f.write_str("null");
        }
        let text = self.format(FormatLayout::Configured).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.inner.valid {
            return serializer.serialize_none();
        }
        let text = self.format(FormatLayout::Configured).map_err(S::Error::custom)?;
        serializer.serialize_some(&text)
    }
}

/// Deserializes with the default layout and strict parsing
impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        let mut time = Self::default();
        let instant = time.parse(&text).map_err(D::Error::custom)?;
        time.inner.set_value(instant);
        Ok(time)
    }
}
