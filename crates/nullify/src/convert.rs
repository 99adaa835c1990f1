//! Convert-assign coercions from a [`DriverValue`] into base types.
//!
//! These mirror what a storage driver is expected to do when the column kind
//! and the destination field disagree: widen numbers, parse decimal text,
//! decode UTF-8 bytes. A `Null` source never reaches this module; wrappers
//! handle absence before coercing.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use thiserror::Error;

use crate::driver::DriverValue;

/// Failure to coerce a driver value into a base type
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No coercion exists between the two kinds
    #[error("converting driver value of kind {from} to {to} is unsupported")]
    Unsupported { from: &'static str, to: &'static str },

    /// The coercion exists but this particular value does not fit
    #[error("converting {from} {input:?} to {to}: {reason}")]
    Invalid {
        from: &'static str,
        to: &'static str,
        input: String,
        reason: String,
    },
}

impl ConvertError {
    pub(crate) fn unsupported(src: &DriverValue, to: &'static str) -> Self {
        Self::Unsupported {
            from: src.kind_name(),
            to,
        }
    }

    pub(crate) fn invalid(
        src: &DriverValue,
        to: &'static str,
        input: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Invalid {
            from: src.kind_name(),
            to,
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

type ConvertResult<T> = Result<T, ConvertError>;

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Boolean spellings accepted by text parsing and scanning
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Whether float text spells an infinity or NaN rather than a finite decimal
pub(crate) fn is_non_finite_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

/// Instant rendering used when a time is coerced into text
pub(crate) fn time_text(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Text carried by a `Text` source or a UTF-8 `Bytes` source
fn source_text<'a>(src: &'a DriverValue, to: &'static str) -> ConvertResult<Option<Cow<'a, str>>> {
    match src {
        DriverValue::Text(text) => Ok(Some(Cow::Borrowed(text))),
        DriverValue::Bytes(bytes) => std::str::from_utf8(bytes)
            .map(|text| Some(Cow::Borrowed(text)))
            .map_err(|e| ConvertError::invalid(src, to, String::from_utf8_lossy(bytes), e)),
        _ => Ok(None),
    }
}

/// Text form of any scalar source, used by string and byte destinations
fn scalar_text(src: &DriverValue) -> Option<String> {
    if let Some(int) = src.as_i128() {
        return Some(int.to_string());
    }
    match src {
        DriverValue::Float32(v) => Some(v.to_string()),
        DriverValue::Float64(v) => Some(v.to_string()),
        DriverValue::Bool(v) => Some(v.to_string()),
        DriverValue::Time(v) => Some(time_text(v)),
        _ => None,
    }
}

// ============================================================================
// NUMERIC TARGETS
// ============================================================================

/// Coerce into an integer of type `T`, rejecting values outside its range
pub fn to_integer<T>(src: &DriverValue, to: &'static str) -> ConvertResult<T>
where
    T: TryFrom<i128>,
{
    let wide = if let Some(int) = src.as_i128() {
        int
    } else if let Some(float) = src.as_f64() {
        if !float.is_finite() || float.fract() != 0.0 {
            return Err(ConvertError::invalid(src, to, float.to_string(), "not an integral value"));
        }
        float as i128
    } else if let Some(text) = source_text(src, to)? {
        text.parse::<i128>()
            .map_err(|e| ConvertError::invalid(src, to, &*text, e))?
    } else if let DriverValue::Bool(flag) = src {
        return Err(ConvertError::invalid(src, to, flag.to_string(), "invalid syntax"));
    } else {
        return Err(ConvertError::unsupported(src, to));
    };

    T::try_from(wide)
        .map_err(|_| ConvertError::invalid(src, to, wide.to_string(), "value out of range"))
}

/// Coerce into an `f64`
pub fn to_f64(src: &DriverValue) -> ConvertResult<f64> {
    const TO: &str = "f64";
    if let Some(float) = src.as_f64() {
        return Ok(float);
    }
    if let Some(int) = src.as_i128() {
        return Ok(int as f64);
    }
    match source_text(src, TO)? {
        Some(text) => {
            let float = text
                .parse::<f64>()
                .map_err(|e| ConvertError::invalid(src, TO, &*text, e))?;
            if !float.is_finite() && !is_non_finite_literal(&text) {
                return Err(ConvertError::invalid(src, TO, &*text, "value out of range"));
            }
            Ok(float)
        }
        None => Err(ConvertError::unsupported(src, TO)),
    }
}

/// Coerce into an `f32`, rejecting finite values that overflow the narrower width
pub fn to_f32(src: &DriverValue) -> ConvertResult<f32> {
    const TO: &str = "f32";
    if let DriverValue::Float32(v) = *src {
        return Ok(v);
    }
    let wide = to_f64(src).map_err(|e| match e {
        ConvertError::Unsupported { from, .. } => ConvertError::Unsupported { from, to: TO },
        ConvertError::Invalid { from, input, reason, .. } => ConvertError::Invalid {
            from,
            to: TO,
            input,
            reason,
        },
    })?;
    let narrow = wide as f32;
    if wide.is_finite() && narrow.is_infinite() {
        return Err(ConvertError::invalid(src, TO, wide.to_string(), "value out of range"));
    }
    Ok(narrow)
}

// ============================================================================
// OTHER TARGETS
// ============================================================================

/// Coerce into a `bool`
pub fn to_bool(src: &DriverValue) -> ConvertResult<bool> {
    const TO: &str = "bool";
    if let DriverValue::Bool(v) = *src {
        return Ok(v);
    }
    if let Some(int) = src.as_i128() {
        return match int {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(ConvertError::invalid(src, TO, int.to_string(), "invalid syntax")),
        };
    }
    match source_text(src, TO)? {
        Some(text) => parse_bool(&text)
            .ok_or_else(|| ConvertError::invalid(src, TO, &*text, "invalid syntax")),
        None => Err(ConvertError::unsupported(src, TO)),
    }
}

/// Coerce into a `String`
pub fn to_string(src: DriverValue) -> ConvertResult<String> {
    const TO: &str = "string";
    match src {
        DriverValue::Text(text) => Ok(text),
        DriverValue::Bytes(bytes) => String::from_utf8(bytes).map_err(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            ConvertError::Invalid {
                from: "bytes",
                to: TO,
                input: lossy,
                reason: e.utf8_error().to_string(),
            }
        }),
        other => scalar_text(&other).ok_or_else(|| ConvertError::unsupported(&other, TO)),
    }
}

/// Coerce into a byte sequence
pub fn to_bytes(src: DriverValue) -> ConvertResult<Vec<u8>> {
    match src {
        DriverValue::Bytes(bytes) => Ok(bytes),
        DriverValue::Text(text) => Ok(text.into_bytes()),
        other => scalar_text(&other)
            .map(String::into_bytes)
            .ok_or_else(|| ConvertError::unsupported(&other, "bytes")),
    }
}

/// Coerce into an instant. Only native time sources are accepted.
pub fn to_time(src: &DriverValue) -> ConvertResult<DateTime<FixedOffset>> {
    match *src {
        DriverValue::Time(v) => Ok(v),
        _ => Err(ConvertError::unsupported(src, "time")),
    }
}
