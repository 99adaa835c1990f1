//! The generic value-plus-validity container.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::base::BaseValue;
use crate::driver::DriverValue;
use crate::error::{NullError, Result};
use crate::literal;

/// A value of `T` together with an explicit validity flag.
///
/// An invalid instance represents null. A valid instance holding `T`'s zero
/// value is *not* null: `Nullable::from_value(0)` is present and renders as
/// `0`, while `Nullable::<i32>::default()` is absent and renders as `null`.
///
/// Derived `PartialEq` compares both fields, so two nulls compare equal with
/// `==`. [`Nullable::equal`] follows the boundary convention instead and only
/// reports equality for two valid instances.
///
/// # Examples
///
/// ```
/// use nullify::Nullable;
///
/// let mut n = Nullable::<i64>::default();
/// assert_eq!(n.marshal_json().unwrap(), b"null");
///
/// n.unmarshal_json(b"0").unwrap();
/// assert!(n.is_valid());
/// assert!(n.is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    pub(crate) value: T,
    pub(crate) valid: bool,
}

impl<T> Nullable<T> {
    /// Pair a value with a validity flag, without validation
    #[inline]
    pub const fn new(value: T, valid: bool) -> Self {
        Self { value, valid }
    }

    /// A valid instance holding `value`
    #[inline]
    pub const fn from_value(value: T) -> Self {
        Self::new(value, true)
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Stored value regardless of validity.
    ///
    /// After a failed scan this may be stale; check [`is_valid`](Self::is_valid) first.
    #[inline]
    pub const fn raw_value(&self) -> &T {
        &self.value
    }

    /// Borrow the value if valid
    pub const fn as_option(&self) -> Option<&T> {
        if self.valid { Some(&self.value) } else { None }
    }

    /// Take the value if valid
    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    /// Assign `value` and mark the instance valid
    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.valid = true;
    }
}

impl<T: Default> Nullable<T> {
    /// Valid iff `value` is `Some`; `None` yields the zero value
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from_value(value),
            None => Self::default(),
        }
    }

    /// Reset to the zero value and mark invalid
    pub(crate) fn reset(&mut self) {
        self.value = T::default();
        self.valid = false;
    }
}

impl<T: Default + Clone> Nullable<T> {
    /// Valid iff `value` is `Some`, copying the referenced value
    pub fn from_ref(value: Option<&T>) -> Self {
        Self::from_option(value.cloned())
    }

    /// The value if valid, otherwise the zero value
    pub fn value_or_zero(&self) -> T {
        if self.valid {
            self.value.clone()
        } else {
            T::default()
        }
    }
}

impl<T: BaseValue> Nullable<T> {
    /// True if the stored value equals `T`'s zero value, regardless of validity
    pub fn is_zero(&self) -> bool {
        self.value == T::default()
    }

    /// True iff both instances are valid and hold equal values. Two nulls are
    /// not equal under this comparison.
    pub fn equal(&self, other: &Self) -> bool {
        self.valid && other.valid && self.value == other.value
    }

    /// The value, panicking if the instance is null.
    ///
    /// # Panics
    ///
    /// Panics when invalid. Use only where null is a programming error.
    #[track_caller]
    pub fn must_value(&self) -> T {
        if !self.valid {
            panic!("null: cannot must value for type {}", T::type_name());
        }
        self.value.clone()
    }

    // ------------------------------------------------------------------
    // Structured
    // ------------------------------------------------------------------

    /// JSON form: `null` when invalid, otherwise the value's own encoding
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        if !self.valid {
            return Ok(literal::NULL.to_vec());
        }
        self.value
            .encode_json()
            .map_err(|e| NullError::marshal(T::type_name()).with_cause(e))
    }

    /// Populate from JSON. Empty input or `null` yields an invalid zero.
    ///
    /// On any decode failure the instance is reset to its invalid zero form.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_json_null(data) {
            self.reset();
            return Ok(());
        }
        match serde_json::from_slice::<T>(data) {
            Ok(value) => {
                self.set_value(value);
                Ok(())
            }
            Err(e) => {
                trace!(target_type = T::type_name(), error = %e, "json decode failed");
                self.reset();
                Err(NullError::decode(e, T::type_name()))
            }
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Text form: empty when invalid, otherwise the value's natural text
    pub fn marshal_text(&self) -> Result<Vec<u8>> {
        if !self.valid {
            return Ok(literal::EMPTY.to_vec());
        }
        self.value
            .encode_text()
            .map_err(|e| NullError::marshal(T::type_name()).with_cause(e))
    }

    /// Populate from text. Empty input yields an invalid zero; `"0"` is a
    /// valid zero for numeric types.
    ///
    /// A parse failure leaves the instance unchanged.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        if literal::is_text_null(data) {
            self.reset();
            return Ok(());
        }
        match T::decode_text(data) {
            Some(Ok(value)) => {
                self.set_value(value);
                Ok(())
            }
            Some(Err(cause)) => {
                trace!(target_type = T::type_name(), error = %cause, "text decode failed");
                Err(NullError::unmarshal("text", T::type_name()).with_cause(cause))
            }
            None => Err(NullError::unmarshal("text", T::type_name())),
        }
    }

    // ------------------------------------------------------------------
    // Driver
    // ------------------------------------------------------------------

    /// Populate from a driver value. `Null` yields an invalid zero; failed
    /// coercion leaves the instance unchanged.
    pub fn scan(&mut self, src: DriverValue) -> Result<()> {
        if src.is_null() {
            self.reset();
            return Ok(());
        }
        let kind = src.kind_name();
        let value = T::convert_from(src)
            .map_err(|e| NullError::scan(kind, T::type_name()).with_cause(e))?;
        self.set_value(value);
        Ok(())
    }

    /// Storage form: `Null` when invalid, otherwise the value's driver form
    pub fn driver_value(&self) -> Result<DriverValue> {
        if !self.valid {
            return Ok(DriverValue::Null);
        }
        self.value
            .to_driver()
            .map_err(|e| NullError::valuer(T::type_name()).with_cause(e))
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("null"),
        }
    }
}

// ============================================================================
// SERDE
// ============================================================================

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_option() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
