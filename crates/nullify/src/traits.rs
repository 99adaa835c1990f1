//! Capability interface shared by [`Nullable`] and every named wrapper.
//!
//! A wrapper exposes its inner container through [`NullableValue::nullable`]
//! and [`NullableValue::nullable_mut`]; every other method has a default that
//! forwards to the container. Wrappers override only the boundary methods
//! whose behaviour differs for their base type.

use crate::base::BaseValue;
use crate::driver::DriverValue;
use crate::error::Result;
use crate::nullable::Nullable;

/// A value that may be null, with structured, text and driver codecs.
///
/// Code that handles "any nullable column" can be written once against this
/// trait:
///
/// ```
/// use nullify::prelude::*;
/// use nullify::types::{Int16, String};
///
/// fn render<N: NullableValue>(n: &N) -> std::string::String {
///     std::string::String::from_utf8(n.marshal_json().unwrap()).unwrap()
/// }
///
/// assert_eq!(render(&Int16::from_value(7)), "7");
/// assert_eq!(render(&String::default()), "null");
/// ```
pub trait NullableValue {
    /// The type held when valid
    type Base: BaseValue;

    fn nullable(&self) -> &Nullable<Self::Base>;

    fn nullable_mut(&mut self) -> &mut Nullable<Self::Base>;

    fn is_valid(&self) -> bool {
        self.nullable().is_valid()
    }

    fn is_zero(&self) -> bool {
        self.nullable().is_zero()
    }

    /// True iff both are valid and hold equal values
    fn equal(&self, other: &Self) -> bool {
        self.nullable().equal(other.nullable())
    }

    /// # Panics
    ///
    /// Panics when invalid.
    #[track_caller]
    fn must_value(&self) -> Self::Base {
        self.nullable().must_value()
    }

    fn as_option(&self) -> Option<&Self::Base> {
        self.nullable().as_option()
    }

    fn value_or_zero(&self) -> Self::Base {
        self.nullable().value_or_zero()
    }

    fn set_value(&mut self, value: Self::Base) {
        self.nullable_mut().set_value(value);
    }

    fn marshal_json(&self) -> Result<Vec<u8>> {
        self.nullable().marshal_json()
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        self.nullable_mut().unmarshal_json(data)
    }

    fn marshal_text(&self) -> Result<Vec<u8>> {
        self.nullable().marshal_text()
    }

    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        self.nullable_mut().unmarshal_text(data)
    }

    /// Populate from a driver value. `Null` resets to an invalid zero. On
    /// error the instance is left exactly as it was, value and validity both.
    fn scan(&mut self, src: DriverValue) -> Result<()> {
        self.nullable_mut().scan(src)
    }

    fn driver_value(&self) -> Result<DriverValue> {
        self.nullable().driver_value()
    }
}

impl<T: BaseValue> NullableValue for Nullable<T> {
    type Base = T;

    #[inline]
    fn nullable(&self) -> &Nullable<T> {
        self
    }

    #[inline]
    fn nullable_mut(&mut self) -> &mut Nullable<T> {
        self
    }
}
