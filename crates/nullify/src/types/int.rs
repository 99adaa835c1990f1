//! Signed integer wrappers.
//!
//! Each wrapper may carry an [`IntegerKind`] destination. When set,
//! `driver_value` re-expresses the value at that width and fails with an
//! overflow cause instead of truncating.

use serde::{Deserialize, Serialize};

use crate::driver::DriverValue;
use crate::error::{NullError, Result};
use crate::nullable::Nullable;
use crate::traits::NullableValue;
use crate::valuer::{IntegerKind, check_integer};

macro_rules! integer_wrapper {
    ($(#[$meta:meta])* $name:ident($base:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            inner: Nullable<$base>,
            #[serde(skip)]
            valuer: Option<IntegerKind>,
        }

        impl $name {
            /// Pair a value with a validity flag
            pub const fn new(value: $base, valid: bool) -> Self {
                Self {
                    inner: Nullable::new(value, valid),
                    valuer: None,
                }
            }

            /// A valid instance holding `value`
            pub const fn from_value(value: $base) -> Self {
                Self::new(value, true)
            }

            /// Valid iff `value` is `Some`
            pub fn from_option(value: Option<$base>) -> Self {
                Self {
                    inner: Nullable::from_option(value),
                    valuer: None,
                }
            }

            /// Valid iff `value` is `Some`, copying the referenced value
            pub fn from_ref(value: Option<&$base>) -> Self {
                Self::from_option(value.copied())
            }

            /// Produce storage values at `kind` instead of the natural width
            pub const fn with_valuer(mut self, kind: IntegerKind) -> Self {
                self.valuer = Some(kind);
                self
            }

            /// Configured storage width, if any
            pub const fn valuer(&self) -> Option<IntegerKind> {
                self.valuer
            }
        }

        impl NullableValue for $name {
            type Base = $base;

            fn nullable(&self) -> &Nullable<$base> {
                &self.inner
            }

            fn nullable_mut(&mut self) -> &mut Nullable<$base> {
                &mut self.inner
            }

            fn driver_value(&self) -> Result<DriverValue> {
                let value = self.inner.driver_value()?;
                if value.is_null() {
                    return Ok(value);
                }
                check_integer(value, self.valuer)
                    .map_err(|cause| NullError::valuer(stringify!($name)).with_cause(cause))
            }
        }

        impl From<$base> for $name {
            fn from(value: $base) -> Self {
                Self::from_value(value)
            }
        }

        impl From<Option<$base>> for $name {
            fn from(value: Option<$base>) -> Self {
                Self::from_option(value)
            }
        }

        impl From<$name> for Nullable<$base> {
            fn from(value: $name) -> Self {
                value.inner
            }
        }
    };
}

pub(crate) use integer_wrapper;

integer_wrapper! {
    /// Nullable `isize`
    Int(isize)
}

integer_wrapper! {
    /// Nullable `i8`
    Int8(i8)
}

integer_wrapper! {
    /// Nullable `i16`
    ///
    /// ```
    /// use nullify::prelude::*;
    /// use nullify::types::Int16;
    /// use nullify::{DriverValue, IntegerKind};
    ///
    /// let n = Int16::from_value(100).with_valuer(IntegerKind::Int8);
    /// assert_eq!(n.driver_value().unwrap(), DriverValue::Int8(100));
    ///
    /// let n = Int16::from_value(300).with_valuer(IntegerKind::Int8);
    /// assert!(n.driver_value().unwrap_err().is_overflow());
    /// ```
    Int16(i16)
}

integer_wrapper! {
    /// Nullable `i32`
    Int32(i32)
}

integer_wrapper! {
    /// Nullable `i64`
    Int64(i64)
}
