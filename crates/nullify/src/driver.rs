//! Dynamic scalar exchanged with a tabular-storage driver.
//!
//! [`DriverValue`] is both the source handed to `scan` and the storable value
//! produced by `driver_value`. [`DriverValue::Null`] stands for an absent
//! column.

use chrono::{DateTime, FixedOffset, Utc};

/// A storage-bound scalar of dynamic kind
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DriverValue {
    #[default]
    Null,
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
    Text(String),
    Time(DateTime<FixedOffset>),
}

impl DriverValue {
    /// Short lowercase name of this kind, used as an error descriptor
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint(_) => "uint",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Time(_) => "time",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for any of the ten integer kinds
    pub fn is_integer(&self) -> bool {
        self.as_i128().is_some()
    }

    /// Exact value of an integer kind, widened losslessly
    pub fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Self::Int(v) => v as i128,
            Self::Int8(v) => v.into(),
            Self::Int16(v) => v.into(),
            Self::Int32(v) => v.into(),
            Self::Int64(v) => v.into(),
            Self::Uint(v) => v as i128,
            Self::Uint8(v) => v.into(),
            Self::Uint16(v) => v.into(),
            Self::Uint32(v) => v.into(),
            Self::Uint64(v) => v.into(),
            _ => return None,
        })
    }

    /// Value of a float kind, widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float32(v) => Some(f64::from(v)),
            Self::Float64(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DriverValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Vec<u8> => Bytes,
    String => Text,
    DateTime<FixedOffset> => Time,
}

impl From<&str> for DriverValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&[u8]> for DriverValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<DateTime<Utc>> for DriverValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value.fixed_offset())
    }
}

impl<T: Into<DriverValue>> From<Option<T>> for DriverValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
