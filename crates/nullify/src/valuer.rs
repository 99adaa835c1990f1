//! Overflow-checked integer valuer.
//!
//! Integer wrappers may carry an [`IntegerKind`] naming the width the storage
//! layer expects. [`check_integer`] re-expresses a driver integer at that width
//! or reports [`Cause::IntegerOverflow`].
//!
//! The source is first normalized through a 64-bit intermediate whose
//! signedness follows the destination. That step reinterprets the bit pattern
//! (a negative source headed for an unsigned destination wraps to a large
//! value) and only the final narrowing is range checked.

use std::fmt;

use tracing::debug;

use crate::driver::DriverValue;
use crate::error::Cause;

/// Destination width and signedness for an integer valuer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl IntegerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
        }
    }
}

impl fmt::Display for IntegerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Re-express an integer driver value at the destination width.
///
/// With no destination the value is returned untouched, whatever its kind.
pub fn check_integer(
    value: DriverValue,
    dest: Option<IntegerKind>,
) -> Result<DriverValue, Cause> {
    let Some(dest) = dest else {
        return Ok(value);
    };
    let Some(wide) = value.as_i128() else {
        return Err(Cause::TypeUnsupported);
    };

    narrow(wide, dest).ok_or_else(|| {
        debug!(
            source_kind = value.kind_name(),
            dest = dest.name(),
            value = %wide,
            "integer valuer overflow"
        );
        Cause::IntegerOverflow
    })
}

fn narrow(wide: i128, dest: IntegerKind) -> Option<DriverValue> {
    let signed = wide as i64;
    let unsigned = wide as u64;
    Some(match dest {
        IntegerKind::Int => DriverValue::Int(isize::try_from(signed).ok()?),
        IntegerKind::Int8 => DriverValue::Int8(i8::try_from(signed).ok()?),
        IntegerKind::Int16 => DriverValue::Int16(i16::try_from(signed).ok()?),
        IntegerKind::Int32 => DriverValue::Int32(i32::try_from(signed).ok()?),
        IntegerKind::Int64 => DriverValue::Int64(signed),
        IntegerKind::Uint => DriverValue::Uint(usize::try_from(unsigned).ok()?),
        IntegerKind::Uint8 => DriverValue::Uint8(u8::try_from(unsigned).ok()?),
        IntegerKind::Uint16 => DriverValue::Uint16(u16::try_from(unsigned).ok()?),
        IntegerKind::Uint32 => DriverValue::Uint32(u32::try_from(unsigned).ok()?),
        IntegerKind::Uint64 => DriverValue::Uint64(unsigned),
    })
}
