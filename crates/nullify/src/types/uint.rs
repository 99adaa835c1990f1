//! Unsigned integer wrappers.

use serde::{Deserialize, Serialize};

use super::int::integer_wrapper;
use crate::driver::DriverValue;
use crate::error::{NullError, Result};
use crate::nullable::Nullable;
use crate::traits::NullableValue;
use crate::valuer::{IntegerKind, check_integer};

integer_wrapper! {
    /// Nullable `usize`
    Uint(usize)
}

integer_wrapper! {
    /// Nullable `u8`
    ///
    /// For single-character semantics use [`Byte`](super::Byte).
    Uint8(u8)
}

integer_wrapper! {
    /// Nullable `u16`
    Uint16(u16)
}

integer_wrapper! {
    /// Nullable `u32`
    Uint32(u32)
}

integer_wrapper! {
    /// Nullable `u64`
    Uint64(u64)
}
