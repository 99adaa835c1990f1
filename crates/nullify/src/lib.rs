//! Nullable value wrappers that keep "absent" and "zero" apart.
//!
//! A [`Nullable<T>`] pairs a value with a validity flag. Across every boundary
//! it crosses, an invalid instance is null and a valid zero is a value:
//!
//! | boundary | invalid | valid zero (`i32`) |
//! |---|---|---|
//! | JSON ([`marshal_json`](Nullable::marshal_json), serde) | `null` | `0` |
//! | text ([`marshal_text`](Nullable::marshal_text)) | empty | `0` |
//! | storage ([`driver_value`](Nullable::driver_value)) | [`DriverValue::Null`] | `Int32(0)` |
//!
//! The [`types`] module holds a named wrapper per supported base type. Some are
//! aliases of the generic container; others add type-specific behaviour such as
//! single-character bytes, raw JSON documents, configurable time layouts, or an
//! integer destination width checked for overflow. All of them implement
//! [`NullableValue`], which the [`prelude`] brings into scope.
//!
//! ```
//! use nullify::prelude::*;
//! use nullify::types::{Int64, Time};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(default)]
//!     count: Int64,
//!     #[serde(default)]
//!     seen_at: Time,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"count":0,"seen_at":null}"#).unwrap();
//! assert!(row.count.is_valid());
//! assert!(row.count.is_zero());
//! assert!(!row.seen_at.is_valid());
//! assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"count":0,"seen_at":null}"#);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod convert;
pub mod driver;
pub mod error;
pub mod literal;
pub mod nullable;
pub mod temporal;
pub mod traits;
pub mod types;
pub mod valuer;

// Core types
pub use base::BaseValue;
pub use convert::ConvertError;
pub use driver::DriverValue;
pub use error::{Cause, ErrorContext, ErrorKind, NullError, Result};
pub use nullable::Nullable;
pub use traits::NullableValue;
pub use valuer::{IntegerKind, check_integer};

// Temporal configuration
pub use temporal::{FormatLayout, ParseOptions, TimeParseError, parse_any, parse_strict};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{DriverValue, Nullable, NullableValue, NullError};
}
