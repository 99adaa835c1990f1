//! Nullable Error Types (Standalone)
//!
//! Every boundary operation reports failures through [`NullError`]. The four
//! context-carrying categories mirror the four boundaries a nullable value
//! crosses (structured marshal, structured/text unmarshal, driver scan, driver
//! valuer). Malformed JSON is the one failure that is *not* folded into a
//! category: it surfaces as [`NullError::Syntax`] carrying the decoder's own
//! error so callers can tell "bad document" from "wrong kind of value".

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;

use thiserror::Error;

use crate::convert::ConvertError;
use crate::temporal::TimeParseError;

// ============================================================================
// CAUSES
// ============================================================================

/// Underlying reason attached to an [`ErrorContext`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Cause {
    /// The JSON encoder or decoder failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Decimal integer text could not be parsed at the target width
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    /// Decimal float text could not be parsed
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    /// Decimal float text is finite but beyond the range of the target width
    #[error("value out of range: {0:?}")]
    FloatRange(String),

    /// Boolean text was not one of the accepted spellings
    #[error("invalid syntax for boolean: {0:?}")]
    ParseBool(String),

    /// Text input was not valid UTF-8
    #[error(transparent)]
    Utf8(#[from] Utf8Error),

    /// Free-form date text could not be parsed
    #[error(transparent)]
    Time(#[from] TimeParseError),

    /// Identifier text could not be parsed
    #[error(transparent)]
    Uuid(#[from] uuid::Error),

    /// A driver value could not be coerced into the base type
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Single-byte wrapper received more than one character
    #[error("null: cannot convert to byte, data length is greater than one")]
    ByteLength,

    /// Neither the source nor the destination of a valuer is an integer kind
    #[error("null: valuer checker type unsupported")]
    TypeUnsupported,

    /// The valuer destination cannot represent the source value
    #[error("null: valuer checker integer overflow detected")]
    IntegerOverflow,

    /// A time layout contains an unknown format directive
    #[error("null: invalid time layout {0:?}")]
    InvalidLayout(String),
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Source/target type descriptors plus the ordered chain of causes.
#[derive(Debug)]
pub struct ErrorContext {
    source_type: &'static str,
    target_type: Option<&'static str>,
    causes: Vec<Cause>,
}

impl ErrorContext {
    /// Create a context for a failure originating from `source_type`
    pub fn new(source_type: &'static str) -> Self {
        Self {
            source_type,
            target_type: None,
            causes: Vec::new(),
        }
    }

    /// Record the type the operation was writing into
    pub fn into_target(mut self, target_type: &'static str) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Descriptor of the value the operation started from
    pub fn source_type(&self) -> &'static str {
        self.source_type
    }

    /// Descriptor of the value the operation was writing into, if any
    pub fn target_type(&self) -> Option<&'static str> {
        self.target_type
    }

    /// Wrapped causes, outermost first
    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_type)?;
        if let Some(target) = self.target_type {
            write!(f, " into {target}")?;
        }
        for cause in &self.causes {
            write!(f, "; {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorContext {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes
            .first()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Category of a [`NullError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Marshal,
    Unmarshal,
    Scan,
    Valuer,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Marshal => "marshal",
            Self::Unmarshal => "unmarshal",
            Self::Scan => "scan",
            Self::Valuer => "valuer",
            Self::Syntax => "syntax",
        })
    }
}

/// Nullable boundary errors
///
/// All marshal, unmarshal, scan and valuer operations return this error type.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NullError {
    /// Converting the in-memory value to an external representation failed
    #[error("null: cannot marshal type {0}")]
    Marshal(#[source] ErrorContext),

    /// An external representation could not populate the base type
    #[error("null: cannot unmarshal {0}")]
    Unmarshal(#[source] ErrorContext),

    /// A driver value could not be coerced into the base type
    #[error("null: cannot scan {0}")]
    Scan(#[source] ErrorContext),

    /// Producing a storage-bound value failed
    #[error("null: cannot value type {0}")]
    Valuer(#[source] ErrorContext),

    /// Malformed JSON, reported exactly as the decoder produced it
    #[error(transparent)]
    Syntax(serde_json::Error),
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl NullError {
    /// Create a marshal error for `source_type`
    pub fn marshal(source_type: &'static str) -> Self {
        Self::Marshal(ErrorContext::new(source_type))
    }

    /// Create an unmarshal error from `source_type` into `target_type`
    pub fn unmarshal(source_type: &'static str, target_type: &'static str) -> Self {
        Self::Unmarshal(ErrorContext::new(source_type).into_target(target_type))
    }

    /// Create a scan error from `source_type` into `target_type`
    pub fn scan(source_type: &'static str, target_type: &'static str) -> Self {
        Self::Scan(ErrorContext::new(source_type).into_target(target_type))
    }

    /// Create a valuer error for `source_type`
    pub fn valuer(source_type: &'static str) -> Self {
        Self::Valuer(ErrorContext::new(source_type))
    }

    /// Append a cause to the chain. Syntax errors carry no chain and are
    /// returned unchanged.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        if let Some(context) = self.context_mut() {
            context.causes.push(cause.into());
        }
        self
    }

    /// Classify a JSON decode failure: syntax-class failures pass through
    /// untouched, everything else is an unmarshal error into `target_type`.
    pub(crate) fn decode(error: serde_json::Error, target_type: &'static str) -> Self {
        if error.is_syntax() || error.is_eof() {
            Self::Syntax(error)
        } else {
            Self::unmarshal("json", target_type).with_cause(error)
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            Self::Marshal(context)
            | Self::Unmarshal(context)
            | Self::Scan(context)
            | Self::Valuer(context) => Some(context),
            Self::Syntax(_) => None,
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl NullError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Marshal(_) => ErrorKind::Marshal,
            Self::Unmarshal(_) => ErrorKind::Unmarshal,
            Self::Scan(_) => ErrorKind::Scan,
            Self::Valuer(_) => ErrorKind::Valuer,
            Self::Syntax(_) => ErrorKind::Syntax,
        }
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::Marshal(_) => "NULL_MARSHAL",
            Self::Unmarshal(_) => "NULL_UNMARSHAL",
            Self::Scan(_) => "NULL_SCAN",
            Self::Valuer(_) => "NULL_VALUER",
            Self::Syntax(_) => "NULL_SYNTAX",
        }
    }

    /// Type descriptors and causes, absent for syntax errors
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Marshal(context)
            | Self::Unmarshal(context)
            | Self::Scan(context)
            | Self::Valuer(context) => Some(context),
            Self::Syntax(_) => None,
        }
    }

    /// Wrapped causes, empty for syntax errors
    pub fn causes(&self) -> &[Cause] {
        match self.context() {
            Some(context) => context.causes(),
            None => &[],
        }
    }

    /// True if any wrapped cause satisfies `predicate`
    pub fn has_cause(&self, predicate: impl Fn(&Cause) -> bool) -> bool {
        self.causes().iter().any(predicate)
    }

    pub fn is_marshal(&self) -> bool {
        matches!(self, Self::Marshal(_))
    }

    pub fn is_unmarshal(&self) -> bool {
        matches!(self, Self::Unmarshal(_))
    }

    pub fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }

    pub fn is_valuer(&self) -> bool {
        matches!(self, Self::Valuer(_))
    }

    /// True for malformed JSON input
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// True if an integer valuer rejected the value as out of range
    pub fn is_overflow(&self) -> bool {
        self.has_cause(|cause| matches!(cause, Cause::IntegerOverflow))
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for nullable operations
pub type Result<T, E = NullError> = std::result::Result<T, E>;

// ============================================================================
// TESTS
// ============================================================================
