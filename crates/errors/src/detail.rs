use crate::{ErrorKind, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The concrete cause of a command error, with whatever data the cause
/// carries (out-of-range bounds, requirement reasons, enumeration members).
///
/// Every variant maps onto a concrete [`ErrorKind`] via [`ErrorDetail::kind`];
/// the abstract kinds exist only for handler registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorDetail {
    /// Input ended at a node without a callback.
    UnknownCommand,
    /// Input remained but no child consumed it.
    UnknownArgument,
    /// The very first token matched no registered root.
    UnknownRootArgument,
    /// A requirement gate rejected the command source.
    RequirementNotMet {
        /// Human-readable reason produced by the failing requirement, if any.
        reason: Option<String>,
    },
    /// A literal node's spelling did not match the next element.
    LiteralNotMatch,
    /// A numeric value fell outside its configured range.
    NumberOutOfRange {
        /// The offending parsed value.
        value: Value,
        /// Lower bound, if one was configured.
        min: Option<Value>,
        /// Upper bound, if one was configured.
        max: Option<Value>,
    },
    /// A text value's length fell outside its configured range.
    TextLengthOutOfRange {
        /// The offending text length.
        length: usize,
        /// Lower length bound, if one was configured.
        min: Option<usize>,
        /// Upper length bound, if one was configured.
        max: Option<usize>,
    },
    /// An element parsed as neither integer nor float.
    InvalidNumber,
    /// An element did not parse as an integer.
    InvalidInteger,
    /// An element did not parse as a float.
    InvalidFloat,
    /// A quoted string escaped a non-escapable character.
    IllegalEscapes,
    /// A quoted string was never closed.
    UnclosedQuotedString,
    /// A quoted string was empty where empty is not allowed.
    EmptyText,
    /// An element was neither `true` nor `false`.
    InvalidBoolean,
    /// An element named no member of a closed enumeration.
    InvalidEnumeration {
        /// The offending element text.
        value: String,
        /// The accepted member names.
        options: Vec<String>,
    },
}

impl ErrorDetail {
    /// The concrete [`ErrorKind`] of this detail.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorDetail::UnknownCommand => ErrorKind::UnknownCommand,
            ErrorDetail::UnknownArgument => ErrorKind::UnknownArgument,
            ErrorDetail::UnknownRootArgument => ErrorKind::UnknownRootArgument,
            ErrorDetail::RequirementNotMet { .. } => ErrorKind::RequirementNotMet,
            ErrorDetail::LiteralNotMatch => ErrorKind::LiteralNotMatch,
            ErrorDetail::NumberOutOfRange { .. } => ErrorKind::NumberOutOfRange,
            ErrorDetail::TextLengthOutOfRange { .. } => ErrorKind::TextLengthOutOfRange,
            ErrorDetail::InvalidNumber => ErrorKind::InvalidNumber,
            ErrorDetail::InvalidInteger => ErrorKind::InvalidInteger,
            ErrorDetail::InvalidFloat => ErrorKind::InvalidFloat,
            ErrorDetail::IllegalEscapes => ErrorKind::IllegalEscapes,
            ErrorDetail::UnclosedQuotedString => ErrorKind::UnclosedQuotedString,
            ErrorDetail::EmptyText => ErrorKind::EmptyText,
            ErrorDetail::InvalidBoolean => ErrorKind::InvalidBoolean,
            ErrorDetail::InvalidEnumeration { .. } => ErrorKind::InvalidEnumeration,
        }
    }
}

/// Render an optional bound, using `/` for an open end of the range.
fn bound<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "/".to_string(),
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::UnknownCommand => write!(f, "Unknown command"),
            ErrorDetail::UnknownArgument | ErrorDetail::UnknownRootArgument => {
                write!(f, "Unknown argument")
            }
            ErrorDetail::RequirementNotMet { reason } => match reason {
                Some(reason) => f.write_str(reason),
                None => write!(f, "Requirement not met"),
            },
            ErrorDetail::LiteralNotMatch => write!(f, "Invalid argument"),
            ErrorDetail::NumberOutOfRange { min, max, .. } => {
                write!(f, "Value out of range [{}, {}]", bound(min), bound(max))
            }
            ErrorDetail::TextLengthOutOfRange { length, min, max } => {
                write!(
                    f,
                    "Text length {} out of range [{}, {}]",
                    length,
                    bound(min),
                    bound(max)
                )
            }
            ErrorDetail::InvalidNumber => write!(f, "Invalid number"),
            ErrorDetail::InvalidInteger => write!(f, "Invalid integer"),
            ErrorDetail::InvalidFloat => write!(f, "Invalid float"),
            ErrorDetail::IllegalEscapes => write!(f, "Illegal usage of escapes"),
            ErrorDetail::UnclosedQuotedString => write!(f, "Unclosed quoted string"),
            ErrorDetail::EmptyText => write!(f, "Empty text is not allowed"),
            ErrorDetail::InvalidBoolean => write!(f, "Invalid boolean"),
            ErrorDetail::InvalidEnumeration { value, options } => {
                write!(
                    f,
                    "Invalid enumeration value {:?}, expected one of [{}]",
                    value,
                    options.join(", ")
                )
            }
        }
    }
}
