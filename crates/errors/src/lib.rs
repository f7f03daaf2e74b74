//! Error taxonomy and shared data types for the cmdtree command engine.
//!
//! Provides [`CommandError`] (the closed runtime error hierarchy, flattened
//! into [`ErrorKind`] / [`ErrorDetail`]), [`SyntaxError`] (the parse-time
//! subset raised by argument parsers before span stamping), [`Value`] (parsed
//! argument payloads), and the [`CommandSuggestion`] / [`CommandSuggestions`]
//! autocomplete types. Everything here is plain serializable data so remote
//! consumers (an RCON channel, a control socket) can ship it as JSON.

#![warn(missing_docs)]

mod detail;
mod kind;
mod suggestion;
mod value;

pub use detail::ErrorDetail;
pub use kind::ErrorKind;
pub use suggestion::{CommandSuggestion, CommandSuggestions};
pub use value::Value;

use serde::{Deserialize, Serialize};

/// A parse failure raised by a node's `parse` before the engine has stamped
/// it with the consumed-input spans.
///
/// `consumed` is the number of bytes the parser read before discovering the
/// problem; the engine uses it to derive the failing segment of the command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{detail}")]
pub struct SyntaxError {
    /// What went wrong.
    pub detail: ErrorDetail,
    /// Bytes of the remaining input read up to and including the problem.
    pub consumed: usize,
}

impl SyntaxError {
    /// Create a syntax error from its cause and the bytes consumed.
    pub fn new(detail: ErrorDetail, consumed: usize) -> Self {
        Self { detail, consumed }
    }
}

/// A runtime command error, carrying the input spans needed to point at the
/// exact culprit substring.
///
/// `parsed_command` is the prefix successfully parsed before the error;
/// `failed_command` extends it with the failing token. Both are substrings of
/// the original command line. The `handled` flag is set by recoverable error
/// handlers registered on the node graph; it suppresses default rendering at
/// the caller without stopping propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{detail}: {failed_command}<--")]
pub struct CommandError {
    detail: ErrorDetail,
    parsed_command: String,
    failed_command: String,
    handled: bool,
}

impl CommandError {
    /// Create an unhandled error from its detail and input spans.
    pub fn new(
        detail: ErrorDetail,
        parsed_command: impl Into<String>,
        failed_command: impl Into<String>,
    ) -> Self {
        Self {
            detail,
            parsed_command: parsed_command.into(),
            failed_command: failed_command.into(),
            handled: false,
        }
    }

    /// Promote a [`SyntaxError`] into a full error by stamping the spans.
    pub fn from_syntax(
        error: SyntaxError,
        parsed_command: impl Into<String>,
        failed_command: impl Into<String>,
    ) -> Self {
        Self::new(error.detail, parsed_command, failed_command)
    }

    /// The concrete kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.detail.kind()
    }

    /// The concrete cause and its data.
    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    /// The prefix of the command successfully parsed before the error.
    pub fn parsed_command(&self) -> &str {
        &self.parsed_command
    }

    /// The prefix of the command up to and including the failing token.
    pub fn failed_command(&self) -> &str {
        &self.failed_command
    }

    /// The exact culprit substring (the failing token itself).
    pub fn error_segment(&self) -> &str {
        self.failed_command
            .get(self.parsed_command.len()..)
            .unwrap_or("")
    }

    /// Mark this error handled, suppressing default rendering at the caller.
    ///
    /// Propagation through the node graph continues regardless.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    /// Whether any matching handler marked this error handled.
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}
