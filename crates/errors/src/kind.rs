use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a command error, covering both concrete kinds and the
/// abstract groupings they roll up into.
///
/// Error handlers are registered against a kind and fire for that kind and
/// every more specific kind beneath it; the hierarchy is encoded by
/// [`ErrorKind::parent`] and queried through [`ErrorKind::is_a`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Root of the runtime taxonomy; a handler for `Any` fires for every error.
    Any,
    /// Input ended at a node without a callback.
    UnknownCommand,
    /// Input remained but no child consumed it.
    UnknownArgument,
    /// Same as `UnknownArgument`, but the very first token failed to match.
    UnknownRootArgument,
    /// A requirement gate rejected the command source.
    RequirementNotMet,
    /// Abstract: any failure raised by a node's `parse`.
    Syntax,
    /// Abstract: a well-formed element carrying an unacceptable value.
    IllegalArgument,
    /// Abstract: a parsed value fell outside its configured bounds.
    OutOfRange,
    /// A numeric value fell outside its configured `[min, max]` range.
    NumberOutOfRange,
    /// A text value's length fell outside its configured length range.
    TextLengthOutOfRange,
    /// An element parsed as neither integer nor float.
    InvalidNumber,
    /// An element did not parse as an integer.
    InvalidInteger,
    /// An element did not parse as a float.
    InvalidFloat,
    /// A quoted string used the escape character on a non-escapable character.
    IllegalEscapes,
    /// A quoted string ran off the end of input without a closing quote.
    UnclosedQuotedString,
    /// A quoted string was empty where empty is not allowed.
    EmptyText,
    /// An element was neither `true` nor `false`.
    InvalidBoolean,
    /// An element named no member of a closed enumeration.
    InvalidEnumeration,
    /// A literal node's spelling did not match the next element.
    ///
    /// Used for fail-soft branch probing; it never reaches a caller except as
    /// the root-level translation into `UnknownRootArgument`.
    LiteralNotMatch,
}

impl ErrorKind {
    /// The immediate supertype of this kind, or `None` for the root.
    pub fn parent(self) -> Option<ErrorKind> {
        use ErrorKind::*;
        match self {
            Any => None,
            UnknownCommand | UnknownArgument | RequirementNotMet | Syntax => Some(Any),
            UnknownRootArgument => Some(UnknownArgument),
            IllegalArgument | LiteralNotMatch => Some(Syntax),
            InvalidNumber | InvalidInteger | InvalidFloat | IllegalEscapes
            | UnclosedQuotedString | EmptyText | InvalidBoolean | InvalidEnumeration
            | OutOfRange => Some(IllegalArgument),
            NumberOutOfRange | TextLengthOutOfRange => Some(OutOfRange),
        }
    }

    /// Whether this kind is `ancestor` or falls anywhere beneath it.
    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        let mut kind = Some(self);
        while let Some(k) = kind {
            if k == ancestor {
                return true;
            }
            kind = k.parent();
        }
        false
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Any => "any",
            ErrorKind::UnknownCommand => "unknown command",
            ErrorKind::UnknownArgument => "unknown argument",
            ErrorKind::UnknownRootArgument => "unknown root argument",
            ErrorKind::RequirementNotMet => "requirement not met",
            ErrorKind::Syntax => "syntax",
            ErrorKind::IllegalArgument => "illegal argument",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::NumberOutOfRange => "number out of range",
            ErrorKind::TextLengthOutOfRange => "text length out of range",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::InvalidInteger => "invalid integer",
            ErrorKind::InvalidFloat => "invalid float",
            ErrorKind::IllegalEscapes => "illegal escapes",
            ErrorKind::UnclosedQuotedString => "unclosed quoted string",
            ErrorKind::EmptyText => "empty text",
            ErrorKind::InvalidBoolean => "invalid boolean",
            ErrorKind::InvalidEnumeration => "invalid enumeration",
            ErrorKind::LiteralNotMatch => "literal not match",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind::*;

    #[test]
    fn every_kind_reaches_the_root() {
        let all = [
            Any,
            UnknownCommand,
            UnknownArgument,
            UnknownRootArgument,
            RequirementNotMet,
            Syntax,
            IllegalArgument,
            OutOfRange,
            NumberOutOfRange,
            TextLengthOutOfRange,
            InvalidNumber,
            InvalidInteger,
            InvalidFloat,
            IllegalEscapes,
            UnclosedQuotedString,
            EmptyText,
            InvalidBoolean,
            InvalidEnumeration,
            LiteralNotMatch,
        ];
        for kind in all {
            assert!(kind.is_a(Any), "{kind:?} does not roll up to Any");
        }
    }

    #[test]
    fn is_a_is_reflexive() {
        assert!(InvalidInteger.is_a(InvalidInteger));
        assert!(Syntax.is_a(Syntax));
    }

    #[test]
    fn subtype_chains() {
        assert!(NumberOutOfRange.is_a(OutOfRange));
        assert!(NumberOutOfRange.is_a(IllegalArgument));
        assert!(NumberOutOfRange.is_a(Syntax));
        assert!(UnknownRootArgument.is_a(UnknownArgument));
        assert!(LiteralNotMatch.is_a(Syntax));
    }

    #[test]
    fn siblings_do_not_match() {
        assert!(!InvalidInteger.is_a(InvalidNumber));
        assert!(!InvalidNumber.is_a(InvalidInteger));
        assert!(!UnknownArgument.is_a(UnknownRootArgument));
        assert!(!UnknownCommand.is_a(Syntax));
        assert!(!RequirementNotMet.is_a(UnknownCommand));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&NumberOutOfRange).unwrap();
        assert_eq!(json, "\"number_out_of_range\"");
    }
}
