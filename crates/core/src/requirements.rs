//! Common requirement predicates.
//!
//! Factories for the gates most trees need, usable with
//! [`Node::requires_predicate`](crate::Node::requires_predicate) or a
//! builder definition's requirement hooks.

use crate::callback::Predicate;

/// The source holds at least the given permission level.
pub fn has_permission(level: u8) -> Predicate {
    Predicate::with_source(move |source| source.has_permission(level))
}

/// The source is a player of the managed process.
pub fn is_player() -> Predicate {
    Predicate::with_source(|source| source.is_player())
}

/// The source is the operator console.
pub fn is_console() -> Predicate {
    Predicate::with_source(|source| source.is_console())
}

/// The named argument is bound on the active path.
pub fn argument_exists(name: impl Into<String>) -> Predicate {
    let name = name.into();
    Predicate::new(move |_source, context| context.contains(&name))
}
