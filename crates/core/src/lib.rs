//! Command-tree parsing and dispatch engine.
//!
//! Plugins declare typed command grammars as graphs of [`Node`]s; the engine
//! parses raw command lines against them, routing each to the matching leaf
//! callback ([`Node::execute`]), to a typed [`CommandError`], or to a ranked
//! list of autocomplete candidates ([`Node::generate_suggestions`]). Trees
//! are built either fluently with [`Node::literal`] / [`Node::argument`] and
//! `then` chains, or declaratively from path strings with [`CommandBuilder`].
//! [`CommandRegistry`] routes full command lines to registered roots by
//! their first element.
//!
//! Graphs are built once on the loading thread and are immutable afterwards;
//! every execute/suggest call owns its private [`CommandContext`], so
//! concurrent traversals share nothing mutable and take no locks.

#![warn(missing_docs)]

/// Built-in argument parsers and the parser contract.
pub mod arguments;
/// The declarative path-string tree builder.
pub mod builder;
/// The closed family of user-callback shapes.
pub mod callback;
/// Per-invocation parsing state.
pub mod context;
/// Divider-based element splitting.
pub mod element;
/// The execution engine.
mod exec;
/// The command node graph.
pub mod node;
/// The root-node registry.
pub mod registry;
/// Common requirement predicates.
pub mod requirements;
/// The command-source capability surface.
pub mod source;
/// The suggestion engine.
mod suggest;

// ── Convenience re-exports ──────────────────────────────────────────────
// Flat imports for the common surface. The full module paths remain
// available for less common types.

pub use arguments::{
    ArgumentParser, Boolean, Enumeration, Float, GreedyText, Integer, Number, QuotableText, Text,
};
pub use builder::{BuildError, CommandBuilder, NodeDefinition};
pub use callback::{
    Callback, ErrorHandlerFn, MessageGetter, Predicate, Requirement, SourceContextFn,
    SuggestionGetter,
};
pub use context::{CommandContext, ParseResult};
pub use element::{DIVIDER, first_element, strip_divider_prefix};
pub use node::{Node, Spellings};
pub use registry::{CommandRegistry, DispatchResult, RegistryError};
pub use source::{CommandSource, ConsoleSource};

// Error taxonomy and data types (re-exported from the errors crate).
pub use cmdtree_errors::{
    CommandError, CommandSuggestion, CommandSuggestions, ErrorDetail, ErrorKind, SyntaxError,
    Value,
};
