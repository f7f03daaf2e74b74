//! The root-node registry.
//!
//! Hosts register the literal roots of their command trees here; incoming
//! command lines are routed to every root whose spelling matches the first
//! element. Each matching root is tried independently and per-root errors
//! are collected, so two plugins can claim the same command word without
//! shadowing one another.

use crate::element::{DIVIDER, first_element};
use crate::node::Node;
use crate::source::CommandSource;
use cmdtree_errors::{CommandError, CommandSuggestions};
use std::sync::Arc;

/// Error raised when registering an unusable root node.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Only literal nodes can start a command; an argument node has no
    /// spelling to key dispatch on.
    #[error("only literal nodes can serve as root nodes")]
    NonLiteralRoot,
}

/// The outcome of dispatching one command line.
#[derive(Debug)]
pub struct DispatchResult {
    /// How many registered roots matched the first element and were tried.
    pub matched: usize,
    /// The errors raised by the roots that failed, in registration order.
    pub errors: Vec<CommandError>,
}

impl DispatchResult {
    /// Whether at least one root matched and none of the tried roots failed.
    pub fn succeeded(&self) -> bool {
        self.matched > 0 && self.errors.is_empty()
    }
}

/// Registry of command-tree roots, keyed by literal spelling.
#[derive(Default)]
pub struct CommandRegistry {
    /// Buckets per spelling, in first-registration order. A multi-spelling
    /// root is shared across one bucket per spelling.
    roots: Vec<(String, Vec<Arc<Node>>)>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a literal root node under each of its spellings.
    pub fn register(&mut self, node: impl Into<Arc<Node>>) -> Result<(), RegistryError> {
        let node = node.into();
        let Some(spellings) = node.spellings() else {
            return Err(RegistryError::NonLiteralRoot);
        };
        for spelling in spellings {
            match self.roots.iter_mut().find(|(s, _)| s == spelling) {
                Some((_, bucket)) => bucket.push(Arc::clone(&node)),
                None => self.roots.push((spelling.clone(), vec![Arc::clone(&node)])),
            }
        }
        Ok(())
    }

    /// Drop every registered root.
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    /// All registered roots, deduplicated, in registration order.
    pub fn root_nodes(&self) -> Vec<Arc<Node>> {
        let mut out: Vec<Arc<Node>> = Vec::new();
        for (_, bucket) in &self.roots {
            for node in bucket {
                if !out.iter().any(|seen| Arc::ptr_eq(seen, node)) {
                    out.push(Arc::clone(node));
                }
            }
        }
        out
    }

    /// Execute `command` against every root matching its first element.
    pub fn execute(&self, source: &dyn CommandSource, command: &str) -> DispatchResult {
        let token = first_element(command);
        let mut result = DispatchResult {
            matched: 0,
            errors: Vec::new(),
        };
        if let Some((_, bucket)) = self.roots.iter().find(|(s, _)| s == token) {
            for root in bucket {
                result.matched += 1;
                if let Err(error) = root.execute(source, command) {
                    result.errors.push(error);
                }
            }
        }
        result
    }

    /// Collect suggestions for a partial command line.
    ///
    /// While the first element is still being typed, every root contributes
    /// its spellings as candidates (prefix filtering is the caller's
    /// concern). Once a divider completes the first element, only the roots
    /// registered under that element are walked.
    pub fn suggest(&self, source: &dyn CommandSource, command: &str) -> CommandSuggestions {
        let mut suggestions = CommandSuggestions::new();
        if command.contains(DIVIDER) {
            let token = first_element(command);
            if let Some((_, bucket)) = self.roots.iter().find(|(s, _)| s == token) {
                for root in bucket {
                    suggestions.extend(root.generate_suggestions(source, command));
                }
            }
        } else {
            for root in self.root_nodes() {
                suggestions.extend(root.generate_suggestions(source, command));
            }
        }
        suggestions
    }
}
