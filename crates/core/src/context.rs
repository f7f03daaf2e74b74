//! Per-invocation parsing state.
//!
//! A [`CommandContext`] is created fresh for every execute or suggest call
//! and owns the command line, the byte cursor, the values bound by argument
//! nodes, and the path of nodes visited so far. Bindings and the cursor are
//! scoped to the node that produced them: the engine acquires a guard when it
//! visits a node and the guard's `Drop` restores the previous state on every
//! exit path, success or error.

use crate::node::Node;
use cmdtree_errors::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// The outcome of one successful `parse` call on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// The value to bind into the context, if the node produces one.
    /// Literal nodes produce `None`.
    pub value: Option<Value>,
    /// Bytes of the remaining input consumed by the parse.
    pub consumed: usize,
}

impl ParseResult {
    /// A result carrying a parsed value.
    pub fn new(value: Value, consumed: usize) -> Self {
        Self {
            value: Some(value),
            consumed,
        }
    }

    /// A result that consumed input without producing a value.
    pub fn valueless(consumed: usize) -> Self {
        Self {
            value: None,
            consumed,
        }
    }
}

/// Parsing state for a single command invocation.
pub struct CommandContext {
    command: String,
    cursor: usize,
    values: HashMap<String, Value>,
    node_path: Vec<Arc<Node>>,
}

impl CommandContext {
    /// Create a fresh context for the given command line.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cursor: 0,
            values: HashMap::new(),
            node_path: Vec::new(),
        }
    }

    /// The complete command line being parsed.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The prefix of the command already parsed.
    pub fn command_read(&self) -> &str {
        &self.command[..self.cursor]
    }

    /// The suffix of the command still to be parsed.
    pub fn command_remaining(&self) -> &str {
        &self.command[self.cursor..]
    }

    /// The byte offset of the parsing cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The value bound for an argument node currently on the active path.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether a value is bound under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The path from the root node to the node currently being visited.
    pub fn node_path(&self) -> &[Arc<Node>] {
        &self.node_path
    }

    /// Bind `value` under `key`, returning the previous binding.
    pub(crate) fn bind(&mut self, key: &str, value: Value) -> Option<Value> {
        self.values.insert(key.to_string(), value)
    }

    /// Push `node` onto the active path; the guard pops it on drop.
    pub(crate) fn enter_node(&mut self, node: Arc<Node>) -> PathGuard<'_> {
        self.node_path.push(node);
        PathGuard { context: self }
    }

    /// Advance the cursor to `new_cursor` and apply the node's visit binding;
    /// the guard restores both on drop.
    pub(crate) fn visit_node<'c>(
        &'c mut self,
        node: &Node,
        parsed: Option<Value>,
        new_cursor: usize,
    ) -> VisitGuard<'c> {
        let prev_cursor = self.cursor;
        self.cursor = new_cursor;
        let restore = node.bind_on_visit(self, parsed);
        VisitGuard {
            context: self,
            prev_cursor,
            restore,
        }
    }
}

/// Scope guard for one entry on the node path.
pub(crate) struct PathGuard<'c> {
    context: &'c mut CommandContext,
}

impl PathGuard<'_> {
    /// The guarded context, for recursing while the guard is held.
    pub(crate) fn context(&mut self) -> &mut CommandContext {
        self.context
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.context.node_path.pop();
    }
}

/// Scope guard for a node visit: restores the cursor and the single binding
/// the visit touched, no matter how the scope is left.
pub(crate) struct VisitGuard<'c> {
    context: &'c mut CommandContext,
    prev_cursor: usize,
    restore: Option<(String, Option<Value>)>,
}

impl VisitGuard<'_> {
    /// The guarded context, for continuing the walk inside the visit scope.
    pub(crate) fn context(&mut self) -> &mut CommandContext {
        self.context
    }
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.context.cursor = self.prev_cursor;
        if let Some((key, previous)) = self.restore.take() {
            match previous {
                Some(value) => {
                    self.context.values.insert(key, value);
                }
                None => {
                    self.context.values.remove(&key);
                }
            }
        }
    }
}
