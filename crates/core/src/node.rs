//! The command node graph.
//!
//! A grammar is a graph of [`Node`]s of two kinds: literals, matched by exact
//! textual equality against one of a fixed set of spellings, and arguments,
//! which parse and bind a typed value. Nodes are built fluently, then frozen
//! behind `Arc` — a child passed to [`Node::then`] as a plain `Node` is moved
//! in, while an `Arc<Node>` is shared, so several parents (and redirect
//! edges) can reference one child without copying it. Once the owning plugin
//! finishes registration the graph is read-only and traversals never lock.

use crate::arguments::ArgumentParser;
use crate::callback::{
    Callback, ErrorHandlerFn, MessageGetter, Predicate, Requirement, SuggestionGetter,
};
use crate::context::{CommandContext, ParseResult};
use crate::element::{DIVIDER, first_element};
use crate::source::CommandSource;
use cmdtree_errors::{CommandError, ErrorDetail, ErrorKind, SyntaxError, Value};
use std::fmt;
use std::sync::{Arc, Weak};

/// The accepted spellings of a literal node.
///
/// Converts from a single string or a collection, so `Node::literal("tp")`
/// and `Node::literal(["t", "tp"])` both read naturally.
pub struct Spellings(Vec<String>);

impl From<&str> for Spellings {
    fn from(s: &str) -> Self {
        Spellings(vec![s.to_string()])
    }
}

impl From<String> for Spellings {
    fn from(s: String) -> Self {
        Spellings(vec![s])
    }
}

impl<const N: usize> From<[&str; N]> for Spellings {
    fn from(spellings: [&str; N]) -> Self {
        Spellings(spellings.iter().map(ToString::to_string).collect())
    }
}

impl From<Vec<String>> for Spellings {
    fn from(spellings: Vec<String>) -> Self {
        Spellings(spellings)
    }
}

impl From<Vec<&str>> for Spellings {
    fn from(spellings: Vec<&str>) -> Self {
        Spellings(spellings.iter().map(ToString::to_string).collect())
    }
}

/// What a node is: a branch carrier matched by spelling, or a value parser.
pub(crate) enum NodeKind {
    /// Matched by exact equality against one of the spellings. Optionally
    /// counts its visits under `counter_key` in the context.
    Literal {
        spellings: Vec<String>,
        counter_key: Option<String>,
    },
    /// Consumes and parses a value, bound under `name`.
    Argument {
        name: String,
        metavar: Option<String>,
        accumulate: bool,
        parser: Box<dyn ArgumentParser>,
    },
}

/// One registered error handler: the kind it was declared for, the callback,
/// and whether the error is auto-marked handled after invocation.
pub(crate) struct ErrorHandler {
    pub(crate) kind: ErrorKind,
    pub(crate) handler: ErrorHandlerFn,
    pub(crate) mark_handled: bool,
}

/// A redirect edge. Strong for forward aliases; weak for re-entrant loops
/// built with [`Arc::new_cyclic`], where a strong edge would leak the cycle.
pub(crate) enum RedirectTarget {
    Strong(Arc<Node>),
    Weak(Weak<Node>),
}

/// A node of the command graph. See the module docs for the ownership model.
pub struct Node {
    pub(crate) kind: NodeKind,
    /// Literal children, bucketed per accepted spelling. Bucket order is
    /// first-insertion order; a multi-spelling literal appears (shared) in
    /// one bucket per spelling.
    pub(crate) literal_children: Vec<(String, Vec<Arc<Node>>)>,
    /// Non-literal children, in insertion order.
    pub(crate) children: Vec<Arc<Node>>,
    pub(crate) callback: Option<Callback>,
    pub(crate) requirements: Vec<Requirement>,
    pub(crate) preconditions: Vec<Predicate>,
    pub(crate) redirect: Option<RedirectTarget>,
    pub(crate) suggestion_getter: Option<SuggestionGetter>,
    pub(crate) error_handlers: Vec<ErrorHandler>,
    pub(crate) child_error_handlers: Vec<ErrorHandler>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("literal_children", &self.literal_children.len())
            .field("children", &self.children.len())
            .field("requirements", &self.requirements.len())
            .field("preconditions", &self.preconditions.len())
            .field("error_handlers", &self.error_handlers.len())
            .field("child_error_handlers", &self.child_error_handlers.len())
            .finish_non_exhaustive()
    }
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            literal_children: Vec::new(),
            children: Vec::new(),
            callback: None,
            requirements: Vec::new(),
            preconditions: Vec::new(),
            redirect: None,
            suggestion_getter: None,
            error_handlers: Vec::new(),
            child_error_handlers: Vec::new(),
        }
    }

    fn validated_spellings(spellings: Spellings) -> Vec<String> {
        let Spellings(spellings) = spellings;
        assert!(
            !spellings.is_empty(),
            "a literal node requires at least one spelling"
        );
        for spelling in &spellings {
            assert!(!spelling.is_empty(), "a literal spelling cannot be empty");
            assert!(
                !spelling.contains(DIVIDER),
                "a literal spelling cannot contain the divider: {spelling:?}"
            );
        }
        spellings
    }

    /// A literal node accepting the given spelling(s).
    ///
    /// # Panics
    ///
    /// Panics if the spelling set is empty, or any spelling is empty or
    /// contains the divider character.
    pub fn literal(spellings: impl Into<Spellings>) -> Self {
        Self::new(NodeKind::Literal {
            spellings: Self::validated_spellings(spellings.into()),
            counter_key: None,
        })
    }

    /// A literal node that additionally counts its visits under
    /// `counter_key` in the command context. Useful with redirect loops,
    /// where the count tells how many times the loop was taken.
    ///
    /// # Panics
    ///
    /// Same spelling rules as [`Node::literal`].
    pub fn counting_literal(
        spellings: impl Into<Spellings>,
        counter_key: impl Into<String>,
    ) -> Self {
        Self::new(NodeKind::Literal {
            spellings: Self::validated_spellings(spellings.into()),
            counter_key: Some(counter_key.into()),
        })
    }

    /// An argument node parsing a value with `parser` and binding it under
    /// `name`.
    pub fn argument(name: impl Into<String>, parser: impl ArgumentParser + 'static) -> Self {
        Self::new(NodeKind::Argument {
            name: name.into(),
            metavar: None,
            accumulate: false,
            parser: Box::new(parser),
        })
    }

    // ── Construction operations ─────────────────────────────────────────

    /// Attach a child. A literal child is indexed under each of its
    /// spellings; any other child joins the ordered generic list.
    ///
    /// # Panics
    ///
    /// Panics if this node already redirects — a redirected node's own
    /// children would never be traversed.
    pub fn then(mut self, child: impl Into<Arc<Node>>) -> Self {
        assert!(
            self.redirect.is_none(),
            "a redirected node is not allowed to take child nodes"
        );
        let child = child.into();
        match &child.kind {
            NodeKind::Literal { spellings, .. } => {
                for spelling in spellings {
                    match self
                        .literal_children
                        .iter_mut()
                        .find(|(s, _)| s == spelling)
                    {
                        Some((_, bucket)) => bucket.push(Arc::clone(&child)),
                        None => self
                            .literal_children
                            .push((spelling.clone(), vec![Arc::clone(&child)])),
                    }
                }
            }
            NodeKind::Argument { .. } => self.children.push(child),
        }
        self
    }

    /// Set the terminal callback, invoked when parsing finishes exactly at
    /// this node with no input remaining.
    pub fn runs(
        self,
        f: impl Fn(&dyn CommandSource, &CommandContext) + Send + Sync + 'static,
    ) -> Self {
        self.runs_callback(Callback::new(f))
    }

    /// Like [`Node::runs`], accepting any registered callback shape.
    pub fn runs_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Append one requirement gate; repeated calls conjoin, and all gates
    /// must pass for the node to be entered.
    pub fn requires(
        self,
        predicate: impl Fn(&dyn CommandSource, &CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.requires_predicate(Requirement::new(Predicate::new(predicate)))
    }

    /// Append a requirement gate with a custom failure-message producer,
    /// invoked only when the gate rejects.
    pub fn requires_with_message(
        self,
        predicate: impl Fn(&dyn CommandSource, &CommandContext) -> bool + Send + Sync + 'static,
        failure_message: impl Fn(&dyn CommandSource, &CommandContext) -> String
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.requires_predicate(Requirement::with_message(
            Predicate::new(predicate),
            MessageGetter::new(failure_message),
        ))
    }

    /// Append a pre-built requirement gate.
    pub fn requires_predicate(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Append a precondition. A child whose precondition rejects is filtered
    /// out of traversal entirely, as if it were not attached.
    pub fn precondition(
        self,
        predicate: impl Fn(&dyn CommandSource, &CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.precondition_predicate(Predicate::new(predicate))
    }

    /// Append a pre-built precondition predicate.
    pub fn precondition_predicate(mut self, predicate: Predicate) -> Self {
        self.preconditions.push(predicate);
        self
    }

    /// Redirect traversal of any remaining input to `target`'s children; if
    /// input ends here and this node has no callback, `target`'s callback is
    /// used as the fallback. The node's own parsing, requirements,
    /// preconditions, and suggestions are unaffected.
    ///
    /// # Panics
    ///
    /// Panics if this node already has children — declare the redirect
    /// instead of, not in addition to, children.
    pub fn redirects(mut self, target: Arc<Node>) -> Self {
        assert!(
            !self.has_children(),
            "a node with child nodes is not allowed to redirect"
        );
        self.redirect = Some(RedirectTarget::Strong(target));
        self
    }

    /// Like [`Node::redirects`], holding the target weakly. This is the edge
    /// to use for re-entrant loops built with [`Arc::new_cyclic`] — e.g.
    /// redirecting back to an ancestor so a tail like `and <n>` can repeat —
    /// where a strong edge would leak the whole cycle.
    ///
    /// # Panics
    ///
    /// Same rules as [`Node::redirects`].
    pub fn redirects_weak(mut self, target: Weak<Node>) -> Self {
        assert!(
            !self.has_children(),
            "a node with child nodes is not allowed to redirect"
        );
        self.redirect = Some(RedirectTarget::Weak(target));
        self
    }

    /// Set the suggestion source of this argument node.
    ///
    /// # Panics
    ///
    /// Panics on a literal node, whose suggestions are always its spellings.
    pub fn suggests(
        self,
        f: impl Fn(&dyn CommandSource, &CommandContext) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.suggests_getter(SuggestionGetter::new(f))
    }

    /// Like [`Node::suggests`], accepting any registered callback shape.
    pub fn suggests_getter(mut self, getter: SuggestionGetter) -> Self {
        assert!(
            matches!(self.kind, NodeKind::Argument { .. }),
            "a literal node does not support a suggestion source"
        );
        self.suggestion_getter = Some(getter);
        self
    }

    /// Register a recoverable handler for errors of `kind` (or any more
    /// specific kind) raised at this node. With `handled` set, the error is
    /// marked handled after the handler runs, suppressing default rendering
    /// at the caller; propagation continues regardless. Re-registering the
    /// same kind replaces the previous handler in place.
    pub fn on_error(
        self,
        kind: ErrorKind,
        f: impl Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync + 'static,
        handled: bool,
    ) -> Self {
        self.on_error_handler(kind, ErrorHandlerFn::new(f), handled)
    }

    /// Like [`Node::on_error`], accepting any registered handler shape.
    pub fn on_error_handler(mut self, kind: ErrorKind, f: ErrorHandlerFn, handled: bool) -> Self {
        Self::put_handler(&mut self.error_handlers, kind, f, handled);
        self
    }

    /// Register a recoverable handler for errors of `kind` bubbling up from
    /// any direct or indirect descendant of this node.
    pub fn on_child_error(
        self,
        kind: ErrorKind,
        f: impl Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync + 'static,
        handled: bool,
    ) -> Self {
        self.on_child_error_handler(kind, ErrorHandlerFn::new(f), handled)
    }

    /// Like [`Node::on_child_error`], accepting any registered handler shape.
    pub fn on_child_error_handler(
        mut self,
        kind: ErrorKind,
        f: ErrorHandlerFn,
        handled: bool,
    ) -> Self {
        Self::put_handler(&mut self.child_error_handlers, kind, f, handled);
        self
    }

    fn put_handler(
        handlers: &mut Vec<ErrorHandler>,
        kind: ErrorKind,
        handler: ErrorHandlerFn,
        mark_handled: bool,
    ) {
        let entry = ErrorHandler {
            kind,
            handler,
            mark_handled,
        };
        match handlers.iter_mut().find(|h| h.kind == kind) {
            Some(existing) => *existing = entry,
            None => handlers.push(entry),
        }
    }

    /// Mark this argument node as accumulating: repeated visits append the
    /// parsed values to a list instead of overwriting the binding.
    ///
    /// # Panics
    ///
    /// Panics on a literal node.
    pub fn accumulates(mut self) -> Self {
        match &mut self.kind {
            NodeKind::Argument { accumulate, .. } => *accumulate = true,
            NodeKind::Literal { .. } => panic!("only argument nodes can accumulate values"),
        }
        self
    }

    /// Override the name shown in this argument node's usage placeholder.
    ///
    /// # Panics
    ///
    /// Panics on a literal node.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        match &mut self.kind {
            NodeKind::Argument { metavar: slot, .. } => *slot = Some(metavar.into()),
            NodeKind::Literal { .. } => panic!("only argument nodes have a usage placeholder"),
        }
        self
    }

    // ── Introspection ───────────────────────────────────────────────────

    /// Whether any child, literal or generic, is attached.
    pub fn has_children(&self) -> bool {
        !self.literal_children.is_empty() || !self.children.is_empty()
    }

    /// All children: literal children in first-insertion bucket order
    /// (deduplicated — a multi-spelling literal appears once), then the
    /// generic children.
    pub fn get_children(&self) -> Vec<Arc<Node>> {
        let mut out: Vec<Arc<Node>> = Vec::new();
        for (_, bucket) in &self.literal_children {
            for child in bucket {
                if !out.iter().any(|seen| Arc::ptr_eq(seen, child)) {
                    out.push(Arc::clone(child));
                }
            }
        }
        out.extend(self.children.iter().map(Arc::clone));
        out
    }

    /// The accepted spellings, if this is a literal node.
    pub fn spellings(&self) -> Option<&[String]> {
        match &self.kind {
            NodeKind::Literal { spellings, .. } => Some(spellings),
            NodeKind::Argument { .. } => None,
        }
    }

    /// The binding name, if this is an argument node.
    pub fn argument_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Argument { name, .. } => Some(name),
            NodeKind::Literal { .. } => None,
        }
    }

    /// The redirect target, if one is set and still alive.
    pub fn redirect_target(&self) -> Option<Arc<Node>> {
        match self.redirect.as_ref()? {
            RedirectTarget::Strong(target) => Some(Arc::clone(target)),
            RedirectTarget::Weak(target) => target.upgrade(),
        }
    }

    // ── Engine support ──────────────────────────────────────────────────

    /// Parse the next element(s) of `text` against this node.
    pub(crate) fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        match &self.kind {
            NodeKind::Literal { spellings, .. } => {
                let element = first_element(text);
                if spellings.iter().any(|s| s == element) {
                    Ok(ParseResult::valueless(element.len()))
                } else {
                    Err(SyntaxError::new(
                        ErrorDetail::LiteralNotMatch,
                        element.len(),
                    ))
                }
            }
            NodeKind::Argument { parser, .. } => parser.parse(text),
        }
    }

    /// Apply this node's visit binding, returning the entry the visit guard
    /// must restore: the touched key and its previous value.
    pub(crate) fn bind_on_visit(
        &self,
        context: &mut CommandContext,
        parsed: Option<Value>,
    ) -> Option<(String, Option<Value>)> {
        match &self.kind {
            NodeKind::Literal {
                counter_key: Some(key),
                ..
            } => {
                let count = context.get(key).and_then(Value::as_int).unwrap_or(0) + 1;
                let previous = context.bind(key, Value::Int(count));
                Some((key.clone(), previous))
            }
            NodeKind::Literal { .. } => None,
            NodeKind::Argument {
                name, accumulate, ..
            } => {
                let value = parsed?;
                let bound = if *accumulate {
                    let mut list = match context.get(name) {
                        Some(Value::List(values)) => values.clone(),
                        _ => Vec::new(),
                    };
                    list.push(value);
                    Value::List(list)
                } else {
                    value
                };
                let previous = context.bind(name, bound);
                Some((name.clone(), previous))
            }
        }
    }

    /// The first failing requirement, or `None` when all gates pass.
    pub(crate) fn check_requirements(
        &self,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) -> Option<&Requirement> {
        self.requirements
            .iter()
            .find(|req| !req.predicate.invoke(source, context))
    }

    /// Whether every precondition accepts; a rejecting node is traversed as
    /// if it were not attached.
    pub(crate) fn check_preconditions(
        &self,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) -> bool {
        self.preconditions
            .iter()
            .all(|p| p.invoke(source, context))
    }

    /// The literal-children bucket for `token`, if non-empty.
    pub(crate) fn literal_bucket(&self, token: &str) -> Option<&[Arc<Node>]> {
        self.literal_children
            .iter()
            .find(|(spelling, _)| spelling == token)
            .map(|(_, bucket)| bucket.as_slice())
            .filter(|bucket| !bucket.is_empty())
    }

    /// Literal children across all buckets, deduplicated, in first-insertion
    /// order.
    pub(crate) fn unique_literal_children(&self) -> Vec<&Arc<Node>> {
        let mut out: Vec<&Arc<Node>> = Vec::new();
        for (_, bucket) in &self.literal_children {
            for child in bucket {
                if !out.iter().any(|seen| Arc::ptr_eq(seen, child)) {
                    out.push(child);
                }
            }
        }
        out
    }

    /// This node's own suggestions: a literal suggests its spellings, an
    /// argument evaluates its suggestion source (or the parser's default)
    /// and lets the parser post-process each candidate.
    pub(crate) fn self_suggestions(
        &self,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) -> Vec<String> {
        match &self.kind {
            NodeKind::Literal { spellings, .. } => spellings.clone(),
            NodeKind::Argument { parser, .. } => {
                let raw = match &self.suggestion_getter {
                    Some(getter) => getter.invoke(source, context),
                    None => parser.default_suggestions(),
                };
                raw.into_iter()
                    .map(|s| parser.format_suggestion(s))
                    .collect()
            }
        }
    }

    /// The usage placeholder shown in complete hints.
    pub(crate) fn usage(&self) -> String {
        match &self.kind {
            NodeKind::Literal { spellings, .. } => format!("<{}>", spellings.join("|")),
            NodeKind::Argument { name, metavar, .. } => {
                format!("<{}>", metavar.as_deref().unwrap_or(name))
            }
        }
    }

    /// Offer `error` to this node's own-error handlers.
    pub(crate) fn handle_own_error(
        &self,
        error: &mut CommandError,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) {
        Self::dispatch_handlers(&self.error_handlers, error, source, context);
    }

    /// Offer `error` to this node's child-error handlers.
    pub(crate) fn handle_child_error(
        &self,
        error: &mut CommandError,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) {
        Self::dispatch_handlers(&self.child_error_handlers, error, source, context);
    }

    fn dispatch_handlers(
        handlers: &[ErrorHandler],
        error: &mut CommandError,
        source: &dyn CommandSource,
        context: &CommandContext,
    ) {
        for entry in handlers {
            if error.kind().is_a(entry.kind) {
                entry.handler.invoke(source, &*error, context);
                if entry.mark_handled {
                    error.set_handled();
                }
            }
        }
    }

    /// Print the subtree rooted at this node, one line per node, for
    /// debugging.
    pub fn print_tree(&self, line_writer: &mut dyn FnMut(&str)) {
        self.print_tree_inner("", line_writer);
    }

    fn print_tree_inner(&self, indent: &str, line_writer: &mut dyn FnMut(&str)) {
        line_writer(&format!("{indent}{self}"));
        let child_indent = format!("{indent}    ");
        for child in self.get_children() {
            child.print_tree_inner(&child_indent, line_writer);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Literal { spellings, .. } => {
                if spellings.len() == 1 {
                    write!(f, "Literal {:?}", spellings[0])
                } else {
                    let quoted: Vec<String> =
                        spellings.iter().map(|s| format!("{s:?}")).collect();
                    write!(f, "Literal {{{}}}", quoted.join(", "))
                }
            }
            NodeKind::Argument { name, parser, .. } => {
                write!(f, "{} <{}>", parser.kind_name(), name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{Integer, Text};

    #[test]
    fn then_buckets_literal_children_per_spelling() {
        let node = Node::literal("root").then(Node::literal(["t", "tp"]).then(Node::literal("x")));
        assert!(node.has_children());
        assert!(node.literal_bucket("t").is_some());
        assert!(node.literal_bucket("tp").is_some());
        assert!(node.literal_bucket("nope").is_none());
        // Both buckets hold the same shared node.
        let a = &node.literal_bucket("t").unwrap()[0];
        let b = &node.literal_bucket("tp").unwrap()[0];
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn get_children_dedups_and_preserves_order() {
        let node = Node::literal("root")
            .then(Node::literal(["a", "aa"]))
            .then(Node::literal("b"))
            .then(Node::argument("n", Integer::new()));
        let children = node.get_children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].spellings().unwrap(), &["a", "aa"]);
        assert_eq!(children[1].spellings().unwrap(), &["b"]);
        assert_eq!(children[2].argument_name(), Some("n"));
    }

    #[test]
    fn literal_parse_is_exact_match() {
        let node = Node::literal(["t", "tp"]);
        assert_eq!(node.parse("tp here").unwrap(), ParseResult::valueless(2));
        assert_eq!(node.parse("t").unwrap(), ParseResult::valueless(1));
        let err = node.parse("tpx").unwrap_err();
        assert_eq!(err.detail.kind(), ErrorKind::LiteralNotMatch);
        assert_eq!(err.consumed, 3);
    }

    #[test]
    #[should_panic(expected = "redirected node is not allowed to take child nodes")]
    fn then_after_redirect_panics() {
        let target = Arc::new(Node::literal("target"));
        let _ = Node::literal("a")
            .redirects(target)
            .then(Node::literal("b"));
    }

    #[test]
    #[should_panic(expected = "node with child nodes is not allowed to redirect")]
    fn redirect_after_then_panics() {
        let target = Arc::new(Node::literal("target"));
        let _ = Node::literal("a").then(Node::literal("b")).redirects(target);
    }

    #[test]
    #[should_panic(expected = "literal node does not support a suggestion source")]
    fn suggests_on_literal_panics() {
        let _ = Node::literal("a").suggests(|_, _| vec![]);
    }

    #[test]
    #[should_panic(expected = "cannot contain the divider")]
    fn divider_inside_spelling_panics() {
        let _ = Node::literal("not allowed");
    }

    #[test]
    fn same_kind_handler_registration_replaces() {
        let node = Node::literal("a")
            .on_error(ErrorKind::UnknownCommand, |_, _, _| {}, false)
            .on_error(ErrorKind::UnknownCommand, |_, _, _| {}, true)
            .on_error(ErrorKind::Any, |_, _, _| {}, false);
        assert_eq!(node.error_handlers.len(), 2);
        assert!(node.error_handlers[0].mark_handled);
    }

    #[test]
    fn display_names_nodes_by_what_they_hold() {
        assert_eq!(Node::literal("tp").to_string(), "Literal \"tp\"");
        assert_eq!(
            Node::literal(["t", "tp"]).to_string(),
            "Literal {\"t\", \"tp\"}"
        );
        assert_eq!(
            Node::argument("who", Text::new()).to_string(),
            "Text <who>"
        );
    }

    #[test]
    fn print_tree_indents_children() {
        let node = Node::literal("proc")
            .then(Node::literal("start").then(Node::argument("name", Text::new())));
        let mut lines = Vec::new();
        node.print_tree(&mut |line| lines.push(line.to_string()));
        assert_eq!(
            lines,
            vec![
                "Literal \"proc\"",
                "    Literal \"start\"",
                "        Text <name>",
            ]
        );
    }
}
