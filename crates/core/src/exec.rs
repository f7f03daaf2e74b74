//! The execution engine.
//!
//! A top-down walk over the node graph: each step parses the next element at
//! the current node, binds the value for the duration of the step, checks
//! the node's requirement gates, and either fires the terminal callback
//! (input exhausted) or dispatches the rest of the input to the children of
//! the node — or of its redirect target. Literal buckets are probed
//! fail-soft; committed branches propagate their errors through each
//! ancestor's child-error handlers on the way out.

use crate::context::CommandContext;
use crate::element::{first_element, strip_divider_prefix};
use crate::node::Node;
use crate::source::CommandSource;
use cmdtree_errors::{CommandError, ErrorDetail, ErrorKind};
use std::sync::Arc;

impl Node {
    /// Parse `command` against the tree rooted here and, on success, invoke
    /// the matching callback.
    ///
    /// A failure of this root node itself to match the first element is
    /// reported as [`ErrorKind::UnknownRootArgument`]; this is the only
    /// place [`ErrorKind::LiteralNotMatch`] is translated for callers.
    pub fn execute(
        self: &Arc<Node>,
        source: &dyn CommandSource,
        command: &str,
    ) -> Result<(), CommandError> {
        let mut context = CommandContext::new(command);
        let executor = Executor { source };
        let result = {
            let mut guard = context.enter_node(Arc::clone(self));
            executor.step(self, guard.context())
        };
        result.map_err(|error| {
            if error.kind() == ErrorKind::LiteralNotMatch {
                CommandError::new(
                    ErrorDetail::UnknownRootArgument,
                    error.parsed_command().to_string(),
                    error.failed_command().to_string(),
                )
            } else {
                error
            }
        })
    }
}

struct Executor<'a> {
    source: &'a dyn CommandSource,
}

impl Executor<'_> {
    /// One recursive step: parse at `node`, then continue inside the visit
    /// scope. The visit guard unwinds the cursor and binding on every exit.
    fn step(&self, node: &Arc<Node>, context: &mut CommandContext) -> Result<(), CommandError> {
        let parse_result = match node.parse(context.command_remaining()) {
            Ok(result) => result,
            Err(syntax) => {
                let parsed = context.command_read().to_string();
                let remaining = context.command_remaining();
                let consumed = syntax.consumed.min(remaining.len());
                let failed = format!("{parsed}{}", &remaining[..consumed]);
                let mut error = CommandError::from_syntax(syntax, parsed, failed);
                node.handle_own_error(&mut error, self.source, context);
                return Err(error);
            }
        };
        // Advance past the consumed bytes plus the divider run that follows.
        let remaining = context.command_remaining();
        let stripped = strip_divider_prefix(&remaining[parse_result.consumed..]);
        let new_cursor = context.command().len() - stripped.len();
        let mut visit = context.visit_node(node, parse_result.value, new_cursor);
        self.visited(node, visit.context())
    }

    /// The body of a step, with this node's parse already applied.
    fn visited(&self, node: &Arc<Node>, context: &mut CommandContext) -> Result<(), CommandError> {
        if let Some(requirement) = node.check_requirements(self.source, context) {
            let reason = requirement
                .failure_message
                .as_ref()
                .map(|getter| getter.invoke(self.source, context));
            let parsed = context.command_read().to_string();
            let mut error = CommandError::new(
                ErrorDetail::RequirementNotMet { reason },
                parsed.clone(),
                parsed,
            );
            node.handle_own_error(&mut error, self.source, context);
            return Err(error);
        }

        if context.command_remaining().is_empty() {
            // Input exhausted: fire this node's callback, falling back to the
            // redirect target's callback when this node has none.
            let redirect = node.redirect_target();
            let callback = node
                .callback
                .as_ref()
                .or_else(|| redirect.as_ref().and_then(|t| t.callback.as_ref()));
            match callback {
                Some(callback) => {
                    callback.invoke(self.source, context);
                    Ok(())
                }
                None => {
                    let parsed = context.command_read().to_string();
                    let mut error =
                        CommandError::new(ErrorDetail::UnknownCommand, parsed.clone(), parsed);
                    node.handle_own_error(&mut error, self.source, context);
                    Err(error)
                }
            }
        } else {
            self.descend(node, context)
        }
    }

    /// Dispatch the remaining input to the children of `node`, or of its
    /// redirect target.
    fn descend(&self, node: &Arc<Node>, context: &mut CommandContext) -> Result<(), CommandError> {
        let redirect = node.redirect_target();
        let target = redirect.as_ref().unwrap_or(node);
        if !target.has_children() {
            return Err(self.unknown_argument(node, context));
        }
        match self.try_children(target, context) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.unknown_argument(node, context)),
            Err(mut error) => {
                node.handle_child_error(&mut error, self.source, context);
                Err(error)
            }
        }
    }

    /// `Ok(true)`: a child ran the command. `Ok(false)`: no child claimed
    /// the next element. `Err`: a claimed branch failed.
    fn try_children(
        &self,
        target: &Arc<Node>,
        context: &mut CommandContext,
    ) -> Result<bool, CommandError> {
        let token = first_element(context.command_remaining()).to_string();
        if let Some(bucket) = target.literal_bucket(&token) {
            let mut last_error: Option<CommandError> = None;
            for child in bucket {
                if !child.check_preconditions(self.source, context) {
                    continue;
                }
                let mut guard = context.enter_node(Arc::clone(child));
                match self.step(child, guard.context()) {
                    Ok(()) => return Ok(true),
                    // Probing: a mismatched spelling deeper in the branch is
                    // how "is this the right branch" is tested.
                    Err(error) if error.kind() == ErrorKind::LiteralNotMatch => {}
                    // Another node under the same spelling may still match;
                    // keep the failure in case none does.
                    Err(error) => last_error = Some(error),
                }
            }
            if let Some(error) = last_error {
                return Err(error);
            }
        }
        for child in &target.children {
            if !child.check_preconditions(self.source, context) {
                continue;
            }
            // The first generic child that passes its preconditions is
            // committed to: it runs to completion or its error propagates.
            let mut guard = context.enter_node(Arc::clone(child));
            return self.step(child, guard.context()).map(|()| true);
        }
        Ok(false)
    }

    fn unknown_argument(&self, node: &Arc<Node>, context: &CommandContext) -> CommandError {
        let mut error = CommandError::new(
            ErrorDetail::UnknownArgument,
            context.command_read().to_string(),
            context.command().to_string(),
        );
        node.handle_own_error(&mut error, self.source, context);
        error
    }
}
