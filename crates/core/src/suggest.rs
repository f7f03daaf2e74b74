//! The suggestion engine.
//!
//! Mirrors the execution walk but never raises: a parse failure simply ends
//! the branch and yields the failing node's own suggestions for the element
//! under the cursor. When the input is exhausted at a fan-out point, the
//! walk additionally computes a combined usage placeholder (`complete_hint`)
//! over the candidate children, so a caller can render one summary line for
//! the branch.

use crate::context::CommandContext;
use crate::element::{first_element, strip_divider_prefix};
use crate::node::Node;
use crate::source::CommandSource;
use cmdtree_errors::{CommandSuggestion, CommandSuggestions};
use std::sync::Arc;

impl Node {
    /// Compute autocomplete candidates for `command` against the tree rooted
    /// here. Pure: no callback fires and nothing is executed.
    pub fn generate_suggestions(
        self: &Arc<Node>,
        source: &dyn CommandSource,
        command: &str,
    ) -> CommandSuggestions {
        let mut context = CommandContext::new(command);
        let completer = Completer { source };
        let mut guard = context.enter_node(Arc::clone(self));
        completer.step(self, guard.context())
    }
}

struct Completer<'a> {
    source: &'a dyn CommandSource,
}

impl Completer<'_> {
    fn step(&self, node: &Arc<Node>, context: &mut CommandContext) -> CommandSuggestions {
        let command_read = context.command_read().to_string();
        if context.command_remaining().is_empty() {
            return self.node_suggestions(node, context, &command_read);
        }
        let parse_result = match node.parse(context.command_remaining()) {
            Ok(result) => result,
            // The element under the cursor doesn't parse here; offer this
            // node's own completions for it.
            Err(_) => return self.node_suggestions(node, context, &command_read),
        };

        let success_read = context.cursor() + parse_result.consumed;
        let remaining = context.command_remaining();
        let stripped = strip_divider_prefix(&remaining[parse_result.consumed..]);
        let new_cursor = context.command().len() - stripped.len();
        let mut visit = context.visit_node(node, parse_result.value, new_cursor);
        let context = visit.context();

        if node.check_requirements(self.source, context).is_some() {
            return CommandSuggestions::new();
        }

        // Input ends at this node with no trailing divider: the user is
        // still typing this element, so refine it rather than descend.
        if context.command_remaining().is_empty() && success_read == new_cursor {
            return self.node_suggestions(node, context, &command_read);
        }

        let redirect = node.redirect_target();
        let target = redirect.as_ref().unwrap_or(node);
        let mut suggestions = CommandSuggestions::new();
        let token = first_element(context.command_remaining()).to_string();

        if let Some(bucket) = target.literal_bucket(&token) {
            for child in bucket {
                if !child.check_preconditions(self.source, context) {
                    continue;
                }
                let mut guard = context.enter_node(Arc::clone(child));
                let sub = self.step(child, guard.context());
                drop(guard);
                suggestions.extend(sub);
            }
        } else {
            // No bucket claims the element: fan out into every child.
            let at_branch_point = context.command_remaining().is_empty();
            let mut group_spellings: Vec<String> = Vec::new();

            for child in target.unique_literal_children() {
                if !child.check_preconditions(self.source, context) {
                    continue;
                }
                if at_branch_point && let Some(spellings) = child.spellings() {
                    group_spellings.extend(spellings.iter().cloned());
                }
                let mut guard = context.enter_node(Arc::clone(child));
                let sub = self.step(child, guard.context());
                drop(guard);
                suggestions.extend(sub);
            }

            let mut usages: Vec<String> = Vec::new();
            if !group_spellings.is_empty() {
                usages.push(format!("<{}>", group_spellings.join("|")));
            }
            for child in &target.children {
                if !child.check_preconditions(self.source, context) {
                    continue;
                }
                let mut guard = context.enter_node(Arc::clone(child));
                let sub = self.step(child, guard.context());
                drop(guard);
                suggestions.extend(sub);
                if at_branch_point {
                    usages.push(child.usage());
                }
            }
            if at_branch_point && !usages.is_empty() {
                suggestions.complete_hint = Some(usages.join("|"));
            }
        }
        suggestions
    }

    fn node_suggestions(
        &self,
        node: &Arc<Node>,
        context: &CommandContext,
        command_read: &str,
    ) -> CommandSuggestions {
        node.self_suggestions(self.source, context)
            .into_iter()
            .map(|segment| CommandSuggestion::new(command_read, segment))
            .collect()
    }
}
