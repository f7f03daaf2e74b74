//! Suggestion-engine integration tests: branch completion, hints, and the
//! never-raises contract.

mod common;

use cmdtree_core::{Boolean, Enumeration, Integer, Node, QuotableText, Text};
use common::{MemorySource, pairs, segments};
use std::sync::Arc;

#[test]
fn literal_children_complete_after_a_divider() {
    let root = Arc::new(
        Node::literal("cmd")
            .then(Node::literal("ping").runs(|_, _| {}))
            .then(Node::literal("pong").runs(|_, _| {})),
    );
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "cmd ");
    assert_eq!(
        pairs(&suggestions),
        vec![
            ("cmd ".to_string(), "ping".to_string()),
            ("cmd ".to_string(), "pong".to_string()),
        ]
    );
    assert_eq!(suggestions.complete_hint.as_deref(), Some("<ping|pong>"));
}

#[test]
fn partial_element_refines_at_the_current_node() {
    let root = Arc::new(Node::literal("cmd").then(Node::literal("ping").runs(|_, _| {})));
    let source = MemorySource::new(0);

    // Still typing the first element: the root refines itself.
    let suggestions = root.generate_suggestions(&source, "cm");
    assert_eq!(pairs(&suggestions), vec![(String::new(), "cmd".to_string())]);

    // Typing a child element: mismatching children offer their spellings.
    let suggestions = root.generate_suggestions(&source, "cmd pi");
    assert_eq!(
        pairs(&suggestions),
        vec![("cmd ".to_string(), "ping".to_string())]
    );
    assert!(suggestions.complete_hint.is_none());
}

#[test]
fn empty_input_suggests_the_root_itself() {
    let root = Arc::new(Node::literal(["proc", "p"]).runs(|_, _| {}));
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "");
    assert_eq!(segments(&suggestions), vec!["proc", "p"]);
}

#[test]
fn argument_suggestion_source_is_consulted() {
    let root = Arc::new(
        Node::literal("whereis").then(
            Node::argument("player", Text::new())
                .suggests(|_, _| vec!["steve".into(), "alex".into()])
                .runs(|_, _| {}),
        ),
    );
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "whereis ");
    assert_eq!(segments(&suggestions), vec!["steve", "alex"]);
    assert_eq!(suggestions.complete_hint.as_deref(), Some("<player>"));
}

#[test]
fn metavar_renames_the_placeholder() {
    let root = Arc::new(Node::literal("kill").then(
        Node::argument("pid", Integer::new()).metavar("process-id").runs(|_, _| {}),
    ));
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "kill ");
    assert_eq!(suggestions.complete_hint.as_deref(), Some("<process-id>"));
}

#[test]
fn parser_default_suggestions_apply_without_a_source() {
    let root = Arc::new(
        Node::literal("set")
            .then(Node::argument("enabled", Boolean::new()).runs(|_, _| {}))
    );
    let source = MemorySource::new(0);
    let suggestions = root.generate_suggestions(&source, "set ");
    assert_eq!(segments(&suggestions), vec!["true", "false"]);

    let root = Arc::new(Node::literal("env").then(
        Node::argument("name", Enumeration::new(["dev", "staging", "prod"])).runs(|_, _| {}),
    ));
    let suggestions = root.generate_suggestions(&source, "env ");
    assert_eq!(segments(&suggestions), vec!["dev", "staging", "prod"]);
}

#[test]
fn quotable_suggestions_are_quoted_when_needed() {
    let root = Arc::new(
        Node::literal("join").then(
            Node::argument("channel", QuotableText::new())
                .suggests(|_, _| vec!["general".into(), "war room".into()])
                .runs(|_, _| {}),
        ),
    );
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "join ");
    assert_eq!(segments(&suggestions), vec!["general", "\"war room\""]);
}

#[test]
fn mixed_children_combine_into_one_hint() {
    let root = Arc::new(
        Node::literal("proc")
            .then(Node::literal("start").runs(|_, _| {}))
            .then(Node::literal(["stop", "halt"]).runs(|_, _| {}))
            .then(Node::argument("name", Text::new()).runs(|_, _| {})),
    );
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "proc ");
    assert_eq!(
        suggestions.complete_hint.as_deref(),
        Some("<start|stop|halt>|<name>")
    );
    // Literal spellings surface as candidates; the plain-text argument has
    // no suggestion source and contributes none.
    assert_eq!(segments(&suggestions), vec!["start", "stop", "halt"]);
}

#[test]
fn failed_requirement_silences_the_branch() {
    let root = Arc::new(
        Node::literal("secret")
            .requires(|source, _| source.has_permission(3))
            .then(Node::literal("stuff").runs(|_, _| {})),
    );

    let low = MemorySource::new(0);
    assert!(root.generate_suggestions(&low, "secret ").is_empty());

    let high = MemorySource::new(3);
    assert_eq!(
        segments(&root.generate_suggestions(&high, "secret ")),
        vec!["stuff"]
    );
}

#[test]
fn failed_precondition_hides_the_child() {
    let root = Arc::new(
        Node::literal("ops")
            .then(
                Node::literal("wipe")
                    .precondition(|source, _| source.has_permission(3))
                    .runs(|_, _| {}),
            )
            .then(Node::literal("list").runs(|_, _| {})),
    );

    let low = MemorySource::new(0);
    let suggestions = root.generate_suggestions(&low, "ops ");
    assert_eq!(segments(&suggestions), vec!["list"]);
    assert_eq!(suggestions.complete_hint.as_deref(), Some("<list>"));

    let high = MemorySource::new(3);
    assert_eq!(
        segments(&root.generate_suggestions(&high, "ops ")),
        vec!["wipe", "list"]
    );
}

#[test]
fn redirected_nodes_suggest_the_target_children() {
    let full = Arc::new(
        Node::literal("teleport")
            .then(Node::literal("spawn").runs(|_, _| {}))
            .then(Node::literal("home").runs(|_, _| {})),
    );
    let alias = Arc::new(Node::literal("tp").redirects(Arc::clone(&full)));
    let source = MemorySource::new(0);

    let suggestions = alias.generate_suggestions(&source, "tp ");
    assert_eq!(segments(&suggestions), vec!["spawn", "home"]);
    assert_eq!(suggestions.complete_hint.as_deref(), Some("<spawn|home>"));
}

#[test]
fn suggesting_never_executes_callbacks() {
    let root = Arc::new(Node::literal("boom").runs(|_, _| panic!("suggest must not execute")));
    let source = MemorySource::new(0);

    let suggestions = root.generate_suggestions(&source, "boom");
    assert_eq!(segments(&suggestions), vec!["boom"]);
}

#[test]
fn unparsable_middle_element_ends_the_branch_quietly() {
    let root = Arc::new(Node::literal("give").then(
        Node::argument("n", Integer::new()).then(Node::literal("times").runs(|_, _| {})),
    ));
    let source = MemorySource::new(0);

    // "ten" fails the integer parse; the argument node has no suggestions
    // of its own, so the result is empty rather than an error.
    let suggestions = root.generate_suggestions(&source, "give ten ");
    assert!(suggestions.is_empty());

    // A parsable value continues to the next branch point.
    let suggestions = root.generate_suggestions(&source, "give 3 ");
    assert_eq!(segments(&suggestions), vec!["times"]);
}
