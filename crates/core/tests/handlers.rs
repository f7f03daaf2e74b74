//! Error-handler dispatch tests: own vs child handlers, subtype matching,
//! declaration order, and the handled flag.

mod common;

use cmdtree_core::{ErrorHandlerFn, ErrorKind, Integer, Node};
use common::MemorySource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn own_and_child_handlers_are_isolated() {
    let own = Arc::new(AtomicUsize::new(0));
    let child = Arc::new(AtomicUsize::new(0));
    let own_hits = Arc::clone(&own);
    let child_hits = Arc::clone(&child);

    let root = Arc::new(
        Node::literal("root")
            .then(Node::literal("kid"))
            .on_error(
                ErrorKind::Any,
                move |_, _, _| {
                    own_hits.fetch_add(1, Ordering::SeqCst);
                },
                false,
            )
            .on_child_error(
                ErrorKind::Any,
                move |_, _, _| {
                    child_hits.fetch_add(1, Ordering::SeqCst);
                },
                false,
            ),
    );
    let source = MemorySource::new(0);

    // Raised at the child: only the child-error handler fires.
    root.execute(&source, "root kid").unwrap_err();
    assert_eq!(own.load(Ordering::SeqCst), 0);
    assert_eq!(child.load(Ordering::SeqCst), 1);

    // Raised at the root itself: only the own-error handler fires.
    root.execute(&source, "root").unwrap_err();
    assert_eq!(own.load(Ordering::SeqCst), 1);
    assert_eq!(child.load(Ordering::SeqCst), 1);
}

#[test]
fn handlers_match_supertypes_of_the_raised_kind() {
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&hits);

    let root = Arc::new(
        Node::literal("give").then(
            Node::argument("n", Integer::new())
                .runs(|_, _| {})
                .on_error(
                    ErrorKind::IllegalArgument,
                    move |_, _, _| {
                        sink.fetch_add(1, Ordering::SeqCst);
                    },
                    false,
                ),
        ),
    );
    let source = MemorySource::new(0);

    // InvalidInteger is-a IllegalArgument: the handler fires.
    root.execute(&source, "give ten").unwrap_err();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn handlers_do_not_match_sibling_kinds() {
    let root = Arc::new(
        Node::literal("solo").on_error(
            ErrorKind::UnknownCommand,
            |_, _, _| panic!("must not fire for UnknownArgument"),
            false,
        ),
    );
    let source = MemorySource::new(0);

    let err = root.execute(&source, "solo trailing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn matching_handlers_fire_in_declaration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&order);
    let second = Arc::clone(&order);

    let root = Arc::new(
        Node::literal("solo")
            .on_error(
                ErrorKind::UnknownCommand,
                move |_, _, _| first.lock().unwrap().push("exact"),
                false,
            )
            .on_error(
                ErrorKind::Any,
                move |_, _, _| second.lock().unwrap().push("any"),
                false,
            ),
    );
    let source = MemorySource::new(0);

    root.execute(&source, "solo").unwrap_err();
    assert_eq!(*order.lock().unwrap(), vec!["exact", "any"]);
}

#[test]
fn handled_flag_is_auto_marked_without_stopping_propagation() {
    let root = Arc::new(Node::literal("quiet").on_error(ErrorKind::Any, |_, _, _| {}, true));
    let source = MemorySource::new(0);

    // The error still propagates to the caller, marked handled.
    let err = root.execute(&source, "quiet").unwrap_err();
    assert!(err.is_handled());

    let loud = Arc::new(Node::literal("loud").on_error(ErrorKind::Any, |_, _, _| {}, false));
    let err = loud.execute(&source, "loud").unwrap_err();
    assert!(!err.is_handled());
}

#[test]
fn child_errors_bubble_through_every_ancestor() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let at_mid = Arc::clone(&order);
    let at_root = Arc::clone(&order);

    let root = Arc::new(
        Node::literal("a")
            .then(
                Node::literal("b")
                    .then(Node::argument("n", Integer::new()).runs(|_, _| {}))
                    .on_child_error(
                        ErrorKind::Syntax,
                        move |_, error, _| {
                            at_mid
                                .lock()
                                .unwrap()
                                .push(format!("mid:{}", error.error_segment()));
                        },
                        false,
                    ),
            )
            .on_child_error(
                ErrorKind::Syntax,
                move |_, error, _| {
                    at_root
                        .lock()
                        .unwrap()
                        .push(format!("root:{}", error.error_segment()));
                },
                false,
            ),
    );
    let source = MemorySource::new(0);

    root.execute(&source, "a b oops").unwrap_err();
    assert_eq!(*order.lock().unwrap(), vec!["mid:oops", "root:oops"]);
}

#[test]
fn handler_sees_the_bound_context_values() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let root = Arc::new(
        Node::literal("page").then(
            Node::argument("no", Integer::new())
                .requires(|_, context| {
                    context.get("no").and_then(|v| v.as_int()).unwrap_or(0) <= 10
                })
                .runs(|_, _| {})
                .on_error(
                    ErrorKind::RequirementNotMet,
                    move |_, _, context| {
                        sink.lock()
                            .unwrap()
                            .push(context.get("no").unwrap().as_int().unwrap());
                    },
                    true,
                ),
        ),
    );
    let source = MemorySource::new(0);

    root.execute(&source, "page 3").unwrap();
    let err = root.execute(&source, "page 99").unwrap_err();
    assert!(err.is_handled());
    assert_eq!(*seen.lock().unwrap(), vec![99]);
}

#[test]
fn shorter_handler_arities_are_supported() {
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&hits);

    let root = Arc::new(Node::literal("solo").on_error_handler(
        ErrorKind::Any,
        ErrorHandlerFn::no_args(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        }),
        false,
    ));
    let source = MemorySource::new(0);

    root.execute(&source, "solo").unwrap_err();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
