//! The closed family of user-supplied callback shapes.
//!
//! Every callback a plugin hands to the node graph — terminal callbacks,
//! requirement predicates, failure-message producers, suggestion sources,
//! error handlers — may want only a prefix of the full argument list. Instead
//! of inspecting arity at call time, the shape is chosen at registration time
//! through one of the enum variants below; the engine always supplies the
//! full set and the variant forwards what its closure declared.
//!
//! All variants wrap `Arc`, so callbacks clone cheaply and a single closure
//! can back several nodes (the declarative builder relies on this).

use crate::context::CommandContext;
use crate::source::CommandSource;
use cmdtree_errors::CommandError;
use std::sync::Arc;

/// A callback taking a prefix of `(source, context)` and returning `R`.
///
/// Instantiated as [`Callback`], [`Predicate`], [`MessageGetter`] and
/// [`SuggestionGetter`].
pub enum SourceContextFn<R> {
    /// Ignores both arguments.
    NoArgs(Arc<dyn Fn() -> R + Send + Sync>),
    /// Receives the command source only.
    Source(Arc<dyn Fn(&dyn CommandSource) -> R + Send + Sync>),
    /// Receives the command source and the command context.
    SourceContext(Arc<dyn Fn(&dyn CommandSource, &CommandContext) -> R + Send + Sync>),
}

/// A terminal command callback.
pub type Callback = SourceContextFn<()>;
/// A requirement or precondition predicate.
pub type Predicate = SourceContextFn<bool>;
/// A producer of a requirement-failure reason.
pub type MessageGetter = SourceContextFn<String>;
/// A producer of autocomplete candidates.
pub type SuggestionGetter = SourceContextFn<Vec<String>>;

impl<R> SourceContextFn<R> {
    /// Wrap a closure that ignores both arguments.
    pub fn no_args(f: impl Fn() -> R + Send + Sync + 'static) -> Self {
        SourceContextFn::NoArgs(Arc::new(f))
    }

    /// Wrap a closure that only wants the command source.
    pub fn with_source(f: impl Fn(&dyn CommandSource) -> R + Send + Sync + 'static) -> Self {
        SourceContextFn::Source(Arc::new(f))
    }

    /// Wrap a closure with the full `(source, context)` argument list.
    pub fn new(
        f: impl Fn(&dyn CommandSource, &CommandContext) -> R + Send + Sync + 'static,
    ) -> Self {
        SourceContextFn::SourceContext(Arc::new(f))
    }

    /// Invoke the callback, forwarding the arguments its shape declared.
    pub fn invoke(&self, source: &dyn CommandSource, context: &CommandContext) -> R {
        match self {
            SourceContextFn::NoArgs(f) => f(),
            SourceContextFn::Source(f) => f(source),
            SourceContextFn::SourceContext(f) => f(source, context),
        }
    }
}

impl<R> Clone for SourceContextFn<R> {
    fn clone(&self) -> Self {
        match self {
            SourceContextFn::NoArgs(f) => SourceContextFn::NoArgs(Arc::clone(f)),
            SourceContextFn::Source(f) => SourceContextFn::Source(Arc::clone(f)),
            SourceContextFn::SourceContext(f) => SourceContextFn::SourceContext(Arc::clone(f)),
        }
    }
}

/// An error handler taking a prefix of `(source, error, context)`.
pub enum ErrorHandlerFn {
    /// Ignores all arguments.
    NoArgs(Arc<dyn Fn() + Send + Sync>),
    /// Receives the command source only.
    Source(Arc<dyn Fn(&dyn CommandSource) + Send + Sync>),
    /// Receives the command source and the error.
    SourceError(Arc<dyn Fn(&dyn CommandSource, &CommandError) + Send + Sync>),
    /// Receives the command source, the error, and the command context.
    Full(Arc<dyn Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync>),
}

impl ErrorHandlerFn {
    /// Wrap a closure that ignores all arguments.
    pub fn no_args(f: impl Fn() + Send + Sync + 'static) -> Self {
        ErrorHandlerFn::NoArgs(Arc::new(f))
    }

    /// Wrap a closure that only wants the command source.
    pub fn with_source(f: impl Fn(&dyn CommandSource) + Send + Sync + 'static) -> Self {
        ErrorHandlerFn::Source(Arc::new(f))
    }

    /// Wrap a closure that wants the source and the error.
    pub fn with_error(
        f: impl Fn(&dyn CommandSource, &CommandError) + Send + Sync + 'static,
    ) -> Self {
        ErrorHandlerFn::SourceError(Arc::new(f))
    }

    /// Wrap a closure with the full `(source, error, context)` argument list.
    pub fn new(
        f: impl Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync + 'static,
    ) -> Self {
        ErrorHandlerFn::Full(Arc::new(f))
    }

    /// Invoke the handler, forwarding the arguments its shape declared.
    pub fn invoke(
        &self,
        source: &dyn CommandSource,
        error: &CommandError,
        context: &CommandContext,
    ) {
        match self {
            ErrorHandlerFn::NoArgs(f) => f(),
            ErrorHandlerFn::Source(f) => f(source),
            ErrorHandlerFn::SourceError(f) => f(source, error),
            ErrorHandlerFn::Full(f) => f(source, error, context),
        }
    }
}

impl Clone for ErrorHandlerFn {
    fn clone(&self) -> Self {
        match self {
            ErrorHandlerFn::NoArgs(f) => ErrorHandlerFn::NoArgs(Arc::clone(f)),
            ErrorHandlerFn::Source(f) => ErrorHandlerFn::Source(Arc::clone(f)),
            ErrorHandlerFn::SourceError(f) => ErrorHandlerFn::SourceError(Arc::clone(f)),
            ErrorHandlerFn::Full(f) => ErrorHandlerFn::Full(Arc::clone(f)),
        }
    }
}

/// One requirement gate: the predicate plus its optional failure-message
/// producer, invoked only when the predicate rejects.
#[derive(Clone)]
pub struct Requirement {
    pub(crate) predicate: Predicate,
    pub(crate) failure_message: Option<MessageGetter>,
}

impl Requirement {
    /// A requirement with the default failure reason.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            failure_message: None,
        }
    }

    /// A requirement with a custom failure-message producer.
    pub fn with_message(predicate: Predicate, failure_message: MessageGetter) -> Self {
        Self {
            predicate,
            failure_message: Some(failure_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConsoleSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn each_arity_receives_its_prefix() {
        let source = ConsoleSource::new(3);
        let context = CommandContext::new("cmd");

        let nullary = Predicate::no_args(|| true);
        let unary = Predicate::with_source(|src| src.has_permission(2));
        let binary = Predicate::new(|src, ctx| src.is_console() && ctx.command() == "cmd");

        assert!(nullary.invoke(&source, &context));
        assert!(unary.invoke(&source, &context));
        assert!(binary.invoke(&source, &context));
    }

    #[test]
    fn clones_share_the_closure() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let callback = Callback::no_args(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let copy = callback.clone();

        let source = ConsoleSource::new(0);
        let context = CommandContext::new("");
        callback.invoke(&source, &context);
        copy.invoke(&source, &context);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn error_handler_arities() {
        use cmdtree_errors::ErrorDetail;

        let source = ConsoleSource::new(0);
        let context = CommandContext::new("boom");
        let error = CommandError::new(ErrorDetail::UnknownCommand, "boom", "boom");

        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        ErrorHandlerFn::no_args(move || {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .invoke(&source, &error, &context);

        let s = Arc::clone(&seen);
        ErrorHandlerFn::with_error(move |_src, err| {
            assert_eq!(err.failed_command(), "boom");
            s.fetch_add(1, Ordering::SeqCst);
        })
        .invoke(&source, &error, &context);

        let s = Arc::clone(&seen);
        ErrorHandlerFn::new(move |_src, err, ctx| {
            assert_eq!(err.parsed_command(), ctx.command());
            s.fetch_add(1, Ordering::SeqCst);
        })
        .invoke(&source, &error, &context);

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }
}
