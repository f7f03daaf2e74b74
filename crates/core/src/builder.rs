//! The declarative tree builder.
//!
//! Declares commands as flat `(path, callback)` pairs — `"proc start
//! <name>"` — instead of hand-nesting `then` chains. Segments wrapped in
//! angle brackets are argument slots whose node factory must be registered
//! under the slot name; bare segments become plain literals unless a custom
//! literal definition was registered for that exact text. Paths sharing a
//! prefix share the prefix's nodes.

use crate::callback::{
    Callback, ErrorHandlerFn, MessageGetter, Predicate, Requirement, SuggestionGetter,
};
use crate::context::CommandContext;
use crate::element::DIVIDER;
use crate::node::Node;
use crate::registry::{CommandRegistry, RegistryError};
use crate::source::CommandSource;
use cmdtree_errors::{CommandError, ErrorKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Failure while assembling trees from declared paths.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A `<slot>` segment was used without a registered argument definition.
    #[error("undefined argument node {name}")]
    UndefinedArgument {
        /// The slot name as written in the path, brackets included.
        name: String,
    },
    /// A declared command path contained no segments.
    #[error("empty command path")]
    EmptyPath,
    /// A built root was not a literal node and cannot key dispatch.
    #[error("a non-literal node cannot be a command root")]
    NonLiteralRoot,
}

/// A node definition: how to create the node for a segment name, plus the
/// customizations applied to every node the definition creates.
pub struct NodeDefinition {
    factory: Arc<dyn Fn(&str) -> Node + Send + Sync>,
    post: Vec<Arc<dyn Fn(Node) -> Node + Send + Sync>>,
}

impl NodeDefinition {
    fn new(factory: impl Fn(&str) -> Node + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            post: Vec::new(),
        }
    }

    fn create(&self, name: &str) -> Node {
        let mut node = (self.factory)(name);
        for post in &self.post {
            node = post(node);
        }
        node
    }

    /// Apply `f` to every node this definition creates.
    pub fn post_process(&mut self, f: impl Fn(Node) -> Node + Send + Sync + 'static) -> &mut Self {
        self.post.push(Arc::new(f));
        self
    }

    /// Attach a requirement gate to every created node.
    pub fn requires(
        &mut self,
        predicate: impl Fn(&dyn CommandSource, &CommandContext) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        let predicate = Predicate::new(predicate);
        self.post_process(move |node| node.requires_predicate(Requirement::new(predicate.clone())))
    }

    /// Attach a requirement gate with a failure-message producer.
    pub fn requires_with_message(
        &mut self,
        predicate: impl Fn(&dyn CommandSource, &CommandContext) -> bool + Send + Sync + 'static,
        failure_message: impl Fn(&dyn CommandSource, &CommandContext) -> String
        + Send
        + Sync
        + 'static,
    ) -> &mut Self {
        let predicate = Predicate::new(predicate);
        let message = MessageGetter::new(failure_message);
        self.post_process(move |node| {
            node.requires_predicate(Requirement::with_message(
                predicate.clone(),
                message.clone(),
            ))
        })
    }

    /// Set the suggestion source of every created node.
    pub fn suggests(
        &mut self,
        f: impl Fn(&dyn CommandSource, &CommandContext) -> Vec<String> + Send + Sync + 'static,
    ) -> &mut Self {
        let getter = SuggestionGetter::new(f);
        self.post_process(move |node| node.suggests_getter(getter.clone()))
    }

    /// Register an own-error handler on every created node.
    pub fn on_error(
        &mut self,
        kind: ErrorKind,
        f: impl Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync + 'static,
        handled: bool,
    ) -> &mut Self {
        let handler = ErrorHandlerFn::new(f);
        self.post_process(move |node| node.on_error_handler(kind, handler.clone(), handled))
    }

    /// Register a child-error handler on every created node.
    pub fn on_child_error(
        &mut self,
        kind: ErrorKind,
        f: impl Fn(&dyn CommandSource, &CommandError, &CommandContext) + Send + Sync + 'static,
        handled: bool,
    ) -> &mut Self {
        let handler = ErrorHandlerFn::new(f);
        self.post_process(move |node| node.on_child_error_handler(kind, handler.clone(), handled))
    }
}

/// One intermediate tree slot: mutable while paths are merged, frozen into
/// `Arc<Node>`s bottom-up when the build completes.
struct Slot {
    name: String,
    callback: Option<Callback>,
    children: Vec<Slot>,
}

impl Slot {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            callback: None,
            children: Vec::new(),
        }
    }
}

/// Builds command trees from flat path declarations.
#[derive(Default)]
pub struct CommandBuilder {
    commands: Vec<(String, Callback)>,
    literals: HashMap<String, NodeDefinition>,
    arguments: HashMap<String, NodeDefinition>,
    cache: Option<Vec<Arc<Node>>>,
}

fn is_arg(segment: &str) -> bool {
    segment.len() > 1 && segment.starts_with('<') && segment.ends_with('>')
}

fn make_arg(name: &str) -> String {
    if is_arg(name) {
        name.to_string()
    } else {
        format!("<{name}>")
    }
}

fn strip_arg(segment: &str) -> &str {
    if is_arg(segment) {
        &segment[1..segment.len() - 1]
    } else {
        segment
    }
}

impl CommandBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a command path and its callback. Re-declaring a path replaces
    /// its callback.
    pub fn command(
        &mut self,
        path: impl Into<String>,
        f: impl Fn(&dyn CommandSource, &CommandContext) + Send + Sync + 'static,
    ) -> &mut Self {
        self.command_callback(path, Callback::new(f))
    }

    /// Like [`CommandBuilder::command`], accepting any callback shape.
    pub fn command_callback(&mut self, path: impl Into<String>, callback: Callback) -> &mut Self {
        let path = path.into();
        match self.commands.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = callback,
            None => self.commands.push((path, callback)),
        }
        self.cache = None;
        self
    }

    /// Define the argument node for a slot name. Every `<slot>` appearing in
    /// a declared path must be defined. Returns the definition for further
    /// customization.
    pub fn arg(
        &mut self,
        name: &str,
        factory: impl Fn(&str) -> Node + Send + Sync + 'static,
    ) -> &mut NodeDefinition {
        self.cache = None;
        let key = make_arg(name);
        self.arguments.insert(key.clone(), NodeDefinition::new(factory));
        self.arguments.get_mut(&key).expect("just inserted")
    }

    /// Customize the literal node used for a segment text. Without this, a
    /// plain literal is created.
    pub fn literal(&mut self, text: &str) -> &mut NodeDefinition {
        self.literal_factory(text, |name| Node::literal(name))
    }

    /// Like [`CommandBuilder::literal`], with a custom node factory.
    pub fn literal_factory(
        &mut self,
        text: &str,
        factory: impl Fn(&str) -> Node + Send + Sync + 'static,
    ) -> &mut NodeDefinition {
        self.cache = None;
        self.literals
            .insert(text.to_string(), NodeDefinition::new(factory));
        self.literals.get_mut(text).expect("just inserted")
    }

    /// Build the declared trees. Nodes are reused per parent and segment
    /// name, so paths sharing a prefix share nodes. The result is cached
    /// until the builder is mutated again.
    pub fn build(&mut self) -> Result<Vec<Arc<Node>>, BuildError> {
        if let Some(cache) = &self.cache {
            return Ok(cache.clone());
        }
        let mut slots: Vec<Slot> = Vec::new();
        for (path, callback) in &self.commands {
            let segments: Vec<&str> = path
                .split(DIVIDER)
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.is_empty() {
                return Err(BuildError::EmptyPath);
            }
            Self::insert_path(&mut slots, &segments, callback);
        }
        let mut roots = Vec::with_capacity(slots.len());
        for slot in slots {
            roots.push(Arc::new(self.freeze(slot)?));
        }
        self.cache = Some(roots.clone());
        Ok(roots)
    }

    /// Build and register every root into `registry`.
    pub fn register_to(&mut self, registry: &mut CommandRegistry) -> Result<(), BuildError> {
        for root in self.build()? {
            registry.register(root).map_err(|error| match error {
                RegistryError::NonLiteralRoot => BuildError::NonLiteralRoot,
            })?;
        }
        Ok(())
    }

    /// Build and print every declared tree.
    pub fn print_tree(&mut self, line_writer: &mut dyn FnMut(&str)) -> Result<(), BuildError> {
        for root in self.build()? {
            root.print_tree(line_writer);
        }
        Ok(())
    }

    fn insert_path(slots: &mut Vec<Slot>, segments: &[&str], callback: &Callback) {
        let (head, rest) = segments
            .split_first()
            .expect("insert_path requires at least one segment");
        let pos = match slots.iter().position(|slot| slot.name == *head) {
            Some(pos) => pos,
            None => {
                slots.push(Slot::new(head));
                slots.len() - 1
            }
        };
        if rest.is_empty() {
            slots[pos].callback = Some(callback.clone());
        } else {
            Self::insert_path(&mut slots[pos].children, rest, callback);
        }
    }

    fn freeze(&self, slot: Slot) -> Result<Node, BuildError> {
        let mut node = self.create_node(&slot.name)?;
        for child in slot.children {
            node = node.then(self.freeze(child)?);
        }
        if let Some(callback) = slot.callback {
            node = node.runs_callback(callback);
        }
        Ok(node)
    }

    fn create_node(&self, segment: &str) -> Result<Node, BuildError> {
        if is_arg(segment) {
            match self.arguments.get(segment) {
                Some(definition) => Ok(definition.create(strip_arg(segment))),
                None => Err(BuildError::UndefinedArgument {
                    name: segment.to_string(),
                }),
            }
        } else {
            match self.literals.get(segment) {
                Some(definition) => Ok(definition.create(segment)),
                None => Ok(Node::literal(segment)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::{Integer, Text};
    use crate::source::ConsoleSource;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn paths_sharing_a_prefix_share_nodes() {
        let mut builder = CommandBuilder::new();
        builder.command("proc start", |_, _| {});
        builder.command("proc stop", |_, _| {});
        builder.command("help", |_, _| {});

        let roots = builder.build().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].spellings().unwrap(), &["proc"]);
        assert_eq!(roots[0].get_children().len(), 2);
        assert_eq!(roots[1].spellings().unwrap(), &["help"]);
    }

    #[test]
    fn undefined_argument_slot_is_a_build_error() {
        let mut builder = CommandBuilder::new();
        builder.command("proc kill <pid>", |_, _| {});
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            BuildError::UndefinedArgument { ref name } if name == "<pid>"
        ));
    }

    #[test]
    fn built_trees_execute_with_arguments() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut builder = CommandBuilder::new();
        builder.arg("pid", |name| Node::argument(name, Integer::new().at_min(1)));
        builder.command("proc kill <pid>", move |_source, context| {
            sink.lock()
                .unwrap()
                .push(context.get("pid").unwrap().as_int().unwrap());
        });

        let roots = builder.build().unwrap();
        let source = ConsoleSource::new(0);
        roots[0].execute(&source, "proc kill 42").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![42]);

        let err = roots[0].execute(&source, "proc kill 0").unwrap_err();
        assert_eq!(err.kind(), cmdtree_errors::ErrorKind::NumberOutOfRange);
    }

    #[test]
    fn definition_customizations_apply_to_created_nodes() {
        let mut builder = CommandBuilder::new();
        builder
            .arg("who", |name| Node::argument(name, Text::new()))
            .suggests(|_, _| vec!["steve".into(), "alex".into()]);
        builder
            .literal("admin")
            .requires(|source, _| source.has_permission(3));
        builder.command("admin ban <who>", |_, _| {});

        let roots = builder.build().unwrap();
        let low = ConsoleSource::new(0);
        let err = roots[0].execute(&low, "admin ban steve").unwrap_err();
        assert_eq!(err.kind(), cmdtree_errors::ErrorKind::RequirementNotMet);

        let high = ConsoleSource::new(4);
        let suggestions = roots[0].generate_suggestions(&high, "admin ban ");
        let segments: Vec<&str> = suggestions
            .iter()
            .map(|s| s.suggest_segment.as_str())
            .collect();
        assert_eq!(segments, vec!["steve", "alex"]);
    }

    #[test]
    fn build_cache_is_invalidated_by_mutation() {
        let mut builder = CommandBuilder::new();
        builder.command("one", |_, _| {});
        let first = builder.build().unwrap();
        let again = builder.build().unwrap();
        assert!(Arc::ptr_eq(&first[0], &again[0]));

        builder.command("two", |_, _| {});
        let rebuilt = builder.build().unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert!(!Arc::ptr_eq(&first[0], &rebuilt[0]));
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut builder = CommandBuilder::new();
        builder.command("  ", |_, _| {});
        assert!(matches!(builder.build(), Err(BuildError::EmptyPath)));
    }

    #[test]
    fn register_to_rejects_argument_roots() {
        let mut builder = CommandBuilder::new();
        builder.arg("n", |name| Node::argument(name, Integer::new()));
        builder.command("<n>", |_, _| {});
        let mut registry = CommandRegistry::new();
        assert!(matches!(
            builder.register_to(&mut registry),
            Err(BuildError::NonLiteralRoot)
        ));
    }

    #[test]
    fn redeclaring_a_path_replaces_its_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut builder = CommandBuilder::new();
        builder.command("hit", |_, _| panic!("replaced callback must not run"));
        let c = Arc::clone(&count);
        builder.command("hit", move |_, _| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let roots = builder.build().unwrap();
        let source = ConsoleSource::new(0);
        roots[0].execute(&source, "hit").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
