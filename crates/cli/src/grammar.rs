//! Grammar-file loading.
//!
//! A grammar file declares command paths with templated replies, typed
//! argument slots, and optional permission gates on literal words. The file
//! is plain JSON consumed by the declarative builder, so a deployment can
//! swap command sets without recompiling.

use anyhow::{Context as _, Result};
use cmdtree_core::{
    Boolean, CommandBuilder, CommandContext, CommandRegistry, CommandSource, Enumeration, Float,
    GreedyText, Integer, Node, Number, QuotableText, Text,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

/// A parsed grammar file.
#[derive(Debug, Deserialize)]
pub(crate) struct GrammarFile {
    /// Argument-slot definitions, keyed by slot name (without brackets).
    #[serde(default)]
    pub(crate) args: BTreeMap<String, ArgSpec>,
    /// Customizations for literal words, keyed by the exact segment text.
    #[serde(default)]
    pub(crate) literals: BTreeMap<String, LiteralSpec>,
    /// The declared commands.
    pub(crate) commands: Vec<CommandSpec>,
}

/// One declared command: a builder path plus the reply template its callback
/// renders. `{slot}` placeholders are filled from the bound context values.
#[derive(Debug, Deserialize)]
pub(crate) struct CommandSpec {
    pub(crate) path: String,
    pub(crate) reply: String,
}

/// Customization of a literal word.
#[derive(Debug, Deserialize)]
pub(crate) struct LiteralSpec {
    /// Minimum permission level required to pass this word.
    pub(crate) permission: Option<u8>,
}

/// A typed argument-slot definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ArgSpec {
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Float {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Text {
        #[serde(default)]
        min_length: Option<usize>,
        #[serde(default)]
        max_length: Option<usize>,
    },
    QuotableText {
        #[serde(default)]
        min_length: Option<usize>,
        #[serde(default)]
        max_length: Option<usize>,
        #[serde(default)]
        allow_empty: bool,
    },
    GreedyText {
        #[serde(default)]
        min_length: Option<usize>,
        #[serde(default)]
        max_length: Option<usize>,
    },
    Boolean,
    Enumeration {
        options: Vec<String>,
    },
}

impl ArgSpec {
    /// Create the argument node for this spec under the given slot name.
    fn create_node(&self, name: &str) -> Node {
        match self.clone() {
            ArgSpec::Integer { min, max } => {
                let mut parser = Integer::new();
                if let Some(min) = min {
                    parser = parser.at_min(min);
                }
                if let Some(max) = max {
                    parser = parser.at_max(max);
                }
                Node::argument(name, parser)
            }
            ArgSpec::Float { min, max } => {
                let mut parser = Float::new();
                if let Some(min) = min {
                    parser = parser.at_min(min);
                }
                if let Some(max) = max {
                    parser = parser.at_max(max);
                }
                Node::argument(name, parser)
            }
            ArgSpec::Number { min, max } => {
                let mut parser = Number::new();
                if let Some(min) = min {
                    parser = parser.at_min(min);
                }
                if let Some(max) = max {
                    parser = parser.at_max(max);
                }
                Node::argument(name, parser)
            }
            ArgSpec::Text {
                min_length,
                max_length,
            } => {
                let mut parser = Text::new();
                if let Some(min) = min_length {
                    parser = parser.at_min_length(min);
                }
                if let Some(max) = max_length {
                    parser = parser.at_max_length(max);
                }
                Node::argument(name, parser)
            }
            ArgSpec::QuotableText {
                min_length,
                max_length,
                allow_empty,
            } => {
                let mut parser = QuotableText::new();
                if let Some(min) = min_length {
                    parser = parser.at_min_length(min);
                }
                if let Some(max) = max_length {
                    parser = parser.at_max_length(max);
                }
                if allow_empty {
                    parser = parser.allow_empty();
                }
                Node::argument(name, parser)
            }
            ArgSpec::GreedyText {
                min_length,
                max_length,
            } => {
                let mut parser = GreedyText::new();
                if let Some(min) = min_length {
                    parser = parser.at_min_length(min);
                }
                if let Some(max) = max_length {
                    parser = parser.at_max_length(max);
                }
                Node::argument(name, parser)
            }
            ArgSpec::Boolean => Node::argument(name, Boolean::new()),
            ArgSpec::Enumeration { options } => Node::argument(name, Enumeration::new(options)),
        }
    }
}

/// Load a grammar file and assemble the registry it declares.
pub(crate) fn load_registry(path: &str) -> Result<CommandRegistry> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read grammar file {path}"))?;
    let grammar: GrammarFile =
        serde_json::from_str(&text).with_context(|| format!("invalid grammar file {path}"))?;
    build_registry(&grammar)
}

/// Assemble a registry from a parsed grammar.
pub(crate) fn build_registry(grammar: &GrammarFile) -> Result<CommandRegistry> {
    let mut builder = CommandBuilder::new();
    for (name, spec) in &grammar.args {
        let spec = spec.clone();
        builder.arg(name, move |slot| spec.create_node(slot));
    }
    for (text, spec) in &grammar.literals {
        if let Some(level) = spec.permission {
            builder
                .literal(text)
                .requires_with_message(
                    move |source, _| source.has_permission(level),
                    move |source, _| {
                        format!(
                            "permission level {} required, current level is {}",
                            level,
                            source.permission_level()
                        )
                    },
                );
        }
    }
    for command in &grammar.commands {
        let reply = command.reply.clone();
        builder.command(&command.path, move |source: &dyn CommandSource, context| {
            source.reply(&render_template(&reply, context));
        });
    }

    let mut registry = CommandRegistry::new();
    builder
        .register_to(&mut registry)
        .context("failed to build command trees from the grammar")?;
    Ok(registry)
}

/// Fill `{slot}` placeholders from the context's bound values. Unknown
/// placeholders are left verbatim.
pub(crate) fn render_template(template: &str, context: &CommandContext) -> String {
    let mut out = String::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let Some(end) = rest.find('}') else {
            break;
        };
        let key = &rest[1..end];
        match context.get(key) {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(&rest[..=end]),
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}
