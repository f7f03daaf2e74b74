//! Output rendering for command errors and suggestions.
//!
//! Pretty mode draws an ariadne report over the command line itself, with
//! the failing segment underlined — the inline equivalent of the engine's
//! `<message>: <failed><--` anchor. JSON mode emits the serializable error
//! and suggestion types for machine consumers.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use cmdtree_errors::{CommandError, CommandSuggestions};
use std::io::{self, IsTerminal};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, command-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve the explicit flag, defaulting on whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Render unhandled command errors in the given format.
///
/// Errors a recoverable handler marked handled are skipped — their handler
/// already spoke to the source.
pub(crate) fn render_errors(command: &str, errors: &[CommandError], format: Format) {
    let unhandled: Vec<&CommandError> = errors.iter().filter(|e| !e.is_handled()).collect();
    if unhandled.is_empty() {
        return;
    }
    match format {
        Format::Pretty => render_errors_pretty(command, &unhandled),
        Format::Json => {
            let json = serde_json::to_string_pretty(&unhandled)
                .expect("CommandError serialization cannot fail");
            println!("{json}");
        }
    }
}

fn render_errors_pretty(command: &str, errors: &[&CommandError]) {
    let config = Config::default().with_compact(false);
    let mut cache = ("command", Source::from(command.to_string()));

    for error in errors {
        // The failing segment sits between the parsed prefix and the end of
        // the failed span; clamp both to the actual input.
        let start = error.parsed_command().len().min(command.len());
        let end = error.failed_command().len().min(command.len()).max(start);

        Report::build(ReportKind::Error, ("command", start..end))
            .with_message(error.detail().to_string())
            .with_config(config)
            .with_label(
                Label::new(("command", start..end))
                    .with_message(format!("{}<--", error.error_segment()))
                    .with_color(Color::Red),
            )
            .finish()
            .eprint(&mut cache)
            .ok();
    }
}

// ── Suggestions ─────────────────────────────────────────────────────────

/// Render a suggestion set in the given format.
pub(crate) fn render_suggestions(suggestions: &CommandSuggestions, format: Format) {
    match format {
        Format::Pretty => {
            if let Some(hint) = &suggestions.complete_hint {
                println!("next: {hint}");
            }
            for suggestion in suggestions {
                println!("{}{}", suggestion.command_read, suggestion.suggest_segment);
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(suggestions)
                .expect("CommandSuggestions serialization cannot fail");
            println!("{json}");
        }
    }
}
