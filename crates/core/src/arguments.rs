//! Built-in argument parsers.
//!
//! Each parser implements the node graph's [`ArgumentParser`] contract:
//! consume a prefix of the remaining input, produce a [`Value`] and the byte
//! count read, or raise a [`SyntaxError`] whose `consumed` covers the input
//! up to and including the problem. Custom parsers can be supplied by
//! plugins through the same trait.

use crate::context::ParseResult;
use crate::element::{DIVIDER, first_element};
use cmdtree_errors::{ErrorDetail, SyntaxError, Value};

/// The parsing contract of an argument node.
pub trait ArgumentParser: Send + Sync {
    /// Parse a value from the start of `text`.
    ///
    /// `text` never starts with the divider; the engine strips dividers
    /// between nodes.
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError>;

    /// A short name for the parser, used when displaying nodes.
    fn kind_name(&self) -> &'static str;

    /// Suggestions offered when the node has no explicit suggestion source.
    fn default_suggestions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Post-process one outgoing suggestion (e.g. quote it so it survives a
    /// round-trip through this parser).
    fn format_suggestion(&self, suggestion: String) -> String {
        suggestion
    }
}

/// Length gate shared by the text parsers. Lengths count characters, not
/// bytes; `consumed` stays in bytes.
fn check_text_length(
    text: String,
    consumed: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<ParseResult, SyntaxError> {
    let length = text.chars().count();
    if min.is_some_and(|m| length < m) || max.is_some_and(|m| length > m) {
        return Err(SyntaxError::new(
            ErrorDetail::TextLengthOutOfRange { length, min, max },
            consumed,
        ));
    }
    Ok(ParseResult::new(Value::Str(text), consumed))
}

// ── Number parsers ──────────────────────────────────────────────────────

/// An integer argument, optionally range-restricted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer {
    min: Option<i64>,
    max: Option<i64>,
}

impl Integer {
    /// An unrestricted integer parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values below `min`.
    pub fn at_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject values above `max`.
    pub fn at_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Restrict values to `[min, max]`.
    pub fn in_range(self, min: i64, max: i64) -> Self {
        self.at_min(min).at_max(max)
    }
}

impl ArgumentParser for Integer {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        let consumed = element.len();
        match element.parse::<i64>() {
            Ok(value) => {
                if self.min.is_some_and(|m| value < m) || self.max.is_some_and(|m| value > m) {
                    Err(SyntaxError::new(
                        ErrorDetail::NumberOutOfRange {
                            value: Value::Int(value),
                            min: self.min.map(Value::Int),
                            max: self.max.map(Value::Int),
                        },
                        consumed,
                    ))
                } else {
                    Ok(ParseResult::new(Value::Int(value), consumed))
                }
            }
            Err(_) => Err(SyntaxError::new(ErrorDetail::InvalidInteger, consumed)),
        }
    }

    fn kind_name(&self) -> &'static str {
        "Integer"
    }
}

/// A floating-point argument, optionally range-restricted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float {
    min: Option<f64>,
    max: Option<f64>,
}

impl Float {
    /// An unrestricted float parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values below `min`.
    pub fn at_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject values above `max`.
    pub fn at_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Restrict values to `[min, max]`.
    pub fn in_range(self, min: f64, max: f64) -> Self {
        self.at_min(min).at_max(max)
    }
}

impl ArgumentParser for Float {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        let consumed = element.len();
        match element.parse::<f64>() {
            Ok(value) => {
                if self.min.is_some_and(|m| value < m) || self.max.is_some_and(|m| value > m) {
                    Err(SyntaxError::new(
                        ErrorDetail::NumberOutOfRange {
                            value: Value::Float(value),
                            min: self.min.map(Value::Float),
                            max: self.max.map(Value::Float),
                        },
                        consumed,
                    ))
                } else {
                    Ok(ParseResult::new(Value::Float(value), consumed))
                }
            }
            Err(_) => Err(SyntaxError::new(ErrorDetail::InvalidFloat, consumed)),
        }
    }

    fn kind_name(&self) -> &'static str {
        "Float"
    }
}

/// An integer if the element parses as one, otherwise a float.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number {
    min: Option<f64>,
    max: Option<f64>,
}

impl Number {
    /// An unrestricted number parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values below `min`.
    pub fn at_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject values above `max`.
    pub fn at_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Restrict values to `[min, max]`.
    pub fn in_range(self, min: f64, max: f64) -> Self {
        self.at_min(min).at_max(max)
    }
}

impl ArgumentParser for Number {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        let consumed = element.len();
        let value = match element.parse::<i64>() {
            Ok(int) => Value::Int(int),
            Err(_) => match element.parse::<f64>() {
                Ok(float) => Value::Float(float),
                Err(_) => {
                    return Err(SyntaxError::new(ErrorDetail::InvalidNumber, consumed));
                }
            },
        };
        let numeric = value.as_float().unwrap_or(0.0);
        if self.min.is_some_and(|m| numeric < m) || self.max.is_some_and(|m| numeric > m) {
            Err(SyntaxError::new(
                ErrorDetail::NumberOutOfRange {
                    value,
                    min: self.min.map(Value::Float),
                    max: self.max.map(Value::Float),
                },
                consumed,
            ))
        } else {
            Ok(ParseResult::new(value, consumed))
        }
    }

    fn kind_name(&self) -> &'static str {
        "Number"
    }
}

// ── Text parsers ────────────────────────────────────────────────────────

/// A single-element text argument, optionally length-restricted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl Text {
    /// An unrestricted text parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject texts shorter than `min_length` characters.
    pub fn at_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Reject texts longer than `max_length` characters.
    pub fn at_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Restrict text length to `[min_length, max_length]`.
    pub fn in_length_range(self, min_length: usize, max_length: usize) -> Self {
        self.at_min_length(min_length).at_max_length(max_length)
    }
}

impl ArgumentParser for Text {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        check_text_length(
            element.to_string(),
            element.len(),
            self.min_length,
            self.max_length,
        )
    }

    fn kind_name(&self) -> &'static str {
        "Text"
    }
}

/// A text argument that may be wrapped in double quotes to include dividers,
/// with `\"` and `\\` escapes inside the quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotableText {
    min_length: Option<usize>,
    max_length: Option<usize>,
    empty_allowed: bool,
}

/// The quote character of [`QuotableText`].
const QUOTE: char = '"';
/// The escape character of [`QuotableText`].
const ESCAPE: char = '\\';

impl QuotableText {
    /// An unrestricted quotable-text parser rejecting empty quoted strings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject texts shorter than `min_length` characters.
    pub fn at_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Reject texts longer than `max_length` characters.
    pub fn at_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Restrict text length to `[min_length, max_length]`.
    pub fn in_length_range(self, min_length: usize, max_length: usize) -> Self {
        self.at_min_length(min_length).at_max_length(max_length)
    }

    /// Accept an empty quoted string (`""`).
    pub fn allow_empty(mut self) -> Self {
        self.empty_allowed = true;
        self
    }
}

impl ArgumentParser for QuotableText {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        if !text.starts_with(QUOTE) {
            // No leading quote: behaves exactly like plain Text.
            let element = first_element(text);
            return check_text_length(
                element.to_string(),
                element.len(),
                self.min_length,
                self.max_length,
            );
        }
        let mut collected = String::new();
        let mut escaped = false;
        for (offset, ch) in text.char_indices().skip(1) {
            if escaped {
                if ch == ESCAPE || ch == QUOTE {
                    collected.push(ch);
                    escaped = false;
                } else {
                    return Err(SyntaxError::new(
                        ErrorDetail::IllegalEscapes,
                        offset + ch.len_utf8(),
                    ));
                }
            } else if ch == ESCAPE {
                escaped = true;
            } else if ch == QUOTE {
                let consumed = offset + ch.len_utf8();
                if collected.is_empty() && !self.empty_allowed {
                    return Err(SyntaxError::new(ErrorDetail::EmptyText, consumed));
                }
                return check_text_length(collected, consumed, self.min_length, self.max_length);
            } else {
                collected.push(ch);
            }
        }
        Err(SyntaxError::new(
            ErrorDetail::UnclosedQuotedString,
            text.len(),
        ))
    }

    fn kind_name(&self) -> &'static str {
        "QuotableText"
    }

    /// Quote suggestions containing the divider so they parse back as one
    /// element.
    fn format_suggestion(&self, suggestion: String) -> String {
        if suggestion.contains(DIVIDER) {
            let escaped = suggestion.replace(ESCAPE, "\\\\").replace(QUOTE, "\\\"");
            format!("{QUOTE}{escaped}{QUOTE}")
        } else {
            suggestion
        }
    }
}

/// A text argument consuming all remaining input, dividers included.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyText {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl GreedyText {
    /// An unrestricted greedy-text parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject texts shorter than `min_length` characters.
    pub fn at_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Reject texts longer than `max_length` characters.
    pub fn at_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Restrict text length to `[min_length, max_length]`.
    pub fn in_length_range(self, min_length: usize, max_length: usize) -> Self {
        self.at_min_length(min_length).at_max_length(max_length)
    }
}

impl ArgumentParser for GreedyText {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        check_text_length(
            text.to_string(),
            text.len(),
            self.min_length,
            self.max_length,
        )
    }

    fn kind_name(&self) -> &'static str {
        "GreedyText"
    }
}

// ── Other parsers ───────────────────────────────────────────────────────

/// A case-insensitive `true` / `false` argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Boolean {
    /// A boolean parser.
    pub fn new() -> Self {
        Self
    }
}

impl ArgumentParser for Boolean {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        let consumed = element.len();
        if element.eq_ignore_ascii_case("true") {
            Ok(ParseResult::new(Value::Bool(true), consumed))
        } else if element.eq_ignore_ascii_case("false") {
            Ok(ParseResult::new(Value::Bool(false), consumed))
        } else {
            Err(SyntaxError::new(ErrorDetail::InvalidBoolean, consumed))
        }
    }

    fn kind_name(&self) -> &'static str {
        "Boolean"
    }

    fn default_suggestions(&self) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }
}

/// An argument accepting one member of a closed set of names. The matched
/// member name is bound as the value.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    options: Vec<String>,
}

impl Enumeration {
    /// An enumeration over the given member names.
    pub fn new(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl ArgumentParser for Enumeration {
    fn parse(&self, text: &str) -> Result<ParseResult, SyntaxError> {
        let element = first_element(text);
        let consumed = element.len();
        if self.options.iter().any(|o| o == element) {
            Ok(ParseResult::new(Value::Str(element.to_string()), consumed))
        } else {
            Err(SyntaxError::new(
                ErrorDetail::InvalidEnumeration {
                    value: element.to_string(),
                    options: self.options.clone(),
                },
                consumed,
            ))
        }
    }

    fn kind_name(&self) -> &'static str {
        "Enumeration"
    }

    fn default_suggestions(&self) -> Vec<String> {
        self.options.clone()
    }
}
