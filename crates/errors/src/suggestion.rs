use serde::{Deserialize, Serialize};
use std::fmt;

/// A single autocomplete candidate: the prefix the user has already typed
/// plus the proposed completion segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandSuggestion {
    /// The part of the command line already consumed when the suggestion was
    /// produced, trailing divider included.
    pub command_read: String,
    /// The proposed completion for the next element.
    pub suggest_segment: String,
}

impl CommandSuggestion {
    /// Create a suggestion from the consumed prefix and the proposed segment.
    pub fn new(command_read: impl Into<String>, suggest_segment: impl Into<String>) -> Self {
        Self {
            command_read: command_read.into(),
            suggest_segment: suggest_segment.into(),
        }
    }

    /// The full command line this suggestion completes to.
    pub fn command(&self) -> String {
        format!("{}{}", self.command_read, self.suggest_segment)
    }
}

impl fmt::Display for CommandSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.command_read, self.suggest_segment)
    }
}

/// An ordered collection of suggestions, plus an optional placeholder hint
/// summarizing the sibling usages at the branch point the cursor sits on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSuggestions {
    /// The candidates, in traversal order. Duplicates are preserved; callers
    /// that render the list dedup as they see fit.
    pub entries: Vec<CommandSuggestion>,
    /// Combined usage placeholder for the current branch point, e.g.
    /// `<start|stop>|<name>`. Present only when the input ends exactly at a
    /// fan-out over several children.
    pub complete_hint: Option<String>,
}

impl CommandSuggestions {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one suggestion.
    pub fn push(&mut self, suggestion: CommandSuggestion) {
        self.entries.push(suggestion);
    }

    /// Append all of `other`'s entries; the first non-empty hint wins.
    pub fn extend(&mut self, other: CommandSuggestions) {
        self.entries.extend(other.entries);
        if self.complete_hint.is_none() {
            self.complete_hint = other.complete_hint;
        }
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no suggestions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the suggestions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, CommandSuggestion> {
        self.entries.iter()
    }
}

impl IntoIterator for CommandSuggestions {
    type Item = CommandSuggestion;
    type IntoIter = std::vec::IntoIter<CommandSuggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandSuggestions {
    type Item = &'a CommandSuggestion;
    type IntoIter = std::slice::Iter<'a, CommandSuggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<CommandSuggestion> for CommandSuggestions {
    fn from_iter<I: IntoIterator<Item = CommandSuggestion>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            complete_hint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_concatenates() {
        let s = CommandSuggestion::new("proc ", "start");
        assert_eq!(s.command(), "proc start");
        assert_eq!(s.to_string(), "proc  -> start");
    }

    #[test]
    fn extend_keeps_first_hint() {
        let mut a = CommandSuggestions::new();
        a.push(CommandSuggestion::new("", "proc"));

        let mut b = CommandSuggestions::new();
        b.complete_hint = Some("<name>".into());
        let mut c = CommandSuggestions::new();
        c.complete_hint = Some("<level>".into());

        a.extend(b);
        a.extend(c);
        assert_eq!(a.complete_hint.as_deref(), Some("<name>"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut s = CommandSuggestions::new();
        s.push(CommandSuggestion::new("proc ", "stop"));
        s.complete_hint = Some("<start|stop>".into());
        let json = serde_json::to_string(&s).unwrap();
        let back: CommandSuggestions = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
