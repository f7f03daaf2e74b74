//! Shared helpers for the engine integration tests.

#![allow(dead_code)]

use cmdtree_core::{CommandSource, CommandSuggestions};
use std::sync::Mutex;

/// A command source that records replies, with a configurable permission
/// level and role.
pub struct MemorySource {
    permission: u8,
    player: bool,
    replies: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(permission: u8) -> Self {
        Self {
            permission,
            player: false,
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn player(permission: u8) -> Self {
        Self {
            permission,
            player: true,
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

impl CommandSource for MemorySource {
    fn permission_level(&self) -> u8 {
        self.permission
    }

    fn is_player(&self) -> bool {
        self.player
    }

    fn is_console(&self) -> bool {
        !self.player
    }

    fn reply(&self, message: &str) {
        self.replies.lock().unwrap().push(message.to_string());
    }
}

/// The suggest segments of a suggestion set, in order.
pub fn segments(suggestions: &CommandSuggestions) -> Vec<String> {
    suggestions
        .iter()
        .map(|s| s.suggest_segment.clone())
        .collect()
}

/// The `(command_read, suggest_segment)` pairs of a suggestion set.
pub fn pairs(suggestions: &CommandSuggestions) -> Vec<(String, String)> {
    suggestions
        .iter()
        .map(|s| (s.command_read.clone(), s.suggest_segment.clone()))
        .collect()
}
