//! The command-source capability surface.
//!
//! A [`CommandSource`] is whoever issued the command: an operator console, a
//! player relayed through the managed process, or a remote control channel.
//! The engine only needs the capabilities below; everything else about the
//! issuer stays with the host application.

/// Capabilities the engine requires from whoever issued a command.
pub trait CommandSource: Send + Sync {
    /// The source's permission level. Higher grants more.
    fn permission_level(&self) -> u8;

    /// Whether the source holds at least the given permission level.
    fn has_permission(&self, level: u8) -> bool {
        self.permission_level() >= level
    }

    /// Whether the source is a player of the managed process.
    fn is_player(&self) -> bool {
        false
    }

    /// Whether the source is the operator console.
    fn is_console(&self) -> bool {
        false
    }

    /// Send a message back to the source.
    fn reply(&self, message: &str);
}

/// A console source that replies to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSource {
    permission: u8,
}

impl ConsoleSource {
    /// Create a console source with the given permission level.
    pub fn new(permission: u8) -> Self {
        Self { permission }
    }
}

impl CommandSource for ConsoleSource {
    fn permission_level(&self) -> u8 {
        self.permission
    }

    fn is_console(&self) -> bool {
        true
    }

    fn reply(&self, message: &str) {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_permission_compares_levels() {
        let source = ConsoleSource::new(2);
        assert!(source.has_permission(0));
        assert!(source.has_permission(2));
        assert!(!source.has_permission(3));
    }

    #[test]
    fn console_defaults() {
        let source = ConsoleSource::new(4);
        assert!(source.is_console());
        assert!(!source.is_player());
    }
}
