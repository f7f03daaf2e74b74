//! Command-element splitting around the divider character.
//!
//! A command line is a sequence of elements separated by single spaces. The
//! divider is ASCII, so all offsets handed around the engine are plain byte
//! offsets and slicing is always boundary-safe.

/// The element separator within a command line.
pub const DIVIDER: char = ' ';

/// The first element of `text`: everything up to the next divider, or all of
/// `text` when no divider follows.
pub fn first_element(text: &str) -> &str {
    match text.find(DIVIDER) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Strip leading dividers, exposing the next element (or the empty string).
pub fn strip_divider_prefix(text: &str) -> &str {
    text.trim_start_matches(DIVIDER)
}
