//! Char-boundary-safe excerpts for violation messages.
//!
//! Offending values are quoted inside messages; long ones are shortened so
//! a 1000-character description never floods the report.

/// Shorten a value for quoting inside a violation message.
///
/// Returns the value unchanged when it is at most `max_chars` characters;
/// otherwise the `max_chars`-character prefix followed by `...`. The cut
/// never lands inside a multi-byte character.
pub fn snippet(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        None => value.to_owned(),
        Some((byte_idx, _)) => format!("{}...", &value[..byte_idx]),
    }
}
