//! Logging utilities for sanitizing player-supplied text and identifiers so
//! logs stay single-line and phone numbers stay out of them.

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Truncates very long strings (over `MAX_PREVIEW` chars) with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 200;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Mask a player identifier (usually a phone number) for logging, keeping
/// only the last four characters: `+15551234567` => `********4567`.
pub fn mask_id(id: &str) -> String {
    const VISIBLE: usize = 4;
    let total = id.chars().count();
    if total <= VISIBLE {
        return escape_log(id);
    }
    let tail: String = id.chars().skip(total - VISIBLE).collect();
    format!("{}{}", "*".repeat(total - VISIBLE), escape_log(&tail))
}
