//! Single-line previews of raw parameter text for diagnostics.
//!
//! Parameter values are frequently multi-line JSON; quoting them verbatim
//! would split one diagnostic over many log lines.

use std::fmt::Write;

/// Maximum number of characters of a raw value quoted in a diagnostic.
///
/// Enough for one flat command or tone record; a whole `Commands` list is
/// cut, and the diagnostic context already names the failing element.
pub const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///
/// Other control characters become `\xNN`. Output is cut after
/// [`MAX_PREVIEW`] source characters and ends with `… (+N chars)` giving
/// the number left out.
pub fn preview(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 16);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            let _ = write!(&mut out, "… (+{} chars)", s.chars().count() - count);
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_escapes_line_breaks() {
        assert_eq!(preview("Line1\nLine2\r\tEnd"), "Line1\\nLine2\\r\\tEnd");
    }

    #[test]
    fn test_preview_escapes_backslash_and_controls() {
        assert_eq!(preview("a\\b\u{1b}"), "a\\\\b\\x1B");
    }

    #[test]
    fn test_preview_truncates_long_values() {
        let long = "x".repeat(MAX_PREVIEW + 10);
        let out = preview(&long);
        assert!(out.starts_with(&"x".repeat(MAX_PREVIEW)));
        assert!(out.ends_with("… (+10 chars)"));
    }

    #[test]
    fn test_preview_at_limit_is_untouched() {
        let exact = "y".repeat(MAX_PREVIEW);
        assert_eq!(preview(&exact), exact);
    }
}
