use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Wide characters (CJK, most emoji) count as two columns, combining marks as
/// zero.
///
/// ```
/// use clipdeck::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: char = '…';

/// Shorten `s` to at most `max_width` columns, ending in `…` when cut.
///
/// Returns the input unchanged (borrowed) when it already fits. A width of 1
/// leaves room only for the ellipsis.
///
/// ```
/// use clipdeck::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
/// assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len_utf8());
    out.push_str(s[..end].trim_end());
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Remove terminal control characters and escape sequences from text that
/// came from a data file.
///
/// Strips C0 controls other than tab/newline/CR, DEL, C1 controls, and
/// whole CSI (`ESC [ … final`) and OSC (`ESC ] … BEL|ST`) sequences.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates, up to and including the final byte.
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => false,
        c => c.is_control(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("abc", 3), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello W…");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
    }

    #[test]
    fn test_trailing_space_dropped_before_ellipsis() {
        assert_eq!(truncate_to_width("Hello World", 7), "Hello…");
    }

    #[test]
    fn test_wide_chars_not_split() {
        // Each char is 2 columns; 5 columns leave room for two plus the ellipsis.
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn test_tiny_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "…");
        assert_eq!(truncate_to_width("Test", 2), "T…");
    }

    #[test]
    fn test_result_never_exceeds_width() {
        for w in 0..12 {
            let out = truncate_to_width("Música 日本 video", w);
            assert!(display_width(&out) <= w, "width {} gave {:?}", w, out);
        }
    }

    #[test]
    fn test_strip_clean_is_borrowed() {
        assert!(matches!(strip_control_chars("plain title"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_csi_sequence() {
        assert_eq!(strip_control_chars("\x1b[31mRed\x1b[0m title"), "Red title");
    }

    #[test]
    fn test_strip_osc_sequence() {
        assert_eq!(strip_control_chars("a\x1b]0;pwned\x07b"), "ab");
        assert_eq!(strip_control_chars("a\x1b]8;;http://x\x1b\\b"), "ab");
    }

    #[test]
    fn test_strip_keeps_whitespace_controls() {
        assert_eq!(strip_control_chars("a\tb\nc\x00d\x7f"), "a\tb\ncd");
    }

    #[test]
    fn test_strip_bare_escape() {
        assert_eq!(strip_control_chars("x\x1by"), "xy");
    }
}
