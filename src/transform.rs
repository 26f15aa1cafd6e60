//! Pure text transforms applied to matched input before it becomes markup.
//!
//! Every function takes the text by reference and returns a fresh `String`,
//! so chaining (`escape(&trim_leading_blanks(s))`) never aliases storage.

/// Escape characters that troff would otherwise interpret.
///
/// Backslashes are doubled. A `'` or `.` directly after a newline would start
/// a control line, so it is prefixed with the zero-width `\&`. The first
/// character of `text` has no preceding newline and is left alone.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut prev = None;
    for c in text.chars() {
        if c == '\\' {
            out.push('\\');
        }
        if (c == '\'' || c == '.') && prev == Some('\n') {
            out.push_str("\\&");
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Remove the run of leading spaces from every line.
pub fn trim_leading_blanks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;
    for c in text.chars() {
        at_line_start = c == '\n' || (at_line_start && c == ' ');
        if at_line_start && c == ' ' {
            continue;
        }
        out.push(c);
    }
    out
}

/// Shift every line of `text` by `delta` columns.
///
/// A positive delta prepends spaces to each non-empty line. A negative delta
/// removes at most `-delta` leading spaces from each line and never removes
/// anything else.
pub fn indent(text: &str, delta: isize) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if delta >= 0 {
            if line != "\n" {
                out.extend(std::iter::repeat(' ').take(delta.unsigned_abs()));
            }
            out.push_str(line);
        } else {
            let cut = leading_spaces(line).min(delta.unsigned_abs());
            out.push_str(&line[cut..]);
        }
    }
    out
}

/// Number of spaces at the start of `text`.
pub fn leading_spaces(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b' ').count()
}

/// Shift a block so its first line sits at `column`.
pub fn reindent_to(text: &str, column: usize) -> String {
    let delta = column as isize - leading_spaces(text) as isize;
    indent(text, delta)
}

/// First `max` characters of `text`, for diagnostics.
pub fn snippet(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_identity_on_plain_text() {
        let text = "Plain words, no specials.\nSecond line's fine.\n";
        assert_eq!(escape(text), text);
    }

    #[test]
    fn escape_doubles_backslashes() {
        assert_eq!(escape(r"a\nb"), r"a\\nb");
    }

    #[test]
    fn escape_neutralizes_line_leading_controls() {
        assert_eq!(escape("x\n.TH\n'quoted\n"), "x\n\\&.TH\n\\&'quoted\n");
    }

    #[test]
    fn escape_keeps_document_leading_apostrophe() {
        assert_eq!(escape("'start\n"), "'start\n");
        assert_eq!(escape(".start"), ".start");
    }

    #[test]
    fn escape_twice_differs_with_backslash() {
        let once = escape(r"path\to");
        assert_ne!(escape(&once), once);
    }

    #[test]
    fn trim_removes_leading_spaces_per_line() {
        for n in 0..8 {
            let line = format!("{}value  here\n", " ".repeat(n));
            assert_eq!(trim_leading_blanks(&line), "value  here\n");
        }
    }

    #[test]
    fn trim_keeps_newlines_and_tabs() {
        assert_eq!(trim_leading_blanks("  a\n\n   b\n\tc\n"), "a\n\nb\n\tc\n");
    }

    #[test]
    fn indent_adds_spaces() {
        assert_eq!(indent("a\n\nb\n", 2), "  a\n\n  b\n");
    }

    #[test]
    fn indent_removes_at_most_available_spaces() {
        assert_eq!(indent("      a\n  b\nc\n", -4), "  a\nb\nc\n");
    }

    #[test]
    fn indent_never_goes_negative() {
        for k in 0..12 {
            let out = indent("   x\n y\n", -k);
            for line in out.lines() {
                assert!(line.ends_with('x') || line.ends_with('y'), "lost content: {out:?}");
            }
        }
    }

    #[test]
    fn reindent_moves_block_to_column() {
        assert_eq!(reindent_to("        a\n          b\n", 4), "    a\n      b\n");
        assert_eq!(reindent_to("  a\n", 4), "    a\n");
    }

    #[test]
    fn snippet_truncates_on_chars() {
        assert_eq!(snippet("héllo world", 5), "héllo");
    }
}
