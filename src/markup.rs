//! man(7) markup for each construct the scanner recognizes.
//!
//! Every function here is pure: it receives the raw matched text and returns
//! the markup to write. Text is trimmed before it is escaped so that a `.`
//! uncovered by trimming is still neutralized.

use crate::error::{ShapeViolation, SNIPPET_LEN};
use crate::options::ManifyOptions;
use crate::symbol::SymbolRecord;
use crate::transform::{escape, reindent_to, snippet, trim_leading_blanks};

/// Column that example and quote blocks are normalized to.
pub const EXAMPLE_COLUMN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Section,
    Subsection,
}

/// Title and `NAME` section of the overview page.
pub fn overview_head(options: &ManifyOptions) -> String {
    format!(
        ".TH {} {}\n.SH NAME\n{} \\- {}\n",
        options.title.to_uppercase(),
        options.section,
        options.title,
        options.summary
    )
}

/// Heading from a two-line underlined heading; only the text line is used.
pub fn heading(level: HeadingLevel, text: &str) -> String {
    let line = text.split('\n').next().unwrap_or_default();
    match level {
        HeadingLevel::Section => format!(".SH {}\n", escape(&line.to_uppercase())),
        HeadingLevel::Subsection => format!(".SS {}\n", escape(line)),
    }
}

pub fn paragraph(text: &str) -> String {
    format!(".P\n{}", escape(&trim_leading_blanks(text)))
}

/// An ordered list item.
///
/// The item hangs off its marker (`.TP`) unless its second line starts at
/// column zero, in which case the marker is ordinary text of a paragraph.
pub fn ordered_item(text: &str) -> Result<String, ShapeViolation> {
    let hanging = match text.find('\n') {
        Some(nl) if nl + 1 < text.len() => text.as_bytes()[nl + 1] == b' ',
        _ => true,
    };
    let body = escape(&trim_leading_blanks(text));
    let label_len = body
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.' || *b == b')')
        .count();
    if label_len == 0 {
        return Err(ShapeViolation {
            message: "ordered list item without a marker",
            snippet: snippet(text, SNIPPET_LEN),
        });
    }
    if !hanging {
        return Ok(format!(".P\n{body}"));
    }
    let (label, rest) = body.split_at(label_len);
    Ok(format!(".TP\n{label}\n{}", rest.trim_start_matches(' ')))
}

pub fn unordered_item(text: &str) -> String {
    let body = escape(&trim_leading_blanks(text));
    format!(".TP\n-\n{}", body.trim_start_matches(['-', ' ']))
}

pub fn block_quote(text: &str) -> String {
    format!("\n.EX\n{}.EE\n", reindent_to(&escape(text), EXAMPLE_COLUMN))
}

/// Literal block kept line for line (tables, build files, file lists).
pub fn no_fill(text: &str) -> String {
    format!("\n.nf\n{}.fi\n", escape(text))
}

/// A `BSTRLIB_*` compilation macro: name line as tag, the rest as body.
pub fn macro_description(text: &str) -> Result<String, ShapeViolation> {
    let body = escape(&trim_leading_blanks(text));
    let Some(tag_end) = body.find('\n') else {
        return Err(ShapeViolation {
            message: "compilation macro description without a body",
            snippet: snippet(text, SNIPPET_LEN),
        });
    };
    let (tag, desc) = body.split_at(tag_end);
    Ok(format!(
        ".TP\n{tag}\n{}",
        desc.trim_start_matches([' ', '-', '\n'])
    ))
}

/// Header of a symbol page, up to the start of its description.
pub fn symbol_head(record: &SymbolRecord, options: &ManifyOptions) -> String {
    format!(
        ".TH {} {}\n.SH NAME\n{} \\- {} function\n.SH SYNOPSIS\n.EX\n{}.EE\n.SH DESCRIPTION\n",
        record.upper,
        options.section,
        record.name,
        options.title,
        escape(&record.display_synopsis())
    )
}

/// Example block inside a symbol description.
pub fn function_example(text: &str) -> String {
    format!(
        ".br\n.EX\n{}.EE\n",
        reindent_to(&escape(text), EXAMPLE_COLUMN)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_head_uses_options() {
        assert_eq!(
            overview_head(&ManifyOptions::default()),
            ".TH BSTRLIB 3\n.SH NAME\nbstrlib \\- the better string library\n"
        );
    }

    #[test]
    fn section_heading_is_uppercased() {
        assert_eq!(
            heading(HeadingLevel::Section, "Functions\n---------\n"),
            ".SH FUNCTIONS\n"
        );
    }

    #[test]
    fn subsection_keeps_case() {
        assert_eq!(
            heading(HeadingLevel::Subsection, "Memory management\n.................\n"),
            ".SS Memory management\n"
        );
    }

    #[test]
    fn paragraph_trims_then_escapes() {
        assert_eq!(
            paragraph("Use \\0 here\n  .dotted line\n"),
            ".P\nUse \\\\0 here\n\\&.dotted line\n"
        );
    }

    #[test]
    fn ordered_item_with_indented_continuation_hangs() {
        assert_eq!(
            ordered_item("1. Do the thing\n   continued here\n").unwrap(),
            ".TP\n1.\nDo the thing\ncontinued here\n"
        );
    }

    #[test]
    fn ordered_item_with_flush_continuation_is_paragraph() {
        assert_eq!(
            ordered_item("1. Do the thing\nNo indent line\n").unwrap(),
            ".P\n1. Do the thing\nNo indent line\n"
        );
    }

    #[test]
    fn single_line_ordered_item_hangs() {
        assert_eq!(ordered_item("2) Second\n").unwrap(), ".TP\n2)\nSecond\n");
    }

    #[test]
    fn ordered_item_needs_marker() {
        assert!(ordered_item("   Not numbered\n").is_err());
    }

    #[test]
    fn unordered_item_is_tagged() {
        assert_eq!(
            unordered_item("  - Portable\n    and fast\n"),
            ".TP\n-\nPortable\nand fast\n"
        );
    }

    #[test]
    fn block_quote_is_normalized_to_four_columns() {
        assert_eq!(
            block_quote("        a = b;\n\n          c;\n"),
            "\n.EX\n    a = b;\n\n      c;\n.EE\n"
        );
    }

    #[test]
    fn no_fill_escapes() {
        assert_eq!(
            no_fill("a   b\n.c   d\n"),
            "\n.nf\na   b\n\\&.c   d\n.fi\n"
        );
    }

    #[test]
    fn macro_description_splits_tag() {
        assert_eq!(
            macro_description("BSTRLIB_NOVSNP\n\n    Define this to turn off vsnprintf.\n").unwrap(),
            ".TP\nBSTRLIB_NOVSNP\nDefine this to turn off vsnprintf.\n"
        );
    }

    #[test]
    fn macro_description_needs_body() {
        assert!(macro_description("BSTRLIB_ALONE").is_err());
    }

    #[test]
    fn symbol_head_contains_synopsis() {
        let record =
            SymbolRecord::from_synopsis("extern bstring bfromcstr (const char * str);\n").unwrap();
        assert_eq!(
            symbol_head(&record, &ManifyOptions::default()),
            ".TH BFROMCSTR 3\n.SH NAME\nbfromcstr \\- bstrlib function\n.SH SYNOPSIS\n.EX\n\
             bstring bfromcstr (const char * str);\n.EE\n.SH DESCRIPTION\n"
        );
    }

    #[test]
    fn function_example_is_reindented() {
        assert_eq!(
            function_example("  b = bfromcstr (\"x\");\n"),
            ".br\n.EX\n    b = bfromcstr (\"x\");\n.EE\n"
        );
    }
}
