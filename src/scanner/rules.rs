//! Rule table for the scanner.
//!
//! Rules are listed in declaration order. At a given position every rule
//! valid in the current mode is tried; the longest match wins and ties go to
//! the rule declared first, so specific shapes listed early outrank the
//! catch-all paragraph at the end.

use regex::Regex;
use std::sync::LazyLock;

use super::Mode;

/// A line with at least one non-blank character.
const NONBLANK: &str = r"[ \t]*[^ \t\n].*\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    LibraryTitle,
    EnterReference,
    CloseReference,
    Synopsis,
    ExampleIntro,
    Example,
    FunctionParagraph,
    FunctionBlank,
    UnicodeHeading,
    UnicodeEnd,
    UnicodeParagraph,
    Heading,
    Subheading,
    Divider,
    BlankLine,
    OrderedItem,
    OrderedLine,
    OrderedEnd,
    UnorderedItem,
    UnorderedLine,
    UnorderedEnd,
    QuoteStart,
    QuoteLine,
    QuoteBlank,
    QuoteEnd,
    QuoteBreak,
    MakefileStart,
    MakefileRule,
    MakefileEnd,
    TableStart,
    TableRow,
    TableEnd,
    Acknowledgements,
    MacroDescription,
    FilesList,
    Paragraph,
    SkipBlank,
}

impl Rule {
    /// Peek rules consume nothing; the text is matched again in the mode the
    /// handler switches to.
    pub fn peeks(self) -> bool {
        matches!(
            self,
            Rule::UnicodeEnd
                | Rule::QuoteEnd
                | Rule::QuoteBreak
                | Rule::MakefileEnd
                | Rule::TableEnd
        )
    }
}

struct RuleSpec {
    rule: Rule,
    modes: &'static [Mode],
    /// Only valid at the start of a line.
    line_start: bool,
    re: Regex,
}

fn spec(rule: Rule, modes: &'static [Mode], line_start: bool, pattern: &str) -> RuleSpec {
    let pattern = pattern.replace("{NB}", &format!("(?:{NONBLANK})"));
    RuleSpec {
        rule,
        modes,
        line_start,
        re: Regex::new(&format!(r"\A(?:{pattern})")).unwrap(),
    }
}

static RULES: LazyLock<Vec<RuleSpec>> = LazyLock::new(|| {
    vec![
        spec(Rule::LibraryTitle, &[Mode::Default], false, r"Better String library\n-{21}\n"),
        // Reference section: the dotted separator between entries, the
        // functions heading, or the macros introduction paragraph.
        spec(
            Rule::EnterReference,
            &[Mode::Default, Mode::FunctionBody],
            true,
            r" {4}\.{5,}\n\n|The functions\n-{5,}\n\n|The macros\n\n{NB}+\n\n",
        ),
        spec(Rule::CloseReference, &[Mode::FunctionBody], false, r"={5,}\n"),
        spec(Rule::Synopsis, &[Mode::FunctionHeading], false, r"{NB}+"),
        spec(Rule::ExampleIntro, &[Mode::FunctionBody], false, r"{NB}*[ \t]*[^ \t\n].*:\n\n"),
        spec(Rule::Example, &[Mode::FunctionExample], false, r"{NB}+"),
        spec(Rule::FunctionParagraph, &[Mode::FunctionBody], false, r"{NB}+"),
        spec(Rule::FunctionBlank, &[Mode::FunctionBody], false, r"\n"),
        // The paragraphs under this heading are indented, yet they are prose.
        spec(Rule::UnicodeHeading, &[Mode::Default], false, r"Unicode functions\n-{3,}\n\n"),
        spec(Rule::UnicodeEnd, &[Mode::UnicodeParagraphs], false, r" +\.{3,}\n\n"),
        spec(Rule::UnicodeParagraph, &[Mode::UnicodeParagraphs], false, r"{NB}+"),
        spec(Rule::Heading, &[Mode::Default], true, r".{3,}\n-{3,}\n"),
        spec(Rule::Subheading, &[Mode::Default], true, r".{3,}\n\.{3,}\n"),
        spec(Rule::Divider, &[Mode::Default], true, r"={3,}\n"),
        spec(Rule::BlankLine, &[Mode::Default], false, r"[ \t]*\n"),
        spec(Rule::OrderedItem, &[Mode::Default, Mode::OrderedList], false, r" *[0-9]+[).] .*\n"),
        spec(Rule::OrderedLine, &[Mode::OrderedList], false, r".+\n"),
        spec(Rule::OrderedEnd, &[Mode::OrderedList], false, r"\n"),
        spec(Rule::UnorderedItem, &[Mode::Default, Mode::UnorderedList], false, r" *- .*\n"),
        spec(Rule::UnorderedLine, &[Mode::UnorderedList], false, r".+\n"),
        spec(Rule::UnorderedEnd, &[Mode::UnorderedList], false, r"\n"),
        spec(Rule::QuoteStart, &[Mode::Default], false, r" {4,}.*\n"),
        spec(Rule::QuoteLine, &[Mode::BlockQuote], false, r" {4,}.*\n"),
        spec(Rule::QuoteBlank, &[Mode::BlockQuote], false, r"[ \t]*\n"),
        spec(Rule::QuoteEnd, &[Mode::BlockQuote], false, r"\n {0,3}[^ ]"),
        spec(Rule::QuoteBreak, &[Mode::BlockQuote], false, r" {0,3}[^ \n]"),
        spec(Rule::MakefileStart, &[Mode::Default], false, r"BSTRDIR = .+\n{NB}+\n"),
        spec(Rule::MakefileRule, &[Mode::MakefileExample], false, r"{NB}\t.+\n{NB}+\n"),
        spec(Rule::MakefileEnd, &[Mode::MakefileExample], false, r"{NB}+"),
        spec(Rule::TableStart, &[Mode::Default], false, r"{NB}(?: *-{3,}){2,} *\n{NB}*"),
        spec(Rule::TableRow, &[Mode::Table], false, r".* {3,}.*\n|\n"),
        spec(Rule::TableEnd, &[Mode::Table], false, r"{NB}"),
        spec(Rule::Acknowledgements, &[Mode::Default], false, r"{NB}*Bjorn Augestad\n{NB}*"),
        spec(Rule::MacroDescription, &[Mode::Default], false, r"BSTRLIB_[A-Z0-9_]+\n\n{NB}+\n"),
        spec(
            Rule::FilesList,
            &[Mode::Default],
            false,
            r"{NB}?(?:[a-zA-Z0-9_]+\.[a-z]+ {2,}- .+\n)+",
        ),
        spec(Rule::Paragraph, &[Mode::Default], false, r"[^\s0-9-].*\n(?:.+\n)*"),
        spec(
            Rule::SkipBlank,
            &[Mode::FunctionHeading, Mode::FunctionExample, Mode::UnicodeParagraphs, Mode::MakefileExample],
            false,
            r"[ \t]*\n",
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: Rule,
    pub len: usize,
}

/// Pick the rule for the text at the scan position.
pub fn longest_match(mode: Mode, rest: &str, at_line_start: bool) -> Option<RuleMatch> {
    let mut best: Option<RuleMatch> = None;
    for spec in RULES.iter() {
        if !spec.modes.contains(&mode) || (spec.line_start && !at_line_start) {
            continue;
        }
        let Some(m) = spec.re.find(rest) else {
            continue;
        };
        let len = m.end();
        if len > 0 && best.map_or(true, |b| len > b.len) {
            best = Some(RuleMatch {
                rule: spec.rule,
                len,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_at(mode: Mode, text: &str) -> Option<Rule> {
        longest_match(mode, text, true).map(|m| m.rule)
    }

    fn matched(mode: Mode, text: &str) -> Option<(Rule, usize)> {
        longest_match(mode, text, true).map(|m| (m.rule, m.len))
    }

    #[test]
    fn heading_outranks_paragraph() {
        assert_eq!(
            matched(Mode::Default, "Functions\n---------\n\nNext\n"),
            Some((Rule::Heading, 20))
        );
        assert_eq!(
            rule_at(Mode::Default, "Memory\n......\n\n"),
            Some(Rule::Subheading)
        );
    }

    #[test]
    fn heading_needs_line_start() {
        let m = longest_match(Mode::Default, "Memory\n......\n\n", false);
        assert_eq!(m.map(|m| m.rule), Some(Rule::Paragraph));
    }

    #[test]
    fn library_title_outranks_heading() {
        let text = "Better String library\n---------------------\n\n";
        assert_eq!(rule_at(Mode::Default, text), Some(Rule::LibraryTitle));
    }

    #[test]
    fn reference_entry_points() {
        assert_eq!(
            rule_at(Mode::Default, "The functions\n-------------\n\n"),
            Some(Rule::EnterReference)
        );
        assert_eq!(
            rule_at(Mode::FunctionBody, "    ..........\n\nextern int b (void);\n"),
            Some(Rule::EnterReference)
        );
        assert_eq!(
            matched(Mode::Default, "The macros\n\nSome macros follow.\n\n\nbdata (b)\n"),
            Some((Rule::EnterReference, 34))
        );
    }

    #[test]
    fn unicode_heading_outranks_heading() {
        assert_eq!(
            rule_at(Mode::Default, "Unicode functions\n-----------------\n\n"),
            Some(Rule::UnicodeHeading)
        );
    }

    #[test]
    fn table_outranks_paragraph() {
        let text = "Name      Meaning\n----      -------\nfoo       a foo\n\n";
        assert_eq!(matched(Mode::Default, text), Some((Rule::TableStart, 52)));
    }

    #[test]
    fn colon_paragraph_becomes_example_intro() {
        assert_eq!(
            rule_at(Mode::FunctionBody, "For example:\n\n    b = x;\n"),
            Some(Rule::ExampleIntro)
        );
        assert_eq!(
            rule_at(Mode::FunctionBody, "Plain text.\n\n"),
            Some(Rule::FunctionParagraph)
        );
    }

    #[test]
    fn divider_closes_function_body() {
        assert_eq!(rule_at(Mode::FunctionBody, "=====\n\n"), Some(Rule::CloseReference));
    }

    #[test]
    fn ordered_item_outranks_quote() {
        assert_eq!(rule_at(Mode::Default, "    1. first\n"), Some(Rule::OrderedItem));
        assert_eq!(rule_at(Mode::OrderedList, "2) second\n"), Some(Rule::OrderedItem));
        assert_eq!(rule_at(Mode::OrderedList, "   more\n"), Some(Rule::OrderedLine));
    }

    #[test]
    fn quote_ends_on_blank_then_unindented() {
        assert_eq!(rule_at(Mode::BlockQuote, "\nText\n"), Some(Rule::QuoteEnd));
        assert_eq!(rule_at(Mode::BlockQuote, "\n    more\n"), Some(Rule::QuoteBlank));
        assert_eq!(rule_at(Mode::BlockQuote, "Text\n"), Some(Rule::QuoteBreak));
        assert_eq!(rule_at(Mode::BlockQuote, "      code\n"), Some(Rule::QuoteLine));
    }

    #[test]
    fn special_blocks_outrank_paragraph() {
        assert_eq!(
            rule_at(Mode::Default, "Thanks to\nBjorn Augestad\nand others\n\n"),
            Some(Rule::Acknowledgements)
        );
        assert_eq!(
            rule_at(Mode::Default, "BSTRLIB_NOVSNP\n\n    Turns off vsnprintf.\n\n"),
            Some(Rule::MacroDescription)
        );
        assert_eq!(
            rule_at(Mode::Default, "bstrlib.c      - C implementation\nbstrlib.h      - C header\n"),
            Some(Rule::FilesList)
        );
    }

    #[test]
    fn makefile_block() {
        let text = "BSTRDIR = ../bstrlib\nCFLAGS = -I$(BSTRDIR)\n\nall: foo\n\tcc foo.c\n\tstrip foo\n\nNext.\n";
        assert_eq!(matched(Mode::Default, text), Some((Rule::MakefileStart, 44)));
        assert_eq!(
            rule_at(Mode::MakefileExample, &text[44..]),
            Some(Rule::MakefileRule)
        );
        assert_eq!(rule_at(Mode::MakefileExample, "Next.\n"), Some(Rule::MakefileEnd));
    }

    #[test]
    fn digits_do_not_start_paragraph() {
        assert_eq!(rule_at(Mode::Default, "2005 was a year\n"), None);
    }
}
