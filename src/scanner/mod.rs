//! Lexical state machine over the manual text.
//!
//! The scanner keeps one active [`Mode`], asks [`rules::longest_match`] for
//! the rule to apply at the current position, and runs that rule's handler.
//! Multi-line constructs (lists, quotes, tables, the build-file example) are
//! gathered in an [`Accumulator`] and emitted when their closing shape shows
//! up or the input ends.

pub mod rules;

use log::{debug, trace, warn};
use std::fmt;
use std::io::Write;

use crate::accumulator::Accumulator;
use crate::error::{CapacityExceeded, ManifyError, Result, ShapeViolation, SNIPPET_LEN};
use crate::markup::{self, HeadingLevel};
use crate::options::ManifyOptions;
use crate::output::{PageStore, Router};
use crate::symbol::SymbolRecord;
use crate::transform::snippet;
use rules::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    OrderedList,
    UnorderedList,
    BlockQuote,
    FunctionHeading,
    FunctionBody,
    FunctionExample,
    UnicodeParagraphs,
    MakefileExample,
    Table,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Default => "default",
            Mode::OrderedList => "ordered list",
            Mode::UnorderedList => "unordered list",
            Mode::BlockQuote => "block quote",
            Mode::FunctionHeading => "function heading",
            Mode::FunctionBody => "function body",
            Mode::FunctionExample => "function example",
            Mode::UnicodeParagraphs => "unicode paragraphs",
            Mode::MakefileExample => "makefile example",
            Mode::Table => "table",
        };
        f.write_str(name)
    }
}

pub struct Scanner<'a, W: Write, S: PageStore> {
    input: &'a str,
    pos: usize,
    mode: Mode,
    buffer: Accumulator,
    router: Router<W, S>,
    options: &'a ManifyOptions,
}

impl<'a, W: Write, S: PageStore> Scanner<'a, W, S> {
    pub fn new(input: &'a str, router: Router<W, S>, options: &'a ManifyOptions) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Default,
            buffer: Accumulator::new(options.capacity),
            router,
            options,
        }
    }

    /// Scan the whole input and return the router with every page closed.
    ///
    /// Every rule consumes whole lines, so `input` must end with a newline.
    pub fn run(mut self) -> Result<Router<W, S>> {
        while self.pos < self.input.len() {
            self.step()?;
        }
        self.end_of_input()?;
        Ok(self.router)
    }

    fn step(&mut self) -> Result<()> {
        let input = self.input;
        let rest = &input[self.pos..];
        let at_line_start = self.pos == 0 || input.as_bytes()[self.pos - 1] == b'\n';

        let Some(m) = rules::longest_match(self.mode, rest, at_line_start) else {
            return Err(ManifyError::Unmatched {
                line: self.line(),
                mode: self.mode,
                snippet: snippet(rest.lines().next().unwrap_or_default(), SNIPPET_LEN),
            });
        };
        let text = &rest[..m.len];
        if m.len > self.options.capacity {
            return Err(ManifyError::Capacity {
                line: self.line(),
                source: CapacityExceeded {
                    len: m.len,
                    capacity: self.options.capacity,
                    snippet: snippet(text, SNIPPET_LEN),
                },
            });
        }
        trace!("line {}: {:?} matched {} bytes", self.line(), m.rule, m.len);

        self.dispatch(m.rule, text)?;
        if !m.rule.peeks() {
            self.pos += m.len;
        }
        Ok(())
    }

    fn dispatch(&mut self, rule: Rule, text: &str) -> Result<()> {
        match rule {
            Rule::LibraryTitle => {
                self.router.emit_main(&markup::overview_head(self.options))?;
                self.router
                    .emit_main(&markup::heading(HeadingLevel::Section, text))?;
            }
            Rule::EnterReference => {
                if self.router.has_open_symbol() {
                    self.router.close_symbol()?;
                }
                self.enter(Mode::FunctionHeading);
            }
            Rule::CloseReference => {
                self.router.close_symbol()?;
                self.enter(Mode::Default);
            }
            Rule::Synopsis => {
                let record = SymbolRecord::from_synopsis(text)?;
                self.router.open_symbol(&record)?;
                self.router
                    .emit_symbol(&markup::symbol_head(&record, self.options))?;
                self.enter(Mode::FunctionBody);
            }
            Rule::ExampleIntro => {
                self.router.emit_symbol(&markup::paragraph(text))?;
                self.enter(Mode::FunctionExample);
            }
            Rule::Example => {
                self.router.emit_symbol(&markup::function_example(text))?;
                self.enter(Mode::FunctionBody);
            }
            Rule::FunctionParagraph => {
                self.router.emit_symbol(&markup::paragraph(text))?;
            }
            Rule::UnicodeHeading => {
                self.router
                    .emit_main(&markup::heading(HeadingLevel::Section, text))?;
                self.enter(Mode::UnicodeParagraphs);
            }
            Rule::UnicodeEnd => self.enter(Mode::Default),
            Rule::UnicodeParagraph | Rule::Paragraph => {
                self.router.emit_main(&markup::paragraph(text))?;
            }
            Rule::Heading => {
                self.router
                    .emit_main(&markup::heading(HeadingLevel::Section, text))?;
            }
            Rule::Subheading => {
                self.router
                    .emit_main(&markup::heading(HeadingLevel::Subsection, text))?;
            }
            Rule::Divider | Rule::BlankLine | Rule::FunctionBlank | Rule::SkipBlank => {}
            Rule::OrderedItem => {
                self.flush_ordered()?;
                self.start(text)?;
                self.enter(Mode::OrderedList);
            }
            Rule::UnorderedItem => {
                self.flush_unordered()?;
                self.start(text)?;
                self.enter(Mode::UnorderedList);
            }
            Rule::OrderedLine
            | Rule::UnorderedLine
            | Rule::QuoteLine
            | Rule::QuoteBlank
            | Rule::MakefileRule
            | Rule::TableRow => self.append(text)?,
            Rule::OrderedEnd => {
                self.flush_ordered()?;
                self.enter(Mode::Default);
            }
            Rule::UnorderedEnd => {
                self.flush_unordered()?;
                self.enter(Mode::Default);
            }
            Rule::QuoteStart => {
                self.start(text)?;
                self.enter(Mode::BlockQuote);
            }
            Rule::QuoteEnd | Rule::QuoteBreak => {
                self.flush_quote()?;
                self.enter(Mode::Default);
            }
            Rule::MakefileStart => {
                self.start(text)?;
                self.enter(Mode::MakefileExample);
            }
            Rule::TableStart => {
                self.start(text)?;
                self.enter(Mode::Table);
            }
            Rule::MakefileEnd | Rule::TableEnd => {
                self.flush_literal()?;
                self.enter(Mode::Default);
            }
            Rule::Acknowledgements | Rule::FilesList => {
                self.router.emit_main(&markup::no_fill(text))?;
            }
            Rule::MacroDescription => {
                let tagged = markup::macro_description(text).map_err(|e| self.shape(e))?;
                self.router.emit_main(&tagged)?;
            }
        }
        Ok(())
    }

    /// Flush whatever construct is still open and close a dangling page.
    fn end_of_input(&mut self) -> Result<()> {
        match self.mode {
            Mode::OrderedList => self.flush_ordered()?,
            Mode::UnorderedList => self.flush_unordered()?,
            Mode::BlockQuote => self.flush_quote()?,
            Mode::Table | Mode::MakefileExample => self.flush_literal()?,
            _ => {}
        }
        if self.router.has_open_symbol() {
            warn!("input ended inside a function description; closing its page");
            self.router.close_symbol()?;
        }
        self.enter(Mode::Default);
        Ok(())
    }

    fn flush_ordered(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let item = self.buffer.take();
        let tagged = markup::ordered_item(&item).map_err(|e| self.shape(e))?;
        self.router.emit_main(&tagged)
    }

    fn flush_unordered(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let item = self.buffer.take();
        self.router.emit_main(&markup::unordered_item(&item))
    }

    fn flush_quote(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let block = self.buffer.take();
        self.router.emit_main(&markup::block_quote(&block))
    }

    fn flush_literal(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let block = self.buffer.take();
        self.router.emit_main(&markup::no_fill(&block))
    }

    fn start(&mut self, text: &str) -> Result<()> {
        self.buffer.start(text).map_err(|e| self.capacity(e))
    }

    fn append(&mut self, text: &str) -> Result<()> {
        self.buffer.append(text).map_err(|e| self.capacity(e))
    }

    fn enter(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!("line {}: {} -> {}", self.line(), self.mode, mode);
            self.mode = mode;
        }
    }

    /// 1-based line of the scan position.
    fn line(&self) -> usize {
        self.input[..self.pos].matches('\n').count() + 1
    }

    fn capacity(&self, source: CapacityExceeded) -> ManifyError {
        ManifyError::Capacity {
            line: self.line(),
            source,
        }
    }

    fn shape(&self, violation: ShapeViolation) -> ManifyError {
        ManifyError::InputShape {
            line: self.line(),
            message: violation.message,
            snippet: violation.snippet,
        }
    }
}
