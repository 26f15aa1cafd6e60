//! Output routing: the overview sink plus one transient page per symbol.

pub mod dir;
pub mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use log::debug;
use std::io::Write;

use crate::error::{ManifyError, Result};
use crate::symbol::SymbolRecord;

/// Where per-symbol pages are created and closed.
pub trait PageStore {
    type Page: Write;

    /// Create the page for `name`, replacing any existing one.
    fn create(&mut self, name: &str) -> Result<Self::Page>;

    /// Finish a page. Errors here mean written markup may be lost.
    fn close(&mut self, name: &str, page: Self::Page) -> Result<()>;
}

struct OpenPage<P> {
    name: String,
    page: P,
}

/// Routes markup to the overview sink or the open symbol page.
///
/// At most one symbol page is open; opening a second one without closing the
/// first is a contract violation.
pub struct Router<W: Write, S: PageStore> {
    main: W,
    store: S,
    current: Option<OpenPage<S::Page>>,
    written: Vec<String>,
}

impl<W: Write, S: PageStore> Router<W, S> {
    pub fn new(main: W, store: S) -> Self {
        Self {
            main,
            store,
            current: None,
            written: Vec::new(),
        }
    }

    pub fn emit_main(&mut self, markup: &str) -> Result<()> {
        self.main
            .write_all(markup.as_bytes())
            .map_err(|source| ManifyError::Write {
                target: "overview page".to_string(),
                source,
            })
    }

    pub fn emit_symbol(&mut self, markup: &str) -> Result<()> {
        let Some(open) = self.current.as_mut() else {
            return Err(ManifyError::Contract(
                "symbol markup written with no symbol page open".to_string(),
            ));
        };
        open.page
            .write_all(markup.as_bytes())
            .map_err(|source| ManifyError::Write {
                target: format!("page for {}", open.name),
                source,
            })
    }

    pub fn open_symbol(&mut self, record: &SymbolRecord) -> Result<()> {
        if let Some(open) = &self.current {
            return Err(ManifyError::Contract(format!(
                "opening page for {} while page for {} is still open",
                record.name, open.name
            )));
        }
        let page = self.store.create(&record.name)?;
        debug!("opened page for {}", record.name);
        self.current = Some(OpenPage {
            name: record.name.clone(),
            page,
        });
        Ok(())
    }

    pub fn close_symbol(&mut self) -> Result<()> {
        let Some(open) = self.current.take() else {
            return Err(ManifyError::Contract(
                "closing a symbol page when none is open".to_string(),
            ));
        };
        self.store.close(&open.name, open.page)?;
        debug!("closed page for {}", open.name);
        self.written.push(open.name);
        Ok(())
    }

    pub fn has_open_symbol(&self) -> bool {
        self.current.is_some()
    }

    /// Flush the overview sink and return the sinks with the symbol list.
    pub fn finish(mut self) -> Result<(W, S, Vec<String>)> {
        if self.current.is_some() {
            return Err(ManifyError::Contract(
                "finishing with a symbol page still open".to_string(),
            ));
        }
        self.main.flush().map_err(|source| ManifyError::Write {
            target: "overview page".to_string(),
            source,
        })?;
        Ok((self.main, self.store, self.written))
    }
}
