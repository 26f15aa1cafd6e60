//! In-memory page store, for library callers and tests.

use std::collections::BTreeMap;
use std::io::{self, Write};

use super::PageStore;
use crate::error::{ManifyError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: BTreeMap<String, String>,
}

/// A page being written; it lands in the store when closed.
#[derive(Debug, Default)]
pub struct MemoryPage {
    buf: Vec<u8>,
}

impl Write for MemoryPage {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MemoryStore {
    pub fn page(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }

    pub fn into_pages(self) -> BTreeMap<String, String> {
        self.pages
    }
}

impl PageStore for MemoryStore {
    type Page = MemoryPage;

    fn create(&mut self, _name: &str) -> Result<Self::Page> {
        Ok(MemoryPage::default())
    }

    fn close(&mut self, name: &str, page: Self::Page) -> Result<()> {
        let text = String::from_utf8(page.buf).map_err(|e| ManifyError::Write {
            target: format!("page for {name}"),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        self.pages.insert(name.to_string(), text);
        Ok(())
    }
}
