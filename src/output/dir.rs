//! Filesystem page store: one `<name>.<section>` file per symbol.

use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::PageStore;
use crate::error::{ManifyError, Result};

pub struct DirStore {
    dir: PathBuf,
    section: String,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>, section: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            section: section.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.section))
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|source| ManifyError::Resource {
            action: "create man directory",
            path: self.dir.clone(),
            source,
        })?;
        info!("created man directory {}", self.dir.display());
        Ok(())
    }
}

impl PageStore for DirStore {
    type Page = BufWriter<File>;

    fn create(&mut self, name: &str) -> Result<Self::Page> {
        self.ensure_dir()?;
        let path = self.page_path(name);
        let file = File::create(&path).map_err(|source| ManifyError::Resource {
            action: "open man page",
            path,
            source,
        })?;
        Ok(BufWriter::new(file))
    }

    fn close(&mut self, name: &str, page: Self::Page) -> Result<()> {
        let file = page.into_inner().map_err(|e| ManifyError::Resource {
            action: "close man page",
            path: self.page_path(name),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| ManifyError::Resource {
            action: "close man page",
            path: self.page_path(name),
            source,
        })
    }
}
