use std::path::PathBuf;

use crate::accumulator::DEFAULT_CAPACITY;

/// Settings for one conversion run. The defaults describe the bstrlib manual.
#[derive(Debug, Clone)]
pub struct ManifyOptions {
    /// Library name, used for the overview page title and `NAME` line.
    pub title: String,
    /// One-line description after the library name.
    pub summary: String,
    /// Manual section for every page.
    pub section: String,
    /// Directory receiving one page per symbol.
    pub man_dir: PathBuf,
    /// Largest construct, in bytes, the scanner will buffer.
    pub capacity: usize,
}

impl Default for ManifyOptions {
    fn default() -> Self {
        Self {
            title: "bstrlib".to_string(),
            summary: "the better string library".to_string(),
            section: "3".to_string(),
            man_dir: PathBuf::from("man3"),
            capacity: DEFAULT_CAPACITY,
        }
    }
}
