//! manify: turn the bstrlib plain-text manual into man pages.
//!
//! One overview page is written to the main sink and one page per documented
//! function or macro goes through a [`PageStore`].

pub mod accumulator;
pub mod error;
pub mod markup;
pub mod options;
pub mod output;
pub mod scanner;
pub mod symbol;
pub mod transform;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

pub use error::{ManifyError, Result};
pub use options::ManifyOptions;
pub use output::{DirStore, MemoryStore, PageStore, Router};
pub use scanner::{Mode, Scanner};

/// Sinks handed back after a successful conversion.
pub struct Converted<W, S> {
    pub main: W,
    pub store: S,
    /// Symbol pages written, in document order.
    pub symbols: Vec<String>,
}

/// Overview and symbol pages rendered in memory.
#[derive(Debug, Default)]
pub struct Rendered {
    pub overview: String,
    pub pages: BTreeMap<String, String>,
}

/// Convert `input`, writing the overview to `main` and symbol pages to `store`.
///
/// A last line without a newline is treated as if it had one.
pub fn convert<W: Write, S: PageStore>(
    input: &str,
    main: W,
    store: S,
    options: &ManifyOptions,
) -> Result<Converted<W, S>> {
    let input = newline_terminated(input);
    let router = Scanner::new(&input, Router::new(main, store), options).run()?;
    let (main, store, symbols) = router.finish()?;
    Ok(Converted {
        main,
        store,
        symbols,
    })
}

fn newline_terminated(input: &str) -> Cow<'_, str> {
    if input.is_empty() || input.ends_with('\n') {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{input}\n"))
    }
}

pub fn convert_to_memory(input: &str, options: &ManifyOptions) -> Result<Rendered> {
    let converted = convert(input, Vec::new(), MemoryStore::default(), options)?;
    Ok(Rendered {
        overview: String::from_utf8_lossy(&converted.main).into_owned(),
        pages: converted.store.into_pages(),
    })
}
