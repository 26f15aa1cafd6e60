//! Symbol extraction from function/macro synopsis blocks.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ManifyError, Result, SNIPPET_LEN};
use crate::transform::{indent, leading_spaces, snippet};

/// bstrlib identifiers start with `b` (bstring API) or `u` (unicode helpers).
static RE_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[bu][a-zA-Z0-9-]+ ?\(").unwrap());

const EXTERN: &str = "extern ";

/// A function or macro about to receive its own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub name: String,
    pub upper: String,
    pub synopsis: String,
}

impl SymbolRecord {
    pub fn from_synopsis(synopsis: &str) -> Result<Self> {
        let name = extract_name(synopsis)?;
        Ok(Self {
            upper: name.to_uppercase(),
            name,
            synopsis: synopsis.to_string(),
        })
    }

    /// The synopsis as shown on the page: dedented to column zero, without
    /// `extern ` qualifiers, and with the lines continuing a declaration
    /// shifted left by the same width so they stay aligned.
    pub fn display_synopsis(&self) -> String {
        let dedented = indent(&self.synopsis, -(leading_spaces(&self.synopsis) as isize));
        let mut out = String::with_capacity(dedented.len());
        let mut realign = false;
        for line in dedented.split_inclusive('\n') {
            if let Some(rest) = line.strip_prefix(EXTERN) {
                out.push_str(rest);
                realign = true;
            } else if realign {
                let cut = leading_spaces(line).min(EXTERN.len());
                out.push_str(&line[cut..]);
            } else {
                out.push_str(line);
            }
        }
        out
    }
}

/// Pull the identifier out of a synopsis block.
///
/// Only called once a synopsis has been recognized, so a miss means the
/// synopsis rule and this pattern disagree.
pub fn extract_name(synopsis: &str) -> Result<String> {
    let m = RE_SYMBOL.find(synopsis).ok_or_else(|| {
        ManifyError::Contract(format!(
            "no symbol matching '{}' in synopsis {:?}",
            RE_SYMBOL.as_str(),
            snippet(synopsis, SNIPPET_LEN)
        ))
    })?;
    Ok(m.as_str().trim_end_matches(['(', ' ']).to_string())
}
