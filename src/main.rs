//! manify: convert the bstrlib plain-text manual into man pages.
//!
//! - `manify bstrlib.txt > bstrlib.3` writes the overview to stdout
//! - `manify -o bstrlib.3 -d man3 bstrlib.txt` writes it to a file
//!
//! Symbol pages always land in the man directory (`man3` by default).

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;

use manify::{DirStore, ManifyOptions};

#[derive(Parser)]
#[command(
    name = "manify",
    about = "Convert the bstrlib plain-text manual into troff man pages"
)]
struct Cli {
    /// Manual to convert. If omitted, reads from stdin.
    input: Option<PathBuf>,

    /// Overview page destination. If omitted, writes to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Directory receiving one page per function or macro
    #[arg(short = 'd', long, default_value = "man3")]
    man_dir: PathBuf,

    /// Manual section for every page
    #[arg(short = 's', long, default_value = "3")]
    section: String,

    /// Library name used in page titles
    #[arg(long, default_value = "bstrlib")]
    title: String,

    /// One-line library description on the overview page
    #[arg(long, default_value = "the better string library")]
    summary: String,

    /// Largest construct, in bytes, that may be buffered
    #[arg(long, default_value_t = manify::accumulator::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Log mode transitions and pages as they are written
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ManifyOptions {
        ManifyOptions {
            title: self.title.clone(),
            summary: self.summary.clone(),
            section: self.section.clone(),
            man_dir: self.man_dir.clone(),
            capacity: self.capacity,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let input = read_input(&cli)?;
    let options = cli.options();
    let store = DirStore::new(&options.man_dir, &options.section);

    let symbols = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let converted = manify::convert(&input, BufWriter::new(file), store, &options)?;
            converted
                .main
                .into_inner()
                .map_err(|e| e.into_error())
                .and_then(|f| f.sync_all())
                .with_context(|| format!("failed to write {}", path.display()))?;
            converted.symbols
        }
        None => {
            let stdout = BufWriter::new(io::stdout().lock());
            manify::convert(&input, stdout, store, &options)?.symbols
        }
    };

    info!(
        "wrote {} symbol pages to {}",
        symbols.len(),
        options.man_dir.display()
    );
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
