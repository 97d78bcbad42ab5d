//! Extracts every DDL parse tree from a binary image and dumps it as JSON.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ddl_parse_tree::{scan_with_options, DecodeOptions, ErrorKind, ScannedTree, Tree, TreeSummary};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binary image to scan.
    input: PathBuf,

    /// Directory receiving one `tree-N.json` per result. Prints to stdout when omitted.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON.
    #[clap(long)]
    pretty: bool,

    /// Keep attempts that stopped with an error, along with their partial tree.
    #[clap(long)]
    include_failed: bool,

    /// Drop trees whose bytes match an earlier tree.
    #[clap(long)]
    dedup: bool,

    /// Add element statistics to each report.
    #[clap(long)]
    summary: bool,

    /// Maximum template argument nesting.
    #[clap(long)]
    max_declaration_use_depth: Option<usize>,

    /// Maximum namespace nesting.
    #[clap(long)]
    max_namespace_depth: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct ErrorReport {
    code: &'static str,
    kind: ErrorKind,
    offset: usize,
    message: String,
}

#[derive(Serialize)]
struct SummaryReport {
    total_elements: usize,
    max_depth: usize,
    counts: Vec<(&'static str, usize)>,
}

impl From<TreeSummary> for SummaryReport {
    fn from(summary: TreeSummary) -> Self {
        Self {
            total_elements: summary.total_elements,
            max_depth: summary.max_depth,
            counts: summary
                .counts()
                .into_iter()
                .map(|(kind, n)| (kind.name(), n))
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct TreeReport<'r, 'a> {
    index: usize,
    signature_offset: usize,
    end_offset: usize,
    version: String,
    fingerprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryReport>,
    tree: &'r Tree<'a>,
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

fn report<'r, 'a>(index: usize, found: &'r ScannedTree<'a>, with_summary: bool) -> TreeReport<'r, 'a> {
    TreeReport {
        index,
        signature_offset: found.signature_offset,
        end_offset: found.end_offset,
        version: found.tree.version(),
        fingerprint: hex(&found.fingerprint()),
        error: found.error.as_ref().map(|e| ErrorReport {
            code: e.kind().code(),
            kind: e.kind(),
            offset: e.offset(),
            message: e.to_string(),
        }),
        summary: with_summary.then(|| TreeSummary::of(&found.tree).into()),
        tree: &found.tree,
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn select<'a>(attempts: Vec<ScannedTree<'a>>, args: &Args) -> Vec<ScannedTree<'a>> {
    let mut seen = HashSet::new();
    attempts
        .into_iter()
        .filter(|found| {
            if !found.is_ok() && !args.include_failed {
                log::debug!(
                    "skipping failed attempt at {:#x}: {}",
                    found.signature_offset,
                    found.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
                );
                return false;
            }
            if args.dedup && !seen.insert(found.fingerprint()) {
                log::debug!("skipping duplicate tree at {:#x}", found.signature_offset);
                return false;
            }
            true
        })
        .collect()
}

fn write_reports(dir: &Path, reports: &[TreeReport<'_, '_>], pretty: bool) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for report in reports {
        let path = dir.join(format!("tree-{}.json", report.index));
        fs::write(&path, to_json(report, pretty)?)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    log::info!("read {} bytes from {}", data.len(), args.input.display());

    let mut options = DecodeOptions::new();
    if let Some(depth) = args.max_declaration_use_depth {
        options = options.with_max_declaration_use_depth(depth);
    }
    if let Some(depth) = args.max_namespace_depth {
        options = options.with_max_namespace_depth(depth);
    }

    let selected = select(scan_with_options(&data, options), &args);
    let reports: Vec<_> = selected
        .iter()
        .enumerate()
        .map(|(i, found)| report(i, found, args.summary))
        .collect();

    match &args.output {
        Some(dir) => write_reports(dir, &reports, args.pretty)?,
        None => println!("{}", to_json(&reports, args.pretty)?),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
