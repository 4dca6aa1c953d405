//! Schedule Export (sched-export) - Main entry point
//!
//! Reads the order file and side tables, converts the schedule and writes
//! the sessions, papers, authors and linking tables for the conference app.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sched_common::config::{self, OutputMode};
use sched_common::logging::init_tracing;
use sched_export::models::AuthorRow;
use sched_export::order::parse_order_text;
use sched_export::services::{LinkResolver, Linker};
use sched_export::tables::{check_seed_location, loader, CsvTables, SubmissionTables};
use sched_export::{replay_seed_authors, Converter};
use tracing::{info, warn};

/// Author export read when `--seed-authors` is not given
///
/// Kept outside the default output directory so replace-mode reruns always
/// start from the same pre-populated authors.
const DEFAULT_SEED_AUTHORS: &str = "data/seed/authors.csv";

/// Command-line arguments for sched-export
#[derive(Parser, Debug)]
#[command(name = "sched-export")]
#[command(about = "Convert a conference order file into app export tables")]
#[command(version)]
struct Args {
    /// Order file with `*` day, `+` session and `=` split markers
    #[arg(long, env = "SCHED_EXPORT_ORDER")]
    order: PathBuf,

    /// CSV mapping submission IDs to author lists
    #[arg(long, env = "SCHED_EXPORT_AUTHORS")]
    authors: PathBuf,

    /// CSV mapping submission IDs to abstracts
    #[arg(long, env = "SCHED_EXPORT_ABSTRACTS")]
    abstracts: PathBuf,

    /// Optional CSV of session chairs (session, name, email)
    #[arg(long, env = "SCHED_EXPORT_CHAIRS")]
    chairs: Option<PathBuf>,

    /// Optional CSV mapping titles to anthology IDs
    #[arg(long, env = "SCHED_EXPORT_ANTHOLOGY")]
    anthology: Option<PathBuf>,

    /// Optional CSV mapping titles to video URLs
    #[arg(long, env = "SCHED_EXPORT_VIDEOS")]
    videos: Option<PathBuf>,

    /// Existing author export used to seed author IDs [default: data/seed/authors.csv]
    #[arg(long, env = "SCHED_EXPORT_SEED_AUTHORS")]
    seed_authors: Option<PathBuf>,

    /// Directory the export tables are written to
    #[arg(long, default_value = "data/app", env = "SCHED_EXPORT_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Config file (overrides SCHED_EXPORT_CONFIG and the user config file)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append to existing sessions/authors/linking tables
    #[arg(long, env = "SCHED_EXPORT_APPEND")]
    append: bool,

    /// Log level filter, e.g. "debug" (RUST_LOG still takes precedence)
    #[arg(long, env = "SCHED_EXPORT_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    info!("Starting sched-export v{}", env!("CARGO_PKG_VERSION"));
    info!(source = ?config::resolve_config_source(args.config.as_deref()), "Configuration");

    let mode = if args.append {
        OutputMode::Append
    } else {
        config.output.mode
    };

    let order_text = fs::read_to_string(&args.order)
        .with_context(|| format!("Failed to read order file {}", args.order.display()))?;
    let schedule = parse_order_text(&order_text, &config.schedule.day_format)
        .with_context(|| format!("Failed to parse order file {}", args.order.display()))?;

    let submissions = SubmissionTables::load(&args.authors, &args.abstracts)
        .context("Failed to load submission tables")?;
    let links = link_resolver(&args, &config.links)?;
    let seed_path = args
        .seed_authors
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_AUTHORS));
    check_seed_location(&seed_path, &args.output_dir, mode)?;
    let seed = seed_authors(&seed_path, args.seed_authors.is_some())?;

    let linker = Linker::seeded(&seed, config.ids.first_id);
    let mut converter = Converter::new(&config, submissions, links, linker)?;

    let mut tables = CsvTables::create(&args.output_dir, mode).with_context(|| {
        format!("Failed to prepare output tables in {}", args.output_dir.display())
    })?;
    if mode == OutputMode::Replace {
        replay_seed_authors(&seed, &mut tables)?;
    }

    let summary = converter
        .convert(&schedule, &mut tables)
        .context("Conversion failed; previous output tables left unchanged")?;
    tables.finish().context("Failed to write output tables")?;

    info!(
        sessions = summary.sessions,
        papers = summary.papers,
        new_authors = summary.new_authors,
        links = summary.links,
        output = %args.output_dir.display(),
        "Export complete"
    );
    Ok(())
}

fn link_resolver(args: &Args, links: &config::LinkConfig) -> Result<LinkResolver> {
    let mut resolver = LinkResolver::new(links.clone());
    if let Some(path) = &args.anthology {
        resolver = resolver.with_anthology(loader::load_title_table(path, "anthology")?);
    }
    if let Some(path) = &args.videos {
        resolver = resolver.with_videos(loader::load_title_table(path, "videos")?);
    }
    if let Some(path) = &args.chairs {
        resolver = resolver.with_chairs(loader::load_chairs(path)?);
    }
    Ok(resolver)
}

/// Seed rows from the author export
///
/// An explicitly named export must exist; a missing default export starts
/// the registry empty.
fn seed_authors(path: &Path, explicit: bool) -> Result<Vec<AuthorRow>> {
    if !explicit && !path.exists() {
        warn!(path = %path.display(), "No author export found; starting with an empty registry");
        return Ok(Vec::new());
    }
    loader::load_seed_authors(path)
        .with_context(|| format!("Failed to load author export {}", path.display()))
}
