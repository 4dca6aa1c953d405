//! End-to-end export runs against on-disk tables

mod helpers;

use helpers::{write_inputs, InputFiles, PAPER_LINES};
use sched_common::config::OutputMode;
use sched_common::{Result, TomlConfig};
use sched_export::order::parse_order_text;
use sched_export::services::{LinkResolver, Linker};
use sched_export::tables::writer::{AUTHORS_FILE, LINKING_FILE, PAPERS_FILE, SESSIONS_FILE};
use sched_export::tables::{check_seed_location, loader, CsvTables, SubmissionTables};
use sched_export::{replay_seed_authors, RunSummary};
use sched_export::Converter;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Same sequence of steps as the binary
fn export(inputs: &InputFiles, out_dir: &Path, mode: OutputMode) -> Result<RunSummary> {
    let config = TomlConfig::default();
    let order = fs::read_to_string(&inputs.order)?;
    let schedule = parse_order_text(&order, &config.schedule.day_format)?;
    let submissions = SubmissionTables::load(&inputs.authors, &inputs.abstracts)?;
    let links = LinkResolver::new(config.links.clone())
        .with_anthology(loader::load_title_table(&inputs.anthology, "anthology")?);
    check_seed_location(&inputs.seed_authors, out_dir, mode)?;
    let seed = loader::load_seed_authors(&inputs.seed_authors)?;

    let linker = Linker::seeded(&seed, config.ids.first_id);
    let mut converter = Converter::new(&config, submissions, links, linker)?;
    let mut tables = CsvTables::create(out_dir, mode)?;
    if mode == OutputMode::Replace {
        replay_seed_authors(&seed, &mut tables)?;
    }
    let summary = converter.convert(&schedule, &mut tables)?;
    tables.finish()?;
    Ok(summary)
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_replace_run_writes_complete_tables() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("app");

    let summary = export(&inputs, &out, OutputMode::Replace).unwrap();

    let sessions = read_rows(&out.join(SESSIONS_FILE));
    assert_eq!(sessions[0][0], "Session ID");
    assert_eq!(sessions.len(), summary.sessions + 1);
    assert_eq!(
        sessions[1],
        vec![
            "45",
            "Opening Session",
            "11/02/18",
            "09:00",
            "10:30",
            "Grand Ballroom",
            "Conference Sessions",
            ""
        ]
    );

    let papers = read_rows(&out.join(PAPERS_FILE));
    assert_eq!(papers.len(), PAPER_LINES + 1);
    assert_eq!(
        papers[1][8],
        "Parsing abstract. [<a href=\"https://aclanthology.org/D18-1001\">PDF</a>]"
    );

    // Header, then the seeded rows, then this run's rows
    let authors = read_rows(&out.join(AUTHORS_FILE));
    assert_eq!(authors[0], vec!["Presentation ID", "Author ID", "Name"]);
    assert_eq!(authors[1], vec!["3", "40", "Keynote Speaker"]);
    assert_eq!(authors[2], vec!["5", "44", "Tutorial Host"]);
    assert_eq!(authors.len(), 3 + summary.links);

    let linking = read_rows(&out.join(LINKING_FILE));
    assert_eq!(linking.len(), summary.links + 1);

    for name in [SESSIONS_FILE, PAPERS_FILE, AUTHORS_FILE, LINKING_FILE] {
        assert!(!out.join(format!("{}.tmp", name)).exists());
    }
}

#[test]
fn test_replace_rerun_is_stable() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("app");

    export(&inputs, &out, OutputMode::Replace).unwrap();
    let first = fs::read_to_string(out.join(LINKING_FILE)).unwrap();
    export(&inputs, &out, OutputMode::Replace).unwrap();
    let second = fs::read_to_string(out.join(LINKING_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_replace_refuses_seed_from_its_own_output() {
    let dir = TempDir::new().unwrap();
    let mut inputs = write_inputs(dir.path());
    let out = dir.path().join("app");
    fs::create_dir_all(&out).unwrap();
    fs::copy(&inputs.seed_authors, out.join(AUTHORS_FILE)).unwrap();
    inputs.seed_authors = out.join(AUTHORS_FILE);
    let before = fs::read_to_string(out.join(AUTHORS_FILE)).unwrap();

    let err = export(&inputs, &out, OutputMode::Replace).unwrap_err();
    assert!(matches!(err, sched_common::Error::InvalidInput(_)));
    assert_eq!(fs::read_to_string(out.join(AUTHORS_FILE)).unwrap(), before);
    assert!(!out.join(SESSIONS_FILE).exists());
}

#[test]
fn test_replace_reruns_keep_ids_with_separate_seed() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("app");

    export(&inputs, &out, OutputMode::Replace).unwrap();
    let first_sessions = read_rows(&out.join(SESSIONS_FILE));
    let first_authors = read_rows(&out.join(AUTHORS_FILE));
    export(&inputs, &out, OutputMode::Replace).unwrap();

    assert_eq!(read_rows(&out.join(SESSIONS_FILE)), first_sessions);
    assert_eq!(read_rows(&out.join(AUTHORS_FILE)), first_authors);
    assert_eq!(first_sessions[1][0], "45");
}

#[test]
fn test_append_rerun_duplicates_rows() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("app");

    let summary = export(&inputs, &out, OutputMode::Append).unwrap();
    export(&inputs, &out, OutputMode::Append).unwrap();

    // The header is written only when a table is created; papers are
    // rewritten each time
    assert_eq!(read_rows(&out.join(LINKING_FILE)).len(), 2 * summary.links + 1);
    assert_eq!(read_rows(&out.join(SESSIONS_FILE)).len(), 2 * summary.sessions + 1);
    assert_eq!(read_rows(&out.join(PAPERS_FILE)).len(), PAPER_LINES + 1);
}

#[test]
fn test_failed_run_keeps_previous_outputs() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("app");

    export(&inputs, &out, OutputMode::Replace).unwrap();
    let before = fs::read_to_string(out.join(SESSIONS_FILE)).unwrap();

    let mut order = fs::read_to_string(&inputs.order).unwrap();
    order.push_str("+ 20:00-21:00 Best Paper Encore (Bar)\n999 20:00-20:20 Not Submitted\n");
    fs::write(&inputs.order, order).unwrap();
    let err = export(&inputs, &out, OutputMode::Replace).unwrap_err();
    assert!(matches!(err, sched_common::Error::MissingLookup { .. }));

    let after = fs::read_to_string(out.join(SESSIONS_FILE)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_duplicate_submission_fails_load() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let mut authors = fs::read_to_string(&inputs.authors).unwrap();
    authors.push_str("101,Someone Else\n");
    fs::write(&inputs.authors, authors).unwrap();

    let err = SubmissionTables::load(&inputs.authors, &inputs.abstracts).unwrap_err();
    assert!(matches!(err, sched_common::Error::DuplicateKey { .. }));
}
