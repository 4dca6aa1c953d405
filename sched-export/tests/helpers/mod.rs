//! Test Helper Utilities
//!
//! Shared fixtures for sched-export integration tests

#![allow(dead_code)]

use sched_export::tables::SubmissionTables;
use std::fs;
use std::path::{Path, PathBuf};

/// Two-day order file exercising every session kind
pub const ORDER: &str = "\
EMNLP 2018 order file
Generated for testing

* Friday, 2 November 2018
+ 09:00-10:30 Opening Session (Grand Ballroom)
+ 10:30-11:00 Coffee Break
+ 11:00-12:30 Orals and Posters: Parsing and Tagging (I)
= 1A: Parsing and Syntax (Hall A)
101 11:00-11:18 A Study of Parsing
102-TACL 11:18-11:36 Journal Parsing
= 1B: Posters and Demos (Poster Session, Hall B)
103 Tagging Posters
77-demo A Tool
@ 101 A Study of Parsing
+ 12:30-14:00 Lunch

* Saturday, 3 November 2018
+ 09:00-10:00 Keynote I: Ada Lovelace Poetical Science (Grand Ballroom)
+ 10:00-10:30 Mini Break
+ 16:00-17:00 Best Paper Session (Grand Ballroom)
104 16:00-16:20 Best Paper Candidate
+ 17:00-18:00 Business Meeting (Hall A)
+ 19:00-23:00 Social Event (City Museum)
";

/// `(submission_id, authors, abstract)` for every paper in [`ORDER`]
pub const SUBMISSIONS: &[(&str, &str, &str)] = &[
    ("101", "Jane Doe and John Smith", "Parsing abstract."),
    ("102-TACL", "Li Wei, Jane Doe", "Journal abstract."),
    ("103", "Ann Lee, Bo Chen and Cy Diaz", "Tagging abstract."),
    ("77-demo", "John Smith", "Demo abstract."),
    ("104", "Keynote Speaker and Jane Doe", "Best abstract."),
];

/// Paper lines in [`ORDER`], excluding the `@` cross-reference
pub const PAPER_LINES: usize = 5;

pub fn submission_tables() -> SubmissionTables {
    let mut tables = SubmissionTables::default();
    for (id, authors, abstract_text) in SUBMISSIONS {
        tables.authors.insert(id.to_string(), authors.to_string());
        tables
            .abstracts
            .insert(id.to_string(), abstract_text.to_string());
    }
    tables
}

/// Input files for a full binary-style run, written into one directory
pub struct InputFiles {
    pub order: PathBuf,
    pub authors: PathBuf,
    pub abstracts: PathBuf,
    pub anthology: PathBuf,
    pub seed_authors: PathBuf,
}

pub fn write_inputs(dir: &Path) -> InputFiles {
    let order = dir.join("order.txt");
    fs::write(&order, ORDER).unwrap();

    let mut authors = csv::Writer::from_path(dir.join("authors.csv")).unwrap();
    let mut abstracts = csv::Writer::from_path(dir.join("abstracts.csv")).unwrap();
    for (id, names, abstract_text) in SUBMISSIONS {
        authors.write_record([id, names]).unwrap();
        abstracts.write_record([id, abstract_text]).unwrap();
    }
    authors.flush().unwrap();
    abstracts.flush().unwrap();

    let anthology = dir.join("anthology.csv");
    fs::write(
        &anthology,
        "A Study of Parsing,D18-1001\nA Tool,D18-2001\nJournal Parsing,1234\n",
    )
    .unwrap();

    let seed_authors = dir.join("seed-authors.csv");
    fs::write(
        &seed_authors,
        "Presentation ID,Author ID,Name\n3,40,Keynote Speaker\n5,44,Tutorial Host\n",
    )
    .unwrap();

    InputFiles {
        order,
        authors: dir.join("authors.csv"),
        abstracts: dir.join("abstracts.csv"),
        anthology,
        seed_authors,
    }
}
