//! Table-driven keynote content
//!
//! Keynote abstracts, slides and videos are not in the input files; they come
//! from `[[keynotes]]` config entries matched by speaker name in the title.

use sched_common::config::KeynoteEntry;

/// Display title and description for one keynote session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeynote {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct KeynoteResolver {
    entries: Vec<KeynoteEntry>,
}

impl KeynoteResolver {
    pub fn new(entries: Vec<KeynoteEntry>) -> Self {
        Self { entries }
    }

    /// First entry whose match key occurs in `title`
    pub fn find(&self, title: &str) -> Option<&KeynoteEntry> {
        self.entries.iter().find(|e| title.contains(e.match_key()))
    }

    /// Resolve a keynote title; `None` when no entry matches
    ///
    /// The speaker name is removed from the title and re-appended with the
    /// affiliation: `"Keynote I: Talk - Speaker (Affiliation)"`.
    pub fn resolve(&self, title: &str) -> Option<ResolvedKeynote> {
        let entry = self.find(title)?;

        let stripped = title
            .replace(&format!("{} ", entry.speaker), "")
            .replace(&entry.speaker, "");
        let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut description = entry.abstract_text.clone();
        if let Some(url) = entry.slides_url.as_deref().filter(|u| !u.is_empty()) {
            description.push_str(&format!(" [<a href=\"{}\">Slides</a>]", url));
        }
        if let Some(url) = entry.video_url.as_deref().filter(|u| !u.is_empty()) {
            description.push_str(&format!(" [<a href=\"{}\">Video</a>]", url));
        }

        Some(ResolvedKeynote {
            title: format!("{} - {} ({})", stripped, entry.speaker, entry.affiliation),
            description,
        })
    }
}
