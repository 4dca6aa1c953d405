//! Hyperlink fragments for paper descriptions and session chairs
//!
//! All lookups degrade gracefully: an absent table or an unknown key yields
//! an empty fragment, never an error.

use sched_common::config::LinkConfig;
use std::collections::HashMap;
use tracing::debug;

/// Session chair from the chairs table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chair {
    pub name: String,
    pub email: String,
}

/// Title-keyed link lookups
///
/// Title maps are keyed by lower-cased title; callers may pass titles in any
/// case.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    anthology: Option<HashMap<String, String>>,
    videos: Option<HashMap<String, String>>,
    chairs: Option<HashMap<String, Chair>>,
    links: LinkConfig,
}

impl LinkResolver {
    pub fn new(links: LinkConfig) -> Self {
        Self {
            links,
            ..Self::default()
        }
    }

    pub fn with_anthology(mut self, anthology: HashMap<String, String>) -> Self {
        self.anthology = Some(anthology);
        self
    }

    pub fn with_videos(mut self, videos: HashMap<String, String>) -> Self {
        self.videos = Some(videos);
        self
    }

    pub fn with_chairs(mut self, chairs: HashMap<String, Chair>) -> Self {
        self.chairs = Some(chairs);
        self
    }

    /// ` [<a href="...">PDF</a>]` for an anthology paper, poster or demo
    pub fn anthology_link(&self, title: &str) -> String {
        self.pdf_fragment(title, &self.links.anthology_url, "anthology")
    }

    /// ` [<a href="...">PDF</a>]` for a TACL paper
    pub fn tacl_link(&self, title: &str) -> String {
        self.pdf_fragment(title, &self.links.tacl_url, "tacl")
    }

    /// ` [<a href="...">Video</a>]`
    pub fn video_link(&self, title: &str) -> String {
        match lookup(self.videos.as_ref(), title) {
            Some(url) => fragment(url, &self.links.video_label),
            None => {
                debug!(title = %title, "No video link");
                String::new()
            }
        }
    }

    /// `<a href="mailto:...">Name</a>` for a split's source session ID
    pub fn session_chair_link(&self, session_id: &str) -> Option<String> {
        let chair = self.chairs.as_ref()?.get(session_id)?;
        Some(format!(
            "<a href=\"mailto:{}\">{}</a>",
            chair.email, chair.name
        ))
    }

    fn pdf_fragment(&self, title: &str, template: &str, table: &str) -> String {
        match lookup(self.anthology.as_ref(), title) {
            Some(id) => fragment(&template.replace("{id}", id), &self.links.pdf_label),
            None => {
                debug!(title = %title, table = table, "No PDF link");
                String::new()
            }
        }
    }
}

fn lookup<'a>(map: Option<&'a HashMap<String, String>>, title: &str) -> Option<&'a str> {
    map?.get(&title.to_lowercase()).map(String::as_str)
}

fn fragment(url: &str, label: &str) -> String {
    format!(" [<a href=\"{}\">{}</a>]", url, label)
}
