// SPDX-License-Identifier: MPL-2.0

//! Featured project selection
//!
//! The recency path asks the wiki's recent-changes API for the latest
//! content-namespace edits and takes the first one that looks like a real
//! project page. If that yields nothing (or the request fails), the picker
//! scrapes the project index for internal links and chooses uniformly at
//! random. Both paths are best-effort; an empty index means "no project
//! available".

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::config::{Config, ProjectMode};
use crate::net::HttpClient;
use crate::widget::page::strip_tags;

/// A candidate project page, rebuilt every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    /// Site-relative path (`/Widget_Frame`) or, from scraped anchors,
    /// whatever the wiki linked.
    pub url: String,
}

pub struct ProjectPicker<'a> {
    client: &'a HttpClient,
    config: &'a Config,
}

impl<'a> ProjectPicker<'a> {
    pub fn new(client: &'a HttpClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Pick a project according to the configured mode. The recency path
    /// falls through to the random path on any failure.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<Project> {
        if self.config.project_mode == ProjectMode::Latest {
            if let Some(project) = self.pick_latest() {
                return Some(project);
            }
        }
        self.pick_random(rng)
    }

    fn pick_latest(&self) -> Option<Project> {
        let doc = match self.client.get_json(&self.config.recent_changes_url()) {
            Ok(doc) => doc,
            Err(e) => {
                log::debug!("recent-changes fetch failed: {e}");
                return None;
            }
        };
        select_recent(&doc, &self.config.main_page_title)
    }

    fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<Project> {
        let html = match self.client.get_text(&self.config.projects_url()) {
            Ok(html) => html,
            Err(e) => {
                log::debug!("project index fetch failed: {e}");
                return None;
            }
        };
        let candidates = scrape_index(&html, &self.config.projects_path);
        candidates.choose(rng).cloned()
    }
}

/// Walk a recent-changes response in feed order (most recent first) and
/// return the first entry that passes the content filters: nonempty title,
/// no namespace separator, and not the site's home page in either its
/// space- or underscore-separated spelling.
fn select_recent(doc: &Value, main_page_title: &str) -> Option<Project> {
    let changes = doc
        .pointer("/query/recentchanges")?
        .as_array()?;

    let main_underscored = main_page_title.replace(' ', "_");
    for change in changes {
        let title = change
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if title.is_empty() {
            continue;
        }
        // Colon marks non-content namespaces: User:, Talk:, File:, etc.
        if title.contains(':') {
            continue;
        }
        if title == main_page_title || title == main_underscored {
            continue;
        }
        return Some(Project {
            title: title.to_string(),
            url: format!("/{}", title.replace(' ', "_")),
        });
    }
    None
}

/// Scrape the project index for internal links, dropping known non-content
/// namespaces and the index's own self-link, de-duplicated by URL with the
/// first occurrence winning.
fn scrape_index(html: &str, self_path: &str) -> Vec<Project> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s+href="([^"]+)"[^>]*>(.*?)</a>"#).expect("valid regex")
    });

    const EXCLUDED: [&str; 5] = ["Special:", "Help:", "Category:", "File:", "Talk:"];

    let mut seen = HashSet::new();
    let mut projects = Vec::new();
    for capture in re.captures_iter(html) {
        let href = &capture[1];
        if !href.starts_with('/') || href == self_path {
            continue;
        }
        if EXCLUDED.iter().any(|ns| href.contains(ns)) {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }
        projects.push(Project {
            title: strip_tags(&capture[2]),
            url: href.to_string(),
        });
    }
    projects
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn changes(titles: &[&str]) -> Value {
        json!({
            "query": {
                "recentchanges": titles
                    .iter()
                    .map(|t| json!({"title": t, "timestamp": "2024-01-01T00:00:00Z"}))
                    .collect::<Vec<_>>()
            }
        })
    }

    #[test]
    fn recency_skips_namespaced_and_main_page() {
        let doc = changes(&["User:Bob", "Main Page", "Widget Frame"]);
        assert_eq!(
            select_recent(&doc, "Main Page"),
            Some(Project {
                title: String::from("Widget Frame"),
                url: String::from("/Widget_Frame"),
            })
        );
    }

    #[test]
    fn recency_skips_underscored_main_page() {
        let doc = changes(&["Main_Page", "LED Cube"]);
        assert_eq!(
            select_recent(&doc, "Main Page").unwrap().url,
            "/LED_Cube"
        );
    }

    #[test]
    fn recency_exhausted_is_none() {
        let doc = changes(&["User:Bob", "Talk:Stuff", "Main Page"]);
        assert_eq!(select_recent(&doc, "Main Page"), None);
        assert_eq!(select_recent(&json!({}), "Main Page"), None);
    }

    #[test]
    fn scrape_filters_and_dedups() {
        let html = r#"
            <a href="/A">A first</a>
            <a href="/A" class="x">A again</a>
            <a href="/B"><b>B</b></a>
            <a href="/Special:RecentChanges">special</a>
            <a href="/Help:Editing">help</a>
            <a href="/Projects">self</a>
            <a href="https://elsewhere.example/C">external</a>
        "#;
        let projects = scrape_index(html, "/Projects");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0], Project { title: "A first".into(), url: "/A".into() });
        assert_eq!(projects[1], Project { title: "B".into(), url: "/B".into() });
    }

    #[test]
    fn random_pick_is_seed_deterministic() {
        let html = r#"<a href="/A">A</a><a href="/A">A</a><a href="/B">B</a>"#;
        let candidates = scrape_index(html, "/Projects");
        assert_eq!(candidates.len(), 2);

        let first = candidates.choose(&mut StdRng::seed_from_u64(0)).unwrap();
        let second = candidates.choose(&mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(first, second);
        assert!(candidates.contains(first));
    }

    #[test]
    fn empty_index_yields_no_candidates() {
        assert!(scrape_index("<p>nothing here</p>", "/Projects").is_empty());
    }
}
