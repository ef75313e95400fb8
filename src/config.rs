// SPDX-License-Identifier: MPL-2.0

//! Widget configuration
//!
//! One `Config` value is loaded per refresh and threaded through the
//! components; there is no global mutable state. The file lives in the user
//! config directory and is optional — a missing or malformed file falls back
//! to the compiled defaults, which reproduce the original Nurdspace setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

const CONFIG_DIR: &str = "space-widget";
const CONFIG_FILE: &str = "config.json";

/// How the featured project is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectMode {
    /// Most recently edited content page from the wiki's recent-changes feed.
    Latest,
    /// Uniform random pick from the scraped project index.
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base origin of the wiki, no trailing slash.
    pub wiki_base: String,
    /// Path of the project index page on the wiki.
    pub projects_path: String,
    /// Title of the wiki's home page, excluded from project candidates.
    pub main_page_title: String,
    /// SpaceAPI-style structured status endpoint.
    pub status_url: String,
    pub project_mode: ProjectMode,
    pub theme: Theme,
    /// Maximum number of retained power samples.
    pub history_capacity: usize,
    /// Result-count limit for the recent-changes query.
    pub recent_changes_limit: u32,
    /// Sparkline image dimensions in pixels.
    pub sparkline_width: i32,
    pub sparkline_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki_base: String::from("https://nurdspace.nl"),
            projects_path: String::from("/Projects"),
            main_page_title: String::from("Main Page"),
            status_url: String::from("https://space.nurdspace.nl/spaceapi/status.json"),
            project_mode: ProjectMode::Latest,
            theme: Theme::Cga,
            history_capacity: 48,
            recent_changes_limit: 50,
            sparkline_width: 120,
            sparkline_height: 22,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if it is missing or
    /// does not parse.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn file_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// The wiki home page, also the wattage-scrape fallback source.
    pub fn main_page_url(&self) -> String {
        format!(
            "{}/{}",
            self.wiki_base,
            self.main_page_title.replace(' ', "_")
        )
    }

    pub fn projects_url(&self) -> String {
        format!("{}{}", self.wiki_base, self.projects_path)
    }

    pub fn recent_changes_url(&self) -> String {
        format!(
            "{}/api.php?action=query&list=recentchanges&rcnamespace=0&rclimit={}&rcprop=title|timestamp&format=json",
            self.wiki_base, self.recent_changes_limit
        )
    }

    /// Resolve a possibly relative or protocol-relative URL against the wiki.
    pub fn absolutize(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else if url.starts_with("//") {
            format!("https:{url}")
        } else {
            format!("{}{}", self.wiki_base, url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_space() {
        let config = Config::default();
        assert_eq!(config.main_page_url(), "https://nurdspace.nl/Main_Page");
        assert_eq!(config.projects_url(), "https://nurdspace.nl/Projects");
        assert_eq!(config.history_capacity, 48);
        assert!(config.recent_changes_url().contains("rcnamespace=0"));
        assert!(config.recent_changes_url().contains("rclimit=50"));
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"project_mode": "random", "theme": "light-crt"}"#).unwrap();
        assert_eq!(config.project_mode, ProjectMode::Random);
        assert_eq!(config.theme, Theme::LightCrt);
        assert_eq!(config.wiki_base, "https://nurdspace.nl");
    }

    #[test]
    fn absolutize_variants() {
        let config = Config::default();
        assert_eq!(
            config.absolutize("https://example.org/x.png"),
            "https://example.org/x.png"
        );
        assert_eq!(
            config.absolutize("//nurdspace.nl/images/x.png"),
            "https://nurdspace.nl/images/x.png"
        );
        assert_eq!(
            config.absolutize("/images/x.png"),
            "https://nurdspace.nl/images/x.png"
        );
    }
}
