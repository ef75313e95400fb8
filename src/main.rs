// SPDX-License-Identifier: MPL-2.0

//! One widget refresh
//!
//! The host (a cron job, timer, or widget shell) invokes this binary once
//! per refresh. It acquires the space status and a featured project, rolls
//! the power history forward, renders the sparkline, and leaves the render
//! artifacts in the output directory for the host to lay out. There is no
//! fatal path for data acquisition: the worst case is an unknown status, an
//! empty sparkline, and no project.

mod config;
mod error;
mod net;
mod theme;
mod widget;

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Utc;

use config::Config;
use net::HttpClient;
use widget::page::{self, PageSummary};
use widget::projects::Project;
use widget::sparkline;
use widget::status::{self, SpaceStatus};
use widget::{HistoryStore, ProjectPicker, StatusFetcher};

const SPARKLINE_FILE: &str = "sparkline.png";
const PROJECT_IMAGE_FILE: &str = "project-image";

fn main() {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::load();
    let client = HttpClient::new();
    refresh(&client, &config, &out_dir);
}

fn refresh(client: &HttpClient, config: &Config, out_dir: &Path) {
    let space = StatusFetcher::new(client, config).fetch();
    print_status(space.as_ref());

    update_sparkline(config, space.as_ref(), out_dir);

    let picked = ProjectPicker::new(client, config).pick(&mut rand::thread_rng());
    match picked {
        Some(project) => feature_project(client, config, &project, out_dir),
        None => println!("No projects found"),
    }
}

fn print_status(space: Option<&SpaceStatus>) {
    let Some(space) = space else {
        println!("STATUS UNKNOWN");
        return;
    };
    match space.lastchange {
        Some(epoch) => println!(
            "{} ({})",
            space.label(),
            status::format_ago(epoch, Utc::now())
        ),
        None => println!("{}", space.label()),
    }
    println!("Power usage: {}", status::format_watts(space.watts));
}

/// Roll the history forward with this refresh's reading (if any) and render
/// the sparkline from whatever the buffer holds.
fn update_sparkline(config: &Config, space: Option<&SpaceStatus>, out_dir: &Path) {
    let store = HistoryStore::open_default(config.history_capacity);
    let mut history = store.load();
    if let Some(watts) = space.and_then(|s| s.watts).filter(|w| w.is_finite()) {
        store.append(&mut history, watts);
        store.save(&history);
    }

    let palette = config.theme.palette();
    let surface = sparkline::render(
        &history.values,
        config.sparkline_width,
        config.sparkline_height,
        palette.accent,
    );
    let path = out_dir.join(SPARKLINE_FILE);
    match File::create(&path) {
        Ok(mut file) => {
            if let Err(e) = surface.write_to_png(&mut file) {
                log::warn!("cannot write {}: {}", path.display(), e);
            }
        }
        Err(e) => log::warn!("cannot create {}: {}", path.display(), e),
    }
}

fn feature_project(client: &HttpClient, config: &Config, project: &Project, out_dir: &Path) {
    let url = config.absolutize(&project.url);

    let summary = match client.get_text(&url) {
        Ok(body) => page::extract(&body, config),
        Err(e) => {
            log::debug!("project page fetch failed: {e}");
            PageSummary::default()
        }
    };

    let title = summary
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            if project.title.is_empty() {
                "Untitled"
            } else {
                &project.title
            }
        });
    println!("Project: {title} ({url})");

    if let Some(image_url) = &summary.image_url {
        download_project_image(client, config, image_url, out_dir);
    }
}

/// Fetch the raw project image bytes for the host to decode and place. A
/// failed download degrades to the same placeholder as an absent image.
fn download_project_image(client: &HttpClient, config: &Config, image_url: &str, out_dir: &Path) {
    let referer = format!("{}/", config.wiki_base);
    match client.get_image(image_url, &referer) {
        Ok(bytes) => {
            let path = out_dir.join(PROJECT_IMAGE_FILE);
            if let Err(e) = std::fs::write(&path, bytes) {
                log::warn!("cannot write {}: {}", path.display(), e);
            }
        }
        Err(e) => log::debug!("project image fetch failed: {e}"),
    }
}
