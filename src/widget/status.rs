// SPDX-License-Identifier: MPL-2.0

//! Space status and power draw
//!
//! Primary source is a SpaceAPI-style JSON endpoint. Wattage comes from the
//! structured payload's sensor arrays when present, otherwise from a
//! regex scrape of the human-readable main page. Every failure degrades to
//! partial or absent data; this module never surfaces an error.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::config::Config;
use crate::net::HttpClient;

/// One refresh's view of the space, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceStatus {
    pub open: bool,
    pub message: String,
    /// Epoch seconds of the last open/closed transition, if reported.
    pub lastchange: Option<i64>,
    /// Current power draw in watts, if any source produced one.
    pub watts: Option<f64>,
}

impl SpaceStatus {
    /// The status line as shown on the widget pill.
    pub fn label(&self) -> String {
        let state = if self.open { "OPEN" } else { "CLOSED" };
        if self.message.is_empty() {
            state.to_string()
        } else {
            format!("{state} · {}", self.message)
        }
    }
}

pub struct StatusFetcher<'a> {
    client: &'a HttpClient,
    config: &'a Config,
}

impl<'a> StatusFetcher<'a> {
    pub fn new(client: &'a HttpClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Fetch the current status. Returns `None` when neither source produced
    /// any data at all ("status unknown"); a partial record is returned
    /// otherwise, with an absent open-state coerced to closed.
    pub fn fetch(&self) -> Option<SpaceStatus> {
        let doc = match self.client.get_json(&self.config.status_url) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::debug!("spaceapi fetch failed: {e}");
                None
            }
        };

        let (open, message, lastchange) = doc
            .as_ref()
            .map(extract_state)
            .unwrap_or((None, String::new(), None));

        let mut watts = doc.as_ref().and_then(extract_watts);
        if watts.is_none() {
            watts = self.scrape_watts_fallback();
        }

        assemble(open, message, lastchange, watts)
    }

    fn scrape_watts_fallback(&self) -> Option<f64> {
        match self.client.get_text(&self.config.main_page_url()) {
            Ok(html) => scrape_watts(&html),
            Err(e) => {
                log::debug!("wattage scrape failed: {e}");
                None
            }
        }
    }
}

/// Combine what the sources yielded into a status record. When every field
/// is absent the whole status is unknown, never a zero-filled record; an
/// absent open-state in an otherwise populated record coerces to closed.
fn assemble(
    open: Option<bool>,
    message: String,
    lastchange: Option<i64>,
    watts: Option<f64>,
) -> Option<SpaceStatus> {
    if open.is_none() && watts.is_none() && message.is_empty() {
        return None;
    }
    Some(SpaceStatus {
        open: open == Some(true),
        message,
        lastchange,
        watts,
    })
}

/// Pull open-state, message, and last-change out of a SpaceAPI document.
/// Each field is extracted independently so one malformed field does not
/// discard the others.
fn extract_state(doc: &Value) -> (Option<bool>, String, Option<i64>) {
    let state = doc.get("state");
    let open = state.and_then(|s| s.get("open")).and_then(Value::as_bool);
    let message = state
        .and_then(|s| s.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let lastchange = state
        .and_then(|s| s.get("lastchange"))
        .and_then(Value::as_i64);
    (open, message, lastchange)
}

/// Sum every watt-unit reading across the three sensor arrays SpaceAPI feeds
/// are known to use. Note this sums, not maxes: a feed exposing the same
/// circuit under two arrays would be counted twice.
fn extract_watts(doc: &Value) -> Option<f64> {
    let sources = [
        doc.get("power_consumption"),
        doc.pointer("/sensors/power_consumption"),
        doc.pointer("/sensors/power"),
    ];

    let mut total = None;
    for entry in sources
        .iter()
        .filter_map(|s| s.and_then(Value::as_array))
        .flatten()
    {
        let unit = entry.get("unit").and_then(Value::as_str).unwrap_or("");
        if !unit.trim().eq_ignore_ascii_case("w") {
            continue;
        }
        if let Some(value) = entry.get("value").and_then(Value::as_f64) {
            *total.get_or_insert(0.0) += value;
        }
    }
    total
}

/// Extract a wattage from the human-readable status page.
fn scrape_watts(html: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)Power usage:\s*([0-9]+(?:\.[0-9]+)?)\s*W").expect("valid regex")
    });
    let value: f64 = re.captures(html)?.get(1)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Format a wattage for display: `"412 W"`, or `"n/a"` when absent.
pub fn format_watts(watts: Option<f64>) -> String {
    match watts {
        Some(w) if w.is_finite() => format!("{w:.0} W"),
        _ => String::from("n/a"),
    }
}

/// Render an epoch timestamp as a coarse relative age, largest unit first.
/// Future timestamps clamp to `0s ago`.
pub fn format_ago(epoch_seconds: i64, now: DateTime<Utc>) -> String {
    let diff = (now.timestamp() - epoch_seconds).max(0);
    let minutes = diff / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if minutes > 0 {
        format!("{minutes}m ago")
    } else {
        format!("{diff}s ago")
    }
}
