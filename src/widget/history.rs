// SPDX-License-Identifier: MPL-2.0

//! Persisted power history
//!
//! A bounded FIFO buffer of watt samples backing the sparkline, stored as a
//! small JSON document (`{"values": [..]}`) in the application data
//! directory. The store is the only writer of that file. Read and write
//! failures are swallowed: the widget must render with whatever is in
//! memory even when the disk copy is stale or unreadable.

use std::path::PathBuf;

use serde_json::{Value, json};

const DATA_DIR: &str = "space-widget";
const HISTORY_FILE: &str = "power_history.json";

/// Ordered watt samples, oldest first. Length never exceeds the store's
/// capacity; only finite values are retained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerHistory {
    pub values: Vec<f64>,
}

pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(path: PathBuf, capacity: usize) -> Self {
        Self { path, capacity }
    }

    /// Store under the platform data directory, or the current directory if
    /// the platform reports none.
    pub fn open_default(capacity: usize) -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(DATA_DIR).join(HISTORY_FILE), capacity)
    }

    /// Read the persisted history. A missing file, unreadable file,
    /// malformed JSON, or a `values` field that is not an array all yield an
    /// empty history; non-finite entries are dropped.
    pub fn load(&self) -> PowerHistory {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return PowerHistory::default(),
        };
        let doc: Value = match serde_json::from_str(&contents) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("corrupt history {}: {}", self.path.display(), e);
                return PowerHistory::default();
            }
        };
        let values = match doc.get("values").and_then(Value::as_array) {
            Some(values) => values,
            None => return PowerHistory::default(),
        };
        PowerHistory {
            values: values
                .iter()
                .filter_map(Value::as_f64)
                .filter(|v| v.is_finite())
                .collect(),
        }
    }

    /// Append one sample, evicting from the front once over capacity.
    pub fn append(&self, history: &mut PowerHistory, sample: f64) {
        history.values.push(sample);
        if history.values.len() > self.capacity {
            let excess = history.values.len() - self.capacity;
            history.values.drain(..excess);
        }
    }

    /// Write the history back to disk, truncating to capacity again even if
    /// the caller skipped `append`. Failures are logged and ignored.
    pub fn save(&self, history: &PowerHistory) {
        let start = history.values.len().saturating_sub(self.capacity);
        let doc = json!({ "values": &history.values[start..] });

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("cannot create {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, doc.to_string()) {
            log::warn!("cannot write {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"), 48)
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), PowerHistory::default());
    }

    #[test]
    fn append_evicts_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut history = PowerHistory::default();
        for i in 0..60 {
            store.append(&mut history, i as f64);
        }
        assert_eq!(history.values.len(), 48);
        assert_eq!(history.values[0], 12.0);
        assert_eq!(*history.values.last().unwrap(), 59.0);
    }

    #[test]
    fn load_tolerates_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(dir.path().join("history.json"), "{not json").unwrap();
        assert_eq!(store.load(), PowerHistory::default());

        std::fs::write(dir.path().join("history.json"), r#"{"values": 7}"#).unwrap();
        assert_eq!(store.load(), PowerHistory::default());

        // Non-numeric and non-finite entries are filtered, not propagated.
        std::fs::write(
            dir.path().join("history.json"),
            r#"{"values": [1.0, "NaN", null, 2.0]}"#,
        )
        .unwrap();
        assert_eq!(store.load().values, vec![1.0, 2.0]);
    }

    #[test]
    fn save_truncates_defensively() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"), 4);
        let history = PowerHistory {
            values: (0..10).map(f64::from).collect(),
        };
        store.save(&history);
        assert_eq!(store.load().values, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn round_trip_keeps_last_sample() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut history = store.load();
        store.append(&mut history, 412.0);
        store.save(&history);
        assert_eq!(store.load().values.last(), Some(&412.0));
    }

    #[test]
    fn save_failure_is_swallowed() {
        // A directory at the file path makes the write fail.
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().to_path_buf(), 48);
        store.save(&PowerHistory {
            values: vec![1.0],
        });
    }
}
