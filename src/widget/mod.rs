// SPDX-License-Identifier: MPL-2.0

//! Widget module organization

pub mod history;
pub mod page;
pub mod projects;
pub mod sparkline;
pub mod status;

pub use history::HistoryStore;
pub use projects::ProjectPicker;
pub use status::StatusFetcher;
