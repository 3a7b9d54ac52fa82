//! # Command Layer
//!
//! Business logic for every drillbox operation. Each command is a plain
//! function over a store (or a path) that returns a [`CmdResult`]: the records
//! it listed or touched, plus user-facing [`CmdMessage`]s.
//!
//! Commands never print, never prompt and never exit. They validate before
//! mutating and persist before returning, so a failed command leaves the store
//! as it was.
//!
//! ## Testing
//!
//! Store-backed commands are tested against [`crate::store::memory`] fixtures;
//! the CSV and report commands use `tempfile` directories.
//!
//! ## Modules
//!
//! - [`inventory`]: products, stock top-ups and sales
//! - [`library`]: books and the loan state machine
//! - [`tasks`]: the append-only task list
//! - [`analyze`]: numeric column statistics over a CSV file
//! - [`report`]: student/course report generation
//! - [`config`]: show and set [`DrillConfig`] values
//! - [`helpers`]: keyed lookup, upsert and search shared by the record commands

use crate::config::DrillConfig;
use crate::model::{Book, Product};
use serde::Serialize;
use std::path::PathBuf;

pub mod analyze;
pub mod config;
pub mod helpers;
pub mod inventory;
pub mod library;
pub mod report;
pub mod tasks;

pub use analyze::ColumnStats;

/// Locations of every file drillbox owns, all under one data directory.
#[derive(Debug, Clone)]
pub struct DrillPaths {
    pub data_dir: PathBuf,
}

impl DrillPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn inventory(&self) -> PathBuf {
        self.data_dir.join("inventory.json")
    }

    pub fn library(&self) -> PathBuf {
        self.data_dir.join("library.json")
    }

    pub fn tasks(&self) -> PathBuf {
        self.data_dir.join("tasks.txt")
    }

    pub fn report(&self) -> PathBuf {
        self.data_dir.join("report.txt")
    }

    /// Resolves a user-supplied input file: the path as given if it exists,
    /// otherwise the same relative path inside the data directory.
    pub fn resolve_input(&self, given: &std::path::Path) -> PathBuf {
        if given.exists() || given.is_absolute() {
            return given.to_path_buf();
        }
        let inside = self.data_dir.join(given);
        if inside.exists() {
            inside
        } else {
            given.to_path_buf()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub products: Vec<Product>,
    pub books: Vec<Book>,
    pub tasks: Vec<String>,
    pub stats: Option<ColumnStats>,
    pub report: Option<String>,
    pub config: Option<DrillConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<String>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_stats(mut self, stats: ColumnStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_report(mut self, report: String) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_config(mut self, config: DrillConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn data_files_live_under_the_data_dir() {
        let paths = DrillPaths::new("/tmp/drill");
        assert_eq!(paths.inventory(), PathBuf::from("/tmp/drill/inventory.json"));
        assert_eq!(paths.tasks(), PathBuf::from("/tmp/drill/tasks.txt"));
    }

    #[test]
    fn resolve_input_falls_back_to_data_dir() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("grades.csv"), "x\n").unwrap();
        let paths = DrillPaths::new(temp.path());

        let resolved = paths.resolve_input(std::path::Path::new("grades.csv"));
        assert_eq!(resolved, temp.path().join("grades.csv"));

        let missing = paths.resolve_input(std::path::Path::new("nope.csv"));
        assert_eq!(missing, PathBuf::from("nope.csv"));
    }
}
