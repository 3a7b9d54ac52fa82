//! # Storage Layer
//!
//! Record collections are persisted as a **full JSON snapshot**: the whole
//! array is read at the start of an operation and the whole array is written
//! back after every mutation. There is no index and no append log; the
//! collections are small.
//!
//! ## Implementations
//!
//! - [`json::JsonFileStore`]: one JSON file per collection, overwritten
//!   atomically (temp file + rename).
//! - [`memory::InMemoryStore`]: keeps the serialized document in memory and
//!   goes through the same decode/encode path. Used by tests.
//! - [`lines::LineStore`]: newline-delimited text for the task list. It is not
//!   a [`DataStore`]; tasks are appended, never rewritten.
//!
//! ## Storage Format
//!
//! ```text
//! <data>/
//! ├── inventory.json      # [{"name", "price", "stock"}, ...]
//! ├── library.json        # [{"id", "title", "borrowed_by"}, ...]
//! └── tasks.txt           # one task per line
//! ```
//!
//! ## Asymmetric validation
//!
//! [`decode_records`] drops what it cannot normalize, [`encode_records`]
//! refuses to write anything it cannot normalize. Do not make them symmetric:
//! corrupt files must open as empty (or partial) stores, while a bug that
//! produces an invalid record must never reach the disk.

use crate::error::Result;
use crate::model::Record;
use serde_json::Value;
use tracing::{debug, warn};

pub mod json;
pub mod lines;
pub mod memory;

/// Abstract interface for a persisted record collection.
pub trait DataStore<R: Record> {
    /// Loads every record that passes normalization. Never fails on bad
    /// content; only on I/O errors other than "not found".
    fn load(&self) -> Result<Vec<R>>;

    /// Normalizes and overwrites the whole collection. Fails without touching
    /// the persisted state if any record is invalid.
    fn save(&mut self, records: &[R]) -> Result<()>;
}

/// Lenient decoding of a snapshot document.
///
/// Unparsable text or a non-array top level yields an empty list; array
/// elements that fail [`Record::from_raw`] are skipped.
pub fn decode_records<R: Record>(content: &str) -> Vec<R> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let document: Value = match serde_json::from_str(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(kind = R::KIND, error = %e, "corrupt store file, treating as empty");
            return Vec::new();
        }
    };
    let Value::Array(items) = document else {
        warn!(kind = R::KIND, "store file is not a JSON array, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| match R::from_raw(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(kind = R::KIND, position, error = %e, "dropping invalid record");
                None
            }
        })
        .collect()
}

/// Strict encoding of a snapshot document: 2-space indented JSON array.
pub fn encode_records<R: Record>(records: &[R]) -> Result<String> {
    let normalized = records
        .iter()
        .cloned()
        .map(Record::normalized)
        .collect::<Result<Vec<R>>>()?;
    Ok(serde_json::to_string_pretty(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;
    use crate::model::{Book, Product};

    #[test]
    fn corrupt_or_foreign_documents_decode_as_empty() {
        assert!(decode_records::<Product>("{not json").is_empty());
        assert!(decode_records::<Product>("").is_empty());
        assert!(decode_records::<Product>(r#"{"name": "A"}"#).is_empty());
    }

    #[test]
    fn invalid_elements_are_dropped_individually() {
        let doc = r#"[
            {"name": "Shirt", "price": 10, "stock": 2},
            {"name": "", "price": 10, "stock": 2},
            {"name": "Hat", "price": -1, "stock": 2},
            "garbage",
            {"name": "Socks", "price": "3.5", "stock": "4"}
        ]"#;
        let products: Vec<Product> = decode_records(doc);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Shirt", "Socks"]);
    }

    #[test]
    fn encoding_fails_on_any_invalid_record() {
        let mut bad = Book::new("A1", "Title").unwrap();
        bad.title = "   ".to_string();
        let records = vec![Book::new("B2", "Other").unwrap(), bad];
        assert!(matches!(encode_records(&records), Err(DrillError::Validation(_))));
    }

    #[test]
    fn encoding_uses_two_space_indent_and_field_order() {
        let text = encode_records(&[Product::new("Shirt", 1.5, 2).unwrap()]).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"name\": \"Shirt\",\n    \"price\": 1.5,\n    \"stock\": 2\n  }\n]"
        );
    }
}
