use crate::commands::{CmdMessage, CmdResult, DrillPaths};
use crate::error::{DrillError, Result};
use crate::normalize::{parse_decimal, round2};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

const BOM: &str = "\u{feff}";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// Number of numeric cells that contributed.
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Summarizes one numeric column of a headed CSV file. Cells that are empty or
/// not numeric are skipped; `,` is accepted as the decimal separator.
pub fn analyze_column(path: &Path, column: &str) -> Result<ColumnStats> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            DrillError::NotFound(format!("csv file '{}'", path.display()))
        }
        _ => DrillError::Io(e),
    })?;
    let mut content = String::new();
    BufReader::new(file).read_to_string(&mut content)?;
    analyze_text(content.strip_prefix(BOM).unwrap_or(&content), column)
}

fn analyze_text(content: &str, column: &str) -> Result<ColumnStats> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DrillError::Validation("csv has no header row".to_string()));
    }
    let wanted = column.trim();
    let index = headers.iter().position(|h| h == wanted).ok_or_else(|| {
        DrillError::Validation(format!(
            "column '{}' not found; available columns: {}",
            wanted,
            headers.join(", ")
        ))
    })?;

    let mut values = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row?;
        match row.get(index).and_then(parse_decimal) {
            Some(v) => values.push(v),
            None => skipped += 1,
        }
    }
    debug!(column = wanted, valid = values.len(), skipped, "analyzed csv column");

    if values.is_empty() {
        return Err(DrillError::Validation(format!(
            "column '{}' has no numeric values",
            wanted
        )));
    }
    let sum: f64 = values.iter().sum();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(ColumnStats {
        column: wanted.to_string(),
        count: values.len(),
        mean: round2(sum / values.len() as f64),
        max: round2(max),
        min: round2(min),
    })
}

pub fn run(paths: &DrillPaths, csv_path: &Path, column: &str) -> Result<CmdResult> {
    let resolved = paths.resolve_input(csv_path);
    let stats = analyze_column(&resolved, column)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} numeric value(s) in '{}' ({})",
        stats.count,
        stats.column,
        resolved.display()
    )));
    Ok(result.with_stats(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_non_numeric_cells() {
        let stats = analyze_text("name,age\nAna,20\nLuis,x\nMarta,22.5\n", "age").unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.max, 22.5);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.mean, 21.25);
    }

    #[test]
    fn no_numeric_cells_is_a_validation_error() {
        let err = analyze_text("name,age\nAna,\nLuis,x\n", "age").unwrap_err();
        assert!(matches!(err, DrillError::Validation(_)));
    }

    #[test]
    fn missing_column_names_it_and_lists_available() {
        let err = analyze_text("name, age\nAna,20\n", "grade").unwrap_err();
        match err {
            DrillError::Validation(msg) => {
                assert!(msg.contains("'grade'"));
                assert!(msg.contains("name, age"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn comma_decimals_bom_and_padded_headers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("grades.csv");
        fs::write(&path, "\u{feff}name , grade \nAna,\"3,5\"\nLuis, 4.5 \n").unwrap();
        let stats = analyze_column(&path, "grade").unwrap();
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.max, 4.5);
        assert_eq!(stats.min, 3.5);
    }

    #[test]
    fn empty_file_has_no_header() {
        assert!(matches!(analyze_text("", "age"), Err(DrillError::Validation(_))));
    }

    #[test]
    fn run_resolves_relative_paths_in_data_dir() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("ages.csv"), "age\n10\n30\n").unwrap();
        let paths = DrillPaths::new(temp.path());
        let result = run(&paths, Path::new("ages.csv"), "age").unwrap();
        assert_eq!(result.stats.unwrap().mean, 20.0);

        let missing = run(&paths, Path::new("absent.csv"), "age").unwrap_err();
        assert!(matches!(missing, DrillError::NotFound(_)));
    }
}
