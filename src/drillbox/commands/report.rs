//! Student/course report generation.
//!
//! Students come from a CSV with `name` and `courses` columns, where
//! `courses` is a `;`-separated list of course ids. Course names come from a
//! JSON file, either `{"PY": "Python"}` or `[{"id": "PY", "name": "Python"}]`.
//! Unknown course ids are dropped from the report.

use crate::commands::{CmdMessage, CmdResult, DrillPaths};
use crate::error::{DrillError, Result};
use crate::filter::{filter, known_course};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 2] = ["name", "courses"];
const NO_COURSES: &str = "(no courses)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub name: String,
    pub courses: Vec<String>,
}

fn read_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DrillError::NotFound(format!("file '{}'", path.display())),
        _ => DrillError::Io(e),
    })?;
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

fn split_courses(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_students(path: &Path) -> Result<Vec<Student>> {
    let content = read_text(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(name_at), Some(courses_at)) = (column("name"), column("courses")) else {
        return Err(DrillError::Validation(format!(
            "students csv needs columns {}; found: {}",
            REQUIRED_COLUMNS.join(", "),
            headers.join(", ")
        )));
    };

    let mut students = Vec::new();
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_at).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }
        students.push(Student {
            name: name.to_string(),
            courses: split_courses(row.get(courses_at).unwrap_or_default()),
        });
    }
    Ok(students)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Reads the course id → name table.
pub fn read_courses(path: &Path) -> Result<HashMap<String, String>> {
    let document: Value = serde_json::from_str(&read_text(path)?)?;
    match document {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(id, name)| scalar_text(&name).map(|name| (id, name)))
            .collect()),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| {
                let id = item.get("id").and_then(scalar_text)?;
                let name = item.get("name").and_then(scalar_text)?;
                Some((id, name))
            })
            .collect()),
        _ => Err(DrillError::Validation(
            "courses json must be an object or a list of {id, name}".to_string(),
        )),
    }
}

/// One `"<name>: <course, course>"` line per student, newline-terminated.
pub fn generate_report(students: &[Student], courses: &HashMap<String, String>) -> String {
    let mut lines = Vec::with_capacity(students.len());
    for student in students {
        let known = filter(&student.courses, known_course(courses));
        let names: Vec<&str> = known
            .iter()
            .filter_map(|id| courses.get(id).map(String::as_str))
            .collect();
        let listing = if names.is_empty() {
            NO_COURSES.to_string()
        } else {
            names.join(", ")
        };
        lines.push(format!("{}: {}", student.name, listing));
    }
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn save_report(text: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    debug!(path = %path.display(), bytes = text.len(), "report written");
    Ok(())
}

pub fn run(
    paths: &DrillPaths,
    students_csv: &Path,
    courses_json: &Path,
    out: Option<PathBuf>,
    print_only: bool,
) -> Result<CmdResult> {
    let students = read_students(&paths.resolve_input(students_csv))?;
    let courses = read_courses(&paths.resolve_input(courses_json))?;
    let report = generate_report(&students, &courses);

    let mut result = CmdResult::default();
    if students.is_empty() {
        result.add_message(CmdMessage::warning("No students found."));
    }
    if !print_only {
        let target = out.unwrap_or_else(|| paths.report());
        save_report(&report, &target)?;
        result.add_message(CmdMessage::success(format!(
            "Report saved to {}",
            target.display()
        )));
    }
    Ok(result.with_report(report))
}
