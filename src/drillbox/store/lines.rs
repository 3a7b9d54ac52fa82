use crate::error::{DrillError, Result};
use crate::model::Task;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Newline-delimited task file. Writes append; reads return every line.
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, task: &Task) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(DrillError::Io)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(DrillError::Io)?;
        writeln!(file, "{}", task).map_err(DrillError::Io)?;
        debug!(path = %self.path.display(), "appended task");
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DrillError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_one_line_per_task() {
        let dir = TempDir::new().unwrap();
        let mut store = LineStore::new(dir.path().join("data").join("tasks.txt"));
        assert!(store.read_all().unwrap().is_empty());

        store.append(&Task::parse("Estudiar  Python").unwrap()).unwrap();
        store.append(&Task::parse("Hacer\nejercicio").unwrap()).unwrap();

        assert_eq!(
            store.read_all().unwrap(),
            vec!["Estudiar Python".to_string(), "Hacer ejercicio".to_string()]
        );
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "Estudiar Python\nHacer ejercicio\n"
        );
    }
}
