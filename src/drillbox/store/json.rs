use super::{decode_records, encode_records, DataStore};
use crate::error::{DrillError, Result};
use crate::model::Record;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// A record collection stored as a single JSON array file.
pub struct JsonFileStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> JsonFileStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(DrillError::Io)?;
            }
        }
        Ok(())
    }
}

impl<R: Record> DataStore<R> for JsonFileStore<R> {
    fn load(&self) -> Result<Vec<R>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            // Non UTF-8 bytes count as corruption, not as an I/O failure.
            Err(e) if e.kind() == ErrorKind::InvalidData => return Ok(Vec::new()),
            Err(e) => return Err(DrillError::Io(e)),
        };
        Ok(decode_records(&content))
    }

    fn save(&mut self, records: &[R]) -> Result<()> {
        // Encode first: an invalid record must fail before anything touches disk.
        let content = encode_records(records)?;
        self.ensure_parent()?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| R::KIND.to_string());
        let tmp_file = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(DrillError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(DrillError::Io(e));
        }

        debug!(kind = R::KIND, count = records.len(), path = %self.path.display(), "saved store");
        Ok(())
    }
}
