//! Model store backends.
//!
//! `FileModelStore` keeps the blob as one JSON document on disk and replaces it
//! atomically. `MemoryModelStore` keeps the serialized blob in process and is
//! what the tests run against.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use menurec_core::error::{Error, Result};
use menurec_core::traits::ModelStore;
use menurec_core::types::TfIdfModel;
use tempfile::NamedTempFile;
use tracing::debug;

pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelStore for FileModelStore {
    fn load(&self) -> Option<TfIdfModel> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!(path = %self.path.display(), error = %e, "cannot read cached model");
                }
                return None;
            }
        };
        parse_blob(&raw)
    }

    fn save(&self, model: &TfIdfModel) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let bytes = serde_json::to_vec(model)?;
        // write beside the target, then rename over it
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(&bytes).map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(&self.path).map_err(|e| Error::io(&self.path, e.error))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved tf-idf model");
        Ok(())
    }
}

/// In-process blob store.
///
/// Holds the serialized document rather than the struct so loads go through
/// the same parsing as the file store.
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    blob: Mutex<Option<String>>,
    fail_saves: bool,
    saves: AtomicUsize,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `raw` as the stored document, well-formed or not.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self { blob: Mutex::new(Some(raw.into())), ..Self::default() }
    }

    /// A store whose every save fails.
    pub fn failing() -> Self {
        Self { fail_saves: true, ..Self::default() }
    }

    pub fn raw(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|b| b.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ModelStore for MemoryModelStore {
    fn load(&self) -> Option<TfIdfModel> {
        let raw = self.raw()?;
        parse_blob(&raw)
    }

    fn save(&self, model: &TfIdfModel) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Operation("memory store rejects writes".to_string()));
        }
        let raw = serde_json::to_string(model)?;
        let mut blob = self
            .blob
            .lock()
            .map_err(|_| Error::Operation("memory store lock poisoned".to_string()))?;
        *blob = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn parse_blob(raw: &str) -> Option<TfIdfModel> {
    match serde_json::from_str(raw) {
        Ok(model) => Some(model),
        Err(e) => {
            debug!(error = %e, "stored model blob has an unexpected shape; ignoring");
            None
        }
    }
}
