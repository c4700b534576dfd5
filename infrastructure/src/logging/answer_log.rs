//! JSON Lines answer log.
//!
//! Each [`AnswerRecord`] is serialized on its own line. The file is opened
//! in append mode, so one log can span many sessions.

use qa_application::{AnswerLog, AnswerRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// [`AnswerLog`] backed by a `.jsonl` file
pub struct JsonlAnswerLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlAnswerLog {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &AnswerRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // Whole line in a single write
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("answer log lock poisoned"))?;
        file.write_all(&line)
    }
}

impl AnswerLog for JsonlAnswerLog {
    fn record(&self, record: &AnswerRecord) {
        if let Err(e) = self.append(record) {
            warn!("Could not write answer log {}: {}", self.path.display(), e);
        }
    }
}
