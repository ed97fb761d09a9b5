//! File-backed update cursor.
//!
//! A single decimal integer, the highest update id fully processed. Read
//! once at the start of a run, written once at the end; there is no lock on
//! the file, so overlapping scheduled runs are a known hazard (runs are not
//! expected to overlap).

use std::{fs, path::PathBuf};

use crate::Result;

pub struct CursorStore {
    path: PathBuf,
}

impl CursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Last saved update id; 0 when the file is missing, empty or corrupt.
    pub fn load(&self) -> i64 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse::<i64>().unwrap_or(0).max(0),
            Err(_) => 0,
        }
    }

    /// Persist the cursor. The caller logs failures and continues; a lost
    /// write only means some updates are seen again next run (at-least-once).
    pub fn save(&self, id: i64) -> Result<()> {
        fs::write(&self.path, id.to_string())?;
        Ok(())
    }
}
