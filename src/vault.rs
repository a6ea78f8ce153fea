//! Vault layout and filesystem primitives.
//!
//! A vault is a directory tree holding one markdown file per task:
//!
//! ```text
//! <root>/
//!   tasks/            # active store
//!   tasks/completed/  # completed store
//!   archive/          # archived records
//! ```
//!
//! All operations are synchronous. Rewrites go through a temp-file + rename
//! so a reader never observes a partial write.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File extension for task and record files.
pub const TASK_EXT: &str = "md";

/// Resolved vault directory layout.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    active: PathBuf,
    completed: PathBuf,
    archive: PathBuf,
}

impl Vault {
    /// Build a vault from a root and store paths; relative store paths
    /// resolve against the root.
    pub fn new(
        root: impl Into<PathBuf>,
        active: impl AsRef<Path>,
        completed: impl AsRef<Path>,
        archive: impl AsRef<Path>,
    ) -> Self {
        let root = root.into();
        Self {
            active: root.join(active.as_ref()),
            completed: root.join(completed.as_ref()),
            archive: root.join(archive.as_ref()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding not-yet-completed tasks.
    pub fn active_dir(&self) -> &Path {
        &self.active
    }

    /// Directory holding completed tasks pending retention expiry.
    pub fn completed_dir(&self) -> &Path {
        &self.completed
    }

    /// Directory holding archived records.
    pub fn archive_dir(&self) -> &Path {
        &self.archive
    }

    /// Create the vault directory skeleton.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.active)?;
        fs::create_dir_all(&self.completed)?;
        fs::create_dir_all(&self.archive)?;
        Ok(())
    }

    /// Check whether all store directories exist.
    pub fn is_initialized(&self) -> bool {
        self.active.is_dir() && self.completed.is_dir() && self.archive.is_dir()
    }

    /// List the task files in a store directory, sorted by name.
    ///
    /// Subdirectories and files without the task extension are skipped.
    /// An unreadable directory fails the whole listing.
    pub fn list_task_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(TASK_EXT) {
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}

/// Path of the file backing a task titled `title` under `dir`.
pub fn task_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{title}.{TASK_EXT}"))
}

/// Read a task file to a string.
pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write data atomically using temp file + rename.
///
/// The file is either fully written or not written at all.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Remove the file backing a task under `dir`.
///
/// A missing file is an error: the caller believed it owned a task there.
pub fn remove_task_file(dir: &Path, title: &str) -> Result<()> {
    let path = task_path(dir, title);
    if !path.exists() {
        return Err(Error::FileNotFound {
            name: format!("{title}.{TASK_EXT}"),
            dir: dir.to_path_buf(),
        });
    }
    fs::remove_file(&path)?;
    Ok(())
}
