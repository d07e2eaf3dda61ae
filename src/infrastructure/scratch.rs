//! Scratch Storage
//!
//! Resource payloads are relayed through a local directory: downloaded from
//! the source, then uploaded to the destination. Each staged file is owned by
//! a `ScratchFile` guard and removed when the guard goes away, whichever way
//! the transfer ended.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

/// Directory used to stage payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the directory (and parents) if it does not exist yet
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Reserve the staging path for one resource payload.
    ///
    /// Nothing is created on disk until something writes to the path.
    pub fn stage(&self, resource_id: &str, url: &str) -> ScratchFile {
        let path = self.root.join(scratch_file_name(resource_id, url));
        ScratchFile {
            path: TempPath::from_path(path),
        }
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new(".")
    }
}

/// A staged payload file, deleted on drop
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now and report failure.
    ///
    /// Dropping the guard also removes the file but swallows errors; use this
    /// on the success path so a failed removal is not silent.
    pub fn release(self) -> io::Result<()> {
        self.path.close()
    }
}

/// `<resource id>-<last path segment of url>`
///
/// Path separators in either part are replaced by `_`, so the name is always
/// a single component inside the scratch directory.
pub fn scratch_file_name(resource_id: &str, url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let basename = path.rsplit('/').next().unwrap_or(path);
    format!("{}-{}", flatten(resource_id), flatten(basename))
}

fn flatten(segment: &str) -> String {
    segment.replace(['/', '\\'], "_")
}
