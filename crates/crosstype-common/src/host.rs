//! Host abstraction for file access.
//!
//! The node graph itself never touches the file system. Parsers and compilers
//! that read sources or emit output go through a [`Host`], so tooling can
//! swap the real file system for an in-memory one.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by a [`Host`].
#[derive(Debug, Error)]
pub enum HostError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type HostResult<T> = Result<T, HostError>;

/// File access used by parsers and compilers.
pub trait Host {
    fn read_file(&self, file_name: &Path) -> HostResult<String>;

    fn write_file(&mut self, file_name: &Path, contents: &str) -> HostResult<()>;

    fn file_exists(&self, file_name: &Path) -> bool;

    /// Read several files, failing on the first error.
    fn read_files(&self, file_names: &[PathBuf]) -> HostResult<Vec<(PathBuf, String)>> {
        file_names
            .iter()
            .map(|name| Ok((name.clone(), self.read_file(name)?)))
            .collect()
    }

    /// Write several files in order, failing on the first error.
    fn write_files(&mut self, files: &[(PathBuf, String)]) -> HostResult<()> {
        for (name, contents) in files {
            self.write_file(name, contents)?;
        }
        Ok(())
    }
}

// =============================================================================
// FileSystemHost
// =============================================================================

/// [`Host`] backed by `std::fs`, resolving relative paths against `root`.
#[derive(Debug, Clone, Default)]
pub struct FileSystemHost {
    root: Option<PathBuf>,
}

impl FileSystemHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, file_name: &Path) -> PathBuf {
        match &self.root {
            Some(root) if file_name.is_relative() => root.join(file_name),
            _ => file_name.to_path_buf(),
        }
    }
}

impl Host for FileSystemHost {
    fn read_file(&self, file_name: &Path) -> HostResult<String> {
        let path = self.resolve(file_name);
        trace!(path = %path.display(), "host read");
        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                HostError::NotFound(path)
            } else {
                HostError::Read { path, source }
            }
        })
    }

    fn write_file(&mut self, file_name: &Path, contents: &str) -> HostResult<()> {
        let path = self.resolve(file_name);
        debug!(path = %path.display(), bytes = contents.len(), "host write");
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| HostError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| HostError::Write { path, source })
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.resolve(file_name).is_file()
    }
}

// =============================================================================
// MemoryHost
// =============================================================================

/// In-memory [`Host`], used by tests and by tooling that emits to a buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_name: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(file_name.into(), contents.into());
        self
    }

    pub fn file(&self, file_name: &Path) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Host for MemoryHost {
    fn read_file(&self, file_name: &Path) -> HostResult<String> {
        self.files
            .get(file_name)
            .cloned()
            .ok_or_else(|| HostError::NotFound(file_name.to_path_buf()))
    }

    fn write_file(&mut self, file_name: &Path, contents: &str) -> HostResult<()> {
        self.files
            .insert(file_name.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.files.contains_key(file_name)
    }
}

#[cfg(test)]
#[path = "../tests/host_tests.rs"]
mod host_tests;
