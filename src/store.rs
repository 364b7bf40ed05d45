//! Hierarchical byte store
//!
//! Storage of schema documents behind a narrow interface so the
//! schema/document core has zero dependency on storage mechanics.
//! Paths are relative, `/`-separated and normalized before use;
//! anything escaping above the store root is rejected. Two
//! implementations are provided: a rooted filesystem store and an
//! in-memory store for tests.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory
    Directory,
    /// A regular file
    File,
}

/// One entry in a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name
    pub name: String,
    /// Store-relative path of the entry
    pub path: String,
    /// Entry kind
    pub kind: EntryKind,
}

/// A resource retrieved from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// File contents
    File(Vec<u8>),
    /// Directory listing, directories before files
    Directory(Vec<DirEntry>),
}

/// Hierarchical byte store
pub trait ByteStore {
    /// Get a file's bytes or a directory's listing
    fn get(&self, path: &str) -> Result<Resource>;

    /// Write a file; the parent directory must exist
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Create a directory; the parent directory must exist
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Delete a file or a directory (recursively); the store root
    /// itself cannot be deleted
    fn delete(&mut self, path: &str) -> Result<()>;
}

/// Normalize a store path: drop empty and `.` segments, resolve `..`,
/// and reject paths escaping above the store root
pub fn normalize_path(path: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::Store(format!(
                        "path '{}' escapes the store root",
                        path
                    )));
                }
            }
            s => segments.push(s),
        }
    }
    Ok(segments.join("/"))
}

/// Store-relative path of the parent, empty for top-level entries
fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

// =============================================================================
// Filesystem store
// =============================================================================

/// Byte store rooted at a filesystem directory
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at the given directory; the directory
    /// itself must already exist
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<(String, PathBuf)> {
        let relative = normalize_path(path)?;
        let full = if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&relative)
        };
        Ok((relative, full))
    }
}

impl ByteStore for FsStore {
    fn get(&self, path: &str) -> Result<Resource> {
        let (relative, full) = self.resolve(path)?;

        if full.is_file() {
            return Ok(Resource::File(fs::read(&full).map_err(|e| {
                Error::Store(format!("failed to read '{}': {}", relative, e))
            })?));
        }
        if !full.is_dir() {
            return Err(Error::Store(format!("'{}' not found", relative)));
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        let entries = fs::read_dir(&full)
            .map_err(|e| Error::Store(format!("failed to list '{}': {}", relative, e)))?;
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::Store(format!("failed to list '{}': {}", relative, e)))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let child_path = if relative.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", relative, name)
            };
            if entry.path().is_dir() {
                dirs.push(DirEntry {
                    name,
                    path: child_path,
                    kind: EntryKind::Directory,
                });
            } else {
                files.push(DirEntry {
                    name,
                    path: child_path,
                    kind: EntryKind::File,
                });
            }
        }

        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.extend(files);
        Ok(Resource::Directory(dirs))
    }

    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let (relative, full) = self.resolve(path)?;
        if relative.is_empty() {
            return Err(Error::Store("cannot write to the store root".into()));
        }

        let parent = full.parent().unwrap_or(&self.root);
        if !parent.is_dir() {
            return Err(Error::Store(format!(
                "parent directory of '{}' does not exist",
                relative
            )));
        }

        fs::write(&full, bytes)
            .map_err(|e| Error::Store(format!("failed to write '{}': {}", relative, e)))?;
        debug!(path = %relative, bytes = bytes.len(), "stored file");
        Ok(())
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let (relative, full) = self.resolve(path)?;
        if relative.is_empty() {
            return Err(Error::Store("the store root already exists".into()));
        }

        fs::create_dir(&full).map_err(|e| {
            Error::Store(format!("failed to create directory '{}': {}", relative, e))
        })?;
        debug!(path = %relative, "created directory");
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let (relative, full) = self.resolve(path)?;
        if relative.is_empty() {
            return Err(Error::Store("cannot delete the store root".into()));
        }

        if full.is_file() {
            fs::remove_file(&full)
                .map_err(|e| Error::Store(format!("failed to delete '{}': {}", relative, e)))?;
        } else if full.is_dir() {
            fs::remove_dir_all(&full)
                .map_err(|e| Error::Store(format!("failed to delete '{}': {}", relative, e)))?;
        } else {
            return Err(Error::Store(format!("'{}' not found", relative)));
        }
        debug!(path = %relative, "deleted");
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory byte store, primarily for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn dir_exists(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }
}

impl ByteStore for MemoryStore {
    fn get(&self, path: &str) -> Result<Resource> {
        let relative = normalize_path(path)?;

        if let Some(bytes) = self.files.get(&relative) {
            return Ok(Resource::File(bytes.clone()));
        }
        if !self.dir_exists(&relative) {
            return Err(Error::Store(format!("'{}' not found", relative)));
        }

        let child_name = |p: &str| p.rsplit('/').next().unwrap_or(p).to_string();
        let mut entries: Vec<DirEntry> = self
            .dirs
            .iter()
            .filter(|p| parent_of(p) == relative)
            .map(|p| DirEntry {
                name: child_name(p),
                path: p.clone(),
                kind: EntryKind::Directory,
            })
            .collect();
        entries.extend(
            self.files
                .keys()
                .filter(|p| parent_of(p) == relative)
                .map(|p| DirEntry {
                    name: child_name(p),
                    path: p.clone(),
                    kind: EntryKind::File,
                }),
        );
        Ok(Resource::Directory(entries))
    }

    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let relative = normalize_path(path)?;
        if relative.is_empty() {
            return Err(Error::Store("cannot write to the store root".into()));
        }
        if self.dirs.contains(&relative) {
            return Err(Error::Store(format!("'{}' is a directory", relative)));
        }
        if !self.dir_exists(parent_of(&relative)) {
            return Err(Error::Store(format!(
                "parent directory of '{}' does not exist",
                relative
            )));
        }

        self.files.insert(relative.clone(), bytes.to_vec());
        debug!(path = %relative, bytes = bytes.len(), "stored file");
        Ok(())
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let relative = normalize_path(path)?;
        if relative.is_empty() {
            return Err(Error::Store("the store root already exists".into()));
        }
        if self.dirs.contains(&relative) || self.files.contains_key(&relative) {
            return Err(Error::Store(format!("'{}' already exists", relative)));
        }
        if !self.dir_exists(parent_of(&relative)) {
            return Err(Error::Store(format!(
                "parent directory of '{}' does not exist",
                relative
            )));
        }

        self.dirs.insert(relative.clone());
        debug!(path = %relative, "created directory");
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let relative = normalize_path(path)?;
        if relative.is_empty() {
            return Err(Error::Store("cannot delete the store root".into()));
        }

        if self.files.remove(&relative).is_some() {
            debug!(path = %relative, "deleted");
            return Ok(());
        }
        if self.dirs.remove(&relative) {
            let prefix = format!("{}/", relative);
            self.files.retain(|p, _| !p.starts_with(&prefix));
            self.dirs.retain(|p| !p.starts_with(&prefix));
            debug!(path = %relative, "deleted");
            return Ok(());
        }

        Err(Error::Store(format!("'{}' not found", relative)))
    }
}
