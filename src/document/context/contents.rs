//! # Contents Backends
//!
//! Persistence backends a context loads from and saves to.
//!
//! ```text
//! Production:  Context ──▶ FileContentsManager   ──▶ tokio::fs under a root directory
//! Testing:     Context ──▶ MemoryContentsManager ──▶ HashMap<String, String>
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use super::paths::local_path;
use crate::document::errors::{DocumentError, Result};

/// A file as seen by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    pub path: String,
    pub content: String,
    pub last_modified: Option<SystemTime>,
}

/// Persistence backend abstraction
#[allow(async_fn_in_trait)]
pub trait ContentsManager {
    /// Load a file's content
    async fn get(&self, path: &str) -> Result<FileContents>;

    /// Write a file's content, creating it if needed
    async fn save(&self, path: &str, content: &str) -> Result<FileContents>;

    /// Move a file to a new path
    async fn rename(&self, old_path: &str, new_path: &str) -> Result<FileContents>;
}

impl<T: ContentsManager> ContentsManager for Rc<T> {
    async fn get(&self, path: &str) -> Result<FileContents> {
        self.as_ref().get(path).await
    }

    async fn save(&self, path: &str, content: &str) -> Result<FileContents> {
        self.as_ref().save(path, content).await
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<FileContents> {
        self.as_ref().rename(old_path, new_path).await
    }
}

/// Backend reading and writing files below a root directory
#[derive(Debug, Clone)]
pub struct FileContentsManager {
    root: PathBuf,
}

impl FileContentsManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a document path below the root. `..` and platform prefixes are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut target = self.root.clone();
        for component in Path::new(local_path(path)).components() {
            match component {
                Component::Normal(segment) => target.push(segment),
                Component::CurDir | Component::RootDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(DocumentError::InvalidPath(path.to_string()));
                }
            }
        }
        if target == self.root {
            return Err(DocumentError::InvalidPath(path.to_string()));
        }
        Ok(target)
    }

    fn io_error(path: &str, source: std::io::Error) -> DocumentError {
        if source.kind() == ErrorKind::NotFound {
            DocumentError::NotFound(path.to_string())
        } else {
            DocumentError::Io {
                path: path.to_string(),
                source,
            }
        }
    }

    async fn modified(target: &Path) -> Option<SystemTime> {
        tokio::fs::metadata(target)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok())
    }
}

impl ContentsManager for FileContentsManager {
    async fn get(&self, path: &str) -> Result<FileContents> {
        let target = self.resolve(path)?;
        tracing::debug!("FileContentsManager: reading {}", target.display());

        let content = tokio::fs::read_to_string(&target)
            .await
            .map_err(|e| Self::io_error(path, e))?;

        Ok(FileContents {
            path: path.to_string(),
            content,
            last_modified: Self::modified(&target).await,
        })
    }

    async fn save(&self, path: &str, content: &str) -> Result<FileContents> {
        let target = self.resolve(path)?;
        tracing::debug!(
            "FileContentsManager: writing {} bytes to {}",
            content.len(),
            target.display()
        );

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(path, e))?;
        }
        tokio::fs::write(&target, content)
            .await
            .map_err(|e| Self::io_error(path, e))?;

        Ok(FileContents {
            path: path.to_string(),
            content: content.to_string(),
            last_modified: Self::modified(&target).await,
        })
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<FileContents> {
        let from = self.resolve(old_path)?;
        let to = self.resolve(new_path)?;
        tracing::debug!(
            "FileContentsManager: renaming {} to {}",
            from.display(),
            to.display()
        );

        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(new_path, e))?;
        }
        tokio::fs::rename(&from, &to)
            .await
            .map_err(|e| Self::io_error(old_path, e))?;

        self.get(new_path).await
    }
}

/// In-memory backend, mainly for tests and scratch documents
#[derive(Debug, Default)]
pub struct MemoryContentsManager {
    files: RefCell<HashMap<String, String>>,
    fail_saves: Cell<bool>,
}

impl MemoryContentsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to seed a file
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        self
    }

    /// Make every subsequent save fail with an I/O error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }
}

impl ContentsManager for MemoryContentsManager {
    async fn get(&self, path: &str) -> Result<FileContents> {
        let content = self
            .content(path)
            .ok_or_else(|| DocumentError::NotFound(path.to_string()))?;
        Ok(FileContents {
            path: path.to_string(),
            content,
            last_modified: None,
        })
    }

    async fn save(&self, path: &str, content: &str) -> Result<FileContents> {
        if self.fail_saves.get() {
            return Err(DocumentError::Io {
                path: path.to_string(),
                source: std::io::Error::other("simulated save failure"),
            });
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        Ok(FileContents {
            path: path.to_string(),
            content: content.to_string(),
            last_modified: None,
        })
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<FileContents> {
        let content = self
            .files
            .borrow_mut()
            .remove(old_path)
            .ok_or_else(|| DocumentError::NotFound(old_path.to_string()))?;
        self.files
            .borrow_mut()
            .insert(new_path.to_string(), content.clone());
        Ok(FileContents {
            path: new_path.to_string(),
            content,
            last_modified: None,
        })
    }
}
