//! Definition sources: where locale files come from.
//!
//! The loader consumes the [`DefinitionSource`] capability rather than the
//! file system directly, so hosts can supply definitions from anywhere
//! (bundled assets, a remote store, test fixtures).

use std::path::PathBuf;

use async_trait::async_trait;

use lingua_rs_core::error::{LinguaError, LinguaResult};

/// A listable, readable collection of locale definition files.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Lists candidate definition file names, already filtered to the
    /// configured extension.
    async fn list(&self) -> LinguaResult<Vec<String>>;

    /// Reads one definition file's raw content.
    async fn read(&self, name: &str) -> LinguaResult<String>;
}

/// A [`DefinitionSource`] backed by a directory on disk.
///
/// Lists the direct children of `root` whose names end with `extension`;
/// subdirectories are not descended into.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Creates a source scanning `root` for files ending in `extension`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    fn load_error(&self, err: &std::io::Error) -> LinguaError {
        LinguaError::LoadError {
            path: self.root.display().to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl DefinitionSource for DirectorySource {
    /// Every directory failure surfaces as
    /// [`LinguaError::LoadError`] naming the scanned path, including
    /// failures partway through iteration.
    async fn list(&self) -> LinguaResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| self.load_error(&e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.load_error(&e))?
        {
            let file_type = entry.file_type().await.map_err(|e| self.load_error(&e))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(&self.extension) {
                names.push(name);
            }
        }
        // Deterministic load order regardless of directory iteration order.
        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> LinguaResult<String> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LinguaError::LoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}
