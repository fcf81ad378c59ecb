//! Sources of captured bidding runtime objects.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

/// Produces a fresh capture of the page's header-bidding runtime object.
///
/// `Ok(None)` means the page has no such object. Captures are copied out, so
/// consecutive calls may observe different states of a live page.
pub trait RuntimeSource: Send + Sync + 'static {
    /// Captures the runtime object.
    fn capture(&self) -> Result<Option<Value>>;
}

/// Reads a runtime capture from a JSON file on every request.
///
/// A file containing `null` means "no library on the page".
#[derive(Debug, Clone)]
pub struct FileRuntimeSource {
    path: PathBuf,
}

impl FileRuntimeSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RuntimeSource for FileRuntimeSource {
    fn capture(&self) -> Result<Option<Value>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read runtime snapshot {}", self.path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse runtime snapshot {}", self.path.display()))?;
        Ok((!value.is_null()).then_some(value))
    }
}

/// Serves a fixed capture; `None` stands for a page without a library.
#[derive(Debug, Clone, Default)]
pub struct StaticRuntimeSource {
    value: Option<Value>,
}

impl StaticRuntimeSource {
    pub fn new(value: Option<Value>) -> Self {
        Self { value }
    }
}

impl RuntimeSource for StaticRuntimeSource {
    fn capture(&self) -> Result<Option<Value>> {
        Ok(self.value.clone())
    }
}
