//! # Rule Sources
//!
//! Where rule documents come from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         RuleSource                                      │
//! │                                                                         │
//! │  FileSource ────► std::fs::read_to_string(path)   (the till)            │
//! │  InlineSource ──► in-memory YAML, replaceable     (embedders, tests)    │
//! │                                                                         │
//! │  fetch() returns raw text only; parsing lives in RuleStore so every    │
//! │  source reports MalformedRules the same way.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{EngineError, EngineResult};

/// A mutable, external origin of rule documents.
pub trait RuleSource: Send + Sync {
    /// Reads the current document text.
    ///
    /// Fails with `SourceUnreadable` when the source cannot be accessed.
    fn fetch(&self) -> EngineResult<String>;

    /// Human-readable name used in errors and logs.
    fn describe(&self) -> String;
}

impl<S: RuleSource + ?Sized> RuleSource for Arc<S> {
    fn fetch(&self) -> EngineResult<String> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// =============================================================================
// File Source
// =============================================================================

/// A rules file on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleSource for FileSource {
    fn fetch(&self) -> EngineResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| EngineError::unreadable(self.describe(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Inline Source
// =============================================================================

/// An in-memory rule document.
///
/// `replace` swaps the text; the next refresh of any store reading from
/// this source picks it up.
#[derive(Debug, Default)]
pub struct InlineSource {
    document: RwLock<String>,
}

impl InlineSource {
    pub fn new(document: impl Into<String>) -> Self {
        InlineSource {
            document: RwLock::new(document.into()),
        }
    }

    /// Replaces the document text.
    pub fn replace(&self, document: impl Into<String>) {
        *self.document.write().unwrap_or_else(PoisonError::into_inner) = document.into();
    }
}

impl RuleSource for InlineSource {
    fn fetch(&self) -> EngineResult<String> {
        Ok(self
            .document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}
