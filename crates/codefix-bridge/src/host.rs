//! The minimal document contract the bridge depends on.
//!
//! The bridge is the only component that touches documents, and only via
//! `replace_all` as one atomic full-range edit. Everything else the editor
//! host can do is out of scope.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use codefix_core::{CodefixError, Result};

/// Opaque handle identifying a document within its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKey(pub String);

/// What the bridge can see of a document.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub key: DocumentKey,
    pub language: String,
    pub text: String,
}

/// Immutable copy of document text taken at panel-open time, decoupled
/// from later live edits.
#[derive(Debug, Clone, Default)]
pub struct DocumentSnapshot {
    pub text: String,
    pub language: String,
}

/// The read/replace contract against the editor's live buffers.
pub trait EditorHost: Send + Sync {
    /// The currently focused document, if any.
    fn active_document(&self) -> Option<DocumentInfo>;

    /// The first visible document declaring the given language, if any.
    fn find_visible(&self, language: &str) -> Option<DocumentKey>;

    /// Replace the document's entire contents, offset 0 to end of text.
    fn replace_all(&self, key: &DocumentKey, text: &str) -> Result<()>;
}

/// File-backed host for the CLI: a single document, read from disk at
/// open. An applied fix updates the in-memory buffer and is written
/// through to the file, since a standalone binary has no unsaved-buffer
/// concept.
pub struct FileHost {
    path: PathBuf,
    language: String,
    buffer: Mutex<String>,
}

impl FileHost {
    pub fn open(path: PathBuf) -> Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        let language = language_for_path(&path);
        Ok(Self {
            path,
            language,
            buffer: Mutex::new(text),
        })
    }

    /// Current buffer contents.
    pub fn text(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn key(&self) -> DocumentKey {
        DocumentKey(self.path.display().to_string())
    }
}

impl EditorHost for FileHost {
    fn active_document(&self) -> Option<DocumentInfo> {
        Some(DocumentInfo {
            key: self.key(),
            language: self.language.clone(),
            text: self.text(),
        })
    }

    fn find_visible(&self, language: &str) -> Option<DocumentKey> {
        (self.language == language).then(|| self.key())
    }

    fn replace_all(&self, key: &DocumentKey, text: &str) -> Result<()> {
        if *key != self.key() {
            return Err(CodefixError::EditFailed(format!(
                "unknown document {}",
                key.0
            )));
        }
        std::fs::write(&self.path, text)?;
        let mut buffer = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *buffer = text.to_string();
        Ok(())
    }
}

/// Language id a file declares, by extension.
fn language_for_path(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") => "python",
        Some("rs") => "rust",
        Some("js") => "javascript",
        Some("ts") => "typescript",
        _ => "plaintext",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_derived_from_extension() {
        assert_eq!(language_for_path(Path::new("a/b/script.py")), "python");
        assert_eq!(language_for_path(Path::new("main.rs")), "rust");
        assert_eq!(language_for_path(Path::new("README")), "plaintext");
    }

    #[test]
    fn file_host_round_trips_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buggy.py");
        std::fs::write(&path, "x=1\n").unwrap();

        let host = FileHost::open(path.clone()).unwrap();
        let doc = host.active_document().unwrap();
        assert_eq!(doc.language, "python");
        assert_eq!(doc.text, "x=1\n");

        let key = host.find_visible("python").unwrap();
        host.replace_all(&key, "x = 1\n").unwrap();
        assert_eq!(host.text(), "x = 1\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn find_visible_filters_by_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let host = FileHost::open(path).unwrap();
        assert!(host.find_visible("python").is_none());
        assert!(host.find_visible("rust").is_some());
    }
}
