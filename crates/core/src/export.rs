//! JSON export of a presentation.

use crate::error::Result;
use crate::types::Presentation;
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Regex to collapse whitespace runs in a title.
static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching characters that would make a file name a path.
static PATH_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\\:]").unwrap());

/// Extension of exported files.
pub const EXPORT_EXTENSION: &str = "json";

/// An encoded presentation ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDeck {
    /// Suggested file name, e.g. `My_Talk.json`.
    pub filename: String,

    /// Pretty-printed JSON document.
    json: String,
}

impl ExportedDeck {
    /// Write the export into `dir`.
    ///
    /// The file always lands directly inside `dir`: path separators in the
    /// suggested name are replaced, so titles like `../x` or `/abs` cannot
    /// escape it.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name_in_dir());
        let mut file = File::create(&path)?;
        file.write_all(self.json.as_bytes())?;
        log::debug!("Wrote {} bytes to {}", self.json.len(), path.display());
        Ok(path)
    }

    /// The suggested file name reduced to a single plain path component.
    pub fn file_name_in_dir(&self) -> String {
        PATH_SEPARATOR_REGEX.replace_all(&self.filename, "_").into_owned()
    }

    /// The document as text.
    pub fn as_str(&self) -> &str {
        &self.json
    }

    /// The document as UTF-8 bytes.
    pub fn bytes(&self) -> &[u8] {
        self.json.as_bytes()
    }
}

/// File name for an exported deck: whitespace runs become `_`.
///
/// `"My  Talk"` gives `"My_Talk.json"`.
pub fn export_filename(title: &str) -> String {
    format!(
        "{}.{}",
        WHITESPACE_RUN_REGEX.replace_all(title, "_"),
        EXPORT_EXTENSION
    )
}

/// Encode a presentation as pretty-printed JSON.
pub fn export(presentation: &Presentation) -> Result<ExportedDeck> {
    let json = serde_json::to_string_pretty(presentation)?;
    Ok(ExportedDeck {
        filename: export_filename(&presentation.title),
        json,
    })
}
