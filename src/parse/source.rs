use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A rule file loaded into memory. Both pipelines walk it line by line.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        // Rule files are hand-edited and occasionally carry stray Latin-1 bytes;
        // those must not abort the whole run.
        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Create a SourceFile from a string, using the given path for display purposes.
    pub fn from_string(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    /// Iterate over `(1-indexed line number, line)` pairs. Line terminators
    /// (`\n` or `\r\n`) are not part of the yielded text.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.lines().enumerate().map(|(i, l)| (i + 1, l))
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}
