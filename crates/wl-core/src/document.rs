//! Log file loading, newline handling, and persistence.
//!
//! A [`LogDocument`] is the full ordered sequence of stripped lines plus
//! the newline convention detected on load. Serializing the sequence with
//! the stored newline and re-parsing it reproduces the same sequence; the
//! engine never reflows or reorders lines it does not explicitly edit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by the ledger engine.
///
/// A missing log file is not an error: [`LogDocument::open`] starts empty.
/// Malformed lines are skipped during scans, never reported here.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The log file exists but could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be written; the mutation is not persisted.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Newline convention of a log file.
///
/// Detected from the first physical line's terminator and reused on save,
/// so a CRLF file stays a CRLF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    Crlf,
}

impl Newline {
    /// The literal terminator string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Detects the convention from raw file content.
    ///
    /// Only the first physical line is inspected; an unterminated or empty
    /// file defaults to LF.
    fn detect(raw: &str) -> Self {
        match raw.split_inclusive('\n').next() {
            Some(first) if first.ends_with("\r\n") => Self::Crlf,
            _ => Self::Lf,
        }
    }
}

/// The in-memory form of one log file.
///
/// Line indices are positions, not identities: they shift on insert and
/// delete, so callers must re-resolve indices from a fresh parse before
/// every mutation rather than caching them across calls.
#[derive(Debug)]
pub struct LogDocument {
    path: PathBuf,
    newline: Newline,
    /// True when the file on disk ended with a line terminator.
    trailing_newline: bool,
    lines: Vec<String>,
}

impl LogDocument {
    /// Opens the log file at `path`, or starts an empty document if the
    /// file does not exist yet.
    ///
    /// Lines are stored with trailing whitespace and terminators stripped.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "log file absent, starting empty");
            return Ok(Self {
                path,
                newline: Newline::default(),
                trailing_newline: false,
                lines: Vec::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| LedgerError::Read {
            path: path.clone(),
            source,
        })?;
        let newline = Newline::detect(&raw);
        let trailing_newline = raw.ends_with('\n');

        let mut lines: Vec<String> = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('\n').map(|l| l.trim_end().to_string()).collect()
        };
        if trailing_newline {
            // split keeps an empty segment after the final terminator
            lines.pop();
        }

        tracing::debug!(
            path = %path.display(),
            lines = lines.len(),
            crlf = newline == Newline::Crlf,
            "loaded log file"
        );
        Ok(Self {
            path,
            newline,
            trailing_newline,
            lines,
        })
    }

    /// Writes the document back to its path in one pass, joining lines
    /// with the detected newline convention.
    pub fn save(&self) -> Result<(), LedgerError> {
        let mut out = self.lines.join(self.newline.as_str());
        if self.trailing_newline {
            out.push_str(self.newline.as_str());
        }
        fs::write(&self.path, out).map_err(|source| LedgerError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), lines = self.lines.len(), "saved log file");
        Ok(())
    }

    /// The path the document was opened from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The detected newline convention.
    pub const fn newline(&self) -> Newline {
        self.newline
    }

    /// All lines, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn set(&mut self, index: usize, text: String) {
        self.lines[index] = text;
    }

    pub(crate) fn insert(&mut self, index: usize, text: String) {
        self.lines.insert(index, text);
    }

    pub(crate) fn push(&mut self, text: String) {
        self.lines.push(text);
    }

    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        self.lines.drain(start..=end);
    }
}
