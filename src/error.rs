//! Error types for filename parsing, filtering and tag writing.
//!
//! Per-file errors ([`ParseError`], [`TagWriteError`]) are caught at the
//! per-file boundary by the tagger and never abort a batch.

use std::path::PathBuf;
use thiserror::Error;

/// The filename does not follow the `Artist - Title` grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not detect artist & title in '{name}'")]
pub struct ParseError {
    /// Offending filename (extension already stripped)
    pub name: String,
}

/// The tag container could not be opened, read or saved.
#[derive(Error, Debug)]
pub enum TagWriteError {
    #[error("failed to open '{}': {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("'{}' has no {tag_type} tag support", path.display())]
    Unsupported { path: PathBuf, tag_type: String },

    #[error("failed to save tags to '{}': {message}", path.display())]
    Save { path: PathBuf, message: String },
}

/// Invalid filter configuration, detected once at startup.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("filter words must not be blank")]
    BlankWord,

    #[error("failed to build filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Everything that can go wrong while tagging one file.
#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] TagWriteError),
}

impl FileError {
    pub fn is_parse(&self) -> bool {
        matches!(self, FileError::Parse(_))
    }
}
