//! Core data models for a tagging run.
//!
//! Plain data only: no filesystem, regex or tag-library code lives here.

use serde::Serialize;
use std::path::PathBuf;

use crate::error::FileError;

// ============================================================================
// Tag Fields
// ============================================================================

/// Fields supplied once on the command line and applied to every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDefaults {
    /// Replaces the detected artist for every file
    pub artist_override: Option<String>,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub year: Option<u32>,
    /// Canonical ID3v1 genre name
    pub genre: Option<String>,
}

/// Final fields handed to the tag writer for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFields {
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
    pub comment: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of tagging one file, reported to the caller as it happens.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Display name (last path component)
    pub file_name: String,
    pub result: Result<TagFields, FileError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Aggregate counters for a batch run.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub total_files: usize,
    pub tagged: usize,
    pub parse_failures: usize,
    pub write_failures: usize,
    pub dry_run: bool,

    // Timing
    pub elapsed_seconds: f64,
}

impl BatchStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total_files += 1;
        match &outcome.result {
            Ok(_) => self.tagged += 1,
            Err(e) if e.is_parse() => self.parse_failures += 1,
            Err(_) => self.write_failures += 1,
        }
    }

    pub fn failures(&self) -> usize {
        self.parse_failures + self.write_failures
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Per-file failures only affect the exit status in strict mode.
    pub fn should_fail(&self, strict: bool) -> bool {
        strict && self.has_failures()
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
