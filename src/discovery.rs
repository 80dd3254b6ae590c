//! Target discovery: a single file, or the matching entries of one directory.
//!
//! - No recursion into subdirectories
//! - Directory-listing order is kept (no sorting)
//! - The glob pattern only applies to directory entries

use anyhow::{bail, Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "*.mp3";

/// Filename glob: `*`, `?`, `[...]` classes and `{a,b}` alternatives.
///
/// Matching is case-insensitive, so `*.mp3` also picks up `TRACK.MP3`.
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    pub fn new(glob: &str) -> Result<Self> {
        let matcher = GlobBuilder::new(glob)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid file pattern '{glob}'"))?
            .compile_matcher();

        Ok(Self {
            glob: glob.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Match a bare file name (no directory part).
    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).unwrap()
    }
}

/// Resolve the files to process.
///
/// A directory yields its regular files whose name matches `pattern`; a
/// file yields itself regardless of the pattern. Anything else is an error.
pub fn collect_targets(target: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    if target.is_dir() {
        list_matching(target, pattern)
    } else if target.is_file() {
        Ok(vec![target.to_path_buf()])
    } else {
        bail!("Given file or directory not found: {}", target.display())
    }
}

fn list_matching(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if pattern.matches(&name.to_string_lossy()) {
            out.push(path);
        }
    }

    Ok(out)
}
