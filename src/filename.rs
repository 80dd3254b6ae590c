//! Artist/title detection from `Artist - Title` filenames.
//!
//! The grammar is a single anchored regex. The artist group is lazy and the
//! title group greedy, so the first `" - "` separator wins and any later
//! separator stays in the title: `"A - B - C"` → `A` / `B - C`.
//!
//! `\w` and `\s` are Unicode-aware in the `regex` crate, so names like
//! `Björk - Jóga` or `Кино - Группа крови` parse.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

/// Artist: word chars, whitespace, `. ' + - &` (lazy).
/// Title: word chars, whitespace, `( ) . ' , - ! &` (greedy, to the end).
pub static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\w\s.'+\-&]+?) - ([()\w\s.',\-!&]+)$").unwrap()
});

/// Artist and title detected from one filename.
///
/// Both fields are trimmed and non-empty; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    artist: String,
    title: String,
}

impl ParsedName {
    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_parts(self) -> (String, String) {
        (self.artist, self.title)
    }
}

/// Remove the extension: everything after the final `.`.
/// A name without any `.` is returned whole.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => file_name,
    }
}

/// Parse a bare filename (extension already removed).
pub fn parse_filename(name: &str) -> Result<ParsedName, ParseError> {
    let fail = || ParseError { name: name.to_string() };

    let caps = FILENAME_PATTERN.captures(name).ok_or_else(fail)?;
    let artist = caps.get(1).map_or("", |m| m.as_str()).trim();
    let title = caps.get(2).map_or("", |m| m.as_str()).trim();

    // Whitespace-only groups match the classes but carry no data
    if artist.is_empty() || title.is_empty() {
        return Err(fail());
    }

    Ok(ParsedName {
        artist: artist.to_string(),
        title: title.to_string(),
    })
}

/// Strip the extension from a full filename, then parse it.
pub fn parse_file_name(file_name: &str) -> Result<ParsedName, ParseError> {
    parse_filename(strip_extension(file_name))
}
