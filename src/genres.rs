//! ID3v1 genre catalogue.

use lofty::id3::v1::GENRES;

/// Resolve a genre name case-insensitively to its canonical spelling.
pub fn canonical_genre(name: &str) -> Option<&'static str> {
    let name = name.trim();
    GENRES.iter().copied().find(|g| g.eq_ignore_ascii_case(name))
}

/// All genre names, sorted alphabetically.
pub fn sorted_genres() -> Vec<&'static str> {
    let mut genres: Vec<&'static str> = GENRES.to_vec();
    genres.sort_unstable_by_key(|g| g.to_lowercase());
    genres
}

/// clap value parser for `--genre`.
pub fn parse_genre_arg(s: &str) -> Result<String, String> {
    canonical_genre(s)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown genre '{s}' (use --genres to list them)"))
}
