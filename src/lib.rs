//! Tag audio files from `Artist - Title` filenames - shared modules for all binaries.

pub mod discovery;
pub mod error;
pub mod filename;
pub mod filter;
pub mod genres;
pub mod models;
pub mod progress;
pub mod tagger;
pub mod writer;
