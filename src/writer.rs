//! Tag container access.
//!
//! The tagger only sees the [`TagWriter`] / [`TagHandle`] pair: open a file,
//! set fields, commit. [`LoftyWriter`] is the production implementation.
//!
//! Semantics:
//! - Artist and title are always written.
//! - Album, comment, year and genre are written only when supplied; otherwise
//!   whatever the container already holds is left alone.
//! - Dropping a handle without `commit` leaves the file untouched.

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagType};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::TagWriteError;
use crate::models::TagFields;

/// Opens tag containers for writing.
pub trait TagWriter {
    type Handle: TagHandle;

    fn open(&self, path: &Path) -> Result<Self::Handle, TagWriteError>;
}

/// One opened tag container.
pub trait TagHandle {
    fn set_fields(&mut self, fields: &TagFields);

    /// Persist the changes to disk.
    fn commit(self) -> Result<(), TagWriteError>;
}

/// Which tag inside the container receives the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagTarget {
    /// The native tag of the file format (ID3v2 for MP3, Vorbis comments for FLAC, ...)
    #[default]
    Primary,
    /// The classic 128-byte ID3v1 trailer
    Id3v1,
}

/// [`TagWriter`] backed by `lofty`.
///
/// With `remove_id3v2` the fields always go to the ID3v1 tag, whatever
/// `target` says, and any ID3v2 tag is stripped after saving.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyWriter {
    pub target: TagTarget,
    /// Strip any ID3v2 tag from the file after saving
    pub remove_id3v2: bool,
}

impl LoftyWriter {
    pub fn new(target: TagTarget, remove_id3v2: bool) -> Self {
        Self { target, remove_id3v2 }
    }

    /// The tag that actually receives the fields.
    pub fn effective_target(&self) -> TagTarget {
        if self.remove_id3v2 {
            TagTarget::Id3v1
        } else {
            self.target
        }
    }
}

pub struct LoftyHandle {
    path: PathBuf,
    file: TaggedFile,
    tag_type: TagType,
    remove_id3v2: bool,
}

impl TagWriter for LoftyWriter {
    type Handle = LoftyHandle;

    fn open(&self, path: &Path) -> Result<LoftyHandle, TagWriteError> {
        let open_err = |e: lofty::error::LoftyError| TagWriteError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let mut file = Probe::open(path).map_err(open_err)?.read().map_err(open_err)?;

        let tag_type = match self.effective_target() {
            TagTarget::Primary => file.primary_tag_type(),
            TagTarget::Id3v1 => TagType::Id3v1,
        };
        if !file.file_type().supports_tag_type(tag_type) {
            return Err(TagWriteError::Unsupported {
                path: path.to_path_buf(),
                tag_type: format!("{tag_type:?}"),
            });
        }

        // Create the tag if the file has none of this type yet
        if file.tag(tag_type).is_none() {
            debug!(path = %path.display(), ?tag_type, "creating new tag");
            file.insert_tag(Tag::new(tag_type));
        }

        Ok(LoftyHandle {
            path: path.to_path_buf(),
            file,
            tag_type,
            remove_id3v2: self.remove_id3v2,
        })
    }
}

impl TagHandle for LoftyHandle {
    fn set_fields(&mut self, fields: &TagFields) {
        let Some(tag) = self.file.tag_mut(self.tag_type) else {
            return;
        };

        tag.set_artist(fields.artist.clone());
        tag.set_title(fields.title.clone());

        if let Some(album) = &fields.album {
            tag.set_album(album.clone());
        }
        if let Some(comment) = &fields.comment {
            tag.set_comment(comment.clone());
        }
        if let Some(year) = fields.year {
            tag.set_year(year);
        }
        if let Some(genre) = &fields.genre {
            tag.set_genre(genre.clone());
        }
    }

    fn commit(self) -> Result<(), TagWriteError> {
        let save_err = |e: lofty::error::LoftyError| TagWriteError::Save {
            path: self.path.clone(),
            message: e.to_string(),
        };

        self.file
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(save_err)?;

        // Never strip the tag that was just written
        let strip_id3v2 = self.remove_id3v2
            && self.tag_type != TagType::Id3v2
            && self.file.file_type().supports_tag_type(TagType::Id3v2);
        if strip_id3v2 {
            debug!(path = %self.path.display(), "removing ID3v2 tag");
            TagType::Id3v2.remove_from_path(&self.path).map_err(save_err)?;
        }

        Ok(())
    }
}
