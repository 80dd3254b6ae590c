//! Per-file tagging pipeline and batch loop.
//!
//! filename → parse → (artist override) → filter → tag writer.
//!
//! Failures are isolated per file: they are reported through the outcome
//! callback and counted, and the batch moves on to the next file.

use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::FileError;
use crate::filename::parse_file_name;
use crate::filter::FilterSet;
use crate::models::{BatchStats, FileOutcome, TagDefaults, TagFields};
use crate::writer::{TagHandle, TagWriter};

/// Run-wide settings, fixed before the first file is touched.
#[derive(Debug, Clone, Default)]
pub struct TaggerOptions {
    pub defaults: TagDefaults,
    pub filter: FilterSet,
    /// Open and populate tags but never commit them
    pub dry_run: bool,
}

pub struct Tagger<W: TagWriter> {
    options: TaggerOptions,
    writer: W,
}

impl<W: TagWriter> Tagger<W> {
    pub fn new(options: TaggerOptions, writer: W) -> Self {
        Self { options, writer }
    }

    pub fn options(&self) -> &TaggerOptions {
        &self.options
    }

    /// Compute the fields for a filename without touching any file.
    pub fn resolve_fields(&self, file_name: &str) -> Result<TagFields, FileError> {
        let (parsed_artist, parsed_title) = parse_file_name(file_name)?.into_parts();
        let defaults = &self.options.defaults;
        let filter = &self.options.filter;

        // The override replaces detection but is still filtered
        let artist = match &defaults.artist_override {
            Some(artist) => artist.trim().to_string(),
            None => parsed_artist,
        };
        let artist = filter.apply(&artist);
        let title = filter.apply(&parsed_title);

        if artist.is_empty() || title.is_empty() {
            warn!(file = file_name, %artist, %title, "filter left an empty field");
        }

        Ok(TagFields {
            artist,
            title,
            album: defaults.album.clone(),
            comment: defaults.comment.clone(),
            year: defaults.year,
            genre: defaults.genre.clone(),
        })
    }

    /// Detect artist/title from the file's name and write them to its tag.
    pub fn tag_file(&self, path: &Path) -> Result<TagFields, FileError> {
        let file_name = display_name(path);
        let fields = self.resolve_fields(&file_name)?;

        let mut handle = self.writer.open(path)?;
        handle.set_fields(&fields);

        if self.options.dry_run {
            debug!(path = %path.display(), "dry run, not committing");
        } else {
            handle.commit()?;
        }

        Ok(fields)
    }

    /// Tag every path in order, one at a time.
    pub fn tag_all<P, F>(&self, paths: &[P], mut on_outcome: F) -> BatchStats
    where
        P: AsRef<Path>,
        F: FnMut(&FileOutcome),
    {
        let start = Instant::now();
        let mut stats = BatchStats {
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        for path in paths {
            let path = path.as_ref();
            let outcome = FileOutcome {
                path: path.to_path_buf(),
                file_name: display_name(path),
                result: self.tag_file(path),
            };
            if let Err(e) = &outcome.result {
                debug!(path = %path.display(), error = %e, "tagging failed");
            }
            stats.record(&outcome);
            on_outcome(&outcome);
        }

        stats.elapsed_seconds = start.elapsed().as_secs_f64();
        stats
    }
}

/// Last path component, lossily decoded.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagWriteError;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Records committed fields and appends them to the file on commit,
    /// standing in for a real tag container.
    #[derive(Default, Clone)]
    struct RecordingWriter {
        commits: Rc<RefCell<Vec<(PathBuf, TagFields)>>>,
        opened: Rc<RefCell<Vec<PathBuf>>>,
    }

    struct RecordingHandle {
        path: PathBuf,
        fields: Option<TagFields>,
        commits: Rc<RefCell<Vec<(PathBuf, TagFields)>>>,
    }

    impl TagWriter for RecordingWriter {
        type Handle = RecordingHandle;

        fn open(&self, path: &Path) -> Result<RecordingHandle, TagWriteError> {
            if !path.exists() {
                return Err(TagWriteError::Open {
                    path: path.to_path_buf(),
                    message: "not found".to_string(),
                });
            }
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(RecordingHandle {
                path: path.to_path_buf(),
                fields: None,
                commits: Rc::clone(&self.commits),
            })
        }
    }

    impl TagHandle for RecordingHandle {
        fn set_fields(&mut self, fields: &TagFields) {
            self.fields = Some(fields.clone());
        }

        fn commit(self) -> Result<(), TagWriteError> {
            let fields = self.fields.expect("commit without fields");
            let mut bytes = std::fs::read(&self.path).unwrap();
            bytes.extend_from_slice(format!("{}|{}", fields.artist, fields.title).as_bytes());
            std::fs::write(&self.path, bytes).unwrap();
            self.commits.borrow_mut().push((self.path, fields));
            Ok(())
        }
    }

    fn tagger(options: TaggerOptions) -> (Tagger<RecordingWriter>, RecordingWriter) {
        let writer = RecordingWriter::default();
        (Tagger::new(options, writer.clone()), writer)
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"audio").unwrap();
        path
    }

    #[test]
    fn test_tag_file_writes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "Jimi - Hey Joe.mp3");
        let (tagger, writer) = tagger(TaggerOptions {
            defaults: TagDefaults {
                album: Some("Woodstock".to_string()),
                comment: Some("Bootleg".to_string()),
                year: Some(1969),
                genre: Some("Rock".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });

        let fields = tagger.tag_file(&path).unwrap();
        assert_eq!(fields.artist, "Jimi");
        assert_eq!(fields.title, "Hey Joe");
        assert_eq!(fields.album.as_deref(), Some("Woodstock"));
        assert_eq!(fields.year, Some(1969));

        let commits = writer.commits.borrow();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0], (path, fields));
    }

    #[test]
    fn test_parse_failure_skips_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "NoSeparator.mp3");
        let (tagger, writer) = tagger(TaggerOptions::default());

        let err = tagger.tag_file(&path).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("NoSeparator"));
        assert!(writer.opened.borrow().is_empty());
    }

    #[test]
    fn test_filter_applies_to_artist_and_title() {
        let (tagger, _) = tagger(TaggerOptions {
            filter: FilterSet::new(["Bad"]).unwrap(),
            ..Default::default()
        });
        let fields = tagger.resolve_fields("Bad Artist - Bad Word Song.mp3").unwrap();
        assert_eq!(fields.artist, "Artist");
        assert_eq!(fields.title, "Word Song");
    }

    #[test]
    fn test_artist_override_is_filtered() {
        let (tagger, _) = tagger(TaggerOptions {
            defaults: TagDefaults {
                artist_override: Some(" Jimi Hendrix Official ".to_string()),
                ..Default::default()
            },
            filter: FilterSet::new(["Official"]).unwrap(),
            ..Default::default()
        });
        let fields = tagger.resolve_fields("Jimi - Hey Joe Official.mp3").unwrap();
        assert_eq!(fields.artist, "Jimi Hendrix");
        assert_eq!(fields.title, "Hey Joe");
    }

    #[test]
    fn test_artist_override_still_needs_valid_name() {
        let (tagger, _) = tagger(TaggerOptions {
            defaults: TagDefaults {
                artist_override: Some("Someone".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(tagger.resolve_fields("NoSeparator.mp3").is_err());
    }

    #[test]
    fn test_extra_fields_not_filtered() {
        let (tagger, _) = tagger(TaggerOptions {
            defaults: TagDefaults {
                album: Some("Bad Album".to_string()),
                comment: Some("Bad comment".to_string()),
                ..Default::default()
            },
            filter: FilterSet::new(["Bad"]).unwrap(),
            ..Default::default()
        });
        let fields = tagger.resolve_fields("A - B.mp3").unwrap();
        assert_eq!(fields.album.as_deref(), Some("Bad Album"));
        assert_eq!(fields.comment.as_deref(), Some("Bad comment"));
    }

    #[test]
    fn test_dry_run_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "Queen - Bicycle Race.mp3");
        let (tagger, writer) = tagger(TaggerOptions {
            dry_run: true,
            ..Default::default()
        });

        let fields = tagger.tag_file(&path).unwrap();
        assert_eq!(fields.artist, "Queen");
        assert_eq!(fields.title, "Bicycle Race");
        assert_eq!(std::fs::read(&path).unwrap(), b"audio");
        assert_eq!(writer.opened.borrow().len(), 1);
        assert!(writer.commits.borrow().is_empty());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = touch(dir.path(), "Artist - Title.mp3");
        let bad = touch(dir.path(), "garbage.mp3");
        let missing = dir.path().join("Ghost - Track.mp3");
        let (tagger, writer) = tagger(TaggerOptions::default());

        let mut seen = Vec::new();
        let stats = tagger.tag_all(&[bad.clone(), missing, good.clone()], |o| {
            seen.push((o.file_name.clone(), o.is_success()));
        });

        assert_eq!(
            seen,
            vec![
                ("garbage.mp3".to_string(), false),
                ("Ghost - Track.mp3".to_string(), false),
                ("Artist - Title.mp3".to_string(), true),
            ]
        );
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.tagged, 1);
        assert_eq!(stats.parse_failures, 1);
        assert_eq!(stats.write_failures, 1);
        assert!(!stats.dry_run);
        assert_eq!(writer.commits.borrow()[0].0, good);
        assert_eq!(std::fs::read(&bad).unwrap(), b"audio");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/music/A - B.mp3")), "A - B.mp3");
    }
}
