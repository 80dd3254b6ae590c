use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use id3_autogen::discovery::{collect_targets, FilePattern, DEFAULT_PATTERN};
use id3_autogen::filter::FilterSet;
use id3_autogen::genres::{parse_genre_arg, sorted_genres};
use id3_autogen::models::{FileOutcome, TagDefaults, TagFields};
use id3_autogen::progress::{format_duration, Console};
use id3_autogen::tagger::{Tagger, TaggerOptions};
use id3_autogen::writer::{LoftyWriter, TagTarget};

#[derive(Parser)]
#[command(name = "id3-autogen")]
#[command(about = "Generate artist/title tags from 'Artist - Title' filenames")]
#[command(version)]
struct Args {
    /// Directory which contains the audio files, or path to a single file
    #[arg(value_name = "DIR", required_unless_present = "genres")]
    dir: Option<PathBuf>,

    /// Content of 'comment' field
    #[arg(short, long)]
    comment: Option<String>,

    /// Content of 'album' field
    #[arg(short, long)]
    album: Option<String>,

    /// Content of 'year' field (1-9999)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=9999))]
    year: Option<u32>,

    /// Genre of the songs (see --genres)
    #[arg(short, long, value_parser = parse_genre_arg)]
    genre: Option<String>,

    /// Process only directory entries matching this pattern
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Overwrite artist detection
    #[arg(long)]
    artist: Option<String>,

    /// Do not change any file
    #[arg(long)]
    dry_run: bool,

    /// More detailed output
    #[arg(long)]
    verbose: bool,

    /// Filter these words from artist / title (comma-separated or repeated)
    #[arg(long, value_delimiter = ',', value_name = "WORDS")]
    filter: Vec<String>,

    /// Match --filter words case-insensitively
    #[arg(long)]
    filter_ignore_case: bool,

    /// Write the ID3v1 tag instead of the format's native tag
    #[arg(long)]
    id3v1: bool,

    /// Write the ID3v1 tag, then remove ID3v2 tags (implies --id3v1)
    #[arg(long = "remove-id3v2")]
    remove_id3v2: bool,

    /// Display available genres
    #[arg(long)]
    genres: bool,

    /// Hide the progress bar (tail-friendly output)
    #[arg(long)]
    log_only: bool,

    /// Write batch statistics as JSON to this file
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,

    /// Exit with status 1 if any file could not be tagged
    #[arg(long)]
    strict: bool,
}

fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn display_genres() {
    println!("Available genres are (sorted):");
    println!();
    for genre in sorted_genres() {
        println!("\t{}", genre);
    }
}

fn report_outcome(console: &Console, outcome: &FileOutcome, verbose: bool, dry_run: bool) {
    match &outcome.result {
        Err(e) => console.error(&format!("Tagging of \"{}\" failed: {}", outcome.file_name, e)),
        Ok(fields) if verbose => {
            console.line(&format!("Tag for \"{}\" set:", outcome.file_name));
            console.line(&field_dump(fields));
        }
        Ok(fields) if dry_run => console.line(&format!(
            "Tag for \"{}\" set: {} - {}",
            outcome.file_name, fields.artist, fields.title
        )),
        Ok(_) => console.line(&format!("Tag for \"{}\" set.", outcome.file_name)),
    }
}

fn field_dump(fields: &TagFields) -> String {
    let year = fields.year.map(|y| y.to_string());
    [
        format!("\tArtist: {}", fields.artist),
        format!("\tTitle: {}", fields.title),
        format!("\tAlbum: {}", fields.album.as_deref().unwrap_or("")),
        format!("\tYear: {}", year.as_deref().unwrap_or("")),
        format!("\tComment: {}", fields.comment.as_deref().unwrap_or("")),
        format!("\tGenre: {}", fields.genre.as_deref().unwrap_or("None")),
    ]
    .join("\n")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing();

    if args.genres {
        display_genres();
        return Ok(ExitCode::SUCCESS);
    }

    let target = args.dir.clone().context("DIR is required")?;
    let filter = FilterSet::with_ignore_case(args.filter.clone(), args.filter_ignore_case)
        .context("Invalid --filter words")?;
    let pattern = FilePattern::new(&args.pattern)?;

    if args.dry_run {
        println!("Dry run active. No file will be changed.");
    }
    if !filter.is_empty() {
        println!("Filtering words: {:?}", filter.words());
    }

    let options = TaggerOptions {
        defaults: TagDefaults {
            artist_override: args.artist.clone(),
            album: args.album.clone(),
            comment: args.comment.clone(),
            year: args.year,
            genre: args.genre.clone(),
        },
        filter,
        dry_run: args.dry_run,
    };
    let tag_target = if args.id3v1 || args.remove_id3v2 {
        TagTarget::Id3v1
    } else {
        TagTarget::Primary
    };
    let tagger = Tagger::new(options, LoftyWriter::new(tag_target, args.remove_id3v2));

    let targets = collect_targets(&target, &pattern)?;
    info!(
        target = %target.display(),
        pattern = pattern.as_str(),
        files = targets.len(),
        "collected targets"
    );

    let start = Instant::now();
    let console = Console::new(targets.len() as u64, "Tagging", args.log_only);

    let stats = tagger.tag_all(&targets, |outcome| {
        report_outcome(&console, outcome, args.verbose, args.dry_run);
        console.advance();
    });

    console.finish(format!("Tagged {} of {} files", stats.tagged, stats.total_files));

    println!("\n{:=<60}", "");
    println!("Tagging complete!{}", if args.dry_run { " (dry run)" } else { "" });
    println!("  Files: {}", stats.total_files);
    println!("  Tagged: {}", stats.tagged);
    println!("  Unparseable names: {}", stats.parse_failures);
    println!("  Write failures: {}", stats.write_failures);
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    if let Some(path) = &args.stats {
        stats
            .write_to_file(path)
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
    }

    if stats.should_fail(args.strict) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
