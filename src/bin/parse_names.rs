//! Show how filenames would be split into artist/title, without touching tags.
//! Usage: parse-names <DIR> [--pattern GLOB] [--filter WORD,WORD...]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use id3_autogen::discovery::{collect_targets, FilePattern, DEFAULT_PATTERN};
use id3_autogen::filename::parse_file_name;
use id3_autogen::filter::FilterSet;
use id3_autogen::tagger::display_name;

#[derive(Parser)]
#[command(name = "parse-names")]
#[command(about = "Preview artist/title detection for a directory of audio files")]
struct Args {
    /// Directory (or single file) to inspect
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Filter these words from artist / title (comma-separated or repeated)
    #[arg(long, value_delimiter = ',', value_name = "WORDS")]
    filter: Vec<String>,

    #[arg(long)]
    filter_ignore_case: bool,

    /// Only list names that do not match
    #[arg(long)]
    unmatched: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = FilterSet::with_ignore_case(args.filter, args.filter_ignore_case)
        .context("Invalid --filter words")?;
    let pattern = FilePattern::new(&args.pattern)?;
    let targets = collect_targets(&args.dir, &pattern)?;

    let mut matched = 0usize;
    for path in &targets {
        let name = display_name(path);
        match parse_file_name(&name) {
            Ok(parsed) => {
                matched += 1;
                if !args.unmatched {
                    println!(
                        "{} => {} | {}",
                        name,
                        filter.apply(parsed.artist()),
                        filter.apply(parsed.title())
                    );
                }
            }
            Err(_) => println!("{} => no match", name),
        }
    }

    println!("\n{:-<60}", "");
    println!("Matched: {}/{}", matched, targets.len());
    println!("Unmatched: {}", targets.len() - matched);

    Ok(())
}
