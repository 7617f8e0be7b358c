// Chunk: docs/chunks/merge_cli - Command-line front end for the diff core
//!
//! lite-merge: print the line-aligned chunks between two files, or map a line
//! of one file onto the other.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use lite_merge_diff::{compute_diff_with, map_line, Chunk, Granularity, Space};
use lite_merge_view::{default_config_path, MergeConfig};
use log::{debug, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "lite-merge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Original file
    orig: PathBuf,

    /// Edited file
    edit: PathBuf,

    /// Print chunks (or the mapped line) as JSON
    #[arg(long)]
    json: bool,

    /// Token size for the diff; overrides the config file
    #[arg(long, value_enum)]
    granularity: Option<GranularityArg>,

    /// Map this line (0-based) into the other file instead of listing chunks
    #[arg(long, value_name = "LINE")]
    map_line: Option<usize>,

    /// File the --map-line line belongs to
    #[arg(long, value_enum, default_value_t = SpaceArg::Orig)]
    from_space: SpaceArg,

    /// Config file; defaults to <config dir>/lite-merge/config.json
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GranularityArg {
    Chars,
    Words,
    Lines,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Chars => Granularity::Chars,
            GranularityArg::Words => Granularity::Words,
            GranularityArg::Lines => Granularity::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SpaceArg {
    Orig,
    Edit,
}

impl From<SpaceArg> for Space {
    fn from(arg: SpaceArg) -> Self {
        match arg {
            SpaceArg::Orig => Space::Orig,
            SpaceArg::Edit => Space::Edit,
        }
    }
}

fn load_config(explicit: Option<&PathBuf>) -> Result<MergeConfig> {
    match explicit {
        Some(path) => Ok(MergeConfig::load_from(path)?),
        None => {
            debug!("config path: {:?}", default_config_path());
            Ok(MergeConfig::load_default())
        }
    }
}

/// Lines in `text` as a buffer counts them: a trailing newline opens one more.
fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

fn format_chunks(chunks: &[Chunk]) -> String {
    if chunks.is_empty() {
        return "no differences\n".to_string();
    }
    let mut out = String::from("orig        edit\n");
    for chunk in chunks {
        let orig = format!("{}..{}", chunk.orig_from, chunk.orig_to);
        let _ = writeln!(out, "{orig:<12}{}..{}", chunk.edit_from, chunk.edit_to);
    }
    out
}

fn run(cli: &Cli) -> Result<String> {
    let mut config = load_config(cli.config.as_ref())?;
    if let Some(granularity) = cli.granularity {
        config.diff.granularity = granularity.into();
    }

    let orig = fs::read_to_string(&cli.orig)
        .with_context(|| format!("failed to read {}", cli.orig.display()))?;
    let edit = fs::read_to_string(&cli.edit)
        .with_context(|| format!("failed to read {}", cli.edit.display()))?;

    let diff = compute_diff_with(&orig, &edit, &config.diff);

    if let Some(line) = cli.map_line {
        let space = Space::from(cli.from_space);
        let lines = match space {
            Space::Orig => line_count(&orig),
            Space::Edit => line_count(&edit),
        };
        if line >= lines {
            bail!("line {line} is past the end ({lines} lines)");
        }
        let mapped = map_line(&diff, line, space);
        return Ok(if cli.json {
            format!("{}\n", serde_json::json!({ "line": line, "mapped": mapped }))
        } else {
            format!("{mapped}\n")
        });
    }

    let chunks: Vec<Chunk> = diff.chunks().collect();
    if cli.json {
        Ok(serde_json::to_string_pretty(&chunks)? + "\n")
    } else {
        Ok(format_chunks(&chunks))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    print!("{}", run(&cli)?);
    Ok(())
}
