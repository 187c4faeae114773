//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Spots are written `n/m` (two adjacent integers), ranges `a-b` or a
//!   single integer.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::errors::{FileSetError, Result};
use crate::span::{GapPolicy, IndexRange, Spot};

/// CLI wrapper for the renum library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Create, inspect and reorganize numbered file sets"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory whose files are managed (normally configured via XML).
    #[arg(long, global = true, value_hint = ValueHint::DirPath, help = "Directory whose files are managed")]
    pub dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Write logs to this file in addition to stdout.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: print the planned renames but do not modify the filesystem.
    #[arg(
        long,
        global = true,
        help = "Show what would be renamed, but do not modify files"
    )]
    pub dry_run: bool,

    /// Print where renum will look for the config file (or RENUM_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by renum and exit")]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the files of a set in index order, marking gaps and
    /// multi-assigned indexes.
    List {
        /// Set pattern, e.g. 'page*' (escape a literal asterisk as '\*').
        pattern: String,
    },

    /// List the file sets detected in the directory.
    Sets,

    /// Create an empty file set with the given pattern, or report the
    /// existing one.
    Create { pattern: String },

    /// Add loose files to a set at a spot.
    Add {
        pattern: String,
        /// Spot to insert at, e.g. '2/3' (use '-1/0' for the front).
        #[arg(long = "at", value_name = "SPOT")]
        spot: String,
        /// Skip file names that do not exist instead of failing.
        #[arg(long)]
        ignore_unfound: bool,
        /// Files to add, in order.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },

    /// Remove indexes from a set into a removed-files set.
    Remove {
        pattern: String,
        /// Pattern of the set to move removed files into (default: 'removed*').
        #[arg(long, value_name = "PATTERN")]
        into: Option<String>,
        /// Gap handling for the removed selection: strip or preserve.
        #[arg(long, value_name = "POLICY")]
        gaps: Option<GapPolicy>,
        /// Leave the remaining files where they are instead of closing gaps.
        #[arg(long)]
        keep_gaps: bool,
        /// Ranges to remove, each 'a-b' or a single integer.
        #[arg(required = true, value_name = "RANGE")]
        ranges: Vec<String>,
    },

    /// Move a range of files to a spot.
    Move {
        pattern: String,
        /// Range to move, 'a-b' or a single integer.
        range: String,
        /// Destination spot, e.g. '6/7'.
        #[arg(long = "to", value_name = "SPOT")]
        spot: String,
        /// Gap handling for the moved range: strip or preserve.
        #[arg(long, value_name = "POLICY")]
        gaps: Option<GapPolicy>,
    },

    /// Switch two files or file ranges with each other.
    Switch {
        pattern: String,
        /// First range, 'a-b' or a single integer.
        first: String,
        /// Second range, 'a-b' or a single integer.
        second: String,
        /// Gap handling for the switched ranges: strip or preserve.
        #[arg(long, value_name = "POLICY")]
        gaps: Option<GapPolicy>,
    },

    /// Close the gaps of a set; with --all, also spread multi-assigned
    /// indexes onto their own indexes.
    Fix {
        pattern: String,
        #[arg(long)]
        all: bool,
    },

    /// Report the gaps and multi-assigned indexes of a set.
    Flaws { pattern: String },

    /// Change the pattern of a set, renaming every file in it.
    Rename {
        pattern: String,
        new_pattern: String,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.dir {
            cfg.work_dir = Some(dir.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

/// Expand a user-written spot of the form `n/m`, two adjacent integers in
/// either order.
pub fn expand_spot(raw: &str) -> Result<Spot> {
    let invalid = || FileSetError::Expansion {
        input: raw.to_string(),
        expected: "two adjacent integers separated by a slash, like '2/3'",
    };
    let (a, b) = raw.split_once('/').ok_or_else(invalid)?;
    let a: i64 = a.trim().parse().map_err(|_| invalid())?;
    let b: i64 = b.trim().parse().map_err(|_| invalid())?;
    Spot::new(a, b)
}

/// Expand a user-written range: `a-b`, or a single integer `n` meaning `n-n`.
pub fn expand_range(raw: &str) -> Result<IndexRange> {
    let invalid = || FileSetError::Expansion {
        input: raw.to_string(),
        expected: "two integers separated by a dash, like '2-5', or a single integer",
    };
    if let Ok(single) = raw.trim().parse::<i64>() {
        return IndexRange::new(single, single);
    }
    let (a, b) = raw.split_once('-').ok_or_else(invalid)?;
    let a: i64 = a.trim().parse().map_err(|_| invalid())?;
    let b: i64 = b.trim().parse().map_err(|_| invalid())?;
    IndexRange::new(a, b)
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_expansion_accepts_either_order() {
        assert_eq!(expand_spot("2/3").unwrap(), Spot::after(2));
        assert_eq!(expand_spot("3/2").unwrap(), Spot::after(2));
        assert_eq!(expand_spot("-1/0").unwrap(), Spot::after(-1));
        assert!(expand_spot("2/4").is_err());
        assert!(expand_spot("2").is_err());
    }

    #[test]
    fn range_expansion_handles_singles() {
        assert_eq!(expand_range("4").unwrap(), IndexRange::new(4, 4).unwrap());
        assert_eq!(expand_range("7-3").unwrap(), IndexRange::new(3, 7).unwrap());
        assert!(expand_range("a-b").is_err());
        assert!(expand_range("").is_err());
    }

    #[test]
    fn args_parse_move() {
        let args = Args::try_parse_from([
            "renum", "move", "page*", "2-4", "--to", "8/9", "--gaps", "strip",
        ])
        .unwrap();
        match args.command {
            Some(Command::Move {
                pattern,
                range,
                spot,
                gaps,
            }) => {
                assert_eq!(pattern, "page*");
                assert_eq!(range, "2-4");
                assert_eq!(spot, "8/9");
                assert_eq!(gaps, Some(GapPolicy::Strip));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
