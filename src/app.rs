//! Application orchestrator.
//! Loads/merges config, initializes logging, builds the filesystem adapter,
//! and dispatches the requested subcommand against the engine.

use anyhow::{bail, Context, Result};
use std::rc::Rc;
use tracing::{debug, error, info};

use crate::cli::{expand_range, expand_spot, Args, Command};
use crate::config::{apply_config_file, default_config_path, Config, CONFIG_ENV};
use crate::errors::FileSetError;
use crate::fsio::{DirFs, FileOps, MemFs};
use crate::logging::init_tracing;
use crate::output as out;
use crate::pattern::Pattern;
use crate::scan::detect_file_sets;
use crate::set::FileSet;
use crate::span::Selection;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!(
                "To override, unset {CONFIG_ENV} or set it to another file."
            ));
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("Default renum config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; run with --help for usage");
    };

    // Build config (may read XML). CLI args override config values.
    let mut cfg = Config::default();
    apply_config_file(&mut cfg);
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(?command, ?cfg, "starting renum");

    let work_dir = match &cfg.work_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("could not determine the current directory")?,
    };
    let dir_fs = DirFs::new(&work_dir);

    // Dry runs replay the directory into a MemFs and report its rename log
    // instead of touching anything.
    let result = if cfg.dry_run {
        let names = dir_fs
            .list_files()
            .with_context(|| format!("could not list files in {}", work_dir.display()))?;
        let mem = Rc::new(MemFs::seeded(names));
        let result = dispatch(&command, mem.clone());

        let renames = mem.renames();
        if renames.is_empty() {
            out::print_info("Dry-run: no renames needed.");
        } else {
            out::print_info(&format!("Dry-run: {} planned rename(s):", renames.len()));
            for (from, to) in &renames {
                out::print_user(&format!("  {from} -> {to}"));
            }
        }
        result
    } else {
        dispatch(&command, Rc::new(dir_fs))
    };

    if let Err(e) = &result {
        match e.downcast_ref::<FileSetError>() {
            Some(fse) => error!(error = %fse, "operation failed"),
            None => error!(error = ?e, "operation failed"),
        }
    }

    drop(guard);
    result
}

fn dispatch(command: &Command, fs: Rc<dyn FileOps>) -> Result<()> {
    match command {
        Command::Sets => {
            let sets = detect_file_sets(fs)?;
            if sets.is_empty() {
                out::print_info("No file sets have been found in this directory.");
            } else {
                for (i, set) in sets.iter().enumerate() {
                    out::print_user(&format!("{i}\t{set}  ({} files)", set.len()));
                }
            }
            Ok(())
        }

        Command::List { pattern } => {
            let set = load_set(pattern, fs)?;
            if set.is_empty() {
                out::print_info(&format!("The file set '{set}' is empty."));
                return Ok(());
            }
            // Refuses runaway index spaces before walking them.
            set.find_flaws()?;
            out::print_user(&annotated_listing(&set).join(", "));
            Ok(())
        }

        Command::Create { pattern } => {
            let set = load_set(pattern, fs)?;
            if set.is_empty() {
                out::print_success(&format!("Created empty file set '{set}'."));
            } else {
                out::print_info(&format!(
                    "A file set '{set}' already exists with {} file(s).",
                    set.len()
                ));
            }
            Ok(())
        }

        Command::Add {
            pattern,
            spot,
            ignore_unfound,
            files,
        } => {
            let mut set = load_set(pattern, fs)?;
            let spot = expand_spot(spot)?;
            let added = set.add_files(files, spot, *ignore_unfound)?;
            info!(set = %set, added, "files added");
            out::print_success(&format!("Added {added} file(s) to '{set}'."));
            Ok(())
        }

        Command::Remove {
            pattern,
            into,
            gaps,
            keep_gaps,
            ranges,
        } => {
            let mut set = load_set(pattern, fs.clone())?;
            let mut indexes = Vec::new();
            for raw in ranges {
                indexes.extend(expand_range(raw)?.indexes());
            }
            let into_set = match into {
                Some(raw) => Some(load_set(raw, fs)?),
                None => None,
            };
            let (removed_set, removed) = set.remove_files(
                Selection::Indexes(indexes),
                into_set,
                gaps.unwrap_or_default(),
                *keep_gaps,
            )?;
            info!(set = %set, into = %removed_set, removed, "files removed");
            out::print_success(&format!(
                "Removed {removed} file(s) from '{set}' into '{removed_set}'."
            ));
            Ok(())
        }

        Command::Move {
            pattern,
            range,
            spot,
            gaps,
        } => {
            let mut set = load_set(pattern, fs)?;
            let range = expand_range(range)?;
            let spot = expand_spot(spot)?;
            set.move_files(range, spot, gaps.unwrap_or_default())?;
            out::print_success(&format!(
                "Moved {}-{} of '{set}' to {}/{}.",
                range.low(),
                range.high(),
                spot.left(),
                spot.right()
            ));
            Ok(())
        }

        Command::Switch {
            pattern,
            first,
            second,
            gaps,
        } => {
            let mut set = load_set(pattern, fs)?;
            let first = expand_range(first)?;
            let second = expand_range(second)?;
            set.switch_file_ranges(first, second, gaps.unwrap_or_default())?;
            out::print_success(&format!(
                "Switched {}-{} with {}-{} in '{set}'.",
                first.low(),
                first.high(),
                second.low(),
                second.high()
            ));
            Ok(())
        }

        Command::Fix { pattern, all } => {
            let mut set = load_set(pattern, fs)?;
            set.fix(*all)?;
            out::print_success(&format!("Fixed '{set}'."));
            Ok(())
        }

        Command::Flaws { pattern } => {
            let set = load_set(pattern, fs)?;
            let flaws = set.find_flaws()?;
            if flaws.is_clean() {
                out::print_success(&format!("The file set '{set}' has no flaws."));
                return Ok(());
            }
            for (low, high) in &flaws.gaps {
                if low == high {
                    out::print_warn(&format!("gap at index {low}"));
                } else {
                    out::print_warn(&format!("gap from index {low} to {high}"));
                }
            }
            for (index, types) in &flaws.multi_assigned {
                out::print_warn(&format!(
                    "index {index} is assigned {} times: {}",
                    types.len(),
                    types.join(", ")
                ));
            }
            Ok(())
        }

        Command::Rename {
            pattern,
            new_pattern,
        } => {
            let mut set = load_set(pattern, fs.clone())?;
            let new_pattern = Pattern::parse(new_pattern)?;
            let existing = FileSet::detect(new_pattern.clone(), fs)?;
            if !existing.is_empty() {
                bail!("there already is a file set with the pattern '{new_pattern}'");
            }
            let old = set.pattern().clone();
            set.change_pattern(new_pattern)?;
            info!(from = %old, to = %set, "pattern changed");
            out::print_success(&format!("Renamed '{old}' to '{set}'."));
            Ok(())
        }
    }
}

fn load_set(raw_pattern: &str, fs: Rc<dyn FileOps>) -> Result<FileSet> {
    let pattern = Pattern::parse(raw_pattern)?;
    Ok(FileSet::detect(pattern, fs)?)
}

/// One display item per index from 0 through max_index: the file name(s), or
/// `G` for a gap. Multi-assigned indexes are bracketed together.
fn annotated_listing(set: &FileSet) -> Vec<String> {
    let mut items = Vec::new();
    for i in 0..=set.max_index() {
        match set.files().get(&i) {
            None => items.push("G".to_string()),
            Some(types) => {
                let mut types = types.clone();
                types.sort();
                let names: Vec<String> = types
                    .iter()
                    .map(|t| set.pattern().name(i, t))
                    .collect();
                if names.len() == 1 {
                    items.push(names.into_iter().next().expect("one name"));
                } else {
                    items.push(format!("[{}]", names.join(" | ")));
                }
            }
        }
    }
    items
}
