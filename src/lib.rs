//! Core library for `renum`.
//!
//! Manages sets of files whose names share a pattern around a running index,
//! such as `page (1).jpg` through `page (24).jpg`. The engine reorganizes the
//! index space — inserting, removing, moving and switching files — while
//! keeping the on-disk names in step, and can detect and repair gaps and
//! multi-assigned indexes. All filesystem access goes through the [`fsio`]
//! trait so the same operations run against a real directory, an in-memory
//! stand-in, or a dry-run plan.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fsio;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod scan;
pub mod set;
pub mod span;

pub use config::{apply_config_file, default_config_path, Config, LogLevel};
pub use errors::{FileSetError, Result};
pub use fsio::{DirFs, FileOps, MemFs};
pub use pattern::{Pattern, INDEX_INDICATOR};
pub use scan::detect_file_sets;
pub use set::{FileSet, Flaws, FLAW_SCAN_LIMIT};
pub use span::{GapPolicy, IndexRange, Selection, Spot};
