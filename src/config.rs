//! Runtime configuration.
//! Settings come from an XML config file (quick_xml) and are overridden by
//! CLI flags. A secure template is written on first run when no file exists
//! and no explicit RENUM_CONFIG location is set.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Environment variable naming an explicit config file location.
pub const CONFIG_ENV: &str = "RENUM_CONFIG";

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose file sets are managed; defaults to the current dir.
    pub work_dir: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print planned renames but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: None,
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
struct XmlConfig {
    work_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Config file path: RENUM_CONFIG if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(explicit));
    }
    let base = dirs::config_dir().context("could not determine a user config directory")?;
    Ok(base.join("renum").join("config.xml"))
}

/// Merge settings from the config file into `cfg`, leaving fields the file
/// does not mention untouched. Missing or unparsable files are tolerated; a
/// template is written when the default location is empty.
pub fn apply_config_file(cfg: &mut Config) {
    let Ok(path) = default_config_path() else {
        return;
    };
    if !path.exists() {
        if env::var_os(CONFIG_ENV).is_none() {
            let _ = create_template_config(&path);
        }
        return;
    }
    let Ok(content) = fs::read_to_string(&path) else {
        return;
    };
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to parse config file");
            return;
        }
    };

    if let Some(dir) = parsed.work_dir.as_deref() {
        cfg.work_dir = Some(PathBuf::from(dir.trim()));
    }
    if let Some(level) = parsed.log_level.as_deref().and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    if let Some(file) = parsed.log_file.as_deref() {
        let trimmed = file.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
}

/// Write a small template config with conservative permissions, creating the
/// parent directory as needed.
fn create_template_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let content = "<config>\n  <!-- <work_dir>/path/to/files</work_dir> -->\n  <log_level>normal</log_level>\n  <!-- <log_file>/path/to/renum.log</log_file> -->\n</config>\n";
    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}
