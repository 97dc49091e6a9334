//! Picker configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--start-dir`, `--lowest-dir`, `--pre-selected`, `--output`)
//! 2. Explicit `--config` file
//! 3. `$FILE_PICKER_CONFIG` environment variable (path to config file)
//! 4. Project-local `.file-picker.toml` in the current working directory
//! 5. Global `~/.config/file-picker/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

// ── Section configs ──────────────────────────────────────────────────────────

/// Where the picker starts, how far up it may go, and where results go.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory (defaults to the home directory).
    pub start_dir: Option<PathBuf>,
    /// Floor directory; going back from it does nothing.
    pub lowest_dir: Option<PathBuf>,
    /// Colon-separated paths selected before the first frame.
    pub preselected: Option<String>,
    /// File to write the selection to instead of stdout.
    pub output: Option<PathBuf>,
}

/// Log file settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<PathBuf>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level configuration as read from files and flags.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub log: LogConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Separator for the preselected path list.
pub const PRESELECTED_SEPARATOR: char = ':';

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FILE_PICKER_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".file-picker.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("file-picker").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_dir: other.general.start_dir.clone().or(self.general.start_dir),
                lowest_dir: other
                    .general
                    .lowest_dir
                    .clone()
                    .or(self.general.lowest_dir),
                preselected: other
                    .general
                    .preselected
                    .clone()
                    .or(self.general.preselected),
                output: other.general.output.clone().or(self.general.output),
            },
            log: LogConfig {
                level: other.log.level.clone().or(self.log.level),
                file: other.log.file.clone().or(self.log.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn start_dir(&self) -> Option<&Path> {
        self.general.start_dir.as_deref()
    }

    pub fn lowest_dir(&self) -> Option<&Path> {
        self.general.lowest_dir.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.general.output.as_deref()
    }

    /// Preselected paths, split on `:` with empty segments dropped.
    pub fn preselected(&self) -> Vec<PathBuf> {
        self.general
            .preselected
            .as_deref()
            .map(parse_preselected)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path; `None` only when no cache directory is known.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("file-picker").join("picker.log"))
        })
    }
}

/// Split a colon-separated path list.
pub fn parse_preselected(list: &str) -> Vec<PathBuf> {
    list.split(PRESELECTED_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}

// ── Resolved options ─────────────────────────────────────────────────────────

/// Immutable options the picker runs with, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub start_dir: PathBuf,
    pub lowest_dir: Option<PathBuf>,
    pub preselected: Vec<PathBuf>,
    pub output: Option<PathBuf>,
}

impl PickerOptions {
    /// Resolve directories against the filesystem.
    ///
    /// The start directory must exist. The lowest directory is canonicalised
    /// when possible so it compares equal to the paths the picker visits.
    pub fn resolve(config: &AppConfig) -> Result<Self> {
        let start = match config.start_dir() {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir()
                .ok_or_else(|| AppError::Config("cannot determine home directory".into()))?,
        };
        let start_dir = start
            .canonicalize()
            .map_err(|_| AppError::InvalidPath(format!("{} does not exist", start.display())))?;
        if !start_dir.is_dir() {
            return Err(AppError::InvalidPath(format!(
                "{} is not a directory",
                start_dir.display()
            )));
        }

        let lowest_dir = config
            .lowest_dir()
            .map(|dir| dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));

        Ok(Self {
            start_dir,
            lowest_dir,
            preselected: config.preselected(),
            output: config.output().map(Path::to_path_buf),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.start_dir().is_none());
        assert!(cfg.lowest_dir().is_none());
        assert!(cfg.output().is_none());
        assert!(cfg.preselected().is_empty());
        assert_eq!(cfg.log_level(), "info");
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
start_dir = "/srv/data"
lowest_dir = "/srv"
preselected = "/srv/data/a:/srv/data/b"
output = "/tmp/picked.txt"

[log]
level = "debug"
file = "/tmp/picker.log"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.start_dir(), Some(Path::new("/srv/data")));
        assert_eq!(cfg.lowest_dir(), Some(Path::new("/srv")));
        assert_eq!(cfg.output(), Some(Path::new("/tmp/picked.txt")));
        assert_eq!(
            cfg.preselected(),
            vec![PathBuf::from("/srv/data/a"), PathBuf::from("/srv/data/b")]
        );
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.log_file(), Some(PathBuf::from("/tmp/picker.log")));
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[general]
lowest_dir = "/home"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.lowest_dir(), Some(Path::new("/home")));
        assert!(cfg.start_dir().is_none());
        assert_eq!(cfg.log_level(), "info");
    }

    #[test]
    fn test_toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert!(cfg.output().is_none());
    }

    #[test]
    fn test_parse_preselected_drops_empty_segments() {
        assert_eq!(
            parse_preselected(":/a::/b:"),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert!(parse_preselected("").is_empty());
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            general: GeneralConfig {
                start_dir: Some(PathBuf::from("/base")),
                output: Some(PathBuf::from("/base/out")),
                ..Default::default()
            },
            ..Default::default()
        };
        let over = AppConfig {
            general: GeneralConfig {
                start_dir: Some(PathBuf::from("/over")),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.start_dir(), Some(Path::new("/over")));
        assert_eq!(merged.output(), Some(Path::new("/base/out")));
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            log: LogConfig {
                level: Some("warn".into()),
                file: None,
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.log_level(), "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[general]
lowest_dir = "/home/user"

[log]
level = "trace"
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.lowest_dir(), Some(Path::new("/home/user")));
        assert_eq!(cfg.log_level(), "trace");
        assert!(cfg.output().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[general]
start_dir = "/from/file"
lowest_dir = "/from"
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            general: GeneralConfig {
                start_dir: Some(PathBuf::from("/from/cli")),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.start_dir(), Some(Path::new("/from/cli")));
        assert_eq!(cfg.lowest_dir(), Some(Path::new("/from")));
    }

    #[test]
    fn test_resolve_canonicalises_start_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("inner")).expect("mkdir");
        let cfg = AppConfig {
            general: GeneralConfig {
                start_dir: Some(dir.path().join("inner").join("..")),
                lowest_dir: Some(dir.path().to_path_buf()),
                preselected: Some("/x:/y".into()),
                output: Some(PathBuf::from("/tmp/out.txt")),
            },
            ..Default::default()
        };

        let options = PickerOptions::resolve(&cfg).expect("resolve");
        let canonical = dir.path().canonicalize().expect("canonical");
        assert_eq!(options.start_dir, canonical);
        assert_eq!(options.lowest_dir, Some(canonical));
        assert_eq!(options.preselected.len(), 2);
        assert_eq!(options.output, Some(PathBuf::from("/tmp/out.txt")));
    }

    #[test]
    fn test_resolve_missing_start_dir_is_invalid_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = AppConfig {
            general: GeneralConfig {
                start_dir: Some(dir.path().join("missing")),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = PickerOptions::resolve(&cfg).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
    }

    #[test]
    fn test_resolve_file_as_start_dir_is_invalid_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").expect("write");
        let cfg = AppConfig {
            general: GeneralConfig {
                start_dir: Some(file),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            PickerOptions::resolve(&cfg),
            Err(AppError::InvalidPath(_))
        ));
    }
}
