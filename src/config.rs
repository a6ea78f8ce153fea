//! Configuration loading and management
//!
//! Handles parsing of `tend.toml` configuration files.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lifecycle::RetentionConfig;
use crate::vault::Vault;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "tend.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Vault root; relative store paths resolve against it
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Store directory layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Retention policy for completed tasks
    #[serde(default)]
    pub retention: RetentionSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            paths: PathsConfig::default(),
            retention: RetentionSettings::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Store directory layout, relative to the vault root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Active task store
    #[serde(default = "default_active")]
    pub active: String,

    /// Completed task store
    #[serde(default = "default_completed")]
    pub completed: String,

    /// Archived record store
    #[serde(default = "default_archive")]
    pub archive: String,
}

fn default_active() -> String {
    "tasks".to_string()
}

fn default_completed() -> String {
    "tasks/completed".to_string()
}

fn default_archive() -> String {
    "archive".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            active: default_active(),
            completed: default_completed(),
            archive: default_archive(),
        }
    }
}

/// Retention durations, as duration strings ("7d", "12h", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionSettings {
    /// How long completed non-project tasks are kept
    #[serde(default = "default_empty_task_retention")]
    pub empty_task: String,

    /// How long completed projects are kept before archival
    #[serde(default = "default_project_retention")]
    pub project_before_archive: String,
}

fn default_empty_task_retention() -> String {
    "7d".to_string()
}

fn default_project_retention() -> String {
    "30d".to_string()
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            empty_task: default_empty_task_retention(),
            project_before_archive: default_project_retention(),
        }
    }
}

impl Config {
    /// Load configuration from a `tend.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from `tend.toml` in the current
    /// directory, or fall back to defaults when no file exists.
    ///
    /// An explicit path that does not exist is an error; the implicit
    /// lookup is allowed to miss.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let implicit = PathBuf::from(CONFIG_FILE);
                if implicit.exists() {
                    Self::load(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved retention thresholds
    pub fn retention(&self) -> Result<RetentionConfig> {
        Ok(RetentionConfig {
            empty_task: parse_duration(&self.retention.empty_task)?,
            project: parse_duration(&self.retention.project_before_archive)?,
        })
    }

    /// Resolved vault layout
    pub fn vault(&self) -> Vault {
        Vault::new(
            &self.root,
            &self.paths.active,
            &self.paths.completed,
            &self.paths.archive,
        )
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("paths.active", &self.paths.active),
            ("paths.completed", &self.paths.completed),
            ("paths.archive", &self.paths.archive),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
            }
        }

        if self.paths.active == self.paths.completed {
            return Err(Error::InvalidConfig(
                "paths.active and paths.completed must differ".to_string(),
            ));
        }

        for (field, value) in [
            ("retention.empty_task", &self.retention.empty_task),
            (
                "retention.project_before_archive",
                &self.retention.project_before_archive,
            ),
        ] {
            let duration = parse_duration(value).map_err(|err| {
                Error::InvalidConfig(format!("{field}: invalid duration '{value}': {err}"))
            })?;
            if duration < Duration::zero() {
                return Err(Error::InvalidConfig(format!(
                    "{field}: duration cannot be negative"
                )));
            }
        }

        Ok(())
    }
}

/// Parse a duration string like "7d", "12h", "90m".
///
/// Bare numbers are minutes.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.is_empty() {
        return Err(Error::InvalidArgument(
            "Duration cannot be empty".to_string(),
        ));
    }

    // Find where the number ends and unit begins
    let (num_str, unit) = if let Some(pos) = s.find(|c: char| !c.is_ascii_digit()) {
        (&s[..pos], &s[pos..])
    } else {
        // Assume minutes if no unit
        (s, "m")
    };

    let num: i64 = num_str
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("Invalid duration number: {}", num_str)))?;

    let duration = match unit.to_lowercase().as_str() {
        "s" | "sec" | "second" | "seconds" => Duration::seconds(num),
        "m" | "min" | "minute" | "minutes" => Duration::minutes(num),
        "h" | "hr" | "hour" | "hours" => Duration::hours(num),
        "d" | "day" | "days" => Duration::days(num),
        "w" | "week" | "weeks" => Duration::weeks(num),
        _ => {
            return Err(Error::InvalidArgument(format!(
                "Invalid duration unit '{}'. Expected: s, m, h, d, w",
                unit
            )));
        }
    };

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.paths.active, "tasks");
        assert_eq!(cfg.paths.completed, "tasks/completed");
        assert_eq!(cfg.paths.archive, "archive");
        assert_eq!(cfg.retention.empty_task, "7d");
        assert_eq!(cfg.retention.project_before_archive, "30d");

        let retention = cfg.retention().expect("retention");
        assert_eq!(retention.empty_task, Duration::days(7));
        assert_eq!(retention.project, Duration::days(30));
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
root = "/srv/vault"

[paths]
active = "todo"
completed = "done"
archive = "records"

[retention]
empty_task = "3d"
project_before_archive = "12w"
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.root, PathBuf::from("/srv/vault"));
        assert_eq!(cfg.paths.active, "todo");
        assert_eq!(cfg.paths.completed, "done");
        assert_eq!(cfg.paths.archive, "records");

        let retention = cfg.retention().expect("retention");
        assert_eq!(retention.empty_task, Duration::days(3));
        assert_eq!(retention.project, Duration::weeks(12));

        let vault = cfg.vault();
        assert_eq!(vault.active_dir(), Path::new("/srv/vault/todo"));
        assert_eq!(vault.completed_dir(), Path::new("/srv/vault/done"));
        assert_eq!(vault.archive_dir(), Path::new("/srv/vault/records"));
    }

    #[test]
    fn invalid_duration_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[retention]\nempty_task = \"soon\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(msg) => assert!(msg.contains("retention.empty_task")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn identical_stores_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[paths]\nactive = \"tasks\"\ncompleted = \"tasks\"")
            .expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_path_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[paths]\narchive = \"\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(msg) => assert!(msg.contains("paths.archive")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolve_defaults_when_missing() {
        let cfg = Config::resolve(None).expect("resolve");
        assert_eq!(cfg.paths.active, "tasks");
    }

    #[test]
    fn resolve_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.toml");
        assert!(Config::resolve(Some(&path)).is_err());
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let cfg = Config::default();
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("active = \"tasks\""));
        assert!(written.contains("empty_task = \"7d\""));
    }

    #[test]
    fn duration_units() {
        assert_eq!(parse_duration("30s").expect("s"), Duration::seconds(30));
        assert_eq!(parse_duration("90m").expect("m"), Duration::minutes(90));
        assert_eq!(parse_duration("12h").expect("h"), Duration::hours(12));
        assert_eq!(parse_duration("7d").expect("d"), Duration::days(7));
        assert_eq!(parse_duration("2w").expect("w"), Duration::weeks(2));
        // bare numbers are minutes
        assert_eq!(parse_duration("15").expect("bare"), Duration::minutes(15));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("7y").is_err());
        assert!(parse_duration("x7d").is_err());
    }
}
