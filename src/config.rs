use crate::code_table::CodeTable;
use crossterm::event::KeyEventKind;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_KEYSTROKE_DELAY_MS: i64 = 1000;
pub const MIN_KEYSTROKE_DELAY_MS: i64 = 300;
pub const DEFAULT_PLACEHOLDER: &str = "Nothing";
pub const DEFAULT_CONFIG_FILE: &str = "cheatkeys.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Which key transition feeds the matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTrigger {
    #[default]
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "keyup")]
    KeyUp,
}

impl EventTrigger {
    /// Key down also fires on auto-repeat, like a browser `keydown`.
    pub fn accepts(self, kind: KeyEventKind) -> bool {
        match self {
            EventTrigger::KeyDown => matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat),
            EventTrigger::KeyUp => kind == KeyEventKind::Release,
        }
    }

    /// Key up needs release events; without them fall back to key down.
    pub fn resolve(self, release_events_supported: bool) -> EventTrigger {
        if self == EventTrigger::KeyUp && !release_events_supported {
            warn!("Terminal does not report key release events, listening on keydown instead");
            return EventTrigger::KeyDown;
        }
        self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventTrigger::KeyDown => "keydown",
            EventTrigger::KeyUp => "keyup",
        }
    }
}

/// What happens to the buffer when the admissibility filter rejects a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InadmissiblePolicy {
    /// Empty the buffer and forget the last event time.
    #[default]
    Reset,
    /// Drop the key and leave the state untouched.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub event_type: EventTrigger,
    pub keystroke_delay_ms: i64,
    pub admissibility_filter: bool,
    pub on_inadmissible: InadmissiblePolicy,
    pub code_table: CodeTable,
    pub image_dir: PathBuf,
    pub image_extension: String,
    pub placeholder: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            event_type: EventTrigger::default(),
            keystroke_delay_ms: DEFAULT_KEYSTROKE_DELAY_MS,
            admissibility_filter: false,
            on_inadmissible: InadmissiblePolicy::default(),
            code_table: CodeTable::doom(),
            image_dir: PathBuf::from("images"),
            image_extension: "jpg".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl MatcherConfig {
    /// Apply the delay floor. Delays under the floor, including zero and
    /// negative values, fall back to the default rather than being clamped.
    pub fn normalized(mut self) -> Self {
        if self.keystroke_delay_ms < MIN_KEYSTROKE_DELAY_MS {
            warn!(
                "Keystroke delay {}ms is below the {}ms floor, using {}ms",
                self.keystroke_delay_ms, MIN_KEYSTROKE_DELAY_MS, DEFAULT_KEYSTROKE_DELAY_MS
            );
            self.keystroke_delay_ms = DEFAULT_KEYSTROKE_DELAY_MS;
        }
        if self.image_extension.is_empty() {
            self.image_extension = "jpg".to_string();
        }
        self
    }

    pub fn keystroke_delay(&self) -> Duration {
        Duration::from_millis(self.keystroke_delay_ms.max(0) as u64)
    }

    /// Load the config at `path`. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded config from {} ({} codes)",
            path.display(),
            config.code_table.len()
        );
        Ok(config.normalized())
    }

    /// An explicit path must exist; otherwise `cheatkeys.yaml` in the working
    /// directory is used when present.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_from_dir(Path::new(".")),
        }
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.event_type, EventTrigger::KeyDown);
        assert_eq!(config.keystroke_delay(), Duration::from_millis(1000));
        assert!(!config.admissibility_filter);
        assert_eq!(config.on_inadmissible, InadmissiblePolicy::Reset);
        assert_eq!(config.placeholder, "Nothing");
        assert_eq!(config.code_table, CodeTable::doom());
    }

    #[test]
    fn test_delay_below_floor_falls_back_to_default() {
        for delay in [-5, 0, 1, 299] {
            let config = MatcherConfig {
                keystroke_delay_ms: delay,
                ..MatcherConfig::default()
            }
            .normalized();
            assert_eq!(config.keystroke_delay_ms, DEFAULT_KEYSTROKE_DELAY_MS);
        }

        let config = MatcherConfig {
            keystroke_delay_ms: 300,
            ..MatcherConfig::default()
        }
        .normalized();
        assert_eq!(config.keystroke_delay_ms, 300);
    }

    #[test]
    fn test_trigger_accepts() {
        assert!(EventTrigger::KeyDown.accepts(KeyEventKind::Press));
        assert!(EventTrigger::KeyDown.accepts(KeyEventKind::Repeat));
        assert!(!EventTrigger::KeyDown.accepts(KeyEventKind::Release));
        assert!(EventTrigger::KeyUp.accepts(KeyEventKind::Release));
        assert!(!EventTrigger::KeyUp.accepts(KeyEventKind::Press));
    }

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = MatcherConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config, MatcherConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.yaml");

        let err = MatcherConfig::load_or_default(Some(&path)).unwrap_err();
        match err {
            ConfigError::Io { path: err_path, source } => {
                assert_eq!(err_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_file_in_dir_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILE),
            "placeholder: No cheat\n",
        )
        .unwrap();

        let config = MatcherConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.placeholder, "No cheat");
    }

    #[test]
    fn test_keyup_falls_back_without_release_events() {
        assert_eq!(EventTrigger::KeyUp.resolve(false), EventTrigger::KeyDown);
        assert_eq!(EventTrigger::KeyUp.resolve(true), EventTrigger::KeyUp);
        assert_eq!(EventTrigger::KeyDown.resolve(false), EventTrigger::KeyDown);
    }

    #[test]
    fn test_partial_yaml_is_defaulted_and_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cheatkeys.yaml");
        fs::write(
            &path,
            "event_type: keyup\nkeystroke_delay_ms: 100\nadmissibility_filter: true\non_inadmissible: ignore\ncode_table:\n  IDDQD: God Mode\n",
        )
        .unwrap();

        let config = MatcherConfig::load_from_file(&path).unwrap();
        assert_eq!(config.event_type, EventTrigger::KeyUp);
        assert_eq!(config.keystroke_delay_ms, DEFAULT_KEYSTROKE_DELAY_MS);
        assert!(config.admissibility_filter);
        assert_eq!(config.on_inadmissible, InadmissiblePolicy::Ignore);
        assert_eq!(config.code_table.lookup("iddqd"), Some("God Mode"));
        assert_eq!(config.code_table.len(), 1);
        assert_eq!(config.image_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "event_type: sideways\n").unwrap();

        let err = MatcherConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
