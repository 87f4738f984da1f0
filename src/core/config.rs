/*
 * Manages application-specific configuration settings. Today these only steer
 * diagnostics (log level and whether a log file is written). They are read
 * from an optional, hand-written `settings.json` in the application's local
 * configuration directory; the application itself never writes that file.
 *
 * It uses a trait-based approach (`ConfigManagerOperations`) to allow for
 * different storage backends or mock implementations for testing. The primary
 * concrete implementation (`CoreConfigManager`) handles file system interactions,
 * using `path_utils` to determine the base configuration directory.
 */
use crate::core::path_utils;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

pub const SETTINGS_FILENAME: &str = "settings.json";
pub const LOG_FILENAME: &str = "cumulusai.log";
// Environment variable that overrides the configured log level.
pub const LOG_LEVEL_ENV_VAR: &str = "CUMULUSAI_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoProjectDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration format error: {e}"),
            ConfigError::NoProjectDirectory => {
                write!(f, "Could not determine project directory for configuration")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            ConfigError::NoProjectDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/*
 * User-editable settings. Unknown keys are ignored and missing keys take
 * their defaults, so older or hand-trimmed files keep loading.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub log_level: String,
    pub log_to_file: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            log_level: DEFAULT_LOG_LEVEL.to_string().to_lowercase(),
            log_to_file: false,
        }
    }
}

/*
 * The resolved logging setup handed to `initialize_logging`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    /*
     * Combines the settings file with the environment override. A valid
     * `env_level` wins over the settings file; unparsable values on either side
     * are skipped, falling back to `info`. The log file is only used when the
     * settings enable it and a location is known.
     */
    pub fn resolve(
        settings: &AppSettings,
        env_level: Option<&str>,
        log_file: Option<PathBuf>,
    ) -> Self {
        let level = env_level
            .and_then(parse_level)
            .or_else(|| parse_level(&settings.log_level))
            .unwrap_or(DEFAULT_LOG_LEVEL);
        LoggingConfig {
            level,
            log_file: if settings.log_to_file { log_file } else { None },
        }
    }
}

fn parse_level(text: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(text.trim()).ok()
}

pub trait ConfigManagerOperations: Send + Sync {
    // `Ok(None)` when there is no settings file. Never creates anything.
    fn load_settings(&self, app_name: &str) -> Result<Option<AppSettings>>;
    // Creates the directory that will hold the log file.
    fn log_file_path(&self, app_name: &str) -> Result<PathBuf>;
}

pub struct CoreConfigManager {
    base_dir_override: Option<PathBuf>,
}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {
            base_dir_override: None,
        }
    }

    // Keeps all files under `base_dir` instead of the per-user config directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        CoreConfigManager {
            base_dir_override: Some(base_dir),
        }
    }

    fn settings_dir(&self, app_name: &str) -> Result<PathBuf> {
        match &self.base_dir_override {
            Some(dir) => Ok(dir.clone()),
            None => path_utils::app_config_local_dir(app_name)
                .ok_or(ConfigError::NoProjectDirectory),
        }
    }

    fn writable_dir(&self, app_name: &str) -> Result<PathBuf> {
        match &self.base_dir_override {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Ok(dir.clone())
            }
            None => path_utils::get_base_app_config_local_dir(app_name)
                .ok_or(ConfigError::NoProjectDirectory),
        }
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_settings(&self, app_name: &str) -> Result<Option<AppSettings>> {
        log::trace!("CoreConfigManager: Loading settings for app '{app_name}'");
        let file_path = self.settings_dir(app_name)?.join(SETTINGS_FILENAME);

        if !file_path.exists() {
            log::debug!("CoreConfigManager: Settings file {file_path:?} does not exist.");
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path)?;
        let settings: AppSettings = serde_json::from_str(&contents)?;
        log::debug!("CoreConfigManager: Loaded settings {settings:?} from {file_path:?}.");
        Ok(Some(settings))
    }

    fn log_file_path(&self, app_name: &str) -> Result<PathBuf> {
        Ok(self.writable_dir(app_name)?.join(LOG_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const APP_NAME: &str = "AnyApp";

    #[test]
    fn test_load_settings_returns_none_when_file_missing() {
        let dir = tempdir().unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        match manager.load_settings(APP_NAME) {
            Ok(None) => {}
            Ok(Some(s)) => panic!("Expected None when file doesn't exist, got {s:?}"),
            Err(e) => panic!("Unexpected error when file doesn't exist: {e:?}"),
        }
    }

    #[test]
    fn test_load_missing_settings_creates_nothing() {
        let dir = tempdir().unwrap();
        let base_dir = dir.path().join("not_yet_there");
        let manager = CoreConfigManager::with_base_dir(base_dir.clone());

        assert!(manager.load_settings(APP_NAME).unwrap().is_none());
        assert!(!base_dir.exists());
    }

    #[test]
    fn test_load_hand_written_settings() {
        let dir = tempdir().unwrap();
        let settings = AppSettings {
            log_level: "debug".to_string(),
            log_to_file: true,
        };
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            serde_json::to_string_pretty(&settings).unwrap(),
        )
        .unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let loaded = manager.load_settings(APP_NAME).unwrap();

        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_partial_settings_file_uses_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{ "log_level": "warn", "unknown_key": 3 }"#,
        )
        .unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let loaded = manager.load_settings(APP_NAME).unwrap().unwrap();

        assert_eq!(loaded.log_level, "warn");
        assert!(!loaded.log_to_file);
    }

    #[test]
    fn test_malformed_settings_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILENAME), "not json {").unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let result = manager.load_settings(APP_NAME);

        assert!(matches!(result, Err(ConfigError::Serde(_))));
    }

    #[test]
    fn test_log_file_lives_next_to_settings() {
        let dir = tempdir().unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let path = manager.log_file_path(APP_NAME).unwrap();

        assert_eq!(path, dir.path().join(LOG_FILENAME));
    }

    #[test]
    fn test_logging_config_env_override_wins() {
        let settings = AppSettings {
            log_level: "warn".to_string(),
            log_to_file: true,
        };
        let config =
            LoggingConfig::resolve(&settings, Some("TRACE"), Some(PathBuf::from("x.log")));

        assert_eq!(config.level, LevelFilter::Trace);
        assert_eq!(config.log_file, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn test_logging_config_falls_back_on_invalid_levels() {
        let settings = AppSettings {
            log_level: "chatty".to_string(),
            log_to_file: false,
        };

        let from_settings =
            LoggingConfig::resolve(&settings, Some("loud"), Some(PathBuf::from("x.log")));
        assert_eq!(from_settings.level, LevelFilter::Info);
        assert_eq!(from_settings.log_file, None);

        let defaults = LoggingConfig::resolve(&AppSettings::default(), None, None);
        assert_eq!(defaults.level, LevelFilter::Info);
    }

    #[test]
    fn test_default_settings_are_info_without_log_file() {
        assert_eq!(AppSettings::default().log_level, "info");
        assert!(!AppSettings::default().log_to_file);
        assert_eq!(parse_level(&AppSettings::default().log_level), Some(LevelFilter::Info));
    }
}
