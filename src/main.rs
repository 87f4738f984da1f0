// src/main.rs

mod app_logic;
mod bootstrap;
mod core;
mod platform_layer;
mod ui_description_layer;

use crate::core::{
    APP_IDENTITY, AppSettings, ConfigManagerOperations, CoreConfigManager, LOG_LEVEL_ENV_VAR,
    LoggingConfig,
};
use crate::platform_layer::PlatformInterface;

use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::process::ExitCode;

/*
 * Installs the global logger: the terminal always, plus the log file when one
 * is configured. A log file that cannot be created only costs the file output.
 */
pub fn initialize_logging(config: &LoggingConfig) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    let mut file_error = None;
    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(config.level, Config::default(), file)),
            Err(e) => file_error = Some((path.clone(), e)),
        }
    }

    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Failed to initialize logger: {e}");
        return;
    }
    if let Some((path, e)) = file_error {
        log::warn!("Could not create log file {path:?}: {e}. Logging to terminal only.");
    }
}

// Test-wide logger at debug level; only the first call installs it.
#[cfg(test)]
pub fn initialize_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = TermLogger::init(
            log::LevelFilter::Debug,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        );
    });
}

/*
 * Reads the optional settings file. Nothing is written here; the log file
 * location is only resolved (and its directory created) when the settings
 * ask for file logging. Configuration problems never stop the application;
 * they are returned as warnings to be logged once the logger is up.
 */
fn load_logging_config(
    config_manager: &dyn ConfigManagerOperations,
) -> (LoggingConfig, Vec<String>) {
    let app_name = APP_IDENTITY.name;
    let mut warnings = Vec::new();

    let settings = match config_manager.load_settings(app_name) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            warnings.push(format!("Could not load settings, using defaults: {e}"));
            AppSettings::default()
        }
    };

    let log_file = if settings.log_to_file {
        match config_manager.log_file_path(app_name) {
            Ok(path) => Some(path),
            Err(e) => {
                warnings.push(format!("No location for the log file: {e}"));
                None
            }
        }
    } else {
        None
    };

    let env_level = std::env::var(LOG_LEVEL_ENV_VAR).ok();
    (
        LoggingConfig::resolve(&settings, env_level.as_deref(), log_file),
        warnings,
    )
}

fn main() -> ExitCode {
    let config_manager = CoreConfigManager::new();
    let (logging_config, config_warnings) = load_logging_config(&config_manager);
    initialize_logging(&logging_config);
    for warning in &config_warnings {
        log::warn!("{warning}");
    }
    log::debug!(
        "Starting {} ({}) with log level {}.",
        APP_IDENTITY.display_name(),
        APP_IDENTITY.description,
        logging_config.level
    );

    match bootstrap::launch(&APP_IDENTITY, PlatformInterface::new) {
        Ok(exit_code) => {
            log::debug!("Application exited with code {exit_code}.");
            ExitCode::from(u8::try_from(exit_code).unwrap_or(u8::MAX))
        }
        Err(e) => {
            bootstrap::report_startup_error(&e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(u8::MAX))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigError;
    use crate::core::config::{LOG_FILENAME, SETTINGS_FILENAME};
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    // A config manager with scripted results, recording log path lookups.
    struct MockConfigManager {
        load_settings_result: Mutex<Option<Result<Option<AppSettings>, ConfigError>>>,
        log_file_path_result: Mutex<Option<Result<PathBuf, ConfigError>>>,
        log_file_path_calls: AtomicUsize,
    }

    impl MockConfigManager {
        fn new() -> Self {
            MockConfigManager {
                load_settings_result: Mutex::new(None),
                log_file_path_result: Mutex::new(None),
                log_file_path_calls: AtomicUsize::new(0),
            }
        }
        fn set_load_settings_result(&self, result: Result<Option<AppSettings>, ConfigError>) {
            *self.load_settings_result.lock().unwrap() = Some(result);
        }
        fn set_log_file_path_result(&self, result: Result<PathBuf, ConfigError>) {
            *self.log_file_path_result.lock().unwrap() = Some(result);
        }
        fn log_file_path_calls(&self) -> usize {
            self.log_file_path_calls.load(Ordering::SeqCst)
        }
    }

    impl ConfigManagerOperations for MockConfigManager {
        fn load_settings(&self, _app_name: &str) -> Result<Option<AppSettings>, ConfigError> {
            self.load_settings_result.lock().unwrap().take().unwrap_or(Ok(None))
        }
        fn log_file_path(&self, _app_name: &str) -> Result<PathBuf, ConfigError> {
            self.log_file_path_calls.fetch_add(1, Ordering::SeqCst);
            self.log_file_path_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(ConfigError::NoProjectDirectory))
        }
    }

    fn file_logging_settings() -> AppSettings {
        AppSettings {
            log_to_file: true,
            ..AppSettings::default()
        }
    }

    #[test]
    fn test_first_start_leaves_no_files_behind() {
        initialize_test_logging();
        let dir = tempdir().unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let (config, warnings) = load_logging_config(&manager);

        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_file, None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_hand_written_settings_enable_log_file() {
        initialize_test_logging();
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{ "log_to_file": true }"#,
        )
        .unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let (config, warnings) = load_logging_config(&manager);

        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_file, Some(dir.path().join(LOG_FILENAME)));
    }

    #[test]
    fn test_malformed_settings_fall_back_with_warning() {
        initialize_test_logging();
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "{ broken").unwrap();
        let manager = CoreConfigManager::with_base_dir(dir.path().to_path_buf());

        let (config, warnings) = load_logging_config(&manager);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("using defaults"));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_load_error_uses_defaults_and_skips_log_file() {
        initialize_test_logging();
        let manager = MockConfigManager::new();
        manager.set_load_settings_result(Err(ConfigError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "mocked io error",
        ))));

        let (config, warnings) = load_logging_config(&manager);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Could not load settings, using defaults"));
        assert!(warnings[0].contains("mocked io error"));
        assert_eq!(config.log_file, None);
        assert_eq!(manager.log_file_path_calls(), 0);
    }

    #[test]
    fn test_log_file_location_unknown_is_a_warning() {
        initialize_test_logging();
        let manager = MockConfigManager::new();
        manager.set_load_settings_result(Ok(Some(file_logging_settings())));
        manager.set_log_file_path_result(Err(ConfigError::NoProjectDirectory));

        let (config, warnings) = load_logging_config(&manager);

        assert_eq!(manager.log_file_path_calls(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("No location for the log file"));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_log_file_path_used_when_enabled() {
        initialize_test_logging();
        let manager = MockConfigManager::new();
        manager.set_load_settings_result(Ok(Some(file_logging_settings())));
        manager.set_log_file_path_result(Ok(PathBuf::from("logs/cumulusai.log")));

        let (config, warnings) = load_logging_config(&manager);

        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_file, Some(PathBuf::from("logs/cumulusai.log")));
    }

    #[test]
    fn test_log_file_disabled_never_resolves_location() {
        initialize_test_logging();
        let manager = MockConfigManager::new();
        manager.set_load_settings_result(Ok(Some(AppSettings::default())));

        let (config, warnings) = load_logging_config(&manager);

        assert!(warnings.is_empty());
        assert_eq!(config.log_file, None);
        assert_eq!(manager.log_file_path_calls(), 0);
    }
}
