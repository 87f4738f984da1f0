/*
 * This module consolidates the core, platform-agnostic pieces of the
 * application: its static identity and the configuration layer
 * (`ConfigManagerOperations`) with its path utilities.
 */
pub mod app_info;
pub mod config;
pub mod path_utils;

pub use app_info::{APP_IDENTITY, AppIdentity};

pub use config::{
    AppSettings, ConfigManagerOperations, CoreConfigManager, LOG_LEVEL_ENV_VAR, LoggingConfig,
};
