/*
 * This module provides the application logic layer, centered around
 * `CumulusAppLogic` which acts as the Presenter/Controller for the main window.
 * `MainWindowUiState` holds the state that lives as long as the main window.
 * Unit tests for `CumulusAppLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod main_window_ui_state;
pub mod ui_constants;

#[cfg(test)]
mod handler_tests;

pub use handler::CumulusAppLogic;
