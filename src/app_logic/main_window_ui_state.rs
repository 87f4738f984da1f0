/*
 * This module defines the MainWindowUiState struct.
 * MainWindowUiState holds the state that only matters while the main window
 * exists: its identifier and whether the initial UI setup has been confirmed.
 */
use crate::platform_layer::WindowId;

/*
 * Holds UI-specific state for the main application window.
 * Created when the window is created and dropped when it is destroyed, so the
 * presenter (`CumulusAppLogic`) treats its presence as "the main window is alive".
 */
#[derive(Debug)]
pub struct MainWindowUiState {
    pub window_id: WindowId,
    setup_complete: bool,
}

impl MainWindowUiState {
    pub fn new(window_id: WindowId) -> Self {
        log::debug!("MainWindowUiState::new called for window_id: {window_id:?}");
        MainWindowUiState {
            window_id,
            setup_complete: false,
        }
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    /*
     * Records that the platform layer has executed the static UI description.
     * Returns `true` only the first time, so the startup confirmation is
     * reported once even if the signal is repeated.
     */
    pub fn mark_setup_complete(&mut self) -> bool {
        let first_time = !self.setup_complete;
        self.setup_complete = true;
        first_time
    }
}
