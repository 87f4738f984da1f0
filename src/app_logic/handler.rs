use crate::core::AppIdentity;
use crate::platform_layer::{
    AppEvent, MenuAction, PlatformCommand, PlatformEventHandler, WindowId,
};
use crate::ui_description_layer;

use super::main_window_ui_state::MainWindowUiState;

use std::collections::VecDeque;

// Process exit code requested when the main window goes away normally.
pub(crate) const NORMAL_EXIT_CODE: i32 = 0;

/*
 * Manages the UI logic of the main window in a platform-agnostic manner.
 * It processes UI events received from the platform layer and enqueues
 * commands to update the UI. The platform layer drains the queue through
 * `try_dequeue_command` after every event.
 *
 * Only File → Exit and window closing carry behavior; the other menu actions
 * are accepted and logged so they can be wired up without touching the
 * platform layer.
 */
pub struct CumulusAppLogic {
    app_identity: &'static AppIdentity,
    // Queue for commands to be executed by the platform layer.
    synchronous_command_queue: VecDeque<PlatformCommand>,
    // `None` until the main window is created and again after it is destroyed.
    ui_state: Option<MainWindowUiState>,
}

impl CumulusAppLogic {
    pub fn new(app_identity: &'static AppIdentity) -> Self {
        log::debug!(
            "AppLogic: Creating presenter for {}.",
            app_identity.display_name()
        );
        CumulusAppLogic {
            app_identity,
            synchronous_command_queue: VecDeque::new(),
            ui_state: None,
        }
    }

    fn enqueue_command(&mut self, command: PlatformCommand) {
        self.synchronous_command_queue.push_back(command);
    }

    pub fn main_window_id(&self) -> Option<WindowId> {
        self.ui_state.as_ref().map(|s| s.window_id)
    }

    fn is_main_window(&self, window_id: WindowId) -> bool {
        self.main_window_id() == Some(window_id)
    }

    /*
     * Called once the platform layer has created the (still hidden) main
     * window. Enqueues the static UI description, the command showing the
     * window, and finally the signal that lets the platform layer confirm the
     * setup back to us through `AppEvent::MainWindowUISetupComplete`.
     */
    pub fn on_main_window_created(&mut self, window_id: WindowId) {
        if let Some(previous) = &self.ui_state {
            log::warn!(
                "AppLogic: Main window {:?} replaces still registered {:?}.",
                window_id,
                previous.window_id
            );
        }
        self.ui_state = Some(MainWindowUiState::new(window_id));

        let static_layout = ui_description_layer::build_main_window_static_layout(window_id);
        log::debug!(
            "AppLogic: Enqueuing {} static layout commands for {window_id:?}.",
            static_layout.len()
        );
        self.synchronous_command_queue.extend(static_layout);
        self.enqueue_command(PlatformCommand::ShowWindow { window_id });
        self.enqueue_command(PlatformCommand::SignalMainWindowUISetupComplete { window_id });
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Exit => match self.main_window_id() {
                Some(window_id) => {
                    log::debug!(
                        "AppLogic: Exit selected. Commanding platform to close {window_id:?}."
                    );
                    self.enqueue_command(PlatformCommand::CloseWindow { window_id });
                }
                None => log::warn!("AppLogic: Exit selected but no main window is registered."),
            },
            MenuAction::Dashboard
            | MenuAction::Graphs
            | MenuAction::Records
            | MenuAction::Settings
            | MenuAction::ImportData
            | MenuAction::ExportData
            | MenuAction::About
            | MenuAction::Documentation => {
                log::debug!("AppLogic: Menu action {action:?} has no behavior yet.");
            }
        }
    }

    fn handle_main_window_setup_complete(&mut self, window_id: WindowId) {
        let Some(ui_state) = self
            .ui_state
            .as_mut()
            .filter(|s| s.window_id == window_id)
        else {
            log::warn!("AppLogic: Setup completion for unknown window {window_id:?} ignored.");
            return;
        };
        if ui_state.mark_setup_complete() {
            log::info!("{} application started", self.app_identity.name);
        } else {
            log::debug!("AppLogic: Repeated setup completion for {window_id:?} ignored.");
        }
    }

    #[cfg(test)]
    pub(crate) fn test_drain_commands(&mut self) -> Vec<PlatformCommand> {
        self.synchronous_command_queue.drain(..).collect()
    }

    #[cfg(test)]
    pub(crate) fn test_ui_state(&self) -> Option<&MainWindowUiState> {
        self.ui_state.as_ref()
    }
}

impl PlatformEventHandler for CumulusAppLogic {
    fn handle_event(&mut self, event: AppEvent) {
        log::trace!("AppLogic: Handling event {event:?}.");
        match event {
            AppEvent::MenuActionClicked { action } => self.handle_menu_action(action),
            AppEvent::WindowCloseRequestedByUser { window_id } => {
                if self.is_main_window(window_id) {
                    log::debug!(
                        "AppLogic: Main window close requested. Commanding platform to close."
                    );
                    self.enqueue_command(PlatformCommand::CloseWindow { window_id });
                } else {
                    log::warn!("AppLogic: Close requested for unknown window {window_id:?}.");
                }
            }
            AppEvent::WindowDestroyed { window_id } => {
                if self.is_main_window(window_id) {
                    log::debug!("AppLogic: Main window destroyed. Requesting application quit.");
                    self.ui_state = None;
                    self.enqueue_command(PlatformCommand::QuitApplication {
                        exit_code: NORMAL_EXIT_CODE,
                    });
                } else {
                    log::debug!("AppLogic: Ignoring destruction of unknown window {window_id:?}.");
                }
            }
            AppEvent::MainWindowUISetupComplete { window_id } => {
                self.handle_main_window_setup_complete(window_id)
            }
        }
    }

    fn on_quit(&mut self) {
        log::debug!("AppLogic: on_quit called by platform layer.");
        if !self.synchronous_command_queue.is_empty() {
            log::debug!(
                "AppLogic: Dropping {} unexecuted commands at quit.",
                self.synchronous_command_queue.len()
            );
            self.synchronous_command_queue.clear();
        }
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.synchronous_command_queue.pop_front()
    }
}
