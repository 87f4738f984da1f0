/*
 * This module is responsible for executing specific `PlatformCommand`s.
 * Each function takes the shared `Win32ApiInternalState` plus the command's
 * parameters; control-specific work is delegated to the handlers in
 * `controls`, window-level work to `window_common`.
 */

use super::app::Win32ApiInternalState;
use super::controls::{label_handler, menu_handler, styling_handler};
use super::error::Result as PlatformResult;
use super::styling_primitives::{ControlStyle, StyleId};
use super::types::{
    AppEvent, ControlId, LabelClass, LayoutRule, MenuItemConfig, TextAlignment, WindowId,
};
use super::window_common;

use std::sync::Arc;
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

pub(crate) fn execute_create_main_menu(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    menu_items: Vec<MenuItemConfig>,
) -> PlatformResult<()> {
    menu_handler::handle_create_main_menu_command(internal_state, window_id, menu_items)
}

pub(crate) fn execute_create_label(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<ControlId>,
    control_id: ControlId,
    initial_text: String,
    class: LabelClass,
    alignment: TextAlignment,
) -> PlatformResult<()> {
    label_handler::handle_create_label_command(
        internal_state,
        window_id,
        parent_control_id,
        control_id,
        initial_text,
        class,
        alignment,
    )
}

pub(crate) fn execute_define_style(
    internal_state: &Arc<Win32ApiInternalState>,
    style_id: StyleId,
    style: ControlStyle,
) -> PlatformResult<()> {
    styling_handler::handle_define_style_command(internal_state, style_id, style)
}

pub(crate) fn execute_apply_style_to_control(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: ControlId,
    style_id: StyleId,
) -> PlatformResult<()> {
    styling_handler::handle_apply_style_to_control_command(
        internal_state,
        window_id,
        control_id,
        style_id,
    )
}

/*
 * Stores the layout rules for the window and applies them right away to the
 * current client area. Later `WM_SIZE` messages re-apply them.
 */
pub(crate) fn execute_define_layout(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    rules: Vec<LayoutRule>,
) -> PlatformResult<()> {
    log::debug!(
        "CommandExecutor: execute_define_layout for {window_id:?}, with {} rules.",
        rules.len()
    );
    internal_state.with_window_data_write(window_id, |window_data| {
        window_data.set_layout_rules(rules);
        Ok(())
    })?;
    window_common::relayout_window(internal_state, window_id)
}

pub(crate) fn execute_show_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    window_common::show_window(internal_state, window_id)
}

pub(crate) fn execute_close_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    log::debug!("CommandExecutor: execute_close_window for {window_id:?}.");
    window_common::destroy_native_window(internal_state, window_id)
}

/*
 * Posts `WM_QUIT` carrying `exit_code`, which ends the message loop in
 * `PlatformInterface::run` and becomes its return value.
 */
pub(crate) fn execute_quit_application(exit_code: i32) -> PlatformResult<()> {
    log::debug!("CommandExecutor: execute_quit_application. Posting WM_QUIT({exit_code}).");
    unsafe { PostQuitMessage(exit_code) };
    Ok(())
}

/*
 * Reports `AppEvent::MainWindowUISetupComplete` back to the application logic
 * once every command describing the initial UI has been executed.
 */
pub(crate) fn execute_signal_main_window_ui_setup_complete(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    log::debug!(
        "CommandExecutor: execute_signal_main_window_ui_setup_complete for {window_id:?}"
    );
    internal_state.with_window_data_read(window_id, |_| Ok(()))?;
    internal_state.dispatch_event(AppEvent::MainWindowUISetupComplete { window_id });
    Ok(())
}
