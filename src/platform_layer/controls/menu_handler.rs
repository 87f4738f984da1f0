/*
 * Encapsulates Win32-specific menu creation and command routing. Each menu
 * item with a `MenuAction` gets a generated command ID registered in the
 * window's data; `WM_COMMAND` maps the ID back to the action.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{AppEvent, MenuItemConfig, WindowId};
use crate::platform_layer::window_common::NativeWindowData;

use std::sync::Arc;
use windows::{
    Win32::{
        Foundation::GetLastError,
        UI::WindowsAndMessaging::{
            AppendMenuW, CreateMenu, CreatePopupMenu, DestroyMenu, DrawMenuBar, HMENU, MF_POPUP,
            MF_STRING, SetMenu,
        },
    },
    core::HSTRING,
};

/*
 * Builds the menu bar for `window_id` from `menu_items` and attaches it to the
 * window. On failure the partially built menu is destroyed.
 */
pub(crate) fn handle_create_main_menu_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    menu_items: Vec<MenuItemConfig>,
) -> PlatformResult<()> {
    let h_main_menu = unsafe { CreateMenu()? };

    let build_result = internal_state.with_window_data_write(window_id, |window_data| {
        let hwnd = window_data.get_hwnd();
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "HWND not yet valid for {window_id:?} during menu creation"
            )));
        }
        for item_config in &menu_items {
            unsafe { add_menu_item_recursive_impl(h_main_menu, item_config, window_data)? };
        }
        Ok(hwnd)
    });

    let hwnd_owner = match build_result {
        Ok(hwnd) => hwnd,
        Err(e) => {
            unsafe {
                let _ = DestroyMenu(h_main_menu);
            }
            return Err(e);
        }
    };

    unsafe {
        if SetMenu(hwnd_owner, Some(h_main_menu)).is_err() {
            let error = GetLastError();
            let _ = DestroyMenu(h_main_menu);
            return Err(PlatformError::OperationFailed(format!(
                "SetMenu failed for {window_id:?}: {error:?}"
            )));
        }
        let _ = DrawMenuBar(hwnd_owner);
    }
    log::debug!(
        "MenuHandler: Main menu with {} top-level entries set for {window_id:?}.",
        menu_items.len()
    );
    Ok(())
}

/*
 * Appends `item_config` to `parent_menu_handle`. Items with children become
 * popups; leaf items must carry an action, otherwise they are skipped.
 */
unsafe fn add_menu_item_recursive_impl(
    parent_menu_handle: HMENU,
    item_config: &MenuItemConfig,
    window_data: &mut NativeWindowData,
) -> PlatformResult<()> {
    let text = HSTRING::from(item_config.text.as_str());
    if item_config.children.is_empty() {
        let Some(action) = item_config.action else {
            log::warn!(
                "MenuHandler: Menu item '{}' has no children and no action; skipped.",
                item_config.text
            );
            return Ok(());
        };
        let menu_id = window_data.register_menu_action(action);
        log::trace!(
            "MenuHandler: {action:?} mapped to ID {menu_id} for {:?}.",
            window_data.get_id()
        );
        unsafe { AppendMenuW(parent_menu_handle, MF_STRING, menu_id as usize, &text)? };
    } else {
        let h_submenu = unsafe { CreatePopupMenu()? };
        for child_config in &item_config.children {
            unsafe { add_menu_item_recursive_impl(h_submenu, child_config, window_data)? };
        }
        unsafe { AppendMenuW(parent_menu_handle, MF_POPUP, h_submenu.0 as usize, &text)? };
    }
    Ok(())
}

// Translates a menu `WM_COMMAND` into `AppEvent::MenuActionClicked`.
pub(crate) fn handle_wm_command_for_menu(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    menu_id: i32,
) -> Option<AppEvent> {
    let action = internal_state
        .with_window_data_read(window_id, |window_data| {
            Ok(window_data.get_menu_action(menu_id))
        })
        .ok()
        .flatten();
    match action {
        Some(action) => {
            log::debug!("MenuHandler: Menu ID {menu_id} is {action:?} in {window_id:?}.");
            Some(AppEvent::MenuActionClicked { action })
        }
        None => {
            log::warn!("MenuHandler: Unknown menu ID {menu_id} in {window_id:?}.");
            None
        }
    }
}
