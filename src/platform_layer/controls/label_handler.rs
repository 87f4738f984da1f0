/*
 * This module is responsible for handling platform-specific logic related to
 * label controls (STATIC controls in Win32): creating them with the requested
 * alignment, and coloring them during WM_CTLCOLORSTATIC according to the
 * style applied to them.
 */

use crate::platform_layer::{
    app::Win32ApiInternalState,
    error::{PlatformError, Result as PlatformResult},
    styling_windows::color_to_colorref,
    types::{ControlId, LabelClass, TextAlignment, WindowId},
    window_common::{SS_CENTER, SS_CENTERIMAGE, SS_LEFT, SS_SUNKEN, WC_STATIC},
};

use std::sync::Arc;
use windows::{
    Win32::{
        Foundation::{HWND, LRESULT},
        Graphics::Gdi::{COLOR_WINDOW, GetSysColorBrush, HDC, SetBkMode, SetTextColor, TRANSPARENT},
        UI::WindowsAndMessaging::{
            CreateWindowExW, GetDlgCtrlID, HMENU, WINDOW_EX_STYLE, WINDOW_STYLE, WS_CHILD,
            WS_VISIBLE,
        },
    },
    core::HSTRING,
};

// Static control style bits for a label of the given class and alignment.
pub(crate) fn label_style(class: LabelClass, alignment: TextAlignment) -> WINDOW_STYLE {
    let horizontal = match alignment {
        TextAlignment::Left => SS_LEFT,
        TextAlignment::Center => SS_CENTER,
    };
    let mut style = WS_CHILD | WS_VISIBLE | SS_CENTERIMAGE | horizontal;
    if class == LabelClass::StatusBar {
        style |= SS_SUNKEN;
    }
    style
}

/*
 * Creates a native STATIC control. The logical control ID doubles as the
 * child window ID so `GetDlgCtrlID` recovers it during painting. Labels
 * without a parent control are children of the window itself.
 */
pub(crate) fn handle_create_label_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<ControlId>,
    label_id: ControlId,
    initial_text: String,
    class: LabelClass,
    alignment: TextAlignment,
) -> PlatformResult<()> {
    log::debug!(
        "LabelHandler: Creating {class:?} label {label_id:?} in {window_id:?}."
    );

    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(label_id) {
            return Err(PlatformError::OperationFailed(format!(
                "Label {label_id:?} already exists for window {window_id:?}"
            )));
        }

        let hwnd_parent = match parent_control_id {
            Some(parent_id) => window_data.get_control_hwnd(parent_id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "Parent control {parent_id:?} not found for label {label_id:?} in {window_id:?}"
                ))
            })?,
            None => window_data.get_hwnd(),
        };
        if hwnd_parent.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "No valid parent HWND for label {label_id:?} in {window_id:?}"
            )));
        }

        // CreateWindowExW only sends messages to the new STATIC control itself,
        // so holding the window map lock here does not re-enter our WndProc.
        let hwnd_label = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                WC_STATIC,
                &HSTRING::from(initial_text.as_str()),
                label_style(class, alignment),
                0,
                0,
                10,
                10, // Layout rules set the real position.
                Some(hwnd_parent),
                Some(HMENU(label_id.raw() as isize as *mut _)),
                Some(internal_state.h_instance()),
                None,
            )
        }
        .map_err(|e| {
            PlatformError::ControlCreationFailed(format!("Label {label_id:?}: {e}"))
        })?;

        window_data.register_control_hwnd(label_id, hwnd_label);
        Ok(())
    })
}

/*
 * Handles WM_CTLCOLORSTATIC for labels that have a style applied: sets the
 * style's text color on a transparent background and paints the rest of the
 * control with the window color. Returns `None` for controls we do not
 * style, leaving them to the default handling.
 */
pub(crate) fn handle_wm_ctlcolorstatic(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    hdc_static_ctrl: HDC,
    hwnd_static_ctrl: HWND,
) -> Option<LRESULT> {
    let raw_id = unsafe { GetDlgCtrlID(hwnd_static_ctrl) };
    if raw_id == 0 {
        return None;
    }
    let control_id = ControlId::new(raw_id);

    let style_id = internal_state
        .with_window_data_read(window_id, |window_data| {
            Ok(window_data.get_style_for_control(control_id))
        })
        .ok()
        .flatten()?;
    let style = internal_state.get_parsed_style(style_id)?;

    unsafe {
        if let Some(color) = &style.text_color {
            SetTextColor(hdc_static_ctrl, color_to_colorref(color));
        }
        SetBkMode(hdc_static_ctrl, TRANSPARENT);
    }
    let brush = unsafe { GetSysColorBrush(COLOR_WINDOW) };
    Some(LRESULT(brush.0 as isize))
}
