/*
 * Turns platform-agnostic style descriptions into GDI resources and applies
 * them to controls. Fonts are sent to the control with `WM_SETFONT`; colors
 * are picked up later by the label handler during `WM_CTLCOLORSTATIC`.
 */

use crate::platform_layer::{
    app::Win32ApiInternalState,
    error::{PlatformError, Result as PlatformResult},
    styling_primitives::{ControlStyle, StyleId},
    styling_windows::ParsedControlStyle,
    types::{ControlId, WindowId},
};

use std::sync::Arc;
use windows::{
    Win32::{
        Foundation::{GetLastError, LPARAM, WPARAM},
        Graphics::Gdi::{
            CLIP_DEFAULT_PRECIS, CreateFontW, DEFAULT_CHARSET, DEFAULT_QUALITY, FF_DONTCARE,
            FW_NORMAL, HFONT, InvalidateRect, OUT_DEFAULT_PRECIS,
        },
        UI::WindowsAndMessaging::{SendMessageW, WM_SETFONT},
    },
    core::HSTRING,
};

const DEFAULT_FONT_NAME: &str = "MS Shell Dlg 2";

/*
 * Creates the GDI objects for `style`. A pixel height is passed to the font
 * mapper as a negative value, which selects by character height rather than
 * cell height; no height lets the mapper use its default.
 */
pub(crate) fn parse_style(style: ControlStyle) -> PlatformResult<ParsedControlStyle> {
    let font_handle: Option<HFONT> = match &style.font {
        Some(font_desc) => {
            let height = font_desc.pixel_height.map_or(0, |px| -px);
            let face = HSTRING::from(font_desc.name.as_deref().unwrap_or(DEFAULT_FONT_NAME));
            let h_font = unsafe {
                CreateFontW(
                    height,
                    0,
                    0,
                    0,
                    FW_NORMAL.0 as i32,
                    0,
                    0,
                    0,
                    DEFAULT_CHARSET,
                    OUT_DEFAULT_PRECIS,
                    CLIP_DEFAULT_PRECIS,
                    DEFAULT_QUALITY,
                    FF_DONTCARE.0 as u32,
                    &face,
                )
            };
            if h_font.is_invalid() {
                let error = unsafe { GetLastError() };
                log::error!("StylingHandler: CreateFontW failed: {error:?}");
                return Err(PlatformError::OperationFailed(format!(
                    "CreateFontW failed: {error:?}"
                )));
            }
            Some(h_font)
        }
        None => None,
    };

    Ok(ParsedControlStyle {
        font_handle,
        text_color: style.text_color,
    })
}

pub(crate) fn handle_define_style_command(
    internal_state: &Arc<Win32ApiInternalState>,
    style_id: StyleId,
    style: ControlStyle,
) -> PlatformResult<()> {
    log::debug!("StylingHandler: Defining style {style_id:?}.");
    let parsed = parse_style(style)?;
    internal_state.define_style(style_id, parsed)
}

/*
 * Records the style for the control and pushes its font to the native
 * control. The window map lock is released before `SendMessageW`, which
 * dispatches synchronously.
 */
pub(crate) fn handle_apply_style_to_control_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: ControlId,
    style_id: StyleId,
) -> PlatformResult<()> {
    let style = internal_state.get_parsed_style(style_id).ok_or_else(|| {
        PlatformError::OperationFailed(format!("Style {style_id:?} has not been defined"))
    })?;

    let hwnd_control = internal_state.with_window_data_write(window_id, |window_data| {
        let hwnd = window_data.get_control_hwnd(control_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Control {control_id:?} not found in {window_id:?} for style {style_id:?}"
            ))
        })?;
        window_data.apply_style_to_control(control_id, style_id);
        Ok(hwnd)
    })?;

    unsafe {
        if let Some(h_font) = style.font_handle {
            SendMessageW(
                hwnd_control,
                WM_SETFONT,
                Some(WPARAM(h_font.0 as usize)),
                Some(LPARAM(1)),
            );
        }
        let _ = InvalidateRect(Some(hwnd_control), None, true);
    }
    log::debug!("StylingHandler: Applied {style_id:?} to {control_id:?} in {window_id:?}.");
    Ok(())
}
