/*
 * Window-level plumbing for the Win32 backend: the per-window native data,
 * window class registration, window creation and the window procedure that
 * translates native messages into `AppEvent`s. Control-specific messages are
 * delegated to the handlers in `controls`.
 */
use super::app::Win32ApiInternalState;
use super::controls::{label_handler, menu_handler};
use super::error::{PlatformError, Result as PlatformResult};
use super::layout::{self, ControlRect};
use super::styling_primitives::StyleId;
use super::types::{AppEvent, ControlId, LayoutRule, MenuAction, WindowConfig, WindowId};

use windows::{
    Win32::{
        Foundation::{
            ERROR_INVALID_WINDOW_HANDLE, GetLastError, HWND, LPARAM, LRESULT, RECT, WPARAM,
        },
        Graphics::Gdi::{COLOR_WINDOW, HBRUSH, HDC},
        UI::WindowsAndMessaging::*,
    },
    core::{HSTRING, PCWSTR, w},
};

use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::Arc;

pub(crate) const HWND_INVALID: HWND = HWND(std::ptr::null_mut());

pub(crate) const WC_STATIC: PCWSTR = w!("STATIC");

// Static control styles, declared as `WINDOW_STYLE` so they combine with `WS_*`.
pub(crate) const SS_LEFT: WINDOW_STYLE = WINDOW_STYLE(0x0000_0000);
pub(crate) const SS_CENTER: WINDOW_STYLE = WINDOW_STYLE(0x0000_0001);
pub(crate) const SS_CENTERIMAGE: WINDOW_STYLE = WINDOW_STYLE(0x0000_0200);
pub(crate) const SS_SUNKEN: WINDOW_STYLE = WINDOW_STYLE(0x0000_1000);

// Menu item IDs are generated from here upwards, well clear of control IDs.
const FIRST_MENU_ITEM_ID: i32 = 20000;

/*
 * Holds native data associated with a specific window managed by the platform
 * layer: the window handle, the handles of its child controls keyed by their
 * logical `ControlId`, the menu item ID to `MenuAction` mapping, the layout
 * rules and the styles applied to its controls.
 */
#[derive(Debug)]
pub(crate) struct NativeWindowData {
    this_window_hwnd: HWND,
    logical_window_id: WindowId,
    control_hwnd_map: HashMap<ControlId, HWND>,
    menu_action_map: HashMap<i32, MenuAction>,
    next_menu_item_id_counter: i32,
    layout_rules: Option<Vec<LayoutRule>>,
    applied_styles: HashMap<ControlId, StyleId>,
}

impl NativeWindowData {
    pub(crate) fn new(logical_window_id: WindowId) -> Self {
        NativeWindowData {
            this_window_hwnd: HWND_INVALID,
            logical_window_id,
            control_hwnd_map: HashMap::new(),
            menu_action_map: HashMap::new(),
            next_menu_item_id_counter: FIRST_MENU_ITEM_ID,
            layout_rules: None,
            applied_styles: HashMap::new(),
        }
    }

    pub(crate) fn get_hwnd(&self) -> HWND {
        self.this_window_hwnd
    }

    pub(crate) fn set_hwnd(&mut self, hwnd: HWND) {
        self.this_window_hwnd = hwnd;
    }

    pub(crate) fn get_id(&self) -> WindowId {
        self.logical_window_id
    }

    pub(crate) fn has_control(&self, control_id: ControlId) -> bool {
        self.control_hwnd_map.contains_key(&control_id)
    }

    pub(crate) fn get_control_hwnd(&self, control_id: ControlId) -> Option<HWND> {
        self.control_hwnd_map.get(&control_id).copied()
    }

    pub(crate) fn register_control_hwnd(&mut self, control_id: ControlId, hwnd: HWND) {
        self.control_hwnd_map.insert(control_id, hwnd);
    }

    pub(crate) fn register_menu_action(&mut self, action: MenuAction) -> i32 {
        let id = self.next_menu_item_id_counter;
        self.next_menu_item_id_counter += 1;
        self.menu_action_map.insert(id, action);
        id
    }

    pub(crate) fn get_menu_action(&self, menu_id: i32) -> Option<MenuAction> {
        self.menu_action_map.get(&menu_id).copied()
    }

    pub(crate) fn set_layout_rules(&mut self, rules: Vec<LayoutRule>) {
        self.layout_rules = Some(rules);
    }

    pub(crate) fn apply_style_to_control(&mut self, control_id: ControlId, style_id: StyleId) {
        self.applied_styles.insert(control_id, style_id);
    }

    pub(crate) fn get_style_for_control(&self, control_id: ControlId) -> Option<StyleId> {
        self.applied_styles.get(&control_id).copied()
    }

    /*
     * Computes where every laid-out control goes for the given client size.
     * Controls without a native handle yet are skipped; they are placed on the
     * next layout pass after they exist.
     */
    pub(crate) fn compute_control_placements(
        &self,
        client_width: i32,
        client_height: i32,
    ) -> Vec<(ControlId, HWND, ControlRect)> {
        let Some(rules) = &self.layout_rules else {
            return Vec::new();
        };
        let rects = layout::calculate_layout(rules, client_width, client_height);
        let mut placements: Vec<(ControlId, HWND, ControlRect)> = rects
            .into_iter()
            .filter_map(|(control_id, rect)| {
                self.get_control_hwnd(control_id)
                    .map(|hwnd| (control_id, hwnd, rect))
            })
            .collect();
        placements.sort_by_key(|(control_id, _, _)| *control_id);
        placements
    }
}

/*
 * Context passed to `CreateWindowExW` via `lpCreateParams`.
 * This allows the static `WndProc` to retrieve the necessary `Arc`-ed state
 * for the specific window instance being created.
 */
struct WindowCreationContext {
    internal_state_arc: Arc<Win32ApiInternalState>,
    window_id: WindowId,
}

fn window_class_name(internal_state: &Win32ApiInternalState) -> HSTRING {
    HSTRING::from(format!(
        "{}_PlatformWindowClass",
        internal_state.app_name_for_class()
    ))
}

/*
 * Registers the window class for the application's top-level windows. Safe to
 * call more than once; an already registered class is left as it is.
 */
pub(crate) fn register_window_class(
    internal_state: &Arc<Win32ApiInternalState>,
) -> PlatformResult<()> {
    let class_name = window_class_name(internal_state);
    let class_name_pcwstr = PCWSTR(class_name.as_ptr());
    let h_instance = internal_state.h_instance();

    unsafe {
        let mut existing = WNDCLASSEXW::default();
        if GetClassInfoExW(Some(h_instance), class_name_pcwstr, &mut existing).is_ok() {
            log::debug!("Platform: Window class {class_name} already registered.");
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(facade_wnd_proc_router),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: h_instance,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: class_name_pcwstr,
            hIconSm: LoadIconW(None, IDI_APPLICATION)?,
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            log::error!("Platform: RegisterClassExW failed: {error:?}");
            return Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )));
        }
    }
    log::debug!("Platform: Registered window class {class_name}.");
    Ok(())
}

/*
 * Creates the native top-level window, initially hidden, at the position and
 * outer size given by `config`.
 */
pub(crate) fn create_native_window(
    internal_state_arc: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    config: &WindowConfig,
) -> PlatformResult<HWND> {
    let class_name = window_class_name(internal_state_arc);

    let creation_context = Box::into_raw(Box::new(WindowCreationContext {
        internal_state_arc: Arc::clone(internal_state_arc),
        window_id,
    }));

    let result = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            &class_name,
            &HSTRING::from(config.title),
            WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN,
            config.x,
            config.y,
            config.width,
            config.height,
            None,
            None,
            Some(internal_state_arc.h_instance()),
            Some(creation_context as *const c_void),
        )
    };

    match result {
        Ok(hwnd) => Ok(hwnd),
        Err(e) => {
            // The context may already have been released by WM_NCDESTROY, so it
            // is not reclaimed here. This path ends the application anyway.
            log::error!("Platform: CreateWindowExW failed for {window_id:?}: {e:?}");
            Err(PlatformError::WindowCreationFailed(format!(
                "CreateWindowExW failed for '{}': {e}",
                config.title
            )))
        }
    }
}

/*
 * The window procedure router for all windows created by this platform layer.
 * It recovers the `WindowCreationContext` stored in `GWLP_USERDATA` during
 * `WM_NCCREATE` and forwards the message to `handle_window_message`.
 */
unsafe extern "system" fn facade_wnd_proc_router(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context_ptr = if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        let context_raw_ptr = create_struct.lpCreateParams as *mut WindowCreationContext;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, context_raw_ptr as isize) };
        context_raw_ptr
    } else {
        unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowCreationContext }
    };

    if context_ptr.is_null() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let context = unsafe { &*context_ptr };
    let state = &context.internal_state_arc;
    let result = state.run_guarded(LRESULT(0), || {
        state.handle_window_message(hwnd, msg, wparam, lparam, context.window_id)
    });

    if msg == WM_NCDESTROY {
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
        drop(unsafe { Box::from_raw(context_ptr) });
    }

    result
}

#[inline]
pub(crate) fn loword_from_lparam(lparam: LPARAM) -> i32 {
    (lparam.0 & 0xFFFF) as i32
}

#[inline]
pub(crate) fn hiword_from_lparam(lparam: LPARAM) -> i32 {
    ((lparam.0 >> 16) & 0xFFFF) as i32
}

#[inline]
pub(crate) fn loword_from_wparam(wparam: WPARAM) -> i32 {
    (wparam.0 & 0xFFFF) as i32
}

#[inline]
pub(crate) fn hiword_from_wparam(wparam: WPARAM) -> i32 {
    ((wparam.0 >> 16) & 0xFFFF) as i32
}

impl Win32ApiInternalState {
    fn handle_window_message(
        self: &Arc<Self>,
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
        window_id: WindowId,
    ) -> LRESULT {
        match msg {
            WM_SIZE => {
                let width = loword_from_lparam(lparam);
                let height = hiword_from_lparam(lparam);
                apply_layout(self, window_id, width, height);
                LRESULT(0)
            }
            WM_COMMAND => {
                // Menu commands carry no control handle and a zero notification code.
                if lparam.0 == 0 && hiword_from_wparam(wparam) == 0 {
                    let menu_id = loword_from_wparam(wparam);
                    if let Some(event) =
                        menu_handler::handle_wm_command_for_menu(self, window_id, menu_id)
                    {
                        self.dispatch_event(event);
                        return LRESULT(0);
                    }
                }
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_CTLCOLORSTATIC => {
                let hdc_static = HDC(wparam.0 as *mut c_void);
                let hwnd_static = HWND(lparam.0 as *mut c_void);
                label_handler::handle_wm_ctlcolorstatic(self, window_id, hdc_static, hwnd_static)
                    .unwrap_or_else(|| unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) })
            }
            WM_CLOSE => {
                log::debug!("Platform: WM_CLOSE for {window_id:?}.");
                // The application logic decides; it answers with `CloseWindow`.
                self.dispatch_event(AppEvent::WindowCloseRequestedByUser { window_id });
                LRESULT(0)
            }
            WM_DESTROY => {
                log::debug!("Platform: WM_DESTROY for {window_id:?}.");
                if let Ok(mut windows_guard) = self.active_windows.write() {
                    windows_guard.remove(&window_id);
                }
                self.dispatch_event(AppEvent::WindowDestroyed { window_id });
                LRESULT(0)
            }
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }
}

/*
 * Positions the window's controls for the given client size. The placements
 * are computed under the read lock; the native calls happen after it is
 * released because `SetWindowPos` can synchronously re-enter the window
 * procedure.
 */
pub(crate) fn apply_layout(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    client_width: i32,
    client_height: i32,
) {
    let placements = match internal_state.with_window_data_read(window_id, |window_data| {
        Ok(window_data.compute_control_placements(client_width, client_height))
    }) {
        Ok(placements) => placements,
        Err(e) => {
            log::debug!("Platform: No layout applied for {window_id:?}: {e}");
            return;
        }
    };

    for (control_id, hwnd_control, rect) in placements {
        let result = unsafe {
            SetWindowPos(
                hwnd_control,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
        if let Err(e) = result {
            log::warn!("Platform: SetWindowPos failed for {control_id:?} in {window_id:?}: {e:?}");
        }
    }
}

// Re-runs the layout against the window's current client area.
pub(crate) fn relayout_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| {
        Ok(window_data.get_hwnd())
    })?;
    let mut client_rect = RECT::default();
    unsafe { GetClientRect(hwnd, &mut client_rect)? };
    apply_layout(
        internal_state,
        window_id,
        client_rect.right - client_rect.left,
        client_rect.bottom - client_rect.top,
    );
    Ok(())
}

pub(crate) fn show_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| {
        let hwnd = window_data.get_hwnd();
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "HWND for WindowId {window_id:?} is invalid"
            )));
        }
        Ok(hwnd)
    })?;
    log::debug!("Platform: Showing {window_id:?}.");
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
    }
    Ok(())
}

/*
 * Destroys a native window in response to `CloseWindow`. `DestroyWindow`
 * sends `WM_DESTROY` synchronously, which removes the window data and
 * reports `WindowDestroyed`; the map lock is released before that happens.
 */
pub(crate) fn destroy_native_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    let hwnd_to_destroy = internal_state
        .active_windows
        .read()
        .map_err(|_| {
            PlatformError::OperationFailed(
                "Failed to acquire read lock on windows map for destroy_native_window".into(),
            )
        })?
        .get(&window_id)
        .map(|window_data| window_data.get_hwnd());

    let Some(hwnd) = hwnd_to_destroy else {
        log::debug!("Platform: {window_id:?} not found for destroy, likely already destroyed.");
        return Ok(());
    };

    log::debug!("Platform: Calling DestroyWindow for {window_id:?}.");
    if unsafe { DestroyWindow(hwnd) }.is_err() {
        let err = unsafe { GetLastError() };
        if err != ERROR_INVALID_WINDOW_HANDLE {
            return Err(PlatformError::OperationFailed(format!(
                "DestroyWindow failed for {window_id:?}: {err:?}"
            )));
        }
        log::debug!("Platform: DestroyWindow for {window_id:?} reported an invalid handle.");
    }
    Ok(())
}
