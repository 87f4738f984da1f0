use super::command_executor;
use super::error::{PlatformError, Result as PlatformResult, panic_payload_message};
use super::styling_primitives::StyleId;
use super::styling_windows::ParsedControlStyle;
use super::types::{
    AppEvent, NativeToolkitOperations, PlatformCommand, PlatformEventHandler, WindowConfig,
    WindowId,
};
use super::window_common::{self, NativeWindowData};
use crate::core::AppIdentity;

use windows::{
    Win32::{
        Foundation::{GetLastError, HINSTANCE},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{ICC_STANDARD_CLASSES, INITCOMMONCONTROLSEX, InitCommonControlsEx},
            WindowsAndMessaging::{DispatchMessageW, GetMessageW, MSG, TranslateMessage},
        },
    },
    core::PCWSTR,
};

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc, Mutex, RwLock, Weak,
    atomic::{AtomicUsize, Ordering},
};

/*
 * Internal state for the Win32 platform layer.
 *
 * Holds the module instance, the data of every live window, the parsed styles
 * and a weak reference to the application's event handler, which the window
 * procedure uses to report `AppEvent`s. It is shared via `Arc` between the
 * `PlatformInterface` and the creation context of each window.
 *
 * A panic caught in the window procedure is parked in `handler_panic` until
 * the message loop returns it as `HandlerPanicked`.
 */
pub(crate) struct Win32ApiInternalState {
    h_instance: HINSTANCE,
    next_window_id_counter: AtomicUsize,
    pub(crate) active_windows: RwLock<HashMap<WindowId, NativeWindowData>>,
    application_event_handler: Mutex<Option<Weak<Mutex<dyn PlatformEventHandler>>>>,
    app_name_for_class: String,
    parsed_styles: RwLock<HashMap<StyleId, Arc<ParsedControlStyle>>>,
    handler_panic: Mutex<Option<String>>,
}

impl Win32ApiInternalState {
    /*
     * Loads the common controls library and resolves the module handle. A
     * failure to initialize the common controls means the GUI toolkit itself
     * is unusable and is reported as `BackendUnavailable`.
     */
    pub(crate) fn new(app_name_for_class: String) -> PlatformResult<Arc<Self>> {
        let icex = INITCOMMONCONTROLSEX {
            dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
            dwICC: ICC_STANDARD_CLASSES,
        };
        if !unsafe { InitCommonControlsEx(&icex) }.as_bool() {
            let error = unsafe { GetLastError() };
            log::error!("Platform: InitCommonControlsEx failed: {error:?}");
            return Err(PlatformError::BackendUnavailable(format!(
                "the Windows common controls library could not be initialized ({error:?})"
            )));
        }

        let h_module = unsafe { GetModuleHandleW(PCWSTR::null()) }.map_err(|e| {
            PlatformError::InitializationFailed(format!("GetModuleHandleW failed: {e}"))
        })?;

        Ok(Arc::new(Self {
            h_instance: HINSTANCE(h_module.0),
            next_window_id_counter: AtomicUsize::new(1),
            active_windows: RwLock::new(HashMap::new()),
            application_event_handler: Mutex::new(None),
            app_name_for_class,
            parsed_styles: RwLock::new(HashMap::new()),
            handler_panic: Mutex::new(None),
        }))
    }

    pub(crate) fn h_instance(&self) -> HINSTANCE {
        self.h_instance
    }

    pub(crate) fn app_name_for_class(&self) -> &str {
        &self.app_name_for_class
    }

    pub(crate) fn generate_window_id(&self) -> WindowId {
        WindowId::new(self.next_window_id_counter.fetch_add(1, Ordering::Relaxed))
    }

    /*
     * Runs `f` with shared access to the data of `window_id`. Fails with
     * `InvalidHandle` when the window is unknown.
     */
    pub(crate) fn with_window_data_read<R>(
        &self,
        window_id: WindowId,
        f: impl FnOnce(&NativeWindowData) -> PlatformResult<R>,
    ) -> PlatformResult<R> {
        let windows_guard = self.active_windows.read().map_err(|_| {
            PlatformError::OperationFailed("Failed to acquire read lock on windows map".into())
        })?;
        let window_data = windows_guard.get(&window_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("WindowId {window_id:?} not found"))
        })?;
        f(window_data)
    }

    pub(crate) fn with_window_data_write<R>(
        &self,
        window_id: WindowId,
        f: impl FnOnce(&mut NativeWindowData) -> PlatformResult<R>,
    ) -> PlatformResult<R> {
        let mut windows_guard = self.active_windows.write().map_err(|_| {
            PlatformError::OperationFailed("Failed to acquire write lock on windows map".into())
        })?;
        let window_data = windows_guard.get_mut(&window_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("WindowId {window_id:?} not found"))
        })?;
        f(window_data)
    }

    pub(crate) fn define_style(
        &self,
        style_id: StyleId,
        style: ParsedControlStyle,
    ) -> PlatformResult<()> {
        let mut styles = self.parsed_styles.write().map_err(|_| {
            PlatformError::OperationFailed("Failed to acquire write lock on styles".into())
        })?;
        if styles.insert(style_id, Arc::new(style)).is_some() {
            log::debug!("Platform: Style {style_id:?} redefined.");
        }
        Ok(())
    }

    pub(crate) fn get_parsed_style(&self, style_id: StyleId) -> Option<Arc<ParsedControlStyle>> {
        self.parsed_styles
            .read()
            .ok()
            .and_then(|styles| styles.get(&style_id).cloned())
    }

    /*
     * Runs `f` on behalf of the window procedure. Unwinding out of an
     * `extern "system"` function aborts the process, so a panic stops here:
     * its message is recorded and `fallback` is returned to Windows instead.
     * Only the first panic is kept.
     */
    pub(crate) fn run_guarded<R>(&self, fallback: R, f: impl FnOnce() -> R) -> R {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_payload_message(payload.as_ref());
                log::error!("Platform: Panic in window procedure: {message}");
                match self.handler_panic.lock() {
                    Ok(mut slot) => {
                        slot.get_or_insert(message);
                    }
                    Err(_) => log::error!("Platform: Panic slot poisoned."),
                }
                fallback
            }
        }
    }

    pub(crate) fn take_handler_panic(&self) -> Option<String> {
        self.handler_panic
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }

    fn set_event_handler(&self, handler: Option<Weak<Mutex<dyn PlatformEventHandler>>>) {
        match self.application_event_handler.lock() {
            Ok(mut guard) => *guard = handler,
            Err(_) => log::error!("Platform: Event handler slot poisoned."),
        }
    }

    fn event_handler(&self) -> Option<Arc<Mutex<dyn PlatformEventHandler>>> {
        self.application_event_handler
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(Weak::upgrade))
    }

    /*
     * Delivers an event to the application logic. Events that arrive before
     * `run` has installed the handler (e.g. the first `WM_SIZE` during window
     * creation) are dropped.
     */
    pub(crate) fn dispatch_event(&self, event: AppEvent) {
        let Some(handler) = self.event_handler() else {
            log::trace!("Platform: No event handler yet, dropping {event:?}.");
            return;
        };
        match handler.lock() {
            Ok(mut handler_guard) => handler_guard.handle_event(event),
            Err(_) => log::error!("Platform: Event handler mutex poisoned, dropping {event:?}."),
        };
    }

    /*
     * Executes queued commands until the handler's queue is empty. The handler
     * lock is only held while dequeuing, never while a command runs, because
     * commands re-enter the window procedure which reports new events.
     */
    fn drain_commands(
        self: &Arc<Self>,
        handler: &Arc<Mutex<dyn PlatformEventHandler>>,
        stop_on_error: bool,
    ) -> PlatformResult<()> {
        loop {
            let command = handler
                .lock()
                .map_err(|_| PlatformError::OperationFailed("Event handler mutex poisoned".into()))?
                .try_dequeue_command();
            let Some(command) = command else {
                return Ok(());
            };
            if let Err(e) = self.execute_command(command) {
                if stop_on_error {
                    return Err(e);
                }
                log::error!("Platform: Error executing command: {e}");
            }
        }
    }

    fn execute_command(self: &Arc<Self>, command: PlatformCommand) -> PlatformResult<()> {
        log::trace!("Platform: Executing {command:?}.");
        match command {
            PlatformCommand::CreateMainMenu {
                window_id,
                menu_items,
            } => command_executor::execute_create_main_menu(self, window_id, menu_items),
            PlatformCommand::CreateLabel {
                window_id,
                parent_control_id,
                control_id,
                initial_text,
                class,
                alignment,
            } => command_executor::execute_create_label(
                self,
                window_id,
                parent_control_id,
                control_id,
                initial_text,
                class,
                alignment,
            ),
            PlatformCommand::DefineStyle { style_id, style } => {
                command_executor::execute_define_style(self, style_id, style)
            }
            PlatformCommand::ApplyStyleToControl {
                window_id,
                control_id,
                style_id,
            } => command_executor::execute_apply_style_to_control(
                self, window_id, control_id, style_id,
            ),
            PlatformCommand::DefineLayout { window_id, rules } => {
                command_executor::execute_define_layout(self, window_id, rules)
            }
            PlatformCommand::ShowWindow { window_id } => {
                command_executor::execute_show_window(self, window_id)
            }
            PlatformCommand::CloseWindow { window_id } => {
                command_executor::execute_close_window(self, window_id)
            }
            PlatformCommand::QuitApplication { exit_code } => {
                command_executor::execute_quit_application(exit_code)
            }
            PlatformCommand::SignalMainWindowUISetupComplete { window_id } => {
                command_executor::execute_signal_main_window_ui_setup_complete(self, window_id)
            }
        }
    }
}

/*
 * The Win32 implementation of the native toolkit. Construction initializes the
 * toolkit for the given application identity and registers the window class.
 */
pub struct PlatformInterface {
    internal_state: Arc<Win32ApiInternalState>,
}

impl PlatformInterface {
    pub fn new(identity: &AppIdentity) -> PlatformResult<Self> {
        log::debug!(
            "Platform: Initializing Win32 toolkit for {}.",
            identity.display_name()
        );
        let internal_state = Win32ApiInternalState::new(identity.name.to_string())?;
        window_common::register_window_class(&internal_state)?;
        Ok(PlatformInterface { internal_state })
    }
}

impl NativeToolkitOperations for PlatformInterface {
    fn create_window(&self, config: &WindowConfig) -> PlatformResult<WindowId> {
        let window_id = self.internal_state.generate_window_id();

        // Registered before creation so messages sent during CreateWindowExW find it.
        self.internal_state
            .active_windows
            .write()
            .map_err(|_| {
                PlatformError::OperationFailed("Failed to lock windows map for insert".into())
            })?
            .insert(window_id, NativeWindowData::new(window_id));

        let created =
            window_common::create_native_window(&self.internal_state, window_id, config);
        let hwnd = match created {
            Ok(hwnd) => hwnd,
            Err(e) => {
                if let Ok(mut windows_guard) = self.internal_state.active_windows.write() {
                    windows_guard.remove(&window_id);
                }
                return Err(e);
            }
        };

        self.internal_state
            .with_window_data_write(window_id, |window_data| {
                window_data.set_hwnd(hwnd);
                Ok(())
            })
            .map_err(|e| PlatformError::WindowCreationFailed(format!("{e}")))?;

        log::debug!("Platform: Created window {window_id:?} with HWND {hwnd:?}.");
        Ok(window_id)
    }

    /*
     * Runs the Win32 message loop. Commands queued before the loop starts
     * build the initial UI; a failure there is returned. Afterwards, commands
     * are drained after every dispatched message and failures are logged.
     * Returns the exit code posted with `WM_QUIT`.
     */
    fn run(&self, event_handler: Arc<Mutex<dyn PlatformEventHandler>>) -> PlatformResult<i32> {
        self.internal_state
            .set_event_handler(Some(Arc::downgrade(&event_handler)));

        let result = self.run_message_loop(&event_handler);

        if let Ok(mut handler_guard) = event_handler.lock() {
            handler_guard.on_quit();
        }
        self.internal_state.set_event_handler(None);
        result
    }
}

impl PlatformInterface {
    // A panic recorded by the window procedure ends the loop.
    fn check_handler_panic(&self) -> PlatformResult<()> {
        match self.internal_state.take_handler_panic() {
            Some(message) => Err(PlatformError::HandlerPanicked(message)),
            None => Ok(()),
        }
    }

    fn run_message_loop(
        &self,
        event_handler: &Arc<Mutex<dyn PlatformEventHandler>>,
    ) -> PlatformResult<i32> {
        let initial = self.internal_state.drain_commands(event_handler, true);
        self.check_handler_panic()?;
        initial?;

        let mut msg = MSG::default();
        loop {
            let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            match result.0 {
                0 => {
                    self.check_handler_panic()?;
                    let exit_code = msg.wParam.0 as i32;
                    log::debug!("Platform: WM_QUIT received with exit code {exit_code}.");
                    return Ok(exit_code);
                }
                -1 => {
                    let last_error = unsafe { GetLastError() };
                    log::error!("Platform: GetMessageW failed: {last_error:?}");
                    return Err(PlatformError::OperationFailed(format!(
                        "GetMessageW failed: {last_error:?}"
                    )));
                }
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
            self.check_handler_panic()?;
            self.internal_state.drain_commands(event_handler, false)?;
            self.check_handler_panic()?;
        }
    }
}
