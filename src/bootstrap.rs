/*
 * Application bootstrap. Brings up the native toolkit with the application
 * identity, creates the main window, wires the presenter (`CumulusAppLogic`)
 * into the platform layer and blocks on the event loop.
 *
 * Startup failures are classified into `StartupError`: a toolkit that cannot
 * be initialized at all is a missing dependency; anything else, including a
 * panic on the UI thread or in the window procedure, is fatal. Both end the
 * process with exit status 1 after `report_startup_error` has logged and
 * printed them.
 */
use crate::app_logic::CumulusAppLogic;
use crate::core::AppIdentity;
use crate::platform_layer::error::panic_payload_message;
use crate::platform_layer::{
    NativeToolkitOperations, PlatformError, PlatformEventHandler, PlatformResult,
};
use crate::ui_description_layer;

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Once};

const STARTUP_FAILURE_EXIT_CODE: i32 = 1;

// Printed after a missing-dependency error, telling the user how to fix it.
pub const MISSING_DEPENDENCY_REMEDIATION: &str =
    "Please run CumulusAI on Windows 10 or later, where the Win32 GUI toolkit is available.";

#[derive(Debug)]
pub enum StartupError {
    // The native GUI toolkit could not be brought up on this host.
    MissingDependency(PlatformError),
    Fatal(PlatformError),
    Panicked {
        message: String,
        backtrace: Option<String>,
    },
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        STARTUP_FAILURE_EXIT_CODE
    }

    // The lines shown to the user on standard output.
    pub fn user_message_lines(&self) -> Vec<String> {
        match self {
            StartupError::MissingDependency(_) => vec![
                "Error: Missing required dependencies.".to_string(),
                MISSING_DEPENDENCY_REMEDIATION.to_string(),
            ],
            StartupError::Fatal(_) | StartupError::Panicked { .. } => {
                vec![format!("Fatal error: {}", self.detail())]
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            StartupError::MissingDependency(e) | StartupError::Fatal(e) => e.to_string(),
            StartupError::Panicked { message, .. } => format!("panic: {message}"),
        }
    }
}

impl From<PlatformError> for StartupError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::BackendUnavailable(_) => StartupError::MissingDependency(err),
            // The hook ran on this thread when the window procedure panicked.
            PlatformError::HandlerPanicked(message) => StartupError::Panicked {
                message,
                backtrace: take_last_panic_backtrace(),
            },
            other => StartupError::Fatal(other),
        }
    }
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupError::MissingDependency(e) => write!(f, "Missing required dependencies: {e}"),
            StartupError::Fatal(_) | StartupError::Panicked { .. } => {
                write!(f, "Fatal error: {}", self.detail())
            }
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::MissingDependency(e) | StartupError::Fatal(e) => Some(e),
            StartupError::Panicked { .. } => None,
        }
    }
}

thread_local! {
    // Backtrace of the most recent panic on this thread, captured by the hook.
    static LAST_PANIC_BACKTRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

// Chains a hook in front of the current one that records the panic's backtrace.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::force_capture().to_string();
            LAST_PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
            previous_hook(info);
        }));
    });
}

fn take_last_panic_backtrace() -> Option<String> {
    LAST_PANIC_BACKTRACE.with(|slot| slot.borrow_mut().take())
}

/*
 * Runs the application to completion and returns the exit code of the event
 * loop. `init` constructs the native toolkit; it is a parameter so that tests
 * can substitute scripted toolkits.
 *
 * Panics anywhere below are caught and returned as `StartupError::Panicked`.
 */
pub fn launch<T, F>(identity: &'static AppIdentity, init: F) -> Result<i32, StartupError>
where
    T: NativeToolkitOperations,
    F: FnOnce(&AppIdentity) -> PlatformResult<T>,
{
    install_panic_hook();
    log::debug!("Bootstrap: Launching {}.", identity.display_name());

    match panic::catch_unwind(AssertUnwindSafe(|| run_application(identity, init))) {
        Ok(result) => result,
        Err(payload) => Err(StartupError::Panicked {
            message: panic_payload_message(payload.as_ref()),
            backtrace: take_last_panic_backtrace(),
        }),
    }
}

fn run_application<T, F>(identity: &'static AppIdentity, init: F) -> Result<i32, StartupError>
where
    T: NativeToolkitOperations,
    F: FnOnce(&AppIdentity) -> PlatformResult<T>,
{
    let toolkit = init(identity)?;
    log::debug!("Bootstrap: Native toolkit initialized.");

    let app_logic = Arc::new(Mutex::new(CumulusAppLogic::new(identity)));

    let main_window_id = toolkit.create_window(&ui_description_layer::main_window_config())?;
    log::debug!("Bootstrap: Main window created with {main_window_id:?}.");

    app_logic
        .lock()
        .map_err(|_| {
            PlatformError::OperationFailed("application logic mutex poisoned".to_string())
        })?
        .on_main_window_created(main_window_id);

    let event_handler: Arc<Mutex<dyn PlatformEventHandler>> = app_logic;
    let exit_code = toolkit.run(event_handler)?;
    log::debug!("Bootstrap: Event loop finished with exit code {exit_code}.");
    Ok(exit_code)
}

/*
 * Logs the failure with all available detail and prints the short form for
 * the user. Fatal errors log their complete source chain, panics their
 * backtrace when one was captured.
 */
pub fn report_startup_error(error: &StartupError) {
    log::error!("{error}");

    let mut source = std::error::Error::source(error).and_then(|e| e.source());
    while let Some(cause) = source {
        log::error!("  caused by: {cause}");
        source = cause.source();
    }
    if let StartupError::Panicked {
        backtrace: Some(backtrace),
        ..
    } = error
    {
        log::error!("Backtrace:\n{backtrace}");
    }

    for line in error.user_message_lines() {
        println!("{line}");
    }
}
