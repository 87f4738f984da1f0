use std::any::Any;

#[cfg(windows)]
use windows::core::Error as WinError;

/*
 * Failures of the native toolkit backend. `BackendUnavailable` is special:
 * it means the toolkit could not be brought up on this host at all, which
 * the bootstrap reports as a missing dependency rather than a crash.
 */
#[derive(Debug, Clone)]
pub enum PlatformError {
    #[cfg(windows)]
    Win32(WinError),
    BackendUnavailable(String),
    // Toolkit present, but setting it up for this process failed.
    InitializationFailed(String),
    WindowCreationFailed(String),
    ControlCreationFailed(String),
    // A window or control ID with no live native object behind it.
    InvalidHandle(String),
    OperationFailed(String),
    // The application's event handler panicked inside the window procedure.
    HandlerPanicked(String),
}

#[cfg(windows)]
impl From<WinError> for PlatformError {
    fn from(err: WinError) -> Self {
        PlatformError::Win32(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(windows)]
            PlatformError::Win32(e) => write!(f, "Win32 API call failed: {e}"),
            PlatformError::BackendUnavailable(detail) => {
                write!(f, "native GUI toolkit unavailable: {detail}")
            }
            PlatformError::InitializationFailed(detail) => {
                write!(f, "toolkit initialization failed: {detail}")
            }
            PlatformError::WindowCreationFailed(detail) => {
                write!(f, "could not create window: {detail}")
            }
            PlatformError::ControlCreationFailed(detail) => {
                write!(f, "could not create control: {detail}")
            }
            PlatformError::InvalidHandle(detail) => {
                write!(f, "unknown window or control: {detail}")
            }
            PlatformError::OperationFailed(detail) => write!(f, "{detail}"),
            PlatformError::HandlerPanicked(detail) => {
                write!(f, "event handler panicked: {detail}")
            }
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(windows)]
            PlatformError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

// The text of a caught panic, as passed to `panic!`.
pub(crate) fn panic_payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
