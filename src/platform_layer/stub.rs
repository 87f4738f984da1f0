/*
 * Non-Windows platform stub. There is no native toolkit backend for these
 * hosts yet, so initialization fails with `PlatformError::BackendUnavailable`,
 * which the bootstrap reports as a missing dependency. The type mirrors the
 * public surface of the Win32 `PlatformInterface` so the rest of the crate
 * compiles unchanged.
 */

use super::error::{PlatformError, Result as PlatformResult};
use super::types::{NativeToolkitOperations, PlatformEventHandler, WindowConfig, WindowId};
use crate::core::AppIdentity;

use std::sync::{Arc, Mutex};

pub struct PlatformInterface {
    _private: (),
}

impl PlatformInterface {
    pub fn new(identity: &AppIdentity) -> PlatformResult<Self> {
        log::debug!(
            "Platform: No native backend for target OS '{}' (app '{}').",
            std::env::consts::OS,
            identity.name
        );
        Err(PlatformError::BackendUnavailable(format!(
            "{} {} requires the Win32 GUI toolkit, which is not available on '{}'",
            identity.name,
            identity.version,
            std::env::consts::OS
        )))
    }
}

impl NativeToolkitOperations for PlatformInterface {
    fn create_window(&self, config: &WindowConfig) -> PlatformResult<WindowId> {
        Err(PlatformError::WindowCreationFailed(format!(
            "no native backend to create window '{}'",
            config.title
        )))
    }

    fn run(&self, _event_handler: Arc<Mutex<dyn PlatformEventHandler>>) -> PlatformResult<i32> {
        Err(PlatformError::OperationFailed(
            "no native backend event loop".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::APP_IDENTITY;

    #[test]
    fn test_stub_reports_backend_unavailable() {
        let result = PlatformInterface::new(&APP_IDENTITY);
        match result {
            Err(PlatformError::BackendUnavailable(detail)) => {
                assert!(detail.contains("CumulusAI"));
                assert!(detail.contains(std::env::consts::OS));
            }
            Err(other) => panic!("Expected BackendUnavailable, got {other:?}"),
            Ok(_) => panic!("Stub backend must not initialize"),
        }
    }
}
