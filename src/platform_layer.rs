/*
 * The platform layer executes platform-agnostic `PlatformCommand`s against the
 * native GUI toolkit and reports user interaction back as `AppEvent`s. The
 * Win32 backend is compiled on Windows; other hosts get a stub whose
 * initialization reports the toolkit as unavailable.
 */
pub mod error;
pub mod layout;
pub mod styling_primitives;
pub mod types;

#[cfg(windows)]
pub mod app;
#[cfg(windows)]
pub(crate) mod command_executor;
#[cfg(windows)]
pub(crate) mod controls;
#[cfg(windows)]
pub(crate) mod styling_windows;
#[cfg(windows)]
pub(crate) mod window_common;

#[cfg(not(windows))]
pub mod stub;

#[cfg(windows)]
pub use app::PlatformInterface;
#[cfg(not(windows))]
pub use stub::PlatformInterface;

pub use error::{PlatformError, Result as PlatformResult};
pub use styling_primitives::{Color, ControlStyle, FontDescription, StyleId};
pub use types::{
    AppEvent, ControlId, DockStyle, LabelClass, LayoutRule, MenuAction, MenuItemConfig,
    NativeToolkitOperations, PlatformCommand, PlatformEventHandler, TextAlignment, WindowConfig,
    WindowId,
};
