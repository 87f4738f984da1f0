/*
 * This module defines core data types used for communication between the
 * application logic and the platform layer. It includes identifiers for windows
 * and controls, configurations for UI elements (windows, menus, labels),
 * platform-agnostic event types (`AppEvent`), commands for the platform layer
 * (`PlatformCommand`), and semantic identifiers for menu actions (`MenuAction`).
 * It also defines the `PlatformEventHandler` trait that the application logic
 * must implement.
 */

use super::error::Result as PlatformResult;
use super::styling_primitives::{ControlStyle, StyleId};
use std::sync::{Arc, Mutex};

// An opaque identifier for a native window, managed by the platform layer.
//
// The application logic layer uses this ID to refer to specific windows
// when sending commands or receiving events, without needing to know about
// native window handles like HWND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) usize);

impl WindowId {
    pub const fn new(raw: usize) -> Self {
        WindowId(raw)
    }
}

/*
 * A logical identifier for a control inside a window. The values are chosen by
 * the UI description layer (see `app_logic::ui_constants`); the platform layer
 * maps them to native handles and, on Win32, uses them as the child window ID.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(i32);

impl ControlId {
    pub const fn new(raw: i32) -> Self {
        ControlId(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

// --- Semantic Menu Action Identifiers ---

/*
 * Represents logical menu actions in a platform-agnostic way.
 * This enum is used in `MenuItemConfig` and `AppEvent` to identify menu
 * actions semantically, rather than relying on raw native command IDs.
 * The platform layer manages the mapping from these actions to
 * dynamically assigned native menu item IDs.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Exit,
    Dashboard,
    Graphs,
    Records,
    Settings,
    ImportData,
    ExportData,
    About,
    Documentation,
}

// --- Data Structures for UI Description (Platform-Agnostic) ---

// Configuration for creating a new native window.
//
// Provided by the application logic to the platform layer, describing
// the desired properties of a window without specifying native details.
// The position is in screen coordinates, the size is the outer window size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig<'a> {
    pub title: &'a str,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/*
 * Configuration for a single menu item, used by `PlatformCommand::CreateMainMenu`.
 *
 * Describes the properties of a menu item, including an optional semantic `MenuAction`
 * for event handling, its display text, and any sub-menu items. Menu items that
 * are themselves popups (e.g., a "File" menu that opens a submenu) have `action: None`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    pub action: Option<MenuAction>,
    pub text: String,
    pub children: Vec<MenuItemConfig>,
}

impl MenuItemConfig {
    pub fn action(action: MenuAction, text: &str) -> Self {
        MenuItemConfig {
            action: Some(action),
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    pub fn popup(text: &str, children: Vec<MenuItemConfig>) -> Self {
        MenuItemConfig {
            action: None,
            text: text.to_string(),
            children,
        }
    }
}

// --- Layout Primitives ---

/*
 * Defines how a control docks within its parent container. `Bottom` takes
 * `fixed_size` pixels off the bottom edge. `ProportionalFill` stacks siblings
 * vertically and shares the remaining height between them according to their
 * weights.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockStyle {
    Bottom,
    ProportionalFill { weight: f32 },
}

/*
 * A rule that associates a control (by its ID) with a specific docking style.
 * Rules sharing a parent are applied in ascending `order`. The
 * `parent_control_id` specifies the logical ID of the parent control; `None`
 * indicates the window client area is the parent.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRule {
    pub control_id: ControlId,
    pub parent_control_id: Option<ControlId>,
    pub dock_style: DockStyle,
    pub order: u32,
    pub fixed_size: Option<i32>, // Height of a Bottom dock.
    pub margin: (i32, i32, i32, i32), // (top, right, bottom, left)
}

// --- Label Classification ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    Default,
    StatusBar,
}

// Horizontal placement of a label's text inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
}

// --- Events from Platform to App Logic ---

/*
 * Represents platform-agnostic UI events generated by the native toolkit.
 *
 * The platform layer translates native OS events into these types and
 * sends them to the application logic layer for handling.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // The user asked to close the window (title bar button, Alt+F4).
    WindowCloseRequestedByUser {
        window_id: WindowId,
    },
    // Signals that a window and its native resources have been destroyed.
    // The `WindowId` should be considered invalid after this event.
    WindowDestroyed {
        window_id: WindowId,
    },
    MenuActionClicked {
        action: MenuAction,
    },
    // Signals that the initial static UI setup for the main window is complete.
    MainWindowUISetupComplete {
        window_id: WindowId,
    },
}

// Represents platform-agnostic commands sent from the application logic to the platform layer.
//
// These commands instruct the platform layer to perform specific actions on
// native UI elements.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCommand {
    CreateMainMenu {
        window_id: WindowId,
        menu_items: Vec<MenuItemConfig>,
    },
    CreateLabel {
        window_id: WindowId,
        parent_control_id: Option<ControlId>,
        control_id: ControlId,
        initial_text: String,
        class: LabelClass,
        alignment: TextAlignment,
    },
    // Registers a reusable style. Must precede any `ApplyStyleToControl` using it.
    DefineStyle {
        style_id: StyleId,
        style: ControlStyle,
    },
    ApplyStyleToControl {
        window_id: WindowId,
        control_id: ControlId,
        style_id: StyleId,
    },
    DefineLayout {
        window_id: WindowId,
        rules: Vec<LayoutRule>,
    },
    ShowWindow {
        window_id: WindowId,
    },
    CloseWindow {
        window_id: WindowId,
    },
    QuitApplication {
        exit_code: i32,
    },
    // Signals to the platform layer that all initial UI description commands
    // for the main window have been enqueued.
    SignalMainWindowUISetupComplete {
        window_id: WindowId,
    },
}

// --- Trait for App Logic to Handle Events ---

// A trait to be implemented by the application logic layer to handle UI events.
//
// The platform layer calls methods on this trait to notify the application
// logic about user interactions or system events.
pub trait PlatformEventHandler: Send + Sync + 'static {
    // Called by the platform layer when a native UI event has been processed.
    // The implementor should handle the event and enqueue `PlatformCommand`s
    // for the platform layer to execute.
    fn handle_event(&mut self, event: AppEvent);

    // Called by the platform layer when the application is about to exit its main loop.
    fn on_quit(&mut self) {}

    // Attempts to dequeue a single `PlatformCommand` from the internal queue.
    // This is called by the platform layer's run loop.
    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}

/*
 * The operations the bootstrap needs from a native toolkit backend. The Win32
 * `PlatformInterface` implements it; tests substitute scripted toolkits to
 * simulate startup failures and user interaction without a display.
 */
pub trait NativeToolkitOperations {
    // Creates a top-level window. The window stays hidden until a
    // `PlatformCommand::ShowWindow` is executed for it.
    fn create_window(&self, config: &WindowConfig) -> PlatformResult<WindowId>;

    // Executes the commands already queued by the handler, then blocks on the
    // event loop until a `QuitApplication` command is executed. Returns the
    // exit code carried by that command. A failure while executing the
    // initially queued commands is returned as an error.
    fn run(&self, event_handler: Arc<Mutex<dyn PlatformEventHandler>>) -> PlatformResult<i32>;
}
