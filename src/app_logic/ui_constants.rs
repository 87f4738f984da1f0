/*
 * Defines shared constants for the main window: its title and geometry, the
 * texts it shows, and the logical identifiers of its controls. The IDs are used
 * by the `ui_description_layer` to define the initial UI structure and by the
 * platform layer to map them to native UI element handles.
 */

use crate::platform_layer::types::ControlId;

pub const MAIN_WINDOW_TITLE: &str = "CumulusAI - Weather Station";

// Initial geometry of the main window: (x, y, width, height).
pub const MAIN_WINDOW_GEOMETRY: (i32, i32, i32, i32) = (100, 100, 1200, 800);

pub const HEADING_TEXT: &str = "CumulusAI - Coming Soon!";
pub const STATUS_MESSAGE_TEXT: &str = "Application Status: Initializing...";
pub const STATUS_BAR_READY_TEXT: &str = "Ready";

// Logical ID for the centered heading in the content area.
pub const HEADING_LABEL_ID: ControlId = ControlId::new(1001);

// Logical ID for the gray status message below the heading.
pub const STATUS_MESSAGE_LABEL_ID: ControlId = ControlId::new(1002);

// Logical ID for the label docked at the bottom, acting as the status bar.
pub const STATUS_BAR_LABEL_ID: ControlId = ControlId::new(1010);

pub const STATUS_BAR_HEIGHT: i32 = 22;

// Padding around the labels, applied as layout margins.
pub const HEADING_PADDING: i32 = 20;
pub const STATUS_MESSAGE_PADDING: i32 = 10;
