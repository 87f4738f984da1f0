// Win32 handlers for the control kinds the main window uses.
pub(crate) mod label_handler;
pub(crate) mod menu_handler;
pub(crate) mod styling_handler;
