/*
 * This module defines the visual theme of the main window. It centralizes the
 * colors and fonts into reusable styles; `define_default_theme` constructs the
 * `PlatformCommand::DefineStyle` commands that the platform layer uses to
 * configure the application's appearance.
 */
use crate::platform_layer::{Color, ControlStyle, FontDescription, PlatformCommand, StyleId};

pub const HEADING_FONT_PIXEL_HEIGHT: i32 = 24;

pub const STATUS_MESSAGE_GRAY: Color = Color::rgb(128, 128, 128);

/*
 * Creates and returns the `DefineStyle` commands for every `StyleId` the main
 * window uses. The heading uses a 24 px font; the status message is gray text
 * in the default font.
 */
pub fn define_default_theme() -> Vec<PlatformCommand> {
    let default_font = FontDescription::face("Segoe UI");

    let heading_style = ControlStyle {
        font: Some(
            default_font
                .clone()
                .with_pixel_height(HEADING_FONT_PIXEL_HEIGHT),
        ),
        ..Default::default()
    };

    let status_message_style = ControlStyle {
        font: Some(default_font.clone()),
        text_color: Some(STATUS_MESSAGE_GRAY),
        ..Default::default()
    };

    let status_bar_style = ControlStyle {
        font: Some(default_font),
        ..Default::default()
    };

    vec![
        PlatformCommand::DefineStyle {
            style_id: StyleId::HeadingText,
            style: heading_style,
        },
        PlatformCommand::DefineStyle {
            style_id: StyleId::StatusMessageText,
            style: status_message_style,
        },
        PlatformCommand::DefineStyle {
            style_id: StyleId::StatusBarText,
            style: status_bar_style,
        },
    ]
}
