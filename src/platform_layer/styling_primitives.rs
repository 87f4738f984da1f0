/*
 * Style values shared by the UI description layer and the platform layer.
 * Nothing here knows about GDI; the Win32 backend turns a `ControlStyle`
 * into fonts when it executes `DefineStyle`.
 */

// An opaque RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/*
 * A font request. `None` fields fall back to the toolkit's choice, so a
 * style can set only the height and keep the default face.
 * `pixel_height` is the character height in device pixels.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontDescription {
    pub name: Option<String>,
    pub pixel_height: Option<i32>,
}

impl FontDescription {
    pub fn face(name: &str) -> Self {
        FontDescription {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_pixel_height(self, pixel_height: i32) -> Self {
        FontDescription {
            pixel_height: Some(pixel_height),
            ..self
        }
    }
}

// Everything a label can be styled with. Unset parts keep the native look.
// Backgrounds always follow the window color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlStyle {
    pub font: Option<FontDescription>,
    pub text_color: Option<Color>,
}

// The styles the main window defines, one per kind of text it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    HeadingText,
    StatusMessageText,
    StatusBarText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_builder_keeps_face_and_sets_height() {
        let font = FontDescription::face("Segoe UI").with_pixel_height(24);

        assert_eq!(font.name.as_deref(), Some("Segoe UI"));
        assert_eq!(font.pixel_height, Some(24));
    }
}
