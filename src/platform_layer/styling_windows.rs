/*
 * Win32 side of the styling system. A `ControlStyle` becomes a
 * `ParsedControlStyle` holding the font needed to draw it; the font is
 * released when the last reference to the parsed style goes away.
 */

use super::styling_primitives::Color;

use windows::Win32::{
    Foundation::COLORREF,
    Graphics::Gdi::{DeleteObject, HFONT, HGDIOBJ},
};

// Win32 expects colors as 0x00BBGGRR.
pub(crate) fn color_to_colorref(color: &Color) -> COLORREF {
    COLORREF(u32::from(color.r) | (u32::from(color.g) << 8) | (u32::from(color.b) << 16))
}

#[derive(Debug)]
pub(crate) struct ParsedControlStyle {
    pub(crate) font_handle: Option<HFONT>,
    pub(crate) text_color: Option<Color>,
}

// SAFETY: Parsed styles are created, used and dropped on the UI thread only.
// The GDI handles are plain values that are never dereferenced elsewhere.
unsafe impl Send for ParsedControlStyle {}
unsafe impl Sync for ParsedControlStyle {}

impl Drop for ParsedControlStyle {
    fn drop(&mut self) {
        if let Some(h_font) = self.font_handle.take() {
            if !h_font.is_invalid() {
                unsafe {
                    let _ = DeleteObject(HGDIOBJ(h_font.0));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorref_is_bgr() {
        let gray = color_to_colorref(&Color::rgb(128, 128, 128));
        assert_eq!(gray.0, 0x0080_8080);

        let red = color_to_colorref(&Color::rgb(255, 0, 0));
        assert_eq!(red.0, 0x0000_00FF);
    }
}
