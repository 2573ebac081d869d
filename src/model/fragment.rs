//! Styled text fragments and the body style derived from them.

use serde::{Deserialize, Serialize};

/// Font-name substrings that mark a bold face.
const BOLD_MARKERS: [&str; 3] = ["bold", "black", "heavy"];

/// A run of text sharing one font size and style, as laid out on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Whitespace-normalized text, never empty
    pub text: String,
    /// Font size in points, rounded to 2 decimals
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font name marks a bold face
    pub is_bold: bool,
    /// Originating page (1-based)
    pub page: u32,
    /// Left edge in page space
    pub x: f32,
    /// Top-down vertical position in page space
    pub y: f32,
}

impl TextFragment {
    /// Create a fragment at the page origin.
    ///
    /// Text is whitespace-normalized, the font size rounded to 2 decimals and
    /// boldness derived from the font name.
    pub fn new(
        text: impl AsRef<str>,
        font_size: f32,
        font_name: impl Into<String>,
        page: u32,
    ) -> Self {
        let font_name = font_name.into();
        Self {
            text: normalize_whitespace(text.as_ref()),
            font_size: round_size(font_size),
            is_bold: is_bold_font(&font_name),
            font_name,
            page,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Place the fragment at a reading position (`y` grows downward).
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// The style judged to be ordinary paragraph text.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyStyle {
    /// Body font size in points
    pub font_size: f32,
    /// Body font name
    pub font_name: String,
}

impl BodyStyle {
    /// Font size assumed when a document has no text at all.
    pub const DEFAULT_FONT_SIZE: f32 = 12.0;
}

impl Default for BodyStyle {
    fn default() -> Self {
        Self {
            font_size: Self::DEFAULT_FONT_SIZE,
            font_name: String::new(),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Round a font size to 2 decimals.
pub fn round_size(size: f32) -> f32 {
    (size * 100.0).round() / 100.0
}

/// Integer key for a rounded font size, usable in hash maps and sorting.
pub(crate) fn size_key(size: f32) -> i64 {
    (size as f64 * 100.0).round() as i64
}

/// Whether a font name marks a bold face (case-insensitive).
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_normalizes_text() {
        let fragment = TextFragment::new("  Chapter \t 1:\n Overview ", 18.004, "Times", 1);
        assert_eq!(fragment.text, "Chapter 1: Overview");
        assert_eq!(fragment.font_size, 18.0);
        assert!(!fragment.is_bold);
    }

    #[test]
    fn test_bold_detection() {
        assert!(is_bold_font("Helvetica-Bold"));
        assert!(is_bold_font("ABCDEE+Arial,BOLD"));
        assert!(is_bold_font("SourceSansPro-Black"));
        assert!(!is_bold_font("Helvetica-Oblique"));
        assert!(!is_bold_font(""));
    }

    #[test]
    fn test_round_size() {
        assert_eq!(round_size(11.956), 11.96);
        assert_eq!(round_size(24.0), 24.0);
        assert_eq!(size_key(24.05), 2405);
        assert_eq!(size_key(round_size(9.999)), 1000);
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        let fragment = TextFragment::new("Économie", 12.0, "Times", 1);
        assert_eq!(fragment.char_count(), 8);
    }

    #[test]
    fn test_default_body_style() {
        let body = BodyStyle::default();
        assert_eq!(body.font_size, 12.0);
        assert!(body.font_name.is_empty());
    }
}
