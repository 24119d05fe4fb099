//! Font metrics and text measurement using `ttf-parser`.
//!
//! The engine measures in a single typeface with bold/italic variants.
//! When no real font bytes are loaded, Helvetica-like synthetic metrics and
//! an average-advance heuristic keep measurement deterministic, which is what
//! the tests rely on.

use std::collections::HashMap;

/// Bold/italic variant selector within the resume typeface.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct FontVariant {
    pub bold: bool,
    pub italic: bool,
}

impl FontVariant {
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
    };
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
    };
    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
    };
}

/// A loaded font face with metrics.
#[derive(Clone)]
struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API); empty for
    /// synthetic metrics.
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Manages the loaded variants of the resume typeface.
pub struct FontManager {
    fonts: HashMap<FontVariant, FontData>,
}

impl FontManager {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        // Helvetica-like synthetic metrics for every variant.
        for variant in [
            FontVariant::REGULAR,
            FontVariant::BOLD,
            FontVariant::ITALIC,
            FontVariant {
                bold: true,
                italic: true,
            },
        ] {
            fonts.insert(
                variant,
                FontData {
                    bytes: Vec::new(),
                    units_per_em: 1000.0,
                },
            );
        }
        Self { fonts }
    }

    /// Load a TTF/OTF variant from bytes, replacing the synthetic metrics.
    pub fn load_font(&mut self, variant: FontVariant, bytes: Vec<u8>) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("failed to parse font: {e}"))?;
        let data = FontData {
            units_per_em: face.units_per_em() as f32,
            bytes,
        };
        self.fonts.insert(variant, data);
        Ok(())
    }

    fn get(&self, variant: FontVariant) -> &FontData {
        self.fonts
            .get(&variant)
            .or_else(|| self.fonts.get(&FontVariant::REGULAR))
            .expect("regular variant always registered")
    }

    /// Measure the width of a string at a given font size (points).
    ///
    /// With real font bytes we sum glyph advances; otherwise an average
    /// character width heuristic (0.5 × size, bold ~10% wider) applies.
    pub fn measure_text_width(&self, text: &str, font_size: f32, variant: FontVariant) -> f32 {
        let data = self.get(variant);

        if data.bytes.is_empty() {
            let avg = if variant.bold { 0.55 } else { 0.5 };
            return text.chars().count() as f32 * font_size * avg;
        }

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = font_size / data.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                if let Some(gid) = face.glyph_index(ch) {
                    width += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                } else {
                    width += font_size * 0.5;
                }
            }
            width
        } else {
            text.chars().count() as f32 * font_size * 0.5
        }
    }

    /// Line height in points for a font size and line-height factor.
    pub fn line_height(&self, font_size: f32, factor: f32) -> f32 {
        font_size * factor
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy word-wrap to fit within `max_width` points. Never returns an empty
/// vec; a single over-long word stays on its own line.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    variant: FontVariant,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in &words {
            let candidate = if current.is_empty() {
                (*word).to_string()
            } else {
                format!("{current} {word}")
            };
            let w = fonts.measure_text_width(&candidate, font_size, variant);
            if w > max_width && !current.is_empty() {
                lines.push(current);
                current = (*word).to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_text_width() {
        let fonts = FontManager::default();
        let w = fonts.measure_text_width("Hello", 16.0, FontVariant::REGULAR);
        // 5 chars × 16 × 0.5 = 40
        assert!((w - 40.0).abs() < 0.1);
    }

    #[test]
    fn bold_is_wider() {
        let fonts = FontManager::default();
        let regular = fonts.measure_text_width("Hello", 16.0, FontVariant::REGULAR);
        let bold = fonts.measure_text_width("Hello", 16.0, FontVariant::BOLD);
        assert!(bold > regular);
    }

    #[test]
    fn word_wrap_basic() {
        let fonts = FontManager::default();
        let lines = wrap_text(
            "Hello world foo bar",
            16.0,
            FontVariant::REGULAR,
            60.0,
            &fonts,
        );
        assert!(lines.len() >= 2, "expected wrapping, got {lines:?}");
    }

    #[test]
    fn wrap_never_returns_empty() {
        let fonts = FontManager::default();
        assert_eq!(
            wrap_text("", 12.0, FontVariant::REGULAR, 100.0, &fonts).len(),
            1
        );
    }
}
