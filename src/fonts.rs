//! Text measurement and word wrapping for the builtin PDF fonts.
//!
//! Only the 14 builtin faces are drawn, so widths come from a per-family
//! average-character heuristic rather than parsed font files. The numbers
//! only need to be stable and proportional for alignment and wrapping to be
//! deterministic.

use crate::display::Family;
use crate::style::Font;

/// Measures text for layout decisions (alignment offsets, wrapping).
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics;

impl FontMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Average advance per character as a fraction of the font size.
    /// Bold faces run ~10% wider.
    fn avg_char_factor(family: Family) -> f32 {
        match family {
            Family::Helvetica | Family::HelveticaOblique => 0.5,
            Family::HelveticaBold => 0.55,
            Family::TimesBold => 0.52,
        }
    }

    /// Width of a single line of text in points.
    pub fn text_width(&self, text: &str, font: &Font) -> f32 {
        text.chars().count() as f32 * font.size * Self::avg_char_factor(font.family)
    }

    /// Word-wrap `text` to fit within `max_width` points. Embedded newlines
    /// start new paragraphs. A word longer than the limit gets its own line.
    pub fn wrap(&self, text: &str, font: &Font, max_width: f32) -> Vec<String> {
        self.wrap_with_first_width(text, font, max_width, max_width)
    }

    /// Like [`wrap`](Self::wrap), but the first line fits `first_width` and
    /// every later line fits `rest_width`. Used when a styled lead-in label
    /// shares the first line with the wrapped text.
    pub fn wrap_with_first_width(
        &self,
        text: &str,
        font: &Font,
        first_width: f32,
        rest_width: f32,
    ) -> Vec<String> {
        if first_width <= 0.0 || rest_width <= 0.0 || text.is_empty() {
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
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                let limit = if lines.is_empty() {
                    first_width
                } else {
                    rest_width
                };
                if self.text_width(&candidate, font) > limit && !current.is_empty() {
                    lines.push(current);
                    current = word.to_string();
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helvetica() -> Font {
        Font::new(Family::Helvetica, 10.0, 12.0)
    }

    #[test]
    fn width_scales_with_length_and_size() {
        let metrics = FontMetrics::new();
        let w = metrics.text_width("Hello", &helvetica());
        // 5 chars x 10pt x 0.5
        assert!((w - 25.0).abs() < 0.01);

        let big = Font::new(Family::Helvetica, 20.0, 24.0);
        assert!((metrics.text_width("Hello", &big) - 50.0).abs() < 0.01);
    }

    #[test]
    fn bold_is_wider() {
        let metrics = FontMetrics::new();
        let bold = Font::new(Family::HelveticaBold, 10.0, 12.0);
        assert!(metrics.text_width("abc", &bold) > metrics.text_width("abc", &helvetica()));
    }

    #[test]
    fn wrap_breaks_long_text() {
        let metrics = FontMetrics::new();
        let lines = metrics.wrap("Hello world foo bar", &helvetica(), 40.0);
        assert!(lines.len() >= 2, "expected wrapping, got {:?}", lines);
    }

    #[test]
    fn wrap_preserves_embedded_newlines() {
        let metrics = FontMetrics::new();
        let lines = metrics.wrap("one\ntwo", &helvetica(), 500.0);
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn first_line_width_is_respected() {
        let metrics = FontMetrics::new();
        // First line can hold ~2 chars, the rest are wide open.
        let lines = metrics.wrap_with_first_width("aa bbbb cccc", &helvetica(), 12.0, 500.0);
        assert_eq!(lines[0], "aa");
        assert_eq!(lines[1], "bbbb cccc");
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let metrics = FontMetrics::new();
        assert_eq!(metrics.wrap("", &helvetica(), 100.0), vec![String::new()]);
    }
}
