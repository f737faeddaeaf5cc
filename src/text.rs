//! Multi-line aligned text placement.
//!
//! Turns a block of newline-separated text anchored at a point into
//! individually positioned [`TextOp`]s, one per non-empty line, stacked
//! downward by the font's leading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::display::TextOp;
use crate::fonts::FontMetrics;
use crate::style::Font;
use crate::DocumentError;

/// Horizontal alignment of each line relative to the anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl FromStr for Align {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            other => Err(DocumentError::InvalidAlignment(other.to_string())),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        })
    }
}

/// Place a block of text at `(x, y)`.
///
/// `y` is the baseline of the first line; each following line sits one
/// leading lower. Per line: `Left` puts the line's left edge at `x`,
/// `Center` centers the line on `x` using its measured width, and `Right`
/// puts its right edge at `x`. Empty lines advance the baseline without
/// emitting an op.
pub fn place_text_block(
    text: &str,
    x: f32,
    y: f32,
    font: &Font,
    align: Align,
    metrics: &FontMetrics,
) -> Vec<TextOp> {
    let mut ops = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let offset = match align {
            Align::Left => 0.0,
            Align::Center => metrics.text_width(line, font) / 2.0,
            Align::Right => metrics.text_width(line, font),
        };
        ops.push(TextOp {
            x: x - offset,
            y: y - i as f32 * font.leading,
            font: font.family,
            size: font.size,
            text: line.to_string(),
        });
    }
    ops
}
