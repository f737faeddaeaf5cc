//! Display list – the intermediate representation between layout and PDF
//! rendering. The layout pass records one [`PageBuffer`] of draw commands per
//! page; the finalize pass replays them once the total page count is known.

use serde::{Deserialize, Serialize};

/// One centimetre in PDF points.
pub const CM: f32 = 28.346_457;

/// US letter page width in points.
pub const PAGE_WIDTH: f32 = 612.0;

/// US letter page height in points.
pub const PAGE_HEIGHT: f32 = 792.0;

/// Uniform page margin in points.
pub const MARGIN: f32 = 2.0 * CM;

/// One of the builtin PDF font faces used by the document.
///
/// Kept as its own enum (rather than printpdf's type) so the display list
/// stays serialisable and the renderer owns the mapping to `BuiltinFont`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    TimesBold,
}

/// A single positioned line of text.
///
/// Coordinates are page-absolute PDF points: origin at the bottom-left of the
/// page, `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub font: Family,
    pub size: f32,
    pub text: String,
}

/// The recorded draw commands for one finished page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBuffer {
    pub index: usize,
    pub ops: Vec<TextOp>,
}

impl PageBuffer {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }
}

/// A complete laid-out document, ready for the finalize pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayList {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Width of each page in PDF points.
    pub page_width: f32,
    /// Height of each page in PDF points.
    pub page_height: f32,
    /// Ordered list of page buffers.
    pub pages: Vec<PageBuffer>,
}

impl DisplayList {
    /// Create an empty letter-sized display list.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialise to JSON, for inspection and golden tests.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
