//! Style configuration – the immutable font and store settings carried by the
//! engine for one rendering call, in place of any process-wide stylesheet
//! state.

use serde::{Deserialize, Serialize};

use crate::display::Family;

/// A font face with its size and leading (baseline-to-baseline distance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: Family,
    pub size: f32,
    pub leading: f32,
}

impl Font {
    pub fn new(family: Family, size: f32, leading: f32) -> Self {
        Self {
            family,
            size,
            leading,
        }
    }
}

/// The small closed set of text styles the order document uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Body text, address blocks, table cells.
    pub normal: Font,
    /// Table header row, the attention line, bolded comment text.
    pub strong: Font,
    /// The "Special Instructions:" lead-in.
    pub emphasis: Font,
    /// Field labels in the first-page header columns.
    pub label: Font,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            normal: Font::new(Family::Helvetica, 10.0, 12.0),
            strong: Font::new(Family::HelveticaBold, 10.0, 12.0),
            emphasis: Font::new(Family::HelveticaOblique, 10.0, 12.0),
            label: Font::new(Family::TimesBold, 10.0, 12.0),
        }
    }
}

/// The store's own identity as printed on every order: the short name used on
/// continuation headers and the full contact block shown under
/// "Ship/Invoice to:" on page one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub contact_block: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "The Paper Lantern Bookshop".to_string(),
            contact_block: "The Paper Lantern Bookshop\n\
                            52 Admiral Road\n\
                            Toronto ON M5R 0A1\n\
                            Canada\n\
                            Phone: (416) 555-0188 Fax: (416) 555-0189\n\
                            Email: orders@paperlanternbooks.ca\n\
                            GST Registration: R123456789"
                .to_string(),
        }
    }
}

/// Configuration for one rendering call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// PDF metadata title; defaults to "Purchase Order <po>".
    pub title: Option<String>,
    pub styles: StyleSheet,
    pub store: StoreProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_share_body_metrics() {
        let styles = StyleSheet::default();
        assert_eq!(styles.normal.size, 10.0);
        for font in [styles.normal, styles.strong, styles.emphasis, styles.label] {
            assert_eq!(font.leading, 12.0);
        }
        assert_eq!(styles.label.family, Family::TimesBold);
    }

    #[test]
    fn store_profile_block_is_multiline() {
        let store = StoreProfile::default();
        assert!(store.contact_block.lines().count() >= 5);
        assert!(store.contact_block.starts_with(&store.name));
    }
}
