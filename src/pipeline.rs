//! Pipeline – ties layout, stamping, and rendering together into single
//! function calls.

use std::fs;
use std::path::Path;

use crate::display::DisplayList;
use crate::fonts::FontMetrics;
use crate::order::OrderDocument;
use crate::pagination::layout_document;
use crate::render::{render_pdf, stamp_pages};
use crate::style::EngineConfig;
use crate::DocumentError;

/// What a completed render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub bytes: usize,
}

/// Full pipeline: order document -> PDF bytes.
///
/// Returns the bytes together with the stamped display list (useful for
/// inspecting what ended up on which page).
pub fn generate_pdf(
    order: &OrderDocument,
    config: &EngineConfig,
) -> Result<(Vec<u8>, DisplayList), DocumentError> {
    let metrics = FontMetrics::new();

    // Pass one: flow content into page buffers.
    let list = layout_document(order, config, &metrics);

    // Pass two: the page count is now known; stamp and replay.
    let stamped = stamp_pages(&list, &config.styles, &metrics);
    let bytes = render_pdf(&stamped);

    log::info!(
        "rendered order {} as {} page(s), {} bytes",
        order.header.po,
        stamped.page_count(),
        bytes.len()
    );
    Ok((bytes, stamped))
}

/// Render `order` and write the PDF to `destination`.
///
/// The destination is opened, written, and closed inside the one
/// [`fs::write`] call; a failure surfaces as [`DocumentError::Io`] with no
/// handle left open and layout errors never touch the filesystem.
pub fn write_pdf(
    order: &OrderDocument,
    config: &EngineConfig,
    destination: impl AsRef<Path>,
) -> Result<RenderSummary, DocumentError> {
    let (bytes, list) = generate_pdf(order, config)?;
    fs::write(destination, &bytes)?;
    Ok(RenderSummary {
        pages: list.page_count(),
        bytes: bytes.len(),
    })
}

/// Layout-and-stamp only, no PDF emission. Useful for tests.
pub fn compute_display_list(order: &OrderDocument, config: &EngineConfig) -> DisplayList {
    let metrics = FontMetrics::new();
    let list = layout_document(order, config, &metrics);
    stamp_pages(&list, &config.styles, &metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{BookSummary, Distributor, LineItem, OrderHeader};
    use chrono::NaiveDate;

    fn sample_order() -> OrderDocument {
        OrderDocument::new(
            OrderHeader {
                po: "1A1000".into(),
                date: NaiveDate::from_ymd_opt(2012, 1, 1).unwrap(),
                comment: "Rush order".into(),
                distributor: Distributor {
                    full_name: "Warehouse Co.".into(),
                    ..Default::default()
                },
                shipping_method: "Rocket".into(),
            },
            vec![LineItem {
                quantity: 3,
                book: BookSummary {
                    isbn13: "9781112223334".into(),
                    title: "AWESOME".into(),
                    author: "Seneca".into(),
                    publisher: "Penguin".into(),
                    binding: "Paper".into(),
                },
            }],
        )
    }

    #[test]
    fn pipeline_produces_pdf_and_stamped_list() {
        let (bytes, list) = generate_pdf(&sample_order(), &EngineConfig::default()).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
        assert_eq!(list.page_count(), 1);
        assert!(list.pages[0].ops.iter().any(|op| op.text == "Page 1 of 1"));
    }

    #[test]
    fn write_pdf_reports_what_it_wrote() {
        let path = std::env::temp_dir().join("po_pdf_pipeline_test.pdf");
        let summary = write_pdf(&sample_order(), &EngineConfig::default(), &path).unwrap();
        assert_eq!(summary.pages, 1);
        let on_disk = fs::read(&path).unwrap();
        assert_eq!(on_disk.len(), summary.bytes);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_destination_surfaces_as_io_error() {
        let path = std::env::temp_dir().join("po_pdf_missing_dir/nested/out.pdf");
        let err = write_pdf(&sample_order(), &EngineConfig::default(), &path).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
