//! Page templates – the closed set of per-page layouts.
//!
//! Page one carries the full order header (store block, distributor columns,
//! labeled fields); every later page carries a single-line continuation
//! header. Each template also defines the content frame left over for
//! flowing content. The page-number stamp is not drawn here; it belongs to
//! the finalize pass, which alone knows the total page count.

use crate::display::{TextOp, CM, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use crate::fonts::FontMetrics;
use crate::order::OrderDocument;
use crate::style::EngineConfig;
use crate::text::{place_text_block, Align};

/// Vertical band reserved above the first page's content frame.
pub const FIRST_PAGE_BAND: f32 = 10.0 * CM;

/// Band reserved above continuation-page content frames.
pub const CONTINUATION_BAND: f32 = 1.5 * CM;

/// The rectangle available to flowing content on one page, with a cursor
/// that moves downward as blocks are placed.
#[derive(Debug, Clone)]
pub struct Frame {
    pub x: f32,
    pub bottom: f32,
    pub width: f32,
    cursor: f32,
}

impl Frame {
    pub fn new(x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            bottom,
            width,
            cursor: bottom + height,
        }
    }

    /// Vertical space left below the cursor.
    pub fn remaining(&self) -> f32 {
        self.cursor - self.bottom
    }

    pub fn fits(&self, height: f32) -> bool {
        height <= self.remaining()
    }

    /// Consume `height` points and return the top y of the consumed band.
    pub fn take(&mut self, height: f32) -> f32 {
        let top = self.cursor;
        self.cursor -= height;
        top
    }
}

/// Which fixed content a page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    First,
    Continuation,
}

impl PageTemplate {
    pub fn for_page(index: usize) -> Self {
        if index == 0 {
            PageTemplate::First
        } else {
            PageTemplate::Continuation
        }
    }

    /// The content frame this template leaves for flowing content.
    pub fn frame(&self) -> Frame {
        let band = match self {
            PageTemplate::First => FIRST_PAGE_BAND,
            PageTemplate::Continuation => CONTINUATION_BAND,
        };
        Frame::new(
            MARGIN,
            MARGIN,
            PAGE_WIDTH - 2.0 * MARGIN,
            PAGE_HEIGHT - 2.0 * MARGIN - band,
        )
    }

    /// Draw this template's fixed content for one page.
    pub fn decorate(
        &self,
        order: &OrderDocument,
        config: &EngineConfig,
        metrics: &FontMetrics,
    ) -> Vec<TextOp> {
        match self {
            PageTemplate::First => first_page_ops(order, config, metrics),
            PageTemplate::Continuation => continuation_ops(order, config, metrics),
        }
    }
}

fn first_page_ops(
    order: &OrderDocument,
    config: &EngineConfig,
    metrics: &FontMetrics,
) -> Vec<TextOp> {
    let styles = &config.styles;
    let normal = &styles.normal;
    let label = &styles.label;
    let line = normal.leading;
    let header = &order.header;
    let dist = &header.distributor;

    let mut ops = Vec::new();

    // Top band: ship-to label and the store's own contact block.
    let band_top = PAGE_HEIGHT - MARGIN - line;
    ops.extend(place_text_block(
        "Ship/Invoice to:",
        MARGIN,
        band_top,
        normal,
        Align::Left,
        metrics,
    ));
    ops.extend(place_text_block(
        &config.store.contact_block,
        PAGE_WIDTH / 2.0,
        band_top,
        normal,
        Align::Center,
        metrics,
    ));

    // Left column: distributor address and contact numbers. The address
    // region is reserved at seven lines regardless of how many it uses.
    let left = MARGIN;
    let top = PAGE_HEIGHT - MARGIN - 4.0 * CM;
    let dist_block = 7.0 * line;
    let heading_width = 2.0 * CM;
    ops.extend(place_text_block(
        "Distributor",
        left,
        top - line,
        label,
        Align::Left,
        metrics,
    ));
    ops.extend(place_text_block(
        &dist.mailing_address(),
        left,
        top - 2.0 * line,
        normal,
        Align::Left,
        metrics,
    ));
    let phone_y = top - dist_block - line;
    let fax_y = top - dist_block - 3.0 * line;
    ops.extend(place_text_block("Phone:", left, phone_y, label, Align::Left, metrics));
    ops.extend(place_text_block("Fax:", left, fax_y, label, Align::Left, metrics));
    if let Some(phone) = &dist.phone {
        ops.extend(place_text_block(
            phone,
            left + heading_width,
            phone_y,
            normal,
            Align::Left,
            metrics,
        ));
    }
    if let Some(fax) = &dist.fax {
        ops.extend(place_text_block(
            fax,
            left + heading_width,
            fax_y,
            normal,
            Align::Left,
            metrics,
        ));
    }

    // Right column: labeled order fields. Labels keep their rows even when a
    // value is absent.
    let left = PAGE_WIDTH / 2.0;
    let heading_width = 3.5 * CM;
    let rows: [(&str, Option<String>); 5] = [
        ("Purchase Order #:", Some(header.po.clone())),
        ("Date:", Some(header.date.format("%Y-%m-%d").to_string())),
        ("Account Number:", dist.account_number.clone()),
        ("Account Rep:", dist.sales_rep.clone()),
        ("Shipping Method:", Some(header.shipping_method.clone())),
    ];
    for (i, (field, value)) in rows.iter().enumerate() {
        let y = top - (2 * i + 1) as f32 * line;
        ops.extend(place_text_block(field, left, y, label, Align::Left, metrics));
        if let Some(value) = value {
            ops.extend(place_text_block(
                value,
                left + heading_width,
                y,
                normal,
                Align::Left,
                metrics,
            ));
        }
    }

    ops
}

fn continuation_ops(
    order: &OrderDocument,
    config: &EngineConfig,
    metrics: &FontMetrics,
) -> Vec<TextOp> {
    let normal = &config.styles.normal;
    let header = &order.header;
    let y = PAGE_HEIGHT - MARGIN;

    let left_text = match &header.distributor.account_number {
        Some(acct) => format!("{}\nAcct#: {}", config.store.name, acct),
        None => config.store.name.clone(),
    };
    let center_text = format!("PO#: {}\n{}", header.po, header.date.format("%Y-%m-%d"));

    let mut ops = place_text_block(&left_text, MARGIN, y, normal, Align::Left, metrics);
    ops.extend(place_text_block(
        &center_text,
        PAGE_WIDTH / 2.0,
        y,
        normal,
        Align::Center,
        metrics,
    ));
    ops.extend(place_text_block(
        &header.distributor.full_name,
        PAGE_WIDTH - MARGIN,
        y,
        normal,
        Align::Right,
        metrics,
    ));
    ops
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
                comment: "Extra nonsense is free of charge!".into(),
                distributor: Distributor {
                    full_name: "Warehouse Co.".into(),
                    phone: Some("416-555-9876".into()),
                    account_number: Some("42".into()),
                    ..Default::default()
                },
                shipping_method: "Rocket".into(),
            },
            vec![LineItem {
                quantity: 1,
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

    fn texts(ops: &[TextOp]) -> Vec<&str> {
        ops.iter().map(|op| op.text.as_str()).collect()
    }

    #[test]
    fn frame_cursor_moves_downward() {
        let mut frame = Frame::new(10.0, 10.0, 100.0, 50.0);
        assert!((frame.remaining() - 50.0).abs() < 0.01);
        let top = frame.take(20.0);
        assert!((top - 60.0).abs() < 0.01);
        assert!(frame.fits(30.0));
        assert!(!frame.fits(31.0));
    }

    #[test]
    fn first_page_frame_is_shorter_than_continuation() {
        let first = PageTemplate::First.frame();
        let later = PageTemplate::Continuation.frame();
        assert!(first.remaining() < later.remaining());
        let expected = PAGE_HEIGHT - 2.0 * MARGIN - FIRST_PAGE_BAND;
        assert!((first.remaining() - expected).abs() < 0.01);
    }

    #[test]
    fn template_selection_by_page_index() {
        assert_eq!(PageTemplate::for_page(0), PageTemplate::First);
        assert_eq!(PageTemplate::for_page(1), PageTemplate::Continuation);
        assert_eq!(PageTemplate::for_page(7), PageTemplate::Continuation);
    }

    #[test]
    fn first_page_draws_fixed_labels_and_values() {
        let order = sample_order();
        let ops = PageTemplate::First.decorate(&order, &EngineConfig::default(), &FontMetrics);
        let texts = texts(&ops);
        for expected in [
            "Ship/Invoice to:",
            "Distributor",
            "Phone:",
            "Fax:",
            "Purchase Order #:",
            "Date:",
            "Account Number:",
            "Account Rep:",
            "Shipping Method:",
            "1A1000",
            "2012-01-01",
            "Rocket",
            "416-555-9876",
        ] {
            assert!(texts.contains(&expected), "missing op: {expected}");
        }
        // No sales rep and no fax on this order; labels stay, values go.
        assert!(!texts.contains(&"Billy Jo"));
    }

    #[test]
    fn absent_values_do_not_shift_label_rows() {
        let mut order = sample_order();
        order.header.distributor.account_number = None;
        let config = EngineConfig::default();
        let with_none = PageTemplate::First.decorate(&order, &config, &FontMetrics);
        let ship_label = |ops: &[TextOp]| {
            ops.iter()
                .find(|op| op.text == "Shipping Method:")
                .map(|op| op.y)
                .unwrap()
        };
        let full = PageTemplate::First.decorate(&sample_order(), &config, &FontMetrics);
        assert_eq!(ship_label(&with_none), ship_label(&full));
    }

    #[test]
    fn continuation_header_has_three_parts() {
        let order = sample_order();
        let ops =
            PageTemplate::Continuation.decorate(&order, &EngineConfig::default(), &FontMetrics);
        let texts = texts(&ops);
        assert!(texts.contains(&"The Paper Lantern Bookshop"));
        assert!(texts.contains(&"Acct#: 42"));
        assert!(texts.contains(&"PO#: 1A1000"));
        assert!(texts.contains(&"2012-01-01"));
        assert!(texts.contains(&"Warehouse Co."));
    }

    #[test]
    fn continuation_account_line_is_omitted_without_account() {
        let mut order = sample_order();
        order.header.distributor.account_number = None;
        let ops =
            PageTemplate::Continuation.decorate(&order, &EngineConfig::default(), &FontMetrics);
        assert!(!texts(&ops).iter().any(|t| t.starts_with("Acct#:")));
    }
}
