//! The layout pass – flows the order's preamble paragraphs and item table
//! into page frames, recording one [`PageBuffer`] per finished page.
//!
//! Handles:
//! - first-page vs. continuation frame selection
//! - page breaks when a block would overflow the frame
//! - table rows as atomic units (never split across pages)
//! - re-emitting the column-header row at the top of every table fragment

use crate::display::{DisplayList, PageBuffer, TextOp, CM, MARGIN};
use crate::fonts::FontMetrics;
use crate::order::{LineItem, OrderDocument};
use crate::style::{EngineConfig, Font};
use crate::templates::{Frame, PageTemplate};
use crate::text::{place_text_block, Align};

/// Table column widths in points: Qty, ISBN, Title, Author, Publisher,
/// Binding. Part of the layout contract.
pub const COLUMN_WIDTHS: [f32; 6] = [
    0.75 * CM,
    2.75 * CM,
    6.0 * CM,
    3.5 * CM,
    3.0 * CM,
    1.5 * CM,
];

/// Height of one table row in points (10 pt type plus vertical padding).
pub const ROW_HEIGHT: f32 = 18.0;

/// Horizontal inset of cell text from its column's left edge.
const CELL_INSET: f32 = 3.0;

/// Baseline drop from the top of a row to its cell text.
const CELL_BASELINE: f32 = 13.0;

const TABLE_HEADINGS: [&str; 6] = ["Qty", "ISBN", "Title", "Author", "Publisher", "Binding"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Flow,
    HeaderRow,
    Row,
}

/// One indivisible unit of flowing content. Op coordinates are relative to
/// the block's top edge (x page-absolute, y <= 0 running downward); placing
/// the block shifts them to the frame cursor.
#[derive(Debug, Clone)]
struct Block {
    kind: BlockKind,
    height: f32,
    ops: Vec<TextOp>,
}

/// Lay out one order into per-page draw-command buffers.
///
/// This is the first of the two rendering passes: the total page count is
/// unknown here, so the "Page X of Y" stamp is left to the finalize pass.
pub fn layout_document(
    order: &OrderDocument,
    config: &EngineConfig,
    metrics: &FontMetrics,
) -> DisplayList {
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| format!("Purchase Order {}", order.header.po));
    let mut list = DisplayList::new(title);

    let template = PageTemplate::First;
    let mut frame = template.frame();
    let mut page = PageBuffer::new(0);
    page.ops = template.decorate(order, config, metrics);
    let mut frame_used = false;

    let header_row = header_row_block(config, metrics);
    let blocks = build_blocks(order, config, metrics, &frame, &header_row);

    for block in blocks {
        // Close the page when the block no longer fits; an oversized block in
        // an otherwise empty frame is placed anyway rather than looping.
        if !frame.fits(block.height) && frame_used {
            let next_index = page.index + 1;
            log::debug!("page {} full, opening page {}", page.index + 1, next_index + 1);
            list.pages.push(page);

            let template = PageTemplate::for_page(next_index);
            frame = template.frame();
            page = PageBuffer::new(next_index);
            page.ops = template.decorate(order, config, metrics);
            frame_used = false;

            // A table fragment on a fresh page repeats the column headers.
            if block.kind == BlockKind::Row {
                place_block(&mut page, &mut frame, header_row.clone());
                frame_used = true;
            }
        }
        place_block(&mut page, &mut frame, block);
        frame_used = true;
    }

    list.pages.push(page);
    list
}

fn place_block(page: &mut PageBuffer, frame: &mut Frame, block: Block) {
    let top = frame.take(block.height);
    page.ops.extend(block.ops.into_iter().map(|mut op| {
        op.y += top;
        op
    }));
}

/// Build the full flowing-content sequence: attention line, special
/// instructions, the pluralized request line, then the table.
fn build_blocks(
    order: &OrderDocument,
    config: &EngineConfig,
    metrics: &FontMetrics,
    frame: &Frame,
    header_row: &Block,
) -> Vec<Block> {
    let styles = &config.styles;
    let mut blocks = Vec::new();

    blocks.push(paragraph(
        "ATTENTION: ORDER DEPARTMENT",
        &styles.strong,
        frame.x,
        metrics,
    ));
    blocks.push(special_instructions(order, config, frame, metrics));

    let mut request = "Please send the following title".to_string();
    if order.items().len() > 1 {
        request.push('s');
    }
    request.push(':');
    blocks.push(paragraph(&request, &styles.normal, frame.x, metrics));

    blocks.push(header_row.clone());
    for item in order.items() {
        blocks.push(row_block(item, config, metrics));
    }
    blocks
}

/// A single-style paragraph block (no wrapping; text is known to fit).
fn paragraph(text: &str, font: &Font, x: f32, metrics: &FontMetrics) -> Block {
    let lines = text.split('\n').count() as f32;
    Block {
        kind: BlockKind::Flow,
        height: lines * font.leading,
        ops: place_text_block(text, x, -font.leading, font, Align::Left, metrics),
    }
}

/// The italic "Special Instructions:" lead-in with the comment in bold,
/// word-wrapped to the frame width. Wrapped continuation lines start at the
/// frame's left edge.
fn special_instructions(
    order: &OrderDocument,
    config: &EngineConfig,
    frame: &Frame,
    metrics: &FontMetrics,
) -> Block {
    let emphasis = &config.styles.emphasis;
    let strong = &config.styles.strong;
    let lead_in = "Special Instructions: ";
    let lead_width = metrics.text_width(lead_in, emphasis);

    let comment_lines = metrics.wrap_with_first_width(
        &order.header.comment,
        strong,
        frame.width - lead_width,
        frame.width,
    );

    let leading = emphasis.leading;
    let mut ops = place_text_block(lead_in.trim_end(), frame.x, -leading, emphasis, Align::Left, metrics);
    for (i, line) in comment_lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = if i == 0 { frame.x + lead_width } else { frame.x };
        let y = -(i as f32 + 1.0) * leading;
        ops.extend(place_text_block(line, x, y, strong, Align::Left, metrics));
    }

    Block {
        kind: BlockKind::Flow,
        height: comment_lines.len() as f32 * leading,
        ops,
    }
}

fn header_row_block(config: &EngineConfig, metrics: &FontMetrics) -> Block {
    cells_block(BlockKind::HeaderRow, &TABLE_HEADINGS, &config.styles.strong, metrics)
}

fn row_block(item: &LineItem, config: &EngineConfig, metrics: &FontMetrics) -> Block {
    let book = &item.book;
    let cells = [
        item.quantity.to_string(),
        book.isbn13.clone(),
        book.title.clone(),
        book.author.clone(),
        book.publisher.clone(),
        book.binding.clone(),
    ];
    let cells: [&str; 6] = [
        &cells[0], &cells[1], &cells[2], &cells[3], &cells[4], &cells[5],
    ];
    cells_block(BlockKind::Row, &cells, &config.styles.normal, metrics)
}

fn cells_block(kind: BlockKind, cells: &[&str; 6], font: &Font, metrics: &FontMetrics) -> Block {
    let mut ops = Vec::new();
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        if !cell.is_empty() {
            ops.extend(place_text_block(
                cell,
                x + CELL_INSET,
                -CELL_BASELINE,
                font,
                Align::Left,
                metrics,
            ));
        }
        x += width;
    }
    Block {
        kind,
        height: ROW_HEIGHT,
        ops,
    }
}
