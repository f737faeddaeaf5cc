//! The finalize pass – stamps page counts and emits PDF bytes with
//! `printpdf` (v0.8 ops-based API).
//!
//! The layout pass cannot know the total page count while it runs, so the
//! recorded page buffers are replayed here: each page gets its "Page X of Y"
//! stamp injected, then its ops are converted to printpdf operations.

use printpdf::*;

use crate::display::{DisplayList, Family, TextOp, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use crate::fonts::FontMetrics;
use crate::style::StyleSheet;
use crate::text::{place_text_block, Align};

const PT_TO_MM: f32 = 0.352_778;

/// Inject the "Page X of Y" stamp into every recorded page, returning the
/// completed display list. On pages after the first the stamp sits one line
/// lower so it clears the continuation header's own top line.
pub fn stamp_pages(list: &DisplayList, styles: &StyleSheet, metrics: &FontMetrics) -> DisplayList {
    let total = list.pages.len();
    let normal = &styles.normal;
    let mut stamped = list.clone();

    for page in &mut stamped.pages {
        let mut y = PAGE_HEIGHT - MARGIN;
        if page.index != 0 {
            y -= normal.leading;
        }
        page.ops.extend(place_text_block(
            &format!("Page {} of {}", page.index + 1, total),
            PAGE_WIDTH - MARGIN,
            y,
            normal,
            Align::Right,
            metrics,
        ));
    }
    stamped
}

/// Replay a (stamped) display list into PDF bytes.
pub fn render_pdf(list: &DisplayList) -> Vec<u8> {
    let page_w = Mm(list.page_width * PT_TO_MM);
    let page_h = Mm(list.page_height * PT_TO_MM);

    let mut doc = PdfDocument::new(&list.title);

    let mut pages = Vec::new();
    for buffer in &list.pages {
        let mut ops = Vec::new();
        for op in &buffer.ops {
            push_text_op(&mut ops, op);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    doc.save(&PdfSaveOptions::default(), &mut Vec::new())
}

fn builtin(family: Family) -> BuiltinFont {
    match family {
        Family::Helvetica => BuiltinFont::Helvetica,
        Family::HelveticaBold => BuiltinFont::HelveticaBold,
        Family::HelveticaOblique => BuiltinFont::HelveticaOblique,
        Family::TimesBold => BuiltinFont::TimesBold,
    }
}

fn push_text_op(ops: &mut Vec<Op>, op: &TextOp) {
    let font = builtin(op.font);
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(op.x),
            y: Pt(op.y),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(op.size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(to_winlatin(&op.text))],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Convert a UTF-8 string to raw Windows-1252 bytes wrapped in a String so
/// printpdf writes them unchanged into the stream (builtin fonts use
/// WinAnsiEncoding, one byte per glyph). Unmappable characters become `?`
/// and are counted in a single warning.
fn to_winlatin(s: &str) -> String {
    let mut replaced = 0usize;
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space
            c if (c as u32) < 256 => c as u8,
            _ => {
                replaced += 1;
                b'?'
            }
        })
        .collect();
    if replaced > 0 {
        log::warn!("replaced {replaced} character(s) not representable in WinAnsi");
    }
    // SAFETY: intentionally non-UTF-8 for the 0x80-0x9F range; printpdf
    // passes these bytes straight to the PDF stream, decoded by
    // WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PageBuffer;
    use crate::style::Font;

    fn two_page_list() -> DisplayList {
        let mut list = DisplayList::new("test");
        list.pages.push(PageBuffer::new(0));
        list.pages.push(PageBuffer::new(1));
        list
    }

    fn stamp_of(page: &PageBuffer) -> &TextOp {
        page.ops
            .iter()
            .find(|op| op.text.starts_with("Page "))
            .expect("stamp missing")
    }

    #[test]
    fn stamps_count_every_page() {
        let stamped = stamp_pages(&two_page_list(), &StyleSheet::default(), &FontMetrics);
        assert_eq!(stamp_of(&stamped.pages[0]).text, "Page 1 of 2");
        assert_eq!(stamp_of(&stamped.pages[1]).text, "Page 2 of 2");
    }

    #[test]
    fn later_stamps_sit_one_leading_lower() {
        let styles = StyleSheet::default();
        let stamped = stamp_pages(&two_page_list(), &styles, &FontMetrics);
        let first_y = stamp_of(&stamped.pages[0]).y;
        let later_y = stamp_of(&stamped.pages[1]).y;
        assert!((first_y - (PAGE_HEIGHT - MARGIN)).abs() < 0.01);
        assert!((first_y - later_y - styles.normal.leading).abs() < 0.01);
    }

    #[test]
    fn stamping_does_not_mutate_the_input_list() {
        let list = two_page_list();
        let _ = stamp_pages(&list, &StyleSheet::default(), &FontMetrics);
        assert!(list.pages.iter().all(|p| p.ops.is_empty()));
    }

    #[test]
    fn render_produces_valid_pdf_bytes() {
        let mut list = DisplayList::new("test");
        let mut page = PageBuffer::new(0);
        page.ops = place_text_block(
            "hello",
            MARGIN,
            700.0,
            &Font::new(Family::Helvetica, 10.0, 12.0),
            Align::Left,
            &FontMetrics,
        );
        list.pages.push(page);

        let bytes = render_pdf(&list);
        assert!(bytes.len() > 100, "PDF should have content");
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn empty_list_still_renders_one_page() {
        let bytes = render_pdf(&DisplayList::new("empty"));
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn curly_quotes_map_into_winansi() {
        let s = to_winlatin("\u{2018}a\u{2019}");
        let bytes = s.as_bytes();
        assert_eq!(bytes, &[0x91, b'a', 0x92]);
    }
}
