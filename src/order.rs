//! The order document model – a read-only, display-ready view of one
//! purchase order. All references (distributor, shipping method, books) are
//! already resolved to printable strings; the engine never touches storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A distributor snapshot as it should appear on the printed order.
///
/// Every field except `full_name` is optional; absent fields are omitted
/// from the printed header rather than rendered blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sales_rep: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Distributor {
    /// Format the mailing address as newline-separated lines.
    ///
    /// Lines, in order, each included only when it has content: full name,
    /// the two street-address lines, a combined "city province postal-code"
    /// line, and the country. Domestic ("Canada") addresses drop the country
    /// line.
    pub fn mailing_address(&self) -> String {
        let mut lines: Vec<String> = vec![self.full_name.clone()];

        for street in [&self.address1, &self.address2] {
            if let Some(street) = street {
                lines.push(street.clone());
            }
        }

        let locality: Vec<&str> = [&self.city, &self.province, &self.postal_code]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !locality.is_empty() {
            lines.push(locality.join(" "));
        }

        if let Some(country) = &self.country {
            if country != "Canada" {
                lines.push(country.clone());
            }
        }

        lines.join("\n")
    }
}

/// The display-ready summary of one book in the table.
///
/// `author` carries the single representative surname printed in the
/// author column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub isbn13: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub binding: String,
}

/// One (book, quantity) pairing within the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u32,
    pub book: BookSummary,
}

/// Everything on the order besides its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// Purchase-order number.
    pub po: String,
    pub date: NaiveDate,
    /// Free-text special instructions; may be empty.
    #[serde(default)]
    pub comment: String,
    pub distributor: Distributor,
    pub shipping_method: String,
}

/// A complete order ready for layout. Line items are sorted by book title at
/// construction (including through deserialisation) and never re-sorted
/// mid-layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrderDocumentData")]
pub struct OrderDocument {
    pub header: OrderHeader,
    items: Vec<LineItem>,
}

/// Mirror of [`OrderDocument`] used to funnel deserialisation through
/// [`OrderDocument::new`] so the sort invariant holds.
#[derive(Deserialize)]
struct OrderDocumentData {
    header: OrderHeader,
    items: Vec<LineItem>,
}

impl From<OrderDocumentData> for OrderDocument {
    fn from(data: OrderDocumentData) -> Self {
        Self::new(data.header, data.items)
    }
}

impl OrderDocument {
    pub fn new(header: OrderHeader, mut items: Vec<LineItem>) -> Self {
        items.sort_by(|a, b| a.book.title.cmp(&b.book.title));
        Self { header, items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}
