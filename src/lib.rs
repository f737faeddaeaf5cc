//! # po-pdf – paginated purchase-order documents
//!
//! This crate turns a display-ready purchase order into a printable PDF.
//! The rendering stages are:
//!
//! 1. **Model** – the read-only order view ([`order`])
//! 2. **Layout** – flow header, instructions, and the item table into page
//!    frames, recording per-page draw-command buffers ([`pagination`],
//!    [`templates`], [`text`])
//! 3. **Finalize** – inject the now-known "Page X of Y" stamps and replay
//!    the buffers into PDF bytes via printpdf ([`render`])
//!
//! The two-pass split exists because the total page count is unknown until
//! layout completes, while every page (including the first) must carry the
//! count.

use thiserror::Error;

pub mod display;
pub mod fonts;
pub mod order;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod style;
pub mod templates;
pub mod text;

/// Errors surfaced by the layout engine.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An alignment token outside `left`/`center`/`right`.
    #[error("'{0}' is not a supported alignment")]
    InvalidAlignment(String),
    /// The output destination could not be written.
    #[error("failed to write order document: {0}")]
    Io(#[from] std::io::Error),
}

// Re-exports for convenience
pub use order::{BookSummary, Distributor, LineItem, OrderDocument, OrderHeader};
pub use pipeline::{generate_pdf, write_pdf, RenderSummary};
pub use style::EngineConfig;
