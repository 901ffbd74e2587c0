pub mod layout;
pub mod writer;

use chrono::{DateTime, Utc};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::types::ClassificationResponse;

pub use layout::{layout_document, DrawOp, PdfDocument, PdfPage};
pub use writer::write_pdf;

/// Lay out and serialize the PDF report.
pub fn render_pdf(
    response: &ClassificationResponse,
    generated_at: &DateTime<Utc>,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    let doc = layout_document(response, generated_at, config)?;
    write_pdf(&doc)
}
