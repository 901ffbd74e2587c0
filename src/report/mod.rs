pub mod common;
pub mod csv_report;
pub mod json;
pub mod pdf;
pub mod text;

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::types::ClassificationResponse;
use crate::validate::validate_response;

pub use csv_report::render_csv;
pub use json::render_json;
pub use pdf::render_pdf;
pub use text::render_text;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
    Text,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [
        ReportFormat::Json,
        ReportFormat::Csv,
        ReportFormat::Pdf,
        ReportFormat::Text,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Text => "text/plain",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            "txt" | "text" => Ok(ReportFormat::Text),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

/// Everything an export needs besides the response itself. Fixing both fields
/// makes an export fully reproducible.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub generated_at: DateTime<Utc>,
    pub report_id: Uuid,
    pub config: ReportConfig,
}

impl ExportContext {
    /// Current time and a fresh random report id.
    pub fn now(config: ReportConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            report_id: Uuid::new_v4(),
            config,
        }
    }

    pub fn filename(&self, format: ReportFormat) -> String {
        format!(
            "{}-{}.{}",
            self.config.filename_prefix,
            self.report_id,
            format.extension()
        )
    }
}

/// A rendered report, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Validate `response` and render it in `format`.
///
/// The response is only borrowed, so a failed export leaves it untouched and
/// can simply be retried.
pub fn export(
    response: &ClassificationResponse,
    format: ReportFormat,
    ctx: &ExportContext,
) -> Result<ReportArtifact> {
    validate_response(response)?;

    let bytes = match format {
        ReportFormat::Json => render_json(response, &ctx.generated_at, &ctx.config)?,
        ReportFormat::Csv => render_csv(response, &ctx.generated_at, &ctx.config)?,
        ReportFormat::Pdf => render_pdf(response, &ctx.generated_at, &ctx.config)?,
        ReportFormat::Text => render_text(response, &ctx.generated_at)?,
    };
    let filename = ctx.filename(format);
    log::info!("Rendered {} ({} bytes)", filename, bytes.len());

    Ok(ReportArtifact {
        filename,
        mime_type: format.mime_type(),
        bytes,
    })
}
