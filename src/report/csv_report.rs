// src/report/csv_report.rs

use chrono::{DateTime, Utc};
use std::io::Write;

use super::common::{format_timestamp, report_rows};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::types::ClassificationResponse;

pub const CSV_HEADER: [&str; 8] = [
    "Sequence ID",
    "Organism",
    "Prediction",
    "Confidence",
    "GC Content",
    "Length",
    "OOD Score",
    "Risk Level",
];

/// CSV report: a `#` preamble with the run summary, a blank line, then one
/// fully quoted row per sequence.
pub fn render_csv(
    response: &ClassificationResponse,
    generated_at: &DateTime<Utc>,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    // 1. Summary preamble
    writeln!(out, "# BAIO Classification Report")?;
    writeln!(out, "# Total Sequences: {}", response.total_sequences)?;
    writeln!(out, "# Virus: {}", response.virus_count)?;
    writeln!(out, "# Host: {}", response.host_count)?;
    writeln!(out, "# Novel: {}", response.novel_count)?;
    writeln!(out, "# Processing Time: {:.2}s", response.processing_time)?;
    writeln!(out, "# Generated: {}", format_timestamp(generated_at))?;
    writeln!(out, "# Model: {}", config.model_id)?;
    writeln!(out)?;

    // 2. Quoted table
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for row in report_rows(response) {
        writer.write_record([
            row.result.sequence_id.clone(),
            row.organism().to_string(),
            row.result.prediction.to_string(),
            format!("{:.1}%", row.confidence_pct),
            format!("{:.1}%", row.gc_pct),
            row.result.length.to_string(),
            row.ood_text(),
            row.risk.level.upper().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())?;
    Ok(bytes)
}
