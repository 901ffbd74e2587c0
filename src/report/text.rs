// src/report/text.rs

use chrono::{DateTime, Utc};
use std::io::Write;

use super::common::{format_timestamp, report_rows, share_percent};
use crate::error::Result;
use crate::risk::aggregate_risk;
use crate::types::ClassificationResponse;

/// Plain-text digest: run summary, sample risk, then one line per sequence.
pub fn render_text(response: &ClassificationResponse, generated_at: &DateTime<Utc>) -> Result<Vec<u8>> {
    let sample = aggregate_risk(response)?;
    let total = response.total_sequences;
    let rows = report_rows(response);
    let id_width = rows
        .iter()
        .map(|r| r.result.sequence_id.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    writeln!(out, "BAIO Classification Summary")?;
    writeln!(out, "===========================")?;
    writeln!(out, "Input: {}", response.source)?;
    writeln!(out, "Total Sequences: {total}")?;
    writeln!(out, "Processing Time: {:.2}s", response.processing_time)?;
    writeln!(out)?;
    writeln!(out, "Results:")?;
    writeln!(
        out,
        "- Virus: {} ({}%)",
        response.virus_count,
        share_percent(response.virus_count, total)
    )?;
    writeln!(
        out,
        "- Host: {} ({}%)",
        response.host_count,
        share_percent(response.host_count, total)
    )?;
    writeln!(
        out,
        "- Novel/Unknown: {} ({}%)",
        response.novel_count,
        share_percent(response.novel_count, total)
    )?;
    writeln!(out)?;
    writeln!(out, "Sample Risk: {} - {}", sample.level.upper(), sample.message)?;
    writeln!(out)?;
    writeln!(out, "Sequences:")?;
    for row in &rows {
        writeln!(
            out,
            "  {:<id_width$}  {:<6}  {:>5.1}%  {}",
            row.result.sequence_id,
            row.result.prediction.as_str(),
            row.confidence_pct,
            row.risk.level.label(),
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Response Timestamp: {}", response.timestamp)?;
    writeln!(out, "Generated: {}", format_timestamp(generated_at))?;

    Ok(out)
}
