// src/report/json.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{format_timestamp, report_rows, ReportRow};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::types::ClassificationResponse;

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    summary: Summary<'a>,
    detailed_results: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    generated_at: String,
    model: &'a str,
    training_set: &'a str,
}

#[derive(Serialize)]
struct Summary<'a> {
    total_sequences: usize,
    virus_count: usize,
    host_count: usize,
    novel_count: usize,
    processing_time: f64,
    source: &'a str,
}

/// Every key is always written; absent optionals become `null`.
#[derive(Serialize)]
struct JsonRow<'a> {
    sequence_id: &'a str,
    prediction: &'a str,
    confidence: f64,
    organism_name: Option<&'a str>,
    gc_content: f64,
    length: u64,
    ood_score: Option<f64>,
    explanation: Option<&'a str>,
    risk_level: &'static str,
}

impl<'a> From<&ReportRow<'a>> for JsonRow<'a> {
    fn from(row: &ReportRow<'a>) -> Self {
        let result = row.result;
        JsonRow {
            sequence_id: &result.sequence_id,
            prediction: result.prediction.as_str(),
            confidence: row.confidence_pct,
            organism_name: result.organism_name.as_deref(),
            gc_content: row.gc_pct,
            length: result.length,
            ood_score: result.ood_score,
            explanation: result.explanation.as_deref(),
            risk_level: row.risk.level.title(),
        }
    }
}

/// Pretty-printed JSON report. Confidence and GC content are one-decimal
/// percentages, the same figures the CSV and PDF show.
pub fn render_json(
    response: &ClassificationResponse,
    generated_at: &DateTime<Utc>,
    config: &ReportConfig,
) -> Result<Vec<u8>> {
    let rows = report_rows(response);
    let report = JsonReport {
        metadata: Metadata {
            generated_at: format_timestamp(generated_at),
            model: &config.model_id,
            training_set: &config.training_set,
        },
        summary: Summary {
            total_sequences: response.total_sequences,
            virus_count: response.virus_count,
            host_count: response.host_count,
            novel_count: response.novel_count,
            processing_time: response.processing_time,
            source: &response.source,
        },
        detailed_results: rows.iter().map(JsonRow::from).collect(),
    };

    let mut bytes = serde_json::to_vec_pretty(&report)?;
    bytes.push(b'\n');
    Ok(bytes)
}
