// src/report/common.rs

use chrono::{DateTime, SecondsFormat, Utc};

use crate::risk::classify_result;
use crate::types::{ClassificationResponse, RiskAssessment, SequenceResult};

/// `value * 100` rounded half away from zero to one decimal.
pub fn round_percent(value: f64) -> f64 {
    (value * 1000.0).round() / 10.0
}

/// [`round_percent`] printed with exactly one decimal, e.g. `82.0`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", round_percent(value))
}

/// Generation time as printed in every export.
pub fn format_timestamp(generated_at: &DateTime<Utc>) -> String {
    generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Per-row values derived once and shared by every export format, so no two
/// formats can disagree on rounding or risk tier.
#[derive(Debug, Clone)]
pub struct ReportRow<'a> {
    pub result: &'a SequenceResult,
    pub risk: RiskAssessment,
    pub confidence_pct: f64,
    pub gc_pct: f64,
}

impl<'a> ReportRow<'a> {
    pub fn new(result: &'a SequenceResult) -> Self {
        Self {
            result,
            risk: classify_result(result),
            confidence_pct: round_percent(result.confidence),
            gc_pct: round_percent(result.gc_content),
        }
    }

    pub fn organism(&self) -> &str {
        self.result.organism_name.as_deref().unwrap_or("Unknown")
    }

    pub fn ood_text(&self) -> String {
        match self.result.ood_score {
            Some(ood) => format!("{ood:.3}"),
            None => "N/A".to_string(),
        }
    }
}

pub fn report_rows(response: &ClassificationResponse) -> Vec<ReportRow<'_>> {
    response.detailed_results.iter().map(ReportRow::new).collect()
}

/// Share of the sample with `count` sequences, as a one-decimal percentage.
pub fn share_percent(count: usize, total: usize) -> String {
    if total == 0 {
        return format_percent(0.0);
    }
    format_percent(count as f64 / total as f64)
}
