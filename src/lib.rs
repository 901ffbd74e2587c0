// src/lib.rs
pub mod config;
pub mod error;
pub mod fasta;
pub mod loader;
pub mod presentation;
pub mod report;
pub mod risk;
pub mod session;
pub mod types;
pub mod ui_state;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::loader::read_response;
use crate::report::{export, ExportContext, ReportArtifact, ReportFormat};
use crate::risk::{aggregate_risk, classify_result};
use crate::types::{ClassificationResponse, RiskAssessment, SampleRisk, SequenceResult};
use crate::validate::validate_response;

pub use crate::error::ReportError;

/// A validated response together with its derived risk.
/// Risk is recomputed from the response, never stored upstream; reports are
/// rendered on demand.
#[derive(Debug, Clone)]
pub struct AssessedResults {
    pub response: Arc<ClassificationResponse>,

    /// One assessment per row of `response.detailed_results`, same order
    pub row_risks: Vec<RiskAssessment>,

    /// Banner for the whole sample
    pub sample_risk: SampleRisk,
}

impl AssessedResults {
    /// Rows paired with their risk, in input order.
    pub fn rows(&self) -> impl Iterator<Item = (&SequenceResult, &RiskAssessment)> {
        self.response.detailed_results.iter().zip(&self.row_risks)
    }

    /// Render one report on demand
    pub fn export(&self, format: ReportFormat, ctx: &ExportContext) -> Result<ReportArtifact> {
        export(&self.response, format, ctx)
    }

    /// Render every format with the same timestamp and report id
    pub fn export_all(&self, ctx: &ExportContext) -> Result<Vec<ReportArtifact>> {
        ReportFormat::ALL
            .iter()
            .map(|&format| self.export(format, ctx))
            .collect()
    }
}

/// Validate a response and derive per-row and sample risk.
pub fn assess(response: Arc<ClassificationResponse>) -> Result<AssessedResults> {
    // 1. Preconditions
    validate_response(&response)?;

    // 2. Per-row risk
    let row_risks: Vec<RiskAssessment> = response
        .detailed_results
        .iter()
        .map(classify_result)
        .collect();

    // 3. Sample risk
    let sample_risk = aggregate_risk(&response)?;
    log::info!(
        "Assessed {} sequence(s): sample risk {}",
        row_risks.len(),
        sample_risk.level
    );

    Ok(AssessedResults {
        response,
        row_risks,
        sample_risk,
    })
}

/// Load a saved response (`.json` or `.json.gz`) and assess it.
pub fn assess_file<P: AsRef<Path>>(path: P) -> Result<AssessedResults> {
    let response = read_response(path)?;
    assess(Arc::new(response))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    use crate::config::ReportConfig;
    use crate::report::ExportContext;
    use crate::types::{ClassificationResponse, Prediction, SequenceResult};

    pub const MOCK_RESPONSE_JSON: &str = r#"{
        "total_sequences": 3,
        "virus_count": 1,
        "host_count": 1,
        "novel_count": 1,
        "detailed_results": [
            {"sequence_id": "virus_mock", "length": 32, "gc_content": 0.55,
             "prediction": "Virus", "confidence": 0.82, "sequence_preview": "ATGCGT"},
            {"sequence_id": "host_mock", "length": 30, "gc_content": 0.50,
             "prediction": "Host", "confidence": 0.91, "sequence_preview": "CCAAAC"},
            {"sequence_id": "novel_mock", "length": 35, "gc_content": 0.45,
             "prediction": "Novel", "confidence": 0.40, "sequence_preview": "TTGACA"}
        ],
        "source": "frontend_upload",
        "timestamp": "2026-10-18T11:59:58",
        "processing_time": 1.234
    }"#;

    pub fn row(id: &str, prediction: &str, confidence: f64, gc_content: f64, length: u64) -> SequenceResult {
        SequenceResult {
            sequence_id: id.to_string(),
            length,
            gc_content,
            prediction: Prediction::from(prediction.to_string()),
            confidence,
            sequence_preview: String::new(),
            organism_name: None,
            explanation: None,
            mahalanobis_distance: None,
            energy_score: None,
            ood_score: None,
        }
    }

    pub fn mock_response() -> ClassificationResponse {
        serde_json::from_str(MOCK_RESPONSE_JSON).unwrap()
    }

    fn response_from_rows(rows: Vec<SequenceResult>) -> ClassificationResponse {
        let count = |p: Prediction| rows.iter().filter(|r| r.prediction == p).count();
        ClassificationResponse {
            total_sequences: rows.len(),
            virus_count: count(Prediction::Virus),
            host_count: count(Prediction::Host),
            novel_count: count(Prediction::Novel),
            detailed_results: rows,
            source: "test".to_string(),
            timestamp: "2026-10-18T11:00:00".to_string(),
            processing_time: 0.5,
        }
    }

    /// A response whose rows match the given counts.
    pub fn response_with_counts(virus: usize, host: usize, novel: usize) -> ClassificationResponse {
        let mut rows = Vec::new();
        for (label, n, confidence) in [("Virus", virus, 0.8), ("Host", host, 0.9), ("Novel", novel, 0.5)] {
            for i in 0..n {
                rows.push(row(&format!("{}_{i}", label.to_lowercase()), label, confidence, 0.5, 100));
            }
        }
        response_from_rows(rows)
    }

    /// `n` rows with ids `seq_001`, `seq_002`, ... cycling through the labels.
    pub fn numbered_response(n: usize) -> ClassificationResponse {
        let labels = ["Virus", "Host", "Novel"];
        let rows = (0..n)
            .map(|i| row(&format!("seq_{:03}", i + 1), labels[i % 3], 0.75, 0.42, 1000 + i as u64))
            .collect();
        response_from_rows(rows)
    }

    pub fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    pub fn export_context() -> ExportContext {
        ExportContext {
            generated_at: generated_at(),
            report_id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            config: ReportConfig::default(),
        }
    }
}
