//src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label the classification service attached to a sequence.
///
/// The service may introduce new labels without a client update, so anything
/// other than the three known labels is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Prediction {
    Virus,
    Host,
    Novel,
    Unknown(String),
}

impl Prediction {
    pub fn as_str(&self) -> &str {
        match self {
            Prediction::Virus => "Virus",
            Prediction::Host => "Host",
            Prediction::Novel => "Novel",
            Prediction::Unknown(label) => label,
        }
    }
}

impl From<String> for Prediction {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Virus" => Prediction::Virus,
            "Host" => Prediction::Host,
            "Novel" => Prediction::Novel,
            _ => Prediction::Unknown(label),
        }
    }
}

impl From<Prediction> for String {
    fn from(prediction: Prediction) -> Self {
        match prediction {
            Prediction::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of model output, one per input sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceResult {
    pub sequence_id: String,
    /// Bases
    pub length: u64,
    /// Fraction in [0, 1]
    pub gc_content: f64,
    pub prediction: Prediction,
    /// Model certainty in `prediction`, in [0, 1]
    pub confidence: f64,
    #[serde(default)]
    pub sequence_preview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mahalanobis_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_score: Option<f64>,
    /// Novelty strength in [0, 1] when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ood_score: Option<f64>,
}

/// The full result of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub total_sequences: usize,
    pub virus_count: usize,
    pub host_count: usize,
    pub novel_count: usize,
    /// Input order, `total_sequences` long
    pub detailed_results: Vec<SequenceResult>,
    pub source: String,
    /// Creation time as delivered by the service
    pub timestamp: String,
    /// Seconds
    pub processing_time: f64,
}

/// Qualitative risk tier. Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Tag used in CSV exports.
    pub fn upper(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }

    /// Tag used in JSON and PDF exports.
    pub fn title(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-sequence risk, recomputed whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub label: &'static str,
    pub description: &'static str,
}

/// Banner-level risk for a whole sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRisk {
    pub level: RiskLevel,
    pub message: String,
}

/// A sequence submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInput {
    pub id: String,
    pub sequence: String,
}

/// Model settings sent along with a classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(rename = "type")]
    pub model_type: String,
    pub confidence_threshold: f64,
    pub batch_size: u32,
    pub enable_ood: bool,
    pub ood_threshold: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: "Binary (Virus vs Host)".to_string(),
            confidence_threshold: 0.01,
            batch_size: 16,
            enable_ood: false,
            ood_threshold: 0.99,
        }
    }
}

/// Payload handed to the classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub sequences: Vec<SequenceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ModelConfig>,
    pub source: String,
}
