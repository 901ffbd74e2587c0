// src/risk/sample_risk.rs

use crate::error::{ReportError, Result};
use crate::types::{ClassificationResponse, RiskLevel, SampleRisk};

/// Share of potential pathogens above which a sample is high risk.
pub const PATHOGEN_RATIO_HIGH: f64 = 0.5;

/// Coarse, population-level risk for the whole sample.
///
/// Independent of the per-row tiers: any novel sequence, or more than half the
/// sample being viral/novel, is high; any other viral hit is moderate, however
/// small its share.
pub fn aggregate_risk(response: &ClassificationResponse) -> Result<SampleRisk> {
    if response.total_sequences == 0 {
        return Err(ReportError::EmptyResponse);
    }

    let pathogens = response.virus_count.saturating_add(response.novel_count);
    if pathogens == 0 {
        return Ok(SampleRisk {
            level: RiskLevel::Low,
            message: "No significant pathogenic threat detected in this sample.".to_string(),
        });
    }

    let ratio = pathogens as f64 / response.total_sequences as f64;
    log::debug!(
        "sample risk: {} virus, {} novel of {} (ratio {:.3})",
        response.virus_count,
        response.novel_count,
        response.total_sequences,
        ratio
    );

    if response.novel_count > 0 || ratio > PATHOGEN_RATIO_HIGH {
        Ok(SampleRisk {
            level: RiskLevel::High,
            message: format!(
                "{pathogens} potential pathogen(s) detected. Immediate review recommended."
            ),
        })
    } else {
        Ok(SampleRisk {
            level: RiskLevel::Moderate,
            message: format!(
                "{} viral sequence(s) detected. Further analysis suggested.",
                response.virus_count
            ),
        })
    }
}
