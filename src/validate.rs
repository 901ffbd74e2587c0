//src/validate.rs

use ahash::AHashSet;

use crate::error::{ReportError, Result};
use crate::types::{ClassificationResponse, Prediction, SequenceResult};

/// Check the preconditions every risk/report operation relies on.
///
/// Fails on the first violation instead of coercing values, so a report is never
/// produced from a corrupted response. Labels the client does not recognise are
/// counted with the novel sequences, matching how the service tallies them.
pub fn validate_response(response: &ClassificationResponse) -> Result<()> {
    if response.total_sequences == 0 {
        return Err(ReportError::EmptyResponse);
    }
    if !response.processing_time.is_finite() || response.processing_time < 0.0 {
        return Err(ReportError::InvalidProcessingTime(response.processing_time));
    }

    check_count(
        "total_sequences",
        response.total_sequences,
        response.detailed_results.len(),
    )?;
    let declared_sum = response
        .virus_count
        .checked_add(response.host_count)
        .and_then(|sum| sum.checked_add(response.novel_count))
        .ok_or(ReportError::CountMismatch {
            field: "virus_count + host_count + novel_count",
            declared: usize::MAX,
            actual: response.total_sequences,
        })?;
    check_count(
        "virus_count + host_count + novel_count",
        declared_sum,
        response.total_sequences,
    )?;

    let mut seen: AHashSet<&str> = AHashSet::with_capacity(response.detailed_results.len());
    let (mut virus, mut host, mut novel) = (0usize, 0usize, 0usize);

    for (index, row) in response.detailed_results.iter().enumerate() {
        validate_result(row, index)?;
        if !seen.insert(row.sequence_id.as_str()) {
            return Err(ReportError::DuplicateSequenceId(row.sequence_id.clone()));
        }
        match row.prediction {
            Prediction::Virus => virus += 1,
            Prediction::Host => host += 1,
            Prediction::Novel | Prediction::Unknown(_) => novel += 1,
        }
    }

    check_count("virus_count", response.virus_count, virus)?;
    check_count("host_count", response.host_count, host)?;
    check_count("novel_count", response.novel_count, novel)?;
    Ok(())
}

/// Check a single row: non-empty id and every fraction inside [0, 1].
pub fn validate_result(row: &SequenceResult, index: usize) -> Result<()> {
    if row.sequence_id.is_empty() {
        return Err(ReportError::EmptySequenceId { index });
    }
    check_fraction(row, "confidence", row.confidence)?;
    check_fraction(row, "gc_content", row.gc_content)?;
    if let Some(ood) = row.ood_score {
        check_fraction(row, "ood_score", ood)?;
    }
    if let Some(distance) = row.mahalanobis_distance {
        check_finite(row, "mahalanobis_distance", distance)?;
    }
    if let Some(energy) = row.energy_score {
        check_finite(row, "energy_score", energy)?;
    }
    Ok(())
}

fn check_count(field: &'static str, declared: usize, actual: usize) -> Result<()> {
    if declared != actual {
        return Err(ReportError::CountMismatch {
            field,
            declared,
            actual,
        });
    }
    Ok(())
}

fn check_finite(row: &SequenceResult, field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ReportError::NonFinite {
            sequence_id: row.sequence_id.clone(),
            field,
        });
    }
    Ok(())
}

fn check_fraction(row: &SequenceResult, field: &'static str, value: f64) -> Result<()> {
    check_finite(row, field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ReportError::OutOfRange {
            sequence_id: row.sequence_id.clone(),
            field,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_response, row};

    #[test]
    fn test_mock_response_is_valid() {
        assert!(validate_response(&mock_response()).is_ok());
    }

    #[test]
    fn test_empty_response_rejected() {
        let mut response = mock_response();
        response.detailed_results.clear();
        response.total_sequences = 0;
        response.virus_count = 0;
        response.host_count = 0;
        response.novel_count = 0;
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::EmptyResponse)
        ));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let mut response = mock_response();
        response.detailed_results[0].confidence = 1.2;
        match validate_response(&response) {
            Err(ReportError::OutOfRange { sequence_id, field, .. }) => {
                assert_eq!(sequence_id, "virus_mock");
                assert_eq!(field, "confidence");
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_ood_rejected() {
        let mut response = mock_response();
        response.detailed_results[1].ood_score = Some(f64::NAN);
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::NonFinite { field: "ood_score", .. })
        ));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let mut response = mock_response();
        response.virus_count = 2;
        response.host_count = 0;
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::CountMismatch { field: "virus_count", declared: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_overflowing_counts_rejected() {
        let mut response = mock_response();
        response.virus_count = usize::MAX;
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::CountMismatch {
                field: "virus_count + host_count + novel_count",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut response = mock_response();
        response.detailed_results[2].sequence_id = "virus_mock".to_string();
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::DuplicateSequenceId(id)) if id == "virus_mock"
        ));
    }

    #[test]
    fn test_unknown_label_counts_as_novel() {
        let mut response = mock_response();
        response.detailed_results[2] = row("phage_1", "Phage", 0.5, 0.4, 12);
        assert!(validate_response(&response).is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut response = mock_response();
        response.detailed_results[1].sequence_id.clear();
        assert!(matches!(
            validate_response(&response),
            Err(ReportError::EmptySequenceId { index: 1 })
        ));
    }
}
