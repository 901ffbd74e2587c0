// src/risk/classify_risk.rs

use crate::types::{Prediction, RiskAssessment, RiskLevel, SequenceResult};

/// Viral confidence at or above which a detection is high risk.
pub const HIGH_CONFIDENCE: f64 = 0.7;
/// Viral confidence at or above which a detection is moderate risk.
pub const MODERATE_CONFIDENCE: f64 = 0.4;
/// OOD score above which any non-host sequence is treated as novel.
pub const OOD_OVERRIDE: f64 = 0.7;

const HOST: RiskAssessment = assessment(RiskLevel::Low, "Host organism - no pathogenic concern");
const NOVEL: RiskAssessment = assessment(
    RiskLevel::High,
    "Novel or unknown sequence - requires investigation",
);
const VIRUS_HIGH: RiskAssessment = assessment(
    RiskLevel::High,
    "High-confidence viral detection - immediate attention recommended",
);
const VIRUS_MODERATE: RiskAssessment = assessment(
    RiskLevel::Moderate,
    "Moderate-confidence viral detection - further analysis suggested",
);
const VIRUS_LOW: RiskAssessment = assessment(
    RiskLevel::Low,
    "Low-confidence viral prediction - may be false positive",
);
const FALLBACK: RiskAssessment = assessment(RiskLevel::Low, "Classification complete");

const fn assessment(level: RiskLevel, description: &'static str) -> RiskAssessment {
    let label = match level {
        RiskLevel::Low => "Low Risk",
        RiskLevel::Moderate => "Moderate Risk",
        RiskLevel::High => "High Risk",
    };
    RiskAssessment {
        level,
        label,
        description,
    }
}

/// Map one prediction to a risk tier. First matching rule wins:
///
/// 1. `Host` is always low, whatever the confidence or novelty.
/// 2. `Novel`, or an OOD score above 0.7, is high.
/// 3. `Virus` scales with confidence: `[0.7, 1]` high, `[0.4, 0.7)` moderate,
///    below 0.4 low.
/// 4. Labels this client does not know fall back to low.
///
/// `confidence` and `ood_score` must already be validated to [0, 1].
pub fn classify(prediction: &Prediction, confidence: f64, ood_score: Option<f64>) -> RiskAssessment {
    if *prediction == Prediction::Host {
        return HOST;
    }

    let ood_override = ood_score.is_some_and(|ood| ood > OOD_OVERRIDE);
    if *prediction == Prediction::Novel || ood_override {
        return NOVEL;
    }

    match prediction {
        Prediction::Virus if confidence >= HIGH_CONFIDENCE => VIRUS_HIGH,
        Prediction::Virus if confidence >= MODERATE_CONFIDENCE => VIRUS_MODERATE,
        Prediction::Virus => VIRUS_LOW,
        _ => FALLBACK,
    }
}

/// [`classify`] applied to a result row.
pub fn classify_result(row: &SequenceResult) -> RiskAssessment {
    classify(&row.prediction, row.confidence, row.ood_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTREMES: [f64; 5] = [0.0, 0.39, 0.4, 0.7, 1.0];

    #[test]
    fn test_host_is_always_low() {
        for &confidence in &EXTREMES {
            for ood in [None, Some(0.0), Some(0.71), Some(1.0)] {
                let risk = classify(&Prediction::Host, confidence, ood);
                assert_eq!(risk.level, RiskLevel::Low, "confidence={confidence} ood={ood:?}");
                assert_eq!(risk.description, "Host organism - no pathogenic concern");
            }
        }
    }

    #[test]
    fn test_virus_bands_are_closed_left() {
        let level = |c: f64| classify(&Prediction::Virus, c, None).level;
        assert_eq!(level(0.0), RiskLevel::Low);
        assert_eq!(level(0.399), RiskLevel::Low);
        assert_eq!(level(0.4), RiskLevel::Moderate);
        assert_eq!(level(0.699), RiskLevel::Moderate);
        assert_eq!(level(0.7), RiskLevel::High);
        assert_eq!(level(1.0), RiskLevel::High);
    }

    #[test]
    fn test_virus_risk_is_monotonic_in_confidence() {
        let mut previous = RiskLevel::Low;
        for step in 0..=100 {
            let level = classify(&Prediction::Virus, step as f64 / 100.0, Some(0.1)).level;
            assert!(level >= previous, "risk dropped at confidence {}", step as f64 / 100.0);
            previous = level;
        }
    }

    #[test]
    fn test_novel_and_ood_override_low_viral_confidence() {
        assert_eq!(classify(&Prediction::Novel, 0.0, None).level, RiskLevel::High);
        assert_eq!(classify(&Prediction::Novel, 1.0, Some(0.0)).level, RiskLevel::High);

        let risk = classify(&Prediction::Virus, 0.1, Some(0.71));
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(risk.description, "Novel or unknown sequence - requires investigation");

        // exactly 0.7 is not an override
        assert_eq!(classify(&Prediction::Virus, 0.1, Some(0.7)).level, RiskLevel::Low);
    }

    #[test]
    fn test_unknown_label_falls_back_to_low() {
        let phage = Prediction::Unknown("Phage".to_string());
        let risk = classify(&phage, 0.99, None);
        assert_eq!(risk.level, RiskLevel::Low);
        assert_eq!(risk.description, "Classification complete");

        // the OOD override still applies to unknown labels
        assert_eq!(classify(&phage, 0.99, Some(0.9)).level, RiskLevel::High);
    }

    #[test]
    fn test_labels_follow_level() {
        assert_eq!(classify(&Prediction::Virus, 0.5, None).label, "Moderate Risk");
        assert_eq!(classify(&Prediction::Novel, 0.5, None).label, RiskLevel::High.label());
    }
}
