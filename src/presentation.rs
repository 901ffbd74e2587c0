//src/presentation.rs
//
// Display-only derivations shared by the dashboard and the PDF export.

use crate::report::common::format_percent;
use crate::types::{Prediction, RiskLevel};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to [0, 1], as PDF color operators want them.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub const ROSE: Rgb = Rgb(225, 29, 72);
pub const EMERALD: Rgb = Rgb(5, 150, 105);
pub const AMBER: Rgb = Rgb(217, 119, 6);
pub const SLATE: Rgb = Rgb(71, 85, 105);
pub const BLUE: Rgb = Rgb(37, 99, 235);

/// Text color for a prediction badge.
pub fn prediction_color(prediction: &Prediction) -> Rgb {
    match prediction {
        Prediction::Virus => ROSE,
        Prediction::Host => EMERALD,
        Prediction::Novel => AMBER,
        Prediction::Unknown(_) => SLATE,
    }
}

pub fn risk_color(level: RiskLevel) -> Rgb {
    match level {
        RiskLevel::Low => EMERALD,
        RiskLevel::Moderate => AMBER,
        RiskLevel::High => ROSE,
    }
}

/// Four-band classification for confidence bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.7 {
            ConfidenceBand::Strong
        } else if confidence >= 0.5 {
            ConfidenceBand::Moderate
        } else if confidence >= 0.3 {
            ConfidenceBand::Weak
        } else {
            ConfidenceBand::Poor
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            ConfidenceBand::Strong => EMERALD,
            ConfidenceBand::Moderate => BLUE,
            ConfidenceBand::Weak => AMBER,
            ConfidenceBand::Poor => ROSE,
        }
    }
}

/// Three-band tint for GC content cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcTint {
    Low,
    Neutral,
    High,
}

impl GcTint {
    pub fn from_gc(gc_content: f64) -> Self {
        if gc_content <= 0.35 {
            GcTint::Low
        } else if gc_content <= 0.55 {
            GcTint::Neutral
        } else {
            GcTint::High
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            GcTint::Low => BLUE,
            GcTint::Neutral => SLATE,
            GcTint::High => EMERALD,
        }
    }
}

/// Human-readable sequence length, e.g. `1.5M bp`, `2.3K bp`, `850 bp`.
pub fn format_length(length: u64) -> String {
    if length >= 1_000_000 {
        format!("{:.1}M bp", length as f64 / 1_000_000.0)
    } else if length >= 1_000 {
        format!("{:.1}K bp", length as f64 / 1_000.0)
    } else {
        format!("{length} bp")
    }
}

/// Width of a confidence bar in percent, same rounding as the exports.
pub fn confidence_bar(confidence: f64) -> (String, ConfidenceBand) {
    (
        format!("{}%", format_percent(confidence)),
        ConfidenceBand::from_confidence(confidence),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_confidence(0.7), ConfidenceBand::Strong);
        assert_eq!(ConfidenceBand::from_confidence(0.69), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(0.3), ConfidenceBand::Weak);
        assert_eq!(ConfidenceBand::from_confidence(0.29), ConfidenceBand::Poor);
    }

    #[test]
    fn test_gc_tints() {
        assert_eq!(GcTint::from_gc(0.35), GcTint::Low);
        assert_eq!(GcTint::from_gc(0.36), GcTint::Neutral);
        assert_eq!(GcTint::from_gc(0.55), GcTint::Neutral);
        assert_eq!(GcTint::from_gc(0.56), GcTint::High);
        assert_eq!(GcTint::Low.color(), BLUE);
    }

    #[test]
    fn test_format_length_units() {
        assert_eq!(format_length(32), "32 bp");
        assert_eq!(format_length(999), "999 bp");
        assert_eq!(format_length(1_000), "1.0K bp");
        assert_eq!(format_length(2_345), "2.3K bp");
        assert_eq!(format_length(1_500_000), "1.5M bp");
    }

    #[test]
    fn test_confidence_bar_matches_export_rounding() {
        let (width, band) = confidence_bar(0.8249);
        assert_eq!(width, "82.5%");
        assert_eq!(band, ConfidenceBand::Strong);
    }

    #[test]
    fn test_colors() {
        assert_eq!(prediction_color(&Prediction::Virus), Rgb(225, 29, 72));
        assert_eq!(risk_color(RiskLevel::High), ROSE);
        assert_eq!(Rgb(255, 0, 0).unit(), (1.0, 0.0, 0.0));
    }
}
