use serde::Serialize;

use super::bands::{classify_band, Band};

/// Suggested entry window and how much the models agree on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub entry_window: &'static str,
    pub confidence: &'static str,
    pub entry_rationale: &'static str,
    pub confidence_rationale: &'static str,
}

/// Derive the recommendation from the composite score.
///
/// Goes through `classify_band` so the two classifiers share one set of thresholds.
pub fn recommend(composite: f64) -> Recommendation {
    match classify_band(composite) {
        Band::High => Recommendation {
            entry_window: "Now – 3 months",
            confidence: "High (85–95%)",
            entry_rationale: "Based on current model signals and historical patterns",
            confidence_rationale: "All three models show strong agreement",
        },
        Band::Medium => Recommendation {
            entry_window: "1–6 months",
            confidence: "Medium (60–85%)",
            entry_rationale: "Based on current model signals and historical patterns",
            confidence_rationale: "Models show moderate consensus",
        },
        Band::Low => Recommendation {
            entry_window: "Not recommended",
            confidence: "Low (<60%)",
            entry_rationale: "Current signals do not meet threshold criteria",
            confidence_rationale: "Insufficient model consensus",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high() {
        let rec = recommend(0.8);
        assert_eq!(rec.entry_window, "Now – 3 months");
        assert_eq!(rec.confidence, "High (85–95%)");
        assert_eq!(rec.confidence_rationale, "All three models show strong agreement");
    }

    #[test]
    fn test_medium() {
        let rec = recommend(0.65);
        assert_eq!(rec.entry_window, "1–6 months");
        assert_eq!(rec.confidence, "Medium (60–85%)");
    }

    #[test]
    fn test_low() {
        let rec = recommend(0.4);
        assert_eq!(rec.entry_window, "Not recommended");
        assert_eq!(rec.confidence, "Low (<60%)");
        assert_eq!(rec.entry_rationale, "Current signals do not meet threshold criteria");
    }

    #[test]
    fn test_agrees_with_band_across_unit_interval() {
        for i in 0..=100_000 {
            let x = i as f64 / 100_000.0;
            let expected = match classify_band(x) {
                Band::High => "Now – 3 months",
                Band::Medium => "1–6 months",
                Band::Low => "Not recommended",
            };
            assert_eq!(recommend(x).entry_window, expected, "drift at {}", x);
        }
    }

    #[test]
    fn test_boundaries_match_band() {
        assert_eq!(recommend(0.74).entry_window, "1–6 months");
        assert_eq!(recommend(0.740001).entry_window, "Now – 3 months");
        assert_eq!(recommend(0.59).entry_window, "Not recommended");
        assert_eq!(recommend(0.59001).entry_window, "1–6 months");
    }
}
