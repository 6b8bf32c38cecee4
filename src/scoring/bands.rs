use serde::Serialize;

/// Scores strictly above this are High.
pub const HIGH_THRESHOLD: f64 = 0.74;
/// Scores strictly above this (and not High) are Medium.
pub const MEDIUM_THRESHOLD: f64 = 0.59;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
    High,
    Medium,
    Low,
}

/// Abstract colour role of a band. Presentation layers pick the actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Danger,
    Warning,
    Safe,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::High, Band::Medium, Band::Low];

    pub fn label(&self) -> &'static str {
        match self {
            Band::High => "High",
            Band::Medium => "Medium",
            Band::Low => "Low",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Band::High => Tone::Danger,
            Band::Medium => Tone::Warning,
            Band::Low => Tone::Safe,
        }
    }

    /// Legend entry shown under the watchlist
    pub fn legend(&self) -> &'static str {
        match self {
            Band::High => "High Score (75%+)",
            Band::Medium => "Medium Score (60-75%)",
            Band::Low => "Low Score (<60%)",
        }
    }
}

impl Tone {
    pub fn token(&self) -> &'static str {
        match self {
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Safe => "safe",
        }
    }
}

/// Classify a score into a band. Lower bounds are exclusive.
pub fn classify_band(score: f64) -> Band {
    if score > HIGH_THRESHOLD {
        Band::High
    } else if score > MEDIUM_THRESHOLD {
        Band::Medium
    } else {
        Band::Low
    }
}
