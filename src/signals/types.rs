use serde::{Deserialize, Serialize};

use crate::entity::Model;

/// How many signals are kept per model.
pub const TOP_SIGNALS: usize = 6;

/// A named factor and its contribution to one model's score.
///
/// Contributions are percentage-like but not normalised; several may approach 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAttribution {
    pub name: String,
    pub contribution: f64,
}

/// Ranked signals for one model of one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAttribution {
    pub model: Model,
    pub signals: Vec<SignalAttribution>,
}
