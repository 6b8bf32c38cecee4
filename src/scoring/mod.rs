pub mod bands;
pub mod engine;
pub mod recommend;
pub mod validation;

pub use bands::{classify_band, Band, Tone, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
pub use engine::{score, score_card, ModelContribution, ScoreCard};
pub use recommend::{recommend, Recommendation};
pub use validation::validate_records;
