use super::bands::{classify_band, Band};
use super::recommend::{recommend, Recommendation};
use crate::entity::{Company, Model};

/// Composite score: unweighted mean of the three model scores.
///
/// Total over all reals. Inputs in [0, 1] give an output in [0, 1].
pub fn score(baseline: f64, gbm: f64, logistic: f64) -> f64 {
    (baseline + gbm + logistic) / 3.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelContribution {
    pub model: Model,
    pub score: f64,
    pub band: Band,
}

/// Everything the detail view shows about one company's scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub composite: f64,
    pub band: Band,
    pub models: Vec<ModelContribution>,
    pub recommendation: Recommendation,
}

pub fn score_card(company: &Company) -> ScoreCard {
    let composite = company.composite();
    let models = Model::ALL
        .iter()
        .map(|&model| {
            let score = company.scores().get(model);
            ModelContribution {
                model,
                score,
                band: classify_band(score),
            }
        })
        .collect();

    ScoreCard {
        composite,
        band: classify_band(composite),
        models,
        recommendation: recommend(composite),
    }
}
