use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::SignalProvider;
use super::types::SignalAttribution;
use crate::entity::{Company, Model};

pub const SIGNAL_NAMES: [&str; 10] = [
    "Leverage Signal",
    "Liquidity Signal",
    "Profitability Signal",
    "Market Signal",
    "Governance Signal",
    "Volatility Signal",
    "Momentum Signal",
    "Value Signal",
    "Growth Signal",
    "Quality Signal",
];

/// Placeholder attributions: every named signal gets a contribution in [0, 100).
///
/// Seeded per (seed, company, model) so reopening a detail view shows the same numbers.
#[derive(Debug, Clone)]
pub struct SyntheticSignals {
    seed: u64,
}

impl SyntheticSignals {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, company_id: u32, model: Model) -> StdRng {
        let model_index = match model {
            Model::Baseline => 0u64,
            Model::Gbm => 1,
            Model::Logistic => 2,
        };
        let mixed = self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (((company_id as u64) << 2) | model_index);
        StdRng::seed_from_u64(mixed)
    }
}

impl SignalProvider for SyntheticSignals {
    fn signals(&self, company: &Company, model: Model) -> Vec<SignalAttribution> {
        let mut rng = self.rng_for(company.id, model);
        SIGNAL_NAMES
            .iter()
            .map(|name| SignalAttribution {
                name: name.to_string(),
                contribution: rng.gen_range(0.0..100.0),
            })
            .collect()
    }
}
