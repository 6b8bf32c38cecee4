use super::types::{ModelAttribution, SignalAttribution, TOP_SIGNALS};
use crate::entity::{Company, Model};
use crate::error::ContractViolation;

/// External source of per-model signal attributions.
///
/// Implementations may return any number of signals in any order;
/// `attributions_for` ranks and truncates them.
pub trait SignalProvider {
    fn signals(&self, company: &Company, model: Model) -> Vec<SignalAttribution>;
}

/// Sort descending by contribution (stable) and keep the top `k`.
/// Negative or non-finite contributions are rejected.
pub fn rank_signals(
    mut signals: Vec<SignalAttribution>,
    k: usize,
) -> Result<Vec<SignalAttribution>, ContractViolation> {
    if let Some(bad) = signals
        .iter()
        .find(|s| !s.contribution.is_finite() || s.contribution < 0.0)
    {
        return Err(ContractViolation::InvalidContribution {
            name: bad.name.clone(),
            value: bad.contribution,
        });
    }
    signals.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    signals.truncate(k);
    Ok(signals)
}

/// Top signals for each of the three models, in model order.
pub fn attributions_for(
    provider: &dyn SignalProvider,
    company: &Company,
) -> Result<Vec<ModelAttribution>, ContractViolation> {
    Model::ALL
        .iter()
        .map(|&model| {
            let signals = rank_signals(provider.signals(company, model), TOP_SIGNALS)?;
            Ok(ModelAttribution { model, signals })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModelScores;

    fn signal(name: &str, contribution: f64) -> SignalAttribution {
        SignalAttribution {
            name: name.to_string(),
            contribution,
        }
    }

    struct Fixed(Vec<SignalAttribution>);

    impl SignalProvider for Fixed {
        fn signals(&self, _company: &Company, _model: Model) -> Vec<SignalAttribution> {
            self.0.clone()
        }
    }

    fn company() -> Company {
        let scores = ModelScores::new(1, 0.7, 0.7, 0.7).unwrap();
        Company::new(1, "VN106", "Velocity Networks", "Technology", scores, 0.0).unwrap()
    }

    #[test]
    fn test_rank_keeps_top_k_descending() {
        let signals = (0..10)
            .map(|i| signal(&format!("S{}", i), i as f64 * 10.0))
            .collect();
        let ranked = rank_signals(signals, TOP_SIGNALS).unwrap();
        assert_eq!(ranked.len(), 6);
        let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S9", "S8", "S7", "S6", "S5", "S4"]);
    }

    #[test]
    fn test_rank_fewer_than_k() {
        let ranked = rank_signals(vec![signal("A", 1.0), signal("B", 2.0)], TOP_SIGNALS).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "B");
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked =
            rank_signals(vec![signal("A", 5.0), signal("B", 5.0), signal("C", 9.0)], 3).unwrap();
        let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_rank_rejects_negative() {
        let err = rank_signals(vec![signal("A", 5.0), signal("B", -1.0)], 6).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::InvalidContribution {
                name: "B".to_string(),
                value: -1.0
            }
        );
    }

    #[test]
    fn test_rank_allows_unbounded_values() {
        let ranked = rank_signals(vec![signal("A", 99.0), signal("B", 140.0)], 6).unwrap();
        assert_eq!(ranked[0].contribution, 140.0);
    }

    #[test]
    fn test_attributions_cover_all_models() {
        let provider = Fixed((0..8).map(|i| signal(&format!("S{}", i), i as f64)).collect());
        let attributions = attributions_for(&provider, &company()).unwrap();
        assert_eq!(attributions.len(), 3);
        assert_eq!(attributions[1].model, Model::Gbm);
        assert!(attributions.iter().all(|a| a.signals.len() == TOP_SIGNALS));
    }
}
