use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;
use crate::scoring::{score, validation::check_unit_interval};

/// The three sub-models feeding the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    Baseline,
    Gbm,
    Logistic,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Baseline, Model::Gbm, Model::Logistic];

    /// Full display name, e.g. "LightGBM"
    pub fn label(&self) -> &'static str {
        match self {
            Model::Baseline => "Baseline Model",
            Model::Gbm => "LightGBM",
            Model::Logistic => "Logistic Regression",
        }
    }

    /// Column header name, e.g. "GBM"
    pub fn short_label(&self) -> &'static str {
        match self {
            Model::Baseline => "Baseline",
            Model::Gbm => "GBM",
            Model::Logistic => "Logistic",
        }
    }
}

/// Validated per-model scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelScores {
    baseline: f64,
    gbm: f64,
    logistic: f64,
}

impl ModelScores {
    /// `id` is only used to label the error.
    pub fn new(id: u32, baseline: f64, gbm: f64, logistic: f64) -> Result<Self, ContractViolation> {
        check_unit_interval(id, Model::Baseline, baseline)?;
        check_unit_interval(id, Model::Gbm, gbm)?;
        check_unit_interval(id, Model::Logistic, logistic)?;
        Ok(Self {
            baseline,
            gbm,
            logistic,
        })
    }

    pub fn get(&self, model: Model) -> f64 {
        match model {
            Model::Baseline => self.baseline,
            Model::Gbm => self.gbm,
            Model::Logistic => self.logistic,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn gbm(&self) -> f64 {
        self.gbm
    }

    pub fn logistic(&self) -> f64 {
        self.logistic
    }
}

/// Raw company row as produced by a data source.
///
/// Any `composite` key in the input is ignored; the composite is always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: u32,
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub baseline: f64,
    pub gbm: f64,
    pub logistic: f64,
    pub change: f64,
}

/// A scored company. The composite is computed on construction and cannot be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub id: u32,
    pub ticker: String,
    pub name: String,
    pub sector: String,
    #[serde(flatten)]
    scores: ModelScores,
    composite: f64,
    pub change: f64,
}

impl Company {
    pub fn new(
        id: u32,
        ticker: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        scores: ModelScores,
        change: f64,
    ) -> Result<Self, ContractViolation> {
        if !change.is_finite() {
            return Err(ContractViolation::NonFiniteChange { id });
        }
        Ok(Self {
            id,
            ticker: ticker.into(),
            name: name.into(),
            sector: sector.into(),
            composite: score(scores.baseline, scores.gbm, scores.logistic),
            scores,
            change,
        })
    }

    pub fn scores(&self) -> &ModelScores {
        &self.scores
    }

    pub fn composite(&self) -> f64 {
        self.composite
    }
}

impl TryFrom<CompanyRecord> for Company {
    type Error = ContractViolation;

    fn try_from(record: CompanyRecord) -> Result<Self, Self::Error> {
        let scores = ModelScores::new(record.id, record.baseline, record.gbm, record.logistic)?;
        Company::new(
            record.id,
            record.ticker,
            record.name,
            record.sector,
            scores,
            record.change,
        )
    }
}
