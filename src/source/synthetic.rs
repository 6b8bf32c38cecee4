use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::DataSource;
use crate::entity::CompanyRecord;
use crate::scoring::score;

pub const SECTORS: [&str; 6] = [
    "Technology",
    "Financials",
    "Healthcare",
    "Industrials",
    "Consumer",
    "Services",
];

pub const COMPANY_NAMES: [&str; 50] = [
    "Apex Digital Corp",
    "Meridian Industries",
    "Quantum Systems",
    "Horizon Tech",
    "Stellar Pharma",
    "Atlas Manufacturing",
    "Velocity Networks",
    "Zenith Finance",
    "Prism Healthcare",
    "Nexus Consulting",
    "Omega Retail",
    "Cascade Logistics",
    "Summit Biotech",
    "Frontier Mining",
    "Eclipse Software",
    "Titan Construction",
    "Vortex Communications",
    "Phoenix Capital",
    "Aurora Therapeutics",
    "Infinity Tech",
    "Delta Airlines Ltd",
    "Sierra Resources",
    "Nova Semiconductors",
    "Cosmos Pharma",
    "Vertex Media",
    "Pinnacle Automotive",
    "Horizon Chemicals",
    "Spectrum Banking",
    "Catalyst Biotech",
    "Fusion Hospitality",
    "Momentum Retail",
    "Keystone Materials",
    "Clarity Software",
    "Genesis Pharma",
    "Vector Aerospace",
    "Radiant Telecom",
    "Quantum Finance",
    "Nexus Materials",
    "Pulse Diagnostics",
    "Orbit Telecom",
    "Summit Industrial",
    "Nova Healthcare",
    "Zenith Manufacturing",
    "Atlas Logistics",
    "Meridian Tech",
    "Apex Pharma",
    "Horizon Finance",
    "Stellar Systems",
    "Quantum Retail",
    "Velocity Industries",
];

/// Placeholder universe of 50 companies with random model scores.
///
/// A fixed seed reproduces the same batch; without one every fetch draws a new batch.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: Option<u64>,
}

impl SyntheticSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Initials of each word followed by 100 + index, e.g. "Apex Digital Corp", 0 -> "ADC100"
pub fn derive_ticker(name: &str, index: usize) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    format!("{}{}", initials, 100 + index)
}

pub fn generate(rng: &mut impl Rng) -> Vec<CompanyRecord> {
    let mut records: Vec<CompanyRecord> = COMPANY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| CompanyRecord {
            id: i as u32 + 1,
            ticker: derive_ticker(name, i),
            name: name.to_string(),
            sector: SECTORS[rng.gen_range(0..SECTORS.len())].to_string(),
            baseline: 0.55 + rng.gen::<f64>() * 0.4,
            gbm: 0.5 + rng.gen::<f64>() * 0.45,
            logistic: 0.52 + rng.gen::<f64>() * 0.43,
            change: (rng.gen::<f64>() - 0.5) * 0.2,
        })
        .collect();

    // Ranked by composite, highest first
    records.sort_by(|a, b| {
        score(b.baseline, b.gbm, b.logistic).total_cmp(&score(a.baseline, a.gbm, a.logistic))
    });
    records
}

impl DataSource for SyntheticSource {
    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("synthetic (seed {})", seed),
            None => "synthetic (random)".to_string(),
        }
    }

    fn fetch(&self) -> Result<Vec<CompanyRecord>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(generate(&mut rng))
    }
}
