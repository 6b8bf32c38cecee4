pub mod provider;
pub mod synthetic;
pub mod types;

pub use provider::{attributions_for, rank_signals, SignalProvider};
pub use synthetic::SyntheticSignals;
pub use types::{ModelAttribution, SignalAttribution, TOP_SIGNALS};
