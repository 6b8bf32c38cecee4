pub mod collection;
pub mod types;

pub use collection::Collection;
pub use types::{Company, CompanyRecord, Model, ModelScores};
