pub mod engine;
pub mod filter;
pub mod params;
pub mod session;

pub use engine::{query, sectors};
pub use params::{QueryParams, SectorFilter, SortDirection, SortField, SortSpec, ALL_SECTORS};
pub use session::{QuerySession, View};
