mod catalog;
mod recommendation;

pub use catalog::CatalogEntry;
pub use recommendation::{MatchResult, RankedCandidate, ResultRow, SearchOutcome};
