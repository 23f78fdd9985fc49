use crate::{
    catalog::CatalogStore,
    error::{AppError, AppResult},
    models::{RankedCandidate, ResultRow},
};

/// Joins ranked candidates back to their catalog metadata, preserving order
///
/// Candidate indices come from the same catalog, so an unknown index is a bug
/// upstream and is reported as an internal error.
pub fn assemble(candidates: &[RankedCandidate], catalog: &CatalogStore) -> AppResult<Vec<ResultRow>> {
    candidates
        .iter()
        .map(|candidate| {
            catalog
                .entry(candidate.index)
                .map(|entry| ResultRow::from_entry(entry, candidate.score))
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "ranked index {} is outside the catalog ({} entries)",
                        candidate.index,
                        catalog.len()
                    ))
                })
        })
        .collect()
}
