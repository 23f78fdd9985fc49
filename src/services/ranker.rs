use crate::{catalog::SimilarityMatrix, models::RankedCandidate};

/// Which candidates qualify and how many are returned
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Minimum similarity to qualify (inclusive)
    pub threshold: f64,
    /// Cap on result count; `None` is unbounded
    pub top_n: Option<usize>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            top_n: None,
        }
    }
}

/// Ranks every other entry by its similarity to `resolved`
///
/// Entries scoring below the threshold are dropped. The rest are ordered by
/// score, highest first, with ties broken by ascending index. An out-of-range
/// `resolved` index has no row and yields no candidates.
pub fn rank(
    resolved: usize,
    matrix: &SimilarityMatrix,
    config: &RankingConfig,
) -> Vec<RankedCandidate> {
    let Some(row) = matrix.row(resolved) else {
        tracing::warn!(resolved, size = matrix.len(), "Ranking requested for unknown entry");
        return Vec::new();
    };

    let mut candidates: Vec<RankedCandidate> = row
        .iter()
        .enumerate()
        .filter(|(index, score)| *index != resolved && **score >= config.threshold)
        .map(|(index, score)| RankedCandidate {
            index,
            score: *score,
        })
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));

    if let Some(top_n) = config.top_n {
        candidates.truncate(top_n);
    }

    candidates
}
