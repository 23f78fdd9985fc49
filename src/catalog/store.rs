use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
    services::normalizer::normalize,
};

/// Float noise tolerated when validating precomputed scores
const SCORE_TOLERANCE: f64 = 1e-6;

/// Square, symmetric entry-by-entry similarity scores in `[0, 1]`
///
/// Stored row-major; row `i` holds the scores of entry `i` against every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from nested rows, validating shape, range and symmetry
    ///
    /// Values within a small tolerance outside `[0, 1]` (cosine similarity
    /// sometimes lands on `1.0000000002`) are clamped into range.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::InvalidCatalog(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            for (j, score) in row.into_iter().enumerate() {
                if !score.is_finite()
                    || score < -SCORE_TOLERANCE
                    || score > 1.0 + SCORE_TOLERANCE
                {
                    return Err(AppError::InvalidCatalog(format!(
                        "similarity[{}][{}] = {} is outside [0, 1]",
                        i, j, score
                    )));
                }
                scores.push(score.clamp(0.0, 1.0));
            }
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let (a, b) = (scores[i * size + j], scores[j * size + i]);
                if (a - b).abs() > SCORE_TOLERANCE {
                    return Err(AppError::InvalidCatalog(format!(
                        "similarity matrix is not symmetric at ({}, {}): {} vs {}",
                        i, j, a, b
                    )));
                }
            }
        }

        Ok(Self { size, scores })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Scores of entry `index` against every entry, or `None` when out of range
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

/// Read-only catalog: entries, their similarity matrix and a normalized-title cache
///
/// Built once by a `CatalogProvider` and shared behind an `Arc` for the life of
/// the process. Nothing mutates it after construction.
#[derive(Debug)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    normalized_titles: Vec<String>,
    matrix: SimilarityMatrix,
    loaded_at: DateTime<Utc>,
}

impl CatalogStore {
    /// Creates a store, assigning each entry its positional index
    pub fn new(mut entries: Vec<CatalogEntry>, matrix: SimilarityMatrix) -> AppResult<Self> {
        if entries.len() != matrix.len() {
            return Err(AppError::InvalidCatalog(format!(
                "catalog has {} entries but similarity matrix is {}x{}",
                entries.len(),
                matrix.len(),
                matrix.len()
            )));
        }

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.index = index;
        }

        let normalized_titles: Vec<String> =
            entries.iter().map(|entry| normalize(&entry.title)).collect();

        let blank = normalized_titles.iter().filter(|t| t.is_empty()).count();
        if blank > 0 {
            tracing::warn!(count = blank, "Catalog entries with blank titles");
        }

        Ok(Self {
            entries,
            normalized_titles,
            matrix,
            loaded_at: Utc::now(),
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Normalized titles, aligned with `entries()`
    pub fn normalized_titles(&self) -> &[String] {
        &self.normalized_titles
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
impl CatalogStore {
    /// Title-only catalog with an identity similarity matrix
    pub(crate) fn with_titles(titles: &[&str]) -> Self {
        let size = titles.len();
        let rows: Vec<Vec<f64>> = (0..size)
            .map(|i| (0..size).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self::with_scores(titles, rows)
    }

    pub(crate) fn with_scores(titles: &[&str], rows: Vec<Vec<f64>>) -> Self {
        let entries = titles.iter().map(|t| CatalogEntry::new(*t)).collect();
        let matrix = SimilarityMatrix::from_rows(rows).expect("valid test matrix");
        Self::new(entries, matrix).expect("valid test catalog")
    }
}
