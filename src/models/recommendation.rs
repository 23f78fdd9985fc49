use serde::Serialize;

use super::CatalogEntry;

/// Outcome of resolving a free-text query against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Resolved {
        index: usize,
        matched_title: String,
    },
    NotFound,
}

/// A recommendation candidate before it is joined back to catalog metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub index: usize,
    pub score: f64,
}

/// A display-ready recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub title: String,
    pub genres: String,
    pub director: String,
    pub cast: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub similarity_score: f64,
}

impl ResultRow {
    pub fn from_entry(entry: &CatalogEntry, similarity_score: f64) -> Self {
        Self {
            title: entry.title.clone(),
            genres: entry.genres.clone(),
            director: entry.director.clone(),
            cast: entry.cast.clone(),
            overview: entry.overview.clone(),
            poster_url: entry.poster_url.clone(),
            similarity_score,
        }
    }
}

/// Result of a recommendation search
///
/// `NotFound` covers every unsuccessful case: a query too short to match, no
/// resolver tier matching, or no other entry clearing the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    NotFound,
    Found {
        resolved_title: String,
        results: Vec<ResultRow>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_row_copies_display_fields() {
        let mut entry = CatalogEntry::new("The Matrix");
        entry.director = "Lana Wachowski".to_string();
        entry.poster_url = Some("https://example.com/matrix.jpg".to_string());

        let row = ResultRow::from_entry(&entry, 0.8);
        assert_eq!(row.title, "The Matrix");
        assert_eq!(row.director, "Lana Wachowski");
        assert_eq!(row.poster_url.as_deref(), Some("https://example.com/matrix.jpg"));
        assert_eq!(row.similarity_score, 0.8);
    }

    #[test]
    fn test_search_outcome_serialization() {
        let json = serde_json::to_value(SearchOutcome::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "not_found" }));

        let found = SearchOutcome::Found {
            resolved_title: "Heat".to_string(),
            results: vec![],
        };
        let json = serde_json::to_value(found).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["resolved_title"], "Heat");
    }
}
