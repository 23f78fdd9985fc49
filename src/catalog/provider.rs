use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{
    catalog::store::{CatalogStore, SimilarityMatrix},
    error::{AppError, AppResult},
    models::CatalogEntry,
};

/// Trait for catalog sources
///
/// A provider materializes the read-only `CatalogStore` once at startup. How the
/// metadata and similarity scores were produced is the provider's business; the
/// recommender only ever sees the finished store.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Loads entries and their similarity matrix into a validated store
    async fn load(&self) -> AppResult<CatalogStore>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Loads the catalog from two JSON files
///
/// - catalog: array of `{title, genres, director, cast, overview, poster_url}`
/// - similarity: array of rows, row `i` aligned with catalog entry `i`
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    catalog_path: PathBuf,
    similarity_path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(catalog_path: impl Into<PathBuf>, similarity_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            similarity_path: similarity_path.into(),
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::Io {
                path: path.display().to_string(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse catalog file");
            AppError::from(e)
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for JsonFileProvider {
    async fn load(&self) -> AppResult<CatalogStore> {
        let entries: Vec<CatalogEntry> = Self::read_json(&self.catalog_path).await?;
        let rows: Vec<Vec<f64>> = Self::read_json(&self.similarity_path).await?;

        tracing::info!(
            entries = entries.len(),
            matrix_rows = rows.len(),
            catalog_path = %self.catalog_path.display(),
            "Catalog files read"
        );

        let matrix = SimilarityMatrix::from_rows(rows)?;
        CatalogStore::new(entries, matrix)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_catalog_from_files() {
        let catalog = write_temp(
            r#"[
                {"title": "The Matrix", "genres": "Action Sci-Fi", "poster_url": "https://example.com/m.jpg"},
                {"title": "Inception", "director": "Christopher Nolan"}
            ]"#,
        );
        let similarity = write_temp("[[1.0, 0.12], [0.12, 1.0]]");

        let provider = JsonFileProvider::new(catalog.path(), similarity.path());
        let store = provider.load().await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[1].index, 1);
        assert_eq!(store.entries()[1].director, "Christopher Nolan");
        assert_eq!(store.matrix().row(0), Some(&[1.0, 0.12][..]));
        assert_eq!(provider.name(), "json_file");
    }

    #[tokio::test]
    async fn test_null_metadata_does_not_fail_load() {
        let catalog = write_temp(
            r#"[
                {"title": "Heat", "director": "Michael Mann", "overview": null},
                {"title": "Ronin", "genres": null, "cast": null}
            ]"#,
        );
        let similarity = write_temp("[[1.0, 0.2], [0.2, 1.0]]");

        let provider = JsonFileProvider::new(catalog.path(), similarity.path());
        let store = provider.load().await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].overview, "");
        assert_eq!(store.entries()[0].director, "Michael Mann");
        assert_eq!(store.entries()[1].genres, "");
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let similarity = write_temp("[]");
        let provider = JsonFileProvider::new("/nonexistent/catalog.json", similarity.path());

        let err = provider.load().await.unwrap_err();
        match err {
            AppError::Io { path, .. } => assert_eq!(path, "/nonexistent/catalog.json"),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let catalog = write_temp("[{\"title\": ");
        let similarity = write_temp("[]");
        let provider = JsonFileProvider::new(catalog.path(), similarity.path());

        assert!(matches!(provider.load().await, Err(AppError::Parse(_))));
    }

    #[tokio::test]
    async fn test_mismatched_matrix_is_rejected() {
        let catalog = write_temp(r#"[{"title": "Heat"}, {"title": "Ronin"}]"#);
        let similarity = write_temp("[[1.0]]");
        let provider = JsonFileProvider::new(catalog.path(), similarity.path());

        assert!(matches!(
            provider.load().await,
            Err(AppError::InvalidCatalog(_))
        ));
    }
}
