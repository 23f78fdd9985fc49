use std::sync::Arc;
use std::time::Instant;

use crate::{
    catalog::{CatalogProvider, CatalogStore},
    error::AppResult,
    models::{MatchResult, SearchOutcome},
    services::{
        assembler::assemble,
        ranker::{rank, RankingConfig},
        resolver::TitleResolver,
    },
};

/// Content-based recommendation pipeline
///
/// Resolves a free-text title against the catalog, ranks every other entry by
/// precomputed similarity and joins the ranking back to display metadata. The
/// catalog is immutable, so one `Recommender` can serve concurrent requests.
pub struct Recommender {
    catalog: Arc<CatalogStore>,
    resolver: TitleResolver,
    ranking: RankingConfig,
}

impl Recommender {
    pub fn new(catalog: Arc<CatalogStore>, resolver: TitleResolver, ranking: RankingConfig) -> Self {
        Self {
            catalog,
            resolver,
            ranking,
        }
    }

    /// Loads the catalog through `provider` and builds the pipeline around it
    pub async fn from_provider(
        provider: &dyn CatalogProvider,
        resolver: TitleResolver,
        ranking: RankingConfig,
    ) -> AppResult<Self> {
        let start = Instant::now();
        let catalog = provider.load().await?;

        tracing::info!(
            provider = provider.name(),
            entries = catalog.len(),
            load_time_ms = start.elapsed().as_millis(),
            "Catalog loaded"
        );

        if catalog.is_empty() {
            tracing::warn!(provider = provider.name(), "Catalog is empty; every search will miss");
        }

        Ok(Self::new(Arc::new(catalog), resolver, ranking))
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Ranking used when a request does not override it
    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    pub fn resolve(&self, query: &str) -> MatchResult {
        self.resolver.resolve(query, &self.catalog)
    }

    /// Recommends titles similar to `query` using the default ranking
    pub fn search(&self, query: &str) -> AppResult<SearchOutcome> {
        self.search_with(query, &self.ranking)
    }

    /// Recommends titles similar to `query` using `ranking`
    pub fn search_with(&self, query: &str, ranking: &RankingConfig) -> AppResult<SearchOutcome> {
        let MatchResult::Resolved { index, .. } = self.resolve(query) else {
            tracing::info!(query = %query, "No catalog title matched query");
            return Ok(SearchOutcome::NotFound);
        };

        let candidates = rank(index, self.catalog.matrix(), ranking);
        if candidates.is_empty() {
            tracing::info!(
                query = %query,
                resolved = index,
                threshold = ranking.threshold,
                "No entries cleared the similarity threshold"
            );
            return Ok(SearchOutcome::NotFound);
        }

        let results = assemble(&candidates, &self.catalog)?;
        let resolved_title = self
            .catalog
            .entry(index)
            .map(|entry| entry.title.clone())
            .unwrap_or_default();

        tracing::info!(
            query = %query,
            resolved_title = %resolved_title,
            result_count = results.len(),
            "Recommendations generated"
        );

        Ok(SearchOutcome::Found {
            resolved_title,
            results,
        })
    }
}
