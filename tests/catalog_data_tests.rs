use std::path::PathBuf;

use cinematch_api::{
    catalog::{CatalogProvider, JsonFileProvider},
    models::SearchOutcome,
    services::{ranker::RankingConfig, recommendations::Recommender, resolver::TitleResolver},
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

async fn load_shipped_catalog(ranking: RankingConfig) -> Recommender {
    let provider = JsonFileProvider::new(data_path("catalog.json"), data_path("similarity.json"));
    Recommender::from_provider(&provider, TitleResolver::default(), ranking)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_shipped_catalog_loads() {
    let provider = JsonFileProvider::new(data_path("catalog.json"), data_path("similarity.json"));
    let store = provider.load().await.unwrap();

    assert_eq!(store.len(), 6);
    assert_eq!(store.matrix().len(), 6);
    assert!(store
        .entries()
        .iter()
        .enumerate()
        .all(|(i, entry)| entry.index == i));
}

#[tokio::test]
async fn test_every_shipped_title_resolves_to_itself() {
    let recommender = load_shipped_catalog(RankingConfig::default()).await;

    for entry in recommender.catalog().entries() {
        match recommender.resolve(&entry.title) {
            cinematch_api::models::MatchResult::Resolved { index, .. } => {
                assert_eq!(index, entry.index, "title {:?}", entry.title)
            }
            cinematch_api::models::MatchResult::NotFound => {
                panic!("{:?} did not resolve", entry.title)
            }
        }
    }
}

#[tokio::test]
async fn test_threshold_variants() {
    // 0.09 admits Interstellar for The Matrix; 0.1 does not
    let loose = load_shipped_catalog(RankingConfig {
        threshold: 0.09,
        top_n: None,
    })
    .await;
    let strict = load_shipped_catalog(RankingConfig {
        threshold: 0.1,
        top_n: None,
    })
    .await;

    let count = |outcome: SearchOutcome| match outcome {
        SearchOutcome::Found { results, .. } => results.len(),
        SearchOutcome::NotFound => 0,
    };

    assert_eq!(count(loose.search("the matrix").unwrap()), 3);
    assert_eq!(count(strict.search("the matrix").unwrap()), 2);
    // Amélie has no neighbour above either threshold
    assert_eq!(strict.search("amelie").unwrap(), SearchOutcome::NotFound);
}
