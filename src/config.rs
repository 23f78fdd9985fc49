use serde::Deserialize;

use crate::services::{ranker::RankingConfig, resolver::ResolverConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the catalog JSON file (array of entries)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the precomputed similarity matrix JSON file
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum similarity score a candidate needs to be recommended
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Cap on the number of recommendations; unset means unbounded
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Closeness cutoff for the approximate title tier
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f64,

    /// Give up on multi-word queries that have no substring match
    #[serde(default = "default_reject_unmatched_multiword")]
    pub reject_unmatched_multiword: bool,

    /// Shared words a keyword-tier candidate needs
    #[serde(default = "default_min_shared_words")]
    pub min_shared_words: usize,
}

fn default_catalog_path() -> String {
    "data/catalog.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_similarity_threshold() -> f64 {
    0.1
}

fn default_fuzzy_cutoff() -> f64 {
    0.7
}

fn default_reject_unmatched_multiword() -> bool {
    true
}

fn default_min_shared_words() -> usize {
    2
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            anyhow::bail!(
                "SIMILARITY_THRESHOLD must be a non-negative number, got {}",
                self.similarity_threshold
            );
        }
        if self.top_n == Some(0) {
            anyhow::bail!("TOP_N must be at least 1 when set");
        }
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            anyhow::bail!("FUZZY_CUTOFF must lie in [0, 1], got {}", self.fuzzy_cutoff);
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ranking(&self) -> RankingConfig {
        RankingConfig {
            threshold: self.similarity_threshold,
            top_n: self.top_n,
        }
    }

    pub fn resolver(&self) -> ResolverConfig {
        ResolverConfig {
            fuzzy_cutoff: self.fuzzy_cutoff,
            reject_unmatched_multiword: self.reject_unmatched_multiword,
            min_shared_words: self.min_shared_words,
            ..ResolverConfig::default()
        }
    }
}
