use std::cmp::Reverse;
use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

use crate::{
    catalog::CatalogStore,
    models::MatchResult,
    services::normalizer::{normalize, words},
};

/// Tuning knobs for the resolver tiers
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Normalized queries shorter than this (in characters) never match
    pub min_query_chars: usize,
    /// Multi-word queries without a substring hit are unresolvable
    pub reject_unmatched_multiword: bool,
    /// Query words shorter than this are not searched in the keyword tier
    pub keyword_min_chars: usize,
    /// Query words a keyword-tier candidate must contain
    pub min_shared_words: usize,
    /// Minimum closeness for the approximate tier
    pub fuzzy_cutoff: f64,
    /// Approximate candidates kept before picking the closest
    pub fuzzy_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            reject_unmatched_multiword: true,
            keyword_min_chars: 3,
            min_shared_words: 2,
            fuzzy_cutoff: 0.7,
            fuzzy_limit: 5,
        }
    }
}

/// A normalized query split into words
struct Query<'a> {
    text: &'a str,
    words: Vec<&'a str>,
}

impl<'a> Query<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            words: words(text).collect(),
        }
    }

    fn is_multiword(&self) -> bool {
        self.words.len() >= 2
    }
}

/// What a single tier concluded
#[derive(Debug, PartialEq)]
enum TierOutcome {
    Matched(usize),
    /// Nothing here; try the next tier
    NoMatch,
    /// Stop the chain without a match
    Unresolvable,
}

trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn find(&self, query: &Query<'_>, titles: &[String], config: &ResolverConfig) -> TierOutcome;
}

struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn find(&self, query: &Query<'_>, titles: &[String], _config: &ResolverConfig) -> TierOutcome {
        titles
            .iter()
            .position(|title| title == query.text)
            .map_or(TierOutcome::NoMatch, TierOutcome::Matched)
    }
}

/// Prefers titles that start with the query, then fewer words, then shorter titles
struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn find(&self, query: &Query<'_>, titles: &[String], config: &ResolverConfig) -> TierOutcome {
        let best = titles
            .iter()
            .enumerate()
            .filter(|(_, title)| title.contains(query.text))
            .min_by_key(|(_, title)| {
                (
                    !title.starts_with(query.text),
                    words(title).count(),
                    title.chars().count(),
                )
            });

        match best {
            Some((index, _)) => TierOutcome::Matched(index),
            None if config.reject_unmatched_multiword && query.is_multiword() => {
                TierOutcome::Unresolvable
            }
            None => TierOutcome::NoMatch,
        }
    }
}

/// Scores titles by how many distinct query words they contain
struct KeywordOverlap;

impl MatchStrategy for KeywordOverlap {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn find(&self, query: &Query<'_>, titles: &[String], config: &ResolverConfig) -> TierOutcome {
        let mut candidates = BTreeSet::new();
        for word in query
            .words
            .iter()
            .filter(|w| w.chars().count() >= config.keyword_min_chars)
        {
            candidates.extend(
                titles
                    .iter()
                    .enumerate()
                    .filter(|(_, title)| title.contains(*word))
                    .map(|(index, _)| index),
            );
        }

        let distinct: BTreeSet<&str> = query.words.iter().copied().collect();
        let best = candidates
            .into_iter()
            .map(|index| {
                let title = &titles[index];
                let shared = distinct.iter().filter(|w| title.contains(**w)).count();
                (index, shared, title.chars().count())
            })
            .filter(|(_, shared, _)| *shared >= config.min_shared_words)
            .min_by_key(|(index, shared, len)| (Reverse(*shared), *len, *index));

        best.map_or(TierOutcome::NoMatch, |(index, _, _)| TierOutcome::Matched(index))
    }
}

/// Edit-distance closeness between the query and each title
struct ApproximateMatch;

impl MatchStrategy for ApproximateMatch {
    fn name(&self) -> &'static str {
        "approximate"
    }

    fn find(&self, query: &Query<'_>, titles: &[String], config: &ResolverConfig) -> TierOutcome {
        let mut close: Vec<(usize, f64)> = titles
            .iter()
            .enumerate()
            .map(|(index, title)| (index, normalized_levenshtein(query.text, title)))
            .filter(|(_, closeness)| *closeness >= config.fuzzy_cutoff)
            .collect();

        close.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        close.truncate(config.fuzzy_limit);

        if !close.is_empty() {
            tracing::debug!(candidates = ?close, "Approximate title candidates");
        }

        close
            .first()
            .map_or(TierOutcome::NoMatch, |(index, _)| TierOutcome::Matched(*index))
    }
}

/// Resolves free-text queries to a single catalog entry
///
/// The query is matched against the catalog's normalized titles by an ordered
/// chain of tiers: exact, substring, keyword overlap, approximate. The first
/// tier that produces a match wins, so a literal match is never overridden by
/// a fuzzier one.
pub struct TitleResolver {
    config: ResolverConfig,
    tiers: Vec<Box<dyn MatchStrategy>>,
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl TitleResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            tiers: vec![
                Box::new(ExactMatch),
                Box::new(SubstringMatch),
                Box::new(KeywordOverlap),
                Box::new(ApproximateMatch),
            ],
        }
    }

    /// Finds the best-matching catalog entry for `query`
    pub fn resolve(&self, query: &str, catalog: &CatalogStore) -> MatchResult {
        let normalized = normalize(query);
        if normalized.chars().count() < self.config.min_query_chars {
            tracing::debug!(query = %query, "Query too short to resolve");
            return MatchResult::NotFound;
        }

        let query = Query::new(&normalized);
        let titles = catalog.normalized_titles();

        for tier in &self.tiers {
            match tier.find(&query, titles, &self.config) {
                TierOutcome::Matched(index) => {
                    tracing::debug!(
                        tier = tier.name(),
                        index,
                        title = %titles[index],
                        "Query resolved"
                    );
                    return MatchResult::Resolved {
                        index,
                        matched_title: titles[index].clone(),
                    };
                }
                TierOutcome::Unresolvable => {
                    tracing::debug!(
                        tier = tier.name(),
                        query = %query.text,
                        "Query rejected without trying later tiers"
                    );
                    return MatchResult::NotFound;
                }
                TierOutcome::NoMatch => {}
            }
        }

        MatchResult::NotFound
    }
}
