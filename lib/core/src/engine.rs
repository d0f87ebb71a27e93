use crate::{Embedder, KeywordIndex, KeywordMatch, KeywordRecord};
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Candidate floor for the partial-selection superset in [`RelevanceEngine::top_keywords`].
const MIN_SUPERSET: usize = 50;

/// Read-only keyword retrieval over an immutable [`KeywordIndex`] snapshot.
///
/// The engine starts empty; [`load`](Self::load) installs a snapshot once
/// and every query operation is a pure read after that. Querying before a
/// snapshot is loaded reports "no results" exactly like an empty match set
/// does; the distinction is logged, not surfaced as an error.
pub struct RelevanceEngine {
    embedder: Box<dyn Embedder>,
    index: RwLock<Option<Arc<KeywordIndex>>>,
}

impl RelevanceEngine {
    #[must_use]
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self {
            embedder,
            index: RwLock::new(None),
        }
    }

    /// Install the corpus snapshot. Replaces any previously loaded index.
    pub fn load(&self, index: KeywordIndex) {
        info!(rows = index.len(), dim = index.dim(), "keyword index loaded");
        *self.index.write() = Some(Arc::new(index));
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.read().is_some()
    }

    fn snapshot(&self) -> Option<Arc<KeywordIndex>> {
        let guard = self.index.read();
        if guard.is_none() {
            warn!("relevance query against an unloaded index");
        }
        guard.clone()
    }

    /// Embed the query and scan, or None on the empty-query / unloaded paths.
    fn scan_query(&self, query: &str, dataset_id: Option<&str>) -> Option<(Arc<KeywordIndex>, Vec<(u32, f32)>)> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            debug!("empty query text, returning no results");
            return None;
        }
        let index = self.snapshot()?;
        let embedded = self.embedder.embed(trimmed);
        let sims = index.scan(embedded.as_slice(), dataset_id);
        Some((index, sims))
    }

    /// Top `limit` unique keywords by cosine similarity.
    ///
    /// Fetches a superset of `max(limit*5, 50)` candidates by partial
    /// selection, sorts that superset exactly, then walks it deduplicating
    /// by lowercased keyword text so only the highest-similarity occurrence
    /// of each keyword survives. Result order is strictly descending by
    /// similarity; ties break by original row order.
    pub fn top_keywords(
        &self,
        query: &str,
        limit: usize,
        dataset_id: Option<&str>,
    ) -> Vec<KeywordMatch> {
        if limit == 0 {
            return Vec::new();
        }
        let Some((index, mut sims)) = self.scan_query(query, dataset_id) else {
            return Vec::new();
        };

        let superset = limit.saturating_mul(5).max(MIN_SUPERSET).min(sims.len());
        if superset == 0 {
            return Vec::new();
        }
        if sims.len() > superset {
            sims.select_nth_unstable_by_key(superset - 1, |&(row, sim)| {
                (Reverse(OrderedFloat(sim)), row)
            });
            sims.truncate(superset);
        }
        sims.sort_unstable_by_key(|&(row, sim)| (Reverse(OrderedFloat(sim)), row));

        let mut seen: AHashSet<String> = AHashSet::with_capacity(limit);
        let mut results = Vec::with_capacity(limit);
        for (row, sim) in sims {
            let record = index.record(row);
            if seen.insert(record.keyword.to_lowercase()) {
                results.push(KeywordMatch::new(record.clone(), sim));
                if results.len() == limit {
                    break;
                }
            }
        }
        results
    }

    /// Every unique keyword whose similarity meets the threshold, no cap.
    ///
    /// Used when completeness matters more than precision. Deduplication
    /// keeps the max-similarity occurrence per keyword, same as top-K.
    pub fn search_broad(
        &self,
        query: &str,
        min_similarity: f32,
        dataset_id: Option<&str>,
    ) -> Vec<KeywordMatch> {
        let Some((index, sims)) = self.scan_query(query, dataset_id) else {
            return Vec::new();
        };

        let mut qualifying: Vec<(u32, f32)> = sims
            .into_iter()
            .filter(|&(_, sim)| sim >= min_similarity)
            .collect();
        qualifying.sort_unstable_by_key(|&(row, sim)| (Reverse(OrderedFloat(sim)), row));

        let mut seen: AHashSet<String> = AHashSet::new();
        let mut results = Vec::new();
        for (row, sim) in qualifying {
            let record = index.record(row);
            if seen.insert(record.keyword.to_lowercase()) {
                results.push(KeywordMatch::new(record.clone(), sim));
            }
        }
        results
    }

    /// Score the whole (optionally dataset-filtered) corpus against one
    /// description: keyword -> best similarity across all rows sharing that
    /// keyword text. The only operation that returns corpus-wide scores
    /// rather than a capped list.
    pub fn compute_product_relevance(
        &self,
        description: &str,
        dataset_id: Option<&str>,
    ) -> HashMap<String, f32> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            debug!("empty description text, returning no relevance scores");
            return HashMap::new();
        }
        let Some(index) = self.snapshot() else {
            return HashMap::new();
        };
        let embedded = self.embedder.embed(trimmed);
        if embedded.dim() != index.dim() {
            return HashMap::new();
        }
        let query = embedded.as_slice();

        let rows = index.candidate_rows(dataset_id);
        let sims: Vec<(u32, f32)> = rows
            .into_par_iter()
            .map(|row| (row, crate::dot_product(query, index.row_embedding(row))))
            .collect();

        // keyword (lowercased) -> (best similarity, display-case keyword)
        let mut best: AHashMap<String, (f32, &str)> = AHashMap::new();
        for (row, sim) in sims {
            let keyword = index.record(row).keyword.as_str();
            best.entry(keyword.to_lowercase())
                .and_modify(|entry| {
                    if sim > entry.0 {
                        *entry = (sim, keyword);
                    }
                })
                .or_insert((sim, keyword));
        }

        best.into_values()
            .map(|(sim, keyword)| (keyword.to_string(), sim))
            .collect()
    }

    /// Full-table projection, sorted by score descending. No similarity.
    pub fn all_keywords(&self) -> Vec<KeywordRecord> {
        let Some(index) = self.snapshot() else {
            return Vec::new();
        };
        let mut records = index.records().to_vec();
        records.sort_by_key(|r| Reverse(OrderedFloat(r.score)));
        records
    }

    /// Records with at least `min_units` advertising units, score-sorted.
    pub fn high_volume_keywords(&self, min_units: f32) -> Vec<KeywordRecord> {
        let Some(index) = self.snapshot() else {
            return Vec::new();
        };
        let mut records: Vec<KeywordRecord> = index
            .records()
            .iter()
            .filter(|r| r.ad_units >= min_units)
            .cloned()
            .collect();
        records.sort_by_key(|r| Reverse(OrderedFloat(r.score)));
        records
    }
}

/// Merge the results of several queries into one deduplicated list.
///
/// Across queries the winner per keyword is the record with the higher
/// `score` value. This is deliberately different from the within-query
/// dedup rule, which keeps the higher *similarity* occurrence.
pub fn merge_query_results<I>(result_sets: I) -> Vec<KeywordMatch>
where
    I: IntoIterator<Item = Vec<KeywordMatch>>,
{
    let mut best: AHashMap<String, KeywordMatch> = AHashMap::new();
    for results in result_sets {
        for candidate in results {
            let key = candidate.keyword().to_lowercase();
            match best.get_mut(&key) {
                Some(existing) => {
                    if candidate.score() > existing.score() {
                        *existing = candidate;
                    }
                }
                None => {
                    best.insert(key, candidate);
                }
            }
        }
    }
    let mut merged: Vec<KeywordMatch> = best.into_values().collect();
    merged.sort_by_key(|m| Reverse(OrderedFloat(m.score())));
    merged
}
