//! Batched snapshot building with first-write-wins merge.
//!
//! Ingestion is an offline, single-writer process: rows are appended in
//! batches, duplicate `(dataset_id, lowercased keyword)` keys are silently
//! skipped, and `finish()` stamps ranks and emits an immutable
//! [`SnapshotData`]. Re-ingestion seeds the key set from the prior snapshot
//! so existing rows are never overwritten.

use crate::snapshot::{compute_ranks, SnapshotData};
use ahash::AHashSet;
use titlex_core::{Error, Result, Vector};
use tracing::debug;

/// One incoming corpus row before merge.
#[derive(Debug, Clone)]
pub struct IngestRow {
    pub keyword: String,
    pub embedding: Vec<f32>,
    pub score: f32,
    pub ad_units: f32,
    pub ad_conv: f32,
    pub dataset_id: String,
    pub source_format: String,
}

/// Accumulates ingest rows into a snapshot.
pub struct SnapshotBuilder {
    dim: usize,
    embeddings: Vec<f32>,
    keywords: Vec<String>,
    scores: Vec<f32>,
    ad_units: Vec<f32>,
    ad_conv: Vec<f32>,
    dataset_ids: Vec<String>,
    source_formats: Vec<String>,
    seen: AHashSet<(String, String)>,
    skipped: usize,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            embeddings: Vec::new(),
            keywords: Vec::new(),
            scores: Vec::new(),
            ad_units: Vec::new(),
            ad_conv: Vec::new(),
            dataset_ids: Vec::new(),
            source_formats: Vec::new(),
            seen: AHashSet::new(),
            skipped: 0,
        }
    }

    /// Seed merge keys (and rows) from a prior snapshot so re-ingestion
    /// keeps the first-written row for every existing key.
    pub fn seed_existing(&mut self, prior: &SnapshotData) -> Result<()> {
        if prior.dim != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: prior.dim,
            });
        }
        for row in 0..prior.len() {
            let key = (
                prior.dataset_ids[row].clone(),
                prior.keywords[row].to_lowercase(),
            );
            if !self.seen.insert(key) {
                continue;
            }
            let start = row * prior.dim;
            self.embeddings
                .extend_from_slice(&prior.embeddings[start..start + prior.dim]);
            self.keywords.push(prior.keywords[row].clone());
            self.scores.push(prior.scores[row]);
            self.ad_units.push(prior.ad_units[row]);
            self.ad_conv.push(prior.ad_conv[row]);
            self.dataset_ids.push(prior.dataset_ids[row].clone());
            self.source_formats.push(prior.source_formats[row].clone());
        }
        Ok(())
    }

    /// Append one row. Duplicate `(dataset_id, lowercased keyword)` keys are
    /// skipped, first-write-wins. The embedding is re-normalized here; this
    /// is the only write boundary, so it is where the unit-norm invariant
    /// the whole engine relies on gets established.
    pub fn append(&mut self, row: IngestRow) -> Result<bool> {
        if row.embedding.len() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: row.embedding.len(),
            });
        }
        let key = (row.dataset_id.clone(), row.keyword.to_lowercase());
        if !self.seen.insert(key) {
            self.skipped += 1;
            debug!(keyword = %row.keyword, dataset = %row.dataset_id, "duplicate key skipped");
            return Ok(false);
        }

        let normalized = Vector::new(row.embedding).normalized();
        self.embeddings.extend_from_slice(normalized.as_slice());
        self.keywords.push(row.keyword);
        self.scores.push(row.score);
        self.ad_units.push(row.ad_units);
        self.ad_conv.push(row.ad_conv);
        self.dataset_ids.push(row.dataset_id);
        self.source_formats.push(row.source_format);
        Ok(true)
    }

    /// Append a whole batch, returning how many rows were actually kept.
    pub fn append_batch<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = IngestRow>,
    {
        let mut kept = 0;
        for row in rows {
            if self.append(row)? {
                kept += 1;
            }
        }
        Ok(kept)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Rows dropped by the duplicate-key rule so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Stamp per-dataset ranks and emit the immutable snapshot.
    #[must_use]
    pub fn finish(self) -> SnapshotData {
        let ranks = compute_ranks(&self.scores, &self.dataset_ids);
        SnapshotData {
            dim: self.dim,
            embeddings: self.embeddings,
            keywords: self.keywords,
            scores: self.scores,
            ad_units: self.ad_units,
            ad_conv: self.ad_conv,
            dataset_ids: self.dataset_ids,
            source_formats: self.source_formats,
            ranks: Some(ranks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keyword: &str, dataset: &str, score: f32, embedding: Vec<f32>) -> IngestRow {
        IngestRow {
            keyword: keyword.to_string(),
            embedding,
            score,
            ad_units: 0.0,
            ad_conv: 0.0,
            dataset_id: dataset.to_string(),
            source_format: "csv".to_string(),
        }
    }

    #[test]
    fn test_append_normalizes_embeddings() {
        let mut builder = SnapshotBuilder::new(2);
        builder.append(row("kw", "ds", 1.0, vec![3.0, 4.0])).unwrap();
        let data = builder.finish();
        assert!((data.embeddings[0] - 0.6).abs() < 1e-6);
        assert!((data.embeddings[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_key_first_write_wins() {
        let mut builder = SnapshotBuilder::new(2);
        assert!(builder.append(row("Trash Bags", "ds", 10.0, vec![1.0, 0.0])).unwrap());
        // same keyword, different case: skipped
        assert!(!builder.append(row("trash bags", "ds", 99.0, vec![0.0, 1.0])).unwrap());
        assert_eq!(builder.skipped(), 1);

        let data = builder.finish();
        assert_eq!(data.len(), 1);
        assert_eq!(data.scores[0], 10.0);
        assert_eq!(data.keywords[0], "Trash Bags");
    }

    #[test]
    fn test_same_keyword_different_dataset_kept() {
        let mut builder = SnapshotBuilder::new(2);
        builder.append(row("kw", "ds1", 1.0, vec![1.0, 0.0])).unwrap();
        builder.append(row("kw", "ds2", 2.0, vec![0.0, 1.0])).unwrap();
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut builder = SnapshotBuilder::new(2);
        let err = builder.append(row("kw", "ds", 1.0, vec![1.0, 0.0, 0.0]));
        assert!(err.is_err());
    }

    #[test]
    fn test_seed_existing_blocks_overwrite() {
        let mut first = SnapshotBuilder::new(2);
        first.append(row("kw", "ds", 10.0, vec![1.0, 0.0])).unwrap();
        let prior = first.finish();

        let mut second = SnapshotBuilder::new(2);
        second.seed_existing(&prior).unwrap();
        // re-ingesting the same key is a no-op
        assert!(!second.append(row("KW", "ds", 99.0, vec![0.0, 1.0])).unwrap());
        assert!(second.append(row("new kw", "ds", 5.0, vec![0.0, 1.0])).unwrap());

        let merged = second.finish();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.scores[0], 10.0);
    }

    #[test]
    fn test_finish_stamps_ranks() {
        let mut builder = SnapshotBuilder::new(2);
        builder.append(row("low", "ds", 1.0, vec![1.0, 0.0])).unwrap();
        builder.append(row("high", "ds", 9.0, vec![0.0, 1.0])).unwrap();
        let data = builder.finish();
        assert_eq!(data.ranks, Some(vec![2, 1]));
    }
}
