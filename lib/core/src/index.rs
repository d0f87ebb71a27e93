use crate::{dot_product, Error, KeywordRecord, Result};
use ahash::AHashMap;

/// Immutable in-memory embedding index over the keyword corpus.
///
/// One unit-norm embedding per record, stored row-major in a single flat
/// matrix, with a `dataset_id -> rows` side table for provenance-scoped
/// scans. Built once from a snapshot and never mutated; every operation is
/// a pure read, so concurrent readers need no locking.
#[derive(Debug)]
pub struct KeywordIndex {
    dim: usize,
    embeddings: Vec<f32>,
    records: Vec<KeywordRecord>,
    dataset_rows: AHashMap<String, Vec<u32>>,
}

impl KeywordIndex {
    /// Build an index from parallel columns.
    ///
    /// `embeddings` is row-major, `records.len() * dim` floats. Rows must
    /// already be unit-norm (the ingestion boundary enforces this).
    pub fn new(dim: usize, embeddings: Vec<f32>, records: Vec<KeywordRecord>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }
        if embeddings.len() % dim != 0 {
            return Err(Error::RaggedMatrix {
                len: embeddings.len(),
                dim,
            });
        }
        let rows = embeddings.len() / dim;
        if rows != records.len() {
            return Err(Error::ColumnMismatch {
                column: "records",
                expected: rows,
                actual: records.len(),
            });
        }

        let mut dataset_rows: AHashMap<String, Vec<u32>> = AHashMap::new();
        for (row, record) in records.iter().enumerate() {
            dataset_rows
                .entry(record.dataset_id.clone())
                .or_default()
                .push(row as u32);
        }

        Ok(Self {
            dim,
            embeddings,
            records,
            dataset_rows,
        })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn record(&self, row: u32) -> &KeywordRecord {
        &self.records[row as usize]
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[KeywordRecord] {
        &self.records
    }

    #[inline]
    #[must_use]
    pub fn row_embedding(&self, row: u32) -> &[f32] {
        let start = row as usize * self.dim;
        &self.embeddings[start..start + self.dim]
    }

    /// Rows belonging to a dataset, or all rows when no filter is given.
    /// An unknown dataset id yields no rows.
    pub(crate) fn candidate_rows(&self, dataset_id: Option<&str>) -> Vec<u32> {
        match dataset_id {
            Some(id) => self.dataset_rows.get(id).cloned().unwrap_or_default(),
            None => (0..self.records.len() as u32).collect(),
        }
    }

    /// Dot product of the query against every candidate row.
    ///
    /// Rows are unit-norm, so each product is the cosine similarity with no
    /// per-row normalization cost: O(N*D) per query, nothing else.
    pub fn scan(&self, query: &[f32], dataset_id: Option<&str>) -> Vec<(u32, f32)> {
        if query.len() != self.dim {
            return Vec::new();
        }
        self.candidate_rows(dataset_id)
            .into_iter()
            .map(|row| (row, dot_product(query, self.row_embedding(row))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, score: f32, dataset: &str) -> KeywordRecord {
        KeywordRecord {
            keyword: keyword.to_string(),
            score,
            rank: 1,
            ad_units: 0.0,
            ad_conv: 0.0,
            dataset_id: dataset.to_string(),
            source_format: "csv".to_string(),
        }
    }

    fn small_index() -> KeywordIndex {
        // 2-d unit vectors
        let embeddings = vec![
            1.0, 0.0, // e1
            0.0, 1.0, // e2
            0.6, 0.8, // e3
        ];
        let records = vec![
            record("alpha", 10.0, "ds1"),
            record("beta", 20.0, "ds2"),
            record("gamma", 30.0, "ds1"),
        ];
        KeywordIndex::new(2, embeddings, records).unwrap()
    }

    #[test]
    fn test_new_validates_matrix_shape() {
        let err = KeywordIndex::new(3, vec![1.0, 0.0], vec![]).unwrap_err();
        assert!(matches!(err, Error::RaggedMatrix { .. }));

        let err = KeywordIndex::new(2, vec![1.0, 0.0], vec![]).unwrap_err();
        assert!(matches!(err, Error::ColumnMismatch { .. }));
    }

    #[test]
    fn test_scan_full_corpus() {
        let index = small_index();
        let sims = index.scan(&[1.0, 0.0], None);
        assert_eq!(sims.len(), 3);
        assert!((sims[0].1 - 1.0).abs() < 1e-6);
        assert!((sims[1].1 - 0.0).abs() < 1e-6);
        assert!((sims[2].1 - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_scan_dataset_filter() {
        let index = small_index();
        let sims = index.scan(&[1.0, 0.0], Some("ds1"));
        let rows: Vec<u32> = sims.iter().map(|(r, _)| *r).collect();
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn test_scan_unknown_dataset_is_empty() {
        let index = small_index();
        assert!(index.scan(&[1.0, 0.0], Some("nope")).is_empty());
    }

    #[test]
    fn test_scan_dimension_mismatch_is_empty() {
        let index = small_index();
        assert!(index.scan(&[1.0, 0.0, 0.0], None).is_empty());
    }
}
