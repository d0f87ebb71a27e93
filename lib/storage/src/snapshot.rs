// Snapshot support for the keyword corpus
use anyhow::{anyhow, Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use titlex_core::KeywordIndex;
use tracing::info;

/// On-disk corpus snapshot: one flat table of parallel columns keyed by row
/// index. `ranks` is optional and computed on load when absent.
///
/// A snapshot is immutable once written; re-ingestion produces a brand-new
/// file which replaces the old one atomically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotData {
    pub dim: usize,
    /// Row-major, `keywords.len() * dim` floats, unit-norm rows.
    pub embeddings: Vec<f32>,
    pub keywords: Vec<String>,
    pub scores: Vec<f32>,
    pub ad_units: Vec<f32>,
    pub ad_conv: Vec<f32>,
    pub dataset_ids: Vec<String>,
    pub source_formats: Vec<String>,
    pub ranks: Option<Vec<u32>>,
}

impl SnapshotData {
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    fn check_columns(&self) -> Result<()> {
        let rows = self.keywords.len();
        if self.dim == 0 {
            return Err(anyhow!("snapshot has zero embedding dimension"));
        }
        if self.embeddings.len() != rows * self.dim {
            return Err(anyhow!(
                "embedding matrix has {} floats, expected {} ({} rows x dim {})",
                self.embeddings.len(),
                rows * self.dim,
                rows,
                self.dim
            ));
        }
        for (name, len) in [
            ("scores", self.scores.len()),
            ("ad_units", self.ad_units.len()),
            ("ad_conv", self.ad_conv.len()),
            ("dataset_ids", self.dataset_ids.len()),
            ("source_formats", self.source_formats.len()),
        ] {
            if len != rows {
                return Err(anyhow!(
                    "column {name} has {len} rows, expected {rows}"
                ));
            }
        }
        if let Some(ranks) = &self.ranks {
            if ranks.len() != rows {
                return Err(anyhow!(
                    "column ranks has {} rows, expected {rows}",
                    ranks.len()
                ));
            }
        }
        Ok(())
    }
}

/// Descending-score 1-based ranks, computed per dataset. Ties keep row order.
pub fn compute_ranks(scores: &[f32], dataset_ids: &[String]) -> Vec<u32> {
    let mut by_dataset: ahash::AHashMap<&str, Vec<usize>> = ahash::AHashMap::new();
    for (row, dataset) in dataset_ids.iter().enumerate() {
        by_dataset.entry(dataset.as_str()).or_default().push(row);
    }

    let mut ranks = vec![0u32; scores.len()];
    for rows in by_dataset.into_values() {
        let mut ordered = rows;
        ordered.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        for (position, row) in ordered.into_iter().enumerate() {
            ranks[row] = position as u32 + 1;
        }
    }
    ranks
}

/// Write a snapshot through an atomic rename so readers never observe a
/// partially-written file.
pub fn save_snapshot<P: AsRef<Path>>(path: P, data: &SnapshotData) -> Result<()> {
    data.check_columns()?;
    let bytes = bincode::serialize(data).context("serializing snapshot")?;
    let file = AtomicFile::new(path.as_ref(), AllowOverwrite);
    file.write(|f| f.write_all(&bytes))
        .with_context(|| format!("writing snapshot to {:?}", path.as_ref()))?;
    info!(rows = data.len(), path = ?path.as_ref(), "snapshot written");
    Ok(())
}

/// Load a snapshot, validating column lengths and filling in ranks when the
/// producing side did not store them.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SnapshotData> {
    let bytes = std::fs::read(path.as_ref())
        .with_context(|| format!("reading snapshot from {:?}", path.as_ref()))?;
    let mut data: SnapshotData =
        bincode::deserialize(&bytes).context("deserializing snapshot")?;
    data.check_columns()?;
    if data.ranks.is_none() {
        data.ranks = Some(compute_ranks(&data.scores, &data.dataset_ids));
    }
    info!(rows = data.len(), path = ?path.as_ref(), "snapshot loaded");
    Ok(data)
}

/// Load a snapshot and build the read-only in-memory index from it.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<KeywordIndex> {
    let data = load_snapshot(path)?;
    build_index(data)
}

/// Turn snapshot columns into a [`KeywordIndex`].
pub fn build_index(mut data: SnapshotData) -> Result<KeywordIndex> {
    let rows = data.keywords.len();
    if !data.ranks.as_ref().is_some_and(|r| r.len() == rows) {
        data.ranks = Some(compute_ranks(&data.scores, &data.dataset_ids));
    }
    let ranks = data.ranks.unwrap_or_default();
    let records = data
        .keywords
        .into_iter()
        .enumerate()
        .map(|(row, keyword)| titlex_core::KeywordRecord {
            keyword,
            score: data.scores[row],
            rank: ranks[row],
            ad_units: data.ad_units[row],
            ad_conv: data.ad_conv[row],
            dataset_id: data.dataset_ids[row].clone(),
            source_format: data.source_formats[row].clone(),
        })
        .collect();
    KeywordIndex::new(data.dim, data.embeddings, records).context("building keyword index")
}
