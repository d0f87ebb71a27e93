//! # titlex Storage
//!
//! Persistence layer for the titlex keyword corpus.
//!
//! The corpus lives on disk as a single immutable snapshot of parallel
//! columns. Writes happen only during offline ingestion: a
//! [`SnapshotBuilder`] merges batches (first-write-wins per
//! `(dataset_id, keyword)` key), and [`save_snapshot`] swaps the file
//! atomically so a reader never observes a partially-written snapshot.
//! [`load_index`] turns a snapshot into the read-only
//! [`titlex_core::KeywordIndex`] consumed by the relevance engine.

pub mod ingest;
pub mod snapshot;

pub use ingest::{IngestRow, SnapshotBuilder};
pub use snapshot::{
    build_index, compute_ranks, load_index, load_snapshot, save_snapshot, SnapshotData,
};
