//! # titlex Core
//!
//! Core library for the titlex keyword relevance engine.
//!
//! This crate provides the retrieval half of the SEO title pipeline:
//!
//! - [`Vector`] - Dense vector representation with unit-norm dot products
//! - [`KeywordRecord`] / [`KeywordMatch`] - Corpus rows and scored results
//! - [`KeywordIndex`] - Immutable in-memory embedding index with dataset scoping
//! - [`RelevanceEngine`] - Top-K, broad (threshold), and whole-corpus relevance queries
//! - [`Embedder`] - The seam to an external embedding model ([`HashEmbedder`] for tests)
//!
//! ## Example
//!
//! ```rust
//! use titlex_core::{Embedder, HashEmbedder, KeywordIndex, KeywordRecord, RelevanceEngine};
//!
//! let embedder = HashEmbedder::default();
//! let records = vec![KeywordRecord {
//!     keyword: "garbage bags".to_string(),
//!     score: 120.0,
//!     rank: 1,
//!     ad_units: 0.0,
//!     ad_conv: 0.0,
//!     dataset_id: "home".to_string(),
//!     source_format: "csv".to_string(),
//! }];
//! let embeddings = embedder.embed("garbage bags").into_inner();
//! let index = KeywordIndex::new(embedder.dim(), embeddings, records).unwrap();
//!
//! let engine = RelevanceEngine::new(Box::new(HashEmbedder::default()));
//! engine.load(index);
//! let results = engine.top_keywords("garbage bags medium", 10, None);
//! assert_eq!(results[0].keyword(), "garbage bags");
//! ```

pub mod embedder;
pub mod engine;
pub mod error;
pub mod index;
pub mod record;
pub mod vector;

pub use embedder::{Embedder, HashEmbedder, DEFAULT_HASH_DIM};
pub use engine::{merge_query_results, RelevanceEngine};
pub use error::{Error, Result};
pub use index::KeywordIndex;
pub use record::{KeywordMatch, KeywordRecord};
pub use vector::{dot_product, Vector};
