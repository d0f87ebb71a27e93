//! # titlex
//!
//! SEO title core: concept parsing plus embedding-based keyword relevance
//! for e-commerce product titles.
//!
//! titlex is two independent, pure libraries composed by whatever
//! orchestration layer sits above them (LLM-driven or not):
//!
//! - the **concept parser** decomposes a free-text title into typed,
//!   tier-ranked concept tokens, locking the facts confirmed by externally
//!   supplied truth data;
//! - the **relevance engine** ranks a keyword corpus against text queries
//!   by cosine similarity over unit-norm embeddings, with top-K, broad
//!   (threshold), and whole-corpus scoring modes.
//!
//! The two never call each other: concepts feed query construction
//! externally, and candidate keywords come back for downstream composition.
//!
//! ## Quick Start
//!
//! ```rust
//! use titlex::prelude::*;
//!
//! // Parse a title against known-correct facts
//! let parser = ConceptParser::new(Lexicon::default());
//! let truth = TruthFacts::with_brand("Shalimar");
//! let tokens = parser.parse_title("Shalimar Premium Garbage Bags", &truth);
//! assert!(tokens.iter().any(|t| t.kind == ConceptType::Brand && t.locked));
//!
//! // Rank keywords against a query
//! let embedder = HashEmbedder::default();
//! let mut builder = SnapshotBuilder::new(embedder.dim());
//! builder.append(IngestRow {
//!     keyword: "garbage bags".to_string(),
//!     embedding: embedder.embed("garbage bags").into_inner(),
//!     score: 120.0,
//!     ad_units: 0.0,
//!     ad_conv: 0.0,
//!     dataset_id: "home".to_string(),
//!     source_format: "csv".to_string(),
//! }).unwrap();
//! let index = build_index(builder.finish()).unwrap();
//!
//! let engine = RelevanceEngine::new(Box::new(HashEmbedder::default()));
//! engine.load(index);
//! let results = engine.top_keywords("medium garbage bags", 10, None);
//! assert_eq!(results[0].keyword(), "garbage bags");
//! ```
//!
//! ## Crate Structure
//!
//! - [`titlex-core`](https://docs.rs/titlex-core) - vectors, embedding index, relevance engine
//! - [`titlex-parse`](https://docs.rs/titlex-parse) - normalizer, lexicon, concept parser
//! - [`titlex-storage`](https://docs.rs/titlex-storage) - corpus snapshots and ingestion merge

// Re-export core types
pub use titlex_core::{
    dot_product, merge_query_results, Embedder, Error, HashEmbedder, KeywordIndex, KeywordMatch,
    KeywordRecord, RelevanceEngine, Result, Vector,
};

// Re-export the parser
pub use titlex_parse::{
    are_same_concept, normalize, normalize_plural, ConceptParser, ConceptToken, ConceptType,
    Lexicon, Tier, TruthFacts,
};

// Re-export storage
pub use titlex_storage::{
    build_index, load_index, load_snapshot, save_snapshot, IngestRow, SnapshotBuilder,
    SnapshotData,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_index, load_index, load_snapshot, merge_query_results, normalize, save_snapshot,
        ConceptParser, ConceptToken, ConceptType, Embedder, HashEmbedder, IngestRow,
        KeywordIndex, KeywordMatch, KeywordRecord, Lexicon, RelevanceEngine, SnapshotBuilder,
        SnapshotData, Tier, TruthFacts, Vector,
    };
}
