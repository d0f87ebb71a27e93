//! # titlex Parse
//!
//! The concept-parsing half of the titlex SEO title pipeline.
//!
//! This crate decomposes free-text product titles into typed, ranked,
//! lockable concept tokens:
//!
//! - [`normalizer`] - spelling/unit/dimension canonicalization
//! - [`Lexicon`] - injected word-list configuration
//! - [`ConceptToken`] / [`TruthFacts`] - the token model
//! - [`ConceptParser`] - layered extraction with conflict resolution
//!
//! ## Example
//!
//! ```rust
//! use titlex_parse::{ConceptParser, ConceptType, Lexicon, TruthFacts};
//!
//! let parser = ConceptParser::new(Lexicon::default());
//! let truth = TruthFacts::with_brand("Shalimar");
//! let tokens = parser.parse_title("Shalimar Premium Garbage Bags", &truth);
//!
//! let brand = tokens.iter().find(|t| t.kind == ConceptType::Brand).unwrap();
//! assert_eq!(brand.text, "Shalimar");
//! assert!(brand.locked);
//! ```
//!
//! The parser is a pure function of `(title, truth)`: it never fails,
//! never drops content silently, and is safe to share across threads.

pub mod lexicon;
pub mod normalizer;
pub mod parser;
pub mod token;

pub use lexicon::Lexicon;
pub use normalizer::{are_same_concept, normalize, normalize_plural};
pub use parser::ConceptParser;
pub use token::{values, ConceptToken, ConceptType, Tier, TruthFacts};
