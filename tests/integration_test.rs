// Integration tests for titlex
use titlex_core::{Embedder, HashEmbedder, KeywordMatch, RelevanceEngine};
use titlex_parse::{normalize, ConceptParser, ConceptType, Lexicon, TruthFacts};
use titlex_storage::{build_index, load_index, save_snapshot, IngestRow, SnapshotBuilder};

fn ingest_row(embedder: &HashEmbedder, keyword: &str, score: f32, dataset: &str) -> IngestRow {
    IngestRow {
        keyword: keyword.to_string(),
        embedding: embedder.embed(keyword).into_inner(),
        score,
        ad_units: score / 10.0,
        ad_conv: 0.0,
        dataset_id: dataset.to_string(),
        source_format: "csv".to_string(),
    }
}

fn build_engine(keywords: &[(&str, f32, &str)]) -> RelevanceEngine {
    let embedder = HashEmbedder::default();
    let mut builder = SnapshotBuilder::new(embedder.dim());
    for &(keyword, score, dataset) in keywords {
        builder
            .append(ingest_row(&embedder, keyword, score, dataset))
            .unwrap();
    }
    let index = build_index(builder.finish()).unwrap();
    let engine = RelevanceEngine::new(Box::new(HashEmbedder::default()));
    engine.load(index);
    engine
}

#[test]
fn test_ingest_save_load_query_end_to_end() {
    let embedder = HashEmbedder::default();
    let mut builder = SnapshotBuilder::new(embedder.dim());
    for (keyword, score) in [
        ("garbage bags", 120.0),
        ("trash bags medium", 80.0),
        ("dustbin liner", 60.0),
        ("yoga mat", 200.0),
    ] {
        builder
            .append(ingest_row(&embedder, keyword, score, "home"))
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.snapshot");
    save_snapshot(&path, &builder.finish()).unwrap();

    let index = load_index(&path).unwrap();
    assert_eq!(index.len(), 4);

    let engine = RelevanceEngine::new(Box::new(HashEmbedder::default()));
    engine.load(index);

    let results = engine.top_keywords("medium garbage bags", 3, None);
    assert!(!results.is_empty());
    assert!(results
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
    // the lexically distant keyword should not outrank the close ones
    assert_ne!(results[0].keyword(), "yoga mat");
}

#[test]
fn test_case_folded_corpus_dedups_to_one() {
    let engine = build_engine(&[
        ("dumbbells set", 10.0, "fitness"),
        ("Dumbbells Set", 20.0, "fitness-alt"),
        ("DUMBBELLS SET", 30.0, "fitness-b"),
    ]);
    let results = engine.top_keywords("dumbbells set", 10, None);
    assert_eq!(results.len(), 1);
}

#[test]
fn test_broad_search_is_superset_of_top_k() {
    let engine = build_engine(&[
        ("garbage bags", 10.0, "home"),
        ("garbage bag roll", 20.0, "home"),
        ("trash bags", 30.0, "home"),
        ("kitchen dustbin", 40.0, "home"),
        ("office chair", 50.0, "furniture"),
    ]);

    let top = engine.top_keywords("garbage bags", 3, None);
    assert!(!top.is_empty());
    let floor = top.iter().map(|m| m.similarity).fold(f32::INFINITY, f32::min);

    let broad = engine.search_broad("garbage bags", floor, None);
    let broad_keywords: Vec<String> =
        broad.iter().map(|m| m.keyword().to_lowercase()).collect();
    for m in &top {
        assert!(
            broad_keywords.contains(&m.keyword().to_lowercase()),
            "top-k result {:?} missing from broad search",
            m.keyword()
        );
    }
}

#[test]
fn test_product_relevance_scores_whole_corpus() {
    let engine = build_engine(&[
        ("garbage bags", 10.0, "home"),
        ("trash bags", 20.0, "home"),
        ("office chair", 30.0, "furniture"),
    ]);
    let scores = engine.compute_product_relevance("black garbage bags for kitchen", None);
    assert_eq!(scores.len(), 3);

    let filtered = engine.compute_product_relevance("black garbage bags", Some("home"));
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_multi_query_merge_prefers_score() {
    let engine = build_engine(&[
        ("garbage bags", 10.0, "home"),
        ("premium garbage bags", 500.0, "home"),
    ]);
    let per_query: Vec<Vec<KeywordMatch>> = vec![
        engine.top_keywords("garbage bags", 5, None),
        engine.top_keywords("premium bags", 5, None),
    ];
    let merged = titlex_core::merge_query_results(per_query);
    // each keyword appears once, and the list is score-sorted
    assert_eq!(merged.len(), 2);
    assert!(merged[0].score() >= merged[1].score());
}

#[test]
fn test_parse_then_query_pipeline() {
    // concepts feed query construction externally; exercise the seam
    let parser = ConceptParser::new(Lexicon::default());
    let truth = TruthFacts {
        brand: Some("Shalimar".to_string()),
        product: Some("Garbage Bags".to_string()),
        size: Some("Medium".to_string()),
        color: Some("Black".to_string()),
        ..TruthFacts::default()
    };
    let tokens = parser.parse_title(
        "Shalimar Premium (Lavender Fragrance) Scented Garbage Bags | Medium 19 X 21 Inches",
        &truth,
    );

    let product = tokens
        .iter()
        .find(|t| t.kind == ConceptType::Product)
        .expect("product concept");

    let engine = build_engine(&[
        ("garbage bags", 120.0, "home"),
        ("office chair", 90.0, "furniture"),
    ]);
    let results = engine.top_keywords(&product.text, 5, None);
    assert_eq!(results[0].keyword(), "garbage bags");
}

#[test]
fn test_locked_facts_survive_the_full_scenario() {
    let parser = ConceptParser::new(Lexicon::default());
    let truth = TruthFacts {
        brand: Some("Shalimar".to_string()),
        product: Some("Garbage Bags".to_string()),
        size: Some("Medium".to_string()),
        color: Some("Black".to_string()),
        ..TruthFacts::default()
    };
    let title = "Shalimar Premium (Lavender Fragrance) Scented Garbage Bags | \
         Medium 19 X 21 Inches | 120 Bags (30 Bags X 4 Rolls) | Dustbin Bag/Trash Bag | \
         (Black) - Perforated Box for Easy Dispensing";
    let tokens = parser.parse_title(title, &truth);

    let locked_texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.locked)
        .map(|t| t.text.as_str())
        .collect();
    for fact in ["Shalimar", "Medium", "Black"] {
        assert!(locked_texts.contains(&fact), "{fact:?} not locked");
    }
}

#[test]
fn test_normalize_scenario() {
    let normalized = normalize("19 X 21 Inches");
    assert!(normalized.contains("19x21"));
    assert!(normalized.contains("Inches"));
}

#[test]
fn test_dataset_scoping_through_the_stack() {
    let engine = build_engine(&[
        ("garbage bags", 10.0, "home"),
        ("garbage bags xl", 20.0, "industrial"),
    ]);
    let home = engine.top_keywords("garbage bags", 10, Some("home"));
    assert_eq!(home.len(), 1);
    assert_eq!(home[0].record.dataset_id, "home");

    let nowhere = engine.top_keywords("garbage bags", 10, Some("garden"));
    assert!(nowhere.is_empty());
}

#[test]
fn test_high_volume_projection() {
    let engine = build_engine(&[
        ("a", 10.0, "ds"),  // ad_units 1.0
        ("b", 400.0, "ds"), // ad_units 40.0
        ("c", 90.0, "ds"),  // ad_units 9.0
    ]);
    let high = engine.high_volume_keywords(5.0);
    let names: Vec<&str> = high.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    let all = engine.all_keywords();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].keyword, "b");
}
