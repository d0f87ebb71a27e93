use serde::{Deserialize, Serialize};

/// One row of the keyword corpus.
///
/// Keyword text is case-preserved for display; matching and deduplication
/// are always case-insensitive on the lowercased text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordRecord {
    pub keyword: String,
    /// Search-volume proxy, non-negative.
    pub score: f32,
    /// 1 = highest score within its dataset.
    pub rank: u32,
    pub ad_units: f32,
    pub ad_conv: f32,
    /// Provenance tag partitioning the corpus by ingestion source.
    pub dataset_id: String,
    pub source_format: String,
}

/// A keyword record paired with its similarity to a query.
///
/// Serializes flat, so downstream consumers see
/// `{keyword, score, rank, ..., similarity}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordMatch {
    #[serde(flatten)]
    pub record: KeywordRecord,
    pub similarity: f32,
}

impl KeywordMatch {
    #[inline]
    #[must_use]
    pub fn new(record: KeywordRecord, similarity: f32) -> Self {
        Self { record, similarity }
    }

    #[inline]
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.record.keyword
    }

    #[inline]
    #[must_use]
    pub fn score(&self) -> f32 {
        self.record.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, score: f32) -> KeywordRecord {
        KeywordRecord {
            keyword: keyword.to_string(),
            score,
            rank: 1,
            ad_units: 0.0,
            ad_conv: 0.0,
            dataset_id: "ds1".to_string(),
            source_format: "csv".to_string(),
        }
    }

    #[test]
    fn test_match_serializes_flat() {
        let m = KeywordMatch::new(record("garbage bags", 120.0), 0.87);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["keyword"], "garbage bags");
        assert_eq!(json["score"], 120.0);
        assert!((json["similarity"].as_f64().unwrap() - 0.87).abs() < 1e-6);
        // Flattened: no nested "record" object
        assert!(json.get("record").is_none());
    }
}
