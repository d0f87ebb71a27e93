use serde::{Deserialize, Serialize};

/// Closed enumeration of concept categories a title span can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptType {
    Brand,
    Product,
    Size,
    Color,
    Count,
    Dimension,
    Capacity,
    Material,
    Fragrance,
    Scent,
    QualityMarker,
    Feature,
    UseCase,
    Synonym,
    Separator,
    Compatibility,
    Position,
    TechSpec,
    Banned,
    Other,
}

/// Importance scores used to prioritize retention under length constraints.
pub mod values {
    pub const BRAND: i32 = 100;
    pub const COMPATIBILITY: i32 = 95;
    pub const PRODUCT: i32 = 90;
    pub const COUNT: i32 = 80;
    pub const SIZE: i32 = 75;
    pub const COLOR: i32 = 70;
    pub const POSITION: i32 = 65;
    pub const MATERIAL_FEATURE: i32 = 65;
    pub const MATERIAL: i32 = 60;
    pub const DIMENSION: i32 = 60;
    pub const CAPACITY: i32 = 60;
    pub const TECH_SPEC: i32 = 55;
    pub const FRAGRANCE: i32 = 40;
    pub const FEATURE: i32 = 35;
    pub const SYNONYM: i32 = 30;
    pub const SYNONYM_DUSTBIN_BONUS: i32 = 5;
    pub const USE_CASE: i32 = 25;
    pub const SCENT: i32 = 10;
    pub const OTHER: i32 = 10;
    pub const QUALITY_MARKER: i32 = 5;
    pub const SEPARATOR: i32 = 0;
    pub const BANNED: i32 = -50;
}

/// Ordinal importance band: Tier0 hard facts down to Tier3 discardable flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    #[inline]
    #[must_use]
    pub fn from_value(value: i32) -> Self {
        if value >= 90 {
            Tier::Tier0
        } else if value >= 65 {
            Tier::Tier1
        } else if value >= 30 {
            Tier::Tier2
        } else {
            Tier::Tier3
        }
    }
}

/// A typed, scored span of a parsed title.
///
/// Immutable value object once the parse's truth-lock pass has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptToken {
    /// The exact surface substring matched (post-normalization).
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ConceptType,
    /// True when the fact must survive verbatim in any downstream rewrite.
    pub locked: bool,
    pub value: i32,
    pub tier: Tier,
}

impl ConceptToken {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: ConceptType, locked: bool, value: i32) -> Self {
        Self {
            text: text.into(),
            kind,
            locked,
            value,
            tier: Tier::from_value(value),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.kind == ConceptType::Separator
    }
}

/// Externally supplied known-correct attributes.
///
/// Truth is the single source of lock correctness: a recognized token is
/// confirmed against these values during the truth-lock pass. Absent keys
/// simply disable the corresponding recognition rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruthFacts {
    pub brand: Option<String>,
    pub product: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub count: Option<String>,
    pub dimension: Option<String>,
    pub material: Option<String>,
    pub fragrance: Option<String>,
    pub compatibility: Option<String>,
    pub features: Vec<String>,
}

impl TruthFacts {
    #[must_use]
    pub fn with_brand(brand: impl Into<String>) -> Self {
        Self {
            brand: Some(brand.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(Tier::from_value(values::BRAND), Tier::Tier0);
        assert_eq!(Tier::from_value(values::PRODUCT), Tier::Tier0);
        assert_eq!(Tier::from_value(values::COUNT), Tier::Tier1);
        assert_eq!(Tier::from_value(values::POSITION), Tier::Tier1);
        assert_eq!(Tier::from_value(values::MATERIAL), Tier::Tier2);
        assert_eq!(Tier::from_value(values::SYNONYM), Tier::Tier2);
        assert_eq!(Tier::from_value(values::USE_CASE), Tier::Tier3);
        assert_eq!(Tier::from_value(values::BANNED), Tier::Tier3);
    }

    #[test]
    fn test_token_derives_tier() {
        let token = ConceptToken::new("Shalimar", ConceptType::Brand, true, values::BRAND);
        assert_eq!(token.tier, Tier::Tier0);
        assert!(token.locked);
    }

    #[test]
    fn test_truth_facts_partial_json() {
        let truth: TruthFacts =
            serde_json::from_str(r#"{"brand": "Shalimar", "size": "Medium"}"#).unwrap();
        assert_eq!(truth.brand.as_deref(), Some("Shalimar"));
        assert_eq!(truth.size.as_deref(), Some("Medium"));
        assert!(truth.color.is_none());
        assert!(truth.features.is_empty());
    }

    #[test]
    fn test_concept_type_serializes_screaming() {
        let json = serde_json::to_string(&ConceptType::QualityMarker).unwrap();
        assert_eq!(json, "\"QUALITY_MARKER\"");
    }
}
