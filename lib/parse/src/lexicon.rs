//! Curated vocabularies consumed by the concept parser.
//!
//! All lists are configuration, not logic: [`Lexicon::default`] ships seeds
//! tuned for household/consumables catalogs, and callers extend or replace
//! any list for their own catalog before constructing the parser. Matching
//! is always case-insensitive; entries are stored lowercased.

/// Garment-style size words.
static SIZES: &[&str] = &[
    "small", "medium", "large", "extra large", "x-large", "xs", "xl", "xxl", "mini",
    "compact", "standard", "regular", "jumbo", "giant", "king", "queen",
];

static COLORS: &[&str] = &[
    "black", "white", "red", "blue", "green", "yellow", "gray", "grey", "brown", "pink",
    "purple", "orange", "silver", "gold", "beige", "ivory", "maroon", "navy", "teal",
    "turquoise", "violet", "transparent", "clear", "multicolor", "assorted",
];

/// Longer entries first so multi-word materials win over their suffix words.
static MATERIALS: &[&str] = &[
    "stainless steel", "carbon steel", "mild steel", "steel", "aluminum", "plastic",
    "wooden", "wood", "bamboo", "glass", "silicone", "rubber", "leather", "cotton",
    "polyester", "nylon", "metal", "ceramic", "copper", "brass", "fabric", "paper",
    "jute", "canvas", "acrylic", "melamine",
];

/// Policy-violating promotional terms.
static BANNED: &[&str] = &[
    "best", "no. 1", "no.1", "#1", "cheapest", "lowest price", "free", "sale",
    "discount", "offer", "guarantee", "guaranteed", "100%",
];

static QUALITY_MARKERS: &[&str] = &[
    "premium", "deluxe", "luxury", "luxurious", "superior", "classic", "exclusive",
    "elite", "supreme", "finest",
];

static FRAGRANCES: &[&str] = &[
    "lavender", "rose", "jasmine", "lemon", "citrus", "sandalwood", "vanilla", "ocean",
    "musk", "mint", "eucalyptus", "mogra", "lily", "floral", "aqua", "fresh",
];

static SCENT_WORDS: &[&str] = &["scented", "perfumed", "fragranced"];

static POSITIONS: &[&str] = &[
    "front", "rear", "back", "left", "right", "top", "bottom", "upper", "lower", "side",
];

/// Regulatory / certification codes. Numeric electrical specs (230V, 50Hz)
/// are matched by pattern instead.
static TECH_SPEC_WORDS: &[&str] = &["ce", "rohs", "isi", "bis", "fcc", "ul", "astm", "en71"];

/// Descriptive nouns that turn a bare material into a feature phrase.
static MATERIAL_NOUNS: &[&str] = &[
    "bucket", "bin", "lid", "handle", "handlebar", "frame", "body", "rack", "shelf",
    "container", "bottle", "jar", "tray", "stand", "holder", "grip",
];

/// Multi-word feature idioms, longer entries first so overlapping phrases
/// resolve to the longest match.
static FEATURE_IDIOMS: &[&str] = &[
    "oxo-biodegradable", "easy dispensing", "perforated box", "leak-proof", "leak proof",
    "heavy-duty", "heavy duty", "odor control", "tie string", "anti-rust", "rust-proof",
    "non-slip", "anti-skid", "water-resistant", "waterproof", "eco-friendly",
    "biodegradable", "compostable", "space-saving", "foldable", "stackable", "reusable",
    "disposable", "multi-purpose", "easy to clean",
];

/// Single words that suggest a feature claim in leftover text.
static FEATURE_INDICATORS: &[&str] = &[
    "durable", "sturdy", "strong", "portable", "lightweight", "washable", "resistant",
    "adjustable", "ergonomic", "unbreakable",
];

/// Capitalized words after "for"/"compatible with" that are NOT compatibility
/// targets ("for Easy Dispensing" is a feature clause, not a parts fitment).
static COMPATIBILITY_STOP: &[&str] = &[
    "easy", "dispensing", "kitchen", "home", "office", "storage", "cleaning", "daily",
    "regular", "multi", "use", "gift", "gifting",
];

/// The dustbin/trash/waste/bin-bag synonym family.
static SYNONYMS: &[&str] = &[
    "dustbin", "dust bin", "dustbin bag", "dustbin bags", "trash", "trash bag",
    "trash bags", "waste", "waste bag", "waste bags", "bin bag", "bin bags",
    "bin liner", "bin liners", "garbage bin",
];

static USE_CASE_PLACES: &[&str] = &[
    "kitchen", "bathroom", "car", "office", "home", "bedroom", "garden", "garage",
    "outdoor", "indoor", "travel",
];

/// Bare connector words that carry no concept on their own.
static CONNECTORS: &[&str] = &["for", "with", "and", "or"];

/// Immutable word-list configuration injected into the parser.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub banned: Vec<String>,
    pub quality_markers: Vec<String>,
    pub fragrances: Vec<String>,
    pub scent_words: Vec<String>,
    pub positions: Vec<String>,
    pub tech_spec_words: Vec<String>,
    pub material_nouns: Vec<String>,
    pub feature_idioms: Vec<String>,
    pub feature_indicators: Vec<String>,
    pub compatibility_stop: Vec<String>,
    pub synonyms: Vec<String>,
    pub use_case_places: Vec<String>,
    pub connectors: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            sizes: owned(SIZES),
            colors: owned(COLORS),
            materials: owned(MATERIALS),
            banned: owned(BANNED),
            quality_markers: owned(QUALITY_MARKERS),
            fragrances: owned(FRAGRANCES),
            scent_words: owned(SCENT_WORDS),
            positions: owned(POSITIONS),
            tech_spec_words: owned(TECH_SPEC_WORDS),
            material_nouns: owned(MATERIAL_NOUNS),
            feature_idioms: owned(FEATURE_IDIOMS),
            feature_indicators: owned(FEATURE_INDICATORS),
            compatibility_stop: owned(COMPATIBILITY_STOP),
            synonyms: owned(SYNONYMS),
            use_case_places: owned(USE_CASE_PLACES),
            connectors: owned(CONNECTORS),
        }
    }
}

impl Lexicon {
    /// Case-insensitive membership test against one list.
    #[must_use]
    pub fn is_listed(list: &[String], word: &str) -> bool {
        let lowered = word.to_lowercase();
        list.iter().any(|entry| entry == &lowered)
    }

    #[must_use]
    pub fn is_connector(&self, word: &str) -> bool {
        Self::is_listed(&self.connectors, word)
    }

    #[must_use]
    pub fn is_size(&self, word: &str) -> bool {
        Self::is_listed(&self.sizes, word)
    }

    #[must_use]
    pub fn is_compatibility_stop(&self, word: &str) -> bool {
        Self::is_listed(&self.compatibility_stop, word)
            || Self::is_listed(&self.positions, word)
    }
}
