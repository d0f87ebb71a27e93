//! Layered concept extraction over product titles.
//!
//! The parse pipeline works over an explicit buffer of unclaimed spans:
//! each extraction rule claims the byte ranges it matches and emits
//! position-tagged tokens, so consumed spans are disjoint by construction
//! and later rules only ever see unclaimed text. Leftover spans fall
//! through to a single-segment classifier; nothing is dropped silently.

use crate::lexicon::Lexicon;
use crate::normalizer;
use crate::token::{values, ConceptToken, ConceptType, Tier, TruthFacts};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\)").expect("paren pattern"));

/// `|` and `/` split unconditionally; `-` only when whitespace-surrounded so
/// hyphenated idioms ("Leak-Proof") survive.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*|\s+-\s+|\s*/\s*").expect("separator pattern"));

static COMPAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[Ff]or|[Cc]ompatible\s+[Ww]ith)\s+([A-Z][A-Za-z0-9.&-]*(?:(?:\s*(?:&|,|and)\s*|\s+)[A-Z][A-Za-z0-9.&-]*)*)",
    )
    .expect("compatibility pattern")
});

static DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?\s*[xX\u{00D7}]\s*\d+").expect("dimension pattern"));

static CAPACITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:ml|kg|oz|l|g)\b").expect("capacity pattern")
});

static COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+\s*(?:bags?|pcs?|pieces?|rolls?|packs?|sets?|pairs?|units?)\b")
        .expect("count pattern")
});

/// Numeric electrical/physical spec codes (230V, 50Hz, 80gsm).
static NUMERIC_SPEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:v|w|hz|mah|rpm|gsm|amps?)\b").expect("spec pattern")
});

/// An unclaimed span of the working title.
#[derive(Debug, Clone)]
struct Piece {
    start: usize,
    text: String,
    segment: usize,
}

/// A position-tagged token awaiting the final ordering pass.
#[derive(Debug)]
struct Draft {
    start: usize,
    token: ConceptToken,
}

impl Draft {
    fn new(start: usize, token: ConceptToken) -> Self {
        Self { start, token }
    }
}

/// The mutable "remaining text" state of one parse call.
struct Buffer {
    pieces: Vec<Piece>,
}

impl Buffer {
    fn new(text: &str) -> Self {
        Self {
            pieces: vec![Piece {
                start: 0,
                text: text.to_string(),
                segment: 0,
            }],
        }
    }

    /// Claim `range` out of piece `idx`, splitting the remainder back into
    /// the buffer. Whitespace-only remainders are discarded. Returns the
    /// absolute start and the claimed text.
    fn claim(&mut self, idx: usize, range: Range<usize>) -> (usize, String) {
        let piece = self.pieces.remove(idx);
        let abs_start = piece.start + range.start;
        let claimed = piece.text[range.clone()].to_string();
        let left = &piece.text[..range.start];
        let right = &piece.text[range.end..];

        let mut insert_at = idx;
        if !left.trim().is_empty() {
            self.pieces.insert(
                insert_at,
                Piece {
                    start: piece.start,
                    text: left.to_string(),
                    segment: piece.segment,
                },
            );
            insert_at += 1;
        }
        if !right.trim().is_empty() {
            self.pieces.insert(
                insert_at,
                Piece {
                    start: piece.start + range.end,
                    text: right.to_string(),
                    segment: piece.segment,
                },
            );
        }
        (abs_start, claimed)
    }

    /// Claim every match of `re`, optionally restricted to one segment.
    fn claim_regex(&mut self, re: &Regex, segment: Option<usize>) -> Vec<(usize, String)> {
        let mut claims = Vec::new();
        let mut i = 0;
        while i < self.pieces.len() {
            if segment.is_some_and(|s| self.pieces[i].segment != s) {
                i += 1;
                continue;
            }
            let found = re.find(&self.pieces[i].text).map(|m| m.range());
            match found {
                Some(range) if !range.is_empty() => {
                    claims.push(self.claim(i, range));
                    // remainders land back at `i`; rescan them for more matches
                }
                _ => i += 1,
            }
        }
        claims
    }

    fn first_piece_of_segment(&self, segment: usize) -> Option<usize> {
        self.pieces.iter().position(|p| p.segment == segment)
    }
}

/// Case-insensitive whole-word search; boundaries are non-alphanumeric.
fn find_word_ci(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let h = haystack.as_bytes();
    let n = needle.trim().as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    for i in 0..=h.len() - n.len() {
        if h[i..i + n.len()].eq_ignore_ascii_case(n) {
            let before_ok = i == 0 || !h[i - 1].is_ascii_alphanumeric();
            let end = i + n.len();
            let after_ok = end == h.len() || !h[end].is_ascii_alphanumeric();
            if before_ok && after_ok {
                return Some(i..end);
            }
        }
    }
    None
}

fn contains_word_ci(haystack: &str, needle: &str) -> bool {
    find_word_ci(haystack, needle).is_some()
}

/// Wrap an escaped entry in `\b` anchors, but only on edges that are word
/// characters; `\b` inverts its meaning next to entries like "#1" or "100%".
fn boundary_wrap(word: &str) -> String {
    let escaped = regex::escape(word);
    let first_word = word.chars().next().is_some_and(|c| c.is_alphanumeric());
    let last_word = word.chars().last().is_some_and(|c| c.is_alphanumeric());
    format!(
        "{}{}{}",
        if first_word { r"\b" } else { "" },
        escaped,
        if last_word { r"\b" } else { "" },
    )
}

/// Build a case-insensitive whole-word alternation, longest entries first so
/// overlapping phrases resolve to the longest match. None when the list is
/// empty.
fn word_alternation(words: &[String]) -> Option<Regex> {
    let mut entries: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !w.trim().is_empty())
        .collect();
    if entries.is_empty() {
        return None;
    }
    entries.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let joined = entries
        .iter()
        .map(|w| boundary_wrap(w))
        .collect::<Vec<_>>()
        .join("|");
    Some(Regex::new(&format!(r"(?i)(?:{joined})")).expect("word alternation"))
}

/// Converts a raw title plus known truth facts into ordered, typed,
/// tier-ranked concept tokens. Pure and stateless beyond the injected
/// read-only [`Lexicon`]; safe to share across threads.
pub struct ConceptParser {
    lexicon: Lexicon,
    quality_re: Option<Regex>,
    scent_re: Option<Regex>,
    fragrance_word_re: Option<Regex>,
    fragrance_phrase_re: Option<Regex>,
    color_word_re: Option<Regex>,
    position_re: Option<Regex>,
    material_feature_re: Option<Regex>,
    material_re: Option<Regex>,
    tech_word_re: Option<Regex>,
    idiom_re: Option<Regex>,
    leading_size_re: Option<Regex>,
    banned_re: Option<Regex>,
    synonym_re: Option<Regex>,
    size_word_re: Option<Regex>,
    feature_indicator_re: Option<Regex>,
    place_re: Option<Regex>,
}

impl ConceptParser {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        let fragrance_phrase_re = if lexicon.fragrances.is_empty() {
            None
        } else {
            let joined = lexicon
                .fragrances
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"(?i)\b(?:{joined})\s+fragrance\b"))
                    .expect("fragrance phrase"),
            )
        };
        let leading_size_re = if lexicon.sizes.is_empty() {
            None
        } else {
            let joined = lexicon
                .sizes
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)^\s*({joined})\b")).expect("leading size"))
        };
        let material_feature_re =
            if lexicon.materials.is_empty() || lexicon.material_nouns.is_empty() {
                None
            } else {
                let materials = lexicon
                    .materials
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                let nouns = lexicon
                    .material_nouns
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                Some(
                    Regex::new(&format!(r"(?i)\b(?:{materials})\s+(?:{nouns})\b"))
                        .expect("material feature"),
                )
            };

        Self {
            quality_re: word_alternation(&lexicon.quality_markers),
            scent_re: word_alternation(&lexicon.scent_words),
            fragrance_word_re: word_alternation(&lexicon.fragrances),
            fragrance_phrase_re,
            color_word_re: word_alternation(&lexicon.colors),
            position_re: word_alternation(&lexicon.positions),
            material_feature_re,
            material_re: word_alternation(&lexicon.materials),
            tech_word_re: word_alternation(&lexicon.tech_spec_words),
            idiom_re: word_alternation(&lexicon.feature_idioms),
            leading_size_re,
            banned_re: word_alternation(&lexicon.banned),
            synonym_re: word_alternation(&lexicon.synonyms),
            size_word_re: word_alternation(&lexicon.sizes),
            feature_indicator_re: word_alternation(&lexicon.feature_indicators),
            place_re: word_alternation(&lexicon.use_case_places),
            lexicon,
        }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parse a title into ordered concept tokens. Never fails: malformed
    /// input degrades to OTHER tokens.
    #[must_use]
    pub fn parse_title(&self, title: &str, truth: &TruthFacts) -> Vec<ConceptToken> {
        let normalized = normalizer::normalize(title);
        if normalized.trim().is_empty() {
            return Vec::new();
        }

        let mut buf = Buffer::new(&normalized);
        let mut drafts: Vec<Draft> = Vec::new();

        self.extract_parentheticals(&mut buf, &mut drafts, truth);
        let segment_count = split_separators(&mut buf, &mut drafts);

        for segment in 0..segment_count {
            self.extract_quality_markers(&mut buf, &mut drafts, segment);
            self.extract_brand(&mut buf, &mut drafts, segment, truth);
            self.extract_leading_size(&mut buf, &mut drafts, segment);
            self.extract_scent_words(&mut buf, &mut drafts, segment);
            self.extract_fragrance_phrases(&mut buf, &mut drafts, segment);
            self.extract_positions(&mut buf, &mut drafts, segment);
            self.extract_materials(&mut buf, &mut drafts, segment);
            self.extract_tech_specs(&mut buf, &mut drafts, segment);
            self.extract_compatibility(&mut buf, &mut drafts, segment);
            self.extract_feature_idioms(&mut buf, &mut drafts, segment);
        }

        self.classify_leftovers(&mut buf, &mut drafts, truth);
        apply_truth_locks(&mut drafts, truth);

        drafts.sort_by_key(|d| d.start);
        drafts.into_iter().map(|d| d.token).collect()
    }

    /// Step 1: each `(...)` span is inspected before anything else. A span
    /// holding a fragrance word becomes one FRAGRANCE token, a color word
    /// one COLOR token; anything else is left for ordinary processing.
    fn extract_parentheticals(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, truth: &TruthFacts) {
        let mut i = 0;
        while i < buf.pieces.len() {
            let found = {
                let text = &buf.pieces[i].text;
                let mut accepted = None;
                for m in PAREN_RE.find_iter(text) {
                    let inner = m.as_str();
                    let inner = inner[1..inner.len() - 1].trim();
                    if inner.is_empty() {
                        continue;
                    }
                    if self.is_fragrance_content(inner, truth) {
                        accepted = Some((m.range(), inner.to_string(), ConceptType::Fragrance));
                        break;
                    }
                    if self.is_color_content(inner, truth) {
                        accepted = Some((m.range(), inner.to_string(), ConceptType::Color));
                        break;
                    }
                }
                accepted
            };
            match found {
                Some((range, inner, kind)) => {
                    let (start, _) = buf.claim(i, range);
                    let token = match kind {
                        ConceptType::Fragrance => {
                            ConceptToken::new(inner, kind, false, values::FRAGRANCE)
                        }
                        _ => ConceptToken::new(inner, ConceptType::Color, true, values::COLOR),
                    };
                    drafts.push(Draft::new(start, token));
                }
                None => i += 1,
            }
        }
    }

    fn is_fragrance_content(&self, inner: &str, truth: &TruthFacts) -> bool {
        if self
            .fragrance_word_re
            .as_ref()
            .is_some_and(|re| re.is_match(inner))
        {
            return true;
        }
        truth
            .fragrance
            .as_deref()
            .is_some_and(|f| contains_word_ci(inner, f))
    }

    fn is_color_content(&self, inner: &str, truth: &TruthFacts) -> bool {
        if self
            .color_word_re
            .as_ref()
            .is_some_and(|re| re.is_match(inner))
        {
            return true;
        }
        truth
            .color
            .as_deref()
            .is_some_and(|c| contains_word_ci(inner, c))
    }

    fn extract_quality_markers(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.quality_re.as_ref() else {
            return;
        };
        for (start, text) in buf.claim_regex(re, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::QualityMarker, false, values::QUALITY_MARKER),
            ));
        }
    }

    fn extract_brand(
        &self,
        buf: &mut Buffer,
        drafts: &mut Vec<Draft>,
        segment: usize,
        truth: &TruthFacts,
    ) {
        let Some(brand) = truth.brand.as_deref() else {
            return;
        };
        if brand.trim().is_empty() {
            return;
        }
        let mut i = 0;
        while i < buf.pieces.len() {
            if buf.pieces[i].segment != segment {
                i += 1;
                continue;
            }
            match find_word_ci(&buf.pieces[i].text, brand) {
                Some(range) => {
                    let (start, text) = buf.claim(i, range);
                    drafts.push(Draft::new(
                        start,
                        ConceptToken::new(text, ConceptType::Brand, true, values::BRAND),
                    ));
                }
                None => i += 1,
            }
        }
    }

    /// Step 3c: a size word at the head of the segment's remaining text.
    fn extract_leading_size(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.leading_size_re.as_ref() else {
            return;
        };
        let Some(idx) = buf.first_piece_of_segment(segment) else {
            return;
        };
        let range = re
            .captures(&buf.pieces[idx].text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.range());
        if let Some(range) = range {
            let (start, text) = buf.claim(idx, range);
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::Size, true, values::SIZE),
            ));
        }
    }

    fn extract_scent_words(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.scent_re.as_ref() else {
            return;
        };
        for (start, text) in buf.claim_regex(re, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::Scent, false, values::SCENT),
            ));
        }
    }

    fn extract_fragrance_phrases(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.fragrance_phrase_re.as_ref() else {
            return;
        };
        for (start, text) in buf.claim_regex(re, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::Fragrance, false, values::FRAGRANCE),
            ));
        }
    }

    fn extract_positions(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.position_re.as_ref() else {
            return;
        };
        for (start, text) in buf.claim_regex(re, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::Position, true, values::POSITION),
            ));
        }
    }

    /// Step 3g: a material followed by a descriptive noun stays together as
    /// a feature phrase ("Aluminum Handlebar"); a bare material is a spec.
    fn extract_materials(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        if let Some(re) = self.material_feature_re.as_ref() {
            for (start, text) in buf.claim_regex(re, Some(segment)) {
                drafts.push(Draft::new(
                    start,
                    ConceptToken::new(text, ConceptType::Feature, true, values::MATERIAL_FEATURE),
                ));
            }
        }
        if let Some(re) = self.material_re.as_ref() {
            for (start, text) in buf.claim_regex(re, Some(segment)) {
                drafts.push(Draft::new(
                    start,
                    ConceptToken::new(text, ConceptType::Material, true, values::MATERIAL),
                ));
            }
        }
    }

    fn extract_tech_specs(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        for (start, text) in buf.claim_regex(&NUMERIC_SPEC_RE, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::TechSpec, false, values::TECH_SPEC),
            ));
        }
        if let Some(re) = self.tech_word_re.as_ref() {
            for (start, text) in buf.claim_regex(re, Some(segment)) {
                drafts.push(Draft::new(
                    start,
                    ConceptToken::new(text, ConceptType::TechSpec, false, values::TECH_SPEC),
                ));
            }
        }
    }

    /// Step 3i: `for`/`compatible with` + capitalized target chain, unless
    /// the target is a position word or a stop-listed non-fitment noun.
    fn extract_compatibility(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let mut i = 0;
        while i < buf.pieces.len() {
            if buf.pieces[i].segment != segment {
                i += 1;
                continue;
            }
            let found = {
                let text = &buf.pieces[i].text;
                let mut accepted = None;
                for caps in COMPAT_RE.captures_iter(text) {
                    let target = caps.get(1).map_or("", |m| m.as_str());
                    let first = target.split_whitespace().next().unwrap_or("");
                    if self.lexicon.is_compatibility_stop(first) {
                        continue;
                    }
                    accepted = caps.get(0).map(|m| m.range());
                    break;
                }
                accepted
            };
            match found {
                Some(range) => {
                    let (start, text) = buf.claim(i, range);
                    drafts.push(Draft::new(
                        start,
                        ConceptToken::new(
                            text,
                            ConceptType::Compatibility,
                            true,
                            values::COMPATIBILITY,
                        ),
                    ));
                }
                None => i += 1,
            }
        }
    }

    /// Step 3j: idioms are searched anywhere in the remaining buffer so 2-3
    /// independent features can be recovered from one dense phrase.
    fn extract_feature_idioms(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, segment: usize) {
        let Some(re) = self.idiom_re.as_ref() else {
            return;
        };
        for (start, text) in buf.claim_regex(re, Some(segment)) {
            drafts.push(Draft::new(
                start,
                ConceptToken::new(text, ConceptType::Feature, false, values::FEATURE),
            ));
        }
    }

    /// Step 3k: leftover spans. Connectors and bare punctuation become
    /// SEPARATOR tokens; everything else goes through the fallback
    /// classifier. No span is ever dropped.
    fn classify_leftovers(&self, buf: &mut Buffer, drafts: &mut Vec<Draft>, truth: &TruthFacts) {
        for piece in buf.pieces.drain(..) {
            let trimmed = piece.text.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = piece.start + (piece.text.len() - piece.text.trim_start().len());

            let token = if !trimmed.bytes().any(|b| b.is_ascii_alphanumeric())
                || self.lexicon.is_connector(trimmed)
            {
                ConceptToken::new(trimmed, ConceptType::Separator, false, values::SEPARATOR)
            } else {
                self.fallback_classify(trimmed, truth)
            };
            drafts.push(Draft::new(start, token));
        }
    }

    /// Single-segment classification for leftover text, strict priority
    /// order, first match wins.
    fn fallback_classify(&self, text: &str, truth: &TruthFacts) -> ConceptToken {
        if self.banned_re.as_ref().is_some_and(|re| re.is_match(text)) {
            return ConceptToken::new(text, ConceptType::Banned, false, values::BANNED);
        }
        if truth
            .brand
            .as_deref()
            .is_some_and(|b| contains_word_ci(text, b))
        {
            return ConceptToken::new(text, ConceptType::Brand, true, values::BRAND);
        }
        if DIMENSION_RE.is_match(text) {
            return ConceptToken::new(text, ConceptType::Dimension, false, values::DIMENSION);
        }
        if CAPACITY_RE.is_match(text) {
            return ConceptToken::new(text, ConceptType::Capacity, false, values::CAPACITY);
        }
        if COUNT_RE.is_match(text) {
            return ConceptToken::new(text, ConceptType::Count, true, values::COUNT);
        }
        if self
            .size_word_re
            .as_ref()
            .is_some_and(|re| re.is_match(text))
        {
            return ConceptToken::new(text, ConceptType::Size, true, values::SIZE);
        }
        if self.synonym_re.as_ref().is_some_and(|re| re.is_match(text)) {
            let mut value = values::SYNONYM;
            if contains_word_ci(text, "dustbin") {
                value += values::SYNONYM_DUSTBIN_BONUS;
            }
            return ConceptToken::new(text, ConceptType::Synonym, false, value);
        }
        if let Some(product) = truth.product.as_deref() {
            let overlaps = product
                .split_whitespace()
                .filter(|word| word.len() > 3)
                .any(|word| contains_word_ci(text, word));
            if overlaps {
                return ConceptToken::new(text, ConceptType::Product, false, values::PRODUCT);
            }
        }
        let lowered = text.to_lowercase();
        if lowered.starts_with("for ")
            || self.place_re.as_ref().is_some_and(|re| re.is_match(text))
        {
            return ConceptToken::new(text, ConceptType::UseCase, false, values::USE_CASE);
        }
        if self
            .feature_indicator_re
            .as_ref()
            .is_some_and(|re| re.is_match(text))
        {
            return ConceptToken::new(text, ConceptType::Feature, false, values::FEATURE);
        }
        ConceptToken::new(text, ConceptType::Other, false, values::OTHER)
    }
}

/// Step 2: split on separators, assign segment ids to surviving pieces.
/// Returns the number of segments.
fn split_separators(buf: &mut Buffer, drafts: &mut Vec<Draft>) -> usize {
    let claims = buf.claim_regex(&SEPARATOR_RE, None);
    let mut separator_starts: Vec<usize> = Vec::with_capacity(claims.len());
    for (start, text) in claims {
        separator_starts.push(start);
        drafts.push(Draft::new(
            start,
            ConceptToken::new(
                text.trim(),
                ConceptType::Separator,
                false,
                values::SEPARATOR,
            ),
        ));
    }
    separator_starts.sort_unstable();
    for piece in &mut buf.pieces {
        piece.segment = separator_starts.partition_point(|&s| s < piece.start);
    }
    separator_starts.len() + 1
}

/// Step 4: truth retroactively confirms heuristic BRAND/SIZE/COLOR tokens,
/// forcing the lock and the hard-fact tier.
fn apply_truth_locks(drafts: &mut [Draft], truth: &TruthFacts) {
    for draft in drafts.iter_mut() {
        let token = &mut draft.token;
        let confirmed = match token.kind {
            ConceptType::Brand => truth.brand.as_deref(),
            ConceptType::Size => truth.size.as_deref(),
            ConceptType::Color => truth.color.as_deref(),
            _ => None,
        };
        let Some(value) = confirmed else {
            continue;
        };
        if token.text.trim().eq_ignore_ascii_case(value.trim()) {
            token.locked = true;
            token.tier = if token.kind == ConceptType::Brand {
                Tier::Tier0
            } else {
                Tier::Tier1
            };
        }
    }
}
