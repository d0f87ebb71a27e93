//! Spelling, unit, and dimension canonicalization for stable matching.
//!
//! [`normalize`] is a pure function of its input: three fixed passes
//! (UK->US spelling, unit suffixes, dimension collapse) followed by a
//! whitespace collapse. It never fails; unmatched input passes through
//! unchanged, and the whole pipeline is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

/// UK -> US spelling substitutions, applied whole-word and case-insensitively.
static UK_US_SPELLINGS: &[(&str, &str)] = &[
    ("colour", "color"),
    ("colours", "colors"),
    ("flavour", "flavor"),
    ("flavours", "flavors"),
    ("litre", "liter"),
    ("litres", "liters"),
    ("metre", "meter"),
    ("metres", "meters"),
    ("fibre", "fiber"),
    ("aluminium", "aluminum"),
    ("grammes", "grams"),
    ("odour", "odor"),
    ("mould", "mold"),
    ("moulded", "molded"),
    ("jewellery", "jewelry"),
    ("tyre", "tire"),
    ("tyres", "tires"),
    ("organiser", "organizer"),
    ("organisers", "organizers"),
];

static UK_US_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    UK_US_SPELLINGS
        .iter()
        .map(|(uk, us)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(uk));
            (Regex::new(&pattern).expect("spelling rule"), *us)
        })
        .collect()
});

/// Ordered unit rules: number + unit collapse to a canonical suffix.
/// "30 L" -> "30L", "250 ml" -> "250ml", "21 inch" -> "21 Inches".
/// Compound units (ml before l, kg before g) are ordered so the longer
/// suffix wins.
static UNIT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let rules: &[(&str, &str)] = &[
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:millilitres?|milliliters?|ml)\b", "${1}ml"),
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:litres?|liters?|ltrs?|l)\b", "${1}L"),
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:kilograms?|kgs?)\b", "${1}kg"),
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:grams?|gms?|g)\b", "${1}g"),
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:centimetres?|centimeters?|cms?)\b", "${1}cm"),
        (r"(?i)\b(\d+(?:\.\d+)?)\s*(?:inch(?:es)?)\b", "${1} Inches"),
        (r"(?i)\b(\d+)\s*(?:pcs?|pieces?)\b", "${1} Pcs"),
    ];
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("unit rule"), *replacement))
        .collect()
});

/// A whole `<n> x <n> [x <n> ...]` chain, any of x/X/x-with-spaces.
static DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?(?:\s*[xX\u{00D7}]\s*\d+(?:\.\d+)?)+").expect("dimension rule"));

/// Canonicalize spelling, units, and dimension formatting.
pub fn normalize(text: &str) -> String {
    let mut out = text.to_string();

    for (re, us) in UK_US_RULES.iter() {
        out = re
            .replace_all(&out, |caps: &regex::Captures<'_>| {
                match_case(us, &caps[0])
            })
            .into_owned();
    }

    for (re, replacement) in UNIT_RULES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }

    out = DIMENSION_RE
        .replace_all(&out, |caps: &regex::Captures<'_>| {
            caps[0]
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == 'X' || c == '\u{00D7}' { 'x' } else { c })
                .collect::<String>()
        })
        .into_owned();

    collapse_whitespace(&out)
}

/// Carry a leading capital from the matched text over to the replacement.
fn match_case(replacement: &str, matched: &str) -> String {
    let leading_upper = matched.chars().next().is_some_and(|c| c.is_uppercase());
    if !leading_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}

/// Strip common English plural suffixes. Returns the lowercased singular form.
#[must_use]
pub fn normalize_plural(word: &str) -> String {
    let w = word.to_lowercase();
    if w.len() > 4 && w.ends_with("ies") {
        return format!("{}y", &w[..w.len() - 3]);
    }
    if w.len() > 3 && w.ends_with("es") {
        let stem = &w[..w.len() - 2];
        if stem.ends_with('x')
            || stem.ends_with('o')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
            || stem.ends_with("ss")
        {
            return stem.to_string();
        }
    }
    if w.len() > 2 && w.ends_with('s') && !w.ends_with("ss") {
        return w[..w.len() - 1].to_string();
    }
    w
}

/// True when two words reduce to the same singular form.
#[must_use]
pub fn are_same_concept(w1: &str, w2: &str) -> bool {
    normalize_plural(w1) == normalize_plural(w2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_preserves_leading_capital() {
        assert_eq!(normalize("Colour Box"), "Color Box");
        assert_eq!(normalize("colour box"), "color box");
        assert_eq!(normalize("Aluminium Handlebar"), "Aluminum Handlebar");
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(normalize("30 L Bucket"), "30L Bucket");
        assert_eq!(normalize("250 ml bottle"), "250ml bottle");
        assert_eq!(normalize("5 kg pack"), "5kg pack");
        assert_eq!(normalize("21 inch screen"), "21 Inches screen");
        assert_eq!(normalize("12 pcs set"), "12 Pcs set");
    }

    #[test]
    fn test_dimension_collapse() {
        assert_eq!(normalize("19 X 21 Inches"), "19x21 Inches");
        assert_eq!(normalize("30 x 40 x 50 cm box"), "30x40x50 cm box");
        assert_eq!(normalize("19\u{00D7}21"), "19x21");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("a   b\t c"), "a b c");
        assert_eq!(normalize("  padded  "), "padded");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "Shalimar Premium (Lavender Fragrance) Scented Garbage Bags | Medium 19 X 21 Inches",
            "30 L Colour Bucket 19 x 21 x 3",
            "250 ml litre aluminium 12 pcs",
            "already clean text",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_unmatched_passes_through() {
        assert_eq!(normalize("plain words only"), "plain words only");
    }

    #[test]
    fn test_normalize_plural() {
        assert_eq!(normalize_plural("bags"), "bag");
        assert_eq!(normalize_plural("boxes"), "box");
        assert_eq!(normalize_plural("babies"), "baby");
        assert_eq!(normalize_plural("glasses"), "glass");
        assert_eq!(normalize_plural("sizes"), "size");
        assert_eq!(normalize_plural("glass"), "glass");
        assert_eq!(normalize_plural("Bags"), "bag");
    }

    #[test]
    fn test_are_same_concept() {
        assert!(are_same_concept("bag", "Bags"));
        assert!(are_same_concept("box", "boxes"));
        assert!(!are_same_concept("bag", "box"));
    }
}
