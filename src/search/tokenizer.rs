//! Query Tokenizer & Variant Generator
//!
//! Splits a raw query on whitespace and derives, per term, a set of comparable
//! lexical forms: unit suffixes stripped, multiplication sign normalized,
//! digits extracted, separators expanded. All matching downstream is
//! case-insensitive substring containment over these variants.

/// Unit suffix of a query term, driving field-matching scope: terms ending in a
/// single "m" refer to lengths/options and are excluded from profile-name and
/// category-name matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitTag {
    None,
    Metres,
    Millimetres,
}

/// One whitespace-separated query term with its lexical variants (all
/// lowercase) and unit tag.
#[derive(Debug, Clone)]
pub struct QueryTerm {
    pub raw: String,
    pub lowered: String,
    pub variants: Vec<String>,
    pub unit: UnitTag,
}

impl QueryTerm {
    fn new(raw: &str) -> Self {
        let lowered = raw.to_lowercase().replace('×', "x");

        let mut variants = Vec::new();
        push_variant(&mut variants, raw.to_lowercase());
        push_variant(&mut variants, lowered.clone());

        let digits: String = lowered.chars().filter(|c| c.is_ascii_digit()).collect();
        push_variant(&mut variants, digits);

        // Only one suffix strip applies; "mm" is checked first so "35mm"
        // becomes "35", not "35m".
        if let Some(stripped) = lowered.strip_suffix("mm") {
            push_variant(&mut variants, stripped.to_string());
        } else if let Some(stripped) = lowered.strip_suffix('m') {
            push_variant(&mut variants, stripped.to_string());
        }

        // "90x35" also matches names stored as "90 x 35".
        push_variant(&mut variants, lowered.replace('x', " x "));

        let unit = if lowered.ends_with("mm") {
            UnitTag::Millimetres
        } else if lowered.ends_with('m') {
            UnitTag::Metres
        } else {
            UnitTag::None
        };

        Self {
            raw: raw.to_string(),
            lowered,
            variants,
            unit,
        }
    }

    /// True when any variant occurs in any of the given lowercase fields.
    pub fn matches<S: AsRef<str>>(&self, fields: &[S]) -> bool {
        self.variants
            .iter()
            .any(|variant| fields.iter().any(|field| field.as_ref().contains(variant)))
    }
}

fn push_variant(variants: &mut Vec<String>, variant: String) {
    if !variant.is_empty() && !variants.contains(&variant) {
        variants.push(variant);
    }
}

pub fn parse_query(query: &str) -> Vec<QueryTerm> {
    query.split_whitespace().map(QueryTerm::new).collect()
}

/// Lowercase `text`, normalize the multiplication sign to "x" and keep ASCII
/// alphanumerics only.
pub fn alnum_x(text: &str) -> String {
    text.to_lowercase()
        .replace('×', "x")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Lowercase `text` and keep ASCII alphanumerics only.
pub fn alnum(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// A query parsed once per request: the terms plus the normalized whole-query
/// forms the scorer compares against.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub terms: Vec<QueryTerm>,
    /// Lowercased terms joined with a literal "x", alphanumerics-and-x only.
    pub with_x: String,
    /// Lowercased terms concatenated, alphanumerics only.
    pub compact: String,
    /// Pure-digit terms as integers, in input order.
    pub numbers: Vec<i64>,
}

impl ParsedQuery {
    pub fn new(query: &str) -> Self {
        let terms = parse_query(query);

        let lowered: Vec<String> = terms.iter().map(|t| t.raw.to_lowercase()).collect();
        let with_x = alnum_x(&lowered.join("x"));
        let compact = alnum(&lowered.concat());

        let numbers = terms
            .iter()
            .filter(|t| !t.raw.is_empty() && t.raw.chars().all(|c| c.is_ascii_digit()))
            .filter_map(|t| t.raw.parse().ok())
            .collect();

        Self {
            terms,
            with_x,
            compact,
            numbers,
        }
    }
}
