//! String canonicalization for fuzzy comparison.
//!
//! Different catalogs disagree on accents, punctuation, and casing for the
//! same entity. `canonicalize` reduces a raw string to a lowercase
//! alphanumeric-only key so "Café del Mar" and "cafe-del-mar" compare
//! equal; `strings_match` layers a cheap case-insensitive exact check on
//! top of that.

use any_ascii::any_ascii;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Everything that is not an ASCII letter or digit.
static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

/// Check if a character is a Unicode combining mark (diacritical mark).
/// Used to filter out accents during normalization.
fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0xFE20..=0xFE2F)
}

/// Reduce a raw string to its canonical comparison key.
///
/// NFKD decomposition strips diacritics, `any_ascii` transliterates any
/// remaining non-Latin script, then everything outside `[A-Za-z0-9]` is
/// dropped and the result lowercased. Total over all Unicode input and
/// idempotent: canonical keys canonicalize to themselves.
pub fn canonicalize(s: &str) -> String {
    let stripped: String = s.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let ascii = any_ascii(&stripped);
    NON_ALPHANUMERIC.replace_all(&ascii, "").to_lowercase()
}

/// Compare two raw strings for an (almost) perfect match.
///
/// The case-insensitive exact comparison runs first. When it fails and
/// `strict` is false, the canonical keys are compared instead; `strict`
/// disables that fallback so only casing may differ.
pub fn strings_match(a: &str, b: &str, strict: bool) -> bool {
    if a.to_lowercase() == b.to_lowercase() {
        return true;
    }
    !strict && canonicalize(a) == canonicalize(b)
}

/// Articles stripped from the front of a name when building its sort key.
static SORT_ARTICLES: &[&str] = &["The ", "De ", "de ", "Les "];

/// Build a sort key for an artist or title by dropping one leading article.
/// "The Beatles" sorts under B, "Les Paul" under P.
pub fn sort_name(name: &str) -> String {
    for article in SORT_ARTICLES {
        if let Some(rest) = name.strip_prefix(article) {
            return rest.to_string();
        }
    }
    name.to_string()
}
