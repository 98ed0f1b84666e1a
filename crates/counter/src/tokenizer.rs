use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("static word pattern"));

/// Normalize a line of text into lowercase alphabetic tokens.
///
/// A token is a maximal run of ASCII letters; every other character
/// (punctuation, digits, whitespace) separates tokens and is discarded.
/// Always succeeds, possibly with zero tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    WORD.find_iter(line)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}
