//! Numeric value extraction.
//!
//! Finds a single numeric or percentage value in a text. Patterns are
//! tried in a fixed order and only the first occurrence is used; multiple
//! numbers in the same text are never aggregated.

use std::sync::OnceLock;

use regex::Regex;

/// What shape the extracted value had in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// "70%", "70 per cent", "70 percent"
    Percentage,
    /// A bare decimal number
    Number,
}

impl NumericKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericKind::Percentage => "percentage",
            NumericKind::Number => "number",
        }
    }
}

/// An ephemeral extraction result; not persisted anywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    pub kind: NumericKind,
    pub value: f64,
}

static PERCENT_SIGN: OnceLock<Regex> = OnceLock::new();
static PER_CENT_WORDS: OnceLock<Regex> = OnceLock::new();
static PERCENT_WORD: OnceLock<Regex> = OnceLock::new();
static BARE_NUMBER: OnceLock<Regex> = OnceLock::new();

fn percent_sign() -> &'static Regex {
    PERCENT_SIGN.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid regex"))
}

fn per_cent_words() -> &'static Regex {
    PER_CENT_WORDS
        .get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*per\s+cent\b").expect("valid regex"))
}

fn percent_word() -> &'static Regex {
    PERCENT_WORD.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*percent\b").expect("valid regex"))
}

fn bare_number() -> &'static Regex {
    BARE_NUMBER.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("valid regex"))
}

/// Extract the first numeric value from a text.
///
/// Tries, in order: the `NN%` pattern, the spelled-out phrasings
/// `NN per cent` and `NN percent`, then a bare decimal number. Returns
/// `None` when the text contains no number at all.
pub fn extract_numeric(text: &str) -> Option<NumericValue> {
    let lowered = text.to_lowercase();

    for pattern in [percent_sign(), per_cent_words(), percent_word()] {
        if let Some(caps) = pattern.captures(&lowered) {
            let value = caps[1].parse().ok()?;
            return Some(NumericValue {
                kind: NumericKind::Percentage,
                value,
            });
        }
    }

    let caps = bare_number().captures(&lowered)?;
    let value = caps[1].parse().ok()?;
    Some(NumericValue {
        kind: NumericKind::Number,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_sign() {
        let v = extract_numeric("paper usage dropped by 70%").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 70.0);
    }

    #[test]
    fn test_percent_with_space_and_decimals() {
        let v = extract_numeric("measured at 71.2 %").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 71.2);
    }

    #[test]
    fn test_spelled_out_per_cent() {
        let v = extract_numeric("a drop of 70 per cent was reported").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 70.0);
    }

    #[test]
    fn test_spelled_out_percent() {
        let v = extract_numeric("roughly 45 percent of teams").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 45.0);
    }

    #[test]
    fn test_bare_number() {
        let v = extract_numeric("we processed 340 requests").unwrap();
        assert_eq!(v.kind, NumericKind::Number);
        assert_eq!(v.value, 340.0);
    }

    #[test]
    fn test_percentage_wins_over_earlier_bare_number() {
        // the percentage pattern is tried first, even when a bare number
        // appears earlier in the text
        let v = extract_numeric("in 2024 the reduction reached 70%").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 70.0);
    }

    #[test]
    fn test_first_occurrence_only() {
        let v = extract_numeric("85% digitized and 70% less paper").unwrap();
        assert_eq!(v.value, 85.0);
    }

    #[test]
    fn test_case_insensitive_phrasing() {
        let v = extract_numeric("70 PERCENT reduction").unwrap();
        assert_eq!(v.kind, NumericKind::Percentage);
        assert_eq!(v.value, 70.0);
    }

    #[test]
    fn test_no_number() {
        assert!(extract_numeric("no digits in this sentence").is_none());
        assert!(extract_numeric("").is_none());
    }
}
