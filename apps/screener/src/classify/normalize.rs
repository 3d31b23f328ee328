//! Text normalization and word-boundary matching shared by the classifier stages.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s@.\-]").unwrap());

/// Lowercased, whitespace-collapsed view of a document. Only used for matching;
/// callers always get the raw text back, never this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercases, collapses whitespace runs, and blanks out everything except word
/// characters, whitespace, `@`, `.` and `-` (kept for emails and phone numbers).
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lowered, " ");
    let stripped = NON_WORD_RE.replace_all(&collapsed, " ");
    NormalizedText(stripped.trim().to_string())
}

/// Literal phrase compiled once into a `\b…\b` regex. Matches lowercased text.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    phrase: String,
    regex: Regex,
}

impl WordMatcher {
    /// Trims and lowercases `phrase`. `None` when nothing is left to match.
    pub fn new(phrase: &str) -> Option<Self> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return None;
        }
        let regex = Regex::new(&format!(r"\b{}\b", regex::escape(&phrase))).ok()?;
        Some(Self { phrase, regex })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Non-overlapping word-bounded occurrences in `lowered`.
    pub fn count(&self, lowered: &str) -> usize {
        self.regex.find_iter(lowered).count()
    }

    pub fn is_match(&self, lowered: &str) -> bool {
        self.regex.is_match(lowered)
    }
}

pub fn word_matchers(phrases: &[&str]) -> Vec<WordMatcher> {
    phrases.iter().filter_map(|p| WordMatcher::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses_whitespace() {
        let text = normalize("  John   SMITH\n\n\tEngineer ");
        assert_eq!(text.as_str(), "john smith engineer");
    }

    #[test]
    fn test_normalize_keeps_email_and_phone_characters() {
        let text = normalize("Email: john.doe@x.com | Phone: 555-123-4567");
        assert!(text.as_str().contains("john.doe@x.com"));
        assert!(text.as_str().contains("555-123-4567"));
        assert!(!text.as_str().contains('|'));
        assert!(!text.as_str().contains(':'));
    }

    #[test]
    fn test_normalize_empty_is_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t").is_empty());
    }

    fn matcher(phrase: &str) -> WordMatcher {
        WordMatcher::new(phrase).unwrap()
    }

    #[test]
    fn test_word_match_rejects_partial_words() {
        assert_eq!(matcher("intern").count("internship international"), 0);
        assert_eq!(matcher("intern").count("an intern and an intern"), 2);
    }

    #[test]
    fn test_word_match_with_punctuated_keyword() {
        assert!(matcher("b.e").is_match("completed b.e in 2020"));
        assert!(!matcher("b.e").is_match("completed b.ed in 2020"));
    }

    #[test]
    fn test_word_match_retries_after_failed_boundary() {
        // First hit is inside "cvs", second is a real word.
        assert_eq!(matcher("cv").count("cvs and cv"), 1);
    }

    #[test]
    fn test_matcher_lowercases_phrase() {
        assert_eq!(matcher("  Curriculum Vitae ").phrase(), "curriculum vitae");
        assert!(WordMatcher::new("   ").is_none());
    }
}
