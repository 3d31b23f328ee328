//! Contact info extractor. Each field resolves independently down its own
//! fallback ladder; unresolved fields keep the `"Not found"` sentinel.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::classify::normalize::{word_matchers, WordMatcher};
use crate::extract::sections::header_kind;
use crate::models::{ContactInfo, NOT_FOUND};

pub const LOCATION_NOT_FOUND: &str = "Location not found";

/// Window handed to the entity recognizer, in chars.
pub const NER_WINDOW: usize = 500;

/// Lines considered by the name heuristic.
const NAME_SCAN_LINES: usize = 5;

const PLACEHOLDER_VALUES: &[&str] = &[
    "not found",
    "n/a",
    "na",
    "none",
    "-",
    "",
    "your name",
    "city, state",
];

const NON_NAME_MARKERS: &[&str] = &[
    "@",
    "email",
    "phone",
    "mobile",
    "contact",
    "linkedin",
    "github",
    "resume",
    "curriculum vitae",
    "address",
];

const KNOWN_CITIES: &[&str] = &[
    "New York",
    "San Francisco",
    "Los Angeles",
    "Seattle",
    "Austin",
    "Boston",
    "Chicago",
    "London",
    "Toronto",
    "Berlin",
    "Sydney",
    "Singapore",
    "Bangalore",
    "Bengaluru",
    "Hyderabad",
    "Mumbai",
    "Delhi",
    "Pune",
    "Chennai",
    "Kolkata",
    "Noida",
    "Gurgaon",
];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static OCR_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*([@.])\s*").unwrap());

static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{3}[-.]\d{3}[-.]\d{4}",
        r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}",
        r"\+\d{1,3}[-.\s]?\d{3,5}[-.\s]?\d{3}[-.\s]?\d{3,4}",
        r"\b\d{10}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());

static NAME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:full\s+)?name\s*:\s*(.*?)\s*$").unwrap());

static LOCATION_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(?:location|address)\s*:\s*(.*?)\s*$").unwrap());

static CITY_REGION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)?, ?(?:[A-Z]{2}|USA|India|Canada|Germany|Australia|Singapore|United States|United Kingdom)\b",
    )
    .unwrap()
});

static CV_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcv\b").unwrap());

static KNOWN_CITY_MATCHERS: Lazy<Vec<WordMatcher>> = Lazy::new(|| word_matchers(KNOWN_CITIES));

/// Optional named-entity collaborator for the name ladder.
pub trait EntityRecognizer: Send + Sync {
    /// First PERSON entity found in `text`, if any.
    fn person_name(&self, text: &str) -> Option<String>;
}

pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES.contains(&value.trim().to_lowercase().as_str())
}

pub fn extract_email(raw: &str) -> Option<String> {
    if let Some(m) = EMAIL_RE.find(raw) {
        return Some(m.as_str().to_string());
    }
    // OCR sometimes splits addresses as "jane . doe @ mail . com"
    raw.lines().filter(|line| line.contains('@')).find_map(|line| {
        let joined = OCR_GAP_RE.replace_all(line, "$1");
        EMAIL_RE.find(&joined).map(|m| m.as_str().to_string())
    })
}

/// First pattern (in priority order) that matches anywhere in the document.
pub fn extract_phone(raw: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|re| re.find(raw))
        .map(|m| m.as_str().to_string())
}

pub fn extract_linkedin(raw: &str) -> Option<String> {
    LINKEDIN_RE.find(raw).map(|m| m.as_str().to_string())
}

fn labeled_value(re: &Regex, raw: &str) -> Option<String> {
    re.captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|value| !is_placeholder(value))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let lowered = line.to_lowercase();
    if lowered.starts_with("page") || lowered.starts_with("--") {
        return false;
    }
    if line.contains(':') || NON_NAME_MARKERS.iter().any(|m| lowered.contains(m)) {
        return false;
    }
    if header_kind(line).is_some() || CV_WORD_RE.is_match(line) {
        return false;
    }
    let words = line.split_whitespace().count();
    words <= 4
        && line.chars().count() > 2
        && line.chars().any(char::is_alphabetic)
        && !line.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn heuristic_name(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn pattern_location(raw: &str) -> Option<String> {
    CITY_REGION_RE.find(raw).map(|m| m.as_str().to_string())
}

fn known_city(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    KNOWN_CITIES
        .iter()
        .zip(KNOWN_CITY_MATCHERS.iter())
        .find(|(_, matcher)| matcher.is_match(&lowered))
        .map(|(city, _)| city.to_string())
}

/// Contact extractor with an optional entity recognizer for the third name rung.
#[derive(Clone, Default)]
pub struct ContactExtractor {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recognizer(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer: Some(recognizer),
        }
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Name ladder: labeled line → first-lines heuristic → recognizer → filename.
    pub fn extract_name(&self, raw: &str, filename: &str) -> String {
        if let Some(name) = labeled_value(&NAME_LABEL_RE, raw) {
            return name;
        }
        if let Some(name) = heuristic_name(raw) {
            return name;
        }
        if let Some(recognizer) = &self.recognizer {
            let window: String = raw.chars().take(NER_WINDOW).collect();
            if let Some(name) = recognizer
                .person_name(&window)
                .filter(|n| !is_placeholder(n))
            {
                debug!("name resolved by entity recognizer");
                return name;
            }
        }
        debug!(filename, "no name in document, falling back to filename");
        format!("Name from {filename}")
    }

    /// Location ladder: labeled line → "City, ST" pattern → known city → sentinel.
    pub fn extract_location(&self, raw: &str) -> String {
        labeled_value(&LOCATION_LABEL_RE, raw)
            .or_else(|| pattern_location(raw))
            .or_else(|| known_city(raw))
            .unwrap_or_else(|| LOCATION_NOT_FOUND.to_string())
    }

    pub fn extract(&self, raw: &str, filename: &str) -> ContactInfo {
        let not_found = || NOT_FOUND.to_string();
        ContactInfo {
            name: self.extract_name(raw, filename),
            email: extract_email(raw).unwrap_or_else(not_found),
            phone: extract_phone(raw).unwrap_or_else(not_found),
            location: self.extract_location(raw),
            linkedin: extract_linkedin(raw).unwrap_or_else(not_found),
        }
    }
}

/// Extracts contact info without an entity recognizer.
pub fn extract_contact(raw: &str, filename: &str) -> ContactInfo {
    ContactExtractor::new().extract(raw, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer(&'static str);

    impl EntityRecognizer for FixedRecognizer {
        fn person_name(&self, _text: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    const HEADER_BLOCK: &str = "John Smith\njohn@x.com\n555-123-4567\nEDUCATION\nBS Computer Science, MIT";

    // Nothing in the first lines qualifies as a name.
    const NAMELESS: &str = "contact: 555-123-4567\nObjective: build compilers\n2024";

    #[test]
    fn test_basic_contact_block() {
        let info = extract_contact(HEADER_BLOCK, "cv.pdf");
        assert_eq!(info.name, "John Smith");
        assert_eq!(info.email, "john@x.com");
        assert_eq!(info.phone, "555-123-4567");
        assert_eq!(info.linkedin, NOT_FOUND);
    }

    #[test]
    fn test_labeled_lines_win() {
        let raw = "RESUME\nName: Priya Sharma\nLocation: Pune, India\nEmail: priya@example.in";
        let info = extract_contact(raw, "cv.pdf");
        assert_eq!(info.name, "Priya Sharma");
        assert_eq!(info.location, "Pune, India");
    }

    #[test]
    fn test_placeholder_label_is_skipped() {
        let raw = "Name: N/A\nAda Lovelace\nLocation: City, State\nLondon based engineer";
        let info = extract_contact(raw, "cv.pdf");
        assert_eq!(info.name, "Ada Lovelace");
        assert_eq!(info.location, "London");
    }

    #[test]
    fn test_name_heuristic_skips_markers() {
        let raw = "Page 1\nCurriculum Vitae\nJane Q. Public\nSenior Engineer";
        let info = extract_contact(raw, "cv.pdf");
        assert_eq!(info.name, "Jane Q. Public");
    }

    #[test]
    fn test_recognizer_rung() {
        let extractor = ContactExtractor::with_recognizer(Arc::new(FixedRecognizer("Grace Hopper")));
        assert_eq!(extractor.extract_name(NAMELESS, "cv.pdf"), "Grace Hopper");
    }

    #[test]
    fn test_filename_rung() {
        let info = extract_contact(NAMELESS, "cv_2024.pdf");
        assert_eq!(info.name, "Name from cv_2024.pdf");
    }

    #[test]
    fn test_phone_pattern_priority() {
        assert_eq!(
            extract_phone("call (415) 555-0100").as_deref(),
            Some("(415) 555-0100")
        );
        assert_eq!(
            extract_phone("tel +1 415 555 0100").as_deref(),
            Some("+1 415 555 0100")
        );
        assert_eq!(extract_phone("9876543210").as_deref(), Some("9876543210"));
        assert_eq!(extract_phone("no digits here"), None);
    }

    #[test]
    fn test_email_with_ocr_spacing() {
        let raw = "Jane Doe\nmail: jane . doe @ gmail . com";
        assert_eq!(extract_email(raw).as_deref(), Some("jane.doe@gmail.com"));
    }

    #[test]
    fn test_city_region_pattern() {
        let info = extract_contact("Sam Lee\nAustin, TX\nsam@lee.dev", "cv.pdf");
        assert_eq!(info.location, "Austin, TX");
    }

    #[test]
    fn test_location_not_found() {
        let info = extract_contact(HEADER_BLOCK, "cv.pdf");
        assert_eq!(info.location, LOCATION_NOT_FOUND);
    }

    #[test]
    fn test_linkedin_extracted() {
        let raw = "Jane Doe\nhttps://www.LinkedIn.com/in/jane-doe-42";
        assert_eq!(
            extract_linkedin(raw).as_deref(),
            Some("LinkedIn.com/in/jane-doe-42")
        );
    }

    #[test]
    fn test_placeholder_values() {
        assert!(is_placeholder(" N/A "));
        assert!(is_placeholder("Your Name"));
        assert!(is_placeholder(""));
        assert!(!is_placeholder("Jane"));
    }
}
