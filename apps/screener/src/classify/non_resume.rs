//! Non-résumé detector: negative signals such as certificates, letters and listings.
//!
//! A single phrase never disqualifies a document: a real résumé can mention a held
//! certificate. Only `MIN_NON_RESUME_INDICATORS` distinct hits flag it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::normalize::{word_matchers, NormalizedText, WordMatcher};

pub const MIN_NON_RESUME_INDICATORS: usize = 2;

pub const COMPANY_LIST_INDICATOR: &str = "company list pattern detected";

pub const DEFAULT_INDICATORS: &[&str] = &[
    // Certificates and academic records
    "certificate of completion",
    "certificate of achievement",
    "certificate of participation",
    "certificate of appreciation",
    "this certifies that",
    "this is to certify that",
    "has successfully completed",
    "certificate id",
    "credential id",
    "course completion",
    "training certificate",
    "marksheet",
    "transcript",
    "syllabus",
    "course outline",
    "lesson plan",
    "project report",
    "thesis",
    "dissertation",
    "research paper",
    // Corporate letters and payroll
    "offer letter",
    "appointment letter",
    "salary slip",
    "pay stub",
    "invoice",
    "receipt",
    "permission letter",
    "authorization letter",
    "approval letter",
    "consent letter",
    "clearance letter",
    "recommendation letter",
    "reference letter",
    "verification letter",
    "confirmation letter",
    // Identity documents
    "id card",
    "identity card",
    "passport",
    "driving license",
    // Posts, articles and office documents
    "congratulations",
    "celebration",
    "party invitation",
    "social media post",
    "facebook post",
    "twitter post",
    "instagram post",
    "blog post",
    "article",
    "news",
    "meeting notes",
    "agenda",
    "minutes of the meeting",
    "memo",
    "policy document",
    "manual",
    "handbook",
    "guide",
    // Company listings
    "top companies",
    "list of companies",
    "mnc companies",
    "company list",
    "companies in india",
    "best companies",
    "fortune 500",
    "company directory",
    "company names",
    "organization list",
    "corporate directory",
    "business directory",
    "company profiles",
    "company information",
    "company details",
    // Job listings
    "job openings",
    "career opportunities",
    "job vacancies",
    "hiring now",
    "apply now",
    "job description",
    "job requirements",
    "job posting",
    // Event and competition documents
    "hackathon",
    "competition",
    "event registration",
    "participation",
    "team registration",
    "event details",
    "competition guidelines",
];

static COMPANY_LIST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "1. infosys technologies", "2. acme global services ltd"
        r"(?i)\b\d{1,3}\.\s+[a-z][a-z&]*(?:\s+[a-z&]+){0,4}\s+(?:technologies|services|limited|ltd|inc|corp|solutions)\b",
        r"(?i)\btop\s+\d+\s+(?:[a-z]+\s+){0,4}companies\b",
        r"(?i)\blist\s+of\s+(?:[a-z]+\s+){0,4}companies\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonResumeSignal {
    pub is_non_resume: bool,
    /// Distinct indicators found, in indicator order.
    pub matched: Vec<String>,
}

pub fn default_indicators() -> Vec<WordMatcher> {
    word_matchers(DEFAULT_INDICATORS)
}

/// Scans normalized text for negative signals.
pub fn detect_non_resume(text: &NormalizedText, indicators: &[WordMatcher]) -> NonResumeSignal {
    let mut matched: Vec<String> = Vec::new();

    for indicator in indicators {
        let phrase = indicator.phrase();
        if matched.iter().any(|m| m == phrase) {
            continue;
        }
        if indicator.is_match(text.as_str()) {
            matched.push(phrase.to_string());
        }
    }

    if COMPANY_LIST_PATTERNS
        .iter()
        .any(|re| re.is_match(text.as_str()))
    {
        matched.push(COMPANY_LIST_INDICATOR.to_string());
    }

    NonResumeSignal {
        is_non_resume: matched.len() >= MIN_NON_RESUME_INDICATORS,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::normalize::normalize;

    fn detect(text: &str) -> NonResumeSignal {
        detect_non_resume(&normalize(text), &default_indicators())
    }

    #[test]
    fn test_certificate_trips_two_indicators() {
        let signal = detect(
            "Certificate of Completion. This certifies that Jane Doe has successfully completed \
             Coursera Machine Learning Specialization. Certificate ID ABC123.",
        );
        assert!(signal.is_non_resume);
        assert!(signal.matched.contains(&"certificate of completion".to_string()));
        assert!(signal.matched.contains(&"this certifies that".to_string()));
    }

    #[test]
    fn test_single_indicator_does_not_flag() {
        let signal = detect("Senior engineer. Holds a training certificate in Kubernetes.");
        assert_eq!(signal.matched, vec!["training certificate".to_string()]);
        assert!(!signal.is_non_resume);
    }

    #[test]
    fn test_clean_resume_has_no_indicators() {
        let signal = detect("Software Engineer with 5 years of experience in Rust and Go.");
        assert!(signal.matched.is_empty());
        assert!(!signal.is_non_resume);
    }

    #[test]
    fn test_company_list_pattern() {
        let signal = detect(
            "Company Directory\nTop 10 IT Companies in Bangalore\n1. Infosys Technologies\n2. Wipro Limited",
        );
        assert!(signal
            .matched
            .contains(&COMPANY_LIST_INDICATOR.to_string()));
        assert!(signal.is_non_resume);
    }

    #[test]
    fn test_company_list_pattern_reported_once() {
        let signal = detect("1. Acme Services 2. Globex Corp 3. Initech Solutions");
        let count = signal
            .matched
            .iter()
            .filter(|m| m.as_str() == COMPANY_LIST_INDICATOR)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_indicators_counted_once() {
        let indicators = word_matchers(&["invoice", "Invoice"]);
        let signal = detect_non_resume(&normalize("invoice invoice"), &indicators);
        assert_eq!(signal.matched, vec!["invoice".to_string()]);
        assert!(!signal.is_non_resume);
    }
}
