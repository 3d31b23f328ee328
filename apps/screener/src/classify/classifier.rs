//! Document classifier: decides RESUME vs NON_RESUME for extracted text.
//!
//! Decision policy, in order:
//! 1. Length gate (too short → NON_RESUME, confidence 0)
//! 2. Normalize, then keyword score + non-résumé signal (independent)
//! 3. Extraction placeholder text → NON_RESUME (the filename only shapes the reason)
//! 4. Override: non-résumé signal AND score below `override_cutoff` → NON_RESUME
//! 5. Threshold: score ≥ `resume_threshold` → RESUME
//!
//! Confidence is derived separately and never changes the verdict.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::keywords::{default_categories, score_keywords, KeywordCategory, KeywordScore};
use crate::classify::non_resume::{default_indicators, detect_non_resume, NonResumeSignal};
use crate::classify::normalize::{normalize, WordMatcher};

const MAX_FOUND_KEYWORDS: usize = 20;
const MAX_MISSING_SECTIONS: usize = 10;
const MAX_INDICATORS_REPORTED: usize = 5;

/// Text that upstream extraction substitutes when it could not read the file.
const EXTRACTION_PLACEHOLDERS: &[&str] = &[
    "resume content could not be extracted from pdf",
    "sample resume content with experience in software development",
    "pdf processing not available",
    "ocr processing not available",
    "error extracting pdf text",
    "error extracting image text",
];

// ────────────────────────────────────────────────────────────────────────────
// Thresholds
// ────────────────────────────────────────────────────────────────────────────

/// Tunable decision constants. The defaults are empirically chosen and uncalibrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    pub resume_threshold: u32,
    pub override_cutoff: u32,
    pub category_bonus: u32,
    pub identity_bonus: u32,
    pub min_text_length: usize,
    pub override_confidence_cap: u8,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            resume_threshold: 18,
            override_cutoff: 25,
            category_bonus: 3,
            identity_bonus: 10,
            min_text_length: 50,
            override_confidence_cap: 25,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Resume,
    NonResume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub document_type: DocumentType,
    pub confidence: u8,
    pub total_score: u32,
    pub detected_sections: Vec<String>,
    pub found_keywords: Vec<String>,
    pub missing_sections: Vec<String>,
    pub non_resume_indicators: Vec<String>,
    pub reason: String,
    pub threshold_met: bool,
    pub category_breakdown: std::collections::BTreeMap<String, Vec<String>>,
}

impl ClassificationResult {
    pub fn is_resume(&self) -> bool {
        self.document_type == DocumentType::Resume
    }
}

/// Structured rejection returned upstream when a document is not a résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionNotice {
    pub status: String,
    pub message: String,
    pub details: String,
    pub detected_keywords: Vec<String>,
    pub missing_resume_sections: Vec<String>,
    pub suggestions: Vec<String>,
    pub confidence_score: u8,
}

pub fn rejection_notice(result: &ClassificationResult) -> RejectionNotice {
    RejectionNotice {
        status: "rejected".to_string(),
        message: "This uploaded file is not a resume. Please upload a proper CV or Resume for scoring."
            .to_string(),
        details: result.reason.clone(),
        detected_keywords: result.found_keywords.clone(),
        missing_resume_sections: result.missing_sections.clone(),
        suggestions: vec![
            "Upload a document that contains your professional experience".to_string(),
            "Include education details, skills, and work history".to_string(),
            "Ensure the document is a proper resume/CV format".to_string(),
            "Avoid uploading certificates, marksheets, or project reports".to_string(),
        ],
        confidence_score: result.confidence,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────────────────────────────────────

/// Immutable classifier configuration; safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    thresholds: ClassifierThresholds,
    categories: Vec<KeywordCategory>,
    indicators: Vec<WordMatcher>,
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(ClassifierThresholds::default())
    }
}

impl DocumentClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        let categories = default_categories(thresholds.category_bonus, thresholds.identity_bonus);
        Self {
            thresholds,
            categories,
            indicators: default_indicators(),
        }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn indicators(&self) -> &[WordMatcher] {
        &self.indicators
    }

    /// Classifies raw extracted text. Never fails.
    pub fn classify(&self, raw_text: &str, filename: &str) -> ClassificationResult {
        if let Some(rejected) = self.length_gate(raw_text) {
            return rejected;
        }

        let text = normalize(raw_text);
        let keyword_score = score_keywords(&text, &self.categories);
        let signal = detect_non_resume(&text, &self.indicators);

        self.decide(raw_text, filename, keyword_score, signal)
    }

    /// Returns the short-input rejection, or `None` when the text is long enough to score.
    pub fn length_gate(&self, raw_text: &str) -> Option<ClassificationResult> {
        let length = raw_text.trim().chars().count();
        if length >= self.thresholds.min_text_length {
            return None;
        }

        debug!(length, "Document rejected by length gate");
        Some(ClassificationResult {
            document_type: DocumentType::NonResume,
            confidence: 0,
            total_score: 0,
            detected_sections: vec![],
            found_keywords: vec![],
            missing_sections: vec!["All resume sections missing".to_string()],
            non_resume_indicators: vec![],
            reason: format!(
                "Document too short or empty. Minimum {} characters required for resume analysis.",
                self.thresholds.min_text_length
            ),
            threshold_met: false,
            category_breakdown: Default::default(),
        })
    }

    /// Applies the override and threshold policy to already-computed stage outputs.
    pub fn decide(
        &self,
        raw_text: &str,
        filename: &str,
        keyword_score: KeywordScore,
        signal: NonResumeSignal,
    ) -> ClassificationResult {
        let t = &self.thresholds;
        let total_score = keyword_score.total_score;
        let mut confidence = compute_confidence(
            total_score,
            keyword_score.detected_sections.len(),
            raw_text.chars().count(),
        );

        let (document_type, reason) = if let Some(note) = placeholder_note(raw_text, filename) {
            confidence = confidence.min(t.override_confidence_cap);
            (DocumentType::NonResume, note)
        } else if signal.is_non_resume && total_score < t.override_cutoff {
            confidence = confidence.min(t.override_confidence_cap);
            let shown: Vec<&str> = signal.matched.iter().take(3).map(String::as_str).collect();
            (
                DocumentType::NonResume,
                format!(
                    "Document contains non-resume indicators: {}. This appears to be a certificate, marksheet, or other non-resume document.",
                    shown.join(", ")
                ),
            )
        } else if total_score >= t.resume_threshold {
            let shown: Vec<&str> = keyword_score
                .detected_sections
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            (
                DocumentType::Resume,
                format!(
                    "Document meets ATS resume criteria with score {total_score}/{}. Contains essential resume sections: {}.",
                    t.resume_threshold,
                    shown.join(", ")
                ),
            )
        } else {
            (
                DocumentType::NonResume,
                format!(
                    "Document does not meet ATS resume criteria (score: {total_score}/{}). Missing essential resume sections like experience, education, or skills.",
                    t.resume_threshold
                ),
            )
        };

        let missing_sections: Vec<String> = self
            .categories
            .iter()
            .map(KeywordCategory::display_name)
            .filter(|name| !keyword_score.detected_sections.contains(name))
            .take(MAX_MISSING_SECTIONS)
            .collect();

        let found_keywords: Vec<String> = self
            .categories
            .iter()
            .filter_map(|c| keyword_score.category_matches.get(&c.name))
            .flatten()
            .take(MAX_FOUND_KEYWORDS)
            .cloned()
            .collect();

        debug!(
            total_score,
            confidence,
            indicators = signal.matched.len(),
            "Classification decided: {:?}",
            document_type
        );

        ClassificationResult {
            document_type,
            confidence,
            total_score,
            detected_sections: keyword_score.detected_sections,
            found_keywords,
            missing_sections,
            non_resume_indicators: signal
                .matched
                .into_iter()
                .take(MAX_INDICATORS_REPORTED)
                .collect(),
            reason,
            threshold_met: total_score >= t.resume_threshold,
            category_breakdown: keyword_score.category_matches,
        }
    }
}

/// `clamp(0, 100, round((min(100, score/30·100) + min(20, sections·3)) × length_factor))`
pub fn compute_confidence(total_score: u32, detected_sections: usize, text_length: usize) -> u8 {
    let base = (total_score as f64 / 30.0 * 100.0).min(100.0);
    let section_bonus = (detected_sections as f64 * 3.0).min(20.0);
    let length_factor = if text_length < 200 {
        0.7
    } else if text_length > 1000 {
        1.1
    } else {
        1.0
    };
    ((base + section_bonus) * length_factor).round().clamp(0.0, 100.0) as u8
}

/// Placeholder text says nothing about the document; only then does the filename matter.
fn placeholder_note(raw_text: &str, filename: &str) -> Option<String> {
    let lowered = raw_text.to_lowercase();
    if !EXTRACTION_PLACEHOLDERS.iter().any(|p| lowered.contains(p)) {
        return None;
    }

    let name = filename.to_lowercase();
    let looks_like_resume = name
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| matches!(token, "resume" | "cv" | "biodata"));

    Some(if looks_like_resume {
        format!(
            "Text extraction returned placeholder content instead of the document text. The filename '{filename}' suggests a resume; re-upload a text-based PDF."
        )
    } else {
        "Text extraction returned placeholder content instead of the document text.".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "John Smith\njohn@x.com\n555-123-4567\nEDUCATION\nBS Computer Science, MIT\nEXPERIENCE\nSoftware Engineer at Google, built search ranking\nSKILLS\nPython, SQL";

    const CERTIFICATE: &str = "Certificate of Completion. This certifies that Jane Doe has successfully completed Coursera Machine Learning Specialization. Certificate ID ABC123.";

    const FULL_RESUME: &str = r#"
        Jane Doe — Curriculum Vitae
        Email: jane.doe@example.com | Phone: (555) 987-6543 | LinkedIn: linkedin.com/in/janedoe

        PROFESSIONAL SUMMARY
        Backend engineer with 6 years of experience building distributed systems.

        EXPERIENCE
        Senior Software Engineer, Acme Corp (2020 - Present)
        - Led migration of payment services to Rust, reducing p99 latency by 40%
        - Mentored 5 engineers and owned on-call responsibilities

        EDUCATION
        B.Tech in Computer Science, State University, CGPA 8.7

        SKILLS
        Rust, Python, SQL, Docker, Kubernetes, AWS

        PROJECTS
        Open-source rate limiter used by 200+ companies
        Certifications: AWS Certified Solutions Architect
        Hackathon winner at the regional coding competition
    "#;

    fn classifier() -> DocumentClassifier {
        DocumentClassifier::default()
    }

    #[test]
    fn test_sample_resume_is_resume() {
        let result = classifier().classify(SAMPLE_RESUME, "john_smith.pdf");
        assert_eq!(result.document_type, DocumentType::Resume);
        assert!(result.total_score >= 18, "score was {}", result.total_score);
        assert!(result.threshold_met);
    }

    #[test]
    fn test_certificate_is_rejected_by_override() {
        let result = classifier().classify(CERTIFICATE, "certificate.pdf");
        assert_eq!(result.document_type, DocumentType::NonResume);
        assert!(result.non_resume_indicators.len() >= 2);
        assert!(result.reason.contains("non-resume indicators"));
        assert!(result.confidence <= 25);
    }

    #[test]
    fn test_short_text_rejected_regardless_of_content() {
        let text = "Resume CV Education Experience";
        assert_eq!(text.len(), 30);
        let result = classifier().classify(text, "resume.pdf");
        assert_eq!(result.document_type, DocumentType::NonResume);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.total_score, 0);
        assert!(result.reason.contains("too short"));
    }

    #[test]
    fn test_length_gate_counts_trimmed_text() {
        let padded = format!("{:^200}", "short text");
        assert!(classifier().length_gate(&padded).is_some());
    }

    #[test]
    fn test_full_resume_survives_indicator_mentions() {
        // "hackathon" and "competition" are both indicators; the score escape hatch keeps it.
        let result = classifier().classify(FULL_RESUME, "jane_doe_cv.pdf");
        assert!(result.non_resume_indicators.len() >= 2);
        assert!(result.total_score >= 25);
        assert_eq!(result.document_type, DocumentType::Resume);
    }

    #[test]
    fn test_override_asymmetry() {
        let c = classifier();
        let signal = NonResumeSignal {
            is_non_resume: true,
            matched: vec!["invoice".into(), "receipt".into()],
        };
        let rich = KeywordScore {
            total_score: 24,
            ..Default::default()
        };
        let result = c.decide(CERTIFICATE, "", rich, signal.clone());
        assert_eq!(result.document_type, DocumentType::NonResume);

        let richer = KeywordScore {
            total_score: 25,
            ..Default::default()
        };
        let result = c.decide(CERTIFICATE, "", richer, signal);
        assert_eq!(result.document_type, DocumentType::Resume);
    }

    #[test]
    fn test_threshold_consistency() {
        let c = classifier();
        for score in 0..40 {
            let result = c.decide(
                SAMPLE_RESUME,
                "",
                KeywordScore {
                    total_score: score,
                    ..Default::default()
                },
                NonResumeSignal::default(),
            );
            let expected = if score >= 18 {
                DocumentType::Resume
            } else {
                DocumentType::NonResume
            };
            assert_eq!(result.document_type, expected, "score {score}");
        }
    }

    #[test]
    fn test_confidence_bounds() {
        assert_eq!(compute_confidence(0, 0, 100), 0);
        assert_eq!(compute_confidence(1000, 7, 5000), 100);
        // base 60 + bonus 9 = 69, × 0.7 = 48.3
        assert_eq!(compute_confidence(18, 3, 150), 48);
        // base 100 + bonus 20, × 1.0 → clamped
        assert_eq!(compute_confidence(30, 7, 500), 100);
    }

    #[test]
    fn test_found_keyword_category_never_missing() {
        let result = classifier().classify(FULL_RESUME, "cv.pdf");
        for detected in &result.detected_sections {
            assert!(!result.missing_sections.contains(detected));
        }
        for (category, keywords) in &result.category_breakdown {
            assert!(!keywords.is_empty());
            let display = crate::classify::keywords::display_name(category);
            assert!(!result.missing_sections.contains(&display));
        }
    }

    #[test]
    fn test_bounded_lists() {
        let result = classifier().classify(FULL_RESUME, "cv.pdf");
        assert!(result.found_keywords.len() <= 20);
        assert!(result.non_resume_indicators.len() <= 5);
        assert!(result.missing_sections.len() <= 10);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = classifier();
        let a = c.classify(FULL_RESUME, "cv.pdf");
        let b = c.classify(FULL_RESUME, "cv.pdf");
        assert_eq!(a, b);
    }

    #[test]
    fn test_placeholder_content_annotated_with_filename() {
        let text = "Resume content could not be extracted from PDF. This may be a scanned document or have complex formatting.";
        let result = classifier().classify(text, "my_resume.pdf");
        assert!(result.reason.contains("my_resume.pdf"));
        assert_eq!(result.document_type, DocumentType::NonResume);
    }

    #[test]
    fn test_rejection_notice_carries_reason() {
        let result = classifier().classify(CERTIFICATE, "certificate.pdf");
        let notice = rejection_notice(&result);
        assert_eq!(notice.status, "rejected");
        assert_eq!(notice.details, result.reason);
        assert_eq!(notice.suggestions.len(), 4);
        assert_eq!(notice.confidence_score, result.confidence);
    }

    #[test]
    fn test_document_type_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&DocumentType::NonResume).unwrap(),
            r#""NON_RESUME""#
        );
    }
}
