//! Keyword scorer: weighted keyword categories that decide how "résumé-like" a document reads.
//!
//! Each category contributes `weight × occurrences` for every keyword it finds, plus a
//! one-off `category_bonus` when at least one keyword matched. The core-identity category
//! ("resume", "cv", ...) carries an extra flat `identity_bonus`.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::normalize::{NormalizedText, WordMatcher};

// ────────────────────────────────────────────────────────────────────────────
// Category model
// ────────────────────────────────────────────────────────────────────────────

/// How a single trigger is matched against normalized text.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Literal phrase, matched on word boundaries.
    Word(WordMatcher),
    /// Structural signal such as "an email address is present". `label` is what gets
    /// reported as the found keyword.
    Pattern { label: String, regex: Regex },
}

impl Trigger {
    pub fn label(&self) -> &str {
        match self {
            Trigger::Word(matcher) => matcher.phrase(),
            Trigger::Pattern { label, .. } => label,
        }
    }

    fn occurrences(&self, text: &str) -> usize {
        match self {
            Trigger::Word(matcher) => matcher.count(text),
            Trigger::Pattern { regex, .. } => regex.find_iter(text).count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordCategory {
    pub name: String,
    pub triggers: Vec<Trigger>,
    pub weight: u32,
    pub category_bonus: u32,
    /// Flat extra points when the category matches. Non-zero only for core identity.
    pub identity_bonus: u32,
}

impl KeywordCategory {
    /// Builds a category from literal keywords. Keywords are lowercased and deduplicated,
    /// keeping first-seen order.
    pub fn new(name: &str, keywords: &[&str], weight: u32, category_bonus: u32) -> Self {
        let mut seen = HashSet::new();
        let triggers = keywords
            .iter()
            .filter_map(|k| WordMatcher::new(k))
            .filter(|m| seen.insert(m.phrase().to_string()))
            .map(Trigger::Word)
            .collect();

        Self {
            name: name.to_string(),
            triggers,
            weight,
            category_bonus,
            identity_bonus: 0,
        }
    }

    pub fn with_identity_bonus(mut self, bonus: u32) -> Self {
        self.identity_bonus = bonus;
        self
    }

    pub fn with_pattern(mut self, label: &str, regex: Regex) -> Self {
        if !self.triggers.iter().any(|t| t.label() == label) {
            self.triggers.push(Trigger::Pattern {
                label: label.to_string(),
                regex,
            });
        }
        self
    }

    /// Human-readable name: `EDUCATION_SIGNALS` → `Education Signals`.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(Trigger::label)
    }
}

pub fn display_name(category_name: &str) -> String {
    category_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Default category tables
// ────────────────────────────────────────────────────────────────────────────

pub const CORE_RESUME_IDENTITY: &str = "CORE_RESUME_IDENTITY";

const CORE_IDENTITY_KEYWORDS: &[&str] = &[
    "resume",
    "cv",
    "curriculum vitae",
    "bio-data",
    "biodata",
    "professional profile",
    "career summary",
    "profile summary",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "qualification",
    "academic",
    "degree",
    "b.e",
    "b.tech",
    "m.tech",
    "b.sc",
    "m.sc",
    "diploma",
    "cgpa",
    "gpa",
    "percentage",
    "university",
    "college",
    "school",
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "graduate",
    "undergraduate",
    "postgraduate",
    "mba",
    "bba",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work experience",
    "employment",
    "internship",
    "intern",
    "job role",
    "designation",
    "company",
    "organization",
    "responsibilities",
    "worked at",
    "position",
    "role",
    "employment history",
    "work history",
    "professional experience",
    "career",
    "tenure",
    "duration",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "soft skills",
    "programming",
    "languages",
    "frameworks",
    "tools",
    "technologies",
    "python",
    "java",
    "sql",
    "html",
    "css",
    "javascript",
    "machine learning",
    "data science",
    "competencies",
    "expertise",
    "proficiency",
    "abilities",
    "capabilities",
];

const PROJECTS_KEYWORDS: &[&str] = &[
    "projects",
    "mini project",
    "major project",
    "final year project",
    "achievements",
    "awards",
    "certifications",
    "hackathon",
    "competition",
    "portfolio",
    "accomplishments",
    "honors",
    "recognition",
    "publications",
    "research",
];

const CONTACT_KEYWORDS: &[&str] = &[
    "email",
    "phone",
    "mobile",
    "contact",
    "linkedin",
    "github",
    "portfolio",
    "address",
    "location",
    "website",
    "profile",
    "social",
];

const RESUME_SECTION_KEYWORDS: &[&str] = &[
    "objective",
    "career objective",
    "summary",
    "profile",
    "strengths",
    "hobbies",
    "interests",
    "declaration",
    "references",
    "personal details",
    "about me",
    "professional summary",
    "career goals",
];

static EMAIL_SIGNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap());
static PHONE_SIGNAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ .-]?)?\b\d{3}[ .-]?\d{3}[ .-]?\d{4}\b").unwrap()
});

/// Builds the seven fixed résumé categories.
pub fn default_categories(category_bonus: u32, identity_bonus: u32) -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new(CORE_RESUME_IDENTITY, CORE_IDENTITY_KEYWORDS, 10, category_bonus)
            .with_identity_bonus(identity_bonus),
        KeywordCategory::new("EDUCATION_SIGNALS", EDUCATION_KEYWORDS, 1, category_bonus),
        KeywordCategory::new("EXPERIENCE_SIGNALS", EXPERIENCE_KEYWORDS, 1, category_bonus),
        KeywordCategory::new("SKILLS_SIGNALS", SKILLS_KEYWORDS, 1, category_bonus),
        KeywordCategory::new("PROJECTS_ACHIEVEMENTS", PROJECTS_KEYWORDS, 1, category_bonus),
        KeywordCategory::new("CONTACT_IDENTITY", CONTACT_KEYWORDS, 1, category_bonus)
            .with_pattern("email address", EMAIL_SIGNAL_RE.clone())
            .with_pattern("phone number", PHONE_SIGNAL_RE.clone()),
        KeywordCategory::new("RESUME_SECTIONS", RESUME_SECTION_KEYWORDS, 1, category_bonus),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    /// Category name → keywords found in it (each keyword once).
    pub category_matches: BTreeMap<String, Vec<String>>,
    pub total_score: u32,
    /// Display names of matched categories, in evaluation order.
    pub detected_sections: Vec<String>,
}

/// Scores normalized text against the categories.
///
/// Accumulation is a plain sum per category, so the evaluation order never changes
/// `total_score` or `category_matches`.
pub fn score_keywords(text: &NormalizedText, categories: &[KeywordCategory]) -> KeywordScore {
    let mut result = KeywordScore::default();
    if text.is_empty() {
        return result;
    }

    for category in categories {
        let mut found = Vec::new();
        let mut occurrences = 0u32;

        for trigger in &category.triggers {
            let hits = trigger.occurrences(text.as_str());
            if hits > 0 {
                found.push(trigger.label().to_string());
                occurrences = occurrences.saturating_add(hits as u32);
            }
        }

        if found.is_empty() {
            continue;
        }

        let points = occurrences
            .saturating_mul(category.weight)
            .saturating_add(category.category_bonus)
            .saturating_add(category.identity_bonus);
        result.total_score = result.total_score.saturating_add(points);
        result.detected_sections.push(category.display_name());
        result.category_matches.insert(category.name.clone(), found);
    }

    result
}
