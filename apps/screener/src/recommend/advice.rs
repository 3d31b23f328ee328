//! Improvement advice for an extracted résumé: missing components, content and
//! style issues, ATS formatting problems, prioritised suggestions and keywords.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{SectionKind, SectionMap};
use crate::recommend::impact::{has_metric, WEAK_PHRASES};

pub const MISSING_EMAIL: &str = "Contact information (email required)";
pub const MISSING_EDUCATION: &str = "Education section";
pub const MISSING_SKILLS: &str = "Technical skills section (minimum 3 skills)";
pub const MISSING_EXPERIENCE_OR_PROJECTS: &str = "Work experience or projects section";
pub const MISSING_PROJECTS: &str = "Projects section to showcase practical experience";
pub const MISSING_CERTIFICATIONS: &str = "Certifications section (if applicable)";

const MIN_SKILLS: usize = 3;
const FEW_SKILLS: usize = 5;
const GENERIC_SKILL_RATIO: f32 = 0.3;
const BRIEF_PROJECTS_CHARS: usize = 200;
const BRIEF_EXPERIENCE_CHARS: usize = 150;
const WEAK_PHRASE_LIMIT: usize = 2;

const GENERIC_SKILL_TERMS: &[&str] = &[
    "microsoft office",
    "word",
    "excel",
    "powerpoint",
    "communication",
    "teamwork",
];

const ATS_HOSTILE_CHARS: &[char] = &['©', '®', '™', '§', '¶'];

const BULLET_GLYPHS: &[char] = &['•', '-', '*', '◦', '▪'];

static STYLE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bi\s", "Use active voice instead of \"I\" statements"),
        (r"(?i)\bwas\s+\w+ing\b", "Replace passive voice with active verbs"),
        (r"(?i)\bhelped\s+(?:to|with)\b", "Use stronger action verbs than \"helped\""),
        (r"(?i)\bworked\s+on\b", "Be more specific than \"worked on\""),
        (r"(?i)\bresponsible\s+for\b", "Use action verbs instead of \"responsible for\""),
    ]
    .into_iter()
    .map(|(p, msg)| (Regex::new(p).unwrap(), msg))
    .collect()
});

static PAST_TENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b\w+ed\b").unwrap());
static PRESENT_TENSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:manage|develop|create|build|lead|work|design|implement)\b").unwrap()
});

static EMAIL_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PHONE_FORMAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\d{0,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Structure,
    Content,
    Formatting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritySuggestion {
    pub priority: Priority,
    pub category: SuggestionCategory,
    pub suggestion: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub missing_components: Vec<String>,
    pub issues: Vec<String>,
    pub priority_suggestions: Vec<PrioritySuggestion>,
    pub suggested_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Structure
// ────────────────────────────────────────────────────────────────────────────

pub fn missing_components(sections: &SectionMap, skills: &[String]) -> Vec<String> {
    let has_experience = sections.has_section(SectionKind::Experience);
    let has_projects = sections.has_section(SectionKind::Projects);

    let checks = [
        (!sections.contact_info.has_email(), MISSING_EMAIL),
        (!sections.has_section(SectionKind::Education), MISSING_EDUCATION),
        (skills.len() < MIN_SKILLS, MISSING_SKILLS),
        (!has_experience && !has_projects, MISSING_EXPERIENCE_OR_PROJECTS),
        (!has_projects, MISSING_PROJECTS),
        (
            !sections.has_section(SectionKind::Certifications),
            MISSING_CERTIFICATIONS,
        ),
    ];

    checks
        .iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, label)| label.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

pub fn content_issues(sections: &SectionMap, skills: &[String]) -> Vec<String> {
    let mut issues = Vec::new();

    if !skills.is_empty() {
        if skills.len() < FEW_SKILLS {
            issues.push(format!(
                "Only {} skills listed. Add more relevant technical skills.",
                skills.len()
            ));
        }
        let generic = skills
            .iter()
            .filter(|skill| {
                let lowered = skill.to_lowercase();
                GENERIC_SKILL_TERMS.iter().any(|g| lowered.contains(g))
            })
            .count();
        if generic as f32 > skills.len() as f32 * GENERIC_SKILL_RATIO {
            issues.push(
                "Too many generic skills. Focus on technical and specialized skills.".to_string(),
            );
        }
    }

    if sections.has_section(SectionKind::Projects) {
        let projects = &sections.projects;
        if projects.chars().count() < BRIEF_PROJECTS_CHARS {
            issues.push(
                "Project descriptions are too brief. Add more detail about your contributions."
                    .to_string(),
            );
        }
        let lowered = projects.to_lowercase();
        let weak = WEAK_PHRASES.iter().filter(|p| lowered.contains(*p)).count();
        if weak > WEAK_PHRASE_LIMIT {
            issues.push("Use stronger action verbs in project descriptions.".to_string());
        }
    }

    if sections.has_section(SectionKind::Experience) {
        let experience = &sections.experience;
        if experience.chars().count() < BRIEF_EXPERIENCE_CHARS {
            issues.push(
                "Work experience descriptions need more detail about achievements.".to_string(),
            );
        }
        if !has_metric(experience) {
            issues.push("Add quantifiable achievements to demonstrate impact.".to_string());
        }
    }

    issues
}

// ────────────────────────────────────────────────────────────────────────────
// Style and formatting
// ────────────────────────────────────────────────────────────────────────────

fn narrative_text(sections: &SectionMap) -> String {
    [SectionKind::Experience, SectionKind::Projects, SectionKind::Education]
        .into_iter()
        .filter(|kind| sections.has_section(*kind))
        .filter_map(|kind| sections.body(kind))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn style_issues(sections: &SectionMap) -> Vec<String> {
    let text = narrative_text(sections);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut issues: Vec<String> = STYLE_PATTERNS
        .iter()
        .filter(|(re, _)| re.is_match(&text))
        .map(|(_, msg)| msg.to_string())
        .collect();

    if PAST_TENSE_RE.is_match(&text) && PRESENT_TENSE_RE.is_match(&text) {
        issues.push("Maintain consistent verb tense throughout resume.".to_string());
    }

    // Only glyphs that open a line count; hyphens inside date ranges are not bullets.
    let glyph_kinds = BULLET_GLYPHS
        .iter()
        .filter(|glyph| {
            sections
                .raw
                .lines()
                .any(|line| line.trim_start().starts_with(**glyph))
        })
        .count();
    if glyph_kinds > 1 {
        issues.push("Use consistent bullet point formatting throughout resume.".to_string());
    }

    issues
}

pub fn formatting_issues(sections: &SectionMap) -> Vec<String> {
    let mut issues = Vec::new();
    let contact = &sections.contact_info;

    if contact.has_email() && !EMAIL_FORMAT_RE.is_match(&contact.email) {
        issues.push("Email format may not be ATS-friendly.".to_string());
    }
    if contact.has_phone() && !PHONE_FORMAT_RE.is_match(&contact.phone) {
        issues.push("Use standard phone number format (e.g., (555) 123-4567).".to_string());
    }
    if sections.raw.contains(ATS_HOSTILE_CHARS) {
        issues.push("Remove special characters that may not be ATS-compatible.".to_string());
    }
    if sections.raw.contains('|') || sections.raw.contains('\t') {
        issues.push("Avoid tables and complex formatting for better ATS compatibility.".to_string());
    }

    issues
}

// ────────────────────────────────────────────────────────────────────────────
// Prioritisation and keywords
// ────────────────────────────────────────────────────────────────────────────

pub fn prioritize(missing: &[String], issues: &[String]) -> Vec<PrioritySuggestion> {
    let mut out = Vec::new();

    for item in missing {
        let lowered = item.to_lowercase();
        let (category, impact) = if lowered.contains("email") || lowered.contains("contact") {
            (
                SuggestionCategory::Structure,
                "Essential for ATS parsing and recruiter contact",
            )
        } else if lowered.contains("skills") {
            (
                SuggestionCategory::Content,
                "Critical for keyword matching and skill assessment",
            )
        } else {
            continue;
        };
        out.push(PrioritySuggestion {
            priority: Priority::High,
            category,
            suggestion: item.clone(),
            impact: impact.to_string(),
        });
    }

    let tiers: [(Priority, SuggestionCategory, &[&str], &str); 2] = [
        (
            Priority::Medium,
            SuggestionCategory::Content,
            &["action", "quantifiable", "detail"],
            "Improves resume impact and readability",
        ),
        (
            Priority::Low,
            SuggestionCategory::Formatting,
            &["format", "tense", "bullet"],
            "Enhances professional appearance and ATS compatibility",
        ),
    ];
    for (priority, category, markers, impact) in tiers {
        for issue in issues {
            let lowered = issue.to_lowercase();
            if markers.iter().any(|m| lowered.contains(m)) {
                out.push(PrioritySuggestion {
                    priority,
                    category,
                    suggestion: issue.clone(),
                    impact: impact.to_string(),
                });
            }
        }
    }

    out
}

pub fn keyword_suggestions(job_role: Option<&str>) -> Vec<String> {
    let role = job_role.unwrap_or_default().to_lowercase();
    let keywords: &[&str] = if role.contains("software") || role.contains("developer") {
        &[
            "API development",
            "Version control (Git)",
            "Unit testing",
            "Code review",
            "Agile methodology",
            "Problem solving",
        ]
    } else if role.contains("data") {
        &[
            "Statistical analysis",
            "Data visualization",
            "Machine learning",
            "Data cleaning",
            "Predictive modeling",
            "Business intelligence",
        ]
    } else if role.contains("product") {
        &[
            "Product roadmap",
            "User research",
            "A/B testing",
            "Stakeholder management",
            "Market analysis",
            "Feature prioritization",
        ]
    } else {
        &[
            "Project management",
            "Team collaboration",
            "Problem solving",
            "Communication",
            "Leadership",
            "Process improvement",
        ]
    };
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Builds the full advice set. `skills` is the final skill list (after fallbacks).
pub fn recommend(sections: &SectionMap, skills: &[String], job_role: Option<&str>) -> Recommendations {
    let missing_components = missing_components(sections, skills);

    let mut issues = content_issues(sections, skills);
    issues.extend(style_issues(sections));
    issues.extend(formatting_issues(sections));

    let priority_suggestions = prioritize(&missing_components, &issues);

    Recommendations {
        missing_components,
        issues,
        priority_suggestions,
        suggested_keywords: keyword_suggestions(job_role),
    }
}
