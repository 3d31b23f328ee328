//! Skills detector: fixed vocabulary match with role and filename fallbacks.
//!
//! Matching runs over raw text rather than `NormalizedText`, since
//! normalization blanks the `+` and `#` that `C++` and `C#` depend on.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::classify::normalize::{word_matchers, WordMatcher};

/// Canonical vocabulary, in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C++",
    "C#",
    "React",
    "Node.js",
    "Angular",
    "Vue.js",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "Linux",
    "MacOS",
    "Machine Learning",
    "Data Science",
    "AI",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Flask",
    "Django",
    "Spring Boot",
    "REST API",
    "GraphQL",
    "Redis",
    "Elasticsearch",
    "Jenkins",
    "CI/CD",
    "Agile",
    "Scrum",
    "DevOps",
    "Microservices",
    "Blockchain",
    "Unreal Engine",
    "Photoshop",
    "Illustrator",
    "Figma",
    "Adobe XD",
    "Tableau",
    "Power BI",
    "Excel",
    "R",
    "MATLAB",
    "Scala",
    "Rust",
    "Swift",
    "Kotlin",
    "PHP",
    "Ruby",
];

// ────────────────────────────────────────────────────────────────────────────
// Fallback buckets
// ────────────────────────────────────────────────────────────────────────────

pub const FULLSTACK_SKILLS: &[&str] =
    &["JavaScript", "React", "Node.js", "SQL", "MongoDB", "REST API"];
pub const DATA_SKILLS: &[&str] = &[
    "Python",
    "SQL",
    "Machine Learning",
    "Pandas",
    "NumPy",
    "TensorFlow",
];
pub const FRONTEND_SKILLS: &[&str] =
    &["JavaScript", "React", "HTML", "CSS", "TypeScript", "Node.js"];
pub const BACKEND_SKILLS: &[&str] = &["Python", "Java", "Node.js", "SQL", "REST API", "Docker"];
pub const DEVOPS_SKILLS: &[&str] = &["Docker", "Kubernetes", "AWS", "Linux", "CI/CD", "Terraform"];
pub const MOBILE_SKILLS: &[&str] = &["Swift", "Kotlin", "Java", "React Native", "Flutter"];
pub const GENERIC_SKILLS: &[&str] = &[
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Time Management",
    "Leadership",
];

/// Role hints checked in order; the first bucket with a hit wins. Full-stack goes
/// first so "full stack developer" never lands in a narrower bucket.
const ROLE_BUCKETS: &[(&[&str], &[&str])] = &[
    (&["full stack", "fullstack", "full-stack", "mern", "mean"], FULLSTACK_SKILLS),
    (
        &["data", "machine learning", "ml", "ai", "analyst", "scientist"],
        DATA_SKILLS,
    ),
    (
        &["frontend", "front end", "front-end", "ui", "web designer"],
        FRONTEND_SKILLS,
    ),
    (&["backend", "back end", "back-end", "api", "server"], BACKEND_SKILLS),
    (
        &["devops", "cloud", "sre", "infrastructure", "platform"],
        DEVOPS_SKILLS,
    ),
    (&["mobile", "android", "ios", "app developer"], MOBILE_SKILLS),
];

/// Skills this short need a separator on both sides, so "R&D" is not "R".
const SHORT_SKILL_CHARS: usize = 2;

/// One case-insensitive pattern per vocabulary entry, in vocabulary order.
///
/// Longer skills only need a non-alphanumeric neighbour (`C++,` and `Node.js)`
/// both match); short ones need whitespace, list punctuation or a line edge.
static SKILL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let boundary = if skill.chars().count() <= SHORT_SKILL_CHARS {
                r"[\s,;:|/()]"
            } else {
                r"[^\p{L}\p{N}]"
            };
            Regex::new(&format!(
                r"(?i)(?:^|{boundary}){}(?:$|{boundary})",
                regex::escape(skill)
            ))
            .unwrap()
        })
        .collect()
});

static ROLE_HINTS: Lazy<Vec<(Vec<WordMatcher>, &'static [&'static str])>> = Lazy::new(|| {
    ROLE_BUCKETS
        .iter()
        .map(|(keys, skills)| (word_matchers(keys), *skills))
        .collect()
});

/// Vocabulary pass alone: every vocabulary skill mentioned in `text`, in vocabulary order.
pub fn detect_in(text: &str) -> Vec<String> {
    SKILL_VOCABULARY
        .iter()
        .zip(SKILL_PATTERNS.iter())
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect()
}

/// Picks the bucket whose hint words appear in `hint` (lowercased, word-bounded).
pub fn bucket_for(hint: &str) -> Option<&'static [&'static str]> {
    let hint = hint.to_lowercase();
    ROLE_HINTS
        .iter()
        .find(|(keys, _)| keys.iter().any(|key| key.is_match(&hint)))
        .map(|(_, skills)| *skills)
}

fn filename_hint(filename: &str) -> String {
    filename
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn owned(skills: &[&str]) -> Vec<String> {
    skills.iter().map(|s| s.to_string()).collect()
}

/// Detects skills in `text`, never returning an empty list.
///
/// Ladder: vocabulary match → job-role bucket → filename bucket → generic soft skills.
pub fn detect(text: &str, job_role: Option<&str>, filename: &str) -> Vec<String> {
    let found = detect_in(text);
    if !found.is_empty() {
        return found;
    }

    if let Some(bucket) = job_role.and_then(bucket_for) {
        debug!(job_role = ?job_role, "no vocabulary skills, using job-role bucket");
        return owned(bucket);
    }

    if let Some(bucket) = bucket_for(&filename_hint(filename)) {
        debug!(filename, "no vocabulary skills, using filename bucket");
        return owned(bucket);
    }

    debug!("no skill signal at all, using generic skills");
    owned(GENERIC_SKILLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_in_keeps_vocabulary_order() {
        assert_eq!(detect_in("SQL, Python"), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_detect_in_symbol_skills() {
        let skills = detect_in("Fluent in C++ and C#, shipped Node.js services.");
        assert_eq!(skills, vec!["C++", "C#", "Node.js"]);
    }

    #[test]
    fn test_no_partial_word_hits() {
        // "JavaScript" must not also report "Java"; "PostgreSQL" must not report "SQL".
        let skills = detect_in("javascript and postgresql");
        assert_eq!(skills, vec!["JavaScript", "PostgreSQL"]);
    }

    #[test]
    fn test_detect_in_no_duplicates() {
        let skills = detect_in("Python python PYTHON");
        assert_eq!(skills, vec!["Python"]);
    }

    #[test]
    fn test_short_skills_need_separators() {
        assert!(detect_in("Led R&D for the payments group, A/B testing").is_empty());
        assert_eq!(detect_in("Languages: R, Python"), vec!["Python", "R"]);
        assert_eq!(detect_in("Interested in AI/ML"), vec!["AI"]);
    }

    #[test]
    fn test_frontend_role_fallback() {
        let skills = detect(
            "Enthusiastic team player.",
            Some("Frontend Developer"),
            "cv.pdf",
        );
        assert_eq!(
            skills,
            vec!["JavaScript", "React", "HTML", "CSS", "TypeScript", "Node.js"]
        );
    }

    #[test]
    fn test_full_stack_beats_narrower_buckets() {
        let skills = detect("nothing here", Some("Full Stack Engineer"), "cv.pdf");
        assert_eq!(skills, owned(FULLSTACK_SKILLS));
    }

    #[test]
    fn test_filename_fallback() {
        let skills = detect("nothing here", None, "jane_devops_resume.pdf");
        assert_eq!(skills, owned(DEVOPS_SKILLS));
    }

    #[test]
    fn test_generic_fallback_never_empty() {
        let skills = detect("", None, "document.pdf");
        assert_eq!(skills, owned(GENERIC_SKILLS));
        assert!(!detect("", Some(""), "").is_empty());
    }

    #[test]
    fn test_vocabulary_match_wins_over_role() {
        let skills = detect("Built APIs in Rust", Some("Frontend Developer"), "cv.pdf");
        assert_eq!(skills, vec!["Rust"]);
    }
}
