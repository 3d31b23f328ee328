use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactGap {
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCheck {
    pub quantified: bool,
    pub gaps: Vec<ImpactGap>,
}

pub const WEAK_PHRASES: &[&str] = &[
    "worked on",
    "helped with",
    "was involved in",
    "participated in",
    "was responsible for",
    "assisted",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "many",
    "numerous",
    "various",
    "several",
];

// "30%", "$2M", "10k users", "3x faster", "2 million customers"
static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s?(?:%|k\b|x\b|million|billion|users|customers|ms\b)|[$€£₹]\s?\d")
        .unwrap()
});

/// True when the text carries any number at all.
pub fn has_number(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// True when the text carries a metric with a unit, not just a year or a count.
pub fn has_metric(text: &str) -> bool {
    METRIC_RE.is_match(text)
}

/// Checks a single résumé bullet for quantified impact.
///
/// A bullet passes when it carries any number. A failing bullet is tagged with
/// the first weak phrase or vague scale word it leans on, or a generic gap.
pub fn check_impact(text: &str) -> ImpactCheck {
    if has_number(text) {
        return ImpactCheck {
            quantified: true,
            gaps: vec![],
        };
    }

    let lowered = text.to_lowercase();
    let mut gaps = Vec::new();

    if let Some(phrase) = WEAK_PHRASES.iter().find(|p| lowered.contains(*p)) {
        gaps.push(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Leans on weak phrase '{phrase}' without a measurable outcome"),
            suggestion: format!(
                "Replace '{phrase}' with an action verb and state what changed, by how much"
            ),
        });
    }

    if let Some(word) = VAGUE_SCALE_WORDS.iter().find(|w| lowered.contains(*w)) {
        gaps.push(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Uses vague scale word '{word}' without a number"),
            suggestion: format!("Replace '{word}' with a figure: e.g. '40%', '3x', '12 services'"),
        });
    }

    if gaps.is_empty() {
        gaps.push(ImpactGap {
            bullet: text.to_string(),
            reason: "No quantified outcome found".to_string(),
            suggestion: "Add a number: percentage, time saved, users served, or team size"
                .to_string(),
        });
    }

    ImpactCheck {
        quantified: false,
        gaps,
    }
}

/// Checks every bullet; passes only when all of them are quantified.
pub fn check_bullets<S: AsRef<str>>(bullets: &[S]) -> ImpactCheck {
    let mut gaps = Vec::new();
    for bullet in bullets {
        gaps.extend(check_impact(bullet.as_ref()).gaps);
    }
    ImpactCheck {
        quantified: gaps.is_empty(),
        gaps,
    }
}
