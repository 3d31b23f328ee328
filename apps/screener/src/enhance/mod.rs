//! Bullet enhancement: rewrites weak experience and project bullets.
//!
//! `EnhancementOracle` is the seam for an external rewriter (an LLM, typically).
//! `RuleBasedEnhancer` is the default backend and the fallback whenever an
//! oracle call fails.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ScreenError;
use crate::models::{SectionKind, SectionMap};
use crate::recommend::impact::check_impact;

/// Bullets at or under this many chars are left alone.
pub const MIN_BULLET_CHARS: usize = 20;

pub const QUANTIFY_PROMPT: &str = "[add a metric: % improved, time saved or users served]";

const WEAK_VERBS: &[(&str, &str)] = &[
    ("was responsible for", "managed"),
    ("worked on", "developed"),
    ("helped with", "contributed to"),
    ("did", "executed"),
    ("made", "created"),
    ("used", "utilized"),
];

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "analyzed",
    "architected",
    "built",
    "collaborated",
    "contributed",
    "created",
    "delivered",
    "designed",
    "developed",
    "enhanced",
    "established",
    "executed",
    "implemented",
    "improved",
    "increased",
    "led",
    "managed",
    "optimized",
    "organized",
    "reduced",
    "resolved",
    "streamlined",
    "transformed",
    "utilized",
];

const FILLER_PHRASES: &[&str] = &[
    "in order to",
    "was able to",
    "had the opportunity to",
    "was tasked with",
];

static WEAK_VERB_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    WEAK_VERBS
        .iter()
        .map(|(weak, strong)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(weak))).unwrap();
            (re, *strong)
        })
        .collect()
});

static FILLER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    FILLER_PHRASES
        .iter()
        .map(|p| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(p))).unwrap())
        .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static LEADING_I_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:i)\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedBullet {
    pub original: String,
    pub improved: String,
    pub section: SectionKind,
}

/// Rewrites a single bullet. Implement this to plug in an external rewriter.
///
/// Carried by the analyzer as `Arc<dyn EnhancementOracle>`.
#[async_trait]
pub trait EnhancementOracle: Send + Sync {
    async fn enhance(&self, bullet: &str, section: SectionKind) -> Result<String, ScreenError>;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedEnhancer: default backend, deterministic
// ────────────────────────────────────────────────────────────────────────────

/// Weak phrase → strong verb, prepend an action verb when missing, drop filler,
/// append a metric prompt when the bullet has no number.
pub struct RuleBasedEnhancer;

#[async_trait]
impl EnhancementOracle for RuleBasedEnhancer {
    async fn enhance(&self, bullet: &str, _section: SectionKind) -> Result<String, ScreenError> {
        Ok(self.improve(bullet))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn starts_with_action_verb(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .is_some_and(|w| ACTION_VERBS.contains(&w.as_str()))
}

impl RuleBasedEnhancer {
    pub fn improve(&self, bullet: &str) -> String {
        let mut text = strip_bullet(bullet).to_string();

        for (re, strong) in WEAK_VERB_PATTERNS.iter() {
            text = re.replace_all(&text, *strong).into_owned();
        }
        for re in FILLER_PATTERNS.iter() {
            text = re.replace_all(&text, "").into_owned();
        }
        text = LEADING_I_RE.replace(&text, "").into_owned();
        text = WHITESPACE_RE.replace_all(text.trim(), " ").into_owned();

        if !starts_with_action_verb(&text) {
            text = format!("Developed {}", lower_first(&text));
        }

        let mut improved = capitalize(&text);
        if !check_impact(&improved).quantified {
            improved = format!("{improved} {QUANTIFY_PROMPT}");
        }
        improved
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bullet collection
// ────────────────────────────────────────────────────────────────────────────

fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['•', '-', '*', '◦', '▪'])
        .trim()
}

/// Substantial bullets from projects then experience, in document order.
/// Sections that only hold a placeholder contribute nothing.
pub fn collect_bullets(sections: &SectionMap) -> Vec<(SectionKind, String)> {
    [SectionKind::Projects, SectionKind::Experience]
        .into_iter()
        .filter(|kind| sections.has_section(*kind))
        .flat_map(|kind| {
            sections
                .body(kind)
                .unwrap_or_default()
                .lines()
                .map(strip_bullet)
                .filter(|line| line.chars().count() > MIN_BULLET_CHARS)
                .map(move |line| (kind, line.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Runs every collected bullet through `oracle`, falling back to the rule-based
/// rewrite when the oracle fails. Unchanged bullets are dropped.
pub async fn enhance_bullets(
    sections: &SectionMap,
    oracle: &dyn EnhancementOracle,
) -> Vec<EnhancedBullet> {
    let fallback = RuleBasedEnhancer;
    let mut out = Vec::new();

    for (section, original) in collect_bullets(sections) {
        let improved = match oracle.enhance(&original, section).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => fallback.improve(&original),
            Err(e) => {
                warn!(code = e.code(), "Enhancement oracle failed, using rule-based rewrite: {e}");
                fallback.improve(&original)
            }
        };
        if improved != original {
            out.push(EnhancedBullet {
                original,
                improved,
                section,
            });
        }
    }

    debug!(count = out.len(), "Bullets enhanced");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_sections;

    struct FailingOracle;

    #[async_trait]
    impl EnhancementOracle for FailingOracle {
        async fn enhance(&self, _bullet: &str, _section: SectionKind) -> Result<String, ScreenError> {
            Err(ScreenError::Enhancement("upstream timeout".to_string()))
        }
    }

    struct ShoutingOracle;

    #[async_trait]
    impl EnhancementOracle for ShoutingOracle {
        async fn enhance(&self, bullet: &str, _section: SectionKind) -> Result<String, ScreenError> {
            Ok(bullet.to_uppercase())
        }
    }

    const RESUME: &str = "Experience\n\
        • Worked on the checkout service for the payments team\n\
        • Reduced p99 latency by 40% by caching pricing lookups\n\
        Projects\n\
        - I was responsible for a chess engine written in Rust";

    #[test]
    fn test_weak_phrase_replaced() {
        let improved = RuleBasedEnhancer.improve("Worked on the checkout service for the payments team");
        assert!(improved.starts_with("Developed the checkout service for the payments team"));
        assert!(improved.ends_with(QUANTIFY_PROMPT));
    }

    #[test]
    fn test_leading_i_and_responsibility() {
        let improved = RuleBasedEnhancer.improve("I was responsible for a chess engine written in Rust");
        assert!(improved.starts_with("Managed a chess engine written in Rust"));
    }

    #[test]
    fn test_action_verb_prepended() {
        let improved = RuleBasedEnhancer.improve("Payment reconciliation jobs for 3 regions");
        assert_eq!(improved, "Developed payment reconciliation jobs for 3 regions");
    }

    #[test]
    fn test_strong_quantified_bullet_kept_as_is() {
        let bullet = "Reduced p99 latency by 40% by caching pricing lookups";
        assert_eq!(RuleBasedEnhancer.improve(bullet), bullet);
    }

    #[test]
    fn test_no_substring_verb_rewrites() {
        // "used" inside "focused" must survive.
        let improved = RuleBasedEnhancer.improve("Led a focused rewrite of 2 billing jobs");
        assert_eq!(improved, "Led a focused rewrite of 2 billing jobs");
    }

    #[test]
    fn test_collect_bullets_order_and_stripping() {
        let sections = extract_sections(RESUME);
        let bullets = collect_bullets(&sections);
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0].0, SectionKind::Projects);
        assert_eq!(bullets[0].1, "I was responsible for a chess engine written in Rust");
        assert_eq!(bullets[1].0, SectionKind::Experience);
    }

    #[tokio::test]
    async fn test_rule_based_drops_unchanged() {
        let sections = extract_sections(RESUME);
        let enhanced = enhance_bullets(&sections, &RuleBasedEnhancer).await;
        assert_eq!(enhanced.len(), 2);
        assert!(enhanced
            .iter()
            .all(|b| !b.original.starts_with("Reduced p99")));
    }

    #[tokio::test]
    async fn test_failing_oracle_falls_back() {
        let sections = extract_sections(RESUME);
        let enhanced = enhance_bullets(&sections, &FailingOracle).await;
        let rule_based = enhance_bullets(&sections, &RuleBasedEnhancer).await;
        assert_eq!(enhanced, rule_based);
    }

    #[tokio::test]
    async fn test_oracle_output_used() {
        let sections = extract_sections(RESUME);
        let enhanced = enhance_bullets(&sections, &ShoutingOracle).await;
        assert_eq!(enhanced.len(), 3);
        assert_eq!(
            enhanced[0].improved,
            "I WAS RESPONSIBLE FOR A CHESS ENGINE WRITTEN IN RUST"
        );
    }
}
