//! Section boundary extractor: slices raw résumé text into named section bodies.
//!
//! Every non-header line after a header belongs to the most recent header's
//! section, so bodies are disjoint line ranges. A repeated header of the same
//! section is not a boundary: both blocks merge into one body. Each section
//! walks a ladder of strategies (header-bounded → pattern scan → placeholder),
//! returning at the first hit. The pattern scan reads the whole document, so it
//! only runs for sections that have no header at all; a header whose body
//! filters to nothing resolves straight to the placeholder.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extract::skills::detect_in;
use crate::models::{ContactInfo, SectionKind, SectionMap, SectionSource};

// ────────────────────────────────────────────────────────────────────────────
// Header vocabulary
// ────────────────────────────────────────────────────────────────────────────

const HEADERS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "qualifications",
            "educational qualifications",
            "academic qualifications",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "work history",
            "internships",
            "internship",
        ],
    ),
    (
        SectionKind::Skills,
        &["skills", "technical skills", "core competencies", "key skills"],
    ),
    (
        SectionKind::Projects,
        &["projects", "academic projects", "personal projects", "key projects"],
    ),
    (
        SectionKind::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses & certifications",
            "courses & certifications",
        ],
    ),
    (
        SectionKind::Summary,
        &[
            "summary",
            "objective",
            "professional summary",
            "career objective",
            "profile",
        ],
    ),
    (
        SectionKind::Achievements,
        &["achievements", "awards", "accomplishments", "honors"],
    ),
];

/// Classifies a line as a section header: trimmed, case-insensitive, optional trailing `:`.
pub fn header_kind(line: &str) -> Option<SectionKind> {
    let key = line.trim();
    let key = key.strip_suffix(':').unwrap_or(key).trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    HEADERS
        .iter()
        .find(|(_, names)| names.contains(&key.as_str()))
        .map(|(kind, _)| *kind)
}

// ────────────────────────────────────────────────────────────────────────────
// Per-section rules
// ────────────────────────────────────────────────────────────────────────────

/// Noise filter and fallbacks for one extracted section.
pub struct SectionRules {
    pub kind: SectionKind,
    /// Lines shorter than this (in chars) are treated as noise.
    pub min_len: usize,
    /// Terms (singular or plural) that mark a line as bleed-through from another section.
    deny: &'static Lazy<Regex>,
    pub limit: usize,
    pub placeholder: &'static str,
    pattern: &'static Lazy<Regex>,
}

static EDUCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|master|b\.?tech|m\.?tech|b\.?sc|m\.?sc|ph\.?d|mba|degree|diploma|university|college|institute)\b",
    )
    .unwrap()
});

static EXPERIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:intern|internship|engineer|developer|analyst|consultant|manager|worked|employed|pvt|ltd)\b",
    )
    .unwrap()
});

static PROJECTS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:project|built|developed|implemented|designed|created|github)\b").unwrap()
});

static CERTIFICATIONS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:certified|certification|certificate|coursera|udemy|nptel|credential)\b",
    )
    .unwrap()
});

fn deny_pattern(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})(?:s|es)?\b")).unwrap()
}

static EDUCATION_DENY: Lazy<Regex> =
    Lazy::new(|| deny_pattern(&["internship", "intern", "project", "certification"]));

static EXPERIENCE_DENY: Lazy<Regex> =
    Lazy::new(|| deny_pattern(&["cgpa", "gpa", "university", "certification", "course"]));

static PROJECTS_DENY: Lazy<Regex> =
    Lazy::new(|| deny_pattern(&["internship", "cgpa", "university"]));

static CERTIFICATIONS_DENY: Lazy<Regex> =
    Lazy::new(|| deny_pattern(&["internship", "cgpa", "project"]));

pub static SECTION_RULES: [SectionRules; 4] = [
    SectionRules {
        kind: SectionKind::Education,
        min_len: 15,
        deny: &EDUCATION_DENY,
        limit: 3,
        placeholder: "No education information found",
        pattern: &EDUCATION_PATTERN,
    },
    SectionRules {
        kind: SectionKind::Experience,
        min_len: 20,
        deny: &EXPERIENCE_DENY,
        limit: 4,
        placeholder: "No work experience found",
        pattern: &EXPERIENCE_PATTERN,
    },
    SectionRules {
        kind: SectionKind::Projects,
        min_len: 20,
        deny: &PROJECTS_DENY,
        limit: 4,
        placeholder: "No projects found",
        pattern: &PROJECTS_PATTERN,
    },
    SectionRules {
        kind: SectionKind::Certifications,
        min_len: 15,
        deny: &CERTIFICATIONS_DENY,
        limit: 3,
        placeholder: "No certifications found",
        pattern: &CERTIFICATIONS_PATTERN,
    },
];

impl SectionRules {
    fn keeps(&self, line: &str) -> bool {
        if line.chars().count() < self.min_len || header_kind(line).is_some() {
            return false;
        }
        !self.deny.is_match(line)
    }

    /// Applies the noise filter, deduplicates and truncates. `None` when nothing survives.
    fn clean<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Option<String> {
        let mut seen = HashSet::new();
        let kept: Vec<&str> = lines
            .map(str::trim)
            .filter(|line| self.keeps(line))
            .filter(|line| seen.insert(dedup_key(line)))
            .take(self.limit)
            .collect();
        (!kept.is_empty()).then(|| kept.join("\n"))
    }
}

fn dedup_key(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Boundaries
// ────────────────────────────────────────────────────────────────────────────

/// One header block: body lines are `start..end`, minus any same-section header lines inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub header_line: usize,
    pub start: usize,
    pub end: usize,
}

/// Computes header blocks in document order. Consecutive headers of the same
/// section collapse into the first one's span.
pub fn section_spans(lines: &[&str]) -> Vec<SectionSpan> {
    let headers: Vec<(usize, SectionKind)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| header_kind(line).map(|kind| (i, kind)))
        .collect();

    let mut spans = Vec::new();
    for (pos, &(idx, kind)) in headers.iter().enumerate() {
        if pos > 0 && headers[pos - 1].1 == kind {
            continue;
        }
        let end = headers[pos + 1..]
            .iter()
            .find(|(_, other)| *other != kind)
            .map_or(lines.len(), |(i, _)| *i);
        spans.push(SectionSpan {
            kind,
            header_line: idx,
            start: idx + 1,
            end,
        });
    }
    spans
}

/// Raw body lines of every block headed by `kind`, in document order.
pub fn body_lines<'a>(lines: &[&'a str], spans: &[SectionSpan], kind: SectionKind) -> Vec<&'a str> {
    spans
        .iter()
        .filter(|span| span.kind == kind)
        .flat_map(|span| lines[span.start..span.end].iter().copied())
        .filter(|line| header_kind(line).is_none())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction ladder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    HeaderBounded,
    PatternScan,
    Placeholder,
}

const LADDER: [Strategy; 3] = [
    Strategy::HeaderBounded,
    Strategy::PatternScan,
    Strategy::Placeholder,
];

impl Strategy {
    fn source(self) -> SectionSource {
        match self {
            Strategy::HeaderBounded => SectionSource::Header,
            Strategy::PatternScan => SectionSource::Pattern,
            Strategy::Placeholder => SectionSource::Placeholder,
        }
    }

    /// Pattern scanning is reserved for sections without a header; otherwise it
    /// would pull lines out of other sections' header blocks.
    fn applies(self, has_header: bool) -> bool {
        !(self == Strategy::PatternScan && has_header)
    }

    fn apply(self, lines: &[&str], spans: &[SectionSpan], rules: &SectionRules) -> Option<String> {
        match self {
            Strategy::HeaderBounded => {
                let cleaned = rules.clean(body_lines(lines, spans, rules.kind).into_iter());
                if cleaned.is_none() && spans.iter().any(|span| span.kind == rules.kind) {
                    debug!(section = rules.kind.as_str(), "header found but body empty after filtering");
                }
                cleaned
            }
            Strategy::PatternScan => rules.clean(
                lines
                    .iter()
                    .copied()
                    .filter(|line| rules.pattern.is_match(line)),
            ),
            Strategy::Placeholder => Some(rules.placeholder.to_string()),
        }
    }
}

fn extract_body(lines: &[&str], spans: &[SectionSpan], rules: &SectionRules) -> (String, SectionSource) {
    let has_header = spans.iter().any(|span| span.kind == rules.kind);
    for strategy in LADDER.into_iter().filter(|s| s.applies(has_header)) {
        if let Some(body) = strategy.apply(lines, spans, rules) {
            return (body, strategy.source());
        }
    }
    (rules.placeholder.to_string(), SectionSource::Placeholder)
}

/// Partitions `raw` into a [`SectionMap`]. Contact info is left at its "Not found"
/// defaults; the contact extractor fills it in.
pub fn extract_sections(raw: &str) -> SectionMap {
    let lines: Vec<&str> = raw.lines().collect();
    let spans = section_spans(&lines);

    let mut sources = BTreeMap::new();
    let mut bodies: BTreeMap<SectionKind, String> = BTreeMap::new();
    for rules in &SECTION_RULES {
        let (body, source) = extract_body(&lines, &spans, rules);
        sources.insert(rules.kind, source);
        bodies.insert(rules.kind, body);
    }

    let skills_block = body_lines(&lines, &spans, SectionKind::Skills).join("\n");
    let mut skills = detect_in(&skills_block);
    let mut skills_source = SectionSource::Header;
    if skills.is_empty() {
        skills = detect_in(raw);
        skills_source = SectionSource::Pattern;
    }
    if skills.is_empty() {
        skills_source = SectionSource::Placeholder;
    }
    sources.insert(SectionKind::Skills, skills_source);

    debug!(
        headers = spans.len(),
        skills = skills.len(),
        "sections extracted"
    );

    let mut take = |kind: SectionKind| bodies.remove(&kind).unwrap_or_default();
    SectionMap {
        contact_info: ContactInfo::default(),
        education: take(SectionKind::Education),
        experience: take(SectionKind::Experience),
        projects: take(SectionKind::Projects),
        certifications: take(SectionKind::Certifications),
        skills,
        raw: raw.to_string(),
        sources,
    }
}
