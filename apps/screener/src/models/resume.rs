use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not found";

/// Résumé sections the extractor recognises headers for. `Summary` and `Achievements`
/// only bound other sections; they have no body of their own in [`SectionMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Summary,
    Achievements,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Summary,
        SectionKind::Achievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Summary => "summary",
            SectionKind::Achievements => "achievements",
        }
    }
}

/// Which rung of the extraction ladder produced a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    Header,
    Pattern,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            email: NOT_FOUND.to_string(),
            phone: NOT_FOUND.to_string(),
            location: NOT_FOUND.to_string(),
            linkedin: NOT_FOUND.to_string(),
        }
    }
}

impl ContactInfo {
    pub fn has_email(&self) -> bool {
        self.email != NOT_FOUND
    }

    pub fn has_phone(&self) -> bool {
        self.phone != NOT_FOUND
    }
}

/// Structured view of a résumé. `raw` always holds the input text verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    pub contact_info: ContactInfo,
    pub education: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub projects: String,
    pub certifications: String,
    pub raw: String,
    pub sources: BTreeMap<SectionKind, SectionSource>,
}

impl SectionMap {
    pub fn body(&self, kind: SectionKind) -> Option<&str> {
        match kind {
            SectionKind::Education => Some(&self.education),
            SectionKind::Experience => Some(&self.experience),
            SectionKind::Projects => Some(&self.projects),
            SectionKind::Certifications => Some(&self.certifications),
            SectionKind::Skills | SectionKind::Summary | SectionKind::Achievements => None,
        }
    }

    /// True when the section holds extracted content rather than a placeholder.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Skills => !self.skills.is_empty(),
            _ => matches!(
                self.sources.get(&kind),
                Some(SectionSource::Header | SectionSource::Pattern)
            ),
        }
    }
}
