//! Analyzer: the end-to-end screening pipeline.
//!
//! raw text → classify (gate) → sections + contact + skills → advice, role
//! suggestions and bullet rewrites → `AnalysisReport`.
//!
//! # spawn_blocking pattern
//! Keyword scoring and non-résumé detection are independent CPU-bound passes over
//! the same normalized text. Each runs on its own blocking task and the two are
//! joined before the decision policy. Extraction runs as one more blocking task.

use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classify::keywords::score_keywords;
use crate::classify::non_resume::detect_non_resume;
use crate::classify::{normalize, rejection_notice, ClassificationResult, DocumentClassifier};
use crate::config::Config;
use crate::enhance::{enhance_bullets, EnhancedBullet, EnhancementOracle, RuleBasedEnhancer};
use crate::errors::ScreenError;
use crate::extract::skills::detect as detect_skills;
use crate::extract::{extract_sections, ContactExtractor, EntityRecognizer};
use crate::models::SectionMap;
use crate::recommend::{recommend, suggest_roles, Recommendations, RoleSuggestion};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub raw_text: String,
    pub filename: String,
    pub job_role: Option<String>,
    /// OCR quality score (0.0–1.0) reported by the extraction step, if any.
    pub extraction_quality: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub classification: ClassificationResult,
    pub sections: SectionMap,
    /// Final skill list, after role/filename fallbacks. Never empty.
    pub skills: Vec<String>,
    pub suggested_roles: Vec<RoleSuggestion>,
    pub recommendations: Recommendations,
    pub enhanced_bullets: Vec<EnhancedBullet>,
    pub extraction_quality: Option<f32>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String, ScreenError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScreenError::Internal(anyhow!("report serialization failed: {e}")))
    }
}

/// Shared, immutable screening pipeline. Cheap to clone; safe across concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    config: Config,
    classifier: Arc<DocumentClassifier>,
    contacts: ContactExtractor,
    oracle: Arc<dyn EnhancementOracle>,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        let classifier = Arc::new(DocumentClassifier::new(config.thresholds()));
        Self {
            config,
            classifier,
            contacts: ContactExtractor::new(),
            oracle: Arc::new(RuleBasedEnhancer),
        }
    }

    /// Wires the name-recognition collaborator. Ignored unless the
    /// `entity_recognition` capability is enabled.
    pub fn with_entity_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        if self.config.capabilities.entity_recognition {
            self.contacts = ContactExtractor::with_recognizer(recognizer);
        } else {
            debug!("Entity recognition capability disabled, recognizer not installed");
        }
        self
    }

    /// Wires an external bullet rewriter. Ignored unless the `llm_enhancement`
    /// capability is enabled; the rule-based enhancer stays in place otherwise.
    pub fn with_enhancement_oracle(mut self, oracle: Arc<dyn EnhancementOracle>) -> Self {
        if self.config.capabilities.llm_enhancement {
            self.oracle = oracle;
        } else {
            debug!("LLM enhancement capability disabled, oracle not installed");
        }
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }

    /// Classifies raw text, running scorer and detector concurrently.
    /// Produces the same verdict as `DocumentClassifier::classify`.
    pub async fn classify(
        &self,
        raw_text: &str,
        filename: &str,
    ) -> Result<ClassificationResult, ScreenError> {
        if let Some(rejected) = self.classifier.length_gate(raw_text) {
            return Ok(rejected);
        }

        let text = Arc::new(normalize(raw_text));

        let scoring = {
            let text = Arc::clone(&text);
            let classifier = Arc::clone(&self.classifier);
            tokio::task::spawn_blocking(move || score_keywords(&text, classifier.categories()))
        };
        let detection = {
            let classifier = Arc::clone(&self.classifier);
            tokio::task::spawn_blocking(move || detect_non_resume(&text, classifier.indicators()))
        };

        let (keyword_score, signal) = tokio::try_join!(scoring, detection).map_err(|e| {
            ScreenError::Internal(anyhow!("spawn_blocking failed in classification: {e}"))
        })?;

        Ok(self
            .classifier
            .decide(raw_text, filename, keyword_score, signal))
    }

    /// Full analysis. Short input fails with `InputTooShort`; a NON_RESUME verdict
    /// fails with `Rejected` carrying the rejection notice.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, ScreenError> {
        let AnalysisRequest {
            raw_text,
            filename,
            job_role,
            extraction_quality,
        } = request;

        if let Some(quality) = extraction_quality {
            if quality < self.config.min_extraction_quality {
                warn!(
                    quality,
                    minimum = self.config.min_extraction_quality,
                    "Low extraction quality, results may be unreliable"
                );
            }
        }

        let length = raw_text.trim().chars().count();
        if length < self.config.min_text_length {
            info!(length, filename = %filename, "Input rejected as too short");
            return Err(ScreenError::InputTooShort {
                length,
                minimum: self.config.min_text_length,
            });
        }

        let classification = self.classify(&raw_text, &filename).await?;
        if !classification.is_resume() {
            info!(
                filename = %filename,
                score = classification.total_score,
                "Document rejected as non-resume"
            );
            return Err(ScreenError::Rejected(Box::new(rejection_notice(
                &classification,
            ))));
        }

        let contacts = self.contacts.clone();
        let role = job_role.clone();
        let (sections, skills) = tokio::task::spawn_blocking(move || {
            let mut sections = extract_sections(&raw_text);
            sections.contact_info = contacts.extract(&raw_text, &filename);
            let skills = if sections.skills.is_empty() {
                detect_skills(&raw_text, role.as_deref(), &filename)
            } else {
                sections.skills.clone()
            };
            (sections, skills)
        })
        .await
        .map_err(|e| ScreenError::Internal(anyhow!("spawn_blocking failed in extraction: {e}")))?;

        let recommendations = recommend(&sections, &skills, job_role.as_deref());
        let suggested_roles = suggest_roles(&skills);
        let enhanced_bullets = enhance_bullets(&sections, self.oracle.as_ref()).await;

        info!(
            score = classification.total_score,
            confidence = classification.confidence,
            skills = skills.len(),
            enhanced = enhanced_bullets.len(),
            "Resume analyzed"
        );

        Ok(AnalysisReport {
            analysis_id: Uuid::new_v4(),
            created_at: Utc::now(),
            classification,
            sections,
            skills,
            suggested_roles,
            recommendations,
            enhanced_bullets,
            extraction_quality,
        })
    }
}
