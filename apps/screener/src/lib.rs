pub mod classify;
pub mod config;
pub mod enhance;
pub mod errors;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod recommend;
pub mod telemetry;

pub use classify::{ClassificationResult, DocumentClassifier, DocumentType, RejectionNotice};
pub use config::{Capabilities, Config};
pub use enhance::{EnhancedBullet, EnhancementOracle, RuleBasedEnhancer};
pub use errors::ScreenError;
pub use extract::EntityRecognizer;
pub use models::{ContactInfo, SectionKind, SectionMap};
pub use pipeline::{AnalysisReport, AnalysisRequest, Analyzer};
