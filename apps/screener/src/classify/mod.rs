// Document classification: normalize → keyword score + non-résumé signal → verdict.
// Every stage is a pure function over immutable tables.

pub mod classifier;
pub mod keywords;
pub mod non_resume;
pub mod normalize;

pub use classifier::{
    rejection_notice, ClassificationResult, ClassifierThresholds, DocumentClassifier,
    DocumentType, RejectionNotice,
};
pub use normalize::{normalize, NormalizedText};
