// Structure extraction over raw résumé text: sections, contact block, skills.
pub mod contact;
pub mod sections;
pub mod skills;

pub use contact::{extract_contact, ContactExtractor, EntityRecognizer};
pub use sections::extract_sections;
