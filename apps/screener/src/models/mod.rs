pub mod resume;

pub use resume::{ContactInfo, SectionKind, SectionMap, SectionSource, NOT_FOUND};
