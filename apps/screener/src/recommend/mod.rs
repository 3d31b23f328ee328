pub mod advice;
pub mod impact;
pub mod roles;

pub use advice::{recommend, Priority, PrioritySuggestion, Recommendations, SuggestionCategory};
pub use roles::{suggest_roles, RoleSuggestion};
