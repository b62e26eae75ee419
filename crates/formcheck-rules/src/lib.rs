//! Formcheck Rules
//!
//! Single-message validation rules for interactive forms.
//! A field is checked against an ordered list of [`Rule`]s and reports the
//! message of the first rule that fails, never more than one.

pub mod catalog;
pub mod rule;
pub mod strength;

// Re-export the rule surface
pub use catalog::*;
pub use rule::{validate_field, Rule};
pub use strength::{score, PasswordStrength, Requirement, StrengthTone};
