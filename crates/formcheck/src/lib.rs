//! # Formcheck
//!
//! Validation and state engine for an interactive sign-up form.
//!
//! The engine owns the state of a fixed set of fields. A presentation layer
//! reports edits, blurs and submit attempts, then re-renders from the
//! [`FormSnapshot`] it reads back. Rules come from [`formcheck_rules`].
//!
//! ## Example
//!
//! ```rust
//! use formcheck::{FieldName, FormEngine, FormValues, RuleOptions, RuleSet};
//!
//! let engine = FormEngine::new(
//!     RuleSet::signup(&RuleOptions::default()),
//!     |_values: FormValues| async { anyhow::Ok(()) },
//! );
//!
//! engine.edit_field(FieldName::Email, "not-an-email");
//! let snapshot = engine.snapshot();
//! assert_eq!(
//!     snapshot.fields.field(FieldName::Email).error.as_deref(),
//!     Some("Please enter a valid email address")
//! );
//! assert!(!snapshot.is_form_valid);
//! ```

pub mod engine;
pub mod field;
pub mod rules;
pub mod state;

pub use engine::{
    BoxFuture, FormEngine, FormSnapshot, SubmissionState, SubmitHandler, SubmitOutcome,
};
pub use field::{FieldName, FieldState, FieldStatus, UnknownField};
pub use rules::{RuleOptions, RuleSet, RuleSetBuilder};
pub use state::{confirm_password_error, FormState, FormValues, PASSWORDS_DO_NOT_MATCH};

pub use formcheck_rules as catalog;
