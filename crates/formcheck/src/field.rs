// File: formcheck/src/field.rs
// Purpose: Closed set of form fields and per-field state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every field the form knows about, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    Website,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Password,
        FieldName::ConfirmPassword,
        FieldName::Phone,
        FieldName::Website,
    ];

    /// Wire name, as used in submitted values and serialized snapshots
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
            FieldName::Phone => "phone",
            FieldName::Website => "website",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldName::FirstName => "First Name",
            FieldName::LastName => "Last Name",
            FieldName::Email => "Email Address",
            FieldName::Password => "Password",
            FieldName::ConfirmPassword => "Confirm Password",
            FieldName::Phone => "Phone Number",
            FieldName::Website => "Website",
        }
    }

    /// Website is the only optional field
    pub const fn is_required(self) -> bool {
        !matches!(self, FieldName::Website)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name that is not part of the form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// How a field should be presented, derived from its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Neutral,
    Error,
    Success,
}

/// State of one field
///
/// `valid` always mirrors `error.is_none()` once the field has been
/// validated. The pristine state is the exception: no error, not valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldState {
    pub value: String,
    pub error: Option<String>,
    pub touched: bool,
    pub valid: bool,
}

impl FieldState {
    pub(crate) fn set_error(&mut self, error: Option<String>) {
        self.valid = error.is_none();
        self.error = error;
    }

    pub fn status(&self) -> FieldStatus {
        if !self.touched {
            FieldStatus::Neutral
        } else if self.error.is_some() {
            FieldStatus::Error
        } else if self.valid && !self.value.is_empty() {
            FieldStatus::Success
        } else {
            FieldStatus::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>(), Ok(name));
        }
    }

    #[test]
    fn test_unknown_field_is_typed_error() {
        let err = "nickname".parse::<FieldName>().unwrap_err();
        assert_eq!(err, UnknownField("nickname".to_string()));
        assert_eq!(err.to_string(), "unknown form field: \"nickname\"");
        assert!("FirstName".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_only_website_is_optional() {
        let optional: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(|name| !name.is_required())
            .collect();
        assert_eq!(optional, vec![FieldName::Website]);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FieldName::ConfirmPassword).unwrap();
        assert_eq!(json, "\"confirmPassword\"");
        let back: FieldName = serde_json::from_str("\"firstName\"").unwrap();
        assert_eq!(back, FieldName::FirstName);
    }

    #[test]
    fn test_status() {
        let mut field = FieldState::default();
        assert_eq!(field.status(), FieldStatus::Neutral);

        field.touched = true;
        field.set_error(Some("Email is required".to_string()));
        assert_eq!(field.status(), FieldStatus::Error);

        field.value = "a@b.com".to_string();
        field.set_error(None);
        assert!(field.valid);
        assert_eq!(field.status(), FieldStatus::Success);

        // Valid but empty (optional field) stays neutral
        field.value.clear();
        assert_eq!(field.status(), FieldStatus::Neutral);
    }
}
