// File: formcheck/src/state.rs
// Purpose: Form state record and its pure transitions (edit, blur, full validation)

use formcheck_rules::validate_field;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::field::{FieldName, FieldState};
use crate::rules::RuleSet;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Flattened `field -> raw value` mapping handed to the submit handler
pub type FormValues = BTreeMap<FieldName, String>;

/// Cross-field check between confirm-password and password
///
/// An empty confirmation is left to the field's own rules.
pub fn confirm_password_error(confirm: &str, password: &str) -> Option<&'static str> {
    (!confirm.is_empty() && confirm != password).then_some(PASSWORDS_DO_NOT_MATCH)
}

/// One [`FieldState`] per field; the key set is fixed by the type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub first_name: FieldState,
    pub last_name: FieldState,
    pub email: FieldState,
    pub password: FieldState,
    pub confirm_password: FieldState,
    pub phone: FieldState,
    pub website: FieldState,
}

impl FormState {
    pub fn field(&self, name: FieldName) -> &FieldState {
        match name {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
            FieldName::Phone => &self.phone,
            FieldName::Website => &self.website,
        }
    }

    fn field_mut(&mut self, name: FieldName) -> &mut FieldState {
        match name {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Email => &mut self.email,
            FieldName::Password => &mut self.password,
            FieldName::ConfirmPassword => &mut self.confirm_password,
            FieldName::Phone => &mut self.phone,
            FieldName::Website => &mut self.website,
        }
    }

    /// Fields in declared order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldState)> + '_ {
        FieldName::ALL.into_iter().map(move |name| (name, self.field(name)))
    }

    pub fn values(&self) -> FormValues {
        self.iter()
            .map(|(name, field)| (name, field.value.clone()))
            .collect()
    }

    /// Error for `value` in field `name`: rules first, then the mismatch
    /// override for confirm-password against `password`
    fn evaluate(rules: &RuleSet, name: FieldName, value: &str, password: &str) -> Option<String> {
        if name == FieldName::ConfirmPassword {
            if let Some(mismatch) = confirm_password_error(value, password) {
                return Some(mismatch.to_string());
            }
        }
        validate_field(value, rules.rules_for(name)).map(str::to_string)
    }

    /// Applies a user edit to `name`
    ///
    /// Editing the password also re-checks a non-empty confirmation, without
    /// touching its value or touched flag. No other field changes.
    pub fn apply_edit(&mut self, rules: &RuleSet, name: FieldName, value: String) {
        let error = Self::evaluate(rules, name, &value, &self.password.value);

        if name == FieldName::Password && !self.confirm_password.value.is_empty() {
            let mismatch = confirm_password_error(&self.confirm_password.value, &value);
            self.confirm_password
                .set_error(mismatch.map(str::to_string));
        }

        let field = self.field_mut(name);
        field.value = value;
        field.touched = true;
        field.set_error(error);
    }

    /// Marks `name` as touched, leaving value and error alone
    pub fn apply_blur(&mut self, name: FieldName) {
        self.field_mut(name).touched = true;
    }

    /// Every field re-validated from its current value and marked touched
    pub fn validated(&self, rules: &RuleSet) -> FormState {
        let mut next = self.clone();
        for name in FieldName::ALL {
            let error = Self::evaluate(rules, name, &self.field(name).value, &self.password.value);
            let field = next.field_mut(name);
            field.touched = true;
            field.set_error(error);
        }
        next
    }

    /// Form-level validity: required fields valid and non-blank, optional
    /// fields either empty or valid
    pub fn is_submittable(&self) -> bool {
        self.iter().all(|(name, field)| {
            if name.is_required() {
                field.valid && !field.value.trim().is_empty()
            } else {
                field.value.is_empty() || field.valid
            }
        })
    }
}
