// File: formcheck/src/rules.rs
// Purpose: Per-field rule lists, fixed at engine construction

use formcheck_rules::{email, max_length, min_length, password, phone, required, url, Rule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::FieldName;

/// Ordered rules for each field
///
/// A field without an entry has no rules and is always valid by rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<FieldName, Vec<Rule>>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn rules_for(&self, name: FieldName) -> &[Rule] {
        self.rules.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The sign-up form's rules
    pub fn signup(options: &RuleOptions) -> Self {
        let name_rules = |label: &str| {
            let mut rules = vec![required(label), min_length(options.name_min_length, label)];
            if let Some(max) = options.name_max_length {
                rules.push(max_length(max, label));
            }
            rules
        };

        Self::builder()
            .field(FieldName::FirstName, name_rules("First name"))
            .field(FieldName::LastName, name_rules("Last name"))
            .field(FieldName::Email, [required("Email"), email()])
            .field(FieldName::Password, [required("Password"), password()])
            .field(FieldName::ConfirmPassword, [required("Confirm password")])
            .field(FieldName::Phone, [required("Phone number"), phone()])
            .field(FieldName::Website, [url()])
            .build()
    }
}

#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: BTreeMap<FieldName, Vec<Rule>>,
}

impl RuleSetBuilder {
    /// Sets the rules for `name`, replacing any set earlier
    pub fn field(mut self, name: FieldName, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.insert(name, rules.into_iter().collect());
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}

/// Tunables for [`RuleSet::signup`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,

    #[serde(default)]
    pub name_max_length: Option<usize>,
}

fn default_name_min_length() -> usize {
    2
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            name_max_length: None,
        }
    }
}
