// File: formcheck-rules/src/rule.rs
// Purpose: Rule type and first-failing-rule field validation

use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single pass/fail predicate with the message shown when it fails
///
/// Cloning a rule shares the predicate, so one catalog value can be
/// attached to several fields.
#[derive(Clone)]
pub struct Rule {
    predicate: Predicate,
    message: String,
}

impl Rule {
    /// Create a rule from a predicate and its failure message
    pub fn new<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Returns true when `value` satisfies the rule
    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Validates `value` against `rules` in declared order
///
/// Returns the message of the first failing rule, or `None` when every rule
/// passes (including when there are no rules at all). Later rules are not
/// evaluated once one has failed.
pub fn validate_field<'a>(value: &str, rules: &'a [Rule]) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| !rule.check(value))
        .map(Rule::message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_no_rules_is_valid() {
        assert_eq!(validate_field("anything", &[]), None);
        assert_eq!(validate_field("", &[]), None);
    }

    #[test]
    fn test_first_failure_wins() {
        let rules = vec![
            Rule::new("too short", |v| v.len() >= 3),
            Rule::new("needs digit", |v| v.chars().any(|c| c.is_ascii_digit())),
        ];

        assert_eq!(validate_field("ab", &rules), Some("too short"));
        assert_eq!(validate_field("abc", &rules), Some("needs digit"));
        assert_eq!(validate_field("abc1", &rules), None);
    }

    #[test]
    fn test_short_circuits_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let rules = vec![
            Rule::new("always fails", |_| false),
            Rule::new("counted", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        ];

        assert_eq!(validate_field("x", &rules), Some("always fails"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cloned_rule_shares_predicate() {
        let rule = Rule::new("must be x", |v| v == "x");
        let copy = rule.clone();
        assert!(copy.check("x"));
        assert!(!copy.check("y"));
        assert_eq!(copy.message(), rule.message());
    }
}
