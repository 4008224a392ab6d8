//! Knowledge-base loading.
//!
//! A document is a JSON array of rule records (a `{ "rules": [...] }`
//! wrapper is also accepted). Each record is decoded and validated on its
//! own: a bad record is set aside in [`RuleSet::rejected`] and the rest of
//! the batch still loads. Only a document that is not JSON at all, or has no
//! rule array, fails as a whole.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::RuleLoadError;
use crate::rule::{RawRule, Rule};

/// A rule record that failed validation.
#[derive(Debug)]
pub struct RejectedRule {
    /// Position of the record in the source array.
    pub index: usize,
    /// The record's `id`, when it had a readable one.
    pub id: Option<String>,
    pub error: RuleLoadError,
}

/// Validated rules in source order, plus the records that were rejected.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub rejected: Vec<RejectedRule>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Parse and validate a knowledge-base document.
pub fn load_rules(json: &str) -> Result<RuleSet, RuleLoadError> {
    load_rules_from_value(serde_json::from_str(json)?)
}

/// Validate an already-parsed knowledge-base document.
pub fn load_rules_from_value(document: Value) -> Result<RuleSet, RuleLoadError> {
    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("rules") {
            Some(Value::Array(records)) => records,
            _ => return Err(RuleLoadError::NotAnArray("object")),
        },
        other => return Err(RuleLoadError::NotAnArray(value_kind(&other))),
    };

    let mut set = RuleSet::default();
    let mut seen = HashSet::new();
    for (index, record) in records.into_iter().enumerate() {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string());
        let validated = serde_json::from_value::<RawRule>(record)
            .map_err(|e| RuleLoadError::Malformed {
                index,
                message: e.to_string(),
            })
            .and_then(|raw| raw.validate(index))
            .and_then(|rule| {
                if seen.insert(rule.id.clone()) {
                    Ok(rule)
                } else {
                    Err(RuleLoadError::DuplicateId(rule.id))
                }
            });
        match validated {
            Ok(rule) => set.rules.push(rule),
            Err(error) => {
                tracing::warn!(index, id = ?id, %error, "rejected rule");
                set.rejected.push(RejectedRule { index, id, error });
            }
        }
    }

    tracing::debug!(
        loaded = set.rules.len(),
        rejected = set.rejected.len(),
        "loaded rule set"
    );
    Ok(set)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_valid_rules_in_order() {
        let set = load_rules(
            r#"[
                {"id":"b","name":"B","condition":{"requiredStars":["紫微"]},"consensus_label":"consensus"},
                {"id":"a","name":"A","condition":{},"consensus_label":"disputed"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<_> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(set.rejected.is_empty());
        assert!(set.get("a").is_some());
    }

    #[test]
    fn bad_rule_does_not_fail_batch() {
        let set = load_rules(
            r#"[
                {"id":"ok","condition":{"requiredStars":["天府"]},"consensus_label":"consensus"},
                {"id":"typo","condition":{"requiredStars":["天腐"]},"consensus_label":"consensus"},
                {"name":"no id","consensus_label":"consensus"},
                42
            ]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected.len(), 3);
        assert_eq!(set.rejected[0].id.as_deref(), Some("typo"));
        assert!(matches!(
            set.rejected[0].error,
            RuleLoadError::UnknownStar { .. }
        ));
        assert!(matches!(
            set.rejected[1].error,
            RuleLoadError::Malformed { index: 2, .. }
        ));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let set = load_rules(
            r#"[
                {"id":"r","name":"first","consensus_label":"consensus"},
                {"id":"r","name":"second","consensus_label":"consensus"}
            ]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.rules[0].name, "first");
        assert!(matches!(set.rejected[0].error, RuleLoadError::DuplicateId(_)));
    }

    #[test]
    fn wrapper_object_accepted() {
        let set = load_rules(r#"{"rules":[{"id":"x","consensus_label":"consensus"}]}"#).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn document_errors_are_fatal() {
        assert!(matches!(load_rules("not json"), Err(RuleLoadError::Json(_))));
        assert!(matches!(
            load_rules(r#""rules""#),
            Err(RuleLoadError::NotAnArray("string"))
        ));
        assert!(matches!(
            load_rules(r#"{"data":[]}"#),
            Err(RuleLoadError::NotAnArray("object"))
        ));
    }

    #[test]
    fn empty_array_is_empty_set() {
        let set = load_rules("[]").unwrap();
        assert!(set.is_empty());
    }
}
