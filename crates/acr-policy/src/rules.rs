// rules.rs — Typed rule values and the rule-set map.
//
// Policy rules in the store are open-ended JSON objects. Here they become
// a tagged value enum over a BTreeMap, which gives two things the resolver
// needs: typed access to the governance fields the conflict detector
// inspects, and deterministic iteration order for merging (a HashMap would
// make the effective policy depend on hash order).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single rule value.
///
/// `#[serde(untagged)]` makes this round-trip as plain JSON values, so a
/// stored rule object like `{"min_approvals": 3}` deserializes directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<RuleValue>),
    Map(BTreeMap<String, RuleValue>),
}

impl RuleValue {
    /// The boolean value, if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RuleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string value, if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The list items, if this is a List.
    pub fn as_list(&self) -> Option<&[RuleValue]> {
        match self {
            RuleValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The nested map, if this is a Map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, RuleValue>> {
        match self {
            RuleValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for RuleValue {
    fn from(v: bool) -> Self {
        RuleValue::Bool(v)
    }
}

impl From<i64> for RuleValue {
    fn from(v: i64) -> Self {
        RuleValue::Int(v)
    }
}

impl From<&str> for RuleValue {
    fn from(v: &str) -> Self {
        RuleValue::String(v.to_string())
    }
}

impl From<Vec<&str>> for RuleValue {
    fn from(items: Vec<&str>) -> Self {
        RuleValue::List(items.into_iter().map(RuleValue::from).collect())
    }
}

/// An ordered map of rule field → value.
///
/// Backed by a BTreeMap so iteration (and therefore merging and
/// serialization) is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, RuleValue>);

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a top-level field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RuleValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Look up a top-level field.
    pub fn get(&self, field: &str) -> Option<&RuleValue> {
        self.0.get(field)
    }

    /// Look up a dotted path (e.g., "controls.hitl.required"), descending
    /// through nested Map values.
    pub fn get_path(&self, path: &str) -> Option<&RuleValue> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_map()?.get(part)?;
        }
        Some(current)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleValue)> {
        self.0.iter()
    }

    /// Merge another rule set into this one, key by key. The incoming
    /// (child) value wins on collision; non-colliding keys from both sides
    /// survive. When both sides hold a Map for the same key, the maps are
    /// merged one level down; deeper nesting replaces wholesale.
    pub fn merge_from(&mut self, other: &RuleSet) {
        for (field, value) in &other.0 {
            match (self.0.get_mut(field), value) {
                (Some(RuleValue::Map(existing)), RuleValue::Map(incoming)) => {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => {
                    self.0.insert(field.clone(), value.clone());
                }
            }
        }
    }

    /// Append another rule set into this one. List fields become the union
    /// of both sides (duplicates eliminated, first-seen order); all other
    /// fields behave as merge.
    pub fn append_from(&mut self, other: &RuleSet) {
        for (field, value) in &other.0 {
            match (self.0.get_mut(field), value) {
                (Some(RuleValue::List(existing)), RuleValue::List(incoming)) => {
                    for item in incoming {
                        if !existing.contains(item) {
                            existing.push(item.clone());
                        }
                    }
                }
                (Some(RuleValue::Map(existing)), RuleValue::Map(incoming)) => {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                }
                _ => {
                    self.0.insert(field.clone(), value.clone());
                }
            }
        }
    }
}

impl FromIterator<(String, RuleValue)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, RuleValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, RuleValue)]) -> RuleSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn merge_child_wins_on_collision() {
        let mut acc = set(&[("a", 1i64.into()), ("b", 2i64.into())]);
        let child = set(&[("a", 9i64.into()), ("c", 3i64.into())]);
        acc.merge_from(&child);

        assert_eq!(acc.get("a"), Some(&RuleValue::Int(9)));
        assert_eq!(acc.get("b"), Some(&RuleValue::Int(2)));
        assert_eq!(acc.get("c"), Some(&RuleValue::Int(3)));
    }

    #[test]
    fn merge_combines_nested_maps_one_level() {
        let mut acc = RuleSet::new();
        let mut hitl = BTreeMap::new();
        hitl.insert("required".to_string(), RuleValue::Bool(true));
        hitl.insert("reviewers".to_string(), vec!["compliance"].into());
        acc.insert("hitl", RuleValue::Map(hitl));

        let mut child_hitl = BTreeMap::new();
        child_hitl.insert("required".to_string(), RuleValue::Bool(false));
        let child = set(&[("hitl", RuleValue::Map(child_hitl))]);

        acc.merge_from(&child);
        assert_eq!(acc.get_path("hitl.required"), Some(&RuleValue::Bool(false)));
        // Non-colliding nested key survives.
        assert!(acc.get_path("hitl.reviewers").is_some());
    }

    #[test]
    fn append_unions_lists_without_duplicates() {
        let mut acc = set(&[("blocked_actions", vec!["export", "share"].into())]);
        let child = set(&[("blocked_actions", vec!["export", "delete"].into())]);
        acc.append_from(&child);

        let items: Vec<&str> = acc
            .get("blocked_actions")
            .and_then(|v| v.as_list())
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(items, vec!["export", "share", "delete"]);
    }

    #[test]
    fn append_treats_scalars_as_merge() {
        let mut acc = set(&[("min_approvals", 3i64.into())]);
        let child = set(&[("min_approvals", 4i64.into())]);
        acc.append_from(&child);
        assert_eq!(acc.get("min_approvals"), Some(&RuleValue::Int(4)));
    }

    #[test]
    fn dotted_path_lookup() {
        let json = serde_json::json!({
            "controls": { "hitl": { "required": true } },
            "guardrails": { "blocked_actions": ["export"] }
        });
        let rules: RuleSet = serde_json::from_value(json).unwrap();

        assert_eq!(
            rules.get_path("controls.hitl.required"),
            Some(&RuleValue::Bool(true))
        );
        assert!(rules.get_path("controls.hitl.missing").is_none());
        assert!(rules.get_path("guardrails.blocked_actions").is_some());
    }

    #[test]
    fn round_trips_as_plain_json() {
        let json = serde_json::json!({
            "min_approvals": 3,
            "pii_handling": "strict",
            "cross_border_transfer": false,
            "allowed_ai_vendors": ["OpenAI", "Anthropic"]
        });
        let rules: RuleSet = serde_json::from_value(json.clone()).unwrap();
        let back = serde_json::to_value(&rules).unwrap();
        assert_eq!(json, back);
    }
}
