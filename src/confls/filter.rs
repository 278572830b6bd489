//! Filter expressions.
//!
//! A [`FilterSet`] is the `--filter key=value` arguments of one invocation. It stores
//! them as given and never interprets the vocabulary: which keys exist, and what they
//! mean, is up to the source that answers the query. The convention sources follow is
//! that values for the same key are alternatives (OR) and distinct keys must all hold
//! (AND).

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single `key=value` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    pub key: String,
    pub value: String,
}

impl FromStr for FilterExpr {
    type Err = String;

    /// Splits on the first `=`, so values may themselves contain `=` (`label=env=prod`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((key, value)) = s.split_once('=') else {
            return Err("bad format of filter (expected name=value)".to_string());
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err("bad format of filter (expected name=value)".to_string());
        }
        Ok(Self {
            key,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An ordered multiset of filter expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    exprs: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, expr: FilterExpr) {
        self.exprs.push(expr);
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.add(FilterExpr {
            key: key.to_lowercase(),
            value: value.to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Expressions in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &FilterExpr> {
        self.exprs.iter()
    }

    /// Distinct keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.grouped().into_keys().collect()
    }

    /// Values given for `key`, in argument order.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.exprs
            .iter()
            .filter(|e| e.key == key)
            .map(|e| e.value.as_str())
            .collect()
    }

    /// Evaluates the set against a per-expression predicate: every key must have at
    /// least one matching value.
    pub fn matches_with<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.grouped()
            .into_iter()
            .all(|(key, values)| values.iter().any(|value| pred(key, value)))
    }

    /// The canonical query form: `{"key": {"value": true}}`, keys and values sorted.
    ///
    /// Independent of argument order and of repeated identical expressions.
    pub fn to_query(&self) -> Value {
        let mut out = Map::new();
        for (key, mut values) in self.grouped() {
            values.sort_unstable();
            let mut set = Map::new();
            for value in values {
                set.insert(value.to_string(), Value::Bool(true));
            }
            out.insert(key.to_string(), Value::Object(set));
        }
        Value::Object(out)
    }

    fn grouped(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for expr in &self.exprs {
            let values = groups.entry(expr.key.as_str()).or_default();
            if !values.contains(&expr.value.as_str()) {
                values.push(expr.value.as_str());
            }
        }
        groups
    }
}

impl FromIterator<FilterExpr> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterExpr>>(iter: I) -> Self {
        Self {
            exprs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}
