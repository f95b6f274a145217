/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime values produced by evaluating template nodes.
//!
//! A [`RuntimeValue`] is what a scope hands out and what object paths walk
//! through. Structured objects are shared behind an [`Arc`] so a value can
//! be cloned freely while path resolution moves from one step to the next.

use crate::object::StructuredObject;
use std::collections::HashMap;
use std::sync::Arc;

/// A value flowing through template evaluation.
#[derive(Debug, Clone, Default)]
pub enum RuntimeValue {
    /// A string value.
    String(String),

    /// An integer value.
    Integer(i64),

    /// A floating point value.
    Float(f64),

    /// A boolean value.
    Bool(bool),

    /// A structured object with getters and fields.
    Object(Arc<dyn StructuredObject>),

    /// An associative collection of string keys to values.
    Map(HashMap<String, RuntimeValue>),

    /// An ordered sequence of values.
    List(Vec<RuntimeValue>),

    /// A null/absent value.
    #[default]
    Null,
}

impl RuntimeValue {
    /// The blank value an unresolvable object path evaluates to.
    pub fn empty() -> Self {
        RuntimeValue::String(String::new())
    }

    /// Wrap a structured object.
    pub fn object(object: impl StructuredObject + 'static) -> Self {
        RuntimeValue::Object(Arc::new(object))
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeValue::String(_) => "string",
            RuntimeValue::Integer(_) => "integer",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::Bool(_) => "boolean",
            RuntimeValue::Object(_) => "object",
            RuntimeValue::Map(_) => "map",
            RuntimeValue::List(_) => "list",
            RuntimeValue::Null => "null",
        }
    }

    /// Render this value as a string for output.
    ///
    /// - String: returned as-is
    /// - Integer/Float: decimal representation
    /// - Bool: "true" or "" (empty for false)
    /// - Object: its display form, or "" when it has none
    /// - List: concatenation of rendered elements
    /// - Map, Null: ""
    pub fn render(&self) -> String {
        match self {
            RuntimeValue::String(s) => s.clone(),
            RuntimeValue::Integer(i) => i.to_string(),
            RuntimeValue::Float(f) => f.to_string(),
            RuntimeValue::Bool(true) => "true".to_string(),
            RuntimeValue::Bool(false) => String::new(),
            RuntimeValue::Object(object) => object.display().unwrap_or_default(),
            RuntimeValue::List(items) => items.iter().map(|v| v.render()).collect(),
            RuntimeValue::Map(_) | RuntimeValue::Null => String::new(),
        }
    }
}

impl PartialEq for RuntimeValue {
    /// Objects compare by identity; everything else by value.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::String(a), RuntimeValue::String(b)) => a == b,
            (RuntimeValue::Integer(a), RuntimeValue::Integer(b)) => a == b,
            (RuntimeValue::Float(a), RuntimeValue::Float(b)) => a == b,
            (RuntimeValue::Bool(a), RuntimeValue::Bool(b)) => a == b,
            (RuntimeValue::Object(a), RuntimeValue::Object(b)) => Arc::ptr_eq(a, b),
            (RuntimeValue::Map(a), RuntimeValue::Map(b)) => a == b,
            (RuntimeValue::List(a), RuntimeValue::List(b)) => a == b,
            (RuntimeValue::Null, RuntimeValue::Null) => true,
            _ => false,
        }
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::String(value.to_string())
    }
}

impl From<String> for RuntimeValue {
    fn from(value: String) -> Self {
        RuntimeValue::String(value)
    }
}

impl From<i64> for RuntimeValue {
    fn from(value: i64) -> Self {
        RuntimeValue::Integer(value)
    }
}

impl From<bool> for RuntimeValue {
    fn from(value: bool) -> Self {
        RuntimeValue::Bool(value)
    }
}

impl From<serde_json::Value> for RuntimeValue {
    /// JSON objects become maps and arrays become lists.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RuntimeValue::Null,
            serde_json::Value::Bool(b) => RuntimeValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RuntimeValue::Integer(i),
                None => RuntimeValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => RuntimeValue::String(s),
            serde_json::Value::Array(items) => {
                RuntimeValue::List(items.into_iter().map(RuntimeValue::from).collect())
            }
            serde_json::Value::Object(map) => RuntimeValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, RuntimeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Record;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_scalars() {
        assert_eq!(RuntimeValue::from("Bob").render(), "Bob");
        assert_eq!(RuntimeValue::Integer(42).render(), "42");
        assert_eq!(RuntimeValue::Float(1.5).render(), "1.5");
        assert_eq!(RuntimeValue::Bool(true).render(), "true");
        assert_eq!(RuntimeValue::Bool(false).render(), "");
        assert_eq!(RuntimeValue::Null.render(), "");
        assert_eq!(RuntimeValue::empty().render(), "");
    }

    #[test]
    fn test_render_list_concatenates() {
        let list = RuntimeValue::List(vec!["a".into(), RuntimeValue::Integer(1), "b".into()]);
        assert_eq!(list.render(), "a1b");
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = RuntimeValue::object(Record::builder("Post").build());
        let b = RuntimeValue::object(Record::builder("Post").build());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_json() {
        let value = RuntimeValue::from(serde_json::json!({
            "name": "Bob",
            "age": 42,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "extra": null
        }));

        let RuntimeValue::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map.get("name"), Some(&RuntimeValue::from("Bob")));
        assert_eq!(map.get("age"), Some(&RuntimeValue::Integer(42)));
        assert_eq!(map.get("ratio"), Some(&RuntimeValue::Float(0.5)));
        assert_eq!(
            map.get("tags"),
            Some(&RuntimeValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(map.get("extra"), Some(&RuntimeValue::Null));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RuntimeValue::Null.kind(), "null");
        assert_eq!(RuntimeValue::List(vec![]).kind(), "list");
        assert_eq!(RuntimeValue::Map(HashMap::new()).kind(), "map");
    }

    #[test]
    fn test_default_is_null() {
        assert_eq!(RuntimeValue::default(), RuntimeValue::Null);
        assert_eq!(RuntimeValue::default().render(), "");
    }
}
