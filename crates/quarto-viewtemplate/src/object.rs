/*
 * object.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Structured objects that object paths can walk into.
//!
//! An object exposes members in two ways, tried in this order:
//!
//! 1. A getter named `get` + the segment with its first letter upper-cased
//!    (segment `name` calls `getName`)
//! 2. A publicly readable field named like the segment
//!
//! Two implementations are provided. [`Record`] carries an accessor map
//! that is filled in when the record is built. [`SerializedObject`] wraps
//! any `serde::Serialize` value and exposes each serialized field as a
//! public field.

use crate::value::RuntimeValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of looking up a member on a structured object.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberAccess {
    /// The member was found and read.
    Value(RuntimeValue),
    /// A field with this name exists but is not publicly readable.
    NonPublic,
    /// Neither a getter nor a field with this name exists.
    Missing,
}

/// A runtime object with named getters and fields.
pub trait StructuredObject: fmt::Debug + Send + Sync {
    /// Type name used in diagnostics.
    fn type_name(&self) -> &str;

    /// Call the zero-argument getter `getter` (e.g. `getName`), if present.
    fn call_getter(&self, getter: &str) -> Option<RuntimeValue>;

    /// Read the field `name`.
    fn field(&self, name: &str) -> MemberAccess;

    /// String form of the object when rendered as output, if it has one.
    fn display(&self) -> Option<String> {
        None
    }

    /// Resolve one path segment: getter first, then public field.
    fn try_get_member(&self, segment: &str) -> MemberAccess {
        if let Some(value) = self.call_getter(&getter_name(segment)) {
            return MemberAccess::Value(value);
        }
        self.field(segment)
    }
}

/// Name of the getter consulted for a path segment.
///
/// ```ignore
/// assert_eq!(getter_name("name"), "getName");
/// ```
pub fn getter_name(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(segment.len() + 3);
            name.push_str("get");
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
            name
        }
        None => "get".to_string(),
    }
}

type Getter = Arc<dyn Fn(&Record) -> RuntimeValue + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Public,
    Private,
}

/// An object whose getters and fields are registered up front.
#[derive(Clone)]
pub struct Record {
    type_name: String,
    fields: HashMap<String, (Visibility, RuntimeValue)>,
    getters: HashMap<String, Getter>,
    display: Option<String>,
}

impl Record {
    /// Start building a record of the given type.
    pub fn builder(type_name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                type_name: type_name.into(),
                fields: HashMap::new(),
                getters: HashMap::new(),
                display: None,
            },
        }
    }

    /// Read a field regardless of its visibility.
    ///
    /// This is what getters use to reach the record's private state.
    pub fn property(&self, name: &str) -> Option<&RuntimeValue> {
        self.fields.get(name).map(|(_, value)| value)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut getters: Vec<&String> = self.getters.keys().collect();
        getters.sort();
        f.debug_struct("Record")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("getters", &getters)
            .finish()
    }
}

impl StructuredObject for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn call_getter(&self, getter: &str) -> Option<RuntimeValue> {
        self.getters.get(getter).map(|g| g(self))
    }

    fn field(&self, name: &str) -> MemberAccess {
        match self.fields.get(name) {
            Some((Visibility::Public, value)) => MemberAccess::Value(value.clone()),
            Some((Visibility::Private, _)) => MemberAccess::NonPublic,
            None => MemberAccess::Missing,
        }
    }

    fn display(&self) -> Option<String> {
        self.display.clone()
    }
}

/// Builder for [`Record`].
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a publicly readable field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.record
            .fields
            .insert(name.into(), (Visibility::Public, value.into()));
        self
    }

    /// Add a field that object paths cannot read directly.
    pub fn private_field(mut self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.record
            .fields
            .insert(name.into(), (Visibility::Private, value.into()));
        self
    }

    /// Register a zero-argument getter under its full name (e.g. `getName`).
    pub fn getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Record) -> RuntimeValue + Send + Sync + 'static,
    {
        self.record.getters.insert(name.into(), Arc::new(getter));
        self
    }

    /// Add a private field together with the getter that exposes it.
    pub fn property(self, name: &str, value: impl Into<RuntimeValue>) -> Self {
        let key = name.to_string();
        self.private_field(name, value)
            .getter(getter_name(name), move |record| {
                record.property(&key).cloned().unwrap_or_default()
            })
    }

    /// Set the string form used when the record is rendered.
    pub fn display(mut self, text: impl Into<String>) -> Self {
        self.record.display = Some(text.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// An object backed by the serialized form of a `serde::Serialize` value.
///
/// Every serialized field is treated as public. There are no getters.
#[derive(Debug, Clone)]
pub struct SerializedObject {
    type_name: String,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl SerializedObject {
    /// Serialize `value` and expose its fields.
    ///
    /// Values that do not serialize to a JSON object expose no fields.
    pub fn new<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let type_name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or_default()
            .to_string();
        let fields = match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Ok(Self { type_name, fields })
    }
}

impl StructuredObject for SerializedObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn call_getter(&self, _getter: &str) -> Option<RuntimeValue> {
        None
    }

    fn field(&self, name: &str) -> MemberAccess {
        match self.fields.get(name) {
            Some(value) => MemberAccess::Value(RuntimeValue::from(value.clone())),
            None => MemberAccess::Missing,
        }
    }
}
