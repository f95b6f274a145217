/*
 * scope.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable scopes that supply the root of every object path.

use crate::value::RuntimeValue;
use std::collections::HashMap;

/// A binding environment for template evaluation.
///
/// `get` never fails: unknown names yield [`RuntimeValue::Null`].
pub trait Scope {
    fn get(&self, name: &str) -> RuntimeValue;
}

/// A scope backed by a map of variable names to values.
#[derive(Debug, Clone, Default)]
pub struct VariableScope {
    variables: HashMap<String, RuntimeValue>,
}

impl VariableScope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the scope.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RuntimeValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`VariableScope::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

impl Scope for VariableScope {
    fn get(&self, name: &str) -> RuntimeValue {
        self.variables.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_is_null() {
        let scope = VariableScope::new();
        assert_eq!(scope.get("nope"), RuntimeValue::Null);
        assert!(!scope.contains("nope"));
    }

    #[test]
    fn test_insert_and_get() {
        let scope = VariableScope::new().with("name", "Alice");
        assert!(scope.contains("name"));
        assert_eq!(scope.get("name"), RuntimeValue::from("Alice"));
    }
}
