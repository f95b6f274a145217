/*
 * eval_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Evaluation context for template rendering.
//!
//! [`EvalContext`] is threaded through node evaluation. It gives nodes
//! access to the variable scope and keeps a log of the object path
//! failures that were turned into blank output along the way.

use crate::error::ResolutionFailure;
use crate::scope::Scope;

/// Context for evaluating a template tree against one scope.
pub struct EvalContext<'a> {
    /// Variable bindings for object path roots.
    pub scope: &'a dyn Scope,

    /// Failures swallowed by object accessors, in evaluation order.
    failures: Vec<ResolutionFailure>,
}

impl<'a> EvalContext<'a> {
    /// Create a new evaluation context over the given scope.
    pub fn new(scope: &'a dyn Scope) -> Self {
        Self {
            scope,
            failures: Vec::new(),
        }
    }

    /// Record a failure that was replaced by a blank value.
    pub fn record_failure(&mut self, failure: ResolutionFailure) {
        self.failures.push(failure);
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[ResolutionFailure] {
        &self.failures
    }

    /// Consume the context and return the recorded failures.
    pub fn into_failures(self) -> Vec<ResolutionFailure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::VariableScope;

    #[test]
    fn test_eval_context_new() {
        let scope = VariableScope::new();
        let ctx = EvalContext::new(&scope);
        assert!(ctx.failures().is_empty());
    }

    #[test]
    fn test_record_failure() {
        let scope = VariableScope::new();
        let mut ctx = EvalContext::new(&scope);
        ctx.record_failure(ResolutionFailure::MissingKey {
            path: "a.b".to_string(),
            key: "b".to_string(),
        });

        assert_eq!(ctx.failures().len(), 1);
        let failures = ctx.into_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path(), "a.b");
    }
}
