/*
 * accessor.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Object accessor nodes: `{post.author.name}`.
//!
//! The first segment of the object path names a variable in the scope.
//! Every further segment is resolved against the current value:
//!
//! - object: call the `get<Segment>` getter, else read the public field
//! - map: read the entry with that key
//! - anything else: the path cannot continue
//!
//! An unresolvable segment never aborts rendering. The node evaluates to
//! [`RuntimeValue::empty`] instead and the failure is recorded in the
//! [`EvalContext`].

use crate::error::ResolutionFailure;
use crate::eval_context::EvalContext;
use crate::object::MemberAccess;
use crate::scope::Scope;
use crate::value::RuntimeValue;

/// A node which resolves an object path like `post.author.name`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAccessorNode {
    object_path: String,
}

impl ObjectAccessorNode {
    pub fn new(object_path: impl Into<String>) -> Self {
        Self {
            object_path: object_path.into(),
        }
    }

    /// The object path, as written.
    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Evaluate against a scope, discarding any failure.
    pub fn evaluate(&self, scope: &dyn Scope) -> RuntimeValue {
        self.evaluate_in(&mut EvalContext::new(scope))
    }

    /// Evaluate within an evaluation context.
    ///
    /// This is the only place where a [`ResolutionFailure`] is turned into
    /// a blank value.
    pub fn evaluate_in(&self, ctx: &mut EvalContext<'_>) -> RuntimeValue {
        match self.resolve(ctx.scope) {
            Ok(value) => value,
            Err(failure) => {
                tracing::debug!(
                    path = %self.object_path,
                    reason = %failure,
                    "object path resolved to blank"
                );
                ctx.record_failure(failure);
                RuntimeValue::empty()
            }
        }
    }

    /// Walk the object path, reporting the first segment that fails.
    ///
    /// A root variable missing from the scope is not a failure: the scope
    /// decides what an absent variable looks like (usually `Null`).
    pub fn resolve(&self, scope: &dyn Scope) -> Result<RuntimeValue, ResolutionFailure> {
        let mut segments = self.object_path.split('.');
        let root = segments.next().unwrap_or_default();
        let mut current = scope.get(root);

        for segment in segments {
            current = self.step(current, segment)?;
        }
        Ok(current)
    }

    fn step(&self, current: RuntimeValue, segment: &str) -> Result<RuntimeValue, ResolutionFailure> {
        match current {
            RuntimeValue::Object(object) => match object.try_get_member(segment) {
                MemberAccess::Value(value) => Ok(value),
                MemberAccess::NonPublic => Err(ResolutionFailure::NonPublicMember {
                    path: self.object_path.clone(),
                    segment: segment.to_string(),
                    type_name: object.type_name().to_string(),
                }),
                MemberAccess::Missing => Err(ResolutionFailure::UnknownMember {
                    path: self.object_path.clone(),
                    segment: segment.to_string(),
                    type_name: object.type_name().to_string(),
                }),
            },
            RuntimeValue::Map(mut map) => {
                map.remove(segment)
                    .ok_or_else(|| ResolutionFailure::MissingKey {
                        path: self.object_path.clone(),
                        key: segment.to_string(),
                    })
            }
            other => Err(ResolutionFailure::NotTraversable {
                path: self.object_path.clone(),
                segment: segment.to_string(),
                kind: other.kind(),
            }),
        }
    }
}
