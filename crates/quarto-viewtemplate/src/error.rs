/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for object path resolution and tree building.

use thiserror::Error;

/// Why a single object path could not be resolved.
///
/// These never reach the caller of [`crate::ObjectAccessorNode::evaluate`]:
/// the accessor converts them into a blank value. They are kept in the
/// [`crate::EvalContext`] so a caller can inspect what went missing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionFailure {
    /// The object has neither a getter nor a field with this name.
    #[error("Trying to resolve {path}, but {type_name} has no getter or property \"{segment}\"")]
    UnknownMember {
        path: String,
        segment: String,
        type_name: String,
    },

    /// The object has a field with this name, but it is not public and
    /// there is no getter for it.
    #[error("Trying to resolve {path}, but did not find public getters or variables for \"{segment}\" on {type_name}")]
    NonPublicMember {
        path: String,
        segment: String,
        type_name: String,
    },

    /// A mapping along the path has no entry for this key.
    #[error("Tried to read key \"{key}\" while resolving {path}, but did not find it")]
    MissingKey { path: String, key: String },

    /// A segment remains but the current value cannot be traversed further.
    #[error("Cannot read \"{segment}\" from a {kind} value while resolving {path}")]
    NotTraversable {
        path: String,
        segment: String,
        kind: &'static str,
    },
}

impl ResolutionFailure {
    /// The full object path that failed.
    pub fn path(&self) -> &str {
        match self {
            ResolutionFailure::UnknownMember { path, .. }
            | ResolutionFailure::NonPublicMember { path, .. }
            | ResolutionFailure::MissingKey { path, .. }
            | ResolutionFailure::NotTraversable { path, .. } => path,
        }
    }
}

/// Errors raised while assembling a template tree.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No viewhelper is registered under this name.
    #[error("Unknown viewhelper: {namespace}:{name}")]
    UnknownViewHelper { namespace: String, name: String },

    /// A viewhelper close event arrived with no viewhelper open.
    #[error("Closing viewhelper without a matching opening viewhelper")]
    UnbalancedClose,

    /// An interceptor replaced an opening viewhelper with another kind of
    /// node, so there is nothing to hold the viewhelper's body.
    #[error("Interceptor replaced opening viewhelper {name} with a non-viewhelper node")]
    OpeningNodeReplaced { name: String },

    /// The tree was finished while a viewhelper was still open.
    #[error("Viewhelper {name} was opened but never closed")]
    UnclosedViewHelper { name: String },
}

/// Result type for template building operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
