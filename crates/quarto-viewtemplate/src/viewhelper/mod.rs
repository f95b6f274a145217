/*
 * viewhelper/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Viewhelpers: template-level functions with their own escaping behavior.
//!
//! A viewhelper decides two things about escaping:
//!
//! - whether object accessors and viewhelpers inside its body are escaped
//!   ([`ViewHelper::is_children_escaping_enabled`])
//! - whether its own output is escaped
//!   ([`ViewHelper::is_output_escaping_enabled`])
//!
//! The [`ViewHelperResolver`] maps `namespace:name` to an implementation.

pub mod format;

use crate::error::{TemplateError, TemplateResult};
use crate::eval_context::EvalContext;
use crate::node::{Node, evaluate_nodes};
use crate::value::RuntimeValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Namespace of the built-in viewhelpers.
pub const DEFAULT_NAMESPACE: &str = "f";

/// Name of the viewhelper used to escape output.
pub const HTMLSPECIALCHARS: &str = "format.htmlspecialchars";

/// Name of the viewhelper that disables escaping.
pub const RAW: &str = "format.raw";

/// Evaluated viewhelper arguments, by name.
pub type Arguments = HashMap<String, RuntimeValue>;

/// A template-level function.
pub trait ViewHelper: fmt::Debug + Send + Sync {
    /// Whether nodes inside this viewhelper's body get escaped.
    fn is_children_escaping_enabled(&self) -> bool {
        true
    }

    /// Whether this viewhelper's own output gets escaped.
    fn is_output_escaping_enabled(&self) -> bool {
        true
    }

    /// Produce the viewhelper's output.
    fn render(&self, arguments: &Arguments, children: &mut ChildRenderer<'_, '_>) -> RuntimeValue;
}

/// Lazily evaluates a viewhelper's body.
///
/// The body is only evaluated if the viewhelper asks for it.
pub struct ChildRenderer<'n, 'a> {
    nodes: &'n [Node],
    ctx: &'n mut EvalContext<'a>,
}

impl<'n, 'a> ChildRenderer<'n, 'a> {
    pub fn new(nodes: &'n [Node], ctx: &'n mut EvalContext<'a>) -> Self {
        Self { nodes, ctx }
    }

    /// Evaluate the body nodes.
    pub fn render(&mut self) -> RuntimeValue {
        evaluate_nodes(self.nodes, self.ctx)
    }
}

/// Registry of viewhelpers by namespace and name.
#[derive(Debug, Clone)]
pub struct ViewHelperResolver {
    view_helpers: HashMap<(String, String), Arc<dyn ViewHelper>>,
}

impl ViewHelperResolver {
    /// A resolver with the built-in `f:` viewhelpers registered.
    pub fn new() -> Self {
        let mut resolver = Self::empty();
        resolver
            .register(
                DEFAULT_NAMESPACE,
                HTMLSPECIALCHARS,
                format::HtmlspecialcharsViewHelper,
            )
            .register(DEFAULT_NAMESPACE, RAW, format::RawViewHelper);
        resolver
    }

    /// A resolver with nothing registered.
    pub fn empty() -> Self {
        Self {
            view_helpers: HashMap::new(),
        }
    }

    /// Register a viewhelper, replacing any previous one with the same name.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        view_helper: impl ViewHelper + 'static,
    ) -> &mut Self {
        self.view_helpers
            .insert((namespace.into(), name.into()), Arc::new(view_helper));
        self
    }

    /// Look up a viewhelper.
    pub fn resolve(&self, namespace: &str, name: &str) -> TemplateResult<Arc<dyn ViewHelper>> {
        self.view_helpers
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| TemplateError::UnknownViewHelper {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.view_helpers
            .contains_key(&(namespace.to_string(), name.to_string()))
    }
}

impl Default for ViewHelperResolver {
    fn default() -> Self {
        Self::new()
    }
}
