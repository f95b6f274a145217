/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template tree construction.
//!
//! [`TemplateBuilder`] receives already-classified template pieces in
//! document order: literal text, object accessors, and opening/closing
//! viewhelpers. It runs the configured interceptors at each interception
//! point and assembles the resulting tree into a [`ParsedTemplate`].
//!
//! # Example
//!
//! ```ignore
//! use quarto_viewtemplate::{ParserConfiguration, TemplateBuilder, VariableScope};
//!
//! let mut builder = TemplateBuilder::new(&ParserConfiguration::default());
//! builder.text("Hello, ");
//! builder.object_accessor("user.name");
//! let template = builder.finish()?;
//!
//! let scope = VariableScope::new().with("user", user);
//! assert_eq!(template.render(&scope), "Hello, &lt;Bob&gt;");
//! ```

use crate::config::ParserConfiguration;
use crate::error::{TemplateError, TemplateResult};
use crate::eval_context::EvalContext;
use crate::interceptor::{InterceptionPoint, InterceptorChain};
use crate::node::{Node, NodeId, evaluate_nodes};
use crate::parsing_state::ParsingState;
use crate::scope::Scope;
use crate::value::RuntimeValue;

/// Builds one template tree.
#[derive(Debug)]
pub struct TemplateBuilder {
    state: ParsingState,
    interceptors: InterceptorChain,
}

impl TemplateBuilder {
    /// Start a new tree with fresh interceptors from `config`.
    pub fn new(config: &ParserConfiguration) -> Self {
        Self {
            state: ParsingState::new(config.resolver().clone()),
            interceptors: config.interceptor_chain(),
        }
    }

    /// Append literal text.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.state.add_node(Node::text(text));
        self
    }

    /// Append an object accessor such as `post.author.name`.
    pub fn object_accessor(&mut self, object_path: impl Into<String>) -> &mut Self {
        let node = self.interceptors.intercept(
            Node::accessor(object_path),
            InterceptionPoint::ObjectAccessor,
            &mut self.state,
        );
        self.state.add_node(node);
        self
    }

    /// Open a viewhelper. Subsequent nodes become its body until the
    /// matching [`TemplateBuilder::close_view_helper`].
    pub fn open_view_helper(
        &mut self,
        namespace: &str,
        name: &str,
        arguments: Vec<(String, Node)>,
    ) -> TemplateResult<NodeId> {
        let node = self
            .state
            .create_view_helper_node(namespace, name, arguments)?;
        let qualified_name = node.qualified_name();
        let node = self.interceptors.intercept(
            Node::ViewHelper(node),
            InterceptionPoint::OpeningViewHelper,
            &mut self.state,
        );
        match node {
            Node::ViewHelper(vh) => {
                let id = vh.id();
                self.state.push_open(vh);
                Ok(id)
            }
            _ => Err(TemplateError::OpeningNodeReplaced {
                name: qualified_name,
            }),
        }
    }

    /// Close the innermost open viewhelper.
    pub fn close_view_helper(&mut self) -> TemplateResult<()> {
        let vh = self.state.pop_open().ok_or(TemplateError::UnbalancedClose)?;
        let node = self.interceptors.intercept(
            Node::ViewHelper(vh),
            InterceptionPoint::ClosingViewHelper,
            &mut self.state,
        );
        self.state.add_node(node);
        Ok(())
    }

    /// Number of viewhelpers currently open.
    pub fn open_depth(&self) -> usize {
        self.state.open_depth()
    }

    /// Finish the tree. Fails if a viewhelper is still open.
    pub fn finish(self) -> TemplateResult<ParsedTemplate> {
        Ok(ParsedTemplate {
            nodes: self.state.into_nodes()?,
        })
    }
}

/// A built template tree, ready for evaluation.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    nodes: Vec<Node>,
}

impl ParsedTemplate {
    /// The top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Evaluate the tree against a scope.
    pub fn evaluate(&self, scope: &dyn Scope) -> RuntimeValue {
        evaluate_nodes(&self.nodes, &mut EvalContext::new(scope))
    }

    /// Render the tree to a string.
    pub fn render(&self, scope: &dyn Scope) -> String {
        self.evaluate(scope).render()
    }

    /// Render within an evaluation context, keeping its failure log.
    pub fn render_in(&self, ctx: &mut EvalContext<'_>) -> String {
        evaluate_nodes(&self.nodes, ctx).render()
    }
}
