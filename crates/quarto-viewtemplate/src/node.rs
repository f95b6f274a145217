/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template syntax tree nodes.
//!
//! The tree is made of three kinds of node: literal text, object accessors
//! and viewhelper calls. Output escaping is not a node kind of its own: an
//! escaped node is wrapped in a viewhelper node bound to
//! `f:format.htmlspecialchars` whose `value` argument is the wrapped node.

use crate::accessor::ObjectAccessorNode;
use crate::eval_context::EvalContext;
use crate::value::RuntimeValue;
use crate::viewhelper::{
    Arguments, ChildRenderer, DEFAULT_NAMESPACE, HTMLSPECIALCHARS, ViewHelper,
};
use std::fmt;
use std::sync::Arc;

/// Identity of a viewhelper node within one parse.
///
/// Two viewhelper calls with identical names and arguments still get
/// distinct ids, so the escaping interceptor never confuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// A node in the template tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Literal text, output as-is.
    Text(TextNode),

    /// Object path access: `{post.name}`
    ObjectAccessor(ObjectAccessorNode),

    /// Viewhelper call: `<f:format.raw>...</f:format.raw>`
    ViewHelper(ViewHelperNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode { text: text.into() })
    }

    pub fn accessor(object_path: impl Into<String>) -> Self {
        Node::ObjectAccessor(ObjectAccessorNode::new(object_path))
    }

    /// Evaluate this node within an evaluation context.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> RuntimeValue {
        match self {
            Node::Text(TextNode { text }) => RuntimeValue::String(text.clone()),
            Node::ObjectAccessor(accessor) => accessor.evaluate_in(ctx),
            Node::ViewHelper(view_helper) => view_helper.evaluate(ctx),
        }
    }

    /// Whether this node is an output escaping wrapper.
    pub fn is_escape_wrapper(&self) -> bool {
        matches!(self, Node::ViewHelper(vh) if vh.is(DEFAULT_NAMESPACE, HTMLSPECIALCHARS))
    }

    /// The node an escaping wrapper escapes.
    pub fn wrapped_node(&self) -> Option<&Node> {
        match self {
            Node::ViewHelper(vh) if self.is_escape_wrapper() => vh.argument("value"),
            _ => None,
        }
    }

    pub fn as_view_helper(&self) -> Option<&ViewHelperNode> {
        match self {
            Node::ViewHelper(vh) => Some(vh),
            _ => None,
        }
    }

    pub fn as_accessor(&self) -> Option<&ObjectAccessorNode> {
        match self {
            Node::ObjectAccessor(accessor) => Some(accessor),
            _ => None,
        }
    }
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
}

/// A call to a viewhelper, with its arguments and body.
#[derive(Clone)]
pub struct ViewHelperNode {
    id: NodeId,
    namespace: String,
    name: String,
    view_helper: Arc<dyn ViewHelper>,
    arguments: Vec<(String, Node)>,
    children: Vec<Node>,
}

impl ViewHelperNode {
    pub(crate) fn new(
        id: NodeId,
        namespace: impl Into<String>,
        name: impl Into<String>,
        view_helper: Arc<dyn ViewHelper>,
        arguments: Vec<(String, Node)>,
    ) -> Self {
        Self {
            id,
            namespace: namespace.into(),
            name: name.into(),
            view_helper,
            arguments,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// `namespace:name`, e.g. `f:format.raw`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }

    /// The viewhelper backing this node.
    pub fn view_helper(&self) -> &dyn ViewHelper {
        self.view_helper.as_ref()
    }

    pub fn argument(&self, name: &str) -> Option<&Node> {
        self.arguments
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Evaluate the arguments, then let the viewhelper render.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> RuntimeValue {
        let arguments: Arguments = self
            .arguments
            .iter()
            .map(|(name, node)| (name.clone(), node.evaluate(ctx)))
            .collect();
        let mut children = ChildRenderer::new(&self.children, ctx);
        self.view_helper.render(&arguments, &mut children)
    }
}

impl fmt::Debug for ViewHelperNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHelperNode")
            .field("id", &self.id)
            .field("name", &self.qualified_name())
            .field("arguments", &self.arguments)
            .field("children", &self.children)
            .finish()
    }
}

/// Evaluate a sequence of sibling nodes.
///
/// - No nodes: `Null`
/// - One node: its value, unchanged
/// - Several nodes: the concatenation of their rendered output
pub fn evaluate_nodes(nodes: &[Node], ctx: &mut EvalContext<'_>) -> RuntimeValue {
    match nodes {
        [] => RuntimeValue::Null,
        [single] => single.evaluate(ctx),
        _ => {
            let mut output = String::new();
            for node in nodes {
                output.push_str(&node.evaluate(ctx).render());
            }
            RuntimeValue::String(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Record;
    use crate::scope::VariableScope;
    use crate::viewhelper::format::{HtmlspecialcharsViewHelper, RawViewHelper};
    use pretty_assertions::assert_eq;

    fn escape_node(id: u32, child: Node) -> Node {
        Node::ViewHelper(ViewHelperNode::new(
            NodeId(id),
            DEFAULT_NAMESPACE,
            HTMLSPECIALCHARS,
            Arc::new(HtmlspecialcharsViewHelper),
            vec![("value".to_string(), child)],
        ))
    }

    #[test]
    fn test_text_node() {
        let scope = VariableScope::new();
        let mut ctx = EvalContext::new(&scope);
        assert_eq!(Node::text("<b>").evaluate(&mut ctx), RuntimeValue::from("<b>"));
    }

    #[test]
    fn test_wrapped_node() {
        let wrapper = escape_node(0, Node::accessor("post.name"));

        assert!(wrapper.is_escape_wrapper());
        let inner = wrapper.wrapped_node().and_then(Node::as_accessor).unwrap();
        assert_eq!(inner.object_path(), "post.name");

        let plain = Node::accessor("post.name");
        assert!(!plain.is_escape_wrapper());
        assert!(plain.wrapped_node().is_none());
    }

    #[test]
    fn test_escape_wrapper_evaluates_escaped() {
        let post = Record::builder("Post").property("name", "<Bob & Co>").build();
        let scope = VariableScope::new().with("post", RuntimeValue::object(post));
        let mut ctx = EvalContext::new(&scope);

        let wrapper = escape_node(0, Node::accessor("post.name"));
        assert_eq!(
            wrapper.evaluate(&mut ctx),
            RuntimeValue::from("&lt;Bob &amp; Co&gt;")
        );
    }

    #[test]
    fn test_view_helper_renders_children() {
        let mut raw = ViewHelperNode::new(
            NodeId(1),
            DEFAULT_NAMESPACE,
            "format.raw",
            Arc::new(RawViewHelper),
            vec![],
        );
        raw.add_child(Node::text("<i>"));
        raw.add_child(Node::accessor("name"));
        raw.add_child(Node::text("</i>"));

        let scope = VariableScope::new().with("name", "x");
        let mut ctx = EvalContext::new(&scope);
        assert_eq!(raw.evaluate(&mut ctx), RuntimeValue::from("<i>x</i>"));
        assert_eq!(raw.qualified_name(), "f:format.raw");
    }

    #[test]
    fn test_evaluate_nodes() {
        let scope = VariableScope::new().with("n", RuntimeValue::Integer(3));
        let mut ctx = EvalContext::new(&scope);

        assert_eq!(evaluate_nodes(&[], &mut ctx), RuntimeValue::Null);
        assert_eq!(
            evaluate_nodes(&[Node::accessor("n")], &mut ctx),
            RuntimeValue::Integer(3)
        );
        assert_eq!(
            evaluate_nodes(&[Node::text("n="), Node::accessor("n")], &mut ctx),
            RuntimeValue::from("n=3")
        );
    }
}
