/*
 * parsing_state.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! State of one template tree construction pass.
//!
//! The parsing state owns the tree under construction: the finished
//! top-level nodes and the stack of viewhelpers that are currently open.
//! It also hands out node identities and resolves viewhelpers, which is
//! what interceptors need when they build replacement nodes.

use crate::error::{TemplateError, TemplateResult};
use crate::node::{Node, NodeId, ViewHelperNode};
use crate::viewhelper::format::HtmlspecialcharsViewHelper;
use crate::viewhelper::{DEFAULT_NAMESPACE, HTMLSPECIALCHARS, ViewHelperResolver};
use std::sync::Arc;

/// State of one parse. Not shared between parses.
#[derive(Debug)]
pub struct ParsingState {
    resolver: ViewHelperResolver,
    next_id: u32,
    root: Vec<Node>,
    open: Vec<ViewHelperNode>,
}

impl ParsingState {
    pub fn new(resolver: ViewHelperResolver) -> Self {
        Self {
            resolver,
            next_id: 0,
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Allocate a fresh node identity.
    pub fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Resolve a viewhelper and create a node for it.
    pub fn create_view_helper_node(
        &mut self,
        namespace: &str,
        name: &str,
        arguments: Vec<(String, Node)>,
    ) -> TemplateResult<ViewHelperNode> {
        let view_helper = self.resolver.resolve(namespace, name)?;
        let id = self.next_node_id();
        Ok(ViewHelperNode::new(id, namespace, name, view_helper, arguments))
    }

    /// Wrap `node` in an `f:format.htmlspecialchars` node.
    ///
    /// The escaping viewhelper comes from the resolver so that a
    /// replacement registered there is used consistently. Without one the
    /// built-in implementation is used.
    pub fn wrap_in_escape_node(&mut self, node: Node) -> Node {
        let view_helper = self
            .resolver
            .resolve(DEFAULT_NAMESPACE, HTMLSPECIALCHARS)
            .unwrap_or_else(|_| Arc::new(HtmlspecialcharsViewHelper));
        let id = self.next_node_id();
        Node::ViewHelper(ViewHelperNode::new(
            id,
            DEFAULT_NAMESPACE,
            HTMLSPECIALCHARS,
            view_helper,
            vec![("value".to_string(), node)],
        ))
    }

    /// Number of viewhelpers currently open.
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn push_open(&mut self, node: ViewHelperNode) {
        self.open.push(node);
    }

    pub(crate) fn pop_open(&mut self) -> Option<ViewHelperNode> {
        self.open.pop()
    }

    /// Append a finished node to the innermost open viewhelper, or to the
    /// top level when none is open.
    pub(crate) fn add_node(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.add_child(node),
            None => self.root.push(node),
        }
    }

    /// Hand out the finished top-level nodes.
    pub(crate) fn into_nodes(mut self) -> TemplateResult<Vec<Node>> {
        match self.open.pop() {
            Some(unclosed) => Err(TemplateError::UnclosedViewHelper {
                name: unclosed.qualified_name(),
            }),
            None => Ok(self.root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let a = state.next_node_id();
        let b = state.next_node_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_identical_calls_get_distinct_ids() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let a = state.create_view_helper_node("f", "format.raw", vec![]).unwrap();
        let b = state.create_view_helper_node("f", "format.raw", vec![]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_create_unknown_view_helper() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let result = state.create_view_helper_node("f", "nope", vec![]);
        assert!(matches!(result, Err(TemplateError::UnknownViewHelper { .. })));
    }

    #[test]
    fn test_wrap_in_escape_node() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let wrapped = state.wrap_in_escape_node(Node::accessor("post.name"));

        assert!(wrapped.is_escape_wrapper());
        let inner = wrapped.wrapped_node().and_then(Node::as_accessor).unwrap();
        assert_eq!(inner.object_path(), "post.name");
    }

    #[test]
    fn test_wrap_without_registered_escaper() {
        let mut state = ParsingState::new(ViewHelperResolver::empty());
        let wrapped = state.wrap_in_escape_node(Node::text("x"));
        assert!(wrapped.is_escape_wrapper());
    }

    #[test]
    fn test_nodes_go_to_innermost_open_view_helper() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let raw = state.create_view_helper_node("f", "format.raw", vec![]).unwrap();
        state.push_open(raw);
        state.add_node(Node::text("inside"));
        assert_eq!(state.open_depth(), 1);

        let raw = state.pop_open().unwrap();
        assert_eq!(raw.children().len(), 1);
        state.add_node(Node::ViewHelper(raw));

        let nodes = state.into_nodes().unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_unclosed_view_helper() {
        let mut state = ParsingState::new(ViewHelperResolver::new());
        let raw = state.create_view_helper_node("f", "format.raw", vec![]).unwrap();
        state.push_open(raw);

        let err = state.into_nodes().unwrap_err();
        assert_eq!(err.to_string(), "Viewhelper f:format.raw was opened but never closed");
    }
}
