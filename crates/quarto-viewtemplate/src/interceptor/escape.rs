/*
 * interceptor/escape.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Interceptor that wraps output in `f:format.htmlspecialchars`.
//!
//! Object accessors, and viewhelpers whose output is escapable, are
//! wrapped in an escaping node. A viewhelper that turns off escaping for
//! its children does so until it closes: its node id is pushed on a stack
//! when it opens and popped when that same node closes. Escaping is on
//! exactly when the stack is empty, so nested disabling viewhelpers keep
//! escaping off until the outermost one has closed.

use super::{InterceptionPoint, Interceptor};
use crate::node::{Node, NodeId};
use crate::parsing_state::ParsingState;

const INTERCEPTION_POINTS: [InterceptionPoint; 3] = [
    InterceptionPoint::OpeningViewHelper,
    InterceptionPoint::ClosingViewHelper,
    InterceptionPoint::ObjectAccessor,
];

/// Adds output escaping to the suitable places of a template tree.
#[derive(Debug, Default)]
pub struct EscapeInterceptor {
    /// Viewhelpers which currently disable escaping, innermost last.
    disabling: Vec<NodeId>,
}

impl EscapeInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nodes produced right now get escaped.
    pub fn is_escaping_enabled(&self) -> bool {
        self.disabling.is_empty()
    }

    /// Number of open viewhelpers that disable escaping.
    pub fn disabled_depth(&self) -> usize {
        self.disabling.len()
    }

    fn on_opening(&mut self, node: &Node) {
        if let Node::ViewHelper(vh) = node
            && !vh.view_helper().is_children_escaping_enabled()
        {
            tracing::trace!(node = ?vh.id(), name = %vh.qualified_name(), "escaping disabled");
            self.disabling.push(vh.id());
        }
    }

    fn on_closing(&mut self, node: Node, state: &mut ParsingState) -> Node {
        let Node::ViewHelper(vh) = &node else {
            return node;
        };

        if self.disabling.last() == Some(&vh.id()) {
            self.disabling.pop();
            if self.disabling.is_empty() {
                tracing::trace!(node = ?vh.id(), "escaping re-enabled");
            }
        }

        if self.is_escaping_enabled() && vh.view_helper().is_output_escaping_enabled() {
            state.wrap_in_escape_node(node)
        } else {
            node
        }
    }
}

impl Interceptor for EscapeInterceptor {
    fn name(&self) -> &str {
        "escape"
    }

    fn process(&mut self, node: Node, point: InterceptionPoint, state: &mut ParsingState) -> Node {
        match point {
            InterceptionPoint::OpeningViewHelper => {
                self.on_opening(&node);
                node
            }
            InterceptionPoint::ClosingViewHelper => self.on_closing(node, state),
            InterceptionPoint::ObjectAccessor => {
                if self.is_escaping_enabled() && matches!(node, Node::ObjectAccessor(_)) {
                    state.wrap_in_escape_node(node)
                } else {
                    node
                }
            }
        }
    }

    fn interception_points(&self) -> &[InterceptionPoint] {
        &INTERCEPTION_POINTS
    }
}
