/*
 * interceptor/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parse-time interceptors.
//!
//! While a template tree is built, the builder emits an event for every
//! viewhelper it opens and closes and for every object accessor it
//! creates. Interceptors observe these events in document order and may
//! replace the node they are handed.
//!
//! Each interceptor declares the [`InterceptionPoint`]s it cares about;
//! the [`InterceptorChain`] only calls it for those.

pub mod escape;

use crate::node::Node;
use crate::parsing_state::ParsingState;
use std::fmt;

pub use escape::EscapeInterceptor;

/// A point during tree construction at which interceptors run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptionPoint {
    /// A viewhelper node was opened; its body has not been built yet.
    OpeningViewHelper,
    /// A viewhelper node was closed; its body is complete.
    ClosingViewHelper,
    /// An object accessor node was created.
    ObjectAccessor,
}

impl fmt::Display for InterceptionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterceptionPoint::OpeningViewHelper => "opening-viewhelper",
            InterceptionPoint::ClosingViewHelper => "closing-viewhelper",
            InterceptionPoint::ObjectAccessor => "object-accessor",
        };
        f.write_str(name)
    }
}

/// A tree-rewriting observer invoked at declared interception points.
///
/// Interceptors may keep state across the events of one parse, so a fresh
/// instance is needed for every parse.
pub trait Interceptor {
    /// Human-readable name, used for logging.
    fn name(&self) -> &str;

    /// Observe `node` at `point` and return the node to use in its place.
    fn process(&mut self, node: Node, point: InterceptionPoint, state: &mut ParsingState) -> Node;

    /// The interception points this interceptor wants to be called for.
    fn interception_points(&self) -> &[InterceptionPoint];
}

/// Ordered collection of interceptors for one parse.
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor to the end of the chain.
    pub fn push(&mut self, interceptor: Box<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Names of the interceptors, in order.
    pub fn names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Pass `node` through every interceptor registered for `point`.
    pub fn intercept(
        &mut self,
        mut node: Node,
        point: InterceptionPoint,
        state: &mut ParsingState,
    ) -> Node {
        for interceptor in &mut self.interceptors {
            if interceptor.interception_points().contains(&point) {
                tracing::trace!(interceptor = interceptor.name(), %point, "intercepting");
                node = interceptor.process(node, point, state);
            }
        }
        node
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("interceptors", &self.names())
            .finish()
    }
}
