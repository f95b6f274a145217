/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser configuration.
//!
//! A [`ParserConfiguration`] is reusable across parses. Interceptors are
//! stateful, so the configuration stores factories and creates fresh
//! interceptor instances for every parse.

use crate::interceptor::{EscapeInterceptor, Interceptor, InterceptorChain};
use crate::viewhelper::ViewHelperResolver;
use std::fmt;
use std::sync::Arc;

/// Creates a fresh interceptor for one parse.
pub type InterceptorFactory = Arc<dyn Fn() -> Box<dyn Interceptor> + Send + Sync>;

/// Configuration for building template trees.
#[derive(Clone)]
pub struct ParserConfiguration {
    /// Whether the escaping interceptor runs.
    escaping_enabled: bool,

    /// Additional interceptors, run after the escaping interceptor.
    interceptors: Vec<InterceptorFactory>,

    /// Viewhelpers available to templates.
    resolver: ViewHelperResolver,
}

impl ParserConfiguration {
    /// Default configuration: escaping on, built-in viewhelpers only.
    pub fn new() -> Self {
        Self {
            escaping_enabled: true,
            interceptors: Vec::new(),
            resolver: ViewHelperResolver::new(),
        }
    }

    /// Enable or disable output escaping.
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.escaping_enabled = enabled;
        self
    }

    /// Register an additional interceptor.
    pub fn with_interceptor<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Interceptor> + Send + Sync + 'static,
    {
        self.interceptors.push(Arc::new(factory));
        self
    }

    /// Replace the viewhelper resolver.
    pub fn with_resolver(mut self, resolver: ViewHelperResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn escaping_enabled(&self) -> bool {
        self.escaping_enabled
    }

    pub fn resolver(&self) -> &ViewHelperResolver {
        &self.resolver
    }

    /// Create the interceptors for one parse.
    pub fn interceptor_chain(&self) -> InterceptorChain {
        let mut chain = InterceptorChain::new();
        if self.escaping_enabled {
            chain.push(Box::new(EscapeInterceptor::new()));
        }
        for factory in &self.interceptors {
            chain.push(factory());
        }
        chain
    }
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfiguration")
            .field("escaping_enabled", &self.escaping_enabled)
            .field("interceptors", &self.interceptors.len())
            .field("resolver", &self.resolver)
            .finish()
    }
}
