/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Object accessor evaluation and output escaping for view templates.
//!
//! This crate is the evaluation core of a viewhelper-based template
//! engine. It does not parse template source. A tree builder hands it
//! classified pieces in document order and it provides:
//!
//! - Object accessors: `{post.author.name}` resolved against a scope by
//!   calling getters, reading public fields, or looking up map keys
//! - Output escaping: a parse-time interceptor that wraps accessors and
//!   viewhelper output in `f:format.htmlspecialchars`, unless an enclosing
//!   viewhelper turns escaping off for its body
//!
//! # Architecture
//!
//! Templates go through three steps:
//!
//! 1. **Build**: [`TemplateBuilder`] receives text, accessors and
//!    viewhelper open/close events
//! 2. **Intercept**: each event is passed through the [`InterceptorChain`],
//!    where the [`EscapeInterceptor`] decides what to wrap
//! 3. **Evaluate**: [`ParsedTemplate::render`] evaluates the tree against
//!    a [`Scope`]
//!
//! An object path that cannot be resolved never aborts rendering. It
//! renders as blank, and the reason is kept in the [`EvalContext`].
//!
//! # Example
//!
//! ```ignore
//! use quarto_viewtemplate::{
//!     ParserConfiguration, Record, RuntimeValue, TemplateBuilder, VariableScope,
//! };
//!
//! let mut builder = TemplateBuilder::new(&ParserConfiguration::default());
//! builder.text("<h1>").object_accessor("post.title").text("</h1>");
//! let template = builder.finish()?;
//!
//! let post = Record::builder("Post").property("title", "Fish & Chips").build();
//! let scope = VariableScope::new().with("post", RuntimeValue::object(post));
//! assert_eq!(template.render(&scope), "<h1>Fish &amp; Chips</h1>");
//! ```

pub mod accessor;
pub mod builder;
pub mod config;
pub mod error;
pub mod eval_context;
pub mod interceptor;
pub mod node;
pub mod object;
pub mod parsing_state;
pub mod scope;
pub mod value;
pub mod viewhelper;

// Re-export main types at crate root
pub use accessor::ObjectAccessorNode;
pub use builder::{ParsedTemplate, TemplateBuilder};
pub use config::{InterceptorFactory, ParserConfiguration};
pub use error::{ResolutionFailure, TemplateError, TemplateResult};
pub use eval_context::EvalContext;
pub use interceptor::{EscapeInterceptor, InterceptionPoint, Interceptor, InterceptorChain};
pub use node::{Node, NodeId, TextNode, ViewHelperNode};
pub use object::{MemberAccess, Record, RecordBuilder, SerializedObject, StructuredObject};
pub use parsing_state::ParsingState;
pub use scope::{Scope, VariableScope};
pub use value::RuntimeValue;
pub use viewhelper::format::{HtmlspecialcharsViewHelper, RawViewHelper, escape_html};
pub use viewhelper::{Arguments, ChildRenderer, ViewHelper, ViewHelperResolver};
