/*
 * viewhelper/format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Built-in formatting viewhelpers.

use super::{Arguments, ChildRenderer, ViewHelper};
use crate::value::RuntimeValue;

/// Escape markup-significant characters so they render literally.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The `value` argument if given, otherwise the rendered body.
fn value_or_children(arguments: &Arguments, children: &mut ChildRenderer<'_, '_>) -> RuntimeValue {
    match arguments.get("value") {
        Some(value) => value.clone(),
        None => children.render(),
    }
}

/// `f:format.htmlspecialchars`: escapes its value.
///
/// Strings and objects with a display form are escaped, and lists are
/// escaped element by element. Scalars, maps and objects without a display
/// form render no markup and are passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlspecialcharsViewHelper;

// Escaping the body or the output again would double-encode.
impl ViewHelper for HtmlspecialcharsViewHelper {
    fn is_children_escaping_enabled(&self) -> bool {
        false
    }

    fn is_output_escaping_enabled(&self) -> bool {
        false
    }

    fn render(&self, arguments: &Arguments, children: &mut ChildRenderer<'_, '_>) -> RuntimeValue {
        escape_value(value_or_children(arguments, children))
    }
}

/// Escape every part of `value` that renders as text.
fn escape_value(value: RuntimeValue) -> RuntimeValue {
    match value {
        RuntimeValue::String(s) => RuntimeValue::String(escape_html(&s)),
        RuntimeValue::Object(object) => match object.display() {
            Some(text) => RuntimeValue::String(escape_html(&text)),
            None => RuntimeValue::Object(object),
        },
        RuntimeValue::List(items) => RuntimeValue::List(items.into_iter().map(escape_value).collect()),
        other => other,
    }
}

/// `f:format.raw`: outputs its value without any escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawViewHelper;

impl ViewHelper for RawViewHelper {
    fn is_children_escaping_enabled(&self) -> bool {
        false
    }

    fn is_output_escaping_enabled(&self) -> bool {
        false
    }

    fn render(&self, arguments: &Arguments, children: &mut ChildRenderer<'_, '_>) -> RuntimeValue {
        value_or_children(arguments, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval_context::EvalContext;
    use crate::node::Node;
    use crate::object::Record;
    use crate::scope::VariableScope;
    use pretty_assertions::assert_eq;

    fn render_with(view_helper: &dyn ViewHelper, value: Option<RuntimeValue>, body: &[Node]) -> RuntimeValue {
        let scope = VariableScope::new();
        let mut ctx = EvalContext::new(&scope);
        let mut arguments = Arguments::new();
        if let Some(value) = value {
            arguments.insert("value".to_string(), value);
        }
        let mut children = ChildRenderer::new(body, &mut ctx);
        view_helper.render(&arguments, &mut children)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_htmlspecialchars_escapes_value_argument() {
        let result = render_with(&HtmlspecialcharsViewHelper, Some("<b>".into()), &[]);
        assert_eq!(result, RuntimeValue::from("&lt;b&gt;"));
    }

    #[test]
    fn test_htmlspecialchars_escapes_body() {
        let body = [Node::text("<i>"), Node::text("&")];
        let result = render_with(&HtmlspecialcharsViewHelper, None, &body);
        assert_eq!(result, RuntimeValue::from("&lt;i&gt;&amp;"));
    }

    #[test]
    fn test_htmlspecialchars_escapes_list_elements() {
        let list = RuntimeValue::List(vec![
            "<b>".into(),
            RuntimeValue::List(vec!["&".into()]),
            RuntimeValue::Integer(1),
        ]);
        let escaped = render_with(&HtmlspecialcharsViewHelper, Some(list), &[]);

        assert_eq!(
            escaped,
            RuntimeValue::List(vec![
                "&lt;b&gt;".into(),
                RuntimeValue::List(vec!["&amp;".into()]),
                RuntimeValue::Integer(1),
            ])
        );
        assert_eq!(escaped.render(), "&lt;b&gt;&amp;1");
    }

    #[test]
    fn test_htmlspecialchars_passes_markup_free_values_through() {
        assert_eq!(
            render_with(&HtmlspecialcharsViewHelper, Some(RuntimeValue::Integer(5)), &[]),
            RuntimeValue::Integer(5)
        );

        let opaque = RuntimeValue::object(Record::builder("Post").build());
        assert_eq!(
            render_with(&HtmlspecialcharsViewHelper, Some(opaque.clone()), &[]),
            opaque
        );
    }

    #[test]
    fn test_htmlspecialchars_escapes_displayable_object() {
        let object = RuntimeValue::object(Record::builder("Link").display("<a>").build());
        assert_eq!(
            render_with(&HtmlspecialcharsViewHelper, Some(object), &[]),
            RuntimeValue::from("&lt;a&gt;")
        );
    }

    #[test]
    fn test_raw_leaves_markup_alone() {
        let body = [Node::text("<b>bold</b>")];
        assert_eq!(
            render_with(&RawViewHelper, None, &body),
            RuntimeValue::from("<b>bold</b>")
        );
        assert_eq!(
            render_with(&RawViewHelper, Some("<i>".into()), &[]),
            RuntimeValue::from("<i>")
        );
    }
}
