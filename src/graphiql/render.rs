//! GraphiQL page rendering.

use crate::graphiql::template::{DEFAULT_HTML_TITLE, GRAPHIQL_VERSION};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tera::Tera;
use thiserror::Error;

/// Name the page is registered under in a Tera environment.
pub const TEMPLATE_NAME: &str = "graphiql.html";

/// Failure to produce the GraphiQL page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("template context error: {0}")]
    Context(#[from] serde_json::Error),
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),
}

/// Values exposed to the page template.
#[derive(Debug, Clone, Serialize)]
pub struct GraphiQLData {
    pub graphiql_version: String,
    pub graphiql_html_title: String,
    pub query: Option<String>,
    pub variables: Option<String>,
    pub operation_name: Option<String>,
    /// Pretty-encoded execution result, `None` when nothing ran.
    pub result: Option<String>,
    pub subscription_url: Option<String>,
    pub headers: Option<String>,
    pub default_query: Option<String>,
    pub header_editor_enabled: bool,
    pub should_persist_headers: bool,
}

impl Default for GraphiQLData {
    fn default() -> Self {
        Self {
            graphiql_version: GRAPHIQL_VERSION.to_string(),
            graphiql_html_title: DEFAULT_HTML_TITLE.to_string(),
            query: None,
            variables: None,
            operation_name: None,
            result: None,
            subscription_url: None,
            headers: None,
            default_query: None,
            header_editor_enabled: true,
            should_persist_headers: false,
        }
    }
}

/// A caller-supplied Tera environment, the Jinja counterpart.
///
/// With `enable_async` the page is rendered on tokio's blocking pool
/// instead of on the request task.
#[derive(Debug, Clone)]
pub struct TemplateEnv {
    tera: Tera,
    enable_async: bool,
}

impl TemplateEnv {
    /// Wrap an environment.
    pub fn new(tera: Tera) -> Self {
        Self {
            tera,
            enable_async: false,
        }
    }

    /// Render off the request task.
    pub fn enable_async(mut self, enable: bool) -> Self {
        self.enable_async = enable;
        self
    }

    /// Whether rendering is offloaded.
    pub fn is_async(&self) -> bool {
        self.enable_async
    }
}

impl Default for TemplateEnv {
    fn default() -> Self {
        Self::new(Tera::default())
    }
}

/// The engine that turns a template and [`GraphiQLData`] into HTML.
#[derive(Debug, Clone, Default)]
pub enum Renderer {
    /// Built-in `{{ name | filter }}` substitution.
    #[default]
    Simple,
    /// A Tera environment holding the page as [`TEMPLATE_NAME`].
    Tera { engine: Arc<Tera>, offload: bool },
}

impl Renderer {
    /// Register `template` into the environment and build a renderer from it.
    pub fn from_env(env: TemplateEnv, template: &str) -> Result<Self, RenderError> {
        let TemplateEnv { mut tera, enable_async } = env;
        tera.register_filter("json_encode", json_encode_filter);
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Renderer::Tera {
            engine: Arc::new(tera),
            offload: enable_async,
        })
    }

    /// Render the page. `template` is only read by the simple renderer; Tera
    /// renders the copy registered at construction.
    pub async fn render(&self, template: &str, data: &GraphiQLData) -> Result<String, RenderError> {
        match self {
            Renderer::Simple => {
                let values = match serde_json::to_value(data)? {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                simple_renderer(template, &values)
            }
            Renderer::Tera {
                engine,
                offload: false,
            } => {
                let context = tera::Context::from_serialize(data)?;
                Ok(engine.render(TEMPLATE_NAME, &context)?)
            }
            Renderer::Tera {
                engine,
                offload: true,
            } => {
                let engine = Arc::clone(engine);
                let context = tera::Context::from_serialize(data)?;
                let source =
                    tokio::task::spawn_blocking(move || engine.render(TEMPLATE_NAME, &context))
                        .await??;
                Ok(source)
            }
        }
    }
}

/// Render the GraphiQL page.
pub async fn render_graphiql(
    data: &GraphiQLData,
    template: &str,
    renderer: &Renderer,
) -> Result<String, RenderError> {
    renderer.render(template, data).await
}

/// JSON for embedding inside a `<script>` block.
///
/// Characters that could close the script element, open an HTML comment or
/// end a JavaScript line are written as `\uXXXX` escapes. They only occur
/// inside JSON strings, where the escape decodes to the same text.
pub fn script_safe_json(value: &Value) -> serde_json::Result<String> {
    let encoded = serde_json::to_string(value)?;
    let mut output = String::with_capacity(encoded.len());
    for c in encoded.chars() {
        match c {
            '<' => output.push_str("\\u003c"),
            '>' => output.push_str("\\u003e"),
            '&' => output.push_str("\\u0026"),
            '\'' => output.push_str("\\u0027"),
            '\u{2028}' => output.push_str("\\u2028"),
            '\u{2029}' => output.push_str("\\u2029"),
            _ => output.push(c),
        }
    }
    Ok(output)
}

/// Tera's `json_encode`, replaced so every renderer emits script-safe JSON.
fn json_encode_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    script_safe_json(value)
        .map(Value::String)
        .map_err(|err| tera::Error::msg(err.to_string()))
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_expression(expression: &str, values: &Map<String, Value>) -> Result<String, RenderError> {
    let mut parts = expression.split('|').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let mut current = values.get(name).cloned().unwrap_or(Value::Null);
    let mut safe = false;

    for filter in parts {
        match filter.trim_end_matches("()") {
            "json_encode" => current = Value::String(script_safe_json(&current)?),
            "safe" => safe = true,
            "escape" | "e" => {
                current = Value::String(tera::escape_html(&display(&current)));
                safe = true;
            }
            other => return Err(RenderError::UnknownFilter(other.to_string())),
        }
    }

    let text = display(&current);
    Ok(if safe { text } else { tera::escape_html(&text) })
}

/// Substitute `{{ name | filter... }}` expressions.
///
/// Supports `json_encode`, `safe` and `escape`. Output is HTML-escaped
/// unless marked `safe`; unknown names render empty.
pub fn simple_renderer(template: &str, values: &Map<String, Value>) -> Result<String, RenderError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            output.push_str(&rest[start..]);
            rest = "";
            break;
        };
        output.push_str(&render_expression(after[..end].trim(), values)?);
        rest = &after[end + 2..];
    }
    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphiql::template::GRAPHIQL_TEMPLATE;
    use serde_json::json;

    fn values(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn sample_data() -> GraphiQLData {
        GraphiQLData {
            query: Some("{test}".to_string()),
            result: Some("{\n  \"data\": {\n    \"test\": \"Hello World\"\n  }\n}".to_string()),
            ..GraphiQLData::default()
        }
    }

    const EXPECTED_FRAGMENT: &str = r#"{\n  \"data\": {\n    \"test\": \"Hello World\"\n  }\n}"#;

    #[test]
    fn substitutes_and_escapes() {
        let values = values(json!({ "title": "<b>Tom & Jerry</b>" }));

        let rendered = simple_renderer("<title>{{ title }}</title>", &values).unwrap();

        assert_eq!(
            rendered,
            "<title>&lt;b&gt;Tom &amp; Jerry&lt;&#x2F;b&gt;</title>"
        );
    }

    #[test]
    fn json_encode_safe_emits_literal() {
        let values = values(json!({ "query": "{ a }", "missing_value": null, "flag": true }));

        let rendered = simple_renderer(
            "{{query|json_encode|safe}};{{ missing_value | json_encode | safe }};{{ flag | json_encode() | safe }}",
            &values,
        )
        .unwrap();

        assert_eq!(rendered, r#""{ a }";null;true"#);
    }

    #[test]
    fn unknown_variables_render_empty() {
        let rendered = simple_renderer("[{{ nothing }}]", &Map::new()).unwrap();

        assert_eq!(rendered, "[]");
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let error = simple_renderer("{{ title | upper }}", &Map::new()).unwrap_err();

        assert!(matches!(error, RenderError::UnknownFilter(name) if name == "upper"));
    }

    #[test]
    fn unterminated_expression_is_kept() {
        let rendered = simple_renderer("a {{ b", &Map::new()).unwrap();

        assert_eq!(rendered, "a {{ b");
    }

    #[test]
    fn simple_renderer_embeds_pretty_result() {
        let data = sample_data();

        let page = tokio_test::block_on(render_graphiql(&data, GRAPHIQL_TEMPLATE, &Renderer::Simple))
            .unwrap();

        assert!(page.contains("<title>GraphiQL</title>"));
        assert!(page.contains(EXPECTED_FRAGMENT));
    }

    #[tokio::test]
    async fn every_renderer_embeds_the_same_result() {
        let data = sample_data();
        let simple = Renderer::Simple;
        let tera = Renderer::from_env(TemplateEnv::default(), GRAPHIQL_TEMPLATE).unwrap();
        let offloaded =
            Renderer::from_env(TemplateEnv::default().enable_async(true), GRAPHIQL_TEMPLATE)
                .unwrap();

        for renderer in [simple, tera, offloaded] {
            let page = renderer.render(GRAPHIQL_TEMPLATE, &data).await.unwrap();
            assert!(page.contains("<title>GraphiQL</title>"));
            assert!(page.contains(EXPECTED_FRAGMENT));
            assert!(page.contains(r#"query: "{test}","#));
        }
    }

    #[test]
    fn script_safe_json_escapes_markup() {
        let encoded = script_safe_json(&json!("</script><b a='1'>&\u{2028}")).unwrap();

        assert_eq!(
            encoded,
            r#""\u003c/script\u003e\u003cb a=\u00271\u0027\u003e\u0026\u2028""#
        );
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, json!("</script><b a='1'>&\u{2028}"));
    }

    #[tokio::test]
    async fn no_renderer_lets_values_close_the_script() {
        let data = GraphiQLData {
            query: Some("{test} # </script><script>alert(1)</script>".to_string()),
            ..GraphiQLData::default()
        };
        let simple = Renderer::Simple;
        let tera = Renderer::from_env(TemplateEnv::default(), GRAPHIQL_TEMPLATE).unwrap();
        let offloaded =
            Renderer::from_env(TemplateEnv::default().enable_async(true), GRAPHIQL_TEMPLATE)
                .unwrap();

        for renderer in [simple, tera, offloaded] {
            let page = renderer.render(GRAPHIQL_TEMPLATE, &data).await.unwrap();
            assert!(!page.contains("<script>alert(1)"));
            assert!(page.contains(r#"query: "{test} # \u003c/script\u003e\u003cscript\u003ealert(1)\u003c/script\u003e","#));
        }
    }

    #[tokio::test]
    async fn custom_title_is_rendered() {
        let data = GraphiQLData {
            graphiql_html_title: "Awesome".to_string(),
            ..GraphiQLData::default()
        };

        let page = Renderer::Simple
            .render(GRAPHIQL_TEMPLATE, &data)
            .await
            .unwrap();

        assert!(page.contains("<title>Awesome</title>"));
        assert!(page.contains("response: null,"));
    }
}
