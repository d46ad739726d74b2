//! Rendering handler source text for a route

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// `{{ name }}` placeholder in a source template
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_]+)\s*\}\}").expect("placeholder regex"));

/// Values a renderer may place in generated source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext<'a> {
    /// Handler identifier (`getUserList`)
    pub identifier: &'a str,
    /// Lower-case method
    pub method: &'a str,
    /// Route template
    pub api: &'a str,
    /// Name the fixture is imported under
    pub data_name: &'a str,
}

/// Turns a route's identity into source text
///
/// Implementations must be deterministic and must not perform I/O; they are
/// shared across concurrent write tasks.
pub trait Renderer: Send + Sync {
    /// Render the source file for one route
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        self(ctx)
    }
}

/// Renders the context itself as a JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        serde_json::to_string(ctx).unwrap_or_default()
    }
}

/// Substitutes `{{identifier}}`, `{{method}}`, `{{api}}` and `{{dataName}}`
///
/// Unknown placeholders are left as written.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
}

impl TemplateRenderer {
    /// Create a renderer from template text
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |captures: &Captures<'_>| {
                match &captures[1] {
                    "identifier" => ctx.identifier.to_string(),
                    "method" => ctx.method.to_string(),
                    "api" => ctx.api.to_string(),
                    "dataName" => ctx.data_name.to_string(),
                    _ => captures[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: RenderContext<'static> = RenderContext {
        identifier: "getScanVulnerabilitiesByContainerName",
        method: "get",
        api: "/api/v1/dashboard/scan/:container-name/vulnerabilities",
        data_name: "data",
    };

    #[test]
    fn test_json_renderer() {
        let rendered = JsonRenderer.render(&CTX);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["identifier"], "getScanVulnerabilitiesByContainerName");
        assert_eq!(value["method"], "get");
        assert_eq!(value["dataName"], "data");
    }

    #[test]
    fn test_template_renderer() {
        let renderer = TemplateRenderer::new(
            "import {{dataName}} from './{{method}}.json';\n\
             export const {{ identifier }} = rest.{{method}}('{{api}}', () => {{dataName}});",
        );

        assert_eq!(
            renderer.render(&CTX),
            "import data from './get.json';\n\
             export const getScanVulnerabilitiesByContainerName = \
             rest.get('/api/v1/dashboard/scan/:container-name/vulnerabilities', () => data);"
        );
    }

    #[test]
    fn test_template_keeps_unknown_placeholders() {
        let renderer = TemplateRenderer::new("{{identifier}} {{unknown}} {single}");
        assert_eq!(
            renderer.render(&CTX),
            "getScanVulnerabilitiesByContainerName {{unknown}} {single}"
        );
    }

    fn method_and_identifier(ctx: &RenderContext<'_>) -> String {
        format!("{}:{}", ctx.method, ctx.identifier)
    }

    #[test]
    fn test_function_renderer() {
        let renderer: &dyn Renderer = &method_and_identifier;
        assert_eq!(
            renderer.render(&CTX),
            "get:getScanVulnerabilitiesByContainerName"
        );
    }
}
