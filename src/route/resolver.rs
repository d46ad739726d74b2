//! Matching request paths against dynamic route templates

use regex::Regex;
use tracing::debug;

use crate::{HarmockError, Result};

use super::{DYNAMIC_MARKER, DYNAMIC_SEGMENT, INFERRED_ID_NAME, SEGMENT_CHARS};

/// A request path resolved to its route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Route template (`/api/v1/user/:id`)
    pub api: String,
    /// Filesystem-safe form of the template (`/api/v1/user/[id]`)
    pub dir: String,
    /// Index of the configured template that matched, if any
    pub template_index: Option<usize>,
}

/// Compiled template matcher
#[derive(Debug, Clone)]
struct CompiledTemplate {
    template: String,
    dir: String,
    matcher: Regex,
}

/// Resolves request paths against an ordered list of dynamic route templates
///
/// Templates are tried in the order they were configured and the first match
/// wins. Paths matching no template fall back to numeric id inference.
#[derive(Debug, Clone, Default)]
pub struct RouteResolver {
    templates: Vec<CompiledTemplate>,
}

impl RouteResolver {
    /// Compile a resolver from route templates
    ///
    /// # Errors
    ///
    /// Returns error if a template does not compile to a valid matcher
    pub fn new<S: AsRef<str>>(templates: &[S]) -> Result<Self> {
        let templates = templates
            .iter()
            .map(|template| {
                let template = template.as_ref();
                Ok(CompiledTemplate {
                    template: template.to_string(),
                    dir: bracket_markers(template),
                    matcher: compile_template(template)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { templates })
    }

    /// Resolve a request path (no query string) to its route
    ///
    /// Empty segments are dropped first, so `/api/list/` and `/api//list`
    /// resolve to the same route as `/api/list`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let path = normalize_path(path);
        let path = path.as_str();

        if let Some((index, compiled)) = self
            .templates
            .iter()
            .enumerate()
            .find(|(_, compiled)| compiled.matcher.is_match(path))
        {
            debug!("Path {} matched template {}", path, compiled.template);
            return ResolvedRoute {
                api: compiled.template.clone(),
                dir: compiled.dir.clone(),
                template_index: Some(index),
            };
        }

        ResolvedRoute {
            api: replace_numeric_segments(path, &format!("{DYNAMIC_MARKER}{INFERRED_ID_NAME}")),
            dir: replace_numeric_segments(path, &format!("[{INFERRED_ID_NAME}]")),
            template_index: None,
        }
    }
}

/// `/api//list/` -> `/api/list`
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Reject templates that could never match a normalized path
fn validate_template(template: &str) -> Result<()> {
    if template != "/" && normalize_path(template) != template {
        return Err(HarmockError::InvalidRoute(format!(
            "{template}: empty path segment"
        )));
    }

    let markers = template.matches(DYNAMIC_MARKER).count();
    if DYNAMIC_SEGMENT.find_iter(template).count() != markers {
        return Err(HarmockError::InvalidRoute(format!(
            "{template}: dynamic marker without a name"
        )));
    }

    Ok(())
}

/// Build an anchored matcher where each dynamic marker accepts one segment
fn compile_template(template: &str) -> Result<Regex> {
    validate_template(template)?;

    let mut pattern = String::from("^");
    let mut literal_start = 0;

    for marker in DYNAMIC_SEGMENT.find_iter(template) {
        pattern.push_str(&regex::escape(&template[literal_start..marker.start()]));
        pattern.push_str(SEGMENT_CHARS);
        literal_start = marker.end();
    }
    pattern.push_str(&regex::escape(&template[literal_start..]));
    pattern.push('$');

    Regex::new(&pattern).map_err(|e| HarmockError::InvalidRoute(format!("{template}: {e}")))
}

/// `/scan/:container-name/x` -> `/scan/[container-name]/x`
fn bracket_markers(template: &str) -> String {
    DYNAMIC_SEGMENT.replace_all(template, "[${1}]").into_owned()
}

/// Replace every all-digit path segment with `replacement`
fn replace_numeric_segments(path: &str, replacement: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                replacement
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
