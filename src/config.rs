//! Configuration types for Harmock

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::generate::{JsonRenderer, Renderer, TemplateRenderer};
use crate::route::RouteResolver;
use crate::{HarmockError, Result};

/// Methods a route may be generated for
pub const KNOWN_METHODS: &[&str] = &["get", "post", "put", "patch", "delete", "head", "options"];

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "harmock.toml";

/// Independent overwrite switches for generated files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverwritePolicy {
    /// Rewrite existing handler source files
    #[serde(default, alias = "api")]
    pub source: bool,
    /// Rewrite existing fixture files
    #[serde(default, alias = "data")]
    pub fixture: bool,
}

impl OverwritePolicy {
    /// Same policy for source and fixture
    #[must_use]
    pub fn both(overwrite: bool) -> Self {
        Self {
            source: overwrite,
            fixture: overwrite,
        }
    }
}

/// Overwrite setting as written in the config file
///
/// Either `overwrite = true` or `[overwrite] source = true, fixture = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverwriteSetting {
    /// One switch for both files
    All(bool),
    /// Separate switches
    Split(OverwritePolicy),
}

impl Default for OverwriteSetting {
    fn default() -> Self {
        Self::All(false)
    }
}

impl OverwriteSetting {
    /// Resolve into independent switches
    #[must_use]
    pub fn policy(self) -> OverwritePolicy {
        match self {
            Self::All(overwrite) => OverwritePolicy::both(overwrite),
            Self::Split(policy) => policy,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory generated files are written under
    pub output_dir: PathBuf,
    /// HAR capture to read
    pub har_path: PathBuf,
    /// Extension of generated source files
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Methods to generate handlers for
    #[serde(default = "default_methods")]
    pub supported_methods: Vec<String>,
    /// Whether existing files are rewritten
    #[serde(default)]
    pub overwrite: OverwriteSetting,
    /// Route templates with `:name` dynamic segments, tried in order
    #[serde(default)]
    pub dynamic_routes: Vec<String>,
    /// Only paths starting with this prefix are kept; stripped when naming
    #[serde(default)]
    pub path_prefix: String,
    /// Inline source template
    #[serde(default)]
    pub template: Option<String>,
    /// Source template file
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

fn default_extension() -> String {
    ".ts".to_string()
}

fn default_methods() -> Vec<String> {
    vec!["get".to_string()]
}

impl Config {
    /// Configuration with defaults for everything but the two paths
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, har_path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            har_path: har_path.into(),
            extension: default_extension(),
            supported_methods: default_methods(),
            overwrite: OverwriteSetting::default(),
            dynamic_routes: Vec::new(),
            path_prefix: String::new(),
            template: None,
            template_path: None,
        }
    }

    /// Load configuration from TOML file
    ///
    /// Relative paths are resolved against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, parsed or validated
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HarmockError::ConfigError(format!("Failed to read config file: {e}")))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| HarmockError::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;

        let cwd = std::env::current_dir()?;
        config.normalize(&cwd);
        Ok(config)
    }

    /// Resolve relative paths against `base` and add a missing extension dot
    pub fn normalize(&mut self, base: &Path) {
        self.output_dir = resolve_path(base, &self.output_dir);
        self.har_path = resolve_path(base, &self.har_path);
        self.template_path = self
            .template_path
            .as_deref()
            .map(|path| resolve_path(base, path));

        if !self.extension.is_empty() && !self.extension.starts_with('.') {
            self.extension.insert(0, '.');
        }
    }

    /// Resolved overwrite switches
    #[must_use]
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite.policy()
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(HarmockError::ConfigError(
                "output_dir cannot be empty".to_string(),
            ));
        }

        if self.har_path.as_os_str().is_empty() {
            return Err(HarmockError::ConfigError(
                "har_path cannot be empty".to_string(),
            ));
        }

        if self.supported_methods.is_empty() {
            return Err(HarmockError::ConfigError(
                "At least one supported method must be configured".to_string(),
            ));
        }

        for method in &self.supported_methods {
            if !KNOWN_METHODS.contains(&method.to_lowercase().as_str()) {
                return Err(HarmockError::ConfigError(format!(
                    "Unsupported method: {method}"
                )));
            }
        }

        for (i, route) in self.dynamic_routes.iter().enumerate() {
            if !route.starts_with('/') {
                return Err(HarmockError::ConfigError(format!(
                    "Dynamic route {i}: '{route}' must start with '/'"
                )));
            }
        }

        RouteResolver::new(&self.dynamic_routes)
            .map_err(|e| HarmockError::ConfigError(e.to_string()))?;

        if !self.path_prefix.is_empty() && !self.path_prefix.starts_with('/') {
            return Err(HarmockError::ConfigError(format!(
                "path_prefix '{}' must start with '/'",
                self.path_prefix
            )));
        }

        if self.template.is_some() && self.template_path.is_some() {
            return Err(HarmockError::ConfigError(
                "Only one of template and template_path may be set".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the renderer selected by this configuration
    ///
    /// # Errors
    ///
    /// Returns error if `template_path` cannot be read
    pub fn renderer(&self) -> Result<Arc<dyn Renderer>> {
        if let Some(template) = &self.template {
            return Ok(Arc::new(TemplateRenderer::new(template.clone())));
        }

        if let Some(path) = &self.template_path {
            let template = std::fs::read_to_string(path).map_err(|e| {
                HarmockError::ConfigError(format!(
                    "Failed to read template {}: {e}",
                    path.display()
                ))
            })?;
            return Ok(Arc::new(TemplateRenderer::new(template)));
        }

        Ok(Arc::new(JsonRenderer))
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
