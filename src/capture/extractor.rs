//! Filtering and deduplicating captured exchanges into route entries

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::route::RouteResolver;
use crate::Result;

use super::har::{Capture, CapturedExchange};

/// URL schemes whose paths can be mapped onto output directories
const WEB_SCHEMES: &[&str] = &["http", "https"];

/// Structured key identifying one (route, method) pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey {
    /// Route template
    pub api: String,
    /// Lower-case method
    pub method: String,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.api, self.method)
    }
}

/// Deduplicated traffic for one (route, method) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Route template, literal or with dynamic markers
    pub api: String,
    /// Output directory relative to the output root, markers bracketed
    pub dir: String,
    /// Lower-case method
    pub method: String,
    /// Response body of the last qualifying exchange
    pub response_text: String,
}

impl RouteEntry {
    /// Key this entry is stored under
    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey {
            api: self.api.clone(),
            method: self.method.clone(),
        }
    }
}

/// Route entries keyed by (route, method), iterated in key order
pub type RouteMap = BTreeMap<RouteKey, RouteEntry>;

/// Turns a capture into route entries
#[derive(Debug, Clone)]
pub struct CaptureExtractor {
    supported_methods: Vec<String>,
    path_prefix: String,
    resolver: RouteResolver,
}

impl CaptureExtractor {
    /// Create an extractor
    ///
    /// Methods are matched case-insensitively. An empty `path_prefix`
    /// accepts every path.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        supported_methods: &[S],
        path_prefix: impl Into<String>,
        resolver: RouteResolver,
    ) -> Self {
        Self {
            supported_methods: supported_methods
                .iter()
                .map(|method| method.as_ref().to_uppercase())
                .collect(),
            path_prefix: path_prefix.into(),
            resolver,
        }
    }

    /// Create an extractor from configuration
    ///
    /// # Errors
    ///
    /// Returns error if a dynamic route template is invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = RouteResolver::new(&config.dynamic_routes)?;
        Ok(Self::new(
            &config.supported_methods,
            config.path_prefix.clone(),
            resolver,
        ))
    }

    /// Extract one entry per distinct (route, method) pair
    ///
    /// Exchanges are processed in capture order, so the last qualifying
    /// exchange for a key provides the stored response text.
    #[must_use]
    pub fn extract(&self, capture: &Capture) -> RouteMap {
        let mut routes = RouteMap::new();
        let mut accepted = 0usize;

        for exchange in &capture.exchanges {
            let Some((method, pathname)) = self.accept(exchange) else {
                continue;
            };
            accepted += 1;

            let route = self.resolver.resolve(&pathname);
            let entry = RouteEntry {
                api: route.api,
                dir: route.dir,
                method,
                response_text: exchange.response_text.clone(),
            };

            if let Some(previous) = routes.insert(entry.key(), entry) {
                debug!("Replacing earlier exchange for {}", previous.key());
            }
        }

        info!(
            "Extracted {} routes from {} qualifying exchanges ({} total, {} malformed)",
            routes.len(),
            accepted,
            capture.exchanges.len(),
            capture.malformed
        );

        routes
    }

    /// Apply the exchange filter, returning the lower-case method and pathname
    fn accept(&self, exchange: &CapturedExchange) -> Option<(String, String)> {
        if !exchange.is_programmatic() {
            return None;
        }

        if !exchange.is_success() {
            debug!(
                "Skipping {} {}: status {}",
                exchange.method, exchange.url, exchange.status
            );
            return None;
        }

        let pathname = match Url::parse(&exchange.url) {
            Ok(url) if WEB_SCHEMES.contains(&url.scheme()) && !url.cannot_be_a_base() => {
                url.path().to_string()
            }
            Ok(url) => {
                debug!("Skipping non-http URL {}", url);
                return None;
            }
            Err(e) => {
                debug!("Skipping unparseable URL {}: {}", exchange.url, e);
                return None;
            }
        };

        if !pathname.starts_with(&self.path_prefix) {
            return None;
        }

        let method = exchange.method.to_uppercase();
        if !self.supported_methods.contains(&method) {
            debug!("Skipping {} {}: method not supported", method, pathname);
            return None;
        }

        Some((method.to_lowercase(), pathname))
    }
}
