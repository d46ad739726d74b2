//! Generating mock handler sources and fixtures

mod renderer;
mod writer;

pub use renderer::{JsonRenderer, RenderContext, Renderer, TemplateRenderer};
pub use writer::{FileOutcome, GenerateReport, MockWriter, WriteFailure};

use tracing::info;

use crate::capture::{Capture, CaptureExtractor};
use crate::config::Config;
use crate::Result;

/// Name the fixture is bound to in generated source
pub const DATA_NAME: &str = "data";

/// Extension of fixture files
pub const FIXTURE_EXTENSION: &str = ".json";

/// Run the whole pipeline: load the capture, extract routes, write files
///
/// Configuration and capture errors abort before anything is written.
/// Per-entry failures are logged and returned in the report.
///
/// # Errors
///
/// Returns error if the capture cannot be loaded, a dynamic route template
/// is invalid, or the renderer cannot be built
pub async fn generate(config: &Config) -> Result<GenerateReport> {
    info!("Generating mocks from {}", config.har_path.display());

    let capture = Capture::from_file(&config.har_path)?;
    let extractor = CaptureExtractor::from_config(config)?;
    let renderer = config.renderer()?;

    let routes = extractor.extract(&capture);
    let writer = MockWriter::from_config(config, renderer);
    let report = writer.write_all(routes).await;

    info!(
        "Generation complete: {} written, {} kept, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failures.len()
    );

    Ok(report)
}
