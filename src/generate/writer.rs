//! Writing handler sources and fixtures for route entries

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::capture::{RouteEntry, RouteMap};
use crate::config::{Config, OverwritePolicy};
use crate::route::{derive_identifier, strip_route_prefix};

use super::renderer::{RenderContext, Renderer};
use super::{DATA_NAME, FIXTURE_EXTENSION};

/// What happened to one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File was (re)written
    Written(PathBuf),
    /// File existed and overwriting was disabled
    Skipped(PathBuf),
}

/// A per-entry failure; never aborts sibling entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// Directory or file the failure concerns
    pub path: PathBuf,
    /// Underlying error message
    pub message: String,
}

type FileResult = std::result::Result<FileOutcome, WriteFailure>;

/// Summary of a write run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Files written, sorted
    pub written: Vec<PathBuf>,
    /// Existing files left untouched, sorted
    pub skipped: Vec<PathBuf>,
    /// Failures, sorted by path
    pub failures: Vec<WriteFailure>,
}

impl GenerateReport {
    /// Whether every entry was processed without error
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, result: FileResult) {
        match result {
            Ok(FileOutcome::Written(path)) => self.written.push(path),
            Ok(FileOutcome::Skipped(path)) => self.skipped.push(path),
            Err(failure) => self.failures.push(failure),
        }
    }

    fn sort(&mut self) {
        self.written.sort();
        self.skipped.sort();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

/// Writes `{method}{extension}` and `{method}.json` for every route entry
///
/// Each entry is handled by its own task; the run completes when every
/// task has settled.
#[derive(Clone)]
pub struct MockWriter {
    output_dir: PathBuf,
    extension: String,
    overwrite: OverwritePolicy,
    path_prefix: String,
    renderer: Arc<dyn Renderer>,
}

impl MockWriter {
    /// Create a writer
    #[must_use]
    pub fn new(
        output_dir: PathBuf,
        extension: impl Into<String>,
        overwrite: OverwritePolicy,
        path_prefix: impl Into<String>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            output_dir,
            extension: extension.into(),
            overwrite,
            path_prefix: path_prefix.into(),
            renderer,
        }
    }

    /// Create a writer from configuration
    #[must_use]
    pub fn from_config(config: &Config, renderer: Arc<dyn Renderer>) -> Self {
        Self::new(
            config.output_dir.clone(),
            config.extension.clone(),
            config.overwrite_policy(),
            config.path_prefix.clone(),
            renderer,
        )
    }

    /// Identifier generated for an entry, with the path prefix stripped
    #[must_use]
    pub fn identifier_for(&self, entry: &RouteEntry) -> String {
        derive_identifier(strip_route_prefix(&entry.api, &self.path_prefix), &entry.method)
    }

    /// Directory an entry's files are written to
    #[must_use]
    pub fn entry_dir(&self, entry: &RouteEntry) -> PathBuf {
        self.output_dir.join(entry.dir.trim_start_matches('/'))
    }

    /// Write every entry concurrently and wait for all of them
    pub async fn write_all(&self, routes: RouteMap) -> GenerateReport {
        let mut tasks = JoinSet::new();

        for entry in routes.into_values() {
            let writer = self.clone();
            tasks.spawn(async move { writer.write_entry(entry).await });
        }

        let mut report = GenerateReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(results) => results.into_iter().for_each(|result| report.record(result)),
                Err(e) => {
                    error!("Write task aborted: {}", e);
                    report.failures.push(WriteFailure {
                        path: self.output_dir.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report.sort();
        report
    }

    /// Create the entry directory, then write fixture and source independently
    async fn write_entry(&self, entry: RouteEntry) -> Vec<FileResult> {
        let dir = self.entry_dir(&entry);

        if entry.dir.split('/').any(|segment| segment == "..") {
            error!("Refusing to write {}: outside {}", dir.display(), self.output_dir.display());
            return vec![Err(WriteFailure {
                path: dir,
                message: "route directory escapes the output root".to_string(),
            })];
        }

        if let Err(e) = fs::create_dir_all(&dir).await {
            error!("Failed to create {}: {}", dir.display(), e);
            return vec![Err(WriteFailure {
                path: dir,
                message: e.to_string(),
            })];
        }

        let identifier = self.identifier_for(&entry);
        let source = self.renderer.render(&RenderContext {
            identifier: &identifier,
            method: &entry.method,
            api: &entry.api,
            data_name: DATA_NAME,
        });

        let fixture_path = dir.join(format!("{}{FIXTURE_EXTENSION}", entry.method));
        let source_path = dir.join(format!("{}{}", entry.method, self.extension));

        let (fixture, source) = tokio::join!(
            write_file(
                fixture_path,
                entry.response_text.as_bytes(),
                self.overwrite.fixture
            ),
            write_file(source_path, source.as_bytes(), self.overwrite.source),
        );

        vec![fixture, source]
    }
}

async fn write_file(path: PathBuf, contents: &[u8], overwrite: bool) -> FileResult {
    match write_if_allowed(&path, contents, overwrite).await {
        Ok(true) => {
            debug!("Wrote {}", path.display());
            Ok(FileOutcome::Written(path))
        }
        Ok(false) => {
            debug!("Keeping existing {}", path.display());
            Ok(FileOutcome::Skipped(path))
        }
        Err(e) => {
            warn!("Failed to write {}: {}", path.display(), e);
            Err(WriteFailure {
                path,
                message: e.to_string(),
            })
        }
    }
}

/// Existence is checked right before writing; not atomic with the write
async fn write_if_allowed(path: &Path, contents: &[u8], overwrite: bool) -> io::Result<bool> {
    if !overwrite && fs::try_exists(path).await? {
        return Ok(false);
    }

    fs::write(path, contents).await?;
    Ok(true)
}
