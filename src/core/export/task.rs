// ─── Export Task ───
// Collects the files of an instance that go into an exported pack. The
// walk runs on the blocking pool and can be aborted from another task;
// writing the archive is left to the caller.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use super::filter::ExportFilter;
use super::options::{normalize_output_path, ExportOptions, ExportProvider};
use crate::core::error::{PackError, PackResult};
use crate::core::instance::Instance;

/// Everything an archive writer needs to produce the pack.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub provider: ExportProvider,
    pub name: String,
    pub version: String,
    pub summary: String,
    pub author: String,
    pub optional_files: bool,
    pub output: PathBuf,
    /// Files relative to the instance root, sorted.
    pub files: Vec<PathBuf>,
}

pub struct ExportTask {
    instance: Instance,
    options: ExportOptions,
    provider: ExportProvider,
    output: PathBuf,
    filter: ExportFilter,
    abort: Arc<AtomicBool>,
}

impl ExportTask {
    pub fn new(
        instance: Instance,
        options: ExportOptions,
        provider: ExportProvider,
        output: PathBuf,
        filter: ExportFilter,
    ) -> Self {
        Self {
            instance,
            options,
            provider,
            output: normalize_output_path(provider, output),
            filter,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that aborts the walk when set.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub async fn run(self) -> PackResult<ExportPlan> {
        self.options.validate(self.provider)?;

        let root = self.instance.path.clone();
        let filter = self.filter;
        let abort = Arc::clone(&self.abort);
        let files = tokio::task::spawn_blocking(move || filter.walk(&root, &abort))
            .await
            .map_err(|e| PackError::Other(format!("Export walk panicked: {e}")))??;

        let name = self.options.effective_name(&self.instance.name).to_string();
        info!(
            "Prepared {:?} export '{}' of {} files -> {:?}",
            self.provider,
            name,
            files.len(),
            self.output
        );

        Ok(ExportPlan {
            provider: self.provider,
            name,
            version: self.options.version,
            summary: self.options.summary,
            author: self.options.author,
            optional_files: self.options.optional_files,
            output: self.output,
            files,
        })
    }
}
