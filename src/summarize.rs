//! One-shot entry points: read a PDF, upload it, return a [`SummaryView`].
//!
//! These wrap a fresh [`UploadOrchestrator`] per call and return typed
//! errors. Front ends that keep a result on screen between uploads should
//! hold an orchestrator themselves instead.

use crate::config::SummarizeConfig;
use crate::error::BrevityError;
use crate::orchestrator::UploadOrchestrator;
use crate::output::SummaryView;
use crate::upload::UploadRequest;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Summarize the PDF at `path` using `config`.
///
/// # Errors
/// Input errors (missing file, not a PDF) are returned before any request
/// is sent. Transport and remote errors are returned as they arrive; there
/// is no retry.
///
/// # Example
/// ```rust,no_run
/// use brevity::{summarize, SummarizeConfig, WordCount};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SummarizeConfig::builder()
///     .backend_url("http://127.0.0.1:8000")
///     .word_count(WordCount::W100)
///     .build()?;
/// let view = summarize("paper.pdf", &config).await?;
/// println!("{}", view.summary);
/// # Ok(())
/// # }
/// ```
pub async fn summarize(path: impl AsRef<Path>, config: &SummarizeConfig) -> Result<SummaryView, BrevityError> {
    let request = UploadRequest::from_path(path, config.word_count).await?;
    summarize_request(request, config).await
}

/// Summarize PDF bytes already in memory.
pub async fn summarize_bytes(
    file_name: impl Into<String>,
    bytes: Vec<u8>,
    config: &SummarizeConfig,
) -> Result<SummaryView, BrevityError> {
    let request = UploadRequest::from_bytes(file_name, bytes, config.word_count)?;
    summarize_request(request, config).await
}

/// Synchronous wrapper around [`summarize`].
///
/// Creates a temporary tokio runtime internally.
///
/// # Panics
/// Panics when called from inside an async context (tokio refuses to start
/// a runtime from within a runtime). Use [`summarize`] there instead.
pub fn summarize_sync(path: impl AsRef<Path>, config: &SummarizeConfig) -> Result<SummaryView, BrevityError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BrevityError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(summarize(path, config))
}

async fn summarize_request(request: UploadRequest, config: &SummarizeConfig) -> Result<SummaryView, BrevityError> {
    let start = Instant::now();
    let file_name = request.file_name().to_string();
    let orchestrator = UploadOrchestrator::from_config(config)?;

    let summary = orchestrator.try_submit(request).await?;

    let mut view = SummaryView::new(file_name, summary, config);
    view.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Summarized '{}' in {}ms ({} words)",
        view.file_name,
        view.duration_ms,
        view.actual_word_count()
    );
    Ok(view)
}
