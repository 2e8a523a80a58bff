//! Upload orchestrator: the request lifecycle behind the "Upload & Summarize"
//! button.
//!
//! ```text
//!            submit(Some(req))                 transport Ok / Err
//!   Idle ───────────────────────▶ InFlight ─────────────────────────▶ Idle
//!     │                                                      (Success | Failure stored)
//!     └── submit(None) ──▶ Failure("no file selected"), no request sent
//! ```
//!
//! At most one upload is in flight per orchestrator. A `submit` that
//! arrives while another is outstanding is rejected immediately rather than
//! racing the first one for the result slot, so the displayed result always
//! belongs to the request the user started first.
//!
//! There is no retry and no cancellation. Dropping a `submit` future
//! mid-flight returns the orchestrator to `Idle` and leaves the slot empty.

use crate::config::{SummarizeConfig, WordCount};
use crate::error::BrevityError;
use crate::notify::{NoopNotifyCallback, NotifyCallback};
use crate::transport::{HttpTransport, SummaryTransport};
use crate::upload::UploadRequest;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Where the orchestrator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
}

/// Terminal outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadResult {
    Success { summary_text: String },
    Failure { reason: String },
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Success { .. })
    }

    /// Summary text, if this is a success.
    pub fn summary_text(&self) -> Option<&str> {
        match self {
            UploadResult::Success { summary_text } => Some(summary_text),
            UploadResult::Failure { .. } => None,
        }
    }

    fn failure(err: &BrevityError) -> Self {
        UploadResult::Failure {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    state: UploadState,
    result: Option<UploadResult>,
}

/// Owns the upload lifecycle and the most recent result.
///
/// Cheap to share: wrap it in an `Arc` and call [`submit`](Self::submit)
/// from any task.
pub struct UploadOrchestrator {
    transport: Arc<dyn SummaryTransport>,
    notify: NotifyCallback,
    slot: Mutex<Slot>,
}

impl UploadOrchestrator {
    /// Create an orchestrator around an explicit transport.
    pub fn new(transport: Arc<dyn SummaryTransport>) -> Self {
        Self {
            transport,
            notify: Arc::new(NoopNotifyCallback),
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Create an orchestrator from a config.
    ///
    /// Uses `config.transport` when set, otherwise an [`HttpTransport`]
    /// pointed at `config.upload_url()`.
    pub fn from_config(config: &SummarizeConfig) -> Result<Self, BrevityError> {
        let transport: Arc<dyn SummaryTransport> = match config.transport {
            Some(ref t) => Arc::clone(t),
            None => Arc::new(HttpTransport::new(config)?),
        };
        let mut orchestrator = Self::new(transport);
        if let Some(ref cb) = config.notify {
            orchestrator.notify = Arc::clone(cb);
        }
        Ok(orchestrator)
    }

    /// Replace the notification callback.
    pub fn with_notify(mut self, notify: NotifyCallback) -> Self {
        self.notify = notify;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> UploadState {
        self.lock().state
    }

    /// Result of the most recent completed submission, if any.
    pub fn result(&self) -> Option<UploadResult> {
        self.lock().result.clone()
    }

    /// Summary text currently on display, if the last submission succeeded.
    pub fn summary(&self) -> Option<String> {
        self.lock()
            .result
            .as_ref()
            .and_then(|r| r.summary_text().map(str::to_string))
    }

    /// Upload `file` and wait for its outcome.
    ///
    /// * `None` → `Failure("no file selected")` without touching the network.
    /// * Busy   → `Failure("an upload is already in progress")`; the result of
    ///   the in-flight upload is left alone.
    /// * Otherwise the transport's outcome, which is also stored.
    pub async fn submit(&self, file: Option<UploadRequest>) -> UploadResult {
        let Some(request) = file else {
            info!("Submit without a file; nothing sent");
            let result = UploadResult::failure(&BrevityError::NoFileSelected);
            self.store_if_idle(&result);
            self.notify.on_no_file();
            return result;
        };

        match self.try_submit(request).await {
            Ok(summary_text) => UploadResult::Success { summary_text },
            Err(e) => UploadResult::failure(&e),
        }
    }

    /// Like [`submit`](Self::submit) for a request that is known to exist,
    /// but hands back the typed error instead of a display string.
    pub async fn try_submit(&self, request: UploadRequest) -> Result<String, BrevityError> {
        {
            let mut slot = self.lock();
            if slot.state == UploadState::InFlight {
                drop(slot);
                warn!("Rejected submit: an upload is already in progress");
                self.notify.on_rejected_busy();
                return Err(BrevityError::UploadInProgress);
            }
            slot.state = UploadState::InFlight;
            slot.result = None;
        }

        let _guard = InFlightGuard { slot: &self.slot };
        let file_name = request.file_name();
        self.notify.on_upload_start(file_name, request.word_count().get());
        debug!("Upload of '{}' in flight", file_name);

        let outcome = self.transport.summarize(&request).await;
        let result = match &outcome {
            Ok(summary_text) => {
                info!("Summary generated for '{}'", file_name);
                self.notify.on_upload_complete(file_name, summary_text.len());
                UploadResult::Success {
                    summary_text: summary_text.clone(),
                }
            }
            Err(e) => {
                warn!("Error summarizing '{}': {}", file_name, e);
                self.notify.on_upload_error(file_name, &e.to_string());
                UploadResult::failure(e)
            }
        };

        self.lock().result = Some(result);
        outcome
    }

    /// Read `path` (if any) and submit it with `word_count`.
    ///
    /// Input errors (missing file, not a PDF) become a `Failure` the same way
    /// transport errors do, and no request is sent for them.
    pub async fn submit_path(&self, path: Option<&Path>, word_count: WordCount) -> UploadResult {
        let Some(path) = path else {
            return self.submit(None).await;
        };
        match UploadRequest::from_path(path, word_count).await {
            Ok(request) => self.submit(Some(request)).await,
            Err(e) => {
                warn!("Cannot upload '{}': {}", path.display(), e);
                let result = UploadResult::failure(&e);
                self.store_if_idle(&result);
                self.notify.on_upload_error(&path.display().to_string(), &e.to_string());
                result
            }
        }
    }

    /// Record a locally produced failure unless an upload owns the slot.
    fn store_if_idle(&self, result: &UploadResult) {
        let mut slot = self.lock();
        if slot.state == UploadState::Idle {
            slot.result = Some(result.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the slot to `Idle` when the in-flight submit finishes or is dropped.
struct InFlightGuard<'a> {
    slot: &'a Mutex<Slot>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state = UploadState::Idle;
    }
}
