//! Error types for the brevity library.
//!
//! Every failure the library can report is a [`BrevityError`]. The variants
//! fall into three groups that the orchestrator treats the same way at the
//! display layer but that callers may want to tell apart:
//!
//! * **Input errors** — nothing was selected, or the selection is not a
//!   usable PDF. These are caught locally and never reach the network.
//! * **Transport errors** — the request could not be delivered or no answer
//!   arrived (connection refused, DNS, timeout).
//! * **Remote errors** — the summarization service answered, but not with a
//!   usable summary (non-2xx status, malformed JSON).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the brevity library.
#[derive(Debug, Error)]
pub enum BrevityError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Submit was called without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The selected file has no content.
    #[error("File '{name}' is empty")]
    EmptyFile { name: String },

    /// The file was read, but is not a PDF.
    #[error("File is not a valid PDF: '{name}'\nFirst bytes: {magic:?}")]
    NotAPdf { name: String, magic: Vec<u8> },

    /// Requested summary length is not one of the offered choices.
    #[error("Invalid word count {value}: choose one of 50, 100, 150, 200, 250")]
    InvalidWordCount { value: u32 },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The request could not be sent or the connection dropped.
    #[error("Failed to reach summarization service at '{url}': {reason}")]
    TransportFailed { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Summarization request to '{url}' timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    // ── Remote errors ─────────────────────────────────────────────────────
    /// The service answered with a non-success status.
    #[error("Summarization service returned HTTP {status}: {body}")]
    RemoteError { status: u16, body: String },

    /// The service answered 2xx but the body carried no summary.
    #[error("Unexpected response from summarization service: {detail}")]
    InvalidResponse { detail: String },

    // ── Lifecycle errors ──────────────────────────────────────────────────
    /// Another upload is still in flight on the same orchestrator.
    #[error("an upload is already in progress")]
    UploadInProgress,

    // ── Config / server errors ────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The health-check server could not bind or stopped with an error.
    #[error("Health server failed on {addr}: {source}")]
    ServerFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BrevityError {
    /// True for errors raised before any network traffic happened.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BrevityError::NoFileSelected
                | BrevityError::FileNotFound { .. }
                | BrevityError::EmptyFile { .. }
                | BrevityError::NotAPdf { .. }
                | BrevityError::InvalidWordCount { .. }
        )
    }
}
