//! # brevity
//!
//! Upload a PDF to a summarization service and get a short summary back.
//!
//! The summarization itself happens elsewhere: this crate owns the
//! request/response flow around it and a small health-check server.
//!
//! ## Flow
//!
//! ```text
//! PDF on disk / in memory
//!  │
//!  ├─ 1. Upload     validate %PDF magic + allowed word count (UploadRequest)
//!  ├─ 2. Orchestrate Idle → InFlight → Idle(Success | Failure)
//!  ├─ 3. Transport  POST multipart {file, wordCount} → {"summary": "..."}
//!  └─ 4. Display    SummaryView { summary, font, word_count }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brevity::{summarize, SummarizeConfig, WordCount};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SummarizeConfig::builder()
//!         .backend_url("http://127.0.0.1:8000")
//!         .word_count(WordCount::W150)
//!         .build()?;
//!     let view = summarize("document.pdf", &config).await?;
//!     println!("{}", view.summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `brevity` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod output;
pub mod server;
pub mod summarize;
pub mod transport;
pub mod upload;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ServerConfig, SummarizeConfig, SummarizeConfigBuilder, WordCount};
pub use error::BrevityError;
pub use notify::{NoopNotifyCallback, NotifyCallback, UploadNotifyCallback};
pub use orchestrator::{UploadOrchestrator, UploadResult, UploadState};
pub use output::SummaryView;
pub use summarize::{summarize, summarize_bytes, summarize_sync};
pub use transport::{HttpTransport, SummaryTransport};
pub use upload::UploadRequest;
