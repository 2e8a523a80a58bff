//! Lifecycle notifications for an upload.
//!
//! Inject an [`Arc<dyn UploadNotifyCallback>`] via
//! [`crate::config::SummarizeConfigBuilder::notify`] to be told when an
//! upload starts and how it ends. This is where a front end shows its
//! transient toasts ("Summary generated!", "Error summarizing PDF!").
//!
//! # Example
//!
//! ```rust
//! use brevity::{SummarizeConfig, UploadNotifyCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl UploadNotifyCallback for CountingCallback {
//!     fn on_upload_complete(&self, _file_name: &str, summary_len: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Summary generated! ({summary_len} chars)");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//!
//! let config = SummarizeConfig::builder()
//!     .notify(counter as Arc<dyn UploadNotifyCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the orchestrator at each lifecycle transition.
///
/// All methods default to no-ops so callers only override what they need.
/// Implementations must be `Send + Sync`; an orchestrator shared through an
/// `Arc` may be driven from several tasks.
pub trait UploadNotifyCallback: Send + Sync {
    /// Submit was called without a file. No request is sent.
    fn on_no_file(&self) {}

    /// A submit was rejected because another upload is still in flight.
    fn on_rejected_busy(&self) {}

    /// The request is about to be sent.
    ///
    /// # Arguments
    /// * `file_name`  — name of the uploaded file
    /// * `word_count` — requested summary length
    fn on_upload_start(&self, file_name: &str, word_count: u32) {
        let _ = (file_name, word_count);
    }

    /// The service returned a summary.
    fn on_upload_complete(&self, file_name: &str, summary_len: usize) {
        let _ = (file_name, summary_len);
    }

    /// The request failed (transport or remote error).
    fn on_upload_error(&self, file_name: &str, error: &str) {
        let _ = (file_name, error);
    }
}

/// A no-op implementation, used when no callback is configured.
pub struct NoopNotifyCallback;

impl UploadNotifyCallback for NoopNotifyCallback {}

/// Convenience alias matching the type stored in [`crate::config::SummarizeConfig`].
pub type NotifyCallback = Arc<dyn UploadNotifyCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl UploadNotifyCallback for TrackingCallback {
        fn on_upload_start(&self, _file_name: &str, _word_count: u32) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_upload_complete(&self, _file_name: &str, _summary_len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_upload_error(&self, _file_name: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopNotifyCallback;
        cb.on_no_file();
        cb.on_rejected_busy();
        cb.on_upload_start("a.pdf", 150);
        cb.on_upload_complete("a.pdf", 42);
        cb.on_upload_error("a.pdf", "boom");
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_upload_start("a.pdf", 100);
        tracker.on_upload_complete("a.pdf", 10);
        tracker.on_upload_start("b.pdf", 100);
        tracker.on_upload_error("b.pdf", "HTTP 500");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: NotifyCallback = Arc::new(NoopNotifyCallback);
        cb.on_upload_start("x.pdf", 250);
    }
}
