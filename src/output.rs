//! What the display layer renders once an upload succeeds.

use crate::config::{SummarizeConfig, WordCount};
use serde::{Deserialize, Serialize};

/// A summary together with the display choices it was requested with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    /// File the summary was produced from.
    pub file_name: String,
    /// Summary text exactly as returned by the service.
    pub summary: String,
    /// Font the summary is displayed in.
    pub font: String,
    /// Requested summary length.
    pub word_count: WordCount,
    /// Wall-clock time of the upload in milliseconds.
    pub duration_ms: u64,
}

impl SummaryView {
    pub fn new(file_name: impl Into<String>, summary: impl Into<String>, config: &SummarizeConfig) -> Self {
        Self {
            file_name: file_name.into(),
            summary: summary.into(),
            font: config.font.clone(),
            word_count: config.word_count,
            duration_ms: 0,
        }
    }

    /// Number of whitespace-separated words in the summary.
    pub fn actual_word_count(&self) -> usize {
        self.summary.split_whitespace().count()
    }
}
