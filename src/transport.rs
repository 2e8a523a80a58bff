//! Transport: deliver an [`UploadRequest`] to the summarization service.
//!
//! The service is a black box reached through one HTTP contract:
//!
//! ```text
//! POST {backend_url}/upload/
//! Content-Type: multipart/form-data
//!   file       binary PDF (filename + application/pdf)
//!   wordCount  decimal string, e.g. "150"
//!
//! 200 {"summary": "..."}
//! ```
//!
//! One request, one response. Nothing here retries, streams or chunks; any
//! failure is handed back to the orchestrator as a [`BrevityError`].
//!
//! [`SummaryTransport`] is the seam the orchestrator depends on, so tests and
//! embedders can swap in a stub without a network.

use crate::config::SummarizeConfig;
use crate::error::BrevityError;
use crate::upload::UploadRequest;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest slice of an error body kept in [`BrevityError::RemoteError`].
const MAX_ERROR_BODY: usize = 512;

/// Something that can turn an uploaded PDF into summary text.
#[async_trait]
pub trait SummaryTransport: Send + Sync {
    /// Send the request and return the summary text.
    async fn summarize(&self, request: &UploadRequest) -> Result<String, BrevityError>;
}

/// Success body returned by the service.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

/// [`SummaryTransport`] over HTTP using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    timeout_secs: Option<u64>,
}

impl HttpTransport {
    /// Build a transport for the upload URL and timeout in `config`.
    pub fn new(config: &SummarizeConfig) -> Result<Self, BrevityError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BrevityError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.upload_url(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// The endpoint this transport posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(request: &UploadRequest) -> Result<Form, BrevityError> {
        let part = Part::bytes(request.bytes().to_vec())
            .file_name(request.file_name().to_string())
            .mime_str(request.content_type())
            .map_err(|e| BrevityError::Internal(format!("Invalid content type: {e}")))?;

        Ok(Form::new()
            .part("file", part)
            .text("wordCount", request.word_count().to_string()))
    }

    fn map_send_error(&self, e: reqwest::Error) -> BrevityError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => BrevityError::Timeout {
                url: self.url.clone(),
                secs,
            },
            _ => BrevityError::TransportFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl SummaryTransport for HttpTransport {
    async fn summarize(&self, request: &UploadRequest) -> Result<String, BrevityError> {
        let form = Self::build_form(request)?;
        info!(
            "Uploading '{}' ({} bytes, {} words) to {}",
            request.file_name(),
            request.bytes().len(),
            request.word_count(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!("Summarization service returned HTTP {}", status);
            return Err(BrevityError::RemoteError {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let parsed: SummaryResponse =
            serde_json::from_str(&body).map_err(|e| BrevityError::InvalidResponse {
                detail: format!("{e}; body: {}", truncate(&body, MAX_ERROR_BODY)),
            })?;

        debug!("Received summary of {} chars", parsed.summary.len());
        Ok(parsed.summary)
    }
}

/// Cut `s` to at most `max` bytes on a char boundary, marking the cut.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\u{2026}", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordCount;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "ééééé"; // 2 bytes each
        let t = truncate(s, 3);
        assert_eq!(t, "é\u{2026}");
    }

    #[test]
    fn transport_uses_config_url() {
        let config = SummarizeConfig::builder()
            .backend_url("http://summarizer.internal:9000/")
            .build()
            .unwrap();
        let t = HttpTransport::new(&config).unwrap();
        assert_eq!(t.url(), "http://summarizer.internal:9000/upload/");
    }

    #[test]
    fn form_builds_for_valid_request() {
        let req = UploadRequest::from_bytes("a.pdf", b"%PDF-1.7".to_vec(), WordCount::W50).unwrap();
        assert!(HttpTransport::build_form(&req).is_ok());
    }

    #[test]
    fn success_body_requires_summary_string() {
        assert!(serde_json::from_str::<SummaryResponse>(r#"{"summary":"ok"}"#).is_ok());
        assert!(serde_json::from_str::<SummaryResponse>(r#"{"summary":5}"#).is_err());
        assert!(serde_json::from_str::<SummaryResponse>(r#"{"text":"ok"}"#).is_err());
    }
}
