//! Configuration types for uploading and summarizing.
//!
//! [`SummarizeConfig`] carries every value a front end keeps as
//! component state (target length, display font) plus the connection
//! settings for the summarization service. It is built via
//! [`SummarizeConfigBuilder`] and passed explicitly into the orchestrator;
//! nothing here is a process-wide global.
//!
//! [`ServerConfig`] holds the bind address of the health-check server and is
//! read from the environment.

use crate::error::BrevityError;
use crate::notify::NotifyCallback;
use crate::transport::SummaryTransport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Default origin of the summarization service.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default upload path on the summarization service.
pub const DEFAULT_UPLOAD_PATH: &str = "/upload/";

/// Default display font for the summary text.
pub const DEFAULT_FONT: &str = "Arial";

/// Fonts offered by the front end. Others are accepted but logged.
pub const FONT_CHOICES: [&str; 5] = ["Arial", "Georgia", "Times New Roman", "Verdana", "Courier New"];

/// Configuration for an upload-and-summarize session.
///
/// # Example
/// ```rust
/// use brevity::{SummarizeConfig, WordCount};
///
/// let config = SummarizeConfig::builder()
///     .backend_url("http://localhost:8000")
///     .word_count(WordCount::W200)
///     .font("Georgia")
///     .build()
///     .unwrap();
/// assert_eq!(config.word_count.get(), 200);
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Origin of the summarization service, without a trailing slash.
    pub backend_url: String,

    /// Path of the upload endpoint. Default: `/upload/`.
    pub upload_path: String,

    /// Target summary length. Default: 150 words.
    pub word_count: WordCount,

    /// Font used when displaying the summary. Default: Arial.
    pub font: String,

    /// Optional request timeout in seconds. Default: none.
    ///
    /// Without it the request waits for the service indefinitely.
    pub timeout_secs: Option<u64>,

    /// Pre-constructed transport. Takes precedence over `backend_url`.
    pub transport: Option<Arc<dyn SummaryTransport>>,

    /// Lifecycle notifications (start, complete, error).
    pub notify: Option<NotifyCallback>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            word_count: WordCount::default(),
            font: DEFAULT_FONT.to_string(),
            timeout_secs: None,
            transport: None,
            notify: None,
        }
    }
}

impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("backend_url", &self.backend_url)
            .field("upload_path", &self.upload_path)
            .field("word_count", &self.word_count)
            .field("font", &self.font)
            .field("timeout_secs", &self.timeout_secs)
            .field("transport", &self.transport.as_ref().map(|_| "<dyn SummaryTransport>"))
            .field("notify", &self.notify.as_ref().map(|_| "<dyn UploadNotifyCallback>"))
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        let base = self.backend_url.trim_end_matches('/');
        if self.upload_path.starts_with('/') {
            format!("{}{}", base, self.upload_path)
        } else {
            format!("{}/{}", base, self.upload_path)
        }
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.config.backend_url = url.into();
        self
    }

    pub fn upload_path(mut self, path: impl Into<String>) -> Self {
        self.config.upload_path = path.into();
        self
    }

    pub fn word_count(mut self, wc: WordCount) -> Self {
        self.config.word_count = wc;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.config.font = font.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn SummaryTransport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    pub fn notify(mut self, cb: NotifyCallback) -> Self {
        self.config.notify = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, BrevityError> {
        let c = &self.config;
        if c.transport.is_none()
            && !(c.backend_url.starts_with("http://") || c.backend_url.starts_with("https://"))
        {
            return Err(BrevityError::InvalidConfig(format!(
                "backend URL must start with http:// or https://, got '{}'",
                c.backend_url
            )));
        }
        if c.font.trim().is_empty() {
            return Err(BrevityError::InvalidConfig("font must not be empty".into()));
        }
        if c.timeout_secs == Some(0) {
            return Err(BrevityError::InvalidConfig("timeout must be ≥ 1 second".into()));
        }
        if !FONT_CHOICES.contains(&c.font.as_str()) {
            tracing::debug!("Font '{}' is not one of the offered choices", c.font);
        }
        Ok(self.config)
    }
}

// ── Word count ───────────────────────────────────────────────────────────

/// Target summary length, restricted to the lengths the front end offers.
///
/// The summarization service accepts any integer, so this is a client-side
/// contract: an arbitrary number can never reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WordCount {
    W50,
    W100,
    #[default]
    W150,
    W200,
    W250,
}

impl WordCount {
    /// Every allowed choice, shortest first.
    pub const ALL: [WordCount; 5] = [
        WordCount::W50,
        WordCount::W100,
        WordCount::W150,
        WordCount::W200,
        WordCount::W250,
    ];

    /// Number of words requested.
    pub fn get(self) -> u32 {
        match self {
            WordCount::W50 => 50,
            WordCount::W100 => 100,
            WordCount::W150 => 150,
            WordCount::W200 => 200,
            WordCount::W250 => 250,
        }
    }
}

impl TryFrom<u32> for WordCount {
    type Error = BrevityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        WordCount::ALL
            .into_iter()
            .find(|wc| wc.get() == value)
            .ok_or(BrevityError::InvalidWordCount { value })
    }
}

impl From<WordCount> for u32 {
    fn from(wc: WordCount) -> u32 {
        wc.get()
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl std::str::FromStr for WordCount {
    type Err = BrevityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| BrevityError::InvalidConfig(format!("word count '{s}' is not a number")))?;
        WordCount::try_from(value)
    }
}

// ── Health server ────────────────────────────────────────────────────────

/// Bind settings for the health-check server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT` from the environment, falling back to defaults.
    ///
    /// Empty values count as unset, so `PORT=` in a `.env` file still binds
    /// port 5000.
    pub fn from_env() -> Result<Self, BrevityError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BrevityError> {
        let defaults = Self::default();
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = set("HOST").map(|h| h.trim().to_string()).unwrap_or(defaults.host);
        let port = match set("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| BrevityError::InvalidConfig(format!("PORT must be 0–65535, got '{p}'")))?,
            None => defaults.port,
        };
        Ok(Self { host, port })
    }

    /// Parse into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, BrevityError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| BrevityError::InvalidConfig(format!("bad bind address: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_accepts_only_offered_values() {
        for v in [50, 100, 150, 200, 250] {
            assert_eq!(WordCount::try_from(v).unwrap().get(), v);
        }
        for v in [0, 1, 75, 151, 300] {
            assert!(matches!(
                WordCount::try_from(v),
                Err(BrevityError::InvalidWordCount { value }) if value == v
            ));
        }
    }

    #[test]
    fn word_count_default_is_150() {
        assert_eq!(WordCount::default().get(), 150);
        assert_eq!(SummarizeConfig::default().word_count, WordCount::W150);
    }

    #[test]
    fn word_count_parses_from_str() {
        assert_eq!(" 100 ".parse::<WordCount>().unwrap(), WordCount::W100);
        assert!("abc".parse::<WordCount>().is_err());
        assert!("120".parse::<WordCount>().is_err());
    }

    #[test]
    fn word_count_serde_uses_plain_integer() {
        assert_eq!(serde_json::to_string(&WordCount::W250).unwrap(), "250");
        let wc: WordCount = serde_json::from_str("50").unwrap();
        assert_eq!(wc, WordCount::W50);
        assert!(serde_json::from_str::<WordCount>("60").is_err());
    }

    #[test]
    fn upload_url_joins_slashes() {
        let c = SummarizeConfig::builder()
            .backend_url("http://localhost:8000/")
            .build()
            .unwrap();
        assert_eq!(c.upload_url(), "http://localhost:8000/upload/");

        let c = SummarizeConfig::builder()
            .backend_url("http://localhost:8000")
            .upload_path("summarize")
            .build()
            .unwrap();
        assert_eq!(c.upload_url(), "http://localhost:8000/summarize");
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(SummarizeConfig::builder().backend_url("localhost:8000").build().is_err());
        assert!(SummarizeConfig::builder().font("  ").build().is_err());
        assert!(SummarizeConfig::builder().timeout_secs(0).build().is_err());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn server_config_defaults_when_unset() {
        let c = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c, ServerConfig::default());
        assert_eq!(c.port, 5000);
    }

    #[test]
    fn server_config_treats_empty_values_as_unset() {
        let c = ServerConfig::from_lookup(lookup(&[("PORT", ""), ("HOST", "  ")])).unwrap();
        assert_eq!(c.port, 5000);
        assert_eq!(c.host, "0.0.0.0");
    }

    #[test]
    fn server_config_reads_port_and_host() {
        let c = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 "), ("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.host, "127.0.0.1");
    }

    #[test]
    fn server_config_rejects_non_numeric_port() {
        for bad in ["abc", "70000", "-1"] {
            let err = ServerConfig::from_lookup(lookup(&[("PORT", bad)])).unwrap_err();
            assert!(matches!(err, BrevityError::InvalidConfig(ref m) if m.contains(bad)), "got: {err:?}");
        }
    }

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn server_config_from_env_falls_back_on_empty_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved = (std::env::var("PORT").ok(), std::env::var("HOST").ok());

        std::env::set_var("PORT", "");
        std::env::remove_var("HOST");
        let empty = ServerConfig::from_env();

        std::env::set_var("PORT", "not-a-port");
        let bad = ServerConfig::from_env();

        std::env::remove_var("PORT");
        let unset = ServerConfig::from_env();

        match saved.0 {
            Some(v) => std::env::set_var("PORT", v),
            None => std::env::remove_var("PORT"),
        }
        if let Some(v) = saved.1 {
            std::env::set_var("HOST", v);
        }

        assert_eq!(empty.unwrap().port, 5000);
        assert!(matches!(bad, Err(BrevityError::InvalidConfig(_))));
        assert_eq!(unset.unwrap(), ServerConfig::default());
    }

    #[test]
    fn server_config_socket_addr() {
        let c = ServerConfig {
            host: "127.0.0.1".into(),
            port: 5000,
        };
        assert_eq!(c.socket_addr().unwrap().port(), 5000);
        let bad = ServerConfig {
            host: "not a host".into(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
