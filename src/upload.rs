//! Upload input: turn a user-selected file into a validated [`UploadRequest`].
//!
//! Validation happens here, before the orchestrator gets involved, so a
//! request that reaches the transport is always a non-empty PDF with an
//! allowed word count. We check the `%PDF` magic bytes rather than trusting
//! the file extension.

use crate::config::WordCount;
use crate::error::BrevityError;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// MIME type sent with every upload.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// A PDF ready to be uploaded together with its target summary length.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    file_name: String,
    bytes: Vec<u8>,
    word_count: WordCount,
}

impl UploadRequest {
    /// Build a request from in-memory bytes.
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        word_count: WordCount,
    ) -> Result<Self, BrevityError> {
        let file_name = file_name.into();
        validate_pdf(&file_name, &bytes)?;
        Ok(Self {
            file_name,
            bytes,
            word_count,
        })
    }

    /// Read and validate a PDF from disk.
    pub async fn from_path(path: impl AsRef<Path>, word_count: WordCount) -> Result<Self, BrevityError> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BrevityError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(BrevityError::Internal(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(file_name, bytes, word_count)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn word_count(&self) -> WordCount {
        self.word_count
    }

    pub fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("file_name", &self.file_name)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("word_count", &self.word_count)
            .finish()
    }
}

fn validate_pdf(name: &str, bytes: &[u8]) -> Result<(), BrevityError> {
    if bytes.is_empty() {
        return Err(BrevityError::EmptyFile {
            name: name.to_string(),
        });
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(BrevityError::NotAPdf {
            name: name.to_string(),
            magic: bytes.iter().take(4).copied().collect(),
        });
    }
    Ok(())
}
