//! Document source: fetches a resume from a remote URL for analysis.
//!
//! Handlers depend on the `DocumentSource` trait so tests can swap in a stub
//! without network access. `HttpDocumentSource` is the production backend.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;
use crate::extract::{filename::secure_filename, DocumentFormat};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned status {0}")]
    Status(u16),

    #[error("Document exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Unsupported document type")]
    UnsupportedType,
}

/// A remote document ready for extraction.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub filename: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError>;
}

#[derive(Clone)]
pub struct HttpDocumentSource {
    client: Client,
    max_bytes: usize,
}

impl HttpDocumentSource {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        let url = parse_http_url(url)?;

        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Name and format come from where the redirects ended, not the request.
        let final_url = response.url().clone();

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let header_format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(DocumentFormat::from_content_type);

        let format = format_from_url(&final_url)
            .or(header_format)
            .ok_or(FetchError::UnsupportedType)?;

        // Content-Length can be absent or wrong; stop reading once past the limit.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {final_url}", body.len());

        Ok(FetchedDocument {
            filename: filename_from_url(&final_url, format),
            format,
            bytes: Bytes::from(body),
        })
    }
}

fn parse_http_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

fn last_segment(url: &Url) -> &str {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
}

fn format_from_url(url: &Url) -> Option<DocumentFormat> {
    DocumentFormat::from_filename(last_segment(url))
}

fn filename_from_url(url: &Url, format: DocumentFormat) -> String {
    let name = secure_filename(last_segment(url));
    if name.is_empty() {
        format!("resume.{}", format.extension())
    } else {
        name
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl(msg) => AppError::Validation(format!("Invalid URL: {msg}")),
            FetchError::UnsupportedType => AppError::UnsupportedFileType,
            FetchError::TooLarge { limit } => AppError::PayloadTooLarge {
                limit: format!("{}MB", limit / (1024 * 1024)),
            },
            FetchError::Http(e) => AppError::Upstream(e.to_string()),
            FetchError::Status(code) => AppError::Upstream(format!("status {code}")),
        }
    }
}
