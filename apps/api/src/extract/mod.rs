//! Document text extraction.
//!
//! Every extractor is best-effort: failures are logged and collapse to an
//! empty string. Callers treat blank output as "could not extract text".

pub mod docx;
pub mod filename;
pub mod pdf;

use tracing::{error, warn};

/// Formats accepted at the upload boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// Legacy Word binary. Accepted but never extracted.
    Doc,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Resolves the format from the text after the last `.` in `filename`.
    /// A name without a dot has no format.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    /// Resolves the format from an HTTP `Content-Type`, ignoring parameters.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/msword" => Some(Self::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

/// Extracts plain text from `bytes` according to `format`.
/// Never fails; an empty string signals that nothing usable was found.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> String {
    match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
        DocumentFormat::Docx => docx::extract_docx_text(bytes),
        DocumentFormat::Txt => extract_txt_text(bytes),
        DocumentFormat::Doc => {
            warn!("No extractor for legacy .doc documents");
            String::new()
        }
    }
}

fn extract_txt_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            error!("Error extracting TXT text: {e}");
            String::new()
        }
    }
}
