use anyhow::Context;
use bytes::Bytes;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::scoring::{score_breakdown, score_resume};
use crate::errors::AppError;
use crate::extract::{extract_text, DocumentFormat};

/// Response body for a successful analysis.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub score: u32,
    pub suggestions: Vec<String>,
    /// Local wall-clock time, ISO-8601 without offset.
    pub analysis_date: NaiveDateTime,
    pub file_processed: String,
}

/// Extracts, validates and scores one document.
///
/// Extraction runs on the blocking pool. Blank text is reported as
/// `AppError::ExtractionFailed` and never reaches the scorer.
pub async fn analyze_document(
    bytes: Bytes,
    format: DocumentFormat,
    filename: String,
) -> Result<AnalysisResponse, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .context("text extraction task failed")?;

    if text.trim().is_empty() {
        return Err(AppError::ExtractionFailed);
    }

    for criterion in score_breakdown(&text) {
        debug!(
            "{filename}: {} = {:.1}/{}",
            criterion.name, criterion.raw, criterion.weight
        );
    }

    let result = score_resume(&text);
    info!(
        "Resume analyzed successfully: {filename}, Score: {}",
        result.score
    );

    Ok(AnalysisResponse {
        score: result.score,
        suggestions: result.suggestions,
        analysis_date: Local::now().naive_local(),
        file_processed: filename,
    })
}
