//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::analysis::service::{analyze_document, AnalysisResponse};
use crate::errors::AppError;
use crate::extract::{filename::secure_filename, DocumentFormat};
use crate::state::AppState;

/// Multipart field carrying the uploaded resume.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
}

/// POST /analyze
///
/// Accepts a multipart upload with the document in the `resume` field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut multipart = multipart
        .map_err(|_| AppError::Validation("No resume file provided".to_string()))?;

    let mut upload: Option<(Option<String>, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &state))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, &state))?;
        upload = Some((original_name, bytes));
        break;
    }

    let (original_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    let original_name = original_name.unwrap_or_default();
    if original_name.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let format =
        DocumentFormat::from_filename(&original_name).ok_or(AppError::UnsupportedFileType)?;

    if bytes.len() > state.config.max_upload_bytes {
        return Err(too_large(&state));
    }

    let filename = display_name(&original_name, format);
    let response = analyze_document(bytes, format, filename).await?;
    Ok(Json(response))
}

/// POST /analyze/url
///
/// Fetches the document at `url`, then analyzes it exactly like an upload.
pub async fn handle_analyze_url(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeUrlRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(request) = request.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(&state)
        } else {
            AppError::Validation(rejection.body_text())
        }
    })?;

    if request.url.trim().is_empty() {
        return Err(AppError::Validation("No resume URL provided".to_string()));
    }

    let document = state.source.fetch(&request.url).await?;
    let response = analyze_document(document.bytes, document.format, document.filename).await?;
    Ok(Json(response))
}

fn display_name(original: &str, format: DocumentFormat) -> String {
    let name = secure_filename(original);
    if DocumentFormat::from_filename(&name) == Some(format) {
        name
    } else {
        format!("resume.{}", format.extension())
    }
}

fn too_large(state: &AppState) -> AppError {
    AppError::PayloadTooLarge {
        limit: state.config.max_upload_label(),
    }
}

fn multipart_error(err: MultipartError, state: &AppState) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(state)
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::source::{DocumentSource, FetchError, FetchedDocument};

    const BOUNDARY: &str = "X-RESUME-BOUNDARY";

    const RESUME_TXT: &str = "Jane Doe, jane@example.io, 555-123-4567\n\
        Experience: backend role at Acme Corp\n\
        Education: Master of Science, State University\n\
        Skills: Python, CSS\n\
        Project: led the billing platform rewrite\n";

    struct StubSource {
        document: Option<FetchedDocument>,
    }

    #[async_trait]
    impl DocumentSource for StubSource {
        async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
            if !url.starts_with("http") {
                return Err(FetchError::InvalidUrl(url.to_string()));
            }
            self.document.clone().ok_or(FetchError::Status(404))
        }
    }

    fn app_with(config: Config, document: Option<FetchedDocument>) -> Router {
        build_router(AppState {
            config,
            source: Arc::new(StubSource { document }),
        })
    }

    fn app() -> Router {
        app_with(Config::default(), None)
    }

    fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn url_request(url: &str) -> Request<Body> {
        Request::post("/analyze/url")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "url": url }).to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_txt_upload_is_scored() {
        let (status, body) = send(
            app(),
            multipart_request("resume", "Jane Resume.txt", RESUME_TXT.as_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // contact 10 + experience 25 + education 20 + skills 20 + achievements 10
        assert_eq!(body["score"], 85);
        assert_eq!(body["file_processed"], "Jane_Resume.txt");
        assert_eq!(
            body["suggestions"],
            serde_json::json!(["Use more action verbs and industry-specific keywords"])
        );
        assert!(body["analysis_date"].is_string());
    }

    #[tokio::test]
    async fn test_missing_resume_field() {
        let (status, body) = send(app(), multipart_request("cv", "cv.txt", b"hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let request = Request::post("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_empty_filename() {
        let (status, body) = send(app(), multipart_request("resume", "", b"hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file selected");
    }

    #[tokio::test]
    async fn test_disallowed_extension() {
        let (status, body) = send(app(), multipart_request("resume", "cv.exe", b"MZ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid file type. Only PDF, DOC, DOCX, and TXT files are allowed"
        );
    }

    #[tokio::test]
    async fn test_doc_upload_cannot_be_extracted() {
        let (status, body) =
            send(app(), multipart_request("resume", "cv.doc", RESUME_TXT.as_bytes())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Could not extract text from the file");
    }

    #[tokio::test]
    async fn test_empty_pdf_cannot_be_extracted() {
        let (status, body) = send(app(), multipart_request("resume", "cv.pdf", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Could not extract text from the file");
    }

    #[tokio::test]
    async fn test_oversized_upload() {
        let config = Config {
            max_upload_bytes: 256,
            ..Config::default()
        };
        let big = "a".repeat(4096);
        let (status, body) = send(
            app_with(config, None),
            multipart_request("resume", "cv.txt", big.as_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("File too large. Maximum size is"));
    }

    #[tokio::test]
    async fn test_url_document_is_scored() {
        let document = FetchedDocument {
            filename: "cv.txt".to_string(),
            format: DocumentFormat::Txt,
            bytes: Bytes::from_static(RESUME_TXT.as_bytes()),
        };
        let (status, body) = send(
            app_with(Config::default(), Some(document)),
            url_request("https://example.com/cv.txt"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 85);
        assert_eq!(body["file_processed"], "cv.txt");
    }

    #[tokio::test]
    async fn test_url_fetch_failure_is_bad_gateway() {
        let (status, body) = send(app(), url_request("https://example.com/missing.pdf")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"],
            "Could not retrieve the resume from the given URL"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_request() {
        let (status, _) = send(app(), url_request("gopher://example.com")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_url_is_bad_request() {
        let (status, body) = send(app(), url_request("   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume URL provided");
    }

    #[test]
    fn test_display_name_falls_back_when_sanitized_away() {
        assert_eq!(display_name("Résumé.pdf", DocumentFormat::Pdf), "Resume.pdf");
        assert_eq!(display_name("简历.pdf", DocumentFormat::Pdf), "resume.pdf");
    }
}
