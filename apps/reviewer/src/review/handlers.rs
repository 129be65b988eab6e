use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::looks_like_pdf;
use crate::review::report::{render_text, FeedbackReport, GradeSummary};
use crate::review::scoring::ScoreBreakdown;
use crate::review::{review_document, ReviewStats};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub file_name: Option<String>,
    pub report: FeedbackReport,
    pub grade: GradeSummary,
    pub breakdown: ScoreBreakdown,
    pub stats: ReviewStats,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/v1/review
pub async fn handle_review(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart)
        .await?
        .ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;

    if upload.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if !looks_like_pdf(upload.content_type.as_deref(), &upload.data) {
        return Err(AppError::UnsupportedMediaType(
            "Only PDF files are accepted".to_string(),
        ));
    }

    let review_id = Uuid::new_v4();
    let started = Instant::now();
    let size = upload.data.len();

    // Extraction and tagging are CPU-bound
    let pipeline = Arc::clone(&state.pipeline);
    let policy = state.policy.clone();
    let data = upload.data;
    let review = tokio::task::spawn_blocking(move || {
        review_document(pipeline.as_ref(), &policy, &data)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("review task failed: {e}")))??;

    info!(
        "Review {review_id} for {:?} ({size} bytes): score {} in {}ms",
        upload.file_name,
        review.report.score,
        started.elapsed().as_millis()
    );

    let response = match query.format {
        ResponseFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&review.report),
        )
            .into_response(),
        ResponseFormat::Json => Json(ReviewResponse {
            review_id,
            analyzed_at: Utc::now(),
            file_name: upload.file_name,
            grade: review.grade.summary(),
            report: review.report,
            breakdown: review.breakdown,
            stats: review.stats,
        })
        .into_response(),
    };
    Ok(response)
}

/// Takes the field named `file`, or else the first field that carries a filename.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, AppError> {
    let mut fallback: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await? {
        let is_file_field = field.name() == Some(FILE_FIELD);
        if !is_file_field && (fallback.is_some() || field.file_name().is_none()) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        let upload = Upload {
            file_name,
            content_type,
            data,
        };

        if is_file_field {
            return Ok(Some(upload));
        }
        fallback = Some(upload);
    }
    Ok(fallback)
}
