//! Download handler - consent-gated, counted blob downloads.

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::api::attachment::AttachmentResponse;
use crate::api::SharedState;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub id: Option<String>,
    pub agree: Option<String>,
}

/// Stream a project's archive after the client has agreed to the terms.
///
/// The consent flag must literally be `"true"`; anything else is rejected
/// before the record is even looked up, so a refused download never touches
/// the counter.
pub async fn download_project(
    State(state): State<SharedState>,
    Query(params): Query<DownloadParams>,
) -> Result<AttachmentResponse> {
    let id = match params.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(AppError::Validation("Project id is required".to_string())),
    };

    if params.agree.as_deref() != Some("true") {
        return Err(AppError::Forbidden(
            "Harus menyetujui syarat sebelum download".to_string(),
        ));
    }

    let service = state.create_project_service();
    let download = service.download(id).await?;

    Ok(AttachmentResponse::zip(
        download.reader,
        download.project.name,
        download.size,
    ))
}
