//! Project handlers - upload, listing and detail.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::api::SharedState;
use crate::error::{AppError, Result};
use crate::models::project::ProjectResponse;
use crate::services::project_service::NewProject;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
}

/// Upload a zip archive with metadata via multipart/form-data POST.
pub async fn upload_project(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let upload = extract_upload_form(multipart).await?;

    let service = state.create_project_service();
    let project = service.upload(upload).await?;

    Ok(Json(UploadResponse {
        message: format!("File {} berhasil di-upload", project.name),
        file_url: project.file_url,
    }))
}

/// Pull the `file` part and the optional metadata fields out of the form.
async fn extract_upload_form(mut multipart: Multipart) -> Result<NewProject> {
    let mut file: Option<(String, Bytes)> = None;
    let mut description = String::new();
    let mut long_description = String::new();
    let mut tags = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::Validation("File part has no filename".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((filename, data));
            }
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid description: {e}")))?;
            }
            Some("longDescription") => {
                long_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid longDescription: {e}")))?;
            }
            Some("tags") => {
                tags = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid tags: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, content) = file
        .ok_or_else(|| AppError::Validation("No file field found in multipart form".to_string()))?;

    Ok(NewProject {
        filename,
        description,
        long_description,
        tags,
        content,
    })
}

/// List all projects, newest upload first.
pub async fn list_projects(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let service = state.create_project_service();
    let projects = service.list().await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// Get a single project by id.
pub async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let service = state.create_project_service();
    let project = service.get(&id).await?;

    Ok(Json(ProjectResponse::from(project)))
}
