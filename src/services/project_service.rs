//! Project service - upload, listing and counted downloads.

use bytes::Bytes;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::io::AsyncRead;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::project::{split_tags, Project, STATUS_PROCESSING};
use crate::storage::StorageBackend;

/// A validated upload request
#[derive(Debug)]
pub struct NewProject {
    /// Filename as sent by the client; sanitized before use
    pub filename: String,
    pub description: String,
    pub long_description: String,
    /// Freeform comma-separated labels
    pub tags: String,
    pub content: Bytes,
}

/// An opened download: the record, a chunked reader over its blob, and the
/// blob size in bytes
pub struct ProjectDownload {
    pub project: Project,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    pub size: u64,
}

/// Service for project records and their blobs
pub struct ProjectService {
    db: SqlitePool,
    storage: Arc<dyn StorageBackend>,
}

impl ProjectService {
    pub fn new(db: SqlitePool, storage: Arc<dyn StorageBackend>) -> Self {
        Self { db, storage }
    }

    /// Store an uploaded archive and create its record.
    ///
    /// The blob is written first, under a key namespaced by the generated
    /// record id. If the record insert fails afterwards, the blob is deleted
    /// again so the two stores cannot drift apart at upload time.
    pub async fn upload(&self, upload: NewProject) -> Result<Project> {
        let name = sanitize_filename(&upload.filename);
        validate_zip_name(&name)?;

        let tags = serde_json::to_string(&split_tags(&upload.tags))?;
        let long_description = if upload.long_description.is_empty() {
            None
        } else {
            Some(upload.long_description)
        };

        let project = Project {
            id: Uuid::new_v4().to_string(),
            file_url: format!("/uploads/{}", name),
            size_bytes: upload.content.len() as i64,
            upload_date: Utc::now(),
            description: upload.description,
            long_description,
            tags,
            download_count: 0,
            status: STATUS_PROCESSING.to_string(),
            name,
        };

        let key = project.storage_key();
        self.storage.put(&key, upload.content).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO projects
                (id, name, description, long_description, size_bytes,
                 upload_date, tags, download_count, status, file_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.long_description)
        .bind(project.size_bytes)
        .bind(project.upload_date)
        .bind(&project.tags)
        .bind(project.download_count)
        .bind(&project.status)
        .bind(&project.file_url)
        .execute(&self.db)
        .await;

        if let Err(e) = inserted {
            // Compensate: a blob without a record must not survive
            if let Err(del) = self.storage.delete(&key).await {
                tracing::error!(key = %key, error = %del, "Failed to clean up blob after insert failure");
            }
            return Err(e.into());
        }

        Ok(project)
    }

    /// All records, newest upload first
    pub async fn list(&self) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, long_description, size_bytes,
                   upload_date, tags, download_count, status, file_url
            FROM projects
            ORDER BY upload_date DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(projects)
    }

    /// Look up a single record by id
    pub async fn get(&self, id: &str) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, long_description, size_bytes,
                   upload_date, tags, download_count, status, file_url
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    /// Open a record's blob for download and count the download.
    ///
    /// The blob key comes from the stored record, never from client input.
    /// A record whose blob has gone missing is reported as not found rather
    /// than a server error, so a desynchronized store is visible to callers.
    /// The counter is incremented before the body is streamed; a stream
    /// aborted mid-transfer therefore still counts.
    pub async fn download(&self, id: &str) -> Result<ProjectDownload> {
        let project = self.get(id).await?;
        let key = project.storage_key();

        if !self.storage.exists(&key).await? {
            return Err(AppError::NotFound(format!(
                "File for project {} missing from storage",
                project.id
            )));
        }

        self.increment_download_count(id).await?;

        let size = self.storage.size(&key).await?;
        let reader = self.storage.open(&key).await?;

        Ok(ProjectDownload {
            project,
            reader,
            size,
        })
    }

    /// Transition hook for the record status. Nothing drives this yet; the
    /// upload pipeline leaves every record in `Processing`.
    pub async fn set_status(&self, id: &str, status: &str) -> Result<()> {
        let result = sqlx::query("UPDATE projects SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }

    /// Atomic, store-side increment; never read-modify-write in application
    /// code, so concurrent downloads of the same record cannot lose updates.
    async fn increment_download_count(&self, id: &str) -> Result<()> {
        let result =
            sqlx::query("UPDATE projects SET download_count = download_count + 1 WHERE id = ?")
                .bind(id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}

/// Reduce a client-supplied filename to its final path component.
fn sanitize_filename(filename: &str) -> String {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .to_string()
}

/// The upload contract: the filename must end in the literal, case-sensitive
/// suffix `.zip` and have a non-empty stem.
fn validate_zip_name(name: &str) -> Result<()> {
    if name.len() > 4 && name.ends_with(".zip") {
        Ok(())
    } else {
        Err(AppError::Validation(
            "File harus .zip".to_string(),
        ))
    }
}
