//! Project model and tag codecs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Initial status assigned at upload. Nothing transitions a record away from
/// this value yet; `ProjectService::set_status` is the hook for when
/// something does.
pub const STATUS_PROCESSING: &str = "Processing";

/// Project entity, one row per uploaded archive
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub size_bytes: i64,
    pub upload_date: DateTime<Utc>,
    /// Raw persisted tag scalar; see [`parse_tags`]
    pub tags: String,
    pub download_count: i64,
    pub status: String,
    pub file_url: String,
}

impl Project {
    /// Storage key for this record's blob. Blobs are namespaced by record id
    /// so client-supplied filenames can never collide or escape the store.
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.id, self.name)
    }
}

/// Wire representation of a project record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub long_description: String,
    #[serde(rename = "size")]
    pub size_bytes: i64,
    pub upload_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub download_count: i64,
    pub status: String,
    pub file_url: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        let tags = parse_tags(&p.tags);
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            long_description: p.long_description.unwrap_or_default(),
            size_bytes: p.size_bytes,
            upload_date: p.upload_date,
            tags,
            download_count: p.download_count,
            status: p.status,
            file_url: p.file_url,
        }
    }
}

/// Normalize the persisted tag scalar into a list.
///
/// The column holds a JSON array written by [`split_tags`], but legacy rows
/// may carry a bare freeform string. An empty scalar reads as no tags; an
/// unparseable scalar reads as a single tag rather than failing the request.
pub fn parse_tags(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => tags,
        Err(_) => vec![raw.to_string()],
    }
}

/// Split a freeform tags form field ("go, web") into trimmed, non-empty labels.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
