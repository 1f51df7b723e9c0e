//! Attachment response helper.
//!
//! Streams a blob back to the client in bounded chunks instead of buffering
//! the whole payload, with the download headers the frontend expects.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// A streamed `Content-Disposition: attachment` response
pub struct AttachmentResponse {
    reader: Box<dyn AsyncRead + Send + Unpin>,
    filename: String,
    content_type: &'static str,
    size: u64,
}

impl AttachmentResponse {
    /// Serve a zip archive as an attachment
    pub fn zip(reader: Box<dyn AsyncRead + Send + Unpin>, filename: impl Into<String>, size: u64) -> Self {
        Self {
            reader,
            filename: filename.into(),
            content_type: "application/zip",
            size,
        }
    }
}

impl IntoResponse for AttachmentResponse {
    fn into_response(self) -> Response {
        let body = Body::from_stream(ReaderStream::new(self.reader));

        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, self.content_type)
            .header(CONTENT_LENGTH, self.size)
            .header(
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", self.filename),
            )
            .body(body)
            .unwrap()
    }
}
