//! Buffers a single file field out of a multipart body.
//!
//! The file is held in memory only and never exceeds `limit` bytes; the
//! guard trips while chunks are still arriving, so an oversized upload is
//! rejected before it is fully read.

use crate::models::upload::UploadedFile;
use axum::extract::{Multipart, multipart::MultipartError};
use bytes::BytesMut;
use thiserror::Error;
use tracing::debug;

/// Form field that carries the uploaded photo.
pub const UPLOAD_FIELD: &str = "file";

/// Largest file accepted, in bytes.
pub const UPLOAD_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Room for multipart boundaries, part headers and small text fields on top
/// of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("more than one `{0}` file in upload")]
    DuplicateFile(String),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

/// Read the file in `field_name` from `multipart`.
///
/// Returns `Ok(None)` when the form has no such file. Parts with other
/// names, and a matching part sent without a filename (a plain text field or
/// an empty file input), are skipped.
pub async fn ingest_single_file(
    multipart: &mut Multipart,
    field_name: &str,
    limit: usize,
) -> Result<Option<UploadedFile>, IngestError> {
    let mut found: Option<UploadedFile> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let filename = match (field.name(), field.file_name()) {
            (Some(name), Some(filename)) if name == field_name && !filename.is_empty() => {
                filename.to_string()
            }
            _ => {
                debug!(field = ?field.name(), "skipping multipart field");
                continue;
            }
        };

        if found.is_some() {
            return Err(IngestError::DuplicateFile(field_name.to_string()));
        }

        let content_type = field
            .content_type()
            .and_then(|raw| raw.parse::<mime::Mime>().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM)
            .to_string();

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            if buffer.len() + chunk.len() > limit {
                return Err(IngestError::TooLarge { limit });
            }
            buffer.extend_from_slice(&chunk);
        }

        found = Some(UploadedFile::new(filename, content_type, buffer.freeze()));
    }

    Ok(found)
}
