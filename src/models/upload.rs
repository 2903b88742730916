//! Represents a file received from an upload form.

use bytes::Bytes;

/// A single uploaded file, buffered in memory for the lifetime of the request.
///
/// Metadata is read-only; the buffer is released with [`UploadedFile::into_bytes`]
/// when handed to the store.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Filename as sent by the client.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type of the payload.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}
