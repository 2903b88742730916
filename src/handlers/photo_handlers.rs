//! HTTP handlers for listing and uploading photos.
//! Storage concerns are delegated to the shared `PhotoStore`.

use crate::{
    errors::AppError,
    models::photo::public_url,
    services::{
        photo_store::{SharedStore, StoreError},
        upload_ingestor::{UPLOAD_FIELD, UPLOAD_LIMIT_BYTES, ingest_single_file},
    },
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info};

pub const NO_FILE_MESSAGE: &str = "No file uploaded.";

/// Body sent when the bucket cannot be listed; the gallery client keys its
/// error message off the 404 status.
pub const LIST_NOT_FOUND_MESSAGE: &str = "Error: Could not fetch photos from google cloud storage";

/// GET `/photos` — public URLs of every object in the bucket, as a JSON array.
pub async fn list_photos(State(store): State<SharedStore>) -> Result<Response, AppError> {
    let names = store.list_objects().await.map_err(|err| {
        error!(bucket = %store.bucket(), error = %err, "failed to list photos");
        listing_error(err)
    })?;

    let urls: Vec<String> = names
        .iter()
        .map(|name| public_url(store.bucket(), name))
        .collect();

    Ok((StatusCode::OK, Json(urls)).into_response())
}

/// POST `/upload` — store the `file` field as a public object, then send the
/// browser back to the gallery.
///
/// A body that is not `multipart/form-data` carries no file, so it gets the
/// same 400 as a form without one.
pub async fn upload_photo(
    State(store): State<SharedStore>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "upload is not a multipart form");
        AppError::bad_request(NO_FILE_MESSAGE)
    })?;

    let Some(file) = ingest_single_file(&mut multipart, UPLOAD_FIELD, UPLOAD_LIMIT_BYTES).await?
    else {
        return Err(AppError::bad_request(NO_FILE_MESSAGE));
    };

    debug!(
        filename = file.filename(),
        content_type = file.content_type(),
        size = file.len(),
        "File uploaded by user"
    );

    let filename = file.filename().to_string();
    let content_type = file.content_type().to_string();
    let object = store
        .write_object(&filename, file.into_bytes(), &content_type)
        .await
        .map_err(|err| {
            error!(object = %filename, error = %err, "failed to write upload to bucket");
            upload_error(err)
        })?;

    let url = public_url(store.bucket(), &object);
    store.make_public(&object).await.map_err(|err| {
        error!(object = %object, error = %err, "upload stored but could not be made public");
        AppError::internal("Internal Server Error")
    })?;

    info!("File successfully uploaded to: {}", url);
    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
}

fn listing_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(_) => AppError::not_found(LIST_NOT_FOUND_MESSAGE),
        StoreError::PermissionDenied(_) => AppError::upstream(
            StatusCode::FORBIDDEN,
            "Error: Access to the google cloud storage bucket was denied",
        ),
        StoreError::InvalidObjectName(_) | StoreError::Backend(_) => AppError::upstream(
            StatusCode::BAD_GATEWAY,
            "Error communicating with google cloud storage",
        ),
    }
}

fn upload_error(err: StoreError) -> AppError {
    match err {
        StoreError::InvalidObjectName(name) => {
            AppError::bad_request(format!("Invalid file name `{}`.", name))
        }
        _ => AppError::internal("Internal Server Error"),
    }
}
