//! Defines the gallery's routes.
//!
//! ## Structure
//! - **Pages**
//!   - `GET  /`        — gallery page (`html/index.html`)
//!   - `GET  /upload`  — upload form (`html/upload.html`)
//!
//! - **API**
//!   - `GET  /photos`  — JSON array of public photo URLs
//!   - `POST /upload`  — multipart upload of a single `file` field
//!
//! - **Static**
//!   - everything else is served from the public directory (`/js/*`, `/css/*`)

use crate::{
    handlers::{
        health_handlers::healthz,
        photo_handlers::{list_photos, upload_photo},
    },
    services::{
        photo_store::SharedStore,
        upload_ingestor::{MULTIPART_OVERHEAD_BYTES, UPLOAD_LIMIT_BYTES},
    },
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, get_service},
};
use std::path::Path;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the router for pages, API and static files under `public_dir`.
///
/// The router carries the shared `PhotoStore` handle to all handlers.
pub fn routes(public_dir: &Path) -> Router<SharedStore> {
    let html = public_dir.join("html");

    Router::new()
        .route("/healthz", get(healthz))
        .route_service("/", ServeFile::new(html.join("index.html")))
        .route("/photos", get(list_photos))
        .route(
            "/upload",
            get_service(ServeFile::new(html.join("upload.html")))
                .post(upload_photo)
                .layer(DefaultBodyLimit::max(
                    UPLOAD_LIMIT_BYTES + MULTIPART_OVERHEAD_BYTES,
                )),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}
