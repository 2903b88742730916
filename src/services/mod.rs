//! Services the HTTP layer delegates to.

pub mod gcs_store;
pub mod photo_store;
pub mod upload_ingestor;
