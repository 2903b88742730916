//! Data models for the photo gallery.
//!
//! Photos live only in the object store; these types describe what flows
//! through a request on its way there and back.

pub mod photo;
pub mod upload;
