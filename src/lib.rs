//! Photo gallery: a browser uploads images, the server relays them into a
//! cloud storage bucket, and the gallery page lists their public URLs.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
