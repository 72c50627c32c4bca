//! Shared utilities: URL handling, header randomization and the camouflaged
//! HTTP client used for all outbound provider and collaborator traffic.

pub mod headers;
pub mod http_client;
pub mod url;

pub use http_client::{CamouflageOptions, CamouflagedHttpClient};
