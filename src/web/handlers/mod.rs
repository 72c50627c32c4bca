//! HTTP request handlers, organized by domain

pub mod chapters;
pub mod health;
pub mod transcript;
