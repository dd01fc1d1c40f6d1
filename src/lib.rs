//! Content-based movie and show recommendations
//!
//! Resolves a free-text title against a fixed catalog and returns the ten
//! most similar titles according to a precomputed similarity matrix.

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
