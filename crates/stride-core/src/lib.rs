//! Core types and trait definitions for the Stride productivity backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod audit;
pub mod badge;
pub mod entry;
pub mod error;
pub mod metrics;
pub mod milestone;
pub mod project;
pub mod reward;
pub mod store;

pub use error::{Error, Result};
