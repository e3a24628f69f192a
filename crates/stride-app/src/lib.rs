//! Use cases for the Stride backend.
//!
//! Each function performs one database operation with light authorization
//! and validation on top: ownership checks, the project-count limit, the
//! one-entry-per-day-per-sprint guard, and reward-ownership resolution.
//! Collaborators are passed in explicitly as repository trait references;
//! there is no registry and no framework lifecycle.
//!
//! Transport, auth, and serialization concerns belong to the caller.

pub mod audit;
pub mod badges;
pub mod entries;
pub mod error;
pub mod metrics;
pub mod projects;
pub mod rewards;

pub use error::{Error, Result};
