//! The error taxonomy surfaced to the exposure layer.

use thiserror::Error;

/// An error returned by a use case.
///
/// The first four variants are the business taxonomy and propagate
/// unmodified to whatever exposure layer sits above. `Store` wraps
/// infrastructure failures from the backing repository.
#[derive(Debug, Error)]
pub enum Error {
  /// The requested entity does not exist (or is not visible to the caller,
  /// where a check treats "not visible" the same as "absent").
  #[error("not found: {0}")]
  NotFound(String),

  /// The entity exists but does not belong to the requesting user.
  #[error("forbidden: {0}")]
  Forbidden(String),

  /// A uniqueness invariant would be violated.
  #[error("conflict: {0}")]
  Conflict(String),

  /// A business-rule pre-condition failed.
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
