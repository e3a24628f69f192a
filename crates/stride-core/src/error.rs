//! Error types for `stride-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown project status: {0:?}")]
  UnknownProjectStatus(String),

  #[error("unknown difficulty: {0:?}")]
  UnknownDifficulty(String),

  #[error("unknown energy change: {0:?}")]
  UnknownEnergyChange(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
