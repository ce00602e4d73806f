//! Error types for `plinth-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown block kind discriminant: {0:?}")]
  UnknownBlockKind(String),

  #[error("unknown site type code: {0}")]
  UnknownSiteType(i64),

  #[error("unknown site status code: {0}")]
  UnknownSiteStatus(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
