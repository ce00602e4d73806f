//! Error type for `plinth-cache`.

use thiserror::Error;

/// An error raised while building, persisting, or loading cache documents.
#[derive(Debug, Error)]
pub enum Error {
  /// A store query failed. Fatal to the operation that issued it; the
  /// partially-built document is discarded and nothing is written.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid amount: {0:?}")]
  InvalidAmount(String),

  #[error("currency must not be empty")]
  EmptyCurrency,

  #[error("currency config path must not be empty")]
  EmptyCurrencyConfigPath,

  #[error("currency not in config: {0:?}")]
  UnknownCurrency(String),
}

impl Error {
  /// Wrap a backend error from the generic [`SiteStore`] seam.
  ///
  /// [`SiteStore`]: plinth_core::store::SiteStore
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
