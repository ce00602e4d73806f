//! The plinth config cache engine.
//!
//! Flattens relational rows into per-site JSON documents on disk and loads
//! them back without touching the store. Generic over any
//! [`plinth_core::store::SiteStore`] backend; transport and scheduling
//! concerns are the caller's responsibility.

pub mod blocks;
pub mod document;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod paths;
pub mod rounding;

mod index;

pub use document::ConfigDir;
pub use engine::{summarize, CacheEngine};
pub use error::{Error, Result};
pub use rounding::{round_up_to_unit, CurrencyUnits};
