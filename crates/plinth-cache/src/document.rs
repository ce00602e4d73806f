//! [`ConfigDir`] — the path-addressed JSON document store cache files live
//! in.
//!
//! Writes go to a sibling temporary file first and rename into place, so a
//! reader never observes a partially-written document. Reads distinguish
//! "file missing" (an empty document, not an error) from "file corrupt"
//! (a typed error).

use std::{io::ErrorKind, path::PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::Result;

/// A directory of named JSON documents.
///
/// Cloning is cheap; the handle is just the root path.
#[derive(Debug, Clone)]
pub struct ConfigDir {
  root: PathBuf,
}

impl ConfigDir {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn path_of(&self, name: &str) -> PathBuf { self.root.join(name) }

  /// Serialize `payload` and atomically replace the document `name`.
  ///
  /// Overwrites unconditionally. The root directory is created on first
  /// write. Serialization and I/O failures propagate; a failed write never
  /// leaves a partial document behind the final name.
  pub async fn write<T: Serialize>(&self, name: &str, payload: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(payload)?;

    tokio::fs::create_dir_all(&self.root).await?;

    let final_path = self.path_of(name);
    let tmp_path = self.path_of(&format!("{name}.tmp"));

    tokio::fs::write(&tmp_path, &bytes).await?;
    tokio::fs::rename(&tmp_path, &final_path).await?;

    Ok(())
  }

  /// Load the document `name`. `None` when it does not exist; a document
  /// that exists but fails to parse is an error, not an empty result.
  pub async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
    let bytes = match tokio::fs::read(self.path_of(name)).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    Ok(Some(serde_json::from_slice(&bytes)?))
  }

  /// Load the document `name`, or an empty default when it does not exist.
  pub async fn read_or_default<T: DeserializeOwned + Default>(
    &self,
    name: &str,
  ) -> Result<T> {
    Ok(self.read(name).await?.unwrap_or_default())
  }

  /// Pure existence check; no deserialization.
  pub async fn exists(&self, name: &str) -> bool {
    tokio::fs::metadata(self.path_of(name)).await.is_ok()
  }

  /// Delete the document `name`. `false` when it was already absent.
  pub async fn remove(&self, name: &str) -> Result<bool> {
    match tokio::fs::remove_file(self.path_of(name)).await {
      Ok(()) => Ok(true),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e.into()),
    }
  }
}
