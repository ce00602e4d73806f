//! Shared lookup indexes: many sites, one document.
//!
//! Two variants of the same mechanism. The site index keys entries by the
//! URL-safe entity code; the domain index keys them by a SHA-256 of the
//! domain. Updates are not coordinated across processes — last write wins —
//! so callers serialize writers to a given index themselves.

use std::collections::BTreeMap;

use tracing::info;

use plinth_core::{config::SiteSummary, store::SiteStore};

use crate::{
  engine::{summarize, CacheEngine},
  paths, Error, Result,
};

/// The on-disk shape of both index documents.
type Index = BTreeMap<String, SiteSummary>;

impl<S: SiteStore> CacheEngine<S> {
  // ── Site index (keyed by code) ────────────────────────────────────────────

  /// Populate `sites.json` from the full public-site list, but only if the
  /// file does not yet exist. Idempotent first write; returns whether a
  /// bootstrap happened.
  pub async fn bootstrap_site_index(&self) -> Result<bool> {
    self.bootstrap(paths::SITE_INDEX_FILE, |s| s.code.clone()).await
  }

  pub async fn upsert_site_entry(&self, summary: SiteSummary) -> Result<()> {
    let key = summary.code.clone();
    self.upsert(paths::SITE_INDEX_FILE, key, summary).await
  }

  /// `false`, file untouched, when the code has no entry.
  pub async fn remove_site_entry(&self, code: &str) -> Result<bool> {
    self.remove(paths::SITE_INDEX_FILE, code).await
  }

  pub async fn lookup_site(&self, code: &str) -> Result<Option<SiteSummary>> {
    self.lookup(paths::SITE_INDEX_FILE, code).await
  }

  // ── Domain index (keyed by hashed domain) ─────────────────────────────────

  pub async fn bootstrap_domain_index(&self) -> Result<bool> {
    self
      .bootstrap(paths::DOMAIN_INDEX_FILE, |s| paths::domain_key(&s.domain))
      .await
  }

  pub async fn upsert_domain_entry(&self, summary: SiteSummary) -> Result<()> {
    let key = paths::domain_key(&summary.domain);
    self.upsert(paths::DOMAIN_INDEX_FILE, key, summary).await
  }

  pub async fn remove_domain_entry(&self, domain: &str) -> Result<bool> {
    self
      .remove(paths::DOMAIN_INDEX_FILE, &paths::domain_key(domain))
      .await
  }

  pub async fn lookup_domain(
    &self,
    domain: &str,
  ) -> Result<Option<SiteSummary>> {
    self
      .lookup(paths::DOMAIN_INDEX_FILE, &paths::domain_key(domain))
      .await
  }

  // ── Shared mechanics ──────────────────────────────────────────────────────

  async fn bootstrap(
    &self,
    file: &str,
    key_of: impl Fn(&SiteSummary) -> String,
  ) -> Result<bool> {
    if self.dir().exists(file).await {
      return Ok(false);
    }

    let sites = self.store.list_sites(true).await.map_err(Error::store)?;

    let index: Index = sites
      .iter()
      .map(summarize)
      .map(|summary| (key_of(&summary), summary))
      .collect();

    self.dir().write(file, &index).await?;
    info!(file, entries = index.len(), "lookup index bootstrapped");
    Ok(true)
  }

  async fn upsert(
    &self,
    file: &str,
    key: String,
    summary: SiteSummary,
  ) -> Result<()> {
    let mut index: Index = self.dir().read_or_default(file).await?;
    index.insert(key, summary);
    self.dir().write(file, &index).await
  }

  async fn remove(&self, file: &str, key: &str) -> Result<bool> {
    let mut index: Index = self.dir().read_or_default(file).await?;
    if index.remove(key).is_none() {
      return Ok(false);
    }

    self.dir().write(file, &index).await?;
    Ok(true)
  }

  async fn lookup(&self, file: &str, key: &str) -> Result<Option<SiteSummary>> {
    let index: Index = self.dir().read_or_default(file).await?;
    Ok(index.get(key).cloned())
  }
}
