//! The `SiteStore` trait — the read-only seam between the cache engine and
//! the relational store.
//!
//! The trait is implemented by storage backends (e.g. `plinth-store-sqlite`).
//! Every method is a single parameterized read; a query failure is the
//! backend's error type and aborts the calling cache build — the engine
//! never retries and never consumes partial data. Soft-deleted rows are
//! filtered by the backend and never surface here.

use std::future::Future;

use crate::records::{
  BlockRecord, CarouselRecord, ConditionRecord, FeatureSelection, NewsRecord,
  PageSetting, PermissionRecord, PromotionRecord, SiteRecord, TopicRecord,
};

/// Abstraction over the relational store plinth reads from.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait SiteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Sites ─────────────────────────────────────────────────────────────

  /// Fetch one site by id. Returns `None` if absent or soft-deleted.
  fn get_site(
    &self,
    site_id: i64,
  ) -> impl Future<Output = Result<Option<SiteRecord>, Self::Error>> + Send + '_;

  /// Fetch one site by its cache-file code.
  fn get_site_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<SiteRecord>, Self::Error>> + Send + 'a;

  /// The full source list, used to bootstrap the lookup indexes.
  fn list_sites(
    &self,
    only_public: bool,
  ) -> impl Future<Output = Result<Vec<SiteRecord>, Self::Error>> + Send + '_;

  // ── Topics ────────────────────────────────────────────────────────────

  fn get_topic(
    &self,
    topic_id: i64,
  ) -> impl Future<Output = Result<Option<TopicRecord>, Self::Error>> + Send + '_;

  // ── Per-site content ──────────────────────────────────────────────────

  /// All of a site's carousel slides, ascending by sort key.
  fn list_carousels(
    &self,
    site_id: i64,
  ) -> impl Future<Output = Result<Vec<CarouselRecord>, Self::Error>> + Send + '_;

  /// The site's most recent published news, newest first, at most `limit`.
  fn latest_news(
    &self,
    site_id: i64,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<NewsRecord>, Self::Error>> + Send + '_;

  /// The site's promotions, newest start date first.
  fn list_promotions(
    &self,
    site_id: i64,
  ) -> impl Future<Output = Result<Vec<PromotionRecord>, Self::Error>> + Send + '_;

  /// Threshold conditions attached to one promotion.
  fn list_promotion_conditions(
    &self,
    promotion_id: i64,
  ) -> impl Future<Output = Result<Vec<ConditionRecord>, Self::Error>> + Send + '_;

  fn list_permissions(
    &self,
    site_id: i64,
  ) -> impl Future<Output = Result<Vec<PermissionRecord>, Self::Error>> + Send + '_;

  // ── Pages and blocks ──────────────────────────────────────────────────

  /// All of a site's page settings, ascending by sort key. Hidden pages
  /// are included; menu assembly filters them.
  fn list_page_settings(
    &self,
    site_id: i64,
  ) -> impl Future<Output = Result<Vec<PageSetting>, Self::Error>> + Send + '_;

  /// A page's top-level blocks (no parent), ascending by sort key.
  fn list_top_level_blocks(
    &self,
    page_id: i64,
  ) -> impl Future<Output = Result<Vec<BlockRecord>, Self::Error>> + Send + '_;

  /// The feature selection attached to one block, if any.
  fn get_feature_selection(
    &self,
    block_id: i64,
  ) -> impl Future<Output = Result<Option<FeatureSelection>, Self::Error>> + Send + '_;
}
