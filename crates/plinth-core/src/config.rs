//! Derived configuration payloads — the documents the cache persists.
//!
//! Every field is always present, holding either a real value or its
//! declared fallback (empty string, empty list, empty map). Top-level
//! payloads implement [`Default`] so a cache miss reads back as an empty
//! document rather than an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  menu::MenuEntry,
  records::{BlockKind, SiteType},
};

// ─── Site ────────────────────────────────────────────────────────────────────

/// Theme fields flattened out of the site's topic row. A site without a
/// topic (or with a dangling FK) gets empty-string fields, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
  pub topic_id:        Option<i64>,
  pub name:            String,
  pub style:           String,
  pub primary_color:   String,
  pub secondary_color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeoConfig {
  pub title:       String,
  pub keywords:    String,
  pub description: String,
}

/// One carousel slide with its image resolved to a public URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarouselConfig {
  pub title:     String,
  pub image_url: String,
  pub link:      String,
}

/// The main per-site document, written to `<code>.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteConfig {
  pub site_id:     i64,
  pub code:        String,
  pub name:        String,
  pub domain:      String,
  pub site_type:   SiteType,
  pub ecommerce:   bool,
  pub logo_url:    String,
  pub favicon_url: String,
  pub phone:       String,
  pub email:       String,
  pub address:     String,
  pub seo:         SeoConfig,
  pub theme:       ThemeConfig,
  pub carousels:   Vec<CarouselConfig>,
  pub menu:        Vec<MenuEntry>,
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// Which products a feature-product block shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
  pub mode:            String,
  pub primary_class:   i64,
  pub secondary_class: i64,
}

impl Default for FeatureConfig {
  /// The baseline selection used when a feature-product block has no
  /// explicit selection row.
  fn default() -> Self {
    Self {
      mode:            "latest".into(),
      primary_class:   0,
      secondary_class: 0,
    }
  }
}

/// One top-level block, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
  pub block_id:  i64,
  pub kind:      BlockKind,
  pub title:     String,
  pub body:      String,
  pub image_url: String,
  /// `Some` only for feature-product blocks.
  pub feature:   Option<FeatureConfig>,
}

/// Per-site page blocks, written to `<code>_pages.json`.
/// Keys are resolved page paths; each list is ordered by block sort key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PagesConfig {
  pub blocks: BTreeMap<String, Vec<BlockConfig>>,
}

// ─── News ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEntry {
  pub news_id:      i64,
  pub title:        String,
  pub summary:      String,
  pub image_url:    String,
  pub published_at: DateTime<Utc>,
}

/// Recent news for one site, written to `<code>_news.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewsConfig {
  pub entries: Vec<NewsEntry>,
}

// ─── Promotions ──────────────────────────────────────────────────────────────

/// A spend threshold with its amount rounded up to the currency's minimum
/// unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionConfig {
  pub threshold: i64,
  pub currency:  String,
  pub reward:    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionConfig {
  pub promotion_id: i64,
  pub title:        String,
  pub kind:         String,
  pub starts_at:    DateTime<Utc>,
  pub ends_at:      Option<DateTime<Utc>>,
  pub conditions:   Vec<ConditionConfig>,
}

/// Active promotions for one site, written to `<code>_promotions.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromotionsConfig {
  pub entries: Vec<PromotionConfig>,
}

// ─── Permissions ─────────────────────────────────────────────────────────────

/// Role → allowed actions, written to `<code>_permissions.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PermissionsConfig {
  pub roles: BTreeMap<String, Vec<String>>,
}

// ─── Topic ───────────────────────────────────────────────────────────────────

/// A flattened topic row, written to `topic_<id>.json`. Keyed by topic id
/// rather than site code — topics are shared across sites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicConfig {
  pub topic_id:        i64,
  pub name:            String,
  pub style:           String,
  pub primary_color:   String,
  pub secondary_color: String,
}

// ─── Lookup index entry ──────────────────────────────────────────────────────

/// The summary record stored per site in the lookup indexes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteSummary {
  pub site_id: i64,
  pub code:    String,
  pub name:    String,
  pub domain:  String,
}
