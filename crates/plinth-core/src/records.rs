//! Row types read from the relational store.
//!
//! One struct per table, shaped exactly as the fetchers return them. The
//! cache engine treats every record as read-only; the admin surface that
//! maintains the underlying tables is out of scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Legacy placeholder operators type into an override column to mean
/// "no override". Treated the same as an empty string.
pub const NO_OVERRIDE: &str = "_";

// ─── Site ────────────────────────────────────────────────────────────────────

/// What kind of site this is. Stored as a numeric code.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
  #[default]
  Standard,
  Portal,
  Commerce,
}

impl SiteType {
  /// The numeric code stored in the `site_type` column.
  pub fn code(self) -> i64 {
    match self {
      Self::Standard => 0,
      Self::Portal => 1,
      Self::Commerce => 2,
    }
  }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Standard),
      1 => Ok(Self::Portal),
      2 => Ok(Self::Commerce),
      other => Err(Error::UnknownSiteType(other)),
    }
  }
}

/// Publication state of a site or topic row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
  #[default]
  Draft,
  Public,
}

impl SiteStatus {
  pub fn code(self) -> i64 {
    match self {
      Self::Draft => 0,
      Self::Public => 1,
    }
  }

  pub fn from_code(code: i64) -> Result<Self> {
    match code {
      0 => Ok(Self::Draft),
      1 => Ok(Self::Public),
      other => Err(Error::UnknownSiteStatus(other)),
    }
  }

  pub fn is_public(self) -> bool { matches!(self, Self::Public) }
}

/// One row of the `sites` table — the owner of every per-site cache file.
///
/// `code` is the URL-safe identifier that names the site's cache documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
  pub site_id:         i64,
  pub code:            String,
  pub name:            String,
  pub domain:          String,
  pub site_type:       SiteType,
  pub ecommerce:       bool,
  pub status:          SiteStatus,
  /// FK into `topics`; a site without a theme renders with empty defaults.
  pub topic_id:        Option<i64>,
  pub logo:            Option<String>,
  pub favicon:         Option<String>,
  pub phone:           Option<String>,
  pub email:           Option<String>,
  pub address:         Option<String>,
  pub seo_title:       Option<String>,
  pub seo_keywords:    Option<String>,
  pub seo_description: Option<String>,
  pub created_at:      DateTime<Utc>,
}

// ─── Topic / theme ───────────────────────────────────────────────────────────

/// One row of the `topics` table — a reusable visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
  pub topic_id:        i64,
  pub name:            String,
  pub style:           String,
  pub primary_color:   String,
  pub secondary_color: String,
  pub status:          SiteStatus,
}

// ─── Content rows ────────────────────────────────────────────────────────────

/// A home-page carousel slide. `image` is a stored file name, not a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselRecord {
  pub carousel_id: i64,
  pub site_id:     i64,
  pub title:       String,
  pub image:       Option<String>,
  pub link:        Option<String>,
  pub sort:        i64,
}

/// A published news article, in list form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
  pub news_id:      i64,
  pub site_id:      i64,
  pub title:        String,
  pub summary:      Option<String>,
  pub image:        Option<String>,
  pub published_at: DateTime<Utc>,
}

/// A promotion activity. Its threshold conditions live in a separate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRecord {
  pub promotion_id: i64,
  pub site_id:      i64,
  pub title:        String,
  pub kind:         String,
  pub starts_at:    DateTime<Utc>,
  pub ends_at:      Option<DateTime<Utc>>,
}

/// A spend threshold attached to a promotion.
///
/// `threshold` is kept as the raw text operators entered; it is validated
/// and rounded to the currency's minimum unit at cache-build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
  pub condition_id: i64,
  pub promotion_id: i64,
  pub threshold:    String,
  pub currency:     String,
  pub reward:       String,
}

/// A role's allowed actions on one site. `actions` is a JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRecord {
  pub permission_id: i64,
  pub site_id:       i64,
  pub role:          String,
  pub actions:       Vec<String>,
}

// ─── Pages and blocks ────────────────────────────────────────────────────────

/// Per-page navigation settings. Custom name/path override the base values
/// when present; an empty string or [`NO_OVERRIDE`] means "use the base".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetting {
  pub page_id:     i64,
  pub site_id:     i64,
  pub base_name:   String,
  pub base_path:   String,
  pub custom_name: Option<String>,
  pub custom_path: Option<String>,
  pub sort:        i64,
  pub visible:     bool,
}

impl PageSetting {
  pub fn resolved_name(&self) -> &str {
    resolve_override(self.custom_name.as_deref(), &self.base_name)
  }

  pub fn resolved_path(&self) -> &str {
    resolve_override(self.custom_path.as_deref(), &self.base_path)
  }
}

fn resolve_override<'a>(custom: Option<&'a str>, base: &'a str) -> &'a str {
  match custom {
    Some(c) if !c.is_empty() && c != NO_OVERRIDE => c,
    _ => base,
  }
}

/// The semantic type of a page block. The variant name serves as the
/// discriminant string stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
  Text,
  Image,
  NewsList,
  FeatureProduct,
}

impl BlockKind {
  /// The discriminant string stored in the `kind` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn discriminant(self) -> &'static str {
    match self {
      Self::Text => "text",
      Self::Image => "image",
      Self::NewsList => "news_list",
      Self::FeatureProduct => "feature_product",
    }
  }

  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "text" => Ok(Self::Text),
      "image" => Ok(Self::Image),
      "news_list" => Ok(Self::NewsList),
      "feature_product" => Ok(Self::FeatureProduct),
      other => Err(Error::UnknownBlockKind(other.to_owned())),
    }
  }
}

/// A content block placed on a page. Top-level blocks have no parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
  pub block_id:  i64,
  pub page_id:   i64,
  pub parent_id: Option<i64>,
  pub kind:      BlockKind,
  pub title:     String,
  pub body:      Option<String>,
  pub image:     Option<String>,
  pub sort:      i64,
}

/// Which products a feature-product block shows. At most one per block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSelection {
  pub selection_id:    i64,
  pub block_id:        i64,
  pub mode:            String,
  pub primary_class:   i64,
  pub secondary_class: i64,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
