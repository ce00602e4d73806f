//! Decoding helpers between SQLite column values and the domain record
//! types.
//!
//! Timestamps are stored as RFC 3339 strings, flags as 0/1 integers,
//! enumerations as their numeric or string discriminants, and the
//! permissions `actions` column as a compact JSON array.

use chrono::{DateTime, Utc};
use plinth_core::records::{
  BlockKind, BlockRecord, NewsRecord, PermissionRecord, PromotionRecord,
  SiteRecord, SiteStatus, SiteType, TopicRecord,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Actions (JSON column) ───────────────────────────────────────────────────

pub fn decode_actions(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `sites` row.
pub struct RawSite {
  pub site_id:         i64,
  pub code:            String,
  pub name:            String,
  pub domain:          String,
  pub site_type:       i64,
  pub ecommerce:       bool,
  pub status:          i64,
  pub topic_id:        Option<i64>,
  pub logo:            Option<String>,
  pub favicon:         Option<String>,
  pub phone:           Option<String>,
  pub email:           Option<String>,
  pub address:         Option<String>,
  pub seo_title:       Option<String>,
  pub seo_keywords:    Option<String>,
  pub seo_description: Option<String>,
  pub created_at:      String,
}

impl RawSite {
  pub fn into_site(self) -> Result<SiteRecord> {
    Ok(SiteRecord {
      site_id:         self.site_id,
      code:            self.code,
      name:            self.name,
      domain:          self.domain,
      site_type:       SiteType::from_code(self.site_type)?,
      ecommerce:       self.ecommerce,
      status:          SiteStatus::from_code(self.status)?,
      topic_id:        self.topic_id,
      logo:            self.logo,
      favicon:         self.favicon,
      phone:           self.phone,
      email:           self.email,
      address:         self.address,
      seo_title:       self.seo_title,
      seo_keywords:    self.seo_keywords,
      seo_description: self.seo_description,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `topics` row.
pub struct RawTopic {
  pub topic_id:        i64,
  pub name:            String,
  pub style:           String,
  pub primary_color:   String,
  pub secondary_color: String,
  pub status:          i64,
}

impl RawTopic {
  pub fn into_topic(self) -> Result<TopicRecord> {
    Ok(TopicRecord {
      topic_id:        self.topic_id,
      name:            self.name,
      style:           self.style,
      primary_color:   self.primary_color,
      secondary_color: self.secondary_color,
      status:          SiteStatus::from_code(self.status)?,
    })
  }
}

/// Raw values read directly from a `news` row.
pub struct RawNews {
  pub news_id:      i64,
  pub site_id:      i64,
  pub title:        String,
  pub summary:      Option<String>,
  pub image:        Option<String>,
  pub published_at: String,
}

impl RawNews {
  pub fn into_news(self) -> Result<NewsRecord> {
    Ok(NewsRecord {
      news_id:      self.news_id,
      site_id:      self.site_id,
      title:        self.title,
      summary:      self.summary,
      image:        self.image,
      published_at: decode_dt(&self.published_at)?,
    })
  }
}

/// Raw values read directly from a `promotions` row.
pub struct RawPromotion {
  pub promotion_id: i64,
  pub site_id:      i64,
  pub title:        String,
  pub kind:         String,
  pub starts_at:    String,
  pub ends_at:      Option<String>,
}

impl RawPromotion {
  pub fn into_promotion(self) -> Result<PromotionRecord> {
    Ok(PromotionRecord {
      promotion_id: self.promotion_id,
      site_id:      self.site_id,
      title:        self.title,
      kind:         self.kind,
      starts_at:    decode_dt(&self.starts_at)?,
      ends_at:      self.ends_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw values read directly from a `permissions` row.
pub struct RawPermission {
  pub permission_id: i64,
  pub site_id:       i64,
  pub role:          String,
  pub actions:       String,
}

impl RawPermission {
  pub fn into_permission(self) -> Result<PermissionRecord> {
    Ok(PermissionRecord {
      permission_id: self.permission_id,
      site_id:       self.site_id,
      role:          self.role,
      actions:       decode_actions(&self.actions)?,
    })
  }
}

/// Raw values read directly from a `blocks` row.
pub struct RawBlock {
  pub block_id:  i64,
  pub page_id:   i64,
  pub parent_id: Option<i64>,
  pub kind:      String,
  pub title:     String,
  pub body:      Option<String>,
  pub image:     Option<String>,
  pub sort:      i64,
}

impl RawBlock {
  pub fn into_block(self) -> Result<BlockRecord> {
    Ok(BlockRecord {
      block_id:  self.block_id,
      page_id:   self.page_id,
      parent_id: self.parent_id,
      kind:      BlockKind::from_discriminant(&self.kind)?,
      title:     self.title,
      body:      self.body,
      image:     self.image,
      sort:      self.sort,
    })
  }
}

// Carousels, conditions, page settings, and feature selections decode
// without fallible conversions; their rows map straight to the domain types
// inside the query closures, so no Raw struct is needed for them.
