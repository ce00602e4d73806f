//! [`SqliteStore`] — the SQLite implementation of [`SiteStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use plinth_core::{
  records::{
    BlockRecord, CarouselRecord, ConditionRecord, FeatureSelection,
    NewsRecord, PageSetting, PermissionRecord, PromotionRecord, SiteRecord,
    TopicRecord,
  },
  store::SiteStore,
};

use crate::{
  encode::{RawBlock, RawNews, RawPermission, RawPromotion, RawSite, RawTopic},
  schema::SCHEMA,
  Error, Result,
};

/// Every site fetch selects the same column set in the same order.
const SITE_COLUMNS: &str = "site_id, code, name, domain, site_type, \
   ecommerce, status, topic_id, logo, favicon, phone, email, address, \
   seo_title, seo_keywords, seo_description, created_at";

fn read_site_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSite> {
  Ok(RawSite {
    site_id:         row.get(0)?,
    code:            row.get(1)?,
    name:            row.get(2)?,
    domain:          row.get(3)?,
    site_type:       row.get(4)?,
    ecommerce:       row.get(5)?,
    status:          row.get(6)?,
    topic_id:        row.get(7)?,
    logo:            row.get(8)?,
    favicon:         row.get(9)?,
    phone:           row.get(10)?,
    email:           row.get(11)?,
    address:         row.get(12)?,
    seo_title:       row.get(13)?,
    seo_keywords:    row.get(14)?,
    seo_description: row.get(15)?,
    created_at:      row.get(16)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A plinth row store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_site_where(
    &self,
    condition: &'static str,
    param: impl rusqlite::ToSql + Send + 'static,
  ) -> Result<Option<SiteRecord>> {
    let raw: Option<RawSite> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {SITE_COLUMNS} FROM sites
                 WHERE {condition} AND deleted = 0"
              ),
              rusqlite::params![param],
              read_site_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSite::into_site).transpose()
  }
}

// ─── SiteStore impl ──────────────────────────────────────────────────────────

impl SiteStore for SqliteStore {
  type Error = Error;

  // ── Sites ─────────────────────────────────────────────────────────────────

  async fn get_site(&self, site_id: i64) -> Result<Option<SiteRecord>> {
    self.fetch_site_where("site_id = ?1", site_id).await
  }

  async fn get_site_by_code(&self, code: &str) -> Result<Option<SiteRecord>> {
    self.fetch_site_where("code = ?1", code.to_owned()).await
  }

  async fn list_sites(&self, only_public: bool) -> Result<Vec<SiteRecord>> {
    let raws: Vec<RawSite> = self
      .conn
      .call(move |conn| {
        let sql = if only_public {
          format!(
            "SELECT {SITE_COLUMNS} FROM sites
             WHERE deleted = 0 AND status = 1
             ORDER BY site_id"
          )
        } else {
          format!(
            "SELECT {SITE_COLUMNS} FROM sites
             WHERE deleted = 0
             ORDER BY site_id"
          )
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], read_site_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSite::into_site).collect()
  }

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn get_topic(&self, topic_id: i64) -> Result<Option<TopicRecord>> {
    let raw: Option<RawTopic> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT topic_id, name, style, primary_color, secondary_color,
                      status
               FROM topics
               WHERE topic_id = ?1 AND deleted = 0",
              rusqlite::params![topic_id],
              |row| {
                Ok(RawTopic {
                  topic_id:        row.get(0)?,
                  name:            row.get(1)?,
                  style:           row.get(2)?,
                  primary_color:   row.get(3)?,
                  secondary_color: row.get(4)?,
                  status:          row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTopic::into_topic).transpose()
  }

  // ── Per-site content ──────────────────────────────────────────────────────

  async fn list_carousels(&self, site_id: i64) -> Result<Vec<CarouselRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT carousel_id, site_id, title, image, link, sort
           FROM carousels
           WHERE site_id = ?1 AND deleted = 0
           ORDER BY sort ASC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![site_id], |row| {
            Ok(CarouselRecord {
              carousel_id: row.get(0)?,
              site_id:     row.get(1)?,
              title:       row.get(2)?,
              image:       row.get(3)?,
              link:        row.get(4)?,
              sort:        row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn latest_news(
    &self,
    site_id: i64,
    limit: usize,
  ) -> Result<Vec<NewsRecord>> {
    let limit = limit as i64;

    let raws: Vec<RawNews> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT news_id, site_id, title, summary, image, published_at
           FROM news
           WHERE site_id = ?1 AND deleted = 0 AND status = 1
           ORDER BY published_at DESC
           LIMIT ?2",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![site_id, limit], |row| {
            Ok(RawNews {
              news_id:      row.get(0)?,
              site_id:      row.get(1)?,
              title:        row.get(2)?,
              summary:      row.get(3)?,
              image:        row.get(4)?,
              published_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNews::into_news).collect()
  }

  async fn list_promotions(
    &self,
    site_id: i64,
  ) -> Result<Vec<PromotionRecord>> {
    let raws: Vec<RawPromotion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT promotion_id, site_id, title, kind, starts_at, ends_at
           FROM promotions
           WHERE site_id = ?1 AND deleted = 0 AND status = 1
           ORDER BY starts_at DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![site_id], |row| {
            Ok(RawPromotion {
              promotion_id: row.get(0)?,
              site_id:      row.get(1)?,
              title:        row.get(2)?,
              kind:         row.get(3)?,
              starts_at:    row.get(4)?,
              ends_at:      row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPromotion::into_promotion).collect()
  }

  async fn list_promotion_conditions(
    &self,
    promotion_id: i64,
  ) -> Result<Vec<ConditionRecord>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT condition_id, promotion_id, threshold, currency, reward
           FROM promotion_conditions
           WHERE promotion_id = ?1
           ORDER BY condition_id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![promotion_id], |row| {
            Ok(ConditionRecord {
              condition_id: row.get(0)?,
              promotion_id: row.get(1)?,
              threshold:    row.get(2)?,
              currency:     row.get(3)?,
              reward:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_permissions(
    &self,
    site_id: i64,
  ) -> Result<Vec<PermissionRecord>> {
    let raws: Vec<RawPermission> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT permission_id, site_id, role, actions
           FROM permissions
           WHERE site_id = ?1 AND deleted = 0
           ORDER BY role",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![site_id], |row| {
            Ok(RawPermission {
              permission_id: row.get(0)?,
              site_id:       row.get(1)?,
              role:          row.get(2)?,
              actions:       row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawPermission::into_permission)
      .collect()
  }

  // ── Pages and blocks ──────────────────────────────────────────────────────

  async fn list_page_settings(&self, site_id: i64) -> Result<Vec<PageSetting>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT page_id, site_id, base_name, base_path, custom_name,
                  custom_path, sort, visible
           FROM page_settings
           WHERE site_id = ?1 AND deleted = 0
           ORDER BY sort ASC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![site_id], |row| {
            Ok(PageSetting {
              page_id:     row.get(0)?,
              site_id:     row.get(1)?,
              base_name:   row.get(2)?,
              base_path:   row.get(3)?,
              custom_name: row.get(4)?,
              custom_path: row.get(5)?,
              sort:        row.get(6)?,
              visible:     row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_top_level_blocks(
    &self,
    page_id: i64,
  ) -> Result<Vec<BlockRecord>> {
    let raws: Vec<RawBlock> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT block_id, page_id, parent_id, kind, title, body, image, sort
           FROM blocks
           WHERE page_id = ?1 AND parent_id IS NULL AND deleted = 0
           ORDER BY sort ASC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![page_id], |row| {
            Ok(RawBlock {
              block_id:  row.get(0)?,
              page_id:   row.get(1)?,
              parent_id: row.get(2)?,
              kind:      row.get(3)?,
              title:     row.get(4)?,
              body:      row.get(5)?,
              image:     row.get(6)?,
              sort:      row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBlock::into_block).collect()
  }

  async fn get_feature_selection(
    &self,
    block_id: i64,
  ) -> Result<Option<FeatureSelection>> {
    let selection = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT selection_id, block_id, mode, primary_class,
                      secondary_class
               FROM feature_selections
               WHERE block_id = ?1",
              rusqlite::params![block_id],
              |row| {
                Ok(FeatureSelection {
                  selection_id:    row.get(0)?,
                  block_id:        row.get(1)?,
                  mode:            row.get(2)?,
                  primary_class:   row.get(3)?,
                  secondary_class: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(selection)
  }
}
