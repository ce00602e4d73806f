//! [`CacheEngine`] — the generic fetch → map → write pipeline.
//!
//! One engine serves every entity family; the per-family differences are
//! confined to which rows are fetched, how they flatten, and which file
//! name they land under. Build operations abort — writing nothing — when
//! the owning row is missing or not public, and propagate a typed error on
//! any store failure. Staleness is the caller's responsibility: nothing
//! here invalidates automatically.

use std::sync::Arc;

use tracing::{debug, info};

use plinth_core::{
  config::{
    CarouselConfig, ConditionConfig, NewsConfig, NewsEntry, PagesConfig,
    PermissionsConfig, PromotionConfig, PromotionsConfig, SeoConfig,
    SiteConfig, SiteSummary, ThemeConfig, TopicConfig,
  },
  menu::assemble_menu,
  records::{CarouselRecord, PageSetting, SiteRecord, TopicRecord},
  store::SiteStore,
};

use crate::{
  blocks::assemble_blocks,
  document::ConfigDir,
  mapper::{asset_url, field_or, text},
  paths,
  rounding::{round_up_to_unit, CurrencyUnits},
  Error, Result,
};

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Builds, persists, and loads per-site configuration documents.
#[derive(Clone)]
pub struct CacheEngine<S> {
  pub(crate) store: Arc<S>,
  dir:              ConfigDir,
  assets_base_url:  String,
  currency:         CurrencyUnits,
}

impl<S: SiteStore> CacheEngine<S> {
  pub fn new(
    store: Arc<S>,
    dir: ConfigDir,
    assets_base_url: impl Into<String>,
    currency: CurrencyUnits,
  ) -> Self {
    Self {
      store,
      dir,
      assets_base_url: assets_base_url.into(),
      currency,
    }
  }

  pub fn dir(&self) -> &ConfigDir { &self.dir }

  /// The owning site row, or `None` (skip, nothing written) when it is
  /// missing or not public.
  async fn eligible_site(&self, site_id: i64) -> Result<Option<SiteRecord>> {
    let Some(site) =
      self.store.get_site(site_id).await.map_err(Error::store)?
    else {
      debug!(site_id, "site not found; nothing written");
      return Ok(None);
    };

    if !site.status.is_public() {
      debug!(site_id, code = %site.code, "site not public; nothing written");
      return Ok(None);
    }

    Ok(Some(site))
  }

  // ── Build operations ──────────────────────────────────────────────────────

  /// Rebuild `<code>.json`: identity, contact and SEO fields, theme,
  /// carousels, and the navigation menu.
  pub async fn rebuild_site(&self, site_id: i64) -> Result<Option<SiteConfig>> {
    let Some(site) = self.eligible_site(site_id).await? else {
      return Ok(None);
    };

    // A missing or unpublished topic contributes empty theme fields; it
    // does not abort the build.
    let topic = match site.topic_id {
      Some(id) => self
        .store
        .get_topic(id)
        .await
        .map_err(Error::store)?
        .filter(|t| t.status.is_public()),
      None => None,
    };

    let carousels = self
      .store
      .list_carousels(site.site_id)
      .await
      .map_err(Error::store)?;

    let pages = self
      .store
      .list_page_settings(site.site_id)
      .await
      .map_err(Error::store)?;

    let config = self.map_site(&site, topic.as_ref(), &carousels, &pages);
    self.dir.write(&paths::site_file(&site.code), &config).await?;
    info!(code = %site.code, "site config written");

    Ok(Some(config))
  }

  /// Rebuild `<code>_pages.json`: top-level blocks grouped by resolved
  /// page path.
  pub async fn rebuild_pages(&self, site_id: i64) -> Result<Option<PagesConfig>> {
    let Some(site) = self.eligible_site(site_id).await? else {
      return Ok(None);
    };

    let pages = self
      .store
      .list_page_settings(site.site_id)
      .await
      .map_err(Error::store)?;

    let blocks =
      assemble_blocks(&*self.store, &self.assets_base_url, &site.code, &pages)
        .await?;

    let config = PagesConfig { blocks };
    self.dir.write(&paths::pages_file(&site.code), &config).await?;
    info!(code = %site.code, "pages config written");

    Ok(Some(config))
  }

  /// Rebuild `<code>_news.json`. An empty news list still writes an empty
  /// document — only a missing owner row aborts.
  pub async fn rebuild_news(
    &self,
    site_id: i64,
    limit: usize,
  ) -> Result<Option<NewsConfig>> {
    let Some(site) = self.eligible_site(site_id).await? else {
      return Ok(None);
    };

    let records = self
      .store
      .latest_news(site.site_id, limit)
      .await
      .map_err(Error::store)?;

    let entries = records
      .into_iter()
      .map(|n| NewsEntry {
        news_id:      n.news_id,
        title:        n.title,
        summary:      text(n.summary.as_deref()),
        image_url:    asset_url(
          &self.assets_base_url,
          &site.code,
          n.image.as_deref(),
        ),
        published_at: n.published_at,
      })
      .collect();

    let config = NewsConfig { entries };
    self.dir.write(&paths::news_file(&site.code), &config).await?;
    info!(code = %site.code, entries = config.entries.len(), "news config written");

    Ok(Some(config))
  }

  /// Rebuild `<code>_promotions.json`. Each promotion carries its threshold
  /// conditions, amounts rounded up to the currency's minimum unit.
  pub async fn rebuild_promotions(
    &self,
    site_id: i64,
  ) -> Result<Option<PromotionsConfig>> {
    let Some(site) = self.eligible_site(site_id).await? else {
      return Ok(None);
    };

    let records = self
      .store
      .list_promotions(site.site_id)
      .await
      .map_err(Error::store)?;

    let mut entries = Vec::with_capacity(records.len());
    for promo in records {
      let conditions = self
        .store
        .list_promotion_conditions(promo.promotion_id)
        .await
        .map_err(Error::store)?;

      let conditions = conditions
        .into_iter()
        .map(|c| {
          Ok(ConditionConfig {
            threshold: round_up_to_unit(
              &c.threshold,
              &c.currency,
              &self.currency,
            )?,
            currency:  c.currency,
            reward:    c.reward,
          })
        })
        .collect::<Result<Vec<_>>>()?;

      entries.push(PromotionConfig {
        promotion_id: promo.promotion_id,
        title: promo.title,
        kind: promo.kind,
        starts_at: promo.starts_at,
        ends_at: promo.ends_at,
        conditions,
      });
    }

    let config = PromotionsConfig { entries };
    self
      .dir
      .write(&paths::promotions_file(&site.code), &config)
      .await?;
    info!(code = %site.code, "promotions config written");

    Ok(Some(config))
  }

  /// Rebuild `<code>_permissions.json`: role → allowed actions.
  pub async fn rebuild_permissions(
    &self,
    site_id: i64,
  ) -> Result<Option<PermissionsConfig>> {
    let Some(site) = self.eligible_site(site_id).await? else {
      return Ok(None);
    };

    let records = self
      .store
      .list_permissions(site.site_id)
      .await
      .map_err(Error::store)?;

    let roles = records
      .into_iter()
      .map(|p| (p.role, p.actions))
      .collect();

    let config = PermissionsConfig { roles };
    self
      .dir
      .write(&paths::permissions_file(&site.code), &config)
      .await?;
    info!(code = %site.code, "permissions config written");

    Ok(Some(config))
  }

  /// Rebuild `topic_<id>.json` — the second entity-key family, shared
  /// across sites.
  pub async fn rebuild_topic(
    &self,
    topic_id: i64,
  ) -> Result<Option<TopicConfig>> {
    let Some(topic) =
      self.store.get_topic(topic_id).await.map_err(Error::store)?
    else {
      debug!(topic_id, "topic not found; nothing written");
      return Ok(None);
    };

    if !topic.status.is_public() {
      debug!(topic_id, "topic not public; nothing written");
      return Ok(None);
    }

    let config = TopicConfig {
      topic_id:        topic.topic_id,
      name:            topic.name,
      style:           topic.style,
      primary_color:   topic.primary_color,
      secondary_color: topic.secondary_color,
    };

    self.dir.write(&paths::topic_file(topic_id), &config).await?;
    info!(topic_id, "topic config written");

    Ok(Some(config))
  }

  /// Run every per-site build, sequentially. Returns the site document, or
  /// `None` when the site is missing or not public (nothing written).
  pub async fn rebuild_all(
    &self,
    site_id: i64,
    news_limit: usize,
  ) -> Result<Option<SiteConfig>> {
    let Some(config) = self.rebuild_site(site_id).await? else {
      return Ok(None);
    };

    self.rebuild_pages(site_id).await?;
    self.rebuild_news(site_id, news_limit).await?;
    self.rebuild_promotions(site_id).await?;
    self.rebuild_permissions(site_id).await?;

    Ok(Some(config))
  }

  // ── Read operations — cache file only, the store is never touched ─────────

  pub async fn site_config(&self, code: &str) -> Result<SiteConfig> {
    self.dir.read_or_default(&paths::site_file(code)).await
  }

  pub async fn site_config_exists(&self, code: &str) -> bool {
    self.dir.exists(&paths::site_file(code)).await
  }

  pub async fn pages_config(&self, code: &str) -> Result<PagesConfig> {
    self.dir.read_or_default(&paths::pages_file(code)).await
  }

  pub async fn news_config(&self, code: &str) -> Result<NewsConfig> {
    self.dir.read_or_default(&paths::news_file(code)).await
  }

  pub async fn promotions_config(&self, code: &str) -> Result<PromotionsConfig> {
    self.dir.read_or_default(&paths::promotions_file(code)).await
  }

  pub async fn permissions_config(
    &self,
    code: &str,
  ) -> Result<PermissionsConfig> {
    self.dir.read_or_default(&paths::permissions_file(code)).await
  }

  pub async fn topic_config(&self, topic_id: i64) -> Result<TopicConfig> {
    self.dir.read_or_default(&paths::topic_file(topic_id)).await
  }

  // ── Removal ───────────────────────────────────────────────────────────────

  /// Delete every per-site document and the site's index entries. Returns
  /// whether anything was actually removed.
  pub async fn remove_site(&self, code: &str) -> Result<bool> {
    let mut removed = false;

    // The domain index is keyed by hash; recover the domain from the site
    // index entry before it goes away.
    if let Some(summary) = self.lookup_site(code).await? {
      removed |= self.remove_domain_entry(&summary.domain).await?;
    }
    removed |= self.remove_site_entry(code).await?;

    for name in [
      paths::site_file(code),
      paths::pages_file(code),
      paths::news_file(code),
      paths::promotions_file(code),
      paths::permissions_file(code),
    ] {
      removed |= self.dir.remove(&name).await?;
    }

    if removed {
      info!(code, "site cache removed");
    }
    Ok(removed)
  }
}

// ─── Field mapping ───────────────────────────────────────────────────────────

impl<S: SiteStore> CacheEngine<S> {
  fn map_site(
    &self,
    site: &SiteRecord,
    topic: Option<&TopicRecord>,
    carousels: &[CarouselRecord],
    pages: &[PageSetting],
  ) -> SiteConfig {
    SiteConfig {
      site_id:     site.site_id,
      code:        site.code.clone(),
      name:        site.name.clone(),
      domain:      site.domain.clone(),
      site_type:   site.site_type,
      ecommerce:   site.ecommerce,
      logo_url:    self.site_asset(site, site.logo.as_deref()),
      favicon_url: self.site_asset(site, site.favicon.as_deref()),
      phone:       text(site.phone.as_deref()),
      email:       text(site.email.as_deref()),
      address:     text(site.address.as_deref()),
      seo:         SeoConfig {
        title:       text(site.seo_title.as_deref()),
        keywords:    text(site.seo_keywords.as_deref()),
        description: text(site.seo_description.as_deref()),
      },
      theme:       map_theme(topic),
      carousels:   carousels
        .iter()
        .map(|c| self.map_carousel(site, c))
        .collect(),
      menu:        assemble_menu(pages, site.ecommerce, site.site_type),
    }
  }

  fn map_carousel(
    &self,
    site: &SiteRecord,
    slide: &CarouselRecord,
  ) -> CarouselConfig {
    CarouselConfig {
      title:     slide.title.clone(),
      image_url: self.site_asset(site, slide.image.as_deref()),
      link:      text(slide.link.as_deref()),
    }
  }

  fn site_asset(&self, site: &SiteRecord, file: Option<&str>) -> String {
    asset_url(&self.assets_base_url, &site.code, file)
  }
}

/// Theme fields out of the joined topic row; all-empty when the join found
/// nothing.
fn map_theme(topic: Option<&TopicRecord>) -> ThemeConfig {
  ThemeConfig {
    topic_id:        topic.map(|t| t.topic_id),
    name:            field_or(topic, String::new(), |t| t.name.clone()),
    style:           field_or(topic, String::new(), |t| t.style.clone()),
    primary_color:   field_or(topic, String::new(), |t| {
      t.primary_color.clone()
    }),
    secondary_color: field_or(topic, String::new(), |t| {
      t.secondary_color.clone()
    }),
  }
}

/// The summary record the lookup indexes store per site.
pub fn summarize(site: &SiteRecord) -> SiteSummary {
  SiteSummary {
    site_id: site.site_id,
    code:    site.code.clone(),
    name:    site.name.clone(),
    domain:  site.domain.clone(),
  }
}
