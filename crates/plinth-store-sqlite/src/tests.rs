//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use plinth_core::{
  records::{BlockKind, SiteStatus, SiteType},
  store::SiteStore,
};

use crate::{encode::encode_dt, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ts(secs: i64) -> String {
  encode_dt(Utc.timestamp_opt(secs, 0).unwrap())
}

// ─── Seeding helpers ─────────────────────────────────────────────────────────
//
// The engine never writes rows; the admin surface that does is out of scope,
// so tests insert directly through the connection.

async fn exec(s: &SqliteStore, sql: &'static str, params: Vec<rusqlite::types::Value>) {
  s.conn
    .call(move |conn| {
      conn.execute(sql, rusqlite::params_from_iter(params))?;
      Ok(())
    })
    .await
    .expect("seed row");
}

fn text(v: &str) -> rusqlite::types::Value {
  rusqlite::types::Value::Text(v.to_owned())
}

fn int(v: i64) -> rusqlite::types::Value { rusqlite::types::Value::Integer(v) }

async fn seed_site(
  s: &SqliteStore,
  site_id: i64,
  code: &str,
  status: i64,
  deleted: i64,
) {
  exec(
    s,
    "INSERT INTO sites (site_id, code, name, domain, site_type, ecommerce,
                        status, deleted, logo, created_at)
     VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?6, 'logo.png', ?7)",
    vec![
      int(site_id),
      text(code),
      text("Example"),
      text("example.test"),
      int(status),
      int(deleted),
      text(&ts(1_700_000_000)),
    ],
  )
  .await;
}

async fn seed_news(
  s: &SqliteStore,
  news_id: i64,
  site_id: i64,
  title: &str,
  status: i64,
  published_secs: i64,
) {
  exec(
    s,
    "INSERT INTO news (news_id, site_id, title, status, deleted, published_at)
     VALUES (?1, ?2, ?3, ?4, 0, ?5)",
    vec![
      int(news_id),
      int(site_id),
      text(title),
      int(status),
      text(&ts(published_secs)),
    ],
  )
  .await;
}

// ─── Sites ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_site_missing_returns_none() {
  let s = store().await;
  assert!(s.get_site(404).await.unwrap().is_none());
}

#[tokio::test]
async fn get_site_roundtrips_columns() {
  let s = store().await;
  exec(
    &s,
    "INSERT INTO sites (site_id, code, name, domain, site_type, ecommerce,
                        status, deleted, topic_id, logo, phone, seo_title,
                        created_at)
     VALUES (1, 'acme', 'Acme', 'acme.test', 2, 1, 1, 0, 7, 'acme.png',
             '555-0100', 'Acme — Home', ?1)",
    vec![text(&ts(1_700_000_000))],
  )
  .await;

  let site = s.get_site(1).await.unwrap().unwrap();
  assert_eq!(site.code, "acme");
  assert_eq!(site.site_type, SiteType::Commerce);
  assert!(site.ecommerce);
  assert_eq!(site.status, SiteStatus::Public);
  assert_eq!(site.topic_id, Some(7));
  assert_eq!(site.logo.as_deref(), Some("acme.png"));
  assert_eq!(site.phone.as_deref(), Some("555-0100"));
  assert_eq!(site.seo_title.as_deref(), Some("Acme — Home"));
  assert_eq!(site.email, None);
  assert_eq!(site.created_at, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
}

#[tokio::test]
async fn soft_deleted_site_is_invisible() {
  let s = store().await;
  seed_site(&s, 1, "gone", 1, 1).await;

  assert!(s.get_site(1).await.unwrap().is_none());
  assert!(s.get_site_by_code("gone").await.unwrap().is_none());
  assert!(s.list_sites(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_site_by_code() {
  let s = store().await;
  seed_site(&s, 1, "alpha", 1, 0).await;
  seed_site(&s, 2, "beta", 1, 0).await;

  let site = s.get_site_by_code("beta").await.unwrap().unwrap();
  assert_eq!(site.site_id, 2);
}

#[tokio::test]
async fn list_sites_only_public_filters_drafts() {
  let s = store().await;
  seed_site(&s, 1, "pub", 1, 0).await;
  seed_site(&s, 2, "draft", 0, 0).await;

  let all = s.list_sites(false).await.unwrap();
  assert_eq!(all.len(), 2);

  let public = s.list_sites(true).await.unwrap();
  assert_eq!(public.len(), 1);
  assert_eq!(public[0].code, "pub");
}

// ─── Topics ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_topic_roundtrips() {
  let s = store().await;
  exec(
    &s,
    "INSERT INTO topics (topic_id, name, style, primary_color,
                         secondary_color, status, deleted)
     VALUES (7, 'Ocean', 'wide', '#003366', '#66ccff', 1, 0)",
    vec![],
  )
  .await;

  let topic = s.get_topic(7).await.unwrap().unwrap();
  assert_eq!(topic.name, "Ocean");
  assert_eq!(topic.primary_color, "#003366");
  assert!(topic.status.is_public());

  assert!(s.get_topic(8).await.unwrap().is_none());
}

// ─── Carousels ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn carousels_ordered_by_sort_key() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  for (id, sort, title) in [(1, 20, "second"), (2, 10, "first"), (3, 30, "third")] {
    exec(
      &s,
      "INSERT INTO carousels (carousel_id, site_id, title, image, sort, deleted)
       VALUES (?1, 1, ?2, 'slide.jpg', ?3, 0)",
      vec![int(id), text(title), int(sort)],
    )
    .await;
  }

  let slides = s.list_carousels(1).await.unwrap();
  let titles: Vec<_> = slides.iter().map(|c| c.title.as_str()).collect();
  assert_eq!(titles, ["first", "second", "third"]);
}

// ─── News ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_news_newest_first_and_limited() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  seed_news(&s, 1, 1, "oldest", 1, 1_000).await;
  seed_news(&s, 2, 1, "middle", 1, 2_000).await;
  seed_news(&s, 3, 1, "newest", 1, 3_000).await;

  let news = s.latest_news(1, 2).await.unwrap();
  let titles: Vec<_> = news.iter().map(|n| n.title.as_str()).collect();
  assert_eq!(titles, ["newest", "middle"]);
}

#[tokio::test]
async fn unpublished_news_is_excluded() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  seed_news(&s, 1, 1, "draft", 0, 1_000).await;
  seed_news(&s, 2, 1, "live", 1, 2_000).await;

  let news = s.latest_news(1, 10).await.unwrap();
  assert_eq!(news.len(), 1);
  assert_eq!(news[0].title, "live");
}

// ─── Promotions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn promotions_with_conditions_by_foreign_key() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  exec(
    &s,
    "INSERT INTO promotions (promotion_id, site_id, title, kind, status,
                             deleted, starts_at)
     VALUES (1, 1, 'Summer', 'discount', 1, 0, ?1)",
    vec![text(&ts(1_000))],
  )
  .await;
  exec(
    &s,
    "INSERT INTO promotions (promotion_id, site_id, title, kind, status,
                             deleted, starts_at)
     VALUES (2, 1, 'Winter', 'gift', 1, 0, ?1)",
    vec![text(&ts(2_000))],
  )
  .await;
  exec(
    &s,
    "INSERT INTO promotion_conditions (condition_id, promotion_id, threshold,
                                       currency, reward)
     VALUES (1, 1, '1234', 'JPY', 'free shipping')",
    vec![],
  )
  .await;

  let promos = s.list_promotions(1).await.unwrap();
  let titles: Vec<_> = promos.iter().map(|p| p.title.as_str()).collect();
  assert_eq!(titles, ["Winter", "Summer"]);

  let conditions = s.list_promotion_conditions(1).await.unwrap();
  assert_eq!(conditions.len(), 1);
  assert_eq!(conditions[0].threshold, "1234");
  assert_eq!(conditions[0].currency, "JPY");

  assert!(s.list_promotion_conditions(2).await.unwrap().is_empty());
}

// ─── Permissions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn permission_actions_json_roundtrip() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  exec(
    &s,
    "INSERT INTO permissions (permission_id, site_id, role, actions, deleted)
     VALUES (1, 1, 'editor', '[\"news.edit\",\"pages.edit\"]', 0)",
    vec![],
  )
  .await;

  let perms = s.list_permissions(1).await.unwrap();
  assert_eq!(perms.len(), 1);
  assert_eq!(perms[0].role, "editor");
  assert_eq!(perms[0].actions, ["news.edit", "pages.edit"]);
}

// ─── Pages and blocks ────────────────────────────────────────────────────────

#[tokio::test]
async fn page_settings_ordered_by_sort_key() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  for (id, sort, name) in [(1, 2, "About"), (2, 1, "Home")] {
    exec(
      &s,
      "INSERT INTO page_settings (page_id, site_id, base_name, base_path,
                                  sort, visible, deleted)
       VALUES (?1, 1, ?2, ?3, ?4, 1, 0)",
      vec![int(id), text(name), text("/p"), int(sort)],
    )
    .await;
  }

  let pages = s.list_page_settings(1).await.unwrap();
  let names: Vec<_> = pages.iter().map(|p| p.base_name.as_str()).collect();
  assert_eq!(names, ["Home", "About"]);
}

async fn seed_block(
  s: &SqliteStore,
  block_id: i64,
  page_id: i64,
  parent_id: Option<i64>,
  kind: &str,
  sort: i64,
) {
  let parent = match parent_id {
    Some(p) => rusqlite::types::Value::Integer(p),
    None => rusqlite::types::Value::Null,
  };
  exec(
    s,
    "INSERT INTO blocks (block_id, page_id, parent_id, kind, title, sort,
                         deleted)
     VALUES (?1, ?2, ?3, ?4, 'block', ?5, 0)",
    vec![int(block_id), int(page_id), parent, text(kind), int(sort)],
  )
  .await;
}

#[tokio::test]
async fn top_level_blocks_exclude_children() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  exec(
    &s,
    "INSERT INTO page_settings (page_id, site_id, base_name, base_path,
                                sort, visible, deleted)
     VALUES (1, 1, 'Home', '/', 1, 1, 0)",
    vec![],
  )
  .await;
  seed_block(&s, 1, 1, None, "text", 2).await;
  seed_block(&s, 2, 1, None, "feature_product", 1).await;
  seed_block(&s, 3, 1, Some(1), "image", 1).await;

  let blocks = s.list_top_level_blocks(1).await.unwrap();
  assert_eq!(blocks.len(), 2);
  assert_eq!(blocks[0].kind, BlockKind::FeatureProduct);
  assert_eq!(blocks[1].kind, BlockKind::Text);
}

#[tokio::test]
async fn unknown_block_kind_is_a_decode_error() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  exec(
    &s,
    "INSERT INTO page_settings (page_id, site_id, base_name, base_path,
                                sort, visible, deleted)
     VALUES (1, 1, 'Home', '/', 1, 1, 0)",
    vec![],
  )
  .await;
  seed_block(&s, 1, 1, None, "hologram", 1).await;

  let err = s.list_top_level_blocks(1).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(plinth_core::Error::UnknownBlockKind(_))
  ));
}

#[tokio::test]
async fn feature_selection_single_by_foreign_key() {
  let s = store().await;
  seed_site(&s, 1, "acme", 1, 0).await;
  exec(
    &s,
    "INSERT INTO page_settings (page_id, site_id, base_name, base_path,
                                sort, visible, deleted)
     VALUES (1, 1, 'Home', '/', 1, 1, 0)",
    vec![],
  )
  .await;
  seed_block(&s, 1, 1, None, "feature_product", 1).await;
  exec(
    &s,
    "INSERT INTO feature_selections (selection_id, block_id, mode,
                                     primary_class, secondary_class)
     VALUES (1, 1, 'hot', 3, 9)",
    vec![],
  )
  .await;

  let sel = s.get_feature_selection(1).await.unwrap().unwrap();
  assert_eq!(sel.mode, "hot");
  assert_eq!(sel.primary_class, 3);
  assert_eq!(sel.secondary_class, 9);

  assert!(s.get_feature_selection(2).await.unwrap().is_none());
}
