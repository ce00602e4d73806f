//! SQL schema for the plinth SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS sites (
    site_id         INTEGER PRIMARY KEY,
    code            TEXT NOT NULL UNIQUE,  -- URL-safe; names the cache files
    name            TEXT NOT NULL,
    domain          TEXT NOT NULL,
    site_type       INTEGER NOT NULL DEFAULT 0,  -- 0 standard | 1 portal | 2 commerce
    ecommerce       INTEGER NOT NULL DEFAULT 0,
    status          INTEGER NOT NULL DEFAULT 0,  -- 0 draft | 1 public
    deleted         INTEGER NOT NULL DEFAULT 0,
    topic_id        INTEGER REFERENCES topics(topic_id),
    logo            TEXT,            -- stored file name, not a URL
    favicon         TEXT,
    phone           TEXT,
    email           TEXT,
    address         TEXT,
    seo_title       TEXT,
    seo_keywords    TEXT,
    seo_description TEXT,
    created_at      TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS topics (
    topic_id        INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    style           TEXT NOT NULL DEFAULT '',
    primary_color   TEXT NOT NULL DEFAULT '',
    secondary_color TEXT NOT NULL DEFAULT '',
    status          INTEGER NOT NULL DEFAULT 0,
    deleted         INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS carousels (
    carousel_id INTEGER PRIMARY KEY,
    site_id     INTEGER NOT NULL REFERENCES sites(site_id),
    title       TEXT NOT NULL,
    image       TEXT,
    link        TEXT,
    sort        INTEGER NOT NULL DEFAULT 0,
    deleted     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS news (
    news_id      INTEGER PRIMARY KEY,
    site_id      INTEGER NOT NULL REFERENCES sites(site_id),
    title        TEXT NOT NULL,
    summary      TEXT,
    image        TEXT,
    status       INTEGER NOT NULL DEFAULT 0,
    deleted      INTEGER NOT NULL DEFAULT 0,
    published_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS promotions (
    promotion_id INTEGER PRIMARY KEY,
    site_id      INTEGER NOT NULL REFERENCES sites(site_id),
    title        TEXT NOT NULL,
    kind         TEXT NOT NULL DEFAULT '',
    status       INTEGER NOT NULL DEFAULT 0,
    deleted      INTEGER NOT NULL DEFAULT 0,
    starts_at    TEXT NOT NULL,
    ends_at      TEXT
);

CREATE TABLE IF NOT EXISTS promotion_conditions (
    condition_id INTEGER PRIMARY KEY,
    promotion_id INTEGER NOT NULL REFERENCES promotions(promotion_id),
    threshold    TEXT NOT NULL,   -- raw operator input; validated at build time
    currency     TEXT NOT NULL,
    reward       TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS permissions (
    permission_id INTEGER PRIMARY KEY,
    site_id       INTEGER NOT NULL REFERENCES sites(site_id),
    role          TEXT NOT NULL,
    actions       TEXT NOT NULL DEFAULT '[]',  -- JSON array of action strings
    deleted       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS page_settings (
    page_id     INTEGER PRIMARY KEY,
    site_id     INTEGER NOT NULL REFERENCES sites(site_id),
    base_name   TEXT NOT NULL,
    base_path   TEXT NOT NULL,
    custom_name TEXT,            -- '' or '_' means no override
    custom_path TEXT,
    sort        INTEGER NOT NULL DEFAULT 0,
    visible     INTEGER NOT NULL DEFAULT 1,
    deleted     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS blocks (
    block_id  INTEGER PRIMARY KEY,
    page_id   INTEGER NOT NULL REFERENCES page_settings(page_id),
    parent_id INTEGER REFERENCES blocks(block_id),
    kind      TEXT NOT NULL,     -- discriminant of BlockKind
    title     TEXT NOT NULL DEFAULT '',
    body      TEXT,
    image     TEXT,
    sort      INTEGER NOT NULL DEFAULT 0,
    deleted   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS feature_selections (
    selection_id    INTEGER PRIMARY KEY,
    block_id        INTEGER NOT NULL REFERENCES blocks(block_id),
    mode            TEXT NOT NULL DEFAULT 'latest',
    primary_class   INTEGER NOT NULL DEFAULT 0,
    secondary_class INTEGER NOT NULL DEFAULT 0,
    UNIQUE (block_id)
);

CREATE INDEX IF NOT EXISTS sites_code_idx      ON sites(code);
CREATE INDEX IF NOT EXISTS carousels_site_idx  ON carousels(site_id);
CREATE INDEX IF NOT EXISTS news_site_idx       ON news(site_id, published_at);
CREATE INDEX IF NOT EXISTS promotions_site_idx ON promotions(site_id);
CREATE INDEX IF NOT EXISTS conditions_promo_idx ON promotion_conditions(promotion_id);
CREATE INDEX IF NOT EXISTS permissions_site_idx ON permissions(site_id);
CREATE INDEX IF NOT EXISTS pages_site_idx      ON page_settings(site_id);
CREATE INDEX IF NOT EXISTS blocks_page_idx     ON blocks(page_id);

PRAGMA user_version = 1;
";
