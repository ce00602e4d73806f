//! `plinth` — batch regeneration CLI for the site config cache.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and rebuilds cache documents for one site, one topic, or
//! every public site. Cache staleness is operational: run `rebuild` after
//! the underlying rows change.
//!
//! # Usage
//!
//! ```
//! plinth rebuild --code acme
//! plinth rebuild-all
//! plinth index remove --code acme
//! plinth show --code acme
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use plinth_cache::{summarize, CacheEngine, ConfigDir, CurrencyUnits};
use plinth_core::store::SiteStore as _;
use plinth_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Site config cache maintenance")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Rebuild every cache document for one site.
  Rebuild {
    /// The site's code (names its cache files).
    #[arg(long)]
    code: String,
  },

  /// Rebuild every public site and both lookup indexes.
  RebuildAll,

  /// Rebuild one topic document.
  Topic {
    #[arg(long)]
    id: i64,
  },

  /// Lookup index maintenance.
  #[command(subcommand)]
  Index(IndexCommand),

  /// Print a cached site document as JSON.
  Show {
    #[arg(long)]
    code: String,
  },
}

#[derive(Subcommand)]
enum IndexCommand {
  /// Populate the lookup indexes from the store if they do not exist yet.
  Bootstrap,

  /// Drop one site's entries from both lookup indexes.
  Remove {
    #[arg(long)]
    code: String,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of `config.toml`; every key can be overridden with a
/// `PLINTH_`-prefixed environment variable.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  store_path:      String,
  cache_dir:       String,
  assets_base_url: String,
  currency_config: String,
  #[serde(default = "default_news_limit")]
  news_limit:      usize,
}

fn default_news_limit() -> usize { 10 }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PLINTH"))
    .build()
    .context("failed to read config file")?;

  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise Settings")?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", settings.store_path)
    })?;

  let currency = CurrencyUnits::load(&settings.currency_config)
    .await
    .context("failed to load currency config")?;

  let engine = CacheEngine::new(
    Arc::new(store.clone()),
    ConfigDir::new(&settings.cache_dir),
    settings.assets_base_url.clone(),
    currency,
  );

  match cli.command {
    Command::Rebuild { code } => {
      rebuild_one(&store, &engine, &code, settings.news_limit).await
    }
    Command::RebuildAll => {
      rebuild_all(&store, &engine, settings.news_limit).await
    }
    Command::Topic { id } => match engine.rebuild_topic(id).await? {
      Some(topic) => {
        tracing::info!(topic_id = topic.topic_id, "topic rebuilt");
        Ok(())
      }
      None => {
        tracing::warn!(topic_id = id, "topic not eligible; nothing written");
        Ok(())
      }
    },
    Command::Index(IndexCommand::Bootstrap) => {
      let sites = engine.bootstrap_site_index().await?;
      let domains = engine.bootstrap_domain_index().await?;
      tracing::info!(sites, domains, "index bootstrap finished");
      Ok(())
    }
    Command::Index(IndexCommand::Remove { code }) => {
      if let Some(summary) = engine.lookup_site(&code).await? {
        engine.remove_domain_entry(&summary.domain).await?;
      }
      if engine.remove_site_entry(&code).await? {
        tracing::info!(%code, "index entries removed");
      } else {
        tracing::warn!(%code, "no index entry for that code");
      }
      Ok(())
    }
    Command::Show { code } => {
      let config = engine.site_config(&code).await?;
      println!("{}", serde_json::to_string_pretty(&config)?);
      Ok(())
    }
  }
}

// ─── Rebuild commands ─────────────────────────────────────────────────────────

async fn rebuild_one(
  store: &SqliteStore,
  engine: &CacheEngine<SqliteStore>,
  code: &str,
  news_limit: usize,
) -> anyhow::Result<()> {
  let site = store
    .get_site_by_code(code)
    .await?
    .with_context(|| format!("no site with code {code:?}"))?;

  match engine.rebuild_all(site.site_id, news_limit).await? {
    Some(config) => {
      engine.upsert_site_entry(summarize(&site)).await?;
      engine.upsert_domain_entry(summarize(&site)).await?;
      tracing::info!(code = %config.code, "site cache rebuilt");
    }
    None => tracing::warn!(code, "site not eligible; nothing written"),
  }

  Ok(())
}

async fn rebuild_all(
  store: &SqliteStore,
  engine: &CacheEngine<SqliteStore>,
  news_limit: usize,
) -> anyhow::Result<()> {
  engine.bootstrap_site_index().await?;
  engine.bootstrap_domain_index().await?;

  // Sites are independent; they are processed one at a time and a failure
  // on any of them aborts the batch.
  let sites = store.list_sites(true).await?;
  tracing::info!(count = sites.len(), "rebuilding all public sites");

  for site in &sites {
    if engine.rebuild_all(site.site_id, news_limit).await?.is_some() {
      engine.upsert_site_entry(summarize(site)).await?;
      engine.upsert_domain_entry(summarize(site)).await?;
    }
  }

  Ok(())
}
