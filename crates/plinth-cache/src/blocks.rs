//! Page block assembly.
//!
//! For every visible page the store is asked for its top-level blocks (no
//! parent), already ordered by the block's own sort key. Feature-product
//! blocks are enriched with their selection sub-record, falling back to the
//! baseline selection when none exists.

use std::collections::BTreeMap;

use plinth_core::{
  config::{BlockConfig, FeatureConfig},
  records::{BlockKind, BlockRecord, PageSetting},
  store::SiteStore,
};

use crate::{
  mapper::{asset_url, text},
  Error, Result,
};

/// Group the site's top-level blocks by resolved page path.
pub async fn assemble_blocks<S: SiteStore>(
  store: &S,
  assets_base_url: &str,
  code: &str,
  pages: &[PageSetting],
) -> Result<BTreeMap<String, Vec<BlockConfig>>> {
  let mut grouped = BTreeMap::new();

  for page in pages.iter().filter(|p| p.visible) {
    let records = store
      .list_top_level_blocks(page.page_id)
      .await
      .map_err(Error::store)?;

    let mut blocks = Vec::with_capacity(records.len());
    for record in records {
      blocks.push(map_block(store, assets_base_url, code, record).await?);
    }

    grouped.insert(page.resolved_path().to_owned(), blocks);
  }

  Ok(grouped)
}

async fn map_block<S: SiteStore>(
  store: &S,
  assets_base_url: &str,
  code: &str,
  record: BlockRecord,
) -> Result<BlockConfig> {
  let feature = if record.kind == BlockKind::FeatureProduct {
    let selection = store
      .get_feature_selection(record.block_id)
      .await
      .map_err(Error::store)?;

    Some(
      selection
        .map(|s| FeatureConfig {
          mode:            s.mode,
          primary_class:   s.primary_class,
          secondary_class: s.secondary_class,
        })
        .unwrap_or_default(),
    )
  } else {
    None
  };

  Ok(BlockConfig {
    block_id: record.block_id,
    kind: record.kind,
    title: record.title,
    body: text(record.body.as_deref()),
    image_url: asset_url(assets_base_url, code, record.image.as_deref()),
    feature,
  })
}
