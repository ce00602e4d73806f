//! Site navigation assembly from page-setting rows.
//!
//! The menu is computed at cache-build time and stored inside the site
//! document. Hidden pages are skipped; the sort is stable, so entries that
//! share a sort key keep their source order — none are dropped.

use serde::{Deserialize, Serialize};

use crate::records::{PageSetting, SiteType};

/// One navigation entry, already resolved to its display name and path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
  pub name: String,
  pub path: String,
}

impl MenuEntry {
  fn new(name: &str, path: &str) -> Self {
    Self { name: name.to_owned(), path: path.to_owned() }
  }
}

/// The fixed entry appended to every menu.
const LOGIN: (&str, &str) = ("login", "/login");

/// Appended only for commerce-capable sites.
const SHOPPING_CART: (&str, &str) = ("shopping_cart", "/cart");

/// Assemble the navigation menu for one site.
///
/// Visible pages only, ascending by sort key, each resolved to
/// `(name, path)` with custom overrides preferred over base defaults. A
/// `login` entry is always appended; a `shopping_cart` entry follows when
/// the site sells (ecommerce flag set, or site type is commerce).
pub fn assemble_menu(
  pages: &[PageSetting],
  ecommerce: bool,
  site_type: SiteType,
) -> Vec<MenuEntry> {
  let mut visible: Vec<&PageSetting> =
    pages.iter().filter(|p| p.visible).collect();
  visible.sort_by_key(|p| p.sort);

  let mut menu: Vec<MenuEntry> = visible
    .into_iter()
    .map(|p| MenuEntry::new(p.resolved_name(), p.resolved_path()))
    .collect();

  menu.push(MenuEntry::new(LOGIN.0, LOGIN.1));

  if ecommerce || site_type == SiteType::Commerce {
    menu.push(MenuEntry::new(SHOPPING_CART.0, SHOPPING_CART.1));
  }

  menu
}

// ─── Tests ───────────────────────────────────────────────────────────────────
