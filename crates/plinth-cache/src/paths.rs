//! Deterministic cache file names derived from entity codes.
//!
//! Site codes are URL-safe by construction, so they embed directly into
//! file names. Domains are not — the domain index keys them by SHA-256
//! instead, which also avoids leaking raw host names into file listings.

use sha2::{Digest, Sha256};

/// The shared lookup index keyed by site code.
pub const SITE_INDEX_FILE: &str = "sites.json";

/// The shared lookup index keyed by hashed domain.
pub const DOMAIN_INDEX_FILE: &str = "domains.json";

pub fn site_file(code: &str) -> String { format!("{code}.json") }

pub fn pages_file(code: &str) -> String { format!("{code}_pages.json") }

pub fn news_file(code: &str) -> String { format!("{code}_news.json") }

pub fn promotions_file(code: &str) -> String {
  format!("{code}_promotions.json")
}

pub fn permissions_file(code: &str) -> String {
  format!("{code}_permissions.json")
}

pub fn topic_file(topic_id: i64) -> String { format!("topic_{topic_id}.json") }

/// Lowercase hex SHA-256 of a domain string; the key used by the domain
/// index. One-way on purpose — the index never needs the raw domain back.
pub fn domain_key(domain: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(domain.as_bytes());
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_names_are_deterministic() {
    assert_eq!(site_file("acme"), "acme.json");
    assert_eq!(pages_file("acme"), "acme_pages.json");
    assert_eq!(topic_file(7), "topic_7.json");
  }

  #[test]
  fn domain_key_is_stable_and_safe() {
    let a = domain_key("shop.example.com");
    let b = domain_key("shop.example.com");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

    assert_ne!(domain_key("shop.example.com"), domain_key("www.example.com"));
  }
}
