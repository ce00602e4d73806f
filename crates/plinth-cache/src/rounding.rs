//! Rounding of monetary amounts to a currency's minimum unit.
//!
//! Condition thresholds arrive as raw operator input (text), so the helper
//! validates before it rounds. The per-currency exponent comes from a small
//! JSON config file: `{"JPY": 2, "USD": 0}` means JPY amounts round up to
//! the nearest 100 and USD amounts to the nearest 1.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mapping from currency code to minimum-unit exponent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyUnits {
  units: BTreeMap<String, u32>,
}

impl CurrencyUnits {
  pub fn new(units: BTreeMap<String, u32>) -> Self { Self { units } }

  /// Load the mapping from a JSON config file.
  ///
  /// An empty path is an invalid argument; a missing or malformed file is
  /// an I/O or parse error.
  pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
      return Err(Error::EmptyCurrencyConfigPath);
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  pub fn exponent(&self, currency: &str) -> Option<u32> {
    self.units.get(currency).copied()
  }
}

impl FromIterator<(String, u32)> for CurrencyUnits {
  fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
    Self { units: iter.into_iter().collect() }
  }
}

/// Round `amount` up to the nearest multiple of `10^exponent` for its
/// currency.
///
/// Already-aligned amounts pass through unchanged. Errors are synchronous
/// and recoverable: a non-numeric amount, an empty currency, or a currency
/// absent from the config each fail with a descriptive reason — the caller
/// decides whether to retry or abort.
pub fn round_up_to_unit(
  amount: &str,
  currency: &str,
  units: &CurrencyUnits,
) -> Result<i64> {
  if currency.is_empty() {
    return Err(Error::EmptyCurrency);
  }

  let value: f64 = amount
    .trim()
    .parse()
    .map_err(|_| Error::InvalidAmount(amount.to_owned()))?;
  if !value.is_finite() {
    return Err(Error::InvalidAmount(amount.to_owned()));
  }

  let exponent = units
    .exponent(currency)
    .ok_or_else(|| Error::UnknownCurrency(currency.to_owned()))?;

  let unit = 10_i64.pow(exponent);
  Ok((value / unit as f64).ceil() as i64 * unit)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
