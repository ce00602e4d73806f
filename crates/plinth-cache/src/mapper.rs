//! Field-mapping helpers with explicit fallbacks.
//!
//! The legacy implementation defaulted missing fields ad hoc with
//! null-coalescing at every call site; here every fallback is declared once
//! at the mapping site and testable on its own.

/// Pull a field off an optional joined record, falling back to `default`
/// when the record is absent. Covers the "joined row not found" case
/// without raising.
pub fn field_or<R, T>(
  record: Option<&R>,
  default: T,
  get: impl FnOnce(&R) -> T,
) -> T {
  match record {
    Some(r) => get(r),
    None => default,
  }
}

/// Empty-string fallback for optional text columns.
pub fn text(value: Option<&str>) -> String {
  value.unwrap_or_default().to_owned()
}

/// Build a publicly-visible asset URL: `<base>/<scope>/<file>`.
///
/// An absent or empty file name yields an empty string, never a malformed
/// URL. Slashes are normalised so the base may be given with or without a
/// trailing slash.
pub fn asset_url(base: &str, scope: &str, file: Option<&str>) -> String {
  match file {
    Some(f) if !f.is_empty() => {
      format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        scope.trim_matches('/'),
        f.trim_start_matches('/'),
      )
    }
    _ => String::new(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
