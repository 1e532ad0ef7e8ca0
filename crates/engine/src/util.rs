//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! mapping logic so every query path converts rows the same way.

use crate::{EngineError, ResultEngine};

/// Convert a batch of database models into domain values, failing on the
/// first row that does not map.
pub(crate) fn into_domain<M, T>(models: Vec<M>) -> ResultEngine<Vec<T>>
where
    T: TryFrom<M, Error = EngineError>,
{
    models.into_iter().map(T::try_from).collect()
}

/// Sorted, de-duplicated copy of a list of identities.
///
/// Used both for `IN (...)` lookups and to derive a canonical row-lock order.
pub(crate) fn canonical_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Trim a required text field, rejecting blanks.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}
