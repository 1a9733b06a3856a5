//! Company records kept in the board's key-value store.
//!
//! Once an admin has changed the company list, the stored copy replaces the
//! catalog's companies on every later start.

use std::collections::HashSet;

use super::model::Company;
use crate::sanitize::hash_value;
use crate::storage::{KeyValueStore, KvOp, StorageError};

/// JSON array of every company record, inactive ones included.
pub const COMPANIES_KEY: &str = "catalog.companies";

/// Reads the stored company list.
///
/// `None` when nothing is stored or the entry cannot be used, in which case
/// the catalog's companies stand.
pub fn load_companies(kv: &dyn KeyValueStore) -> Result<Option<Vec<Company>>, StorageError> {
    let Some(raw) = kv.get(COMPANIES_KEY)? else {
        return Ok(None);
    };

    let companies: Vec<Company> = match serde_json::from_str(&raw) {
        Ok(companies) => companies,
        Err(e) => {
            log::warn!(
                "Ignoring malformed company records (value {}): {}",
                hash_value(&raw),
                e
            );
            return Ok(None);
        }
    };

    let mut seen = HashSet::new();
    if let Some(dup) = companies.iter().find(|c| !seen.insert(c.id)) {
        log::warn!(
            "Ignoring stored company records with duplicate id {}",
            dup.id
        );
        return Ok(None);
    }

    Ok(Some(companies))
}

/// Write that replaces the stored list with `companies`.
pub fn save_op(companies: &[Company]) -> Result<KvOp, StorageError> {
    Ok(KvOp::set(COMPANIES_KEY, serde_json::to_string(companies)?))
}
