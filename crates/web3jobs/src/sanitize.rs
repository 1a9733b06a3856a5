//! Helpers for sanitizing data before it enters log lines and span fields.
//!
//! Keeps user contact details and stored secrets out of logs so they are safe
//! to share when debugging.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Masks the local part of an email address, keeping its first character.
///
/// - `john@gmail.com` → `j***@gmail.com`
/// - `x@y.com` → `x***@y.com`
/// - `not-an-email` → `***`
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Returns a short deterministic hash of a stored value for correlation
/// without exposing its contents.
pub fn hash_value(value: &str) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
