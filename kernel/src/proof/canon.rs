//! Canonical JSON bytes for search artifacts.
//!
//! Every digest in the workspace is taken over bytes produced here, so two
//! runs that record the same trace hash identically.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order), at every depth.
//! 2. Compact form: no whitespace between tokens.
//! 3. Strings are escaped the way `serde_json` escapes them (RFC 8259 §7).
//! 4. Numbers must be integers (`i64` or `u64`); floats are rejected so
//!    formatting can never drift across platforms.
//! 5. Array order is preserved.

use serde_json::Value;
use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },

    /// Writing a scalar failed.
    #[error("canonical JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number in `value` is
/// not representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::new();
    emit(&mut out, value)?;
    Ok(out)
}

fn emit(out: &mut Vec<u8>, value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                emit(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // serde_json's map order depends on its `preserve_order` feature,
            // which another crate in the build may switch on.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                emit(out, item)?;
            }
            out.push(b'}');
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            serde_json::to_writer(&mut *out, value)?;
        }
    }
    Ok(())
}
