#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Small helpers shared by the extractor and the merger: order-preserving
//! deduplication, duplicate detection and schema-reference type naming.

use heck::ToPascalCase;
use percent_encoding::percent_decode_str;
use std::collections::HashSet;
use std::hash::Hash;

const SWAGGER_DEFINITIONS_PREFIX: &str = "#/definitions/";
const OPENAPI_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Returns the items of `values` with repeats removed, keeping the first occurrence.
pub fn unique<T>(values: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Returns every value that occurs more than once, each reported once,
/// in the order its first repeat was encountered.
pub fn duplicates<T>(values: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    let repeated = values
        .iter()
        .filter(|value| !seen.insert(*value))
        .cloned();
    unique(repeated)
}

/// Converts a name such as `user_account` or `user-account` into `UserAccount`.
pub fn pascal_case(name: &str) -> String {
    name.to_pascal_case()
}

/// Derives the return type name carried by a schema `$ref`.
///
/// `#/definitions/user_account` -> `UserAccount`.
/// OpenAPI 3 component references are handled the same way; any other
/// reference falls back to its last JSON Pointer segment.
pub fn ref_type_name(reference: &str) -> Option<String> {
    let raw = reference
        .strip_prefix(SWAGGER_DEFINITIONS_PREFIX)
        .or_else(|| reference.strip_prefix(OPENAPI_SCHEMAS_PREFIX))
        .unwrap_or_else(|| reference.rsplit('/').next().unwrap_or(reference));

    let name = decode_pointer_segment(raw);
    if name.trim().is_empty() {
        None
    } else {
        Some(pascal_case(&name))
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded).decode_utf8_lossy().into_owned()
}
