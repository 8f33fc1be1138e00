//! Extraction of exception-specific properties.
//!
//! Shared by the detailed and simplified error plugins so both report the
//! same keys under the same exclusions.

use crate::config::ExclusionMatcher;
use crate::core::{to_snake_case, Result};
use crate::models::exception::{CapturedException, BASE_PROPERTY_NAMES};
use serde_json::{Map, Value};

/// Collect the exception's extra properties.
///
/// Names are converted to snake_case; base properties, excluded keys and
/// null values are dropped. Declaration order is kept.
pub fn extra_properties(
    exception: &CapturedException,
    exclusions: &ExclusionMatcher,
) -> Map<String, Value> {
    let mut properties = Map::new();

    for (name, value) in &exception.properties {
        if value.is_null() {
            continue;
        }

        let key = to_snake_case(name);
        if BASE_PROPERTY_NAMES.contains(&key.as_str()) || exclusions.is_excluded(&key) {
            continue;
        }

        properties.entry(key).or_insert_with(|| value.clone());
    }

    properties
}

/// Serialize the extra properties as JSON text.
///
/// Returns `None` when no property survives filtering.
pub fn extra_properties_json(
    exception: &CapturedException,
    exclusions: &ExclusionMatcher,
) -> Result<Option<String>> {
    let properties = extra_properties(exception, exclusions);
    if properties.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(&properties)?))
}
