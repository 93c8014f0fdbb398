//! SMAPI manifest dependency rewriting

use std::path::Path;

use serde_json::{Map, Value, json};

use crate::error::{Error, Result};

/// `UniqueID` of the legacy scaling framework
pub const PYTK_UNIQUE_ID: &str = "Platonymous.Toolkit";

/// `UniqueID` of the framework the patched mod depends on instead
pub const HD_PORTRAITS_UNIQUE_ID: &str = "tlitookilakin.HDPortraits";

/// Manifest field stamped with the generator signature
pub const GENERATED_BY_FIELD: &str = "GeneratedBy";

/// Signature written into every rewritten manifest
#[must_use]
pub fn generator_signature() -> String {
    format!("Generated by Portrait Patcher {}", crate::VERSION)
}

/// Swap the PyTK dependency for HD Portraits and stamp the generator field
///
/// HD Portraits is appended once if no dependency already names it; every
/// dependency on PyTK is removed. `UniqueID`s compare case-insensitively, as
/// SMAPI does. A missing `Dependencies` list is created.
///
/// # Errors
/// Returns an error if `Dependencies` exists but is not an array.
pub fn update_dependencies(mut manifest: Map<String, Value>, origin: &Path) -> Result<Map<String, Value>> {
    let dependencies = manifest
        .entry("Dependencies")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| Error::InvalidField {
            path: origin.to_path_buf(),
            field: "Dependencies".to_string(),
            expected: "an array",
        })?;

    if !dependencies.iter().any(|d| names_dependency(d, HD_PORTRAITS_UNIQUE_ID)) {
        dependencies.push(json!({ "UniqueID": HD_PORTRAITS_UNIQUE_ID }));
    }

    let before = dependencies.len();
    dependencies.retain(|d| !names_dependency(d, PYTK_UNIQUE_ID));
    if dependencies.len() != before {
        tracing::debug!("Removed {PYTK_UNIQUE_ID} dependency from {}", origin.display());
    }

    manifest.insert(GENERATED_BY_FIELD.to_string(), Value::String(generator_signature()));
    Ok(manifest)
}

fn names_dependency(dependency: &Value, unique_id: &str) -> bool {
    dependency
        .get("UniqueID")
        .and_then(Value::as_str)
        .is_some_and(|id| id.trim().eq_ignore_ascii_case(unique_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manifest(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_swaps_pytk_for_hd_portraits() {
        let input = manifest(json!({
            "Name": "Abigail HD",
            "Dependencies": [{ "UniqueID": "Platonymous.Toolkit" }]
        }));

        let output = update_dependencies(input, Path::new("manifest.json")).unwrap();

        assert_eq!(
            output["Dependencies"],
            json!([{ "UniqueID": "tlitookilakin.HDPortraits" }])
        );
        assert_eq!(output[GENERATED_BY_FIELD], generator_signature());
    }

    #[test]
    fn test_idempotent_when_applied_twice() {
        let input = manifest(json!({ "Dependencies": [{ "UniqueID": "Platonymous.Toolkit" }] }));
        let once = update_dependencies(input, Path::new("manifest.json")).unwrap();
        let twice = update_dependencies(once.clone(), Path::new("manifest.json")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_keeps_other_dependencies_and_existing_hd_portraits() {
        let input = manifest(json!({
            "Dependencies": [
                { "UniqueID": "Pathoschild.ContentPatcher" },
                { "UniqueID": "TLITOOKILAKIN.HDPORTRAITS", "IsRequired": true }
            ]
        }));

        let output = update_dependencies(input, Path::new("manifest.json")).unwrap();

        assert_eq!(
            output["Dependencies"],
            json!([
                { "UniqueID": "Pathoschild.ContentPatcher" },
                { "UniqueID": "TLITOOKILAKIN.HDPORTRAITS", "IsRequired": true }
            ])
        );
    }

    #[test]
    fn test_missing_dependencies_list_is_created() {
        let output = update_dependencies(manifest(json!({ "Name": "x" })), Path::new("m")).unwrap();
        assert_eq!(output["Dependencies"], json!([{ "UniqueID": HD_PORTRAITS_UNIQUE_ID }]));
    }

    #[test]
    fn test_non_array_dependencies_is_an_error() {
        let result = update_dependencies(manifest(json!({ "Dependencies": "PyTK" })), Path::new("m"));
        assert!(matches!(result, Err(Error::InvalidField { .. })));
    }
}
