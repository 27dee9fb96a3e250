//! JSON Schema generation for the config file and the `--json` summary.
//!
//! Schemas are generated with schemars and printed by the `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all schemas by name.
/// Uses BTreeMap for deterministic ordering.
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // --config YAML file
    schemas.insert("config", schema_for!(crate::generate::DummyYamlConfig));

    // generate --json summary
    schemas.insert("generate", schema_for!(crate::generate::GenerateSummary));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["config", "generate"]);
    }

    #[test]
    fn test_generate_schema_lists_summary_fields() {
        let schema = serde_json::to_value(get_schema("generate").unwrap()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        for field in ["seed", "tables_generated", "rows_generated", "tables", "skipped"] {
            assert!(props.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn test_unknown_schema() {
        assert!(get_schema("split").is_none());
    }
}
