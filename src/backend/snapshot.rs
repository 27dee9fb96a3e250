//! Backend over a catalog snapshot file.
//!
//! The snapshot holds the rows a PostgreSQL catalog query would return:
//! `information_schema.columns` entries and the FK constraint join over
//! `table_constraints`, `key_column_usage` and `constraint_column_usage`.
//! YAML and JSON are accepted.

use super::{group_by_table, Backend};
use crate::schema::{Column, ForeignKeyRelation};
use ahash::AHashMap;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One `information_schema.columns` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogColumn {
    pub table_name: String,
    #[serde(flatten)]
    pub column: Column,
}

/// Materialized catalog rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub columns: Vec<CatalogColumn>,
    pub foreign_keys: Vec<ForeignKeyRelation>,
}

impl CatalogSnapshot {
    /// Load a snapshot; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let snapshot = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid catalog JSON in {}", path.display()))?
        } else {
            serde_yaml_ng::from_str(&content)
                .with_context(|| format!("Invalid catalog YAML in {}", path.display()))?
        };
        Ok(snapshot)
    }
}

/// PostgreSQL-flavoured backend reading a catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotBackend {
    snapshot: CatalogSnapshot,
}

impl SnapshotBackend {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(CatalogSnapshot::load(path)?))
    }
}

impl Backend for SnapshotBackend {
    fn name(&self) -> &'static str {
        "postgres-snapshot"
    }

    fn table_columns(&self, table: &str) -> anyhow::Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .snapshot
            .columns
            .iter()
            .filter(|c| c.table_name == table)
            .map(|c| c.column.clone())
            .collect();
        columns.sort_by_key(|c| c.ordinal_position);
        Ok(columns)
    }

    fn foreign_keys(&self) -> anyhow::Result<AHashMap<String, Vec<ForeignKeyRelation>>> {
        Ok(group_by_table(self.snapshot.foreign_keys.iter().cloned()))
    }
}
