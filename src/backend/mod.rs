//! Storage backends that describe tables and render statements for them.
//!
//! A backend answers three questions: which columns a table has, which
//! foreign keys exist, and how an INSERT for generated rows is spelled.
//! Everything in between (validation, hint inference, value generation) is
//! backend independent.

mod snapshot;

pub use snapshot::{CatalogColumn, CatalogSnapshot, SnapshotBackend};

use crate::schema::{Column, ForeignKeyRelation, Table};
use crate::writer::{render_insert_with, IdentityMode};
use ahash::AHashMap;

/// Capabilities a storage backend provides to the generator
pub trait Backend {
    /// Short backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Columns of a table in ordinal order. Unknown tables yield no columns.
    fn table_columns(&self, table: &str) -> anyhow::Result<Vec<Column>>;

    /// Foreign key relations, grouped by owning table name
    fn foreign_keys(&self) -> anyhow::Result<AHashMap<String, Vec<ForeignKeyRelation>>>;

    /// Render the generated rows of a table as one INSERT statement
    fn insert_statement(&self, table: &Table, mode: IdentityMode) -> String {
        render_insert_with(table, mode)
    }
}

/// Group relations by the table that owns them, keeping their order
pub fn group_by_table(
    relations: impl IntoIterator<Item = ForeignKeyRelation>,
) -> AHashMap<String, Vec<ForeignKeyRelation>> {
    let mut grouped: AHashMap<String, Vec<ForeignKeyRelation>> = AHashMap::new();
    for fk in relations {
        grouped.entry(fk.table_name.clone()).or_default().push(fk);
    }
    grouped
}
