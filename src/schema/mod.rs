//! Schema model for catalog-driven row generation.
//!
//! This module provides:
//! - Data models for tables, columns and foreign key relations as read from
//!   the catalog (`information_schema`)
//! - The generator hint vocabulary used to steer free-text generation
//! - Validation of a table against caller overrides and FK constraints
//! - Name-based inference of generator hints

mod hints;
mod validate;

pub use hints::guess_hint;

use ahash::AHashMap;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Semantic generator for a free-text column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorHint {
    /// A person's given name
    FirstName,
    /// A person's family name
    LastName,
    /// A person's full name
    Name,
    /// A company name
    Company,
    /// A random v4 UUID
    Uuid,
}

impl GeneratorHint {
    /// All hints, in the order they are listed in error messages
    pub const ALL: [GeneratorHint; 5] = [
        GeneratorHint::Company,
        GeneratorHint::FirstName,
        GeneratorHint::LastName,
        GeneratorHint::Name,
        GeneratorHint::Uuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorHint::FirstName => "firstname",
            GeneratorHint::LastName => "lastname",
            GeneratorHint::Name => "name",
            GeneratorHint::Company => "company",
            GeneratorHint::Uuid => "uuid",
        }
    }
}

impl std::str::FromStr for GeneratorHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "firstname" => Ok(GeneratorHint::FirstName),
            "lastname" => Ok(GeneratorHint::LastName),
            "name" => Ok(GeneratorHint::Name),
            "company" => Ok(GeneratorHint::Company),
            "uuid" => Ok(GeneratorHint::Uuid),
            _ => Err(format!(
                "Unknown generator: {}. Valid options: {}",
                s,
                GeneratorHint::ALL.map(|h| h.as_str()).join(", ")
            )),
        }
    }
}

impl fmt::Display for GeneratorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column definition as read from `information_schema.columns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    #[serde(alias = "column_name")]
    pub name: String,
    /// 1-based position in the table (may have gaps after dropped columns)
    #[serde(default)]
    pub ordinal_position: i32,
    /// Whether this column allows NULL values
    #[serde(default = "default_nullable", deserialize_with = "yes_no")]
    pub is_nullable: bool,
    /// Declared SQL datatype (`integer`, `ARRAY`, `json`, ...)
    pub data_type: String,
    /// Underlying type name; the element type for arrays (`_text`)
    #[serde(default)]
    pub udt_name: String,
    /// Whether the database assigns this column's value
    #[serde(default, deserialize_with = "yes_no")]
    pub is_identity: bool,
}

fn default_nullable() -> bool {
    true
}

/// Accept catalog-style `YES`/`NO` strings as well as plain booleans
fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_uppercase().as_str() {
            "YES" | "Y" | "TRUE" | "T" => Ok(true),
            "NO" | "N" | "FALSE" | "F" | "" => Ok(false),
            other => Err(de::Error::custom(format!("expected YES or NO, got {}", other))),
        },
    }
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            ordinal_position: 0,
            is_nullable: true,
            udt_name: data_type.clone(),
            data_type,
            is_identity: false,
        }
    }

    pub fn ordinal(mut self, position: i32) -> Self {
        self.ordinal_position = position;
        self
    }

    pub fn udt(mut self, udt_name: impl Into<String>) -> Self {
        self.udt_name = udt_name.into();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    /// Whether this column holds free text (and so accepts a generator hint)
    pub fn is_free_text(&self) -> bool {
        self.data_type.eq_ignore_ascii_case("text") || self.udt_name.eq_ignore_ascii_case("text")
    }
}

/// Foreign key relation as returned by the FK constraint catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyRelation {
    pub table_schema: String,
    pub constraint_name: String,
    pub table_name: String,
    pub column_name: String,
    pub foreign_table_schema: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
}

impl ForeignKeyRelation {
    /// Whether this relation is owned by the given column of the given table.
    ///
    /// Relations without an owning table name match on column name alone.
    pub fn owned_by(&self, table: &str, column: &str) -> bool {
        self.column_name == column && (self.table_name.is_empty() || self.table_name == table)
    }
}

/// A table being filled with fake rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Columns in ordinal order
    pub columns: Vec<Column>,
    /// Resolved generator per column name
    pub(crate) hints: AHashMap<String, GeneratorHint>,
    /// Generated literals, one inner Vec per row, identity columns excluded
    pub(crate) rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a table from catalog columns, ordering them by ordinal position
    pub fn with_columns(name: impl Into<String>, mut columns: Vec<Column>) -> Self {
        columns.sort_by_key(|c| c.ordinal_position);
        Self {
            name: name.into(),
            columns,
            ..Default::default()
        }
    }

    /// Columns that receive generated values, in column order
    pub fn insert_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_identity)
    }

    /// Number of columns the database fills in itself
    pub fn identity_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_identity).count()
    }

    /// Resolved generator hint for a column
    pub fn hint(&self, column: &str) -> Option<GeneratorHint> {
        self.hints.get(column).copied()
    }

    pub fn hints(&self) -> &AHashMap<String, GeneratorHint> {
        &self.hints
    }

    /// Hints sorted by column order, for display
    pub fn hints_in_column_order(&self) -> Vec<(&str, GeneratorHint)> {
        self.columns
            .iter()
            .filter_map(|c| self.hint(&c.name).map(|h| (c.name.as_str(), h)))
            .collect()
    }

    /// Rows generated so far
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// A generated row expanded to every column, with `DEFAULT` in identity slots
    pub fn row_with_defaults(&self, index: usize) -> Option<Vec<&str>> {
        let row = self.rows.get(index)?;
        let mut values = row.iter();
        let mut out = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            if col.is_identity {
                out.push("DEFAULT");
            } else {
                out.push(values.next()?.as_str());
            }
        }
        Some(out)
    }

    /// Append a pre-rendered row. The row must hold one literal per insert column.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.insert_columns().count());
        self.rows.push(row);
    }
}
