//! Datatype classification for value generation.

use crate::error::{Error, Result};

/// Declared column datatype, one variant per supported generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    /// One-element array of the column's element type
    Array,
    SmallInt,
    Integer,
    BigInt,
    SmallSerial,
    Serial,
    BigSerial,
    Boolean,
    /// `numeric` / `decimal`
    Numeric,
    /// Single precision float (`real`)
    Real,
    /// `double precision`
    Double,
    /// `json` / `jsonb`
    Json,
    Text,
    /// Timestamp families and `date`; rendered as a calendar date
    Timestamp,
    /// Fixed 8-bit string
    Bit,
    Uuid,
}

impl Datatype {
    /// Parse a datatype as reported by `information_schema.columns.data_type`
    /// (or its `udt_name` alias)
    pub fn from_sql_type(type_str: &str) -> Option<Self> {
        let lower = type_str.trim().to_lowercase();
        let dt = match lower.as_str() {
            "array" => Datatype::Array,
            "smallint" | "int2" => Datatype::SmallInt,
            "integer" | "int" | "int4" => Datatype::Integer,
            "bigint" | "int8" => Datatype::BigInt,
            "smallserial" | "serial2" => Datatype::SmallSerial,
            "serial" | "serial4" => Datatype::Serial,
            "bigserial" | "serial8" => Datatype::BigSerial,
            "boolean" | "bool" => Datatype::Boolean,
            "numeric" | "decimal" => Datatype::Numeric,
            "real" | "float4" => Datatype::Real,
            "double precision" | "float8" => Datatype::Double,
            "json" | "jsonb" => Datatype::Json,
            "text" => Datatype::Text,
            "timestamp"
            | "timestamp with time zone"
            | "timestamp without time zone"
            | "timestamptz"
            | "date" => Datatype::Timestamp,
            "bit" => Datatype::Bit,
            "uuid" => Datatype::Uuid,
            _ => return None,
        };
        Some(dt)
    }

    /// Resolve the generator for an array column's element type
    pub fn from_element_type(udt: &str) -> Result<Self> {
        match udt {
            "_text" | "text" => Ok(Datatype::Text),
            _ => Err(Error::UnknownElementType {
                element_type: udt.to_string(),
            }),
        }
    }
}
