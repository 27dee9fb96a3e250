//! Table validation against caller overrides and foreign key constraints.

use super::{ForeignKeyRelation, GeneratorHint, Table};
use crate::error::{Error, Result};
use ahash::AHashMap;
use tracing::debug;

impl Table {
    /// Check that this table can be generated and record declared generators.
    ///
    /// `overrides` maps column names to the generator the caller asked for.
    /// On error the table is left untouched.
    pub fn validate(
        &mut self,
        overrides: &AHashMap<String, String>,
        foreign_keys: &[ForeignKeyRelation],
    ) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::EmptySchema {
                table: self.name.clone(),
            });
        }

        let mut declared = Vec::new();

        for col in &self.columns {
            if let Some(requested) = overrides.get(&col.name) {
                if !requested.is_empty() {
                    if !col.is_free_text() {
                        return Err(Error::unsupported_hint(
                            &col.name,
                            requested,
                            "generators can only be declared for text columns",
                        ));
                    }
                    let hint = requested.parse::<GeneratorHint>().map_err(|_| {
                        Error::unsupported_hint(
                            &col.name,
                            requested,
                            "expected one of company, firstname, lastname, name, uuid",
                        )
                    })?;
                    declared.push((col.name.clone(), hint));
                }
            }

            if let Some(fk) = foreign_keys
                .iter()
                .find(|fk| fk.owned_by(&self.name, &col.name))
            {
                if !col.is_nullable {
                    return Err(Error::UnsatisfiableForeignKey {
                        column: col.name.clone(),
                        constraint: fk.constraint_name.clone(),
                    });
                }
            }
        }

        for (column, hint) in declared {
            debug!(table = %self.name, %column, %hint, "declared generator");
            self.hints.insert(column, hint);
        }

        Ok(())
    }
}
