//! Name-based inference of generator hints for free-text columns.
//!
//! Column names are checked first; when they say nothing, the table name is
//! used as a clue for the generic `id`/`name` columns. First match wins.

use super::{GeneratorHint, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FIRST_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:first|given)[_-]*name$").unwrap());

static LAST_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:last|family)[_-]*name$").unwrap());

static COMPANY_COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(company|firm|business|corporation|establishment|organization|institution)[-_]*(name)?$",
    )
    .unwrap()
});

static USERS_TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)users").unwrap());

static COMPANY_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(company|firm|business|corporation|establishment|organization|institution)")
        .unwrap()
});

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^id$").unwrap());

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^name$").unwrap());

/// Guess a generator for a column from its own name and its table's name
pub fn guess_hint(table_name: &str, column_name: &str) -> Option<GeneratorHint> {
    if FIRST_NAME_RE.is_match(column_name) {
        return Some(GeneratorHint::FirstName);
    }
    if LAST_NAME_RE.is_match(column_name) {
        return Some(GeneratorHint::LastName);
    }
    if COMPANY_COLUMN_RE.is_match(column_name) {
        return Some(GeneratorHint::Company);
    }

    if USERS_TABLE_RE.is_match(table_name) {
        if ID_RE.is_match(column_name) {
            Some(GeneratorHint::Uuid)
        } else if NAME_RE.is_match(column_name) {
            Some(GeneratorHint::Name)
        } else {
            None
        }
    } else if COMPANY_TABLE_RE.is_match(table_name) {
        if ID_RE.is_match(column_name) {
            Some(GeneratorHint::Uuid)
        } else if NAME_RE.is_match(column_name) {
            Some(GeneratorHint::Company)
        } else {
            None
        }
    } else {
        None
    }
}

impl Table {
    /// Fill in hints for free-text columns that have none yet.
    ///
    /// Returns the number of hints added.
    pub fn infer_hints(&mut self) -> usize {
        let mut added = 0;
        for col in &self.columns {
            if !col.is_free_text() || self.hints.contains_key(&col.name) {
                continue;
            }
            if let Some(hint) = guess_hint(&self.name, &col.name) {
                debug!(table = %self.name, column = %col.name, %hint, "inferred generator");
                self.hints.insert(col.name.clone(), hint);
                added += 1;
            }
        }
        added
    }
}
