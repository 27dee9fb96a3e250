//! Generate command: fill catalog tables with fake rows and emit INSERTs.
//!
//! For each selected table the pipeline is:
//! 1. Read columns and FK relations from the backend
//! 2. Validate declared generators and FK constraints
//! 3. Infer generators for the remaining text columns
//! 4. Generate rows with a single seeded generator shared by all tables
//! 5. Render one multi-row INSERT per table

mod config;

pub use config::{
    DummyYamlConfig, GenerateConfig, GenerateConfigBuilder, TableConfig, TablePlan,
    DEFAULT_ROW_COUNT,
};

use crate::backend::{Backend, SnapshotBackend};
use crate::generator::ValueGenerator;
use crate::schema::{ForeignKeyRelation, Table};
use crate::writer::StatementWriter;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Where a column's generator came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HintSource {
    Declared,
    Inferred,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct HintSummary {
    pub column: String,
    pub generator: String,
    pub source: HintSource,
}

/// Statistics for a generated table
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TableSummary {
    pub name: String,
    /// Rows generated (0 for a dry run)
    pub rows: usize,
    /// Columns that received generated values
    pub columns: usize,
    /// Identity columns left to the database
    pub identity_columns: usize,
    pub hints: Vec<HintSummary>,
}

/// A table left out because it failed validation or generation
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SkippedTable {
    pub name: String,
    pub reason: String,
}

/// Statistics from a generate run
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct GenerateSummary {
    /// Seed the run used; pass it back with --seed to reproduce the output
    pub seed: u64,
    pub dry_run: bool,
    pub tables_generated: usize,
    pub rows_generated: usize,
    pub statements_written: usize,
    pub tables: Vec<TableSummary>,
    pub skipped: Vec<SkippedTable>,
}

/// Run the generate command against the configured catalog snapshot
pub fn run(config: &GenerateConfig) -> anyhow::Result<GenerateSummary> {
    let backend = SnapshotBackend::load(&config.catalog)?;
    run_with_backend(config, &backend)
}

/// Run the generate command against any backend
pub fn run_with_backend(
    config: &GenerateConfig,
    backend: &dyn Backend,
) -> anyhow::Result<GenerateSummary> {
    info!(
        backend = backend.name(),
        tables = config.tables.len(),
        seed = config.seed,
        "starting generation"
    );

    let foreign_keys = backend.foreign_keys()?;

    let mut writer = if config.dry_run {
        None
    } else {
        Some(match &config.output {
            Some(path) => StatementWriter::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
            None => StatementWriter::stdout(),
        })
    };

    let mut generator = ValueGenerator::seeded(config.seed);
    let mut summary = GenerateSummary {
        seed: config.seed,
        dry_run: config.dry_run,
        ..Default::default()
    };

    for plan in &config.tables {
        let columns = backend.table_columns(&plan.name)?;
        let mut table = Table::with_columns(plan.name.clone(), columns);
        let table_fks: &[ForeignKeyRelation] = foreign_keys
            .get(&plan.name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if let Err(e) = table.validate(&plan.overrides, table_fks) {
            if config.skip_invalid {
                warn!(table = %plan.name, "skipping table: {}", e);
                summary.skipped.push(SkippedTable {
                    name: plan.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
            return Err(e).with_context(|| format!("Table {} failed validation", plan.name));
        }

        let declared: HashSet<String> = table.hints().keys().cloned().collect();
        let inferred = table.infer_hints();
        debug!(table = %plan.name, declared = declared.len(), inferred, "resolved generators");

        if !config.dry_run {
            let pb = progress_bar(config.progress, plan.count as u64, &plan.name);
            let result = table.create_data_with_progress(plan.count, &mut generator, |n| {
                if let Some(pb) = &pb {
                    pb.set_position(n);
                }
            });
            if let Some(pb) = &pb {
                pb.finish_and_clear();
            }

            if let Err(e) = result {
                if config.skip_invalid {
                    warn!(table = %plan.name, "skipping table: {}", e);
                    summary.skipped.push(SkippedTable {
                        name: plan.name.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
                return Err(e).with_context(|| format!("Failed to generate rows for {}", plan.name));
            }

            if let Some(w) = writer.as_mut() {
                let stmt = backend.insert_statement(&table, config.identity_mode);
                w.write_statement(&stmt)?;
            }
        }

        let rows = table.rows().len();
        info!(table = %plan.name, rows, "generated table");

        summary.tables_generated += 1;
        summary.rows_generated += rows;
        summary.tables.push(TableSummary {
            name: plan.name.clone(),
            rows,
            columns: table.insert_columns().count(),
            identity_columns: table.identity_count(),
            hints: table
                .hints_in_column_order()
                .into_iter()
                .map(|(column, hint)| HintSummary {
                    source: if declared.contains(column) {
                        HintSource::Declared
                    } else {
                        HintSource::Inferred
                    },
                    column: column.to_string(),
                    generator: hint.to_string(),
                })
                .collect(),
        });
    }

    if let Some(mut w) = writer {
        w.flush()?;
        summary.statements_written = w.statements();
    }

    Ok(summary)
}

fn progress_bar(enabled: bool, len: u64, table: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} rows")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message(table.to_string());
    Some(pb)
}
