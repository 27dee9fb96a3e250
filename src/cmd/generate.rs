//! Generate command CLI handler.

use crate::generate::{self, GenerateConfig, GenerateSummary, HintSource};
use crate::writer::IdentityMode;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    catalog: PathBuf,
    tables: Vec<String>,
    count: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    columns: Vec<String>,
    output: Option<PathBuf>,
    progress: bool,
    json: bool,
    skip_invalid: bool,
    with_defaults: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let tables: Vec<String> = tables
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let identity_mode = if with_defaults {
        IdentityMode::Default
    } else {
        IdentityMode::Omit
    };

    let config = GenerateConfig::builder()
        .catalog(catalog)
        .output(output)
        .config_file(config)
        .tables(tables)
        .count(count)
        .columns(columns)
        .seed(seed)
        .identity_mode(identity_mode)
        .skip_invalid(skip_invalid)
        .dry_run(dry_run)
        .progress(progress)
        .build()?;

    let summary = generate::run(&config)?;

    if json {
        // stdout carries the SQL unless it goes to a file
        let rendered = serde_json::to_string_pretty(&summary)?;
        if config.output.is_some() || config.dry_run {
            println!("{}", rendered);
        } else {
            eprintln!("{}", rendered);
        }
    } else if progress || dry_run || !summary.skipped.is_empty() {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &GenerateSummary) {
    eprintln!();
    eprintln!("Generate Statistics:");
    eprintln!("  Seed: {}", summary.seed);
    eprintln!("  Tables generated: {}", summary.tables_generated);
    eprintln!("  Rows generated: {}", summary.rows_generated);

    if summary.dry_run {
        eprintln!();
        eprintln!("Per-table generators:");
        for table in &summary.tables {
            eprintln!(
                "  {}: {} columns ({} identity)",
                table.name, table.columns, table.identity_columns
            );
            for hint in &table.hints {
                let source = match hint.source {
                    HintSource::Declared => "",
                    HintSource::Inferred => " [inferred]",
                };
                eprintln!("    {} -> {}{}", hint.column, hint.generator, source);
            }
        }
    }

    if !summary.skipped.is_empty() {
        eprintln!();
        for skipped in &summary.skipped {
            eprintln!("  Warning: skipped {}: {}", skipped.name, skipped.reason);
        }
    }
}
