//! Tests for the generate pipeline over the shop catalog fixture.

use ahash::AHashMap;
use regex::Regex;
use sql_dummy::backend::{Backend, SnapshotBackend};
use sql_dummy::generate::{run_with_backend, GenerateConfig, HintSource};
use sql_dummy::generator::ValueGenerator;
use sql_dummy::schema::{Column, ForeignKeyRelation, GeneratorHint, Table};
use sql_dummy::writer::{render_insert, render_insert_with_defaults, IdentityMode};
use sql_dummy::Error;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/shop_catalog.yaml")
}

fn backend() -> SnapshotBackend {
    SnapshotBackend::load(&catalog_path()).unwrap()
}

fn load_table(backend: &SnapshotBackend, name: &str) -> Table {
    Table::with_columns(name, backend.table_columns(name).unwrap())
}

fn config(tables: &[&str], output: Option<PathBuf>) -> GenerateConfig {
    GenerateConfig::builder()
        .catalog(catalog_path())
        .tables(tables.iter().map(|t| t.to_string()).collect())
        .count(Some(4))
        .seed(Some(42))
        .output(output)
        .build()
        .unwrap()
}

mod table_tests {
    use super::*;

    #[test]
    fn test_fake_table_insert_shape() {
        let backend = backend();
        let mut table = load_table(&backend, "fake_table");
        table.validate(&AHashMap::new(), &[]).unwrap();
        table.infer_hints();

        let mut gen = ValueGenerator::seeded(7);
        table.create_data(3, &mut gen).unwrap();

        let sql = render_insert(&table);
        let re = Regex::new(
            r"^INSERT INTO fake_table \(name,created_at\) VALUES \('[^']*(?:''[^']*)*','\d{4}-\d{2}-\d{2}'\)(?:,\('[^']*(?:''[^']*)*','\d{4}-\d{2}-\d{2}'\)){2};$",
        )
        .unwrap();
        assert!(re.is_match(&sql), "unexpected statement: {}", sql);
    }

    #[test]
    fn test_with_defaults_lists_identity() {
        let backend = backend();
        let mut table = load_table(&backend, "fake_table");
        table.validate(&AHashMap::new(), &[]).unwrap();
        let mut gen = ValueGenerator::seeded(7);
        table.create_data(2, &mut gen).unwrap();

        let sql = render_insert_with_defaults(&table);
        assert!(sql.starts_with("INSERT INTO fake_table (id,name,created_at) VALUES (DEFAULT,'"));
        assert_eq!(sql.matches("(DEFAULT,").count(), 2);
    }

    #[test]
    fn test_same_seed_same_rows() {
        let backend = backend();
        let render = |seed| {
            let mut table = load_table(&backend, "users");
            table.validate(&AHashMap::new(), &[]).unwrap();
            table.infer_hints();
            let mut gen = ValueGenerator::seeded(seed);
            table.create_data(5, &mut gen).unwrap();
            render_insert(&table)
        };
        assert_eq!(render(99), render(99));
        assert_ne!(render(99), render(100));
    }

    #[test]
    fn test_users_columns_are_inferred() {
        let backend = backend();
        let mut table = load_table(&backend, "users");
        table.validate(&AHashMap::new(), &[]).unwrap();
        assert_eq!(table.infer_hints(), 3);
        assert_eq!(table.hint("id"), Some(GeneratorHint::Uuid));
        assert_eq!(table.hint("name"), Some(GeneratorHint::Name));
        assert_eq!(table.hint("first_name"), Some(GeneratorHint::FirstName));

        let mut gen = ValueGenerator::seeded(3);
        table.create_data(1, &mut gen).unwrap();
        let uuid = Regex::new(r"^'[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}'$").unwrap();
        assert!(uuid.is_match(&table.rows()[0][0]));
        assert!(table.rows()[0][4].starts_with("ARRAY['"));
    }

    #[test]
    fn test_declared_hint_wins_over_inference() {
        let backend = backend();
        let mut table = load_table(&backend, "users");
        let overrides = AHashMap::from([("name".to_string(), "Company".to_string())]);
        table.validate(&overrides, &[]).unwrap();
        table.infer_hints();
        assert_eq!(table.hint("name"), Some(GeneratorHint::Company));
    }

    #[test]
    fn test_required_fk_rejects_table_without_rows() {
        let backend = backend();
        let fks = backend.foreign_keys().unwrap();
        let mut table = load_table(&backend, "orders");

        let err = table.validate(&AHashMap::new(), &fks["orders"]).unwrap_err();
        assert!(matches!(err, Error::UnsatisfiableForeignKey { .. }));
        assert!(err.to_string().contains("user_id"));
        assert!(err.to_string().contains("orders_user_id_fkey"));
        assert!(table.rows().is_empty());
        assert!(table.hints().is_empty());
    }

    #[test]
    fn test_nullable_fk_is_accepted() {
        let mut table = Table::with_columns(
            "orders",
            vec![Column::new("user_id", "text").ordinal(1)],
        );
        let fk = ForeignKeyRelation {
            constraint_name: "orders_user_id_fkey".to_string(),
            table_name: "orders".to_string(),
            column_name: "user_id".to_string(),
            ..Default::default()
        };
        assert!(table.validate(&AHashMap::new(), &[fk]).is_ok());
    }

    #[test]
    fn test_unsupported_type_discards_rows() {
        let backend = backend();
        let mut table = load_table(&backend, "legacy");
        table.validate(&AHashMap::new(), &[]).unwrap();
        let mut gen = ValueGenerator::seeded(1);
        let err = table.create_data(3, &mut gen).unwrap_err();
        assert_eq!(err.to_string(), "Datatype currently unsupported: point(point)");
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_unknown_table_is_empty_schema() {
        let backend = backend();
        let mut table = load_table(&backend, "missing");
        let err = table.validate(&AHashMap::new(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Columns on table missing is empty");
    }

    #[test]
    fn test_event_literals() {
        let backend = backend();
        let mut table = load_table(&backend, "events");
        table.validate(&AHashMap::new(), &[]).unwrap();
        let mut gen = ValueGenerator::seeded(11);
        table.create_data(20, &mut gen).unwrap();

        for row in table.rows() {
            let payload = row[0].trim_matches('\'').replace("''", "'");
            let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
            assert!(json.is_object());
            assert!(row[2].starts_with("B'") && row[2].len() == 11);
            assert!(row[3].parse::<f64>().is_ok());
        }
    }

    #[test]
    fn test_generate_value_without_table() {
        let mut gen = ValueGenerator::seeded(5);
        let hints = AHashMap::from([("who".to_string(), GeneratorHint::LastName)]);
        let value = gen.generate_value("text", "text", "who", &hints).unwrap();
        assert!(value.starts_with('\'') && value.ends_with('\''));
        assert!(value.len() > 2);
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_run_writes_one_statement_per_table() {
        let output = NamedTempFile::new().unwrap();
        let config = config(&["users", "fake_table"], Some(output.path().to_path_buf()));

        let summary = run_with_backend(&config, &backend()).unwrap();
        assert_eq!(summary.tables_generated, 2);
        assert_eq!(summary.rows_generated, 8);
        assert_eq!(summary.statements_written, 2);

        let sql = std::fs::read_to_string(output.path()).unwrap();
        let lines: Vec<&str> = sql.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("INSERT INTO users (id,name,first_name,active,tags) VALUES "));
        assert!(lines[1].starts_with("INSERT INTO fake_table (name,created_at) VALUES "));
    }

    #[test]
    fn test_run_is_reproducible() {
        let first = NamedTempFile::new().unwrap();
        let second = NamedTempFile::new().unwrap();
        run_with_backend(&config(&["users", "events"], Some(first.path().to_path_buf())), &backend()).unwrap();
        run_with_backend(&config(&["users", "events"], Some(second.path().to_path_buf())), &backend()).unwrap();
        assert_eq!(
            std::fs::read_to_string(first.path()).unwrap(),
            std::fs::read_to_string(second.path()).unwrap()
        );
    }

    #[test]
    fn test_invalid_table_aborts_run() {
        let output = NamedTempFile::new().unwrap();
        let config = config(&["users", "orders"], Some(output.path().to_path_buf()));
        let err = run_with_backend(&config, &backend()).unwrap_err();
        assert!(format!("{:#}", err).contains("FK constraint named 'orders_user_id_fkey'"));
    }

    #[test]
    fn test_skip_invalid_keeps_going() {
        let output = NamedTempFile::new().unwrap();
        let mut config = config(&["orders", "legacy", "fake_table"], Some(output.path().to_path_buf()));
        config.skip_invalid = true;

        let summary = run_with_backend(&config, &backend()).unwrap();
        assert_eq!(summary.tables_generated, 1);
        let skipped: Vec<_> = summary.skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skipped, vec!["orders", "legacy"]);

        let sql = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(sql.lines().count(), 1);
    }

    #[test]
    fn test_dry_run_reports_hint_sources() {
        let mut config = config(&["users"], None);
        config.dry_run = true;
        config.tables[0]
            .overrides
            .insert("name".to_string(), "lastname".to_string());

        let summary = run_with_backend(&config, &backend()).unwrap();
        assert_eq!(summary.rows_generated, 0);
        assert_eq!(summary.statements_written, 0);

        let hints = &summary.tables[0].hints;
        assert_eq!(hints.len(), 3);
        assert_eq!(hints[1].column, "name");
        assert_eq!(hints[1].generator, "lastname");
        assert_eq!(hints[1].source, HintSource::Declared);
        assert_eq!(hints[0].source, HintSource::Inferred);
    }

    #[test]
    fn test_identity_mode_default() {
        let output = NamedTempFile::new().unwrap();
        let mut config = config(&["fake_table"], Some(output.path().to_path_buf()));
        config.identity_mode = IdentityMode::Default;

        run_with_backend(&config, &backend()).unwrap();
        let sql = std::fs::read_to_string(output.path()).unwrap();
        assert!(sql.starts_with("INSERT INTO fake_table (id,name,created_at) VALUES (DEFAULT,"));
    }
}
