//! Configuration for the generate command.
//!
//! Settings come from an optional YAML file and from CLI flags; CLI values
//! take precedence.

use crate::writer::IdentityMode;
use ahash::AHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Rows per table when neither the CLI nor the config file says otherwise
pub const DEFAULT_ROW_COUNT: usize = 10;

/// Per-table settings in the YAML config
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfig {
    /// Table name as it appears in the catalog
    pub name: String,
    /// Rows to generate (overrides the default count, must be > 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Generator per text column: company, firstname, lastname, name or uuid
    // std map here since schemars has no AHashMap impl
    pub columns: HashMap<String, String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DummyYamlConfig {
    /// Random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Rows per table when a table sets no count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_count: Option<usize>,
    /// Tables to generate, in order
    pub tables: Vec<TableConfig>,
}

impl DummyYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DummyYamlConfig = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Get configuration for a specific table
    pub fn get_table_config(&self, table_name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == table_name)
    }
}

/// One table to generate, with everything resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    pub name: String,
    pub count: usize,
    /// Declared generator per column, validated against the schema later
    pub overrides: AHashMap<String, String>,
}

/// Runtime configuration for generation
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Catalog snapshot to read table definitions from
    pub catalog: PathBuf,
    /// Output SQL file (None for stdout)
    pub output: Option<PathBuf>,
    /// Tables to generate, in order
    pub tables: Vec<TablePlan>,
    /// Seed for the value generator
    pub seed: u64,
    /// How identity columns are rendered
    pub identity_mode: IdentityMode,
    /// Warn and skip tables that fail instead of aborting
    pub skip_invalid: bool,
    /// Validate and infer generators without generating rows
    pub dry_run: bool,
    /// Show progress
    pub progress: bool,
}

impl GenerateConfig {
    pub fn builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::default()
    }
}

/// Builder for GenerateConfig
#[derive(Default)]
pub struct GenerateConfigBuilder {
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    config_file: Option<PathBuf>,
    tables: Vec<String>,
    count: Option<usize>,
    columns: Vec<String>,
    seed: Option<u64>,
    identity_mode: IdentityMode,
    skip_invalid: bool,
    dry_run: bool,
    progress: bool,
}

impl GenerateConfigBuilder {
    pub fn catalog(mut self, path: PathBuf) -> Self {
        self.catalog = Some(path);
        self
    }

    pub fn output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    pub fn count(mut self, count: Option<usize>) -> Self {
        self.count = count;
        self
    }

    /// Column overrides in `column=generator` form
    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn identity_mode(mut self, mode: IdentityMode) -> Self {
        self.identity_mode = mode;
        self
    }

    pub fn skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Build the GenerateConfig
    pub fn build(self) -> anyhow::Result<GenerateConfig> {
        let catalog = self
            .catalog
            .ok_or_else(|| anyhow::anyhow!("Catalog file is required"))?;

        let yaml = match self.config_file {
            Some(ref path) => DummyYamlConfig::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
            None => DummyYamlConfig::default(),
        };

        // CLI count beats the config default
        let default_count = self
            .count
            .or(yaml.default_count)
            .unwrap_or(DEFAULT_ROW_COUNT);
        if default_count == 0 {
            anyhow::bail!("--count must be greater than 0");
        }

        let mut cli_overrides: AHashMap<String, String> = AHashMap::new();
        for entry in &self.columns {
            let (column, generator) = entry
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid --column '{}': expected column=generator", entry))?;
            cli_overrides.insert(column.trim().to_string(), generator.trim().to_string());
        }

        let names: Vec<String> = if self.tables.is_empty() {
            yaml.tables.iter().map(|t| t.name.clone()).collect()
        } else {
            self.tables
        };
        if names.is_empty() {
            anyhow::bail!("No tables selected. Use --table or list tables in --config");
        }

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let table_config = yaml.get_table_config(&name);

            let count = match table_config.and_then(|t| t.count) {
                Some(0) => anyhow::bail!("count for table '{}' must be greater than 0", name),
                Some(n) => n,
                None => default_count,
            };

            let mut overrides: AHashMap<String, String> = table_config
                .map(|t| t.columns.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default();
            overrides.extend(cli_overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

            tables.push(TablePlan {
                name,
                count,
                overrides,
            });
        }

        let seed = self.seed.or(yaml.seed).unwrap_or_else(rand::random);

        Ok(GenerateConfig {
            catalog,
            output: self.output,
            tables,
            seed,
            identity_mode: self.identity_mode,
            skip_invalid: self.skip_invalid,
            dry_run: self.dry_run,
            progress: self.progress,
        })
    }
}
