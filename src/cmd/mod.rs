mod generate;
mod schema;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "sql-dummy")]
#[command(version)]
#[command(about = "Fill database tables with realistic fake rows", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate fake rows for catalog tables and print INSERT statements
    Generate {
        /// Catalog snapshot (YAML, or JSON with a .json extension)
        #[arg(long)]
        catalog: PathBuf,

        /// Tables to generate (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',')]
        table: Vec<String>,

        /// Rows per table
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// YAML config file for per-table counts and generators
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Generator for a text column: column=company|firstname|lastname|name|uuid
        #[arg(long = "column", value_name = "COLUMN=GENERATOR")]
        columns: Vec<String>,

        /// Output SQL file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Print a JSON summary (stdout with --output or --dry-run, else stderr)
        #[arg(long)]
        json: bool,

        /// Warn and skip tables that cannot be generated instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// List identity columns and write DEFAULT for them
        #[arg(long)]
        with_defaults: bool,

        /// Validate and resolve generators without generating rows
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the JSON schema of the config file or the --json summary
    Schema {
        /// Schema to print: config or generate (lists names if omitted)
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            catalog,
            table,
            count,
            seed,
            config,
            columns,
            output,
            progress,
            json,
            skip_invalid,
            with_defaults,
            dry_run,
        } => generate::run(
            catalog,
            table,
            count,
            seed,
            config,
            columns,
            output,
            progress,
            json,
            skip_invalid,
            with_defaults,
            dry_run,
        ),
        Commands::Schema { name } => schema::run(name),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "sql-dummy", &mut io::stdout());
            Ok(())
        }
    }
}
