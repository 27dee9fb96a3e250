// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod backend;
mod cmd;
mod error;
mod generate;
mod generator;
mod json_schema;
mod schema;
mod writer;

use clap::Parser;
use cmd::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
