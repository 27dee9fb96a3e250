// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod backend;
pub mod error;
pub mod generate;
pub mod generator;
pub mod json_schema;
pub mod schema;
pub mod writer;

pub use error::{Error, Result};
