//! INSERT statement rendering and statement output.

use crate::schema::Table;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;

/// How identity columns appear in a rendered statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// Leave identity columns out of the column list and the rows
    #[default]
    Omit,
    /// List every column and write `DEFAULT` in identity slots
    Default,
}

/// Render a table's generated rows as one multi-row INSERT, leaving out
/// identity columns.
///
/// Literals are written as generated; no further quoting is applied.
pub fn render_insert(table: &Table) -> String {
    render_insert_with(table, IdentityMode::Omit)
}

/// Render every column, using `DEFAULT` for identity columns
pub fn render_insert_with_defaults(table: &Table) -> String {
    render_insert_with(table, IdentityMode::Default)
}

pub fn render_insert_with(table: &Table, mode: IdentityMode) -> String {
    let mut output = String::new();

    output.push_str("INSERT INTO ");
    output.push_str(&table.name);
    output.push_str(" (");

    let mut written = 0;
    for col in &table.columns {
        if col.is_identity && mode == IdentityMode::Omit {
            continue;
        }
        if written > 0 {
            output.push(',');
        }
        output.push_str(&col.name);
        written += 1;
    }

    output.push_str(") VALUES ");

    for (i, row) in table.rows().iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push('(');
        match mode {
            IdentityMode::Omit => push_joined(&mut output, row.iter().map(String::as_str)),
            IdentityMode::Default => {
                let expanded = table.row_with_defaults(i).unwrap_or_default();
                push_joined(&mut output, expanded.into_iter());
            }
        }
        output.push(')');
    }

    output.push(';');
    output
}

fn push_joined<'a>(output: &mut String, values: impl Iterator<Item = &'a str>) {
    for (i, value) in values.enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(value);
    }
}

/// Buffered sink for rendered statements, one per line
pub struct StatementWriter {
    writer: BufWriter<Box<dyn Write>>,
    statements: usize,
}

impl StatementWriter {
    pub fn new(inner: Box<dyn Write>) -> Self {
        Self {
            writer: BufWriter::with_capacity(WRITER_BUFFER_SIZE, inner),
            statements: 0,
        }
    }

    /// Write to a file, truncating it
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(Box::new(File::create(path)?)))
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn write_statement(&mut self, stmt: &str) -> io::Result<()> {
        self.writer.write_all(stmt.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.statements += 1;
        Ok(())
    }

    /// Number of statements written so far
    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
