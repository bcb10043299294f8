use std::path::Path;
use itertools::Itertools;
use tracing::instrument;
use crate::models::PostgresSchemaDump;
use crate::{Result, SubsetError};

mod column;
mod enumeration;
mod foreign_key;
mod scanner;
mod table;

pub use scanner::{scan_statements, ScannedStatement, StatementKind, StatementScanner};

/// Reads tables, enums and foreign keys out of the text of a schema dump.
pub struct SqlReader<'a> {
    source: &'a str,
}

impl SqlReader<'_> {
    pub fn new(source: &str) -> SqlReader {
        SqlReader { source }
    }

    /// Scans the source once and runs every extractor over the captured statements.
    ///
    /// Statements that can't be understood are skipped, this never fails.
    #[instrument(skip_all)]
    pub fn read_schema(&self) -> PostgresSchemaDump {
        let statements = scan_statements(self.source);

        let tables = statements.iter()
            .filter(|s| s.kind == StatementKind::CreateTable)
            .filter_map(table::read_table)
            .collect_vec();

        let enums = statements.iter()
            .filter(|s| s.kind == StatementKind::CreateEnum)
            .filter_map(enumeration::read_enum)
            .collect_vec();

        let alter_statements = statements.iter()
            .filter(|s| s.kind == StatementKind::AlterTable)
            .collect_vec();
        let foreign_keys = foreign_key::read_foreign_keys(&alter_statements);

        tracing::info!(
            statements = statements.len(),
            tables = tables.len(),
            enums = enums.len(),
            foreign_keys = foreign_keys.len(),
            "Read schema dump"
        );

        PostgresSchemaDump {
            tables,
            enums,
            foreign_keys,
        }
    }
}

/// Reads the whole file into memory and parses it.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_schema_from_file(path: impl AsRef<Path>) -> Result<PostgresSchemaDump> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| SubsetError::ReadInput {
        path: path.display().to_string(),
        source,
    })?;

    Ok(SqlReader::new(&source).read_schema())
}
