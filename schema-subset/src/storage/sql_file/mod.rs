use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::instrument;
use crate::models::{PostgresEnum, PostgresForeignKey, PostgresTable};
use crate::subset::{RelatedTable, SchemaSubset};
use crate::{Result, SubsetError};


/// Where the subset is written when nothing else is asked for.
pub const DEFAULT_OUTPUT_PATH: &str = "filtered_tables.sql";

/// A file to output the subset to.
///
/// Sections are written in a fixed order, so every statement only refers to types
/// and tables that were created before it:
/// enums, tables with the prefix, related tables and finally foreign keys.
pub struct SqlFile<F: Write> {
    /// The underlying file, though it can be anything that implements `Write`
    file: F,
    /// Related tables that were skipped because they don't have an `id` column.
    omitted_stubs: usize,
}

impl SqlFile<BufWriter<File>> {
    /// Create a new `SqlFile` from a file path.
    /// This creates the file, or truncates it if it already exists.
    #[instrument(skip_all)]
    pub fn new_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;

        Ok(SqlFile::new(BufWriter::new(file)))
    }
}

impl<F: Write> SqlFile<F> {
    /// Create a new `SqlFile` from a file-like object. This does not do any additional buffering
    /// so it's recommended to use a `BufWriter` or similar.
    pub fn new(file: F) -> Self {
        SqlFile {
            file,
            omitted_stubs: 0,
        }
    }

    /// How many related tables were left out so far because no stub could be made for them.
    pub fn omitted_stubs(&self) -> usize {
        self.omitted_stubs
    }

    #[instrument(skip_all)]
    pub fn write_subset(&mut self, subset: &SchemaSubset) -> std::io::Result<()> {
        self.write_enums(&subset.enums)?;
        self.write_prefixed_tables(&subset.prefixed_tables)?;
        self.write_related_tables(&subset.related_tables)?;
        self.write_foreign_keys(&subset.foreign_keys)?;

        Ok(())
    }

    pub fn finish(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }

    fn write_enums(&mut self, enums: &[&PostgresEnum]) -> std::io::Result<()> {
        if enums.is_empty() {
            return Ok(());
        }

        self.file.write_all(b"-- Enum type definitions\n")?;
        for enumeration in enums {
            self.file.write_all(enumeration.raw_sql.as_bytes())?;
        }
        self.file.write_all(b"\n")
    }

    fn write_prefixed_tables(&mut self, tables: &[&PostgresTable]) -> std::io::Result<()> {
        self.file.write_all(b"-- Tables with prefix\n")?;
        for table in tables {
            self.file.write_all(table.raw_sql.as_bytes())?;
        }

        Ok(())
    }

    fn write_related_tables(&mut self, tables: &[RelatedTable]) -> std::io::Result<()> {
        self.file.write_all(b"\n-- Related tables\n")?;

        for related in tables {
            if related.is_whitelisted {
                self.file.write_all(b"\n-- Full definition for whitelisted table\n")?;
                self.file.write_all(related.table.raw_sql.as_bytes())?;
                continue;
            }

            match related.table.get_stub_statement() {
                Some(stub) => self.file.write_all(stub.as_bytes())?,
                None => {
                    tracing::debug!(table = %related.table.qualified_name(), "Related table has no id column, leaving it out");
                    self.omitted_stubs += 1;
                }
            }
        }

        Ok(())
    }

    /// Each constraint is written as the complete `alter table` statement from the dump, so one
    /// constraint can span several lines.
    fn write_foreign_keys(&mut self, foreign_keys: &[&PostgresForeignKey]) -> std::io::Result<()> {
        if foreign_keys.is_empty() {
            return Ok(());
        }

        self.file.write_all(b"\n-- Foreign key constraints\n")?;
        for foreign_key in foreign_keys {
            self.file.write_all(foreign_key.raw_sql.as_bytes())?;
        }

        Ok(())
    }
}

/// Writes `subset` to a new file at `path`, replacing anything that was there.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_subset_file(path: impl AsRef<Path>, subset: &SchemaSubset) -> Result {
    let path = path.as_ref();
    let to_error = |source| SubsetError::WriteOutput {
        path: path.display().to_string(),
        source,
    };

    let mut sql_file = SqlFile::new_file(path).map_err(to_error)?;
    sql_file.write_subset(subset).map_err(to_error)?;
    sql_file.finish().map_err(to_error)?;

    tracing::info!(tables = subset.table_count() - sql_file.omitted_stubs(), enums = subset.enums.len(), "Wrote subset");

    Ok(())
}
