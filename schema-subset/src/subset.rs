use std::collections::HashSet;
use itertools::Itertools;
use tracing::instrument;
use crate::models::{PostgresEnum, PostgresForeignKey, PostgresSchemaDump, PostgresTable, QualifiedName};
use crate::relations::find_related_tables;

/// What to extract from a dump.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct SubsetOptions {
    /// Tables whose name starts with `<prefix>_` are extracted in full.
    pub prefix: String,
    /// Related tables that should be extracted in full instead of as a stub. Bare table names,
    /// compared without case.
    pub whitelist: Vec<String>,
}

impl SubsetOptions {
    pub fn new(prefix: impl Into<String>, whitelist: Vec<String>) -> Self {
        SubsetOptions {
            prefix: prefix.into(),
            whitelist,
        }
    }

    /// The prefix has to be followed by an underscore, so `orders` matches `orders_items`
    /// but not `ordersarchive`.
    pub fn matches_prefix(&self, table_name: &str) -> bool {
        let prefix = format!("{}_", self.prefix.to_lowercase());
        table_name.to_lowercase().starts_with(&prefix)
    }

    pub fn is_whitelisted(&self, table_name: &str) -> bool {
        self.whitelist.iter().any(|w| w.eq_ignore_ascii_case(table_name))
    }
}

/// A table pulled in by the relationship heuristic.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct RelatedTable<'a> {
    pub table: &'a PostgresTable,
    /// Whitelisted tables are written in full, the others as a stub.
    pub is_whitelisted: bool,
}

/// The part of a dump that should be written out.
#[derive(Debug, Eq, PartialEq, Default)]
pub struct SchemaSubset<'a> {
    pub prefixed_tables: Vec<&'a PostgresTable>,
    pub related_tables: Vec<RelatedTable<'a>>,
    pub enums: Vec<&'a PostgresEnum>,
    pub foreign_keys: Vec<&'a PostgresForeignKey>,
    /// Whitelist entries that didn't match any extracted table.
    pub unmatched_whitelist: Vec<String>,
}

impl<'a> SchemaSubset<'a> {
    pub fn whitelisted_tables(&self) -> impl Iterator<Item = &'a PostgresTable> + '_ {
        self.related_tables.iter().filter(|r| r.is_whitelisted).map(|r| r.table)
    }

    pub fn table_count(&self) -> usize {
        self.prefixed_tables.len() + self.related_tables.len()
    }
}

/// Finds the enums that are the declared type of a column in one of `tables`.
///
/// Column types are compared to the enums by their schema qualified name. A column without a
/// schema on its type is assumed to use a type in `public`. The result is in dump order.
pub fn find_used_enums<'a, 't>(tables: impl IntoIterator<Item = &'t PostgresTable>, enums: &'a [PostgresEnum]) -> Vec<&'a PostgresEnum> {
    let used_types: HashSet<QualifiedName> = tables.into_iter()
        .flat_map(|t| t.columns.iter())
        .filter_map(|c| c.get_type_name())
        .collect();

    enums.iter()
        .filter(|e| used_types.contains(&e.qualified_name()))
        .unique_by(|e| e.qualified_name())
        .collect()
}

/// Works out which tables, enums and foreign keys to extract.
///
/// * Tables matching the prefix are always extracted in full.
/// * Tables related to those by naming convention are extracted too, as a stub unless whitelisted.
///   A table that matches the prefix is never also treated as related, even if whitelisted.
/// * Enums are extracted if a prefixed or whitelisted table uses them. Stubs only keep their
///   `id` column, so they don't need any enums.
/// * Foreign keys are extracted if either end is a prefixed table, or a table with a whitelisted name.
#[instrument(skip_all, fields(prefix = %options.prefix))]
pub fn find_subset<'a>(dump: &'a PostgresSchemaDump, options: &SubsetOptions) -> SchemaSubset<'a> {
    let prefixed_tables = dump.tables.iter()
        .filter(|t| options.matches_prefix(&t.name))
        .collect_vec();

    let related_tables = find_related_tables(&prefixed_tables, &dump.tables)
        .into_iter()
        .map(|table| RelatedTable {
            table,
            is_whitelisted: options.is_whitelisted(&table.name),
        })
        .collect_vec();

    let enum_sources = prefixed_tables.iter()
        .copied()
        .chain(related_tables.iter().filter(|r| r.is_whitelisted).map(|r| r.table));
    let enums = find_used_enums(enum_sources, &dump.enums);

    let prefixed_names: HashSet<QualifiedName> = prefixed_tables.iter().map(|t| t.qualified_name()).collect();
    let foreign_keys = dump.foreign_keys.iter()
        .filter(|fk| fk.touches(|table| prefixed_names.contains(table) || options.is_whitelisted(&table.name)))
        .collect_vec();

    let unmatched_whitelist = options.whitelist.iter()
        .filter(|w| {
            !prefixed_tables.iter().any(|t| t.name.eq_ignore_ascii_case(w))
                && !related_tables.iter().any(|r| r.table.name.eq_ignore_ascii_case(w))
        })
        .cloned()
        .collect_vec();

    for name in &unmatched_whitelist {
        tracing::warn!(table = %name, "Whitelisted table is not related to any table with the prefix");
    }

    tracing::info!(
        prefixed = prefixed_tables.len(),
        related = related_tables.len(),
        enums = enums.len(),
        foreign_keys = foreign_keys.len(),
        "Found subset"
    );

    SchemaSubset {
        prefixed_tables,
        related_tables,
        enums,
        foreign_keys,
        unmatched_whitelist,
    }
}
