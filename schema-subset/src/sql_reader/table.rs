use std::sync::LazyLock;
use regex::Regex;
use crate::helpers::{find_closing_paren, split_top_level_commas, strip_line_comment};
use crate::identifiers::{parse_qualified_name, split_qualified_name};
use crate::models::PostgresTable;
use crate::sql_reader::column::{is_column_element, read_column};
use crate::sql_reader::scanner::{ScannedStatement, CREATE_TABLE_START};

/// A table level `primary key (...)` or `constraint ... primary key (...)` element.
static TABLE_PRIMARY_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?:CONSTRAINT\s+\S+\s+)?PRIMARY\s+KEY\s*\((?P<columns>[^)]*)\)").unwrap()
});

/// Builds a table from a captured `create table` statement.
pub(crate) fn read_table(statement: &ScannedStatement) -> Option<PostgresTable> {
    let captures = CREATE_TABLE_START.captures(&statement.sql)?;
    let name = parse_qualified_name(captures.name("name")?.as_str())?;

    let open = captures.get(0)?.end() - 1;

    let mut table = PostgresTable {
        raw_sql: statement.sql.clone(),
        ..PostgresTable::new(&name.schema, &name.name)
    };

    let Some(close) = find_closing_paren(&statement.sql, open) else {
        tracing::debug!(table = %name, "Table body is not closed, skipping columns");
        return Some(table);
    };

    let body = statement.sql[open + 1..close]
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n");

    let mut primary_key_columns = Vec::new();

    for element in split_top_level_commas(&body) {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }

        if let Some(pk) = TABLE_PRIMARY_KEY.captures(element) {
            let columns = pk.name("columns").map(|c| c.as_str()).unwrap_or_default();
            primary_key_columns.extend(columns.split(',').flat_map(split_qualified_name));
        } else if is_column_element(element) {
            match read_column(element) {
                Some(column) => table.columns.push(column),
                None => tracing::trace!(table = %name, element, "Not a column definition"),
            }
        }
    }

    for column in &mut table.columns {
        if primary_key_columns.iter().any(|pk| pk.eq_ignore_ascii_case(&column.name)) {
            column.is_primary_key = true;
        }
    }

    Some(table)
}
