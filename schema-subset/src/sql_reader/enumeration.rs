use std::sync::LazyLock;
use regex::Regex;
use crate::identifiers::split_qualified_name;
use crate::models::PostgresEnum;
use crate::sql_reader::scanner::{ScannedStatement, CREATE_ENUM_START};

static ENUM_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'((?:[^']|'')*)'").unwrap());

/// Builds an enum from a captured `create type ... as enum` statement.
///
/// Only schema qualified names are recognized, `create type mood as enum (...)` is skipped.
pub(crate) fn read_enum(statement: &ScannedStatement) -> Option<PostgresEnum> {
    let captures = CREATE_ENUM_START.captures(&statement.sql)?;
    let (schema, name) = match split_qualified_name(captures.name("name")?.as_str()).as_slice() {
        [schema, name] => (schema.clone(), name.clone()),
        _ => {
            tracing::debug!(line_number = statement.line_number, "Skipping enum without a schema qualified name");
            return None;
        }
    };

    let values_start = captures.get(0)?.end();
    let values = ENUM_VALUE
        .captures_iter(&statement.sql[values_start..])
        .filter_map(|c| c.get(1))
        .map(|v| v.as_str().replace("''", "'"))
        .collect();

    Some(PostgresEnum {
        schema,
        name,
        values,
        raw_sql: statement.sql.clone(),
    })
}
