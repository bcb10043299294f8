use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::LazyLock;
use regex::Regex;
use crate::identifiers::{parse_qualified_name, split_qualified_name, unquote_identifier, IDENTIFIER_PATTERN, QUALIFIED_NAME_PATTERN};
use crate::models::{PostgresForeignKey, QualifiedName};
use crate::sql_reader::scanner::ScannedStatement;

static ALTER_TABLE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*ALTER\s+TABLE\s+(?:IF\s+EXISTS\s+)?(?:ONLY\s+)?(?P<table>{})",
        *QUALIFIED_NAME_PATTERN
    )).unwrap()
});

static DROP_CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bDROP\s+CONSTRAINT\s+IF\s+EXISTS\s+(?P<name>{IDENTIFIER_PATTERN})")).unwrap()
});

static ADD_FOREIGN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)\bADD\s+CONSTRAINT\s+(?P<name>{IDENTIFIER_PATTERN})\s+FOREIGN\s+KEY\s*\((?P<columns>[^)]*)\)\s*REFERENCES\s+(?P<target>{})\s*(?:\((?P<referenced>[^)]*)\))?",
        *QUALIFIED_NAME_PATTERN
    )).unwrap()
});

fn split_column_list(list: Option<regex::Match>) -> Vec<String> {
    list.map(|l| l.as_str().split(',').flat_map(split_qualified_name).filter(|c| !c.is_empty()).collect())
        .unwrap_or_default()
}

/// Maps constraint names to the table they belong to, using the
/// `alter table ... drop constraint if exists <name>` statements of a `pg_dump --clean` dump.
fn read_constraint_owners<'a>(statements: impl IntoIterator<Item = &'a ScannedStatement>) -> HashMap<String, QualifiedName> {
    let mut owners = HashMap::new();

    for statement in statements {
        let Some(dropped) = DROP_CONSTRAINT.captures(&statement.sql) else {
            continue;
        };

        let owner = ALTER_TABLE_TARGET
            .captures(&statement.sql)
            .and_then(|c| c.name("table"))
            .and_then(|t| parse_qualified_name(t.as_str()));

        if let (Some(owner), Some(name)) = (owner, dropped.name("name")) {
            owners.insert(unquote_identifier(name.as_str()), owner);
        }
    }

    owners
}

/// Reads the foreign keys from the captured `alter table` statements.
///
/// The owning table of a constraint is the one named in the matching `drop constraint if exists`
/// statement. Constraints without one are skipped. Duplicate statements are only kept once.
pub(crate) fn read_foreign_keys(statements: &[&ScannedStatement]) -> Vec<PostgresForeignKey> {
    let owners = read_constraint_owners(statements.iter().copied());
    let mut seen_sql = HashSet::new();
    let mut foreign_keys = Vec::new();

    for statement in statements {
        let Some(captures) = ADD_FOREIGN_KEY.captures(&statement.sql) else {
            continue;
        };

        let Some(name) = captures.name("name").map(|n| unquote_identifier(n.as_str())) else {
            continue;
        };

        let Some(source_table) = owners.get(&name) else {
            tracing::debug!(constraint = %name, line_number = statement.line_number, "Skipping foreign key without a known owning table");
            continue;
        };

        let Some(target_table) = captures.name("target").and_then(|t| parse_qualified_name(t.as_str())) else {
            continue;
        };

        if !seen_sql.insert(statement.sql.as_str()) {
            continue;
        }

        foreign_keys.push(PostgresForeignKey {
            name,
            source_table: source_table.clone(),
            columns: split_column_list(captures.name("columns")),
            target_table,
            referenced_columns: split_column_list(captures.name("referenced")),
            raw_sql: statement.sql.clone(),
        });
    }

    foreign_keys
}
