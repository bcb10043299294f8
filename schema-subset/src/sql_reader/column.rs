use std::sync::LazyLock;
use regex::Regex;
use crate::identifiers::{unquote_identifier, IDENTIFIER_PATTERN};
use crate::models::PostgresColumn;

static COLUMN_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)^(?P<name>{IDENTIFIER_PATTERN})\s+(?P<rest>.+)$")).unwrap()
});

/// The clauses that can follow the data type of a column.
static TYPE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:DEFAULT|NOT\s+NULL|NULL|PRIMARY\s+KEY|REFERENCES|UNIQUE|CHECK|CONSTRAINT|COLLATE|GENERATED)\b").unwrap()
});

static DEFAULT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bDEFAULT\s+(?P<value>.+?)(?:\s+(?:NOT\s+NULL|NULL|PRIMARY\s+KEY|REFERENCES|UNIQUE|CHECK|CONSTRAINT|COLLATE|GENERATED)\b.*)?$").unwrap()
});

static NOT_NULL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());

static PRIMARY_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());

/// Table elements that are constraints or options rather than columns.
static NON_COLUMN_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:CONSTRAINT|PRIMARY\s+KEY|UNIQUE|CHECK|FOREIGN\s+KEY|EXCLUDE|LIKE)\b").unwrap()
});

pub(crate) fn is_column_element(element: &str) -> bool {
    !NON_COLUMN_ELEMENT.is_match(element.trim_start())
}

/// Parses a single column definition, like `status public.status_enum DEFAULT 'new'::public.status_enum NOT NULL`.
///
/// `element` should already be trimmed and have its separating comma removed.
pub(crate) fn read_column(element: &str) -> Option<PostgresColumn> {
    let captures = COLUMN_DEFINITION.captures(element)?;
    let rest = captures.name("rest")?.as_str();

    let data_type = match TYPE_TERMINATOR.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    let default_value = DEFAULT_VALUE
        .captures(rest)
        .and_then(|c| c.name("value"))
        .map(|v| v.as_str().trim().to_string());

    Some(PostgresColumn {
        name: unquote_identifier(captures.name("name")?.as_str()),
        data_type: data_type.trim().to_string(),
        is_nullable: !NOT_NULL.is_match(rest),
        is_primary_key: PRIMARY_KEY.is_match(rest),
        default_value,
        definition: element.to_string(),
    })
}
