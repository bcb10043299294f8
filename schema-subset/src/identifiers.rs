use std::sync::LazyLock;
use regex::Regex;
use crate::models::QualifiedName;

/// Matches a single identifier, either bare or double quoted.
pub(crate) const IDENTIFIER_PATTERN: &str = r#"(?:"(?:[^"]|"")+"|[A-Za-z0-9_$]+)"#;

/// Matches an identifier optionally prefixed by a schema, like `public.users` or `"app"."Users"`.
pub(crate) static QUALIFIED_NAME_PATTERN: LazyLock<String> =
    LazyLock::new(|| format!(r"{IDENTIFIER_PATTERN}(?:\s*\.\s*{IDENTIFIER_PATTERN})?"));

static WHOLE_QUALIFIED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{}$", *QUALIFIED_NAME_PATTERN)).unwrap());

/// Removes the quotes around an identifier, if any, and unescapes embedded quotes.
///
/// Reverses what postgres does in `quote_identifier`, so `"my""table"` becomes `my"table`.
pub(crate) fn unquote_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();

    match identifier.strip_prefix('"').and_then(|i| i.strip_suffix('"')) {
        Some(inner) => inner.replace(r#""""#, "\""),
        None => identifier.to_string(),
    }
}

/// Splits a dotted name into its unquoted parts. Dots inside quoted identifiers do not split.
pub(crate) fn split_qualified_name(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                parts.push(unquote_identifier(&text[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(unquote_identifier(&text[start..]));
    parts
}

/// Parses `name` or `schema.name`. Unqualified names are placed in the `public` schema.
pub(crate) fn parse_qualified_name(text: &str) -> Option<QualifiedName> {
    let text = text.trim();
    if !WHOLE_QUALIFIED_NAME.is_match(text) {
        return None;
    }

    match split_qualified_name(text).as_slice() {
        [name] => Some(QualifiedName::in_default_schema(name)),
        [schema, name] => Some(QualifiedName::new(schema, name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoting() {
        macro_rules! test_unquote {
            ($identifier:literal, $expected:literal) => {
                let unquoted = unquote_identifier($identifier);
                assert_eq!(unquoted, $expected);
            };
        }

        test_unquote!("users", "users");
        test_unquote!("\"users\"", "users");
        test_unquote!("\"MyTable\"", "MyTable");
        test_unquote!("\"my\"\"table\"", "my\"table");
        test_unquote!("  users  ", "users");
        test_unquote!("\"table 1\"", "table 1");
        test_unquote!("\"", "\"");
    }

    #[test]
    fn splits_qualified_names() {
        assert_eq!(split_qualified_name("public.users"), vec!["public", "users"]);
        assert_eq!(split_qualified_name("\"app\".\"Users\""), vec!["app", "Users"]);
        assert_eq!(split_qualified_name("\"dotted.schema\".users"), vec!["dotted.schema", "users"]);
        assert_eq!(split_qualified_name("users"), vec!["users"]);
        assert_eq!(split_qualified_name("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn parses_qualified_names() {
        assert_eq!(parse_qualified_name("public.users"), Some(QualifiedName::new("public", "users")));
        assert_eq!(parse_qualified_name("\"billing\".\"Invoices\""), Some(QualifiedName::new("billing", "Invoices")));
        assert_eq!(parse_qualified_name("users"), Some(QualifiedName::new("public", "users")));
        assert_eq!(parse_qualified_name("character varying"), None);
        assert_eq!(parse_qualified_name("a.b.c"), None);
        assert_eq!(parse_qualified_name(""), None);
    }

    #[test]
    fn parsed_names_keep_their_case() {
        let name = parse_qualified_name("\"Billing\".\"Invoices\"").unwrap();
        assert_eq!(name.schema, "Billing");
        assert_eq!(name.name, "Invoices");
    }
}
