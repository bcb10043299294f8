use std::collections::HashSet;
use itertools::Itertools;
use tracing::instrument;
use crate::models::{PostgresTable, QualifiedName};

/// The name a `<name>_id` column pointing at this table would use: lowercase, with a single
/// trailing `s` removed. `users` becomes `user`, `address` becomes `addres`.
fn singular_name(table_name: &str) -> String {
    let lower = table_name.to_ascii_lowercase();
    match lower.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => lower,
    }
}

/// Finds the tables connected to `filtered` through `<name>_id` columns, for dumps that don't
/// declare their foreign keys.
///
/// This is a naming heuristic:
/// * A column `order_id` in a filtered table relates the tables named `order` and `orders`.
/// * A filtered table `orders` relates every table with an `order_id` column.
///
/// Plurals are only ever formed by adding or removing a single `s`, and names are compared
/// without their schema. Tables in `filtered` are never returned. The result is in the order
/// of `all_tables`.
#[instrument(skip_all)]
pub fn find_related_tables<'a>(filtered: &[&PostgresTable], all_tables: &'a [PostgresTable]) -> Vec<&'a PostgresTable> {
    let filtered_names: HashSet<QualifiedName> = filtered.iter().map(|t| t.qualified_name()).collect();
    let mut related = HashSet::new();

    for table in filtered {
        for column in &table.columns {
            let Some(base_name) = column.get_reference_base_name() else {
                continue;
            };
            let plural_name = format!("{base_name}s");

            for other in all_tables {
                let other_name = other.name.to_ascii_lowercase();
                if other_name != base_name && other_name != plural_name {
                    continue;
                }

                let qualified_name = other.qualified_name();
                if !filtered_names.contains(&qualified_name) && related.insert(qualified_name) {
                    tracing::debug!(related = %other.qualified_name(), column = %column.name, table = %table.qualified_name(), "Found table referenced by column");
                }
            }
        }
    }

    for table in filtered {
        let expected_column = format!("{}_id", singular_name(&table.name));

        for other in all_tables {
            let qualified_name = other.qualified_name();
            if filtered_names.contains(&qualified_name) || related.contains(&qualified_name) {
                continue;
            }

            if other.columns.iter().any(|c| c.name.to_ascii_lowercase() == expected_column) {
                tracing::debug!(related = %qualified_name, column = %expected_column, table = %table.qualified_name(), "Found table referencing filtered table");
                related.insert(qualified_name);
            }
        }
    }

    all_tables.iter()
        .filter(|t| related.contains(&t.qualified_name()))
        .unique_by(|t| t.qualified_name())
        .collect()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use crate::SqlReader;
    use super::*;

    fn related_names(sql: &str, filtered_names: &[&str]) -> Vec<String> {
        let dump = SqlReader::new(sql).read_schema();
        let filtered = dump.tables.iter()
            .filter(|t| filtered_names.contains(&t.name.as_str()))
            .collect_vec();

        find_related_tables(&filtered, &dump.tables)
            .into_iter()
            .map(|t| t.name.clone())
            .collect()
    }

    static SHOP: &str = indoc! {r#"
        CREATE TABLE public.orders (
            id bigint NOT NULL,
            customer_id bigint
        );
        CREATE TABLE public.shipments (
            id bigint NOT NULL,
            order_id bigint NOT NULL
        );
        CREATE TABLE public.customer (
            id bigint NOT NULL
        );
        CREATE TABLE public.invoices (
            id bigint NOT NULL,
            order_id bigint
        );
        CREATE TABLE public.warehouses (
            id bigint NOT NULL
        );
    "#};

    #[test]
    fn outbound_plural() {
        assert_eq!(related_names(SHOP, &["shipments"]), vec!["orders"]);
    }

    #[test]
    fn outbound_singular() {
        assert_eq!(related_names(SHOP, &["orders"]), vec!["shipments", "customer", "invoices"]);
    }

    #[test]
    fn inbound() {
        let sql = indoc! {r#"
            CREATE TABLE public.orders (
                id bigint NOT NULL
            );
            CREATE TABLE public.shipments (
                id bigint NOT NULL,
                order_id bigint NOT NULL
            );
        "#};

        assert_eq!(related_names(sql, &["orders"]), vec!["shipments"]);
        assert_eq!(related_names(sql, &["shipments"]), vec!["orders"]);
    }

    #[test]
    fn never_returns_filtered_tables() {
        assert_eq!(related_names(SHOP, &["orders", "shipments"]), vec!["customer", "invoices"]);
    }

    #[test]
    fn column_names_ignore_case() {
        let sql = indoc! {r#"
            CREATE TABLE public.Orders (
                id bigint NOT NULL
            );
            CREATE TABLE public.shipments (
                id bigint NOT NULL,
                "Order_Id" bigint NOT NULL
            );
        "#};

        assert_eq!(related_names(sql, &["shipments"]), vec!["Orders"]);
        assert_eq!(related_names(sql, &["Orders"]), vec!["shipments"]);
    }

    #[test]
    fn same_name_in_other_schemas_is_related_too() {
        let sql = indoc! {r#"
            CREATE TABLE public.shipments (
                id bigint NOT NULL,
                order_id bigint NOT NULL
            );
            CREATE TABLE public.orders (
                id bigint NOT NULL
            );
            CREATE TABLE archive.orders (
                id bigint NOT NULL
            );
        "#};

        let dump = SqlReader::new(sql).read_schema();
        let filtered = vec![&dump.tables[0]];
        let related = find_related_tables(&filtered, &dump.tables)
            .into_iter()
            .map(|t| t.qualified_name().to_string())
            .collect_vec();

        assert_eq!(related, vec!["public.orders", "archive.orders"]);
    }

    #[test]
    fn irregular_plurals_are_not_understood() {
        let sql = indoc! {r#"
            CREATE TABLE public.people (
                id bigint NOT NULL
            );
            CREATE TABLE public.addresses (
                id bigint NOT NULL,
                person_id bigint
            );
        "#};

        assert!(related_names(sql, &["addresses"]).is_empty());
        assert!(related_names(sql, &["people"]).is_empty());
    }

    #[test]
    fn singular_names() {
        assert_eq!(singular_name("users"), "user");
        assert_eq!(singular_name("Orders"), "order");
        assert_eq!(singular_name("person"), "person");
        assert_eq!(singular_name("address"), "addres");
    }
}
