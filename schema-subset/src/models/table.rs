use crate::models::column::PostgresColumn;
use crate::models::QualifiedName;

#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct PostgresTable {
    pub schema: String,
    pub name: String,
    pub columns: Vec<PostgresColumn>,
    /// The complete `create table` statement as it appeared in the dump, including the trailing newline.
    pub raw_sql: String,
}

impl PostgresTable {
    pub fn new(schema: &str, name: &str) -> Self {
        PostgresTable {
            schema: schema.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.schema, &self.name)
    }

    pub fn get_column(&self, name: &str) -> Option<&PostgresColumn> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// The `create table ... (` part of the statement, up to and including the opening parenthesis.
    pub fn get_create_header(&self) -> Option<&str> {
        let first_line = self.raw_sql.lines().next()?.trim_start();
        let open = first_line.find('(')?;

        Some(&first_line[..=open])
    }

    /// Creates a stand-in for the table that only has its `id` column, so foreign keys pointing
    /// to it stay valid without dragging in the whole definition.
    ///
    /// The `id` column is written as it was defined, but always indented by four spaces
    /// regardless of its indentation in the dump.
    ///
    /// Returns `None` when the table has no `id` column.
    pub fn get_stub_statement(&self) -> Option<String> {
        let header = self.get_create_header()?;
        let id_column = self.get_column("id")?;

        Some(format!("{}\n    {}\n);\n\n", header, id_column.definition))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use crate::default;
    use super::*;

    fn users_table() -> PostgresTable {
        PostgresTable {
            columns: vec![
                PostgresColumn {
                    name: "id".to_string(),
                    data_type: "bigint".to_string(),
                    definition: "id bigint NOT NULL".to_string(),
                    ..default()
                },
                PostgresColumn {
                    name: "email".to_string(),
                    data_type: "character varying".to_string(),
                    is_nullable: true,
                    definition: "email character varying".to_string(),
                    ..default()
                },
            ],
            raw_sql: indoc! {r#"
                CREATE TABLE public.users (
                    id bigint NOT NULL,
                    email character varying
                );
            "#}.to_string(),
            ..PostgresTable::new("public", "users")
        }
    }

    #[test]
    fn create_header() {
        assert_eq!(users_table().get_create_header(), Some("CREATE TABLE public.users ("));
    }

    #[test]
    fn stub_statement() {
        similar_asserts::assert_eq!(users_table().get_stub_statement().unwrap(), indoc! {r#"
            CREATE TABLE public.users (
                id bigint NOT NULL
            );

        "#});
    }

    #[test]
    fn no_stub_without_id_column() {
        let mut table = users_table();
        table.columns.retain(|c| c.name != "id");

        assert_eq!(table.get_stub_statement(), None);
    }

    #[test]
    fn finds_columns_ignoring_case() {
        let table = users_table();
        assert_eq!(table.get_column("EMAIL").map(|c| c.name.as_str()), Some("email"));
        assert!(table.get_column("missing").is_none());
    }
}
