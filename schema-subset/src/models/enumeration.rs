use crate::models::QualifiedName;

#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct PostgresEnum {
    pub schema: String,
    pub name: String,
    pub values: Vec<String>,
    /// The complete `create type ... as enum` statement as it appeared in the dump.
    pub raw_sql: String,
}

impl PostgresEnum {
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.schema, &self.name)
    }
}
