use crate::models::{PostgresEnum, PostgresForeignKey, PostgresTable, QualifiedName};

/// Everything read from a single schema dump, in the order it appeared in the file.
#[derive(Debug, Eq, PartialEq, Default)]
pub struct PostgresSchemaDump {
    pub tables: Vec<PostgresTable>,
    pub enums: Vec<PostgresEnum>,
    pub foreign_keys: Vec<PostgresForeignKey>,
}

impl PostgresSchemaDump {
    pub fn get_table(&self, name: &QualifiedName) -> Option<&PostgresTable> {
        self.tables.iter().find(|t| t.qualified_name() == *name)
    }

    pub fn get_enum(&self, name: &QualifiedName) -> Option<&PostgresEnum> {
        self.enums.iter().find(|e| e.qualified_name() == *name)
    }
}
