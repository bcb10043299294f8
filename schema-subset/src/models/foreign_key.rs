use crate::models::QualifiedName;

/// A foreign key added by an `alter table ... add constraint ... foreign key` statement.
///
/// Neither table owns the constraint. Two constraints are the same if their SQL is the same.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PostgresForeignKey {
    pub name: String,
    pub source_table: QualifiedName,
    pub columns: Vec<String>,
    pub target_table: QualifiedName,
    pub referenced_columns: Vec<String>,
    /// The complete `alter table` statement as it appeared in the dump.
    pub raw_sql: String,
}

impl PostgresForeignKey {
    /// True if `predicate` holds for either end of the constraint.
    pub fn touches(&self, predicate: impl Fn(&QualifiedName) -> bool) -> bool {
        predicate(&self.source_table) || predicate(&self.target_table)
    }
}
