use crate::identifiers::parse_qualified_name;
use crate::models::QualifiedName;

#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct PostgresColumn {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub default_value: Option<String>,
    /// The column exactly as written in the dump, without the separating comma.
    pub definition: String,
}

impl PostgresColumn {
    /// If the column follows the `<name>_id` convention, returns the lowercase `<name>`.
    pub fn get_reference_base_name(&self) -> Option<String> {
        self.name
            .to_ascii_lowercase()
            .strip_suffix("_id")
            .filter(|base| !base.is_empty())
            .map(|base| base.to_string())
    }

    /// The type this column is declared with, as a qualified name. Array and type modifier
    /// suffixes are ignored. Unqualified types are assumed to live in `public`.
    ///
    /// Built in types with spaces in their name, like `character varying`, don't resolve.
    pub fn get_type_name(&self) -> Option<QualifiedName> {
        let mut data_type = self.data_type.trim();

        while let Some(stripped) = data_type.strip_suffix("[]") {
            data_type = stripped.trim_end();
        }

        if data_type.ends_with(')') {
            if let Some(modifier_start) = data_type.rfind('(') {
                data_type = data_type[..modifier_start].trim_end();
            }
        }

        parse_qualified_name(data_type)
    }
}
