mod column;
mod enumeration;
mod foreign_key;
mod qualified_name;
mod schema_dump;
mod table;

pub use column::*;
pub use enumeration::*;
pub use foreign_key::*;
pub use qualified_name::*;
pub use schema_dump::*;
pub use table::*;
