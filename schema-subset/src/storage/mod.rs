mod sql_file;

pub use sql_file::{SqlFile, write_subset_file, DEFAULT_OUTPUT_PATH};
