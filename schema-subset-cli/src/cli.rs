use std::path::PathBuf;
use clap::Parser;
use schema_subset::DEFAULT_OUTPUT_PATH;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about)]
/// Extracts a group of tables from a postgres schema dump, such as a `structure.sql` made by `pg_dump --schema-only`.
///
/// Every table named `<table_prefix>_*` is extracted, together with the enum types it uses and the foreign keys
/// touching it. Tables it relates to through `<name>_id` columns are added as a stub with only their `id` column,
/// unless they are whitelisted.
pub struct Cli {
    /// The schema dump to read
    pub input: PathBuf,

    /// Extract the tables whose name starts with this prefix followed by an underscore.
    /// If not specified, only the number of tables in the dump is printed.
    pub table_prefix: Option<String>,

    /// Related tables to include with their full definition instead of a stub
    pub whitelist: Vec<String>,

    /// Where to write the extracted schema. An existing file is overwritten.
    #[arg(long, short, env = "SCHEMA_SUBSET_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

#[test]
fn parses_prefix_and_whitelist() {
    let cli = Cli::try_parse_from(["schema-subset", "structure.sql", "submissions", "users", "audit_logs", "-o", "subset.sql"]).unwrap();

    assert_eq!(cli.input, PathBuf::from("structure.sql"));
    assert_eq!(cli.table_prefix.as_deref(), Some("submissions"));
    assert_eq!(cli.whitelist, vec!["users", "audit_logs"]);
    assert_eq!(cli.output, PathBuf::from("subset.sql"));
}

#[test]
fn input_is_required() {
    let error = Cli::try_parse_from(["schema-subset"]).unwrap_err();

    assert!(error.use_stderr());
}
