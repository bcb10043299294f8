use std::io::Write;
use std::process::ExitCode;
use clap::Parser;
use schema_subset::{find_subset, read_schema_from_file, write_subset_file, PostgresTable, Result, SubsetOptions};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    match run(cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[instrument(skip_all)]
fn run(cli: cli::Cli, out: &mut impl Write) -> Result {
    let dump = read_schema_from_file(&cli.input)?;
    writeln!(out, "Found {} total tables", dump.tables.len())?;

    let Some(prefix) = cli.table_prefix.filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let options = SubsetOptions::new(prefix, cli.whitelist);
    let subset = find_subset(&dump, &options);

    writeln!(out, "\nFound {} tables with prefix '{}':", subset.prefixed_tables.len(), options.prefix)?;
    write_table_names(out, subset.prefixed_tables.iter().copied())?;

    writeln!(out, "\nFound {} related tables:", subset.related_tables.len())?;
    write_table_names(out, subset.related_tables.iter().map(|r| r.table))?;

    writeln!(out, "\nFound {} enum types used by filtered tables and whitelisted related tables:", subset.enums.len())?;
    for enumeration in &subset.enums {
        writeln!(out, "{}", enumeration.qualified_name())?;
    }

    writeln!(out, "\nFound {} foreign keys touching filtered or whitelisted tables:", subset.foreign_keys.len())?;
    for foreign_key in &subset.foreign_keys {
        writeln!(out, "{} -> {} ({})", foreign_key.source_table, foreign_key.target_table, foreign_key.name)?;
    }

    write_subset_file(&cli.output, &subset)?;

    writeln!(out, "\nWrote {} tables and {} enum types to {}", subset.table_count(), subset.enums.len(), cli.output.display())?;
    if !options.whitelist.is_empty() {
        writeln!(out, "Included full definitions for whitelisted tables: {}", options.whitelist.join(", "))?;
    }

    Ok(())
}

fn write_table_names<'a>(out: &mut impl Write, tables: impl Iterator<Item = &'a PostgresTable>) -> Result {
    for table in tables {
        writeln!(out, "{}", table.qualified_name())?;
    }

    Ok(())
}
