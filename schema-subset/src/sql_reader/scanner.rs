use std::sync::LazyLock;
use regex::Regex;
use crate::helpers::paren_balance;
use crate::identifiers::QUALIFIED_NAME_PATTERN;

/// The first line of a `create table` statement. The opening parenthesis has to be on the same line.
pub(crate) static CREATE_TABLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*CREATE\s+(?:UNLOGGED\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<name>{})\s*\(",
        *QUALIFIED_NAME_PATTERN
    )).unwrap()
});

/// The first line of a `create type ... as enum` statement.
pub(crate) static CREATE_ENUM_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+TYPE\s+(?P<name>.+?)\s+AS\s+ENUM\b").unwrap()
});

static ALTER_TABLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*ALTER\s+TABLE\b").unwrap()
});

/// The statements the scanner picks out of a dump.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StatementKind {
    CreateTable,
    CreateEnum,
    AlterTable,
}

impl StatementKind {
    fn starts_statement(&self, line: &str) -> bool {
        match self {
            StatementKind::CreateTable => CREATE_TABLE_START.is_match(line),
            StatementKind::CreateEnum => CREATE_ENUM_START.is_match(line),
            StatementKind::AlterTable => ALTER_TABLE_START.is_match(line),
        }
    }
}

/// A complete statement, captured verbatim.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScannedStatement {
    pub kind: StatementKind,
    /// The line number the statement started on, starting from 1.
    pub line_number: usize,
    /// Every line of the statement, each followed by a newline.
    pub sql: String,
}

/// A statement that has been started but not yet terminated.
#[derive(Debug)]
struct OpenStatement {
    kind: StatementKind,
    line_number: usize,
    sql: String,
    depth: i64,
}

impl OpenStatement {
    fn new(kind: StatementKind, line_number: usize) -> Self {
        OpenStatement {
            kind,
            line_number,
            sql: String::new(),
            depth: 0,
        }
    }

    /// Adds the line to the statement and checks if the statement is complete afterwards.
    fn push_line(&mut self, line: &str) -> bool {
        self.sql.push_str(line);
        self.sql.push('\n');

        match self.kind {
            StatementKind::CreateTable => {
                self.depth += paren_balance(line);
                self.depth <= 0 && line.contains(");")
            }
            StatementKind::CreateEnum => line.contains(");"),
            StatementKind::AlterTable => line.contains(';'),
        }
    }

    fn finish(self) -> ScannedStatement {
        ScannedStatement {
            kind: self.kind,
            line_number: self.line_number,
            sql: self.sql,
        }
    }
}

/// Splits a schema dump into the statements that matter for subsetting.
///
/// Each kind of statement is tracked on its own, so a table body that never terminates
/// doesn't hide the enums and constraints that follow it. Statements that are still open
/// at the end of the input are dropped.
#[derive(Debug, Default)]
pub struct StatementScanner {
    open_table: Option<OpenStatement>,
    open_enum: Option<OpenStatement>,
    open_alter_table: Option<OpenStatement>,
    completed: Vec<ScannedStatement>,
    line_number: usize,
}

impl StatementScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;

        for kind in [StatementKind::CreateTable, StatementKind::CreateEnum, StatementKind::AlterTable] {
            self.feed_line_for(kind, line);
        }
    }

    fn feed_line_for(&mut self, kind: StatementKind, line: &str) {
        let slot = match kind {
            StatementKind::CreateTable => &mut self.open_table,
            StatementKind::CreateEnum => &mut self.open_enum,
            StatementKind::AlterTable => &mut self.open_alter_table,
        };

        if slot.is_none() && kind.starts_statement(line) {
            *slot = Some(OpenStatement::new(kind, self.line_number));
        }

        let Some(open) = slot.as_mut() else {
            return;
        };

        if open.push_line(line) {
            if let Some(statement) = slot.take() {
                self.completed.push(statement.finish());
            }
        }
    }

    /// Returns the completed statements in the order they started in.
    pub fn finish(self) -> Vec<ScannedStatement> {
        for open in [&self.open_table, &self.open_enum, &self.open_alter_table].into_iter().flatten() {
            tracing::debug!(line_number = open.line_number, kind = ?open.kind, "Dropping statement that never terminated");
        }

        let mut completed = self.completed;
        completed.sort_by_key(|s| s.line_number);
        completed
    }
}

/// Scans the complete source text. Both `\n` and `\r\n` line endings are accepted.
pub fn scan_statements(source: &str) -> Vec<ScannedStatement> {
    let mut scanner = StatementScanner::new();

    for line in source.lines() {
        scanner.feed_line(line);
    }

    scanner.finish()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use super::*;

    fn scanned_sql(source: &str) -> Vec<(StatementKind, String)> {
        scan_statements(source).into_iter().map(|s| (s.kind, s.sql)).collect()
    }

    #[test]
    fn captures_tables_verbatim() {
        let source = indoc! {r#"
            SET statement_timeout = 0;

            CREATE TABLE public.users (
                id bigint NOT NULL,
                name character varying(255)
            );

            CREATE SEQUENCE public.users_id_seq;
        "#};

        assert_eq!(scanned_sql(source), vec![
            (StatementKind::CreateTable, "CREATE TABLE public.users (\n    id bigint NOT NULL,\n    name character varying(255)\n);\n".to_string()),
        ]);
    }

    #[test]
    fn nested_parens_keep_table_open() {
        let source = indoc! {r#"
            CREATE TABLE public.checks (
                id bigint NOT NULL,
                amount numeric(10,2) CHECK (amount > abs(
                    0));
                note text
            );
            SELECT 1;
        "#};

        let statements = scan_statements(source);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].sql.ends_with("    note text\n);\n"));
    }

    #[test]
    fn partitions_are_not_tables() {
        let source = "CREATE TABLE public.events_2024 PARTITION OF public.events FOR VALUES FROM ('2024-01-01') TO ('2025-01-01');\n";

        assert!(scan_statements(source).is_empty());
    }

    #[test]
    fn one_line_statements() {
        let source = indoc! {r#"
            CREATE TABLE public.tags (id bigint, name text);
            CREATE TYPE public.mood AS ENUM ('sad', 'happy');
            ALTER TABLE ONLY public.tags DROP CONSTRAINT IF EXISTS fk_rails_0001;
        "#};

        assert_eq!(scanned_sql(source), vec![
            (StatementKind::CreateTable, "CREATE TABLE public.tags (id bigint, name text);\n".to_string()),
            (StatementKind::CreateEnum, "CREATE TYPE public.mood AS ENUM ('sad', 'happy');\n".to_string()),
            (StatementKind::AlterTable, "ALTER TABLE ONLY public.tags DROP CONSTRAINT IF EXISTS fk_rails_0001;\n".to_string()),
        ]);
    }

    #[test]
    fn statement_starts_are_case_insensitive() {
        let source = indoc! {r#"
            create table public.users (
                id bigint
            );
            create type public.mood as enum (
                'sad'
            );
            alter table only public.users
                add constraint fk_rails_0002 foreign key (id) references public.people(id);
        "#};

        let kinds: Vec<_> = scan_statements(source).into_iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StatementKind::CreateTable, StatementKind::CreateEnum, StatementKind::AlterTable]);
    }

    #[test]
    fn multi_line_alter_table_is_one_statement() {
        let source = indoc! {r#"
            ALTER TABLE ONLY public.orders
                ADD CONSTRAINT fk_rails_0003 FOREIGN KEY (user_id) REFERENCES public.users(id);
        "#};

        let statements = scan_statements(source);
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].line_number, 1);
        assert_eq!(statements[0].sql, source);
    }

    #[test]
    fn unterminated_statement_is_dropped() {
        let source = indoc! {r#"
            CREATE TABLE public.broken (
                id bigint NOT NULL,
            CREATE TYPE public.mood AS ENUM (
                'sad'
            );
        "#};

        let statements = scan_statements(source);
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].kind, StatementKind::CreateEnum);
    }

    #[test]
    fn normalizes_windows_line_endings() {
        let source = "CREATE TABLE public.users (\r\n    id bigint\r\n);\r\n";

        assert_eq!(scanned_sql(source), vec![
            (StatementKind::CreateTable, "CREATE TABLE public.users (\n    id bigint\n);\n".to_string()),
        ]);
    }

    #[test]
    fn ignores_other_statements() {
        let source = indoc! {r#"
            CREATE INDEX index_users_on_email ON public.users USING btree (email);
            CREATE VIEW public.active_users AS
             SELECT id FROM public.users;
            -- CREATE TABLE public.commented_out (
        "#};

        assert!(scan_statements(source).is_empty());
    }

    #[test]
    fn statements_are_sorted_by_start() {
        let source = indoc! {r#"
            CREATE TABLE public.a (
                id bigint
            );
            ALTER TABLE ONLY public.a
                ADD CONSTRAINT fk_rails_0004 FOREIGN KEY (b_id) REFERENCES public.b(id);
            CREATE TABLE public.b (
                id bigint
            );
        "#};

        let lines: Vec<_> = scan_statements(source).into_iter().map(|s| s.line_number).collect();
        assert_eq!(lines, vec![1, 4, 6]);
    }
}
