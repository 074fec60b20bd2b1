// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Schema statement tests: CREATE/DROP/ALTER and constraints.

mod test_utils;

use pretty_assertions::assert_eq;
use test_utils::*;

use litesql::ast::*;

#[test]
fn parse_create_table() {
    let stmt = one_statement_parses_to(
        "CREATE TABLE t (a INTEGER PRIMARY KEY AUTOINCREMENT, b TEXT NOT NULL)",
        "CREATE TABLE \"t\" (\"a\" INTEGER PRIMARY KEY AUTOINCREMENT, \"b\" TEXT NOT NULL)",
    );
    let stmt = match stmt {
        Statement::CreateTable(stmt) => *stmt,
        stmt => panic!("expected CREATE TABLE, got {}", stmt),
    };

    assert_eq!(stmt.columns.len(), 2);

    let first = &stmt.columns[0];
    assert_eq!(first.name.name, "a");
    assert_eq!(first.col_type.as_ref().unwrap().name.name, "INTEGER");
    match &first.constraints[0] {
        Constraint::PrimaryKey(pk) => assert!(pk.autoincrement),
        constraint => panic!("expected primary key, got {:?}", constraint),
    }

    let second = &stmt.columns[1];
    assert_eq!(second.name.name, "b");
    assert!(matches!(&second.constraints[0], Constraint::NotNull(_)));
}

#[test]
fn parse_create_table_variants() {
    verified_stmt("CREATE TABLE IF NOT EXISTS \"t\" (\"a\")");
    verified_stmt("CREATE TEMP TABLE \"t\" (\"a\")");
    verified_stmt("CREATE TABLE \"s\".\"t\" (\"a\")");
    verified_stmt("CREATE TABLE \"t\" AS SELECT 1");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER) WITHOUT ROWID");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER) STRICT");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER) WITHOUT ROWID, STRICT");
    stmt_parse_error(
        "CREATE TABLE \"t\"",
        "expected AS or left paren, found 'EOF'",
    );
}

#[test]
fn parse_column_constraints() {
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER CONSTRAINT \"pk\" PRIMARY KEY DESC)");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER NOT NULL ON CONFLICT REPLACE)");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER UNIQUE ON CONFLICT ROLLBACK)");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER CHECK (\"a\" > 0))");
    verified_stmt("CREATE TABLE \"t\" (\"a\" TEXT DEFAULT 'x')");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER DEFAULT -1)");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER DEFAULT (1 + 2))");
    verified_stmt("CREATE TABLE \"t\" (\"a\" TEXT COLLATE \"NOCASE\")");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER AS (\"b\" + 1) STORED)");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER AS (\"b\" + 1) VIRTUAL)");
    // GENERATED ALWAYS normalizes to the bare AS form.
    one_statement_parses_to(
        "CREATE TABLE t (a INTEGER GENERATED ALWAYS AS (b + 1))",
        "CREATE TABLE \"t\" (\"a\" INTEGER AS (\"b\" + 1))",
    );
}

#[test]
fn double_quoted_default_is_a_string() {
    // Double quotes normally mean identifiers, but a DEFAULT value keeps
    // SQLite's double-quoted-string compatibility.
    one_statement_parses_to(
        "CREATE TABLE t (a TEXT DEFAULT \"x\")",
        "CREATE TABLE \"t\" (\"a\" TEXT DEFAULT 'x')",
    );
}

#[test]
fn parse_table_constraints() {
    verified_stmt("CREATE TABLE \"t\" (\"a\", \"b\", PRIMARY KEY (\"a\", \"b\"))");
    verified_stmt("CREATE TABLE \"t\" (\"a\", UNIQUE (\"a\" DESC))");
    verified_stmt("CREATE TABLE \"t\" (\"a\", CONSTRAINT \"ck\" CHECK (\"a\" > 0))");
    verified_stmt(
        "CREATE TABLE \"t\" (\"a\", FOREIGN KEY (\"a\") REFERENCES \"u\" (\"id\") ON DELETE CASCADE)",
    );
}

#[test]
fn parse_foreign_key_constraints() {
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\")");
    verified_stmt("CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\" (\"id\"))");
    verified_stmt(
        "CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\" ON UPDATE SET NULL ON DELETE NO ACTION)",
    );
    verified_stmt(
        "CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\" ON DELETE SET DEFAULT DEFERRABLE INITIALLY DEFERRED)",
    );
    verified_stmt(
        "CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\" ON UPDATE RESTRICT NOT DEFERRABLE INITIALLY IMMEDIATE)",
    );
    stmt_parse_error(
        "CREATE TABLE \"t\" (\"a\" INTEGER REFERENCES \"u\" ON COMMIT)",
        "expected UPDATE or DELETE, found 'COMMIT'",
    );
}

#[test]
fn conflict_clause_requires_a_resolution() {
    stmt_parse_error(
        "CREATE TABLE \"t\" (\"a\" INTEGER NOT NULL ON CONFLICT EXPLODE)",
        "expected ROLLBACK, ABORT, FAIL, IGNORE or REPLACE, found EXPLODE",
    );
}

#[test]
fn parse_create_virtual_table() {
    verified_stmt("CREATE VIRTUAL TABLE \"vt\" USING \"fts5\" (\"content\")");
    verified_stmt("CREATE VIRTUAL TABLE IF NOT EXISTS \"vt\" USING \"fts5\" (\"a\",\"b\")");
    verified_stmt("CREATE VIRTUAL TABLE \"vt\" USING \"mod\"");
    verified_stmt("CREATE VIRTUAL TABLE \"vt\" USING \"mod\" (\"id\" INTEGER)");
    verified_stmt("CREATE VIRTUAL TABLE \"vt\" USING \"mod\" (\"x\"=1)");
    // Keywords and literals are allowed as argument names.
    one_statement_parses_to(
        "CREATE VIRTUAL TABLE vt USING mod (select)",
        "CREATE VIRTUAL TABLE \"vt\" USING \"mod\" (\"select\")",
    );
}

#[test]
fn parse_create_index() {
    verified_stmt("CREATE INDEX \"idx\" ON \"t\" (\"a\")");
    verified_stmt("CREATE UNIQUE INDEX \"idx\" ON \"t\" (\"a\" ASC, \"b\" DESC)");
    verified_stmt("CREATE INDEX IF NOT EXISTS \"idx\" ON \"t\" (\"a\") WHERE \"a\" > 0");
    verified_stmt("CREATE INDEX \"idx\" ON \"t\" (\"a\" + \"b\")");
    stmt_parse_error("CREATE INDEX \"idx\" \"t\"", "expected ON, found t");
}

#[test]
fn parse_create_view() {
    verified_stmt("CREATE VIEW \"v\" AS SELECT 1");
    verified_stmt("CREATE TEMP VIEW IF NOT EXISTS \"v\" (\"a\", \"b\") AS SELECT 1, 2");
    stmt_parse_error("CREATE VIEW \"v\" SELECT 1", "expected AS, found 'SELECT'");
}

#[test]
fn parse_create_trigger() {
    verified_stmt(
        "CREATE TRIGGER \"trg\" AFTER INSERT ON \"t\" BEGIN SELECT 1; END",
    );
    verified_stmt(
        "CREATE TRIGGER \"trg\" BEFORE UPDATE OF \"a\", \"b\" ON \"t\" FOR EACH ROW WHEN 1 BEGIN UPDATE \"u\" SET \"x\" = 1; END",
    );
    verified_stmt(
        "CREATE TEMP TRIGGER IF NOT EXISTS \"trg\" INSTEAD OF DELETE ON \"v\" BEGIN DELETE FROM \"log\"; INSERT INTO \"log\" (\"msg\") VALUES ('x'); END",
    );
    stmt_parse_error(
        "CREATE TRIGGER \"trg\" AFTER TRUNCATE ON \"t\" BEGIN SELECT 1; END",
        "expected DELETE, INSERT, or UPDATE, found TRUNCATE",
    );
}

#[test]
fn trigger_bodies_reject_order_by_and_limit() {
    stmt_parse_error(
        "CREATE TRIGGER \"trg\" AFTER INSERT ON \"t\" BEGIN UPDATE \"u\" SET \"x\" = 1 ORDER BY \"x\" LIMIT 1; END",
        "expected ORDER BY or LIMIT in a UPDATE statement, found 'ORDER'",
    );
    stmt_parse_error(
        "CREATE TRIGGER \"trg\" AFTER INSERT ON \"t\" BEGIN DELETE FROM \"u\" LIMIT 1; END",
        "expected ORDER BY or LIMIT in a DELETE statement, found 'LIMIT'",
    );
    stmt_parse_error(
        "CREATE TRIGGER \"trg\" AFTER INSERT ON \"t\" BEGIN INSERT INTO \"u\" DEFAULT VALUES; END",
        "expected non-DEFAULT VALUES, found 'DEFAULT'",
    );
}

#[test]
fn parse_drop_statements() {
    verified_stmt("DROP TABLE \"t\"");
    verified_stmt("DROP TABLE IF EXISTS \"s\".\"t\"");
    verified_stmt("DROP VIEW \"v\"");
    verified_stmt("DROP VIEW IF EXISTS \"v\"");
    verified_stmt("DROP INDEX \"idx\"");
    verified_stmt("DROP INDEX IF EXISTS \"idx\"");
    verified_stmt("DROP TRIGGER \"trg\"");
    verified_stmt("DROP TRIGGER IF EXISTS \"trg\"");
    stmt_parse_error("DROP BOGUS", "expected TABLE, VIEW, INDEX, or TRIGGER");
}

#[test]
fn parse_alter_table() {
    verified_stmt("ALTER TABLE \"t\" RENAME TO \"u\"");
    verified_stmt("ALTER TABLE \"s\".\"t\" RENAME COLUMN \"a\" TO \"b\"");
    one_statement_parses_to(
        "ALTER TABLE t RENAME a TO b",
        "ALTER TABLE \"t\" RENAME COLUMN \"a\" TO \"b\"",
    );
    verified_stmt("ALTER TABLE \"t\" ADD COLUMN \"c\" INTEGER NOT NULL");
    one_statement_parses_to(
        "ALTER TABLE t ADD c INTEGER",
        "ALTER TABLE \"t\" ADD COLUMN \"c\" INTEGER",
    );
    stmt_parse_error("ALTER TABLE \"t\" DROP \"a\"", "expected ADD or RENAME, found 'DROP'");
}

#[test]
fn create_dispatch_errors() {
    stmt_parse_error("CREATE BOGUS", "expected TABLE, VIEW, INDEX, TRIGGER");
    stmt_parse_error("CREATE TEMP BOGUS", "expected TABLE, VIEW, or TRIGGER");
}
