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

//! DML tests: INSERT (upsert, RETURNING), UPDATE, DELETE.

mod test_utils;

use pretty_assertions::assert_eq;
use test_utils::*;

use litesql::ast::*;

fn insert_of(stmt: Statement) -> InsertStatement {
    match stmt {
        Statement::Insert(insert) => *insert,
        stmt => panic!("expected INSERT, got {}", stmt),
    }
}

#[test]
fn parse_insert_values() {
    let insert = insert_of(verified_stmt(
        "INSERT INTO \"t\" (\"a\", \"b\") VALUES (1, 2), (3, 4)",
    ));
    assert_eq!(insert.columns.len(), 2);
    assert_eq!(insert.value_lists.len(), 2);
    assert!(!insert.replace);
    assert!(insert.or_conflict.is_none());
}

#[test]
fn parse_insert_forms() {
    verified_stmt("REPLACE INTO \"t\" VALUES (1)");
    verified_stmt("INSERT OR ROLLBACK INTO \"t\" VALUES (1)");
    verified_stmt("INSERT OR REPLACE INTO \"t\" VALUES (1)");
    verified_stmt("INSERT OR ABORT INTO \"t\" VALUES (1)");
    verified_stmt("INSERT OR FAIL INTO \"t\" VALUES (1)");
    verified_stmt("INSERT OR IGNORE INTO \"t\" VALUES (1)");
    verified_stmt("INSERT INTO \"t\" SELECT * FROM \"u\"");
    verified_stmt("INSERT INTO \"s\".\"t\" AS \"u\" VALUES (1)");

    let insert = insert_of(verified_stmt("INSERT INTO \"t\" DEFAULT VALUES"));
    assert!(insert.default_values);

    stmt_parse_error(
        "INSERT OR BOGUS INTO \"t\" VALUES (1)",
        "expected ROLLBACK, REPLACE, ABORT, FAIL, or IGNORE, found BOGUS",
    );
    stmt_parse_error(
        "INSERT INTO \"t\"",
        "expected VALUES, SELECT, or DEFAULT VALUES, found 'EOF'",
    );
}

#[test]
fn parse_upsert_clauses() {
    let insert = insert_of(verified_stmt(
        "INSERT INTO \"t\" (\"a\") VALUES (1) ON CONFLICT DO NOTHING",
    ));
    assert_eq!(insert.upsert.unwrap().action, UpsertAction::Nothing);

    let insert = insert_of(verified_stmt(
        "INSERT INTO \"t\" (\"a\") VALUES (1) ON CONFLICT (\"a\") WHERE \"a\" > 0 DO UPDATE SET \"b\" = 2 WHERE \"c\" = 3",
    ));
    let upsert = insert.upsert.unwrap();
    assert_eq!(upsert.columns.len(), 1);
    assert!(upsert.where_expr.is_some());
    match upsert.action {
        UpsertAction::UpdateSet {
            assignments,
            where_expr,
        } => {
            assert_eq!(assignments.len(), 1);
            assert!(where_expr.is_some());
        }
        action => panic!("expected DO UPDATE SET, got {:?}", action),
    }

    // Tuple assignment targets.
    verified_stmt(
        "INSERT INTO \"t\" VALUES (1) ON CONFLICT DO UPDATE SET (\"a\", \"b\") = (1, 2)",
    );

    stmt_parse_error(
        "INSERT INTO \"t\" VALUES (1) ON CONFLICT DO PANIC",
        "expected NOTHING or UPDATE SET, found PANIC",
    );
}

#[test]
fn parse_returning_clauses() {
    verified_stmt("INSERT INTO \"t\" VALUES (1) RETURNING *");
    verified_stmt("INSERT INTO \"t\" VALUES (1) RETURNING \"a\" AS \"x\", \"b\"");
    verified_stmt("UPDATE \"t\" SET \"a\" = 1 RETURNING \"rowid\"");
    verified_stmt("DELETE FROM \"t\" RETURNING *");
    stmt_parse_error(
        "DELETE FROM \"t\" RETURNING",
        "expected expression, found 'EOF'",
    );
}

#[test]
fn parse_update_statements() {
    verified_stmt("UPDATE \"t\" SET \"a\" = 1");
    verified_stmt("UPDATE OR IGNORE \"t\" SET \"a\" = 1");
    verified_stmt("UPDATE \"t\" SET \"a\" = 1, \"b\" = 2 WHERE \"c\" = 3");
    verified_stmt("UPDATE \"t\" AS \"u\" INDEXED BY \"i\" SET \"a\" = 1");
    verified_stmt("UPDATE \"t\" SET \"a\" = 1 ORDER BY \"a\" LIMIT 10");
    verified_stmt("UPDATE \"t\" SET \"a\" = 1 LIMIT 10 OFFSET 5");

    stmt_parse_error(
        "UPDATE \"t\" SET \"a\" = 1 ORDER BY \"a\"",
        "expected LIMIT, found 'EOF'",
    );
    stmt_parse_error("UPDATE \"t\" \"a\" = 1", "expected SET, found a");
}

#[test]
fn parse_delete_statements() {
    verified_stmt("DELETE FROM \"t\"");
    verified_stmt("DELETE FROM \"t\" WHERE \"a\" = 1");
    verified_stmt("DELETE FROM \"t\" ORDER BY \"a\" DESC LIMIT 2 OFFSET 3");
    one_statement_parses_to(
        "DELETE FROM t LIMIT 2, 3",
        "DELETE FROM \"t\" LIMIT 2 OFFSET 3",
    );
    stmt_parse_error("DELETE \"t\"", "expected FROM, found t");
}
