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

//! Statement-level tests: transaction control, PRAGMA, ATTACH/DETACH,
//! VACUUM, ANALYZE, REINDEX, EXPLAIN, and the single/multi statement entry
//! points.

mod test_utils;

use pretty_assertions::assert_eq;
use test_utils::*;

use litesql::ast::*;
use litesql::Error;

#[test]
fn parse_transaction_statements() {
    verified_stmt("BEGIN");
    verified_stmt("BEGIN DEFERRED");
    verified_stmt("BEGIN IMMEDIATE");
    verified_stmt("BEGIN EXCLUSIVE");
    one_statement_parses_to("BEGIN TRANSACTION", "BEGIN");
    one_statement_parses_to("BEGIN DEFERRED TRANSACTION", "BEGIN DEFERRED");

    verified_stmt("COMMIT");
    one_statement_parses_to("COMMIT TRANSACTION", "COMMIT");
    one_statement_parses_to("END", "COMMIT");

    verified_stmt("ROLLBACK");
    one_statement_parses_to("ROLLBACK TRANSACTION", "ROLLBACK");
    verified_stmt("ROLLBACK TO \"sp\"");
    one_statement_parses_to("ROLLBACK TO SAVEPOINT sp", "ROLLBACK TO \"sp\"");

    verified_stmt("SAVEPOINT \"sp\"");
    verified_stmt("RELEASE \"sp\"");
    one_statement_parses_to("RELEASE SAVEPOINT sp", "RELEASE \"sp\"");
}

#[test]
fn parse_pragma_statements() {
    let stmt = one_statement_parses_to("PRAGMA page_size=4096", "PRAGMA \"page_size\" = 4096");
    match stmt {
        Statement::Pragma(pragma) => match pragma.expr {
            Expr::Binary(binary) => {
                assert_eq!(binary.op, Op::Eq);
                assert_eq!(
                    *binary.left,
                    Expr::Ident(Ident::new("page_size"))
                );
                assert_eq!(
                    *binary.right,
                    Expr::Number(NumberLit {
                        value: "4096".into()
                    })
                );
            }
            expr => panic!("expected binary expression, got {:?}", expr),
        },
        stmt => panic!("expected PRAGMA, got {}", stmt),
    }

    verified_stmt("PRAGMA \"cache_size\"");
    verified_stmt("PRAGMA \"main\".\"page_size\" = 4096");
    verified_stmt("PRAGMA \"wal_checkpoint\"('TRUNCATE')");
}

#[test]
fn parse_attach_detach() {
    one_statement_parses_to(
        "ATTACH DATABASE 'test.db' AS aux",
        "ATTACH \"test.db\" AS \"aux\"",
    );
    verified_stmt("ATTACH \"test.db\" AS \"aux\"");
    stmt_parse_error("ATTACH \"test.db\"", "expected AS, found 'EOF'");

    one_statement_parses_to("DETACH DATABASE aux", "DETACH \"aux\"");
    verified_stmt("DETACH \"aux\"");
}

#[test]
fn parse_vacuum_statements() {
    verified_stmt("VACUUM");
    verified_stmt("VACUUM \"main\"");
    verified_stmt("VACUUM INTO \"backup.db\"");
    verified_stmt("VACUUM \"main\" INTO \"backup.db\"");
}

#[test]
fn parse_analyze_reindex() {
    verified_stmt("ANALYZE");
    verified_stmt("ANALYZE \"t\"");
    verified_stmt("ANALYZE \"s\".\"t\"");
    verified_stmt("REINDEX");
    verified_stmt("REINDEX \"idx\"");
    verified_stmt("REINDEX \"s\".\"idx\"");
}

#[test]
fn parse_explain_statements() {
    let stmt = verified_stmt("EXPLAIN SELECT 1");
    match stmt {
        Statement::Explain(explain) => {
            assert!(!explain.query_plan);
            assert!(matches!(*explain.stmt, Statement::Select(_)));
        }
        stmt => panic!("expected EXPLAIN, got {}", stmt),
    }

    let stmt = verified_stmt("EXPLAIN QUERY PLAN SELECT 1");
    match stmt {
        Statement::Explain(explain) => assert!(explain.query_plan),
        stmt => panic!("expected EXPLAIN, got {}", stmt),
    }

    verified_stmt("EXPLAIN DELETE FROM \"t\"");
    stmt_parse_error("EXPLAIN QUERY SELECT 1", "expected PLAN, found 'SELECT'");
}

#[test]
fn empty_input_reports_eof() {
    assert_eq!(litesql::parse_stmt(""), Err(Error::UnexpectedEof));
    assert_eq!(litesql::parse_stmt("   \n\t"), Err(Error::UnexpectedEof));
    assert_eq!(litesql::parse_stmt("-- nothing here"), Err(Error::UnexpectedEof));
    assert_eq!(litesql::parse_stmt("/* nothing */"), Err(Error::UnexpectedEof));
}

#[test]
fn trailing_semicolon_is_optional() {
    assert_eq!(
        litesql::parse_stmt("SELECT 1;").unwrap(),
        litesql::parse_stmt("SELECT 1").unwrap()
    );
}

#[test]
fn trailing_tokens_are_an_error() {
    stmt_parse_error("SELECT 1; SELECT 2", "expected EOF, found 'SELECT'");
    stmt_parse_error("SELECT 1 2", "expected semicolon or EOF, found 2");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        litesql::parse_stmt("SELECT /* inline */ 1 -- trailing\n").unwrap(),
        litesql::parse_stmt("SELECT 1").unwrap()
    );
}

#[test]
fn errors_carry_positions() {
    match litesql::parse_stmt("SELECT !") {
        Err(Error::Syntax { pos, msg }) => {
            assert_eq!(pos.offset(), 7);
            assert_eq!(msg, "expected expression, found 'ILLEGAL'");
        }
        result => panic!("expected syntax error, got {:?}", result),
    }
}

#[test]
fn parse_multi_statements() {
    let mut statements = vec![];
    litesql::parse_multi_stmt("SELECT 1; SELECT 2;", |stmt| {
        statements.push(stmt);
        Ok(())
    })
    .unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].to_string(), "SELECT 1");
    assert_eq!(statements[1].to_string(), "SELECT 2");

    // No trailing semicolon is required on the last statement.
    let mut count = 0;
    litesql::parse_multi_stmt("BEGIN; COMMIT", |_| {
        count += 1;
        Ok(())
    })
    .unwrap();
    assert_eq!(count, 2);

    // Empty input yields nothing.
    litesql::parse_multi_stmt("", |_| panic!("unexpected statement")).unwrap();
}

#[test]
fn multi_statement_stops_on_callback_error() {
    let mut count = 0;
    let result = litesql::parse_multi_stmt("SELECT 1; SELECT 2", |_| {
        count += 1;
        Err(Error::UnexpectedEof)
    });
    assert_eq!(result, Err(Error::UnexpectedEof));
    assert_eq!(count, 1);
}

#[test]
fn multi_statement_stops_on_parse_error() {
    let mut count = 0;
    let result = litesql::parse_multi_stmt("SELECT 1; BOGUS BOGUS", |_| {
        count += 1;
        Ok(())
    });
    assert!(matches!(result, Err(Error::Syntax { .. })));
    assert_eq!(count, 1);
}

#[test]
fn recursion_limit_is_enforced() {
    let sql = format!("SELECT {}1{}", "(".repeat(200), ")".repeat(200));
    let result = litesql::Parser::new(&sql).parse_statement();
    assert_eq!(result, Err(Error::RecursionLimitExceeded));

    let sql = format!("SELECT {}1{}", "(".repeat(10), ")".repeat(10));
    litesql::Parser::new(&sql)
        .with_recursion_limit(5)
        .parse_statement()
        .unwrap_err();
}
