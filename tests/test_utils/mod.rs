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

//! Shared helpers for the parser integration tests.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use litesql::ast::{Expr, Statement};

/// Parses `sql` as one statement and checks that its string form equals
/// `canonical` (and that the canonical form re-parses to an equal tree).
pub fn one_statement_parses_to(sql: &str, canonical: &str) -> Statement {
    let stmt = litesql::parse_stmt(sql)
        .unwrap_or_else(|err| panic!("parse {:?} failed: {}", sql, err));
    assert_eq!(stmt.to_string(), canonical, "printing {:?}", sql);

    let reparsed = litesql::parse_stmt(canonical)
        .unwrap_or_else(|err| panic!("reparse {:?} failed: {}", canonical, err));
    assert_eq!(reparsed, stmt, "round-tripping {:?}", sql);

    stmt
}

/// Parses `sql` as one statement and checks that it prints back unchanged.
pub fn verified_stmt(sql: &str) -> Statement {
    one_statement_parses_to(sql, sql)
}

/// Parses `sql` as an expression and checks that its string form equals
/// `canonical` (and that the canonical form re-parses to an equal tree).
pub fn expr_parses_to(sql: &str, canonical: &str) -> Expr {
    let expr = litesql::parse_expr(sql)
        .unwrap_or_else(|err| panic!("parse {:?} failed: {}", sql, err))
        .unwrap_or_else(|| panic!("no expression in {:?}", sql));
    assert_eq!(expr.to_string(), canonical, "printing {:?}", sql);

    let reparsed = litesql::parse_expr(canonical)
        .unwrap_or_else(|err| panic!("reparse {:?} failed: {}", canonical, err))
        .unwrap();
    assert_eq!(reparsed, expr, "round-tripping {:?}", sql);

    expr
}

/// Parses `sql` as an expression and checks that it prints back unchanged.
pub fn verified_expr(sql: &str) -> Expr {
    expr_parses_to(sql, sql)
}

/// Asserts that parsing `sql` as a statement fails with the given message.
pub fn stmt_parse_error(sql: &str, want: &str) {
    match litesql::parse_stmt(sql) {
        Ok(stmt) => panic!("expected error parsing {:?}, got {}", sql, stmt),
        Err(litesql::Error::Syntax { msg, .. }) => {
            assert_eq!(msg, want, "error for {:?}", sql);
        }
        Err(err) => panic!("expected syntax error parsing {:?}, got {:?}", sql, err),
    }
}

/// Asserts that parsing `sql` as an expression fails with the given
/// message.
pub fn expr_parse_error(sql: &str, want: &str) {
    match litesql::parse_expr(sql) {
        Ok(expr) => panic!("expected error parsing {:?}, got {:?}", sql, expr),
        Err(litesql::Error::Syntax { msg, .. }) => {
            assert_eq!(msg, want, "error for {:?}", sql);
        }
        Err(err) => panic!("expected syntax error parsing {:?}, got {:?}", sql, err),
    }
}
