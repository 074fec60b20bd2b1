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

//! Walker tests: pre-order traversal, short-circuiting, and the two
//! classic applications (collecting table names, classifying read-only
//! statements).

mod test_utils;

use pretty_assertions::assert_eq;
use test_utils::*;

use litesql::ast::*;

fn label(node: NodeRef) -> String {
    let kind = match node {
        NodeRef::Statement(_) => "statement",
        NodeRef::Expr(_) => "expr",
        NodeRef::Source(_) => "source",
        NodeRef::SelectStatement(_) => "select",
        NodeRef::Ident(_) => "ident",
        NodeRef::ResultColumn(_) => "result-column",
        NodeRef::JoinConstraint(_) => "join-constraint",
        NodeRef::JoinOperator(_) => "join-operator",
        _ => "other",
    };
    format!("{}: {}", kind, node)
}

#[test]
fn walk_visits_nodes_pre_order() {
    let stmt = verified_stmt("SELECT \"a\" FROM \"t\" WHERE \"x\" = 1");

    let mut visited = vec![];
    let finished = walk(&stmt, |node| {
        visited.push(label(node));
        true
    });
    assert!(finished);

    let expected = vec![
        "statement: SELECT \"a\" FROM \"t\" WHERE \"x\" = 1",
        "result-column: \"a\"",
        "expr: \"a\"",
        "source: \"t\"",
        "ident: \"t\"",
        "expr: \"x\" = 1",
        "expr: \"x\"",
        "expr: 1",
    ];
    assert_eq!(visited, expected);
}

#[test]
fn walk_visits_join_structure() {
    let stmt = verified_stmt("SELECT * FROM \"a\" INNER JOIN \"b\" ON TRUE");

    let mut visited = vec![];
    walk(&stmt, |node| {
        visited.push(label(node));
        true
    });

    let expected = vec![
        "statement: SELECT * FROM \"a\" INNER JOIN \"b\" ON TRUE",
        "result-column: *",
        "source: \"a\" INNER JOIN \"b\" ON TRUE",
        "source: \"a\"",
        "ident: \"a\"",
        "join-operator:  INNER JOIN ",
        "source: \"b\"",
        "ident: \"b\"",
        "join-constraint: ON TRUE",
        "expr: TRUE",
    ];
    assert_eq!(visited, expected);
}

#[test]
fn walk_short_circuits() {
    let stmt = verified_stmt("SELECT \"a\" FROM \"t\" WHERE \"x\" = 1");

    let mut total = 0;
    walk(&stmt, |_| {
        total += 1;
        true
    });
    assert_eq!(total, 8);

    // Aborting at node k visits exactly the prefix up to and including k.
    for k in 1..=total {
        let mut visited = 0;
        let finished = walk(&stmt, |_| {
            visited += 1;
            visited < k
        });
        assert!(!finished);
        assert_eq!(visited, k);
    }
}

#[test]
fn walk_is_deterministic() {
    let stmt = verified_stmt(
        "WITH \"c\" AS (SELECT 1) SELECT \"a\", \"count\"(*) FROM \"t\" GROUP BY \"a\" ORDER BY 2 LIMIT 10",
    );

    let collect = |stmt: &Statement| {
        let mut visited = vec![];
        walk(stmt, |node| {
            visited.push(label(node));
            true
        });
        visited
    };
    assert_eq!(collect(&stmt), collect(&stmt));
}

#[test]
fn collect_table_names() {
    let stmt = verified_stmt(
        "SELECT * FROM \"a\" INNER JOIN \"b\" ON TRUE WHERE \"x\" IN (SELECT \"y\" FROM \"c\")",
    );

    let mut tables = vec![];
    visit_sources(&stmt, |source| {
        if let Source::Table(name) = source {
            tables.push(name.name.name.clone());
        }
        true
    });
    assert_eq!(tables, ["a", "b", "c"]);
}

#[test]
fn visit_expressions_yields_walk_order() {
    let stmt = verified_stmt("SELECT \"a\" FROM \"t\" WHERE \"x\" = 1");

    let mut exprs = vec![];
    visit_expressions(&stmt, |expr| {
        exprs.push(expr.to_string());
        true
    });
    assert_eq!(exprs, ["\"a\"", "\"x\" = 1", "\"x\"", "1"]);
}

#[test]
fn classify_read_only_statements() {
    fn is_read_only(stmt: &Statement) -> bool {
        let mut read_only = true;
        visit_statements(stmt, |stmt| {
            if !matches!(stmt, Statement::Select(_) | Statement::Explain(_)) {
                read_only = false;
                return false;
            }
            true
        });
        read_only
    }

    assert!(is_read_only(&verified_stmt("SELECT * FROM \"t\"")));
    assert!(is_read_only(&verified_stmt("EXPLAIN SELECT 1")));
    assert!(!is_read_only(&verified_stmt("INSERT INTO \"t\" VALUES (1)")));
    assert!(!is_read_only(&verified_stmt("DROP TABLE \"t\"")));
    // Trigger bodies nest statements; the walker reaches them.
    assert!(!is_read_only(&verified_stmt(
        "CREATE TRIGGER \"trg\" AFTER INSERT ON \"t\" BEGIN DELETE FROM \"u\"; END",
    )));
}

#[test]
fn walk_reaches_nested_selects() {
    let stmt = verified_stmt("INSERT INTO \"t\" SELECT * FROM \"u\"");

    let mut selects = 0;
    walk(&stmt, |node| {
        if matches!(node, NodeRef::SelectStatement(_)) {
            selects += 1;
        }
        true
    });
    assert_eq!(selects, 1);
}
