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

//! SELECT parsing tests: result columns, sources and joins, CTEs,
//! compounds, windows, and ordering.

mod test_utils;

use pretty_assertions::assert_eq;
use test_utils::*;

use litesql::ast::*;

fn select_of(stmt: Statement) -> SelectStatement {
    match stmt {
        Statement::Select(select) => *select,
        stmt => panic!("expected SELECT, got {}", stmt),
    }
}

#[test]
fn parse_select_star() {
    let select = select_of(verified_stmt("SELECT * FROM \"t\""));
    assert_eq!(select.columns.len(), 1);
    assert!(select.columns[0].star);
    match select.source {
        Some(Source::Table(name)) => assert_eq!(name.name.name, "t"),
        source => panic!("expected table source, got {:?}", source),
    }
}

#[test]
fn select_arithmetic_precedence() {
    let select = select_of(verified_stmt("SELECT 1 + 2 * 3"));
    match select.columns[0].expr.as_ref().unwrap() {
        Expr::Binary(add) => {
            assert_eq!(add.op, Op::Plus);
            assert_eq!(add.left.to_string(), "1");
            match add.right.as_ref() {
                Expr::Binary(mul) => {
                    assert_eq!(mul.op, Op::Multiply);
                    assert_eq!(mul.left.to_string(), "2");
                    assert_eq!(mul.right.to_string(), "3");
                }
                expr => panic!("expected multiplication, got {:?}", expr),
            }
        }
        expr => panic!("expected addition, got {:?}", expr),
    }
}

#[test]
fn select_where_in_list() {
    let stmt = one_statement_parses_to(
        "SELECT * FROM t WHERE x IN (1,2,3)",
        "SELECT * FROM \"t\" WHERE \"x\" IN (1, 2, 3)",
    );
    let select = select_of(stmt);
    match select.where_expr {
        Some(Expr::In(in_expr)) => {
            assert_eq!(in_expr.op, Op::In);
            assert_eq!(in_expr.values.unwrap().exprs.len(), 3);
        }
        expr => panic!("expected IN, got {:?}", expr),
    }
}

#[test]
fn parse_with_clause() {
    let stmt = verified_stmt("WITH \"c\" (\"x\") AS (SELECT 1) SELECT \"x\" FROM \"c\"");
    let select = select_of(stmt);
    let with = select.with.unwrap();
    assert!(!with.recursive);
    assert_eq!(with.ctes.len(), 1);
    let cte = &with.ctes[0];
    assert_eq!(cte.table_name.name, "c");
    assert_eq!(cte.columns.len(), 1);
    assert_eq!(cte.columns[0].name, "x");
    assert_eq!(cte.select.to_string(), "SELECT 1");

    verified_stmt("WITH RECURSIVE \"c\" AS (SELECT 1) SELECT * FROM \"c\"");
}

#[test]
fn with_threads_into_other_statements() {
    verified_stmt("WITH \"c\" AS (SELECT 1) INSERT INTO \"t\" SELECT * FROM \"c\"");
    verified_stmt("WITH \"c\" AS (SELECT 1) UPDATE \"t\" SET \"a\" = 1");
    verified_stmt("WITH \"c\" AS (SELECT 1) DELETE FROM \"t\"");
    stmt_parse_error(
        "WITH \"c\" AS (SELECT 1) DROP TABLE \"t\"",
        "expected SELECT, VALUES, INSERT, REPLACE, UPDATE, or DELETE, found 'DROP'",
    );
}

#[test]
fn joins_nest_to_the_right() {
    let stmt = one_statement_parses_to(
        "SELECT * FROM x INNER JOIN y ON true INNER JOIN z ON false",
        "SELECT * FROM \"x\" INNER JOIN \"y\" ON TRUE INNER JOIN \"z\" ON FALSE",
    );
    let select = select_of(stmt);

    // The parser rewrites the left-recursive input into a right-leaning
    // tree: Join(x, Join(y, z, ON false), ON true).
    let outer = match select.source.unwrap() {
        Source::Join(join) => join,
        source => panic!("expected join, got {:?}", source),
    };
    assert!(outer.operator.inner);
    assert_eq!(outer.left.to_string(), "\"x\"");
    match &outer.constraint {
        Some(JoinConstraint::On(on)) => assert_eq!(on.expr.to_string(), "TRUE"),
        constraint => panic!("expected ON, got {:?}", constraint),
    }

    let inner = match outer.right {
        Source::Join(join) => join,
        source => panic!("expected nested join, got {:?}", source),
    };
    assert_eq!(inner.left.to_string(), "\"y\"");
    assert_eq!(inner.right.to_string(), "\"z\"");
    match &inner.constraint {
        Some(JoinConstraint::On(on)) => assert_eq!(on.expr.to_string(), "FALSE"),
        constraint => panic!("expected ON, got {:?}", constraint),
    }
}

#[test]
fn parse_join_operators() {
    verified_stmt("SELECT * FROM \"a\", \"b\"");
    verified_stmt("SELECT * FROM \"a\", \"b\", \"c\", \"d\"");
    verified_stmt("SELECT * FROM \"a\" NATURAL JOIN \"b\"");
    verified_stmt("SELECT * FROM \"a\" LEFT JOIN \"b\" ON TRUE");
    verified_stmt("SELECT * FROM \"a\" LEFT OUTER JOIN \"b\" ON TRUE");
    verified_stmt("SELECT * FROM \"a\" INNER JOIN \"b\" USING (\"id\", \"x\")");
    verified_stmt("SELECT * FROM \"a\" CROSS JOIN \"b\"");
    stmt_parse_error(
        "SELECT * FROM \"a\" NATURAL \"b\"",
        "expected JOIN, found b",
    );
}

#[test]
fn right_and_full_joins_keep_their_direction() {
    let select = select_of(verified_stmt("SELECT * FROM \"a\" RIGHT OUTER JOIN \"b\" ON TRUE"));
    match select.source.unwrap() {
        Source::Join(join) => {
            assert!(join.operator.right);
            assert!(join.operator.outer);
            assert!(!join.operator.left);
        }
        source => panic!("expected join, got {:?}", source),
    }

    let select = select_of(verified_stmt("SELECT * FROM \"a\" FULL JOIN \"b\" ON TRUE"));
    match select.source.unwrap() {
        Source::Join(join) => {
            assert!(join.operator.full);
            assert!(!join.operator.left);
        }
        source => panic!("expected join, got {:?}", source),
    }
}

#[test]
fn parse_sources() {
    verified_stmt("SELECT * FROM \"s\".\"t\"");
    verified_stmt("SELECT * FROM \"t\" AS \"u\"");
    one_statement_parses_to("SELECT * FROM t u", "SELECT * FROM \"t\" AS \"u\"");
    verified_stmt("SELECT * FROM \"t\" AS \"u\" INDEXED BY \"idx\"");
    verified_stmt("SELECT * FROM \"t\" NOT INDEXED");
    verified_stmt("SELECT * FROM \"generate_series\"(1, 10)");
    verified_stmt("SELECT * FROM (SELECT 1) AS \"sub\"");
    verified_stmt("SELECT * FROM (\"a\", \"b\") AS \"pair\"");
}

#[test]
fn parse_result_columns() {
    verified_stmt("SELECT \"t\".* FROM \"t\"");
    one_statement_parses_to(
        "SELECT a x, b AS y FROM t",
        "SELECT \"a\" AS \"x\", \"b\" AS \"y\" FROM \"t\"",
    );
    stmt_parse_error("SELECT \"a\" AS 1", "expected column alias, found 1");
}

#[test]
fn parse_select_quantifiers() {
    let select = select_of(verified_stmt("SELECT DISTINCT \"a\" FROM \"t\""));
    assert_eq!(select.quantifier, Some(SelectQuantifier::Distinct));
    let select = select_of(verified_stmt("SELECT ALL \"a\" FROM \"t\""));
    assert_eq!(select.quantifier, Some(SelectQuantifier::All));
}

#[test]
fn parse_group_by_having() {
    let select = select_of(verified_stmt(
        "SELECT \"a\", \"count\"(*) FROM \"t\" GROUP BY \"a\" HAVING \"count\"(*) > 1",
    ));
    assert_eq!(select.group_by.len(), 1);
    assert!(select.having.is_some());
}

#[test]
fn parse_values_statement() {
    let select = select_of(verified_stmt("VALUES (1, 2), (3, 4)"));
    assert_eq!(select.values.len(), 2);
    assert_eq!(select.values[0].exprs.len(), 2);
}

#[test]
fn parse_compound_selects() {
    let select = select_of(verified_stmt("SELECT 1 UNION SELECT 2"));
    let compound = select.compound.unwrap();
    assert_eq!(compound.op, CompoundOperator::Union);

    verified_stmt("SELECT 1 UNION ALL SELECT 2");
    verified_stmt("SELECT 1 INTERSECT SELECT 2");
    verified_stmt("SELECT 1 EXCEPT SELECT 2");

    // ORDER BY and LIMIT attach to the outermost select.
    let select = select_of(verified_stmt(
        "SELECT \"a\" FROM \"t\" UNION SELECT \"b\" FROM \"u\" ORDER BY 1 LIMIT 5",
    ));
    assert_eq!(select.order_by.len(), 1);
    assert!(select.limit.is_some());
    let compound = select.compound.unwrap();
    assert!(compound.select.order_by.is_empty());
    assert!(compound.select.limit.is_none());
}

#[test]
fn parse_order_by() {
    let select = select_of(verified_stmt(
        "SELECT * FROM \"t\" ORDER BY \"a\" DESC NULLS LAST, \"b\" ASC",
    ));
    assert_eq!(select.order_by.len(), 2);
    assert_eq!(select.order_by[0].direction, Some(SortDirection::Desc));
    assert_eq!(select.order_by[0].nulls, Some(NullsOrder::Last));
    stmt_parse_error(
        "SELECT * FROM \"t\" ORDER BY \"a\" NULLS SOMETIMES",
        "expected FIRST or LAST, found SOMETIMES",
    );
}

#[test]
fn parse_limit_offset() {
    let select = select_of(verified_stmt("SELECT * FROM \"t\" LIMIT 10"));
    assert!(select.limit.is_some() && select.offset.is_none());

    let select = select_of(verified_stmt("SELECT * FROM \"t\" LIMIT 10 OFFSET 5"));
    assert_eq!(select.offset.unwrap().to_string(), "5");

    // The comma form swaps in the offset.
    let stmt = one_statement_parses_to(
        "SELECT * FROM t LIMIT 10, 5",
        "SELECT * FROM \"t\" LIMIT 10 OFFSET 5",
    );
    let select = select_of(stmt);
    assert_eq!(select.limit.unwrap().to_string(), "10");
    assert_eq!(select.offset.unwrap().to_string(), "5");
}

#[test]
fn parse_window_clause() {
    let select = select_of(verified_stmt(
        "SELECT \"sum\"(\"x\") OVER \"w\" FROM \"t\" WINDOW \"w\" AS (PARTITION BY \"a\" ORDER BY \"b\")",
    ));
    assert_eq!(select.windows.len(), 1);
    let window = &select.windows[0];
    assert_eq!(window.name.name, "w");
    assert_eq!(window.definition.partitions.len(), 1);
    assert_eq!(window.definition.order_by.len(), 1);
}

#[test]
fn parse_window_base_names() {
    let select = select_of(verified_stmt(
        "SELECT \"f\"() OVER (\"base\" ORDER BY \"x\") FROM \"t\"",
    ));
    match select.columns[0].expr.as_ref().unwrap() {
        Expr::Call(call) => {
            let definition = call.over_window.as_ref().unwrap();
            assert_eq!(definition.base.as_ref().unwrap().name, "base");
        }
        expr => panic!("expected call, got {:?}", expr),
    }
}

#[test]
fn parse_frame_specs() {
    verified_stmt("SELECT \"f\"() OVER (ROWS UNBOUNDED PRECEDING) FROM \"t\"");
    verified_stmt("SELECT \"f\"() OVER (RANGE CURRENT ROW) FROM \"t\"");
    verified_stmt("SELECT \"f\"() OVER (ROWS 1 PRECEDING) FROM \"t\"");
    verified_stmt(
        "SELECT \"f\"() OVER (ROWS BETWEEN 1 PRECEDING AND 1 FOLLOWING EXCLUDE CURRENT ROW) FROM \"t\"",
    );
    verified_stmt(
        "SELECT \"f\"() OVER (GROUPS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING) FROM \"t\"",
    );
    verified_stmt(
        "SELECT \"f\"() OVER (RANGE BETWEEN CURRENT ROW AND CURRENT ROW EXCLUDE NO OTHERS) FROM \"t\"",
    );
    verified_stmt("SELECT \"f\"() OVER (ROWS CURRENT ROW EXCLUDE GROUP) FROM \"t\"");
    verified_stmt("SELECT \"f\"() OVER (ROWS CURRENT ROW EXCLUDE TIES) FROM \"t\"");

    // A FOLLOWING start boundary requires the BETWEEN form.
    stmt_parse_error(
        "SELECT \"f\"() OVER (ROWS 1 FOLLOWING) FROM \"t\"",
        "expected PRECEDING, found 'FOLLOWING'",
    );
    // "1 AND 2" scans as one expression, so the boundary keyword is
    // reported missing at the closing paren.
    stmt_parse_error(
        "SELECT \"f\"() OVER (ROWS BETWEEN 1 AND 2) FROM \"t\"",
        "expected PRECEDING or FOLLOWING, found ')'",
    );
}

#[test]
fn select_missing_expression_errors() {
    stmt_parse_error("SELECT FROM \"t\"", "expected expression, found 'FROM'");
    stmt_parse_error("SELECT * FROM", "expected qualified name, found 'EOF'");
}
