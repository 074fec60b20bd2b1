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

//! Query parsing: SELECT/VALUES, result columns, FROM sources and joins,
//! common table expressions, windows, and ordering terms.

use crate::ast::*;
use crate::parser::{Error, Parser};
use crate::tokenizer::Token;

impl<'a> Parser<'a> {
    /// Parses a `SELECT` or `VALUES` statement. When `compounded` is set
    /// the statement is the right-hand side of a compound operator, so
    /// WITH, ORDER BY, and LIMIT/OFFSET are left for the outermost select.
    pub(crate) fn parse_select_statement(
        &mut self,
        compounded: bool,
        with: Option<WithClause>,
    ) -> Result<SelectStatement, Error> {
        let mut stmt = SelectStatement {
            with,
            ..SelectStatement::default()
        };

        // Parse the optional "WITH [RECURSIVE] cte, cte, ...". Generic
        // statement parsing reads the WITH clause itself and passes it in;
        // this path serves nested selects.
        if !compounded && stmt.with.is_none() && self.peek() == Token::With {
            stmt.with = Some(self.parse_with_clause()?);
        }

        match self.peek() {
            Token::Values => {
                self.scan();

                loop {
                    let mut list = ExprList::default();
                    if self.peek() != Token::LParen {
                        return Err(self.error_expected(self.pos, "left paren"));
                    }
                    self.scan();

                    loop {
                        list.exprs.push(self.parse_expression()?);

                        if self.peek() == Token::RParen {
                            break;
                        } else if self.peek() != Token::Comma {
                            return Err(self.error_expected(self.pos, "comma or right paren"));
                        }
                        self.scan();
                    }
                    self.scan();
                    stmt.values.push(list);

                    if self.peek() != Token::Comma {
                        break;
                    }
                    self.scan();
                }
            }
            Token::Select => {
                self.scan();

                // Parse optional "DISTINCT" or "ALL".
                if self.peek() == Token::Distinct {
                    self.scan();
                    stmt.quantifier = Some(SelectQuantifier::Distinct);
                } else if self.peek() == Token::All {
                    self.scan();
                    stmt.quantifier = Some(SelectQuantifier::All);
                }

                // Parse result columns.
                loop {
                    stmt.columns.push(self.parse_result_column()?);
                    if self.peek() != Token::Comma {
                        break;
                    }
                    self.scan();
                }

                // Parse FROM clause.
                if self.peek() == Token::From {
                    self.scan();
                    stmt.source = Some(self.parse_source()?);
                }

                // Parse WHERE clause.
                if self.peek() == Token::Where {
                    self.scan();
                    stmt.where_expr = Some(self.parse_expression()?);
                }

                // Parse GROUP BY/HAVING clause.
                if self.peek() == Token::Group {
                    self.scan();
                    if self.peek() != Token::By {
                        return Err(self.error_expected(self.pos, "BY"));
                    }
                    self.scan();

                    loop {
                        stmt.group_by.push(self.parse_expression()?);
                        if self.peek() != Token::Comma {
                            break;
                        }
                        self.scan();
                    }

                    if self.peek() == Token::Having {
                        self.scan();
                        stmt.having = Some(self.parse_expression()?);
                    }
                }

                // Parse WINDOW clause.
                if self.peek() == Token::Window {
                    self.scan();

                    loop {
                        let name = self.parse_ident("window name")?;

                        if self.peek() != Token::As {
                            return Err(self.error_expected(self.pos, "AS"));
                        }
                        self.scan();

                        let definition = self.parse_window_definition()?;
                        stmt.windows.push(Window { name, definition });

                        if self.peek() != Token::Comma {
                            break;
                        }
                        self.scan();
                    }
                }
            }
            _ => return Err(self.error_expected(self.pos, "SELECT or VALUES")),
        }

        // Optionally compound additional SELECT/VALUES.
        let compound_op = match self.peek() {
            Token::Union => {
                self.scan();
                if self.peek() == Token::All {
                    self.scan();
                    Some(CompoundOperator::UnionAll)
                } else {
                    Some(CompoundOperator::Union)
                }
            }
            Token::Intersect => {
                self.scan();
                Some(CompoundOperator::Intersect)
            }
            Token::Except => {
                self.scan();
                Some(CompoundOperator::Except)
            }
            _ => None,
        };
        if let Some(op) = compound_op {
            let select = self.parse_select_statement(true, None)?;
            stmt.compound = Some(CompoundSelect {
                op,
                select: Box::new(select),
            });
        }

        // Parse ORDER BY clause.
        if !compounded && self.peek() == Token::Order {
            self.scan();
            if self.peek() != Token::By {
                return Err(self.error_expected(self.pos, "BY"));
            }
            self.scan();

            loop {
                stmt.order_by.push(self.parse_ordering_term()?);
                if self.peek() != Token::Comma {
                    break;
                }
                self.scan();
            }
        }

        // Parse LIMIT/OFFSET clause. The offset can be specified with
        // either OFFSET or a comma: "LIMIT 1 OFFSET 2" or "LIMIT 1, 2".
        if !compounded && self.peek() == Token::Limit {
            self.scan();
            stmt.limit = Some(self.parse_expression()?);

            if matches!(self.peek(), Token::Offset | Token::Comma) {
                self.scan();
                stmt.offset = Some(self.parse_expression()?);
            }
        }

        Ok(stmt)
    }

    pub(crate) fn parse_result_column(&mut self) -> Result<ResultColumn, Error> {
        // An initial "*" returns all columns.
        if self.peek() == Token::Mult {
            self.scan();
            return Ok(ResultColumn {
                star: true,
                expr: None,
                alias: None,
            });
        }

        // Otherwise either "EXPR [[AS] column-alias]" or "IDENT DOT STAR";
        // read an expression and decide afterwards.
        let expr = self.parse_expression()?;

        // A qualified ref with a star cannot take an alias.
        if let Expr::QualifiedRef(qualified_ref) = &expr {
            if qualified_ref.star {
                return Ok(ResultColumn {
                    star: false,
                    expr: Some(expr),
                    alias: None,
                });
            }
        }

        // If "AS" is next the alias must follow; otherwise a bare
        // identifier-like token serves as the alias.
        let mut alias = None;
        if self.peek() == Token::As {
            self.scan();
            if !self.peek().is_ident() {
                return Err(self.error_expected(self.pos, "column alias"));
            }
            alias = Some(self.parse_ident("column alias")?);
        } else if self.peek().is_ident() {
            alias = Some(self.parse_ident("column alias")?);
        }

        Ok(ResultColumn {
            star: false,
            expr: Some(expr),
            alias,
        })
    }

    /// Parses the FROM clause sources: a unary source followed by any
    /// number of join operators. Successive joins are re-nested on the
    /// right side so each constraint stays with its operator (the printer
    /// reverses this).
    pub(crate) fn parse_source(&mut self) -> Result<Source, Error> {
        let _guard = self.recursion.try_decrease()?;

        let mut source = self.parse_unary_source()?;

        loop {
            // Exit immediately if the next token is not a join operator.
            match self.peek() {
                Token::Comma
                | Token::Natural
                | Token::Left
                | Token::Right
                | Token::Full
                | Token::Inner
                | Token::Cross
                | Token::Join => {}
                _ => return Ok(source),
            }

            let operator = self.parse_join_operator()?;
            let y = self.parse_unary_source()?;
            let constraint = self.parse_join_constraint()?;

            // Rewrite the previous join so the new one nests on its right
            // side.
            source = match source {
                Source::Join(lhs) => {
                    let JoinClause {
                        left,
                        operator: lhs_operator,
                        right,
                        constraint: lhs_constraint,
                    } = *lhs;
                    Source::Join(Box::new(JoinClause {
                        left,
                        operator: lhs_operator,
                        right: Source::Join(Box::new(JoinClause {
                            left: right,
                            operator,
                            right: y,
                            constraint,
                        })),
                        constraint: lhs_constraint,
                    }))
                }
                source => Source::Join(Box::new(JoinClause {
                    left: source,
                    operator,
                    right: y,
                    constraint,
                })),
            };
        }
    }

    // A qualified table name, table-valued function, subquery, or VALUES
    // clause, but never a join.
    fn parse_unary_source(&mut self) -> Result<Source, Error> {
        match self.peek() {
            Token::LParen => Ok(Source::Paren(Box::new(self.parse_paren_source()?))),
            Token::Values => Ok(Source::Select(Box::new(
                self.parse_select_statement(false, None)?,
            ))),
            _ => Ok(Source::Table(
                self.parse_qualified_name(true, true, true, true, true)?,
            )),
        }
    }

    fn parse_join_operator(&mut self) -> Result<JoinOperator, Error> {
        let mut operator = JoinOperator::default();

        // Handle the single comma join.
        if self.peek() == Token::Comma {
            self.scan();
            return Ok(operator);
        }

        if self.peek() == Token::Natural {
            self.scan();
            operator.natural = true;
        }

        match self.peek() {
            Token::Left => {
                self.scan();
                operator.left = true;
                if self.peek() == Token::Outer {
                    self.scan();
                    operator.outer = true;
                }
            }
            Token::Right => {
                self.scan();
                operator.right = true;
                if self.peek() == Token::Outer {
                    self.scan();
                    operator.outer = true;
                }
            }
            Token::Full => {
                self.scan();
                operator.full = true;
                if self.peek() == Token::Outer {
                    self.scan();
                    operator.outer = true;
                }
            }
            Token::Inner => {
                self.scan();
                operator.inner = true;
            }
            Token::Cross => {
                self.scan();
                operator.cross = true;
            }
            _ => {}
        }

        // Every non-comma join ends in the literal JOIN.
        if self.peek() != Token::Join {
            return Err(self.error_expected(self.pos, "JOIN"));
        }
        self.scan();

        Ok(operator)
    }

    fn parse_join_constraint(&mut self) -> Result<Option<JoinConstraint>, Error> {
        match self.peek() {
            Token::On => {
                self.scan();
                let expr = self.parse_expression()?;
                Ok(Some(JoinConstraint::On(OnConstraint { expr })))
            }
            Token::Using => {
                self.scan();

                if self.peek() != Token::LParen {
                    return Err(self.error_expected(self.pos, "left paren"));
                }
                self.scan();

                let mut columns = vec![];
                loop {
                    columns.push(self.parse_ident("column name")?);

                    if self.peek() == Token::RParen {
                        break;
                    } else if self.peek() != Token::Comma {
                        return Err(self.error_expected(self.pos, "comma or right paren"));
                    }
                    self.scan();
                }
                self.scan();

                Ok(Some(JoinConstraint::Using(UsingConstraint { columns })))
            }
            _ => Ok(None),
        }
    }

    fn parse_paren_source(&mut self) -> Result<ParenSource, Error> {
        self.scan();

        let source = if self.peek() == Token::Select {
            Source::Select(Box::new(self.parse_select_statement(false, None)?))
        } else {
            self.parse_source()?
        };

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        let mut alias = None;
        if self.peek() == Token::As || self.peek().is_ident() {
            if self.peek() == Token::As {
                self.scan();
            }
            alias = Some(self.parse_ident("table alias")?);
        }

        Ok(ParenSource { source, alias })
    }

    pub(crate) fn parse_with_clause(&mut self) -> Result<WithClause, Error> {
        self.scan();

        let mut clause = WithClause {
            recursive: false,
            ctes: vec![],
        };
        if self.peek() == Token::Recursive {
            self.scan();
            clause.recursive = true;
        }

        // Parse the comma-delimited list of common table expressions.
        loop {
            clause.ctes.push(self.parse_cte()?);
            if self.peek() != Token::Comma {
                break;
            }
            self.scan();
        }
        Ok(clause)
    }

    fn parse_cte(&mut self) -> Result<Cte, Error> {
        let table_name = self.parse_ident("table name")?;

        // Parse the optional column list.
        let mut columns = vec![];
        if self.peek() == Token::LParen {
            self.scan();

            loop {
                columns.push(self.parse_ident("column name")?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
        }

        if self.peek() != Token::As {
            return Err(self.error_expected(self.pos, "AS"));
        }
        self.scan();

        // Parse the parenthesized select.
        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let select = self.parse_select_statement(false, None)?;

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(Cte {
            table_name,
            columns,
            select,
        })
    }

    /// Parses a parenthesized window definition: an optional base-window
    /// name, PARTITION BY, ORDER BY, and a frame spec.
    pub(crate) fn parse_window_definition(&mut self) -> Result<WindowDefinition, Error> {
        let mut definition = WindowDefinition::default();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        // Read the base window name. Any identifier-like token works here
        // except the keywords that may open the clauses that follow.
        let tok = self.peek();
        if tok.is_ident()
            && !matches!(
                tok,
                Token::Partition | Token::Order | Token::Range | Token::Rows | Token::Groups
            )
        {
            let tok = self.scan();
            definition.base = Some(Ident {
                name: self.lit.clone(),
                quoted: tok == Token::QuotedIdent,
            });
        }

        // Parse "PARTITION BY expr, expr, ...".
        if self.peek() == Token::Partition {
            self.scan();
            if self.peek() != Token::By {
                return Err(self.error_expected(self.pos, "BY"));
            }
            self.scan();

            loop {
                definition.partitions.push(self.parse_expression()?);
                if self.peek() != Token::Comma {
                    break;
                }
                self.scan();
            }
        }

        // Parse "ORDER BY ordering-term, ordering-term, ...".
        if self.peek() == Token::Order {
            self.scan();
            if self.peek() != Token::By {
                return Err(self.error_expected(self.pos, "BY"));
            }
            self.scan();

            loop {
                definition.order_by.push(self.parse_ordering_term()?);
                if self.peek() != Token::Comma {
                    break;
                }
                self.scan();
            }
        }

        // Parse the frame spec.
        if matches!(self.peek(), Token::Range | Token::Rows | Token::Groups) {
            definition.frame = Some(self.parse_frame_spec()?);
        }

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(definition)
    }

    pub(crate) fn parse_ordering_term(&mut self) -> Result<OrderingTerm, Error> {
        let expr = self.parse_expression()?;
        let mut term = OrderingTerm {
            expr,
            direction: None,
            nulls: None,
        };

        // Parse the optional sort direction.
        match self.peek() {
            Token::Asc => {
                self.scan();
                term.direction = Some(SortDirection::Asc);
            }
            Token::Desc => {
                self.scan();
                term.direction = Some(SortDirection::Desc);
            }
            _ => {}
        }

        // Parse the optional "NULLS FIRST" or "NULLS LAST".
        if self.peek() == Token::Nulls {
            self.scan();
            match self.peek() {
                Token::First => {
                    self.scan();
                    term.nulls = Some(NullsOrder::First);
                }
                Token::Last => {
                    self.scan();
                    term.nulls = Some(NullsOrder::Last);
                }
                _ => return Err(self.error_expected(self.pos, "FIRST or LAST")),
            }
        }

        Ok(term)
    }

    fn parse_frame_spec(&mut self) -> Result<FrameSpec, Error> {
        let units = match self.scan() {
            Token::Range => FrameUnits::Range,
            Token::Rows => FrameUnits::Rows,
            _ => FrameUnits::Groups,
        };

        // BETWEEN means two boundaries follow.
        let mut between = false;
        if self.peek() == Token::Between {
            self.scan();
            between = true;
        }

        // Parse the start boundary: "UNBOUNDED PRECEDING", "CURRENT ROW",
        // or "expr PRECEDING|FOLLOWING".
        let start = if self.peek() == Token::Unbounded {
            self.scan();
            if self.peek() != Token::Preceding {
                return Err(self.error_expected(self.pos, "PRECEDING"));
            }
            self.scan();
            FrameBound::UnboundedPreceding
        } else if self.peek() == Token::Current {
            self.scan();
            if self.peek() != Token::Row {
                return Err(self.error_expected(self.pos, "ROW"));
            }
            self.scan();
            FrameBound::CurrentRow
        } else {
            let expr = self.parse_expression()?;
            if self.peek() == Token::Preceding {
                self.scan();
                FrameBound::Preceding(expr)
            } else if self.peek() == Token::Following && between {
                // FOLLOWING is only allowed for the start with BETWEEN.
                self.scan();
                FrameBound::Following(expr)
            } else if between {
                return Err(self.error_expected(self.pos, "PRECEDING or FOLLOWING"));
            } else {
                return Err(self.error_expected(self.pos, "PRECEDING"));
            }
        };

        // Read "AND end" when the spec is a BETWEEN.
        let mut end = None;
        if between {
            if self.peek() != Token::And {
                return Err(self.error_expected(self.pos, "AND"));
            }
            self.scan();

            end = Some(if self.peek() == Token::Unbounded {
                self.scan();
                if self.peek() != Token::Following {
                    return Err(self.error_expected(self.pos, "FOLLOWING"));
                }
                self.scan();
                FrameBound::UnboundedFollowing
            } else if self.peek() == Token::Current {
                self.scan();
                if self.peek() != Token::Row {
                    return Err(self.error_expected(self.pos, "ROW"));
                }
                self.scan();
                FrameBound::CurrentRow
            } else {
                let expr = self.parse_expression()?;
                if self.peek() == Token::Preceding {
                    self.scan();
                    FrameBound::Preceding(expr)
                } else if self.peek() == Token::Following {
                    self.scan();
                    FrameBound::Following(expr)
                } else {
                    return Err(self.error_expected(self.pos, "PRECEDING or FOLLOWING"));
                }
            });
        }

        // Parse the optional EXCLUDE.
        let mut exclude = None;
        if self.peek() == Token::Exclude {
            self.scan();

            exclude = Some(match self.peek() {
                Token::No => {
                    self.scan();
                    if self.peek() != Token::Others {
                        return Err(self.error_expected(self.pos, "OTHERS"));
                    }
                    self.scan();
                    FrameExclude::NoOthers
                }
                Token::Current => {
                    self.scan();
                    if self.peek() != Token::Row {
                        return Err(self.error_expected(self.pos, "ROW"));
                    }
                    self.scan();
                    FrameExclude::CurrentRow
                }
                Token::Group => {
                    self.scan();
                    FrameExclude::Group
                }
                Token::Ties => {
                    self.scan();
                    FrameExclude::Ties
                }
                _ => {
                    return Err(
                        self.error_expected(self.pos, "NO OTHERS, CURRENT ROW, GROUP, or TIES")
                    )
                }
            });
        }

        Ok(FrameSpec {
            units,
            between,
            start,
            end,
            exclude,
        })
    }
}
