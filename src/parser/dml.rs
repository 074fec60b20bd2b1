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

//! DML parsing: INSERT (with upsert and RETURNING), UPDATE, DELETE.
//!
//! The `in_trigger` flags reject the clauses SQLite disallows inside
//! trigger bodies: qualified or aliased table names, ORDER BY/LIMIT on
//! UPDATE and DELETE, and DEFAULT VALUES on INSERT.

use crate::ast::*;
use crate::parser::{Error, Parser};
use crate::tokenizer::Token;

impl<'a> Parser<'a> {
    pub(crate) fn parse_insert_statement(
        &mut self,
        in_trigger: bool,
        with: Option<WithClause>,
    ) -> Result<InsertStatement, Error> {
        let mut replace = false;
        let mut or_conflict = None;

        if self.peek() == Token::Insert {
            self.scan();

            if self.peek() == Token::Or {
                self.scan();

                or_conflict = Some(match self.peek() {
                    Token::Rollback => ConflictClause::Rollback,
                    Token::Replace => ConflictClause::Replace,
                    Token::Abort => ConflictClause::Abort,
                    Token::Fail => ConflictClause::Fail,
                    Token::Ignore => ConflictClause::Ignore,
                    _ => {
                        return Err(self.error_expected(
                            self.pos,
                            "ROLLBACK, REPLACE, ABORT, FAIL, or IGNORE",
                        ))
                    }
                });
                self.scan();
            }
        } else {
            self.scan();
            replace = true;
        }

        if self.peek() != Token::Into {
            return Err(self.error_expected(self.pos, "INTO"));
        }
        self.scan();

        let table =
            self.parse_qualified_name(!in_trigger, !in_trigger, false, false, false)?;

        let mut stmt = InsertStatement {
            with,
            replace,
            or_conflict,
            table,
            columns: vec![],
            value_lists: vec![],
            select: None,
            default_values: false,
            upsert: None,
            returning: vec![],
        };

        // Parse the optional column list.
        if self.peek() == Token::LParen {
            self.scan();
            loop {
                stmt.columns.push(self.parse_ident("column name")?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
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
                    stmt.value_lists.push(list);

                    if self.peek() != Token::Comma {
                        break;
                    }
                    self.scan();
                }
            }
            Token::Select => {
                stmt.select = Some(Box::new(self.parse_select_statement(false, None)?));
            }
            Token::Default => {
                if in_trigger {
                    return Err(self.error_expected(self.pos, "non-DEFAULT VALUES"));
                }

                self.scan();
                if self.peek() != Token::Values {
                    return Err(self.error_expected(self.pos, "VALUES"));
                }
                self.scan();
                stmt.default_values = true;
            }
            _ => {
                return Err(self.error_expected(self.pos, "VALUES, SELECT, or DEFAULT VALUES"))
            }
        }

        // Parse the optional upsert clause.
        if self.peek() == Token::On {
            stmt.upsert = Some(self.parse_upsert_clause()?);
        }

        // Parse the optional RETURNING clause.
        if self.peek() == Token::Returning {
            stmt.returning = self.parse_returning_clause()?;
        }

        Ok(stmt)
    }

    fn parse_upsert_clause(&mut self) -> Result<UpsertClause, Error> {
        // Parse "ON CONFLICT".
        self.scan();
        if self.peek() != Token::Conflict {
            return Err(self.error_expected(self.pos, "CONFLICT"));
        }
        self.scan();

        let mut columns = vec![];
        let mut where_expr = None;

        // Parse the optional conflict target and its WHERE condition.
        if self.peek() == Token::LParen {
            self.scan();
            loop {
                columns.push(self.parse_indexed_column()?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();

            if self.peek() == Token::Where {
                self.scan();
                where_expr = Some(self.parse_expression()?);
            }
        }

        // Parse "DO NOTHING" or "DO UPDATE SET".
        if self.peek() != Token::Do {
            return Err(self.error_expected(self.pos, "DO"));
        }
        self.scan();

        if self.peek() == Token::Nothing {
            self.scan();
            return Ok(UpsertClause {
                columns,
                where_expr,
                action: UpsertAction::Nothing,
            });
        } else if self.peek() != Token::Update {
            return Err(self.error_expected(self.pos, "NOTHING or UPDATE SET"));
        }

        self.scan();
        if self.peek() != Token::Set {
            return Err(self.error_expected(self.pos, "SET"));
        }
        self.scan();

        // Parse the list of assignments.
        let mut assignments = vec![];
        loop {
            assignments.push(self.parse_assignment()?);
            if self.peek() != Token::Comma {
                break;
            }
            self.scan();
        }

        // Parse the WHERE after DO UPDATE SET.
        let mut update_where_expr = None;
        if self.peek() == Token::Where {
            self.scan();
            update_where_expr = Some(self.parse_expression()?);
        }

        Ok(UpsertClause {
            columns,
            where_expr,
            action: UpsertAction::UpdateSet {
                assignments,
                where_expr: update_where_expr,
            },
        })
    }

    fn parse_returning_clause(&mut self) -> Result<Vec<ResultColumn>, Error> {
        self.scan();

        let mut columns = vec![];
        loop {
            columns.push(self.parse_result_column()?);
            if self.peek() != Token::Comma {
                break;
            }
            self.scan();
        }
        Ok(columns)
    }

    /// Parses "col = expr" or "(a, b, ...) = expr".
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment, Error> {
        let mut columns = vec![];

        if self.peek().is_ident() {
            columns.push(self.parse_ident("column name")?);
        } else if self.peek() == Token::LParen {
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
        } else {
            return Err(self.error_expected(self.pos, "column name or column list"));
        }

        if self.peek() != Token::Eq {
            return Err(self.error_expected(self.pos, "="));
        }
        self.scan();

        let expr = self.parse_expression()?;
        Ok(Assignment { columns, expr })
    }

    pub(crate) fn parse_update_statement(
        &mut self,
        in_trigger: bool,
        with: Option<WithClause>,
    ) -> Result<UpdateStatement, Error> {
        self.scan();

        let mut or_conflict = None;
        if self.peek() == Token::Or {
            self.scan();

            or_conflict = Some(match self.peek() {
                Token::Rollback => ConflictClause::Rollback,
                Token::Replace => ConflictClause::Replace,
                Token::Abort => ConflictClause::Abort,
                Token::Fail => ConflictClause::Fail,
                Token::Ignore => ConflictClause::Ignore,
                _ => {
                    return Err(self.error_expected(
                        self.pos,
                        "ROLLBACK, REPLACE, ABORT, FAIL, or IGNORE",
                    ))
                }
            });
            self.scan();
        }

        let table =
            self.parse_qualified_name(!in_trigger, !in_trigger, !in_trigger, false, false)?;

        let mut stmt = UpdateStatement {
            with,
            or_conflict,
            table,
            assignments: vec![],
            where_expr: None,
            returning: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        };

        // Parse SET plus the list of assignments.
        if self.peek() != Token::Set {
            return Err(self.error_expected(self.pos, "SET"));
        }
        self.scan();

        loop {
            stmt.assignments.push(self.parse_assignment()?);
            if self.peek() != Token::Comma {
                break;
            }
            self.scan();
        }

        if self.peek() == Token::Where {
            self.scan();
            stmt.where_expr = Some(self.parse_expression()?);
        }

        if self.peek() == Token::Returning {
            stmt.returning = self.parse_returning_clause()?;
        }

        self.parse_update_delete_tail(
            in_trigger,
            "UPDATE",
            &mut stmt.order_by,
            &mut stmt.limit,
            &mut stmt.offset,
        )?;

        Ok(stmt)
    }

    pub(crate) fn parse_delete_statement(
        &mut self,
        in_trigger: bool,
        with: Option<WithClause>,
    ) -> Result<DeleteStatement, Error> {
        // Parse "DELETE FROM tbl".
        self.scan();
        if self.peek() != Token::From {
            return Err(self.error_expected(self.pos, "FROM"));
        }
        self.scan();

        let table =
            self.parse_qualified_name(!in_trigger, !in_trigger, !in_trigger, false, false)?;

        let mut stmt = DeleteStatement {
            with,
            table,
            where_expr: None,
            returning: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
        };

        if self.peek() == Token::Where {
            self.scan();
            stmt.where_expr = Some(self.parse_expression()?);
        }

        if self.peek() == Token::Returning {
            stmt.returning = self.parse_returning_clause()?;
        }

        self.parse_update_delete_tail(
            in_trigger,
            "DELETE",
            &mut stmt.order_by,
            &mut stmt.limit,
            &mut stmt.offset,
        )?;

        Ok(stmt)
    }

    // The ORDER BY / LIMIT tail shared by UPDATE and DELETE. Unlike
    // SELECT, an ORDER BY here requires the LIMIT. Both clauses are
    // rejected inside trigger bodies.
    fn parse_update_delete_tail(
        &mut self,
        in_trigger: bool,
        stmt_kind: &str,
        order_by: &mut Vec<OrderingTerm>,
        limit: &mut Option<Expr>,
        offset: &mut Option<Expr>,
    ) -> Result<(), Error> {
        if !matches!(self.peek(), Token::Order | Token::Limit) {
            return Ok(());
        }

        if in_trigger {
            return Err(self.error_expected(
                self.pos,
                &format!("ORDER BY or LIMIT in a {} statement", stmt_kind),
            ));
        }

        if self.peek() == Token::Order {
            self.scan();
            if self.peek() != Token::By {
                return Err(self.error_expected(self.pos, "BY"));
            }
            self.scan();

            loop {
                order_by.push(self.parse_ordering_term()?);
                if self.peek() != Token::Comma {
                    break;
                }
                self.scan();
            }
        }

        // The LIMIT, with its optional OFFSET (or comma) expression.
        if self.peek() != Token::Limit {
            return Err(self.error_expected(self.pos, "LIMIT"));
        }
        self.scan();
        *limit = Some(self.parse_expression()?);

        if matches!(self.peek(), Token::Offset | Token::Comma) {
            self.scan();
            *offset = Some(self.parse_expression()?);
        }

        Ok(())
    }
}
