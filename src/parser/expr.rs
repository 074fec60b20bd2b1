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

//! Expression parsing: a Pratt-style binary-operator loop over prefix
//! operands, with multi-token operators (`IS NOT DISTINCT FROM`,
//! `NOT LIKE`, ...) folded by [`Parser::scan_binary_op`].

use log::debug;

use crate::ast::operator::start_token_precedence;
use crate::ast::*;
use crate::parser::{Error, Parser};
use crate::tokenizer::Token;

impl<'a> Parser<'a> {
    /// Parses an expression from the current position.
    pub fn parse_expression(&mut self) -> Result<Expr, Error> {
        debug!("parsing expr at {}", self.pos);
        let _guard = self.recursion.try_decrease()?;
        self.parse_binary_expr(1)
    }

    /// Parses a prefix operand: a literal, a (possibly qualified or called)
    /// identifier, a unary operator, a parenthesized group or list, CAST,
    /// CASE, RAISE, [NOT] EXISTS, or a nested SELECT.
    pub(crate) fn parse_operand(&mut self) -> Result<Expr, Error> {
        let tok = self.scan();
        let lit = self.lit.clone();
        match tok {
            Token::Cast => {
                self.unscan();
                Ok(Expr::Cast(self.parse_cast_expr()?))
            }
            Token::Case => {
                self.unscan();
                Ok(Expr::Case(self.parse_case_expr()?))
            }
            Token::Raise => {
                self.unscan();
                Ok(Expr::Raise(self.parse_raise()?))
            }
            Token::Not => {
                if self.peek() == Token::Exists {
                    return Ok(Expr::Exists(self.parse_exists(true)?));
                }

                let expr = self.parse_operand()?;
                Ok(Expr::Unary(UnaryExpr {
                    op: Op::Not,
                    expr: Box::new(expr),
                }))
            }
            Token::Exists => {
                self.unscan();
                Ok(Expr::Exists(self.parse_exists(false)?))
            }
            Token::Select | Token::With => {
                self.unscan();
                let select = self.parse_select_statement(false, None)?;
                Ok(Expr::Select(Box::new(select)))
            }
            Token::String => {
                // A string followed by "." or "(" acts as an identifier.
                if self.peek() != Token::Period && self.peek() != Token::LParen {
                    Ok(Expr::String(StringLit { value: lit }))
                } else {
                    self.parse_ident_operand(tok, lit)
                }
            }
            tok if tok.is_expr_ident() => self.parse_ident_operand(tok, lit),
            Token::Blob => Ok(Expr::Blob(BlobLit { value: lit })),
            Token::Float | Token::Integer => Ok(Expr::Number(NumberLit { value: lit })),
            Token::Null => Ok(Expr::Null(NullLit)),
            Token::True | Token::False => Ok(Expr::Bool(BoolLit {
                value: tok == Token::True,
            })),
            Token::Bind => Ok(Expr::Bind(BindExpr { name: lit })),
            Token::Plus | Token::Minus | Token::Tilde => {
                let expr = self.parse_operand()?;
                let op = match tok {
                    Token::Plus => Op::Plus,
                    Token::Minus => Op::Minus,
                    _ => Op::BitNot,
                };
                Ok(Expr::Unary(UnaryExpr {
                    op,
                    expr: Box::new(expr),
                }))
            }
            Token::LParen => {
                self.unscan();
                self.parse_paren_expr()
            }
            _ => Err(self.error_expected(self.pos, "expression")),
        }
    }

    // An identifier-like operand: a bare identifier, a qualified column
    // reference, or a function call.
    fn parse_ident_operand(&mut self, tok: Token, lit: String) -> Result<Expr, Error> {
        let ident = Ident {
            name: lit,
            quoted: tok == Token::QuotedIdent || tok == Token::String,
        };
        match self.peek() {
            Token::Period => Ok(Expr::QualifiedRef(self.parse_qualified_ref(ident)?)),
            Token::LParen => Ok(Expr::Call(Box::new(self.parse_call(ident)?))),
            _ => Ok(Expr::Ident(ident)),
        }
    }

    /// The Pratt loop: reads an operand, then folds binary operators whose
    /// precedence is at least `min_precedence`. The right operand is parsed
    /// at `precedence + 1`, making binary operators left-associative.
    pub(crate) fn parse_binary_expr(&mut self, min_precedence: u8) -> Result<Expr, Error> {
        let mut x = self.parse_operand()?;

        loop {
            if start_token_precedence(self.peek()) < min_precedence {
                return Ok(x);
            }

            let op = self.scan_binary_op()?;
            match op {
                Op::IsNull | Op::NotNull => {
                    x = Expr::NullTest(NullTest {
                        expr: Box::new(x),
                        op,
                    });
                }
                Op::In | Op::NotIn => {
                    let mut in_expr = InExpr {
                        expr: x,
                        op,
                        select: None,
                        values: None,
                        table_or_function: None,
                    };

                    if self.peek() == Token::LParen {
                        self.scan();

                        match self.peek() {
                            Token::Select | Token::With => {
                                in_expr.select =
                                    Some(Box::new(self.parse_select_statement(false, None)?));
                            }
                            _ => {
                                // A parenthesized value list, possibly empty.
                                let mut values = ExprList::default();
                                while self.peek() != Token::RParen {
                                    values.exprs.push(self.parse_expression()?);

                                    if self.peek() == Token::RParen {
                                        break;
                                    } else if self.peek() != Token::Comma {
                                        return Err(
                                            self.error_expected(self.pos, "comma or right paren")
                                        );
                                    }
                                    self.scan();
                                }
                                in_expr.values = Some(values);
                            }
                        }

                        if self.peek() != Token::RParen {
                            return Err(self.error_expected(self.pos, "right paren"));
                        }
                        self.scan();
                    } else {
                        in_expr.table_or_function =
                            Some(self.parse_qualified_name(true, false, false, true, false)?);
                    }

                    x = Expr::In(Box::new(in_expr));
                }
                Op::Between | Op::NotBetween => {
                    // The two bounds parse above BETWEEN's own precedence
                    // and are kept as a nested AND, mirroring the surface.
                    let lhs = self.parse_binary_expr(op.precedence() + 1)?;

                    if self.peek() != Token::And {
                        return Err(self.error_expected(self.pos, "AND"));
                    }
                    self.scan();

                    let rhs = self.parse_binary_expr(op.precedence() + 1)?;
                    x = Expr::Binary(BinaryExpr {
                        left: Box::new(x),
                        op,
                        right: Box::new(Expr::Binary(BinaryExpr {
                            left: Box::new(lhs),
                            op: Op::And,
                            right: Box::new(rhs),
                        })),
                    });
                }
                Op::Like | Op::NotLike => {
                    // Parse above ESCAPE so a trailing ESCAPE stays ours.
                    let y = self.parse_binary_expr(Op::Escape.precedence() + 1)?;

                    if self.peek() == Token::Escape {
                        self.scan();

                        let next = self.peek();
                        if next != Token::String && next != Token::QuotedIdent {
                            return Err(
                                self.error_expected(self.pos, "string or quoted identifier")
                            );
                        }
                        let escape = self.parse_operand()?;

                        x = Expr::Binary(BinaryExpr {
                            left: Box::new(Expr::Binary(BinaryExpr {
                                left: Box::new(x),
                                op,
                                right: Box::new(y),
                            })),
                            op: Op::Escape,
                            right: Box::new(escape),
                        });
                    } else {
                        x = Expr::Binary(BinaryExpr {
                            left: Box::new(x),
                            op,
                            right: Box::new(y),
                        });
                    }
                }
                Op::Escape => {
                    return Err(
                        self.error_expected(self.pos, "op ESCAPE can not be used without LIKE")
                    );
                }
                Op::Collate => {
                    // COLLATE only ever takes a collation name.
                    if !self.peek().is_ident() {
                        return Err(self.error_expected(self.pos, "collation name"));
                    }
                    let y = self.parse_binary_expr(op.precedence() + 1)?;
                    x = Expr::Binary(BinaryExpr {
                        left: Box::new(x),
                        op,
                        right: Box::new(y),
                    });
                }
                _ => {
                    let y = self.parse_binary_expr(op.precedence() + 1)?;
                    x = Expr::Binary(BinaryExpr {
                        left: Box::new(x),
                        op,
                        right: Box::new(y),
                    });
                }
            }
        }
    }

    /// Scans the next binary operator, combining multi-word operators into
    /// a single [`Op`]. At most one token beyond the operator is ever
    /// buffered.
    fn scan_binary_op(&mut self) -> Result<Op, Error> {
        match self.scan() {
            Token::Plus => Ok(Op::Plus),
            Token::Minus => Ok(Op::Minus),
            Token::Mult => Ok(Op::Multiply),
            Token::Div => Ok(Op::Divide),
            Token::Mod => Ok(Op::Modulo),
            Token::StringConcat => Ok(Op::Concat),
            Token::Between => Ok(Op::Between),
            Token::ShiftLeft => Ok(Op::Lshift),
            Token::ShiftRight => Ok(Op::Rshift),
            Token::Ampersand => Ok(Op::BitAnd),
            Token::Pipe => Ok(Op::BitOr),
            Token::Lt => Ok(Op::Lt),
            Token::LtEq => Ok(Op::Le),
            Token::Gt => Ok(Op::Gt),
            Token::GtEq => Ok(Op::Ge),
            Token::Eq => Ok(Op::Eq),
            Token::Neq => Ok(Op::Ne),
            Token::Arrow => Ok(Op::Arrow),
            Token::LongArrow => Ok(Op::LongArrow),
            Token::In => Ok(Op::In),
            Token::Like => Ok(Op::Like),
            Token::Glob => Ok(Op::Glob),
            Token::Match => Ok(Op::Match),
            Token::Regexp => Ok(Op::Regexp),
            Token::And => Ok(Op::And),
            Token::Or => Ok(Op::Or),
            Token::IsNull => Ok(Op::IsNull),
            Token::NotNull => Ok(Op::NotNull),
            Token::Escape => Ok(Op::Escape),
            Token::Collate => Ok(Op::Collate),
            Token::Is => {
                if self.peek() == Token::Not {
                    self.scan();

                    if self.peek() != Token::Distinct {
                        return Ok(Op::IsNot);
                    }
                    self.scan();

                    if self.peek() != Token::From {
                        return Err(self.error_expected(self.pos, "FROM"));
                    }
                    self.scan();
                    Ok(Op::IsNotDistinctFrom)
                } else if self.peek() == Token::Null {
                    self.scan();
                    Ok(Op::IsNull)
                } else if self.peek() == Token::Distinct {
                    self.scan();

                    if self.peek() != Token::From {
                        return Err(self.error_expected(self.pos, "FROM"));
                    }
                    self.scan();
                    Ok(Op::IsDistinctFrom)
                } else {
                    Ok(Op::Is)
                }
            }
            Token::Not => match self.peek() {
                Token::In => {
                    self.scan();
                    Ok(Op::NotIn)
                }
                Token::Like => {
                    self.scan();
                    Ok(Op::NotLike)
                }
                Token::Glob => {
                    self.scan();
                    Ok(Op::NotGlob)
                }
                Token::Regexp => {
                    self.scan();
                    Ok(Op::NotRegexp)
                }
                Token::Match => {
                    self.scan();
                    Ok(Op::NotMatch)
                }
                Token::Between => {
                    self.scan();
                    Ok(Op::NotBetween)
                }
                Token::Null => {
                    self.scan();
                    Ok(Op::NotNull)
                }
                _ => Err(self.error_expected(
                    self.pos,
                    "IN, LIKE, GLOB, REGEXP, MATCH, BETWEEN, IS/NOT NULL",
                )),
            },
            _ => Err(self.error_expected(self.pos, "binary operator")),
        }
    }

    // tbl.col, schema.tbl.col, or tbl.* after the leading identifier.
    fn parse_qualified_ref(&mut self, table: Ident) -> Result<QualifiedRef, Error> {
        debug_assert_eq!(self.peek(), Token::Period);

        let mut expr = QualifiedRef {
            table: QualifiedName::named(table),
            star: false,
            column: None,
        };
        self.scan();

        if self.peek() == Token::Mult {
            self.scan();
            expr.star = true;
        } else if self.peek().is_ident() {
            expr.column = Some(self.parse_ident("column name")?);
        } else {
            return Err(self.error_expected(self.pos, "column name"));
        }

        // A second dot turns "a.b" into a schema-qualified "a.b.c".
        if self.peek() == Token::Period {
            if expr.star {
                return Err(
                    self.error_expected(self.pos, "qualified ref with star can not have another dot")
                );
            }

            self.scan();
            let column = self.parse_ident("column name")?;
            if let Some(prev) = expr.column.take() {
                expr.table.schema = Some(std::mem::replace(&mut expr.table.name, prev));
            }
            expr.column = Some(column);
        }

        Ok(expr)
    }

    /// Parses a function call whose name has already been read, plus its
    /// optional FILTER and OVER clauses.
    pub(crate) fn parse_call(&mut self, name: Ident) -> Result<Call, Error> {
        debug_assert_eq!(self.peek(), Token::LParen);

        let name = self.parse_qualified_name_from_ident(name, false, false, false, true, false)?;
        if !name.function_call {
            return Err(self.error_expected(self.pos, "function call"));
        }

        let mut call = Call {
            name,
            filter: None,
            over_name: None,
            over_window: None,
        };

        if self.peek() == Token::Filter {
            self.scan();

            if self.peek() != Token::LParen {
                return Err(self.error_expected(self.pos, "left paren"));
            }
            self.scan();

            if self.peek() != Token::Where {
                return Err(self.error_expected(self.pos, "WHERE"));
            }
            self.scan();

            call.filter = Some(self.parse_expression()?);

            if self.peek() != Token::RParen {
                return Err(self.error_expected(self.pos, "right paren"));
            }
            self.scan();
        }

        if self.peek() == Token::Over {
            self.scan();

            // A window name or an inline window definition.
            if self.peek().is_ident() {
                call.over_name = Some(self.parse_ident("window name")?);
            } else {
                call.over_window = Some(self.parse_window_definition()?);
            }
        }

        Ok(call)
    }

    /// Parses one function-call argument with its optional ORDER BY tail.
    pub(crate) fn parse_function_arg(&mut self) -> Result<FunctionArg, Error> {
        let expr = self.parse_expression()?;

        let mut order_by = vec![];
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

        Ok(FunctionArg { expr, order_by })
    }

    // A parenthesized expression, or an expression list when a comma
    // follows the first expression.
    fn parse_paren_expr(&mut self) -> Result<Expr, Error> {
        self.scan();

        let x = self.parse_expression()?;

        if self.peek() != Token::Comma {
            if self.peek() != Token::RParen {
                return Err(self.error_expected(self.pos, "right paren"));
            }
            self.scan();
            return Ok(Expr::Paren(ParenExpr { expr: Box::new(x) }));
        }

        let mut list = ExprList { exprs: vec![x] };
        while self.peek() == Token::Comma {
            self.scan();
            list.exprs.push(self.parse_expression()?);
        }

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(Expr::List(list))
    }

    fn parse_cast_expr(&mut self) -> Result<CastExpr, Error> {
        self.scan();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let expr = self.parse_expression()?;

        if self.peek() != Token::As {
            return Err(self.error_expected(self.pos, "AS"));
        }
        self.scan();

        let to_type = self.parse_type()?;

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(CastExpr {
            expr: Box::new(expr),
            to_type,
        })
    }

    fn parse_case_expr(&mut self) -> Result<CaseExpr, Error> {
        self.scan();

        // Parse the optional operand if WHEN is not next.
        let mut operand = None;
        if self.peek() != Token::When {
            operand = Some(Box::new(self.parse_expression()?));
        }

        // Parse one or more WHEN/THEN pairs.
        let mut blocks = vec![];
        loop {
            if self.peek() != Token::When {
                return Err(self.error_expected(self.pos, "WHEN"));
            }
            self.scan();

            let condition = self.parse_expression()?;

            if self.peek() != Token::Then {
                return Err(self.error_expected(self.pos, "THEN"));
            }
            self.scan();

            let body = self.parse_expression()?;
            blocks.push(CaseBlock { condition, body });

            match self.peek() {
                Token::Else | Token::End => break,
                Token::When => {}
                _ => return Err(self.error_expected(self.pos, "WHEN, ELSE or END")),
            }
        }

        let mut else_expr = None;
        if self.peek() == Token::Else {
            self.scan();
            else_expr = Some(Box::new(self.parse_expression()?));
        }

        if self.peek() != Token::End {
            return Err(self.error_expected(self.pos, "END"));
        }
        self.scan();

        Ok(CaseExpr {
            operand,
            blocks,
            else_expr,
        })
    }

    fn parse_exists(&mut self, not: bool) -> Result<Exists, Error> {
        if self.peek() != Token::Exists {
            return Err(self.error_expected(self.pos, "EXISTS"));
        }
        self.scan();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let select = self.parse_select_statement(false, None)?;

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(Exists {
            not,
            select: Box::new(select),
        })
    }

    fn parse_raise(&mut self) -> Result<Raise, Error> {
        self.scan();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        // IGNORE stands alone; ROLLBACK, ABORT, and FAIL carry a message.
        let raise = if self.peek() == Token::Ignore {
            self.scan();
            Raise::Ignore
        } else {
            let kind = self.peek();
            match kind {
                Token::Rollback | Token::Abort | Token::Fail => {
                    self.scan();
                }
                _ => {
                    return Err(
                        self.error_expected(self.pos, "IGNORE, ROLLBACK, ABORT, or FAIL")
                    )
                }
            }

            if self.peek() != Token::Comma {
                return Err(self.error_expected(self.pos, "comma"));
            }
            self.scan();

            if self.peek() != Token::String {
                return Err(self.error_expected(self.pos, "error message"));
            }
            self.scan();
            let error = StringLit {
                value: self.lit.clone(),
            };

            match kind {
                Token::Rollback => Raise::Rollback(error),
                Token::Abort => Raise::Abort(error),
                _ => Raise::Fail(error),
            }
        };

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(raise)
    }

    /// Parses a literal value; the caller has already checked that the
    /// next token is one.
    pub(crate) fn parse_literal(&mut self) -> Expr {
        let tok = self.scan();
        debug_assert!(tok.is_literal());
        match tok {
            Token::String => Expr::String(StringLit {
                value: self.lit.clone(),
            }),
            Token::CurrentTime | Token::CurrentDate | Token::CurrentTimestamp => {
                Expr::Timestamp(TimestampLit {
                    value: self.lit.clone(),
                })
            }
            Token::Blob => Expr::Blob(BlobLit {
                value: self.lit.clone(),
            }),
            Token::Float | Token::Integer => Expr::Number(NumberLit {
                value: self.lit.clone(),
            }),
            Token::True | Token::False => Expr::Bool(BoolLit {
                value: tok == Token::True,
            }),
            _ => Expr::Null(NullLit),
        }
    }
}
