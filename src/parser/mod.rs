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

//! SQL Parser
//!
//! A recursive-descent parser over the [`Tokenizer`]. The parser owns one
//! tokenizer plus the last scanned `(location, token, lexeme)` and a
//! single-slot pushback flag; it never buffers more than one token, so
//! error positions always point at the token that actually caused the
//! failure.

use std::fmt;

use log::debug;

use crate::ast::*;
use crate::location::Location;
use crate::tokenizer::{Token, Tokenizer};

mod ddl;
mod dml;
mod expr;
mod query;

/// A parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input ended where a statement was required. This is the
    /// end-of-stream signal, not a syntax error: multi-statement parsing
    /// uses it to terminate cleanly.
    UnexpectedEof,
    /// The input could not be parsed at the given position.
    Syntax { pos: Location, msg: String },
    /// Nesting exceeded the parser's recursion limit.
    RecursionLimitExceeded,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedEof => f.write_str("unexpected end of input"),
            Error::Syntax { pos, msg } => write!(f, "{}: {}", pos, msg),
            Error::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

impl std::error::Error for Error {}

// By default, allow statements and expressions up to this deep before
// erroring.
const DEFAULT_REMAINING_DEPTH: usize = 50;

mod recursion {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::Error;

    /// Tracks remaining recursion depth. The value is decremented on each
    /// call to [`RecursionCounter::try_decrease`]; when it reaches 0 an
    /// error is returned.
    ///
    /// Uses an [`Rc`] and [`Cell`] so the returned [`DepthGuard`] can hold
    /// a counted reference back to the counter.
    pub(crate) struct RecursionCounter {
        remaining_depth: Rc<Cell<usize>>,
    }

    impl RecursionCounter {
        pub fn new(remaining_depth: usize) -> Self {
            Self {
                remaining_depth: Rc::new(remaining_depth.into()),
            }
        }

        /// Decreases the remaining depth by 1, returning a guard that
        /// restores it on drop.
        pub fn try_decrease(&self) -> Result<DepthGuard, Error> {
            let old_value = self.remaining_depth.get();
            if old_value == 0 {
                Err(Error::RecursionLimitExceeded)
            } else {
                self.remaining_depth.set(old_value - 1);
                Ok(DepthGuard {
                    remaining_depth: Rc::clone(&self.remaining_depth),
                })
            }
        }
    }

    pub(crate) struct DepthGuard {
        remaining_depth: Rc<Cell<usize>>,
    }

    impl Drop for DepthGuard {
        fn drop(&mut self) {
            let old_value = self.remaining_depth.get();
            self.remaining_depth.set(old_value + 1);
        }
    }
}

use recursion::RecursionCounter;

/// Parses a single statement from `sql`.
///
/// The statement may be followed by an optional semicolon; anything after
/// that is a syntax error. Empty (or comment-only) input yields
/// [`Error::UnexpectedEof`].
///
/// ```
/// let stmt = litesql::parse_stmt("SELECT 1").unwrap();
/// assert_eq!(stmt.to_string(), "SELECT 1");
/// ```
pub fn parse_stmt(sql: &str) -> Result<Statement, Error> {
    debug!("parsing statement {:?}", sql);
    let mut parser = Parser::new(sql);
    let stmt = parser.parse_statement()?;
    if parser.peek() != Token::Eof {
        return Err(parser.error_expected(parser.pos, "EOF"));
    }
    Ok(stmt)
}

/// Parses each semicolon-separated statement in `sql`, yielding them in
/// turn. Iteration stops at the first parse error or the first error
/// returned by `f`.
pub fn parse_multi_stmt<F>(sql: &str, mut f: F) -> Result<(), Error>
where
    F: FnMut(Statement) -> Result<(), Error>,
{
    debug!("parsing statements {:?}", sql);
    let mut parser = Parser::new(sql);
    while parser.peek() != Token::Eof {
        let stmt = parser.parse_statement()?;
        f(stmt)?;
    }
    Ok(())
}

/// Parses `sql` as a standalone expression. Empty input yields `None`.
///
/// ```
/// let expr = litesql::parse_expr("1 + 2").unwrap().unwrap();
/// assert_eq!(expr.to_string(), "1 + 2");
/// assert_eq!(litesql::parse_expr("").unwrap(), None);
/// ```
pub fn parse_expr(sql: &str) -> Result<Option<Expr>, Error> {
    if sql.is_empty() {
        return Ok(None);
    }
    let mut parser = Parser::new(sql);
    parser.parse_expression().map(Some)
}

/// A SQL parser over a borrowed input string.
///
/// A parser is consumed as it advances and must not be shared across
/// concurrent contexts. The trees it produces own all of their strings and
/// outlive the input.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,

    /// Location, token, and lexeme of the last scanned token.
    pos: Location,
    tok: Token,
    lit: String,
    /// One-slot pushback: when set, the next scan re-delivers the stored
    /// token instead of advancing the tokenizer.
    full: bool,

    recursion: RecursionCounter,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `sql`.
    pub fn new(sql: &'a str) -> Self {
        Parser {
            tokenizer: Tokenizer::new(sql),
            pos: Location::start(),
            tok: Token::Eof,
            lit: String::new(),
            full: false,
            recursion: RecursionCounter::new(DEFAULT_REMAINING_DEPTH),
        }
    }

    /// Overrides the maximum statement/expression nesting depth, after
    /// which parsing fails with [`Error::RecursionLimitExceeded`].
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion = RecursionCounter::new(limit);
        self
    }

    /// Parses the next statement, consuming its trailing semicolon (or the
    /// end of input). Returns [`Error::UnexpectedEof`] when no statement
    /// remains.
    pub fn parse_statement(&mut self) -> Result<Statement, Error> {
        let _guard = self.recursion.try_decrease()?;

        let stmt = match self.peek() {
            Token::Eof => return Err(Error::UnexpectedEof),
            Token::Explain => Statement::Explain(self.parse_explain_statement()?),
            _ => self.parse_non_explain_statement()?,
        };

        // Read the trailing semicolon or end of input.
        if !matches!(self.peek(), Token::Eof | Token::SemiColon) {
            return Err(self.error_expected(self.pos, "semicolon or EOF"));
        }
        self.scan();

        Ok(stmt)
    }

    fn parse_explain_statement(&mut self) -> Result<ExplainStatement, Error> {
        self.scan();

        let mut query_plan = false;
        if self.peek() == Token::Query {
            self.scan();
            if self.peek() != Token::Plan {
                return Err(self.error_expected(self.pos, "PLAN"));
            }
            self.scan();
            query_plan = true;
        }

        let stmt = self.parse_non_explain_statement()?;
        Ok(ExplainStatement {
            query_plan,
            stmt: Box::new(stmt),
        })
    }

    fn parse_non_explain_statement(&mut self) -> Result<Statement, Error> {
        match self.peek() {
            Token::Pragma => self.parse_pragma_statement().map(Statement::Pragma),
            Token::Analyze => self.parse_analyze_statement().map(Statement::Analyze),
            Token::Reindex => self.parse_reindex_statement().map(Statement::Reindex),
            Token::Alter => self.parse_alter_table_statement().map(Statement::AlterTable),
            Token::Begin => self.parse_begin_statement().map(Statement::Begin),
            Token::Commit | Token::End => self.parse_commit_statement().map(Statement::Commit),
            Token::Rollback => self.parse_rollback_statement().map(Statement::Rollback),
            Token::Savepoint => self.parse_savepoint_statement().map(Statement::Savepoint),
            Token::Release => self.parse_release_statement().map(Statement::Release),
            Token::Create => self.parse_create_statement(),
            Token::Drop => self.parse_drop_statement(),
            Token::Select | Token::Values => Ok(Statement::Select(Box::new(
                self.parse_select_statement(false, None)?,
            ))),
            Token::Insert | Token::Replace => Ok(Statement::Insert(Box::new(
                self.parse_insert_statement(false, None)?,
            ))),
            Token::Update => Ok(Statement::Update(Box::new(
                self.parse_update_statement(false, None)?,
            ))),
            Token::Delete => Ok(Statement::Delete(Box::new(
                self.parse_delete_statement(false, None)?,
            ))),
            Token::With => self.parse_with_statement(),
            Token::Attach => self.parse_attach_statement().map(Statement::Attach),
            Token::Detach => self.parse_detach_statement().map(Statement::Detach),
            Token::Vacuum => self.parse_vacuum_statement().map(Statement::Vacuum),
            _ => Err(self.error_expected(self.pos, "statement")),
        }
    }

    // Only called from parse_non_explain_statement and trigger bodies: the
    // statement kind is unknown until the CTEs have been read.
    pub(crate) fn parse_with_statement(&mut self) -> Result<Statement, Error> {
        let with = self.parse_with_clause()?;

        match self.peek() {
            Token::Select | Token::Values => Ok(Statement::Select(Box::new(
                self.parse_select_statement(false, Some(with))?,
            ))),
            Token::Insert | Token::Replace => Ok(Statement::Insert(Box::new(
                self.parse_insert_statement(false, Some(with))?,
            ))),
            Token::Update => Ok(Statement::Update(Box::new(
                self.parse_update_statement(false, Some(with))?,
            ))),
            Token::Delete => Ok(Statement::Delete(Box::new(
                self.parse_delete_statement(false, Some(with))?,
            ))),
            _ => Err(self.error_expected(
                self.pos,
                "SELECT, VALUES, INSERT, REPLACE, UPDATE, or DELETE",
            )),
        }
    }

    fn parse_begin_statement(&mut self) -> Result<BeginStatement, Error> {
        self.scan();

        let behavior = match self.peek() {
            Token::Deferred => {
                self.scan();
                Some(TransactionBehavior::Deferred)
            }
            Token::Immediate => {
                self.scan();
                Some(TransactionBehavior::Immediate)
            }
            Token::Exclusive => {
                self.scan();
                Some(TransactionBehavior::Exclusive)
            }
            _ => None,
        };

        if self.peek() == Token::Transaction {
            self.scan();
        }
        Ok(BeginStatement { behavior })
    }

    fn parse_commit_statement(&mut self) -> Result<CommitStatement, Error> {
        self.scan();
        if self.peek() == Token::Transaction {
            self.scan();
        }
        Ok(CommitStatement)
    }

    fn parse_rollback_statement(&mut self) -> Result<RollbackStatement, Error> {
        self.scan();

        if self.peek() == Token::Transaction {
            self.scan();
        }

        let mut savepoint_name = None;
        if self.peek() == Token::To {
            self.scan();
            if self.peek() == Token::Savepoint {
                self.scan();
            }
            savepoint_name = Some(self.parse_ident("savepoint name")?);
        }
        Ok(RollbackStatement { savepoint_name })
    }

    fn parse_savepoint_statement(&mut self) -> Result<SavepointStatement, Error> {
        self.scan();
        let name = self.parse_ident("savepoint name")?;
        Ok(SavepointStatement { name })
    }

    fn parse_release_statement(&mut self) -> Result<ReleaseStatement, Error> {
        self.scan();
        if self.peek() == Token::Savepoint {
            self.scan();
        }
        let name = self.parse_ident("savepoint name")?;
        Ok(ReleaseStatement { name })
    }

    fn parse_attach_statement(&mut self) -> Result<AttachStatement, Error> {
        self.scan();
        if self.peek() == Token::Database {
            self.scan();
        }

        let expr = self.parse_ident("attach expr")?;

        if self.peek() != Token::As {
            return Err(self.error_expected(self.pos, "AS"));
        }
        self.scan();
        let schema = self.parse_ident("schema name")?;

        Ok(AttachStatement { expr, schema })
    }

    fn parse_detach_statement(&mut self) -> Result<DetachStatement, Error> {
        self.scan();
        if self.peek() == Token::Database {
            self.scan();
        }
        let schema = self.parse_ident("schema name")?;
        Ok(DetachStatement { schema })
    }

    fn parse_vacuum_statement(&mut self) -> Result<VacuumStatement, Error> {
        self.scan();

        let mut stmt = VacuumStatement::default();
        match self.peek() {
            Token::Into => {}
            Token::Eof | Token::SemiColon => return Ok(stmt),
            _ => {
                stmt.schema = Some(self.parse_ident("schema name")?);
            }
        }

        if self.peek() == Token::Into {
            self.scan();
            stmt.into = Some(self.parse_ident("vacuum expr")?);
        }
        Ok(stmt)
    }

    fn parse_pragma_statement(&mut self) -> Result<PragmaStatement, Error> {
        self.scan();

        let mut schema = None;
        let mut name = self.parse_ident("schema name")?;

        // Handle <schema>.<pragma-name>.
        if self.peek() == Token::Period {
            self.scan();
            schema = Some(name);
            name = self.parse_ident("pragma name")?;
        }

        let expr = match self.peek() {
            Token::Eq => {
                // pragma-name = value
                self.scan();
                let rhs = self.parse_expression()?;
                Expr::Binary(BinaryExpr {
                    left: Box::new(Expr::Ident(name)),
                    op: Op::Eq,
                    right: Box::new(rhs),
                })
            }
            Token::LParen => {
                // pragma-name(args)
                Expr::Call(Box::new(self.parse_call(name)?))
            }
            _ => Expr::Ident(name),
        };

        Ok(PragmaStatement { schema, expr })
    }

    fn parse_analyze_statement(&mut self) -> Result<AnalyzeStatement, Error> {
        self.scan();

        let mut name = None;
        if self.peek().is_ident() {
            name = Some(self.parse_qualified_name(true, false, false, false, false)?);
        }
        Ok(AnalyzeStatement { name })
    }

    fn parse_reindex_statement(&mut self) -> Result<ReindexStatement, Error> {
        self.scan();

        // An index, table, or collation name may follow.
        let mut name = None;
        if self.peek().is_ident() {
            name = Some(self.parse_qualified_name(true, false, false, false, false)?);
        }
        Ok(ReindexStatement { name })
    }

    /// Parses an identifier, also accepting strings and bare-usable
    /// keywords.
    pub(crate) fn parse_ident(&mut self, desc: &str) -> Result<Ident, Error> {
        let tok = self.scan();
        match tok {
            Token::Ident | Token::QuotedIdent => Ok(Ident {
                name: self.lit.clone(),
                quoted: tok == Token::QuotedIdent,
            }),
            Token::Null => Ok(Ident::new(self.lit.clone())),
            Token::String => Ok(Ident {
                name: self.lit.clone(),
                quoted: true,
            }),
            _ if tok.is_bare_keyword() => Ok(Ident::new(self.lit.clone())),
            _ => Err(self.error_expected(self.pos, desc)),
        }
    }

    /// Parses a (possibly multi-word) type name with optional precision
    /// and scale.
    pub(crate) fn parse_type(&mut self) -> Result<Type, Error> {
        let mut name: Option<Ident> = None;
        loop {
            let tok = self.peek();
            if tok != Token::Ident && tok != Token::Null {
                break;
            }
            let part = self.parse_ident("type name")?;
            match &mut name {
                None => name = Some(part),
                Some(name) => {
                    name.name.push(' ');
                    name.name.push_str(&part.name);
                }
            }
        }

        let Some(name) = name else {
            return Err(self.error_expected(self.pos, "type name"));
        };
        let mut col_type = Type {
            name,
            precision: None,
            scale: None,
        };

        // Optionally parse precision & scale.
        if self.peek() == Token::LParen {
            self.scan();
            col_type.precision = Some(self.parse_signed_number("precision")?);

            if self.peek() == Token::Comma {
                self.scan();
                col_type.scale = Some(self.parse_signed_number("scale")?);
            }

            if self.peek() != Token::RParen {
                return Err(self.error_expected(self.pos, "right paren"));
            }
            self.scan();
        }

        Ok(col_type)
    }

    pub(crate) fn parse_signed_number(&mut self, desc: &str) -> Result<NumberLit, Error> {
        let mut tok = self.scan();
        let mut lit = self.lit.clone();

        // Fold a "+" or "-" prefix into the number's lexeme.
        if tok == Token::Plus || tok == Token::Minus {
            let prefix = lit;
            tok = self.scan();
            lit = format!("{}{}", prefix, self.lit);
        }

        match tok {
            Token::Float | Token::Integer => Ok(NumberLit::new(lit)),
            _ => Err(self.error_expected(self.pos, desc)),
        }
    }

    /// Parses a qualified name. The switches select which shapes are
    /// accepted: a `schema.` prefix, a trailing `[AS] alias`, an
    /// `INDEXED BY`/`NOT INDEXED` hint, a function-call argument list, and
    /// whether a bare (non-keyword) identifier may serve as the alias
    /// without `AS`.
    pub(crate) fn parse_qualified_name(
        &mut self,
        schema_ok: bool,
        alias_ok: bool,
        indexed_ok: bool,
        function_ok: bool,
        without_keyword_as: bool,
    ) -> Result<QualifiedName, Error> {
        let ident = self.parse_ident("qualified name")?;
        self.parse_qualified_name_from_ident(
            ident,
            schema_ok,
            alias_ok,
            indexed_ok,
            function_ok,
            without_keyword_as,
        )
    }

    pub(crate) fn parse_qualified_name_from_ident(
        &mut self,
        ident: Ident,
        schema_ok: bool,
        alias_ok: bool,
        indexed_ok: bool,
        function_ok: bool,
        without_keyword_as: bool,
    ) -> Result<QualifiedName, Error> {
        let mut name = QualifiedName::default();

        if self.peek() == Token::Period && schema_ok {
            name.schema = Some(ident);
            self.scan();
            name.name = self.parse_ident("qualified name")?;
        } else {
            name.name = ident;
        }

        if self.peek() == Token::LParen && function_ok {
            self.scan();
            name.function_call = true;

            if self.peek() == Token::Mult {
                self.scan();
                name.function_star = true;
            } else {
                if self.peek() == Token::Distinct {
                    self.scan();
                    name.function_distinct = true;
                }
                while self.peek() != Token::RParen {
                    let arg = self.parse_function_arg()?;
                    name.function_args.push(arg);

                    if self.peek() == Token::RParen {
                        break;
                    } else if self.peek() != Token::Comma {
                        return Err(self.error_expected(self.pos, "comma or right paren"));
                    }
                    self.scan();
                }
            }

            if self.peek() != Token::RParen {
                return Err(self.error_expected(self.pos, "right paren"));
            }
            self.scan();
        }

        // Parse the optional alias ("AS alias" or just "alias").
        let tok = self.peek();
        if tok == Token::As && alias_ok {
            self.scan();
            name.alias = Some(self.parse_ident("alias name")?);
        } else if tok.is_ident() && !tok.is_bare_keyword() && alias_ok && without_keyword_as {
            name.alias = Some(self.parse_ident("alias name")?);
        }

        // Parse the optional "INDEXED BY index-name" or "NOT INDEXED".
        match self.peek() {
            Token::Indexed if indexed_ok => {
                self.scan();
                if self.peek() != Token::By {
                    return Err(self.error_expected(self.pos, "BY"));
                }
                self.scan();
                name.index = Some(self.parse_ident("index name")?);
            }
            Token::Not if indexed_ok => {
                self.scan();
                if self.peek() != Token::Indexed {
                    return Err(self.error_expected(self.pos, "INDEXED"));
                }
                self.scan();
                name.not_indexed = true;
            }
            _ => {}
        }

        Ok(name)
    }

    /// Returns the next non-comment token, refilling the stored triple
    /// unless the pushback slot is occupied.
    pub(crate) fn scan(&mut self) -> Token {
        if self.full {
            self.full = false;
            return self.tok;
        }

        // Continue scanning until we find a non-comment token.
        loop {
            let (pos, tok, lit) = self.tokenizer.next_token();
            if tok == Token::Comment {
                continue;
            }
            self.pos = pos;
            self.tok = tok;
            self.lit = lit;
            return tok;
        }
    }

    /// Pushes the last scanned token back; only one token may be buffered.
    pub(crate) fn unscan(&mut self) {
        debug_assert!(!self.full);
        self.full = true;
    }

    /// Returns the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Token {
        if !self.full {
            self.scan();
            self.unscan();
        }
        self.tok
    }

    /// Builds an `expected ..., found ...` error. The found part names the
    /// buffered token and is only attached when the error is anchored at
    /// it.
    pub(crate) fn error_expected(&self, pos: Location, desc: &str) -> Error {
        let mut msg = format!("expected {}", desc);
        if pos == self.pos {
            if self.tok.is_literal() || self.tok == Token::QuotedIdent || self.tok == Token::Ident {
                msg.push_str(&format!(", found {}", self.lit));
            } else {
                msg.push_str(&format!(", found '{}'", self.tok));
            }
        }
        Error::Syntax { pos, msg }
    }
}
