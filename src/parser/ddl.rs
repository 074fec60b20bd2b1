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

//! Schema statement parsing: CREATE/DROP for tables, views, indexes,
//! triggers, and virtual tables; ALTER TABLE; column and table
//! constraints.

use crate::ast::*;
use crate::parser::{Error, Parser};
use crate::tokenizer::{is_type_name, Token};

// Returns true if `tok` can start a constraint in the given context.
fn is_constraint_start(tok: Token, is_table: bool) -> bool {
    match tok {
        // Both table and column constraints.
        Token::Constraint | Token::Primary | Token::Unique | Token::Check => true,
        // Table constraints only.
        Token::Foreign => is_table,
        // Column constraints only.
        Token::Not
        | Token::Default
        | Token::References
        | Token::Generated
        | Token::As
        | Token::Collate => !is_table,
        _ => false,
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_create_statement(&mut self) -> Result<Statement, Error> {
        self.scan();
        let create_pos = self.pos;

        match self.peek() {
            Token::Table => Ok(Statement::CreateTable(Box::new(
                self.parse_create_table_statement(false)?,
            ))),
            Token::Virtual => Ok(Statement::CreateVirtualTable(
                self.parse_create_virtual_table_statement()?,
            )),
            Token::View => Ok(Statement::CreateView(Box::new(
                self.parse_create_view_statement(false)?,
            ))),
            Token::Index | Token::Unique => Ok(Statement::CreateIndex(Box::new(
                self.parse_create_index_statement()?,
            ))),
            Token::Trigger => Ok(Statement::CreateTrigger(Box::new(
                self.parse_create_trigger_statement(false)?,
            ))),
            Token::Temp | Token::Temporary => {
                self.scan();
                let temp_pos = self.pos;

                match self.peek() {
                    Token::Table => Ok(Statement::CreateTable(Box::new(
                        self.parse_create_table_statement(true)?,
                    ))),
                    Token::View => Ok(Statement::CreateView(Box::new(
                        self.parse_create_view_statement(true)?,
                    ))),
                    Token::Trigger => Ok(Statement::CreateTrigger(Box::new(
                        self.parse_create_trigger_statement(true)?,
                    ))),
                    _ => Err(self.error_expected(temp_pos, "TABLE, VIEW, or TRIGGER")),
                }
            }
            _ => Err(self.error_expected(create_pos, "TABLE, VIEW, INDEX, TRIGGER")),
        }
    }

    pub(crate) fn parse_drop_statement(&mut self) -> Result<Statement, Error> {
        self.scan();
        let drop_pos = self.pos;

        match self.peek() {
            Token::Table => {
                self.scan();
                let (if_exists, name) = self.parse_drop_tail()?;
                Ok(Statement::DropTable(DropTableStatement { if_exists, name }))
            }
            Token::View => {
                self.scan();
                let (if_exists, name) = self.parse_drop_tail()?;
                Ok(Statement::DropView(DropViewStatement { if_exists, name }))
            }
            Token::Index => {
                self.scan();
                let (if_exists, name) = self.parse_drop_tail()?;
                Ok(Statement::DropIndex(DropIndexStatement { if_exists, name }))
            }
            Token::Trigger => {
                self.scan();
                let (if_exists, name) = self.parse_drop_tail()?;
                Ok(Statement::DropTrigger(DropTriggerStatement {
                    if_exists,
                    name,
                }))
            }
            _ => Err(self.error_expected(drop_pos, "TABLE, VIEW, INDEX, or TRIGGER")),
        }
    }

    // The shared "[IF EXISTS] name" tail of every DROP statement.
    fn parse_drop_tail(&mut self) -> Result<(bool, QualifiedName), Error> {
        let mut if_exists = false;
        if self.peek() == Token::If {
            self.scan();
            if self.peek() != Token::Exists {
                return Err(self.error_expected(self.pos, "EXISTS"));
            }
            self.scan();
            if_exists = true;
        }

        let name = self.parse_qualified_name(true, false, false, false, false)?;
        Ok((if_exists, name))
    }

    // The "[IF NOT EXISTS]" prefix of every CREATE statement.
    fn parse_if_not_exists(&mut self) -> Result<bool, Error> {
        if self.peek() != Token::If {
            return Ok(false);
        }
        self.scan();

        if self.peek() != Token::Not {
            return Err(self.error_expected(self.pos, "NOT"));
        }
        self.scan();

        if self.peek() != Token::Exists {
            return Err(self.error_expected(self.pos, "EXISTS"));
        }
        self.scan();

        Ok(true)
    }

    fn parse_create_table_statement(
        &mut self,
        temp: bool,
    ) -> Result<CreateTableStatement, Error> {
        self.scan();

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name(true, false, false, false, false)?;

        let mut stmt = CreateTableStatement {
            temp,
            if_not_exists,
            name,
            columns: vec![],
            constraints: vec![],
            without_rowid: false,
            strict: false,
            select: None,
        };

        // Either a column/constraint list or a table built from a SELECT.
        match self.peek() {
            Token::LParen => {
                self.scan();

                stmt.columns = self.parse_column_definitions()?;
                stmt.constraints = self.parse_table_constraints()?;

                if self.peek() != Token::RParen {
                    return Err(self.error_expected(self.pos, "right paren"));
                }
                self.scan();

                // Parse table options: STRICT and WITHOUT ROWID, in any
                // order, comma-separated.
                if matches!(self.peek(), Token::Without | Token::Strict) {
                    loop {
                        match self.peek() {
                            Token::Strict => {
                                self.scan();
                                stmt.strict = true;
                            }
                            Token::Without => {
                                self.scan();
                                if self.peek() != Token::Rowid {
                                    return Err(self.error_expected(self.pos, "ROWID"));
                                }
                                self.scan();
                                stmt.without_rowid = true;
                            }
                            _ => {
                                return Err(
                                    self.error_expected(self.pos, "STRICT or WITHOUT ROWID")
                                )
                            }
                        }

                        if self.peek() != Token::Comma {
                            break;
                        }
                        self.scan();
                    }
                }

                Ok(stmt)
            }
            Token::As => {
                self.scan();
                stmt.select = Some(Box::new(self.parse_select_statement(false, None)?));
                Ok(stmt)
            }
            _ => Err(self.error_expected(self.pos, "AS or left paren")),
        }
    }

    fn parse_column_definitions(&mut self) -> Result<Vec<ColumnDefinition>, Error> {
        let mut columns = vec![];
        loop {
            let tok = self.peek();
            if tok.is_ident() {
                columns.push(self.parse_column_definition()?);
                if self.peek() == Token::Comma {
                    self.scan();
                }
            } else if tok == Token::RParen || is_constraint_start(tok, true) {
                return Ok(columns);
            } else {
                return Err(
                    self.error_expected(self.pos, "column name, CONSTRAINT, or right paren")
                );
            }
        }
    }

    pub(crate) fn parse_column_definition(&mut self) -> Result<ColumnDefinition, Error> {
        let name = self.parse_ident("column name")?;

        let mut col_type = None;
        if matches!(self.peek(), Token::Ident | Token::Null) {
            col_type = Some(self.parse_type()?);
        }

        let constraints = self.parse_column_constraints()?;
        Ok(ColumnDefinition {
            name,
            col_type,
            constraints,
        })
    }

    fn parse_table_constraints(&mut self) -> Result<Vec<Constraint>, Error> {
        let mut constraints = vec![];
        if !is_constraint_start(self.peek(), true) {
            return Ok(constraints);
        }

        loop {
            constraints.push(self.parse_constraint(true)?);

            if self.peek() != Token::Comma {
                return Ok(constraints);
            }
            self.scan();
        }
    }

    fn parse_column_constraints(&mut self) -> Result<Vec<Constraint>, Error> {
        let mut constraints = vec![];
        while is_constraint_start(self.peek(), false) {
            constraints.push(self.parse_constraint(false)?);
        }
        Ok(constraints)
    }

    fn parse_constraint(&mut self, is_table: bool) -> Result<Constraint, Error> {
        // Parse the constraint name, if specified.
        let mut name = None;
        if self.peek() == Token::Constraint {
            self.scan();
            name = Some(self.parse_ident("constraint name")?);
        }

        // Table constraints use a subset of the column constraints.
        if is_table {
            return match self.peek() {
                Token::Primary => Ok(Constraint::PrimaryKey(
                    self.parse_primary_key_constraint(name, is_table)?,
                )),
                Token::Unique => Ok(Constraint::Unique(
                    self.parse_unique_constraint(name, is_table)?,
                )),
                Token::Check => Ok(Constraint::Check(self.parse_check_constraint(name)?)),
                Token::Foreign => Ok(Constraint::ForeignKey(
                    self.parse_foreign_key_constraint(name, is_table)?,
                )),
                _ => Err(self.error_expected(self.pos, "PRIMARY, UNIQUE, CHECK, or FOREIGN")),
            };
        }

        match self.peek() {
            Token::Primary => Ok(Constraint::PrimaryKey(
                self.parse_primary_key_constraint(name, is_table)?,
            )),
            Token::Not => Ok(Constraint::NotNull(self.parse_not_null_constraint(name)?)),
            Token::Unique => Ok(Constraint::Unique(
                self.parse_unique_constraint(name, is_table)?,
            )),
            Token::Check => Ok(Constraint::Check(self.parse_check_constraint(name)?)),
            Token::Default => Ok(Constraint::Default(self.parse_default_constraint(name)?)),
            Token::Generated | Token::As => Ok(Constraint::Generated(
                self.parse_generated_constraint(name)?,
            )),
            Token::Collate => Ok(Constraint::Collate(self.parse_collate_constraint(name)?)),
            Token::References => Ok(Constraint::ForeignKey(
                self.parse_foreign_key_constraint(name, is_table)?,
            )),
            _ => Err(self.error_expected(self.pos, "constraint")),
        }
    }

    fn parse_primary_key_constraint(
        &mut self,
        name: Option<Ident>,
        is_table: bool,
    ) -> Result<PrimaryKeyConstraint, Error> {
        let mut constraint = PrimaryKeyConstraint {
            name,
            ..PrimaryKeyConstraint::default()
        };
        self.scan();

        if self.peek() != Token::Key {
            return Err(self.error_expected(self.pos, "KEY"));
        }
        self.scan();

        match self.peek() {
            Token::Asc => {
                self.scan();
                constraint.direction = Some(SortDirection::Asc);
            }
            Token::Desc => {
                self.scan();
                constraint.direction = Some(SortDirection::Desc);
            }
            _ => {}
        }

        // The table form names columns; the column form names a sort
        // direction instead.
        if is_table {
            if self.peek() != Token::LParen {
                return Err(self.error_expected(self.pos, "left paren"));
            }
            self.scan();

            loop {
                constraint.columns.push(self.parse_ident("column name")?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
        }

        if self.peek() == Token::On {
            constraint.conflict = Some(self.parse_conflict_clause()?);
        }

        if !is_table && self.peek() == Token::Autoincrement {
            self.scan();
            constraint.autoincrement = true;
        }
        Ok(constraint)
    }

    fn parse_not_null_constraint(
        &mut self,
        name: Option<Ident>,
    ) -> Result<NotNullConstraint, Error> {
        let mut constraint = NotNullConstraint {
            name,
            conflict: None,
        };
        self.scan();

        if self.peek() != Token::Null {
            return Err(self.error_expected(self.pos, "NULL"));
        }
        self.scan();

        if self.peek() == Token::On {
            constraint.conflict = Some(self.parse_conflict_clause()?);
        }

        Ok(constraint)
    }

    fn parse_unique_constraint(
        &mut self,
        name: Option<Ident>,
        is_table: bool,
    ) -> Result<UniqueConstraint, Error> {
        let mut constraint = UniqueConstraint {
            name,
            ..UniqueConstraint::default()
        };
        self.scan();

        if is_table {
            if self.peek() != Token::LParen {
                return Err(self.error_expected(self.pos, "left paren"));
            }
            self.scan();

            loop {
                constraint.columns.push(self.parse_indexed_column()?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
        }

        if self.peek() == Token::On {
            constraint.conflict = Some(self.parse_conflict_clause()?);
        }

        Ok(constraint)
    }

    fn parse_check_constraint(&mut self, name: Option<Ident>) -> Result<CheckConstraint, Error> {
        self.scan();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let expr = self.parse_expression()?;

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        Ok(CheckConstraint { name, expr })
    }

    fn parse_default_constraint(
        &mut self,
        name: Option<Ident>,
    ) -> Result<DefaultConstraint, Error> {
        self.scan();

        // A double-quoted token after DEFAULT is accepted as a string
        // value even though quotes normally mean identifiers. SQLite keeps
        // this for compatibility with its double-quoted-string mode, and
        // schemas in the wild rely on it.
        let expr = if self.peek() == Token::QuotedIdent {
            self.scan();
            Expr::String(StringLit {
                value: self.lit.clone(),
            })
        } else if self.peek().is_literal() {
            self.parse_literal()
        } else if matches!(self.peek(), Token::Plus | Token::Minus) {
            Expr::Number(self.parse_signed_number("signed number")?)
        } else {
            if self.peek() != Token::LParen {
                return Err(self.error_expected(self.pos, "literal value or left paren"));
            }
            self.scan();

            let expr = self.parse_expression()?;

            if self.peek() != Token::RParen {
                return Err(self.error_expected(self.pos, "right paren"));
            }
            self.scan();
            expr
        };

        Ok(DefaultConstraint { name, expr })
    }

    fn parse_generated_constraint(
        &mut self,
        name: Option<Ident>,
    ) -> Result<GeneratedConstraint, Error> {
        if self.peek() == Token::Generated {
            self.scan();

            if self.peek() != Token::Always {
                return Err(self.error_expected(self.pos, "ALWAYS"));
            }
            self.scan();
        }

        if self.peek() != Token::As {
            return Err(self.error_expected(self.pos, "AS"));
        }
        self.scan();

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let expr = self.parse_expression()?;

        if self.peek() != Token::RParen {
            return Err(self.error_expected(self.pos, "right paren"));
        }
        self.scan();

        let storage = match self.peek() {
            Token::Stored => {
                self.scan();
                Some(GeneratedStorage::Stored)
            }
            Token::Virtual => {
                self.scan();
                Some(GeneratedStorage::Virtual)
            }
            _ => None,
        };

        Ok(GeneratedConstraint {
            name,
            expr,
            storage,
        })
    }

    fn parse_collate_constraint(
        &mut self,
        name: Option<Ident>,
    ) -> Result<CollateConstraint, Error> {
        self.scan();
        let collation = self.parse_ident("collation name")?;
        Ok(CollateConstraint { name, collation })
    }

    fn parse_foreign_key_constraint(
        &mut self,
        name: Option<Ident>,
        is_table: bool,
    ) -> Result<ForeignKeyConstraint, Error> {
        let mut constraint = ForeignKeyConstraint {
            name,
            ..ForeignKeyConstraint::default()
        };

        // Table constraints start with "FOREIGN KEY (col1, col2, ...)".
        if is_table {
            self.scan();

            if self.peek() != Token::Key {
                return Err(self.error_expected(self.pos, "KEY"));
            }
            self.scan();

            if self.peek() != Token::LParen {
                return Err(self.error_expected(self.pos, "left paren"));
            }
            self.scan();

            loop {
                constraint.columns.push(self.parse_ident("column name")?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
        }

        if self.peek() != Token::References {
            return Err(self.error_expected(self.pos, "REFERENCES"));
        }
        self.scan();

        constraint.foreign_table = self.parse_ident("foreign table name")?;

        // Parse the foreign column list.
        if self.peek() == Token::LParen {
            self.scan();

            loop {
                constraint
                    .foreign_columns
                    .push(self.parse_ident("foreign column name")?);

                if self.peek() == Token::RParen {
                    break;
                } else if self.peek() != Token::Comma {
                    return Err(self.error_expected(self.pos, "comma or right paren"));
                }
                self.scan();
            }
            self.scan();
        }

        // Parse the "ON UPDATE|DELETE <action>" arguments.
        while self.peek() == Token::On {
            self.scan();

            let on = if self.peek() == Token::Update {
                self.scan();
                ForeignKeyEvent::Update
            } else if self.peek() == Token::Delete {
                self.scan();
                ForeignKeyEvent::Delete
            } else {
                return Err(self.error_expected(self.pos, "UPDATE or DELETE"));
            };

            let action = if self.peek() == Token::Set {
                self.scan();
                if self.peek() == Token::Null {
                    self.scan();
                    ForeignKeyAction::SetNull
                } else if self.peek() == Token::Default {
                    self.scan();
                    ForeignKeyAction::SetDefault
                } else {
                    return Err(self.error_expected(self.pos, "NULL or DEFAULT"));
                }
            } else if self.peek() == Token::Cascade {
                self.scan();
                ForeignKeyAction::Cascade
            } else if self.peek() == Token::Restrict {
                self.scan();
                ForeignKeyAction::Restrict
            } else if self.peek() == Token::No {
                self.scan();
                if self.peek() != Token::Action {
                    return Err(self.error_expected(self.pos, "ACTION"));
                }
                self.scan();
                ForeignKeyAction::NoAction
            } else {
                return Err(self.error_expected(
                    self.pos,
                    "SET NULL, SET DEFAULT, CASCADE, RESTRICT, or NO ACTION",
                ));
            };

            constraint.args.push(ForeignKeyArg { on, action });
        }

        // Parse the deferrable subclause.
        if matches!(self.peek(), Token::Not | Token::Deferrable) {
            if self.peek() == Token::Not {
                self.scan();
                if self.peek() != Token::Deferrable {
                    return Err(self.error_expected(self.pos, "DEFERRABLE"));
                }
                self.scan();
                constraint.deferrable = Some(Deferrable::NotDeferrable);
            } else {
                self.scan();
                constraint.deferrable = Some(Deferrable::Deferrable);
            }

            if self.peek() == Token::Initially {
                self.scan();
                if self.peek() == Token::Deferred {
                    self.scan();
                    constraint.initially = Some(Initially::Deferred);
                } else if self.peek() == Token::Immediate {
                    self.scan();
                    constraint.initially = Some(Initially::Immediate);
                }
            }
        }

        Ok(constraint)
    }

    pub(crate) fn parse_conflict_clause(&mut self) -> Result<ConflictClause, Error> {
        self.scan();

        if self.peek() != Token::Conflict {
            return Err(self.error_expected(self.pos, "CONFLICT"));
        }
        self.scan();

        let clause = match self.peek() {
            Token::Rollback => ConflictClause::Rollback,
            Token::Abort => ConflictClause::Abort,
            Token::Fail => ConflictClause::Fail,
            Token::Ignore => ConflictClause::Ignore,
            Token::Replace => ConflictClause::Replace,
            _ => {
                return Err(
                    self.error_expected(self.pos, "ROLLBACK, ABORT, FAIL, IGNORE or REPLACE")
                )
            }
        };
        self.scan();
        Ok(clause)
    }

    pub(crate) fn parse_indexed_column(&mut self) -> Result<IndexedColumn, Error> {
        let expr = self.parse_expression()?;

        let direction = match self.peek() {
            Token::Asc => {
                self.scan();
                Some(SortDirection::Asc)
            }
            Token::Desc => {
                self.scan();
                Some(SortDirection::Desc)
            }
            _ => None,
        };

        Ok(IndexedColumn { expr, direction })
    }

    fn parse_create_virtual_table_statement(
        &mut self,
    ) -> Result<CreateVirtualTableStatement, Error> {
        self.scan();

        if self.peek() != Token::Table {
            return Err(self.error_expected(self.pos, "TABLE"));
        }
        self.scan();

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name(true, false, false, false, false)?;

        if self.peek() != Token::Using {
            return Err(self.error_expected(self.pos, "USING"));
        }
        self.scan();

        let module_name = self.parse_ident("module name")?;

        let mut stmt = CreateVirtualTableStatement {
            if_not_exists,
            name,
            module_name,
            arguments: vec![],
        };

        // Module arguments are optional.
        if self.peek() != Token::LParen {
            return Ok(stmt);
        }
        self.scan();

        loop {
            stmt.arguments.push(self.parse_module_argument()?);

            match self.peek() {
                Token::RParen => break,
                Token::Comma => {
                    self.scan();
                }
                _ => return Err(self.error_expected(self.pos, "comma or right paren")),
            }
        }
        self.scan();

        Ok(stmt)
    }

    fn parse_module_argument(&mut self) -> Result<ModuleArgument, Error> {
        let tok = self.peek();
        let name = if tok.is_ident() {
            self.parse_ident("module argument name")?
        } else if tok.is_literal() || Token::keyword(&self.lit).is_some() {
            // Argument names may also be literals or reserved keywords.
            self.scan();
            Ident::new(self.lit.clone())
        } else {
            return Err(self.error_expected(self.pos, "module argument name"));
        };

        let mut argument = ModuleArgument {
            name,
            literal: None,
            arg_type: None,
        };

        if self.peek() == Token::Eq {
            self.scan();
            argument.literal = Some(self.parse_operand()?);
        } else if is_type_name(&self.lit) {
            argument.arg_type = Some(self.parse_type()?);
        }

        Ok(argument)
    }

    fn parse_create_view_statement(&mut self, temp: bool) -> Result<CreateViewStatement, Error> {
        self.scan();

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name(true, false, false, false, false)?;

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

        // Parse "AS select-stmt".
        if self.peek() != Token::As {
            return Err(self.error_expected(self.pos, "AS"));
        }
        self.scan();
        let select = self.parse_select_statement(false, None)?;

        Ok(CreateViewStatement {
            temp,
            if_not_exists,
            name,
            columns,
            select: Box::new(select),
        })
    }

    fn parse_create_index_statement(&mut self) -> Result<CreateIndexStatement, Error> {
        let mut unique = false;
        if self.peek() == Token::Unique {
            self.scan();
            unique = true;
        }

        if self.peek() != Token::Index {
            return Err(self.error_expected(self.pos, "INDEX"));
        }
        self.scan();

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name(true, false, false, false, false)?;

        if self.peek() != Token::On {
            return Err(self.error_expected(self.pos, "ON"));
        }
        self.scan();

        let table = self.parse_ident("table name")?;

        if self.peek() != Token::LParen {
            return Err(self.error_expected(self.pos, "left paren"));
        }
        self.scan();

        let mut columns = vec![];
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

        // Parse the optional "WHERE expr" for partial indexes.
        let mut where_expr = None;
        if self.peek() == Token::Where {
            self.scan();
            where_expr = Some(self.parse_expression()?);
        }

        Ok(CreateIndexStatement {
            unique,
            if_not_exists,
            name,
            table,
            columns,
            where_expr,
        })
    }

    fn parse_create_trigger_statement(
        &mut self,
        temp: bool,
    ) -> Result<CreateTriggerStatement, Error> {
        self.scan();

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_name(true, false, false, false, false)?;

        // Parse BEFORE, AFTER, or INSTEAD OF.
        let time = match self.peek() {
            Token::Before => {
                self.scan();
                Some(TriggerTime::Before)
            }
            Token::After => {
                self.scan();
                Some(TriggerTime::After)
            }
            Token::Instead => {
                self.scan();
                if self.peek() != Token::Of {
                    return Err(self.error_expected(self.pos, "OF"));
                }
                self.scan();
                Some(TriggerTime::InsteadOf)
            }
            _ => None,
        };

        // Parse DELETE, INSERT, or UPDATE [OF col, col, ...].
        let event = match self.peek() {
            Token::Delete => {
                self.scan();
                TriggerEvent::Delete
            }
            Token::Insert => {
                self.scan();
                TriggerEvent::Insert
            }
            Token::Update => {
                self.scan();
                let mut columns = vec![];
                if self.peek() == Token::Of {
                    self.scan();
                    loop {
                        columns.push(self.parse_ident("column name")?);
                        if self.peek() != Token::Comma {
                            break;
                        }
                        self.scan();
                    }
                }
                TriggerEvent::Update(columns)
            }
            _ => return Err(self.error_expected(self.pos, "DELETE, INSERT, or UPDATE")),
        };

        // Parse "ON table-name".
        if self.peek() != Token::On {
            return Err(self.error_expected(self.pos, "ON"));
        }
        self.scan();
        let table = self.parse_ident("table name")?;

        // Parse the optional "FOR EACH ROW".
        let mut for_each_row = false;
        if self.peek() == Token::For {
            self.scan();
            if self.peek() != Token::Each {
                return Err(self.error_expected(self.pos, "EACH"));
            }
            self.scan();
            if self.peek() != Token::Row {
                return Err(self.error_expected(self.pos, "ROW"));
            }
            self.scan();
            for_each_row = true;
        }

        // Parse the optional "WHEN expr".
        let mut when_expr = None;
        if self.peek() == Token::When {
            self.scan();
            when_expr = Some(self.parse_expression()?);
        }

        // Parse the trigger body.
        if self.peek() != Token::Begin {
            return Err(self.error_expected(self.pos, "BEGIN"));
        }
        self.scan();

        let mut body = vec![];
        loop {
            body.push(self.parse_trigger_body_statement()?);
            if self.peek() == Token::End {
                break;
            }
        }
        self.scan();

        Ok(CreateTriggerStatement {
            temp,
            if_not_exists,
            name,
            time,
            event,
            table,
            for_each_row,
            when_expr,
            body,
        })
    }

    fn parse_trigger_body_statement(&mut self) -> Result<Statement, Error> {
        let stmt = match self.peek() {
            Token::Select | Token::Values => Statement::Select(Box::new(
                self.parse_select_statement(false, None)?,
            )),
            Token::Insert | Token::Replace => Statement::Insert(Box::new(
                self.parse_insert_statement(true, None)?,
            )),
            Token::Update => Statement::Update(Box::new(
                self.parse_update_statement(true, None)?,
            )),
            Token::Delete => Statement::Delete(Box::new(
                self.parse_delete_statement(true, None)?,
            )),
            Token::With => self.parse_with_statement()?,
            _ => return Err(self.error_expected(self.pos, "statement")),
        };

        // Every trigger body statement has a trailing semicolon.
        if self.peek() != Token::SemiColon {
            return Err(self.error_expected(self.pos, "semicolon"));
        }
        self.scan();

        Ok(stmt)
    }

    pub(crate) fn parse_alter_table_statement(&mut self) -> Result<AlterTableStatement, Error> {
        self.scan();
        if self.peek() != Token::Table {
            return Err(self.error_expected(self.pos, "TABLE"));
        }
        self.scan();

        let name = self.parse_qualified_name(true, false, false, false, false)?;

        match self.peek() {
            Token::Rename => {
                self.scan();

                // Parse "RENAME TO new-table-name".
                if self.peek() == Token::To {
                    self.scan();
                    let to = self.parse_ident("new table name")?;
                    return Ok(AlterTableStatement {
                        name,
                        action: AlterTableAction::RenameTo(to),
                    });
                }

                // Otherwise "RENAME [COLUMN] column-name TO new-name".
                if self.peek() == Token::Column {
                    self.scan();
                } else if !self.peek().is_ident() {
                    return Err(self.error_expected(self.pos, "COLUMN keyword or column name"));
                }
                let column = self.parse_ident("column name")?;

                if self.peek() != Token::To {
                    return Err(self.error_expected(self.pos, "TO"));
                }
                self.scan();
                let to = self.parse_ident("new column name")?;

                Ok(AlterTableStatement {
                    name,
                    action: AlterTableAction::RenameColumn { column, to },
                })
            }
            Token::Add => {
                self.scan();
                if self.peek() == Token::Column {
                    self.scan();
                } else if !self.peek().is_ident() {
                    return Err(self.error_expected(self.pos, "COLUMN keyword or column name"));
                }
                let def = self.parse_column_definition()?;
                Ok(AlterTableStatement {
                    name,
                    action: AlterTableAction::AddColumn(def),
                })
            }
            _ => Err(self.error_expected(self.pos, "ADD or RENAME")),
        }
    }
}
