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

//! Schema definition statements (CREATE/DROP/ALTER), table and column
//! constraints, plus the transaction-control and administration statements
//! (BEGIN, PRAGMA, ATTACH, VACUUM, ...).

use std::fmt;
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::expr::Expr;
use crate::ast::query::{SelectStatement, SortDirection};
use crate::ast::{DisplayCommaSeparated, Ident, QualifiedName, Statement, Type};

/// `EXPLAIN [QUERY PLAN] stmt`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExplainStatement {
    pub query_plan: bool,
    pub stmt: Box<Statement>,
}

impl fmt::Display for ExplainStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("EXPLAIN")?;
        if self.query_plan {
            f.write_str(" QUERY PLAN")?;
        }
        write!(f, " {}", self.stmt)
    }
}

/// `BEGIN [DEFERRED|IMMEDIATE|EXCLUSIVE] [TRANSACTION]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeginStatement {
    pub behavior: Option<TransactionBehavior>,
}

impl fmt::Display for BeginStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("BEGIN")?;
        if let Some(behavior) = &self.behavior {
            write!(f, " {}", behavior)?;
        }
        Ok(())
    }
}

/// The locking behavior named on a `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransactionBehavior {
    Deferred,
    Immediate,
    Exclusive,
}

impl fmt::Display for TransactionBehavior {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TransactionBehavior::Deferred => "DEFERRED",
            TransactionBehavior::Immediate => "IMMEDIATE",
            TransactionBehavior::Exclusive => "EXCLUSIVE",
        })
    }
}

/// `COMMIT [TRANSACTION]` (also spelled `END`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommitStatement;

impl fmt::Display for CommitStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("COMMIT")
    }
}

/// `ROLLBACK [TRANSACTION] [TO [SAVEPOINT] name]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RollbackStatement {
    pub savepoint_name: Option<Ident>,
}

impl fmt::Display for RollbackStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ROLLBACK")?;
        if let Some(name) = &self.savepoint_name {
            write!(f, " TO {}", name)?;
        }
        Ok(())
    }
}

/// `SAVEPOINT name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavepointStatement {
    pub name: Ident,
}

impl fmt::Display for SavepointStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SAVEPOINT {}", self.name)
    }
}

/// `RELEASE [SAVEPOINT] name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReleaseStatement {
    pub name: Ident,
}

impl fmt::Display for ReleaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RELEASE {}", self.name)
    }
}

/// `PRAGMA [schema.]name`, `PRAGMA [schema.]name = value`, or
/// `PRAGMA [schema.]name(args)`. The expression is an identifier, an `=`
/// binary, or a call respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PragmaStatement {
    pub schema: Option<Ident>,
    pub expr: Expr,
}

impl fmt::Display for PragmaStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PRAGMA ")?;
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        write!(f, "{}", self.expr)
    }
}

/// `ATTACH [DATABASE] expr AS schema`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttachStatement {
    /// The database expression: a string literal or identifier.
    pub expr: Ident,
    pub schema: Ident,
}

impl fmt::Display for AttachStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ATTACH {} AS {}", self.expr, self.schema)
    }
}

/// `DETACH [DATABASE] schema`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetachStatement {
    pub schema: Ident,
}

impl fmt::Display for DetachStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DETACH {}", self.schema)
    }
}

/// `VACUUM [schema] [INTO target]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VacuumStatement {
    pub schema: Option<Ident>,
    pub into: Option<Ident>,
}

impl fmt::Display for VacuumStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("VACUUM")?;
        if let Some(schema) = &self.schema {
            write!(f, " {}", schema)?;
        }
        if let Some(into) = &self.into {
            write!(f, " INTO {}", into)?;
        }
        Ok(())
    }
}

/// `ANALYZE [name]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzeStatement {
    pub name: Option<QualifiedName>,
}

impl fmt::Display for AnalyzeStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "ANALYZE {}", name),
            None => f.write_str("ANALYZE"),
        }
    }
}

/// `REINDEX [name]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReindexStatement {
    pub name: Option<QualifiedName>,
}

impl fmt::Display for ReindexStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "REINDEX {}", name),
            None => f.write_str("REINDEX"),
        }
    }
}

/// `CREATE [TEMP] TABLE`, defining either an explicit column/constraint
/// list or a table built from a `SELECT`. Exactly one of the two is
/// populated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTableStatement {
    pub temp: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub columns: Vec<ColumnDefinition>,
    pub constraints: Vec<Constraint>,
    pub without_rowid: bool,
    pub strict: bool,
    pub select: Option<Box<SelectStatement>>,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temp {
            f.write_str("TEMP ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;

        if let Some(select) = &self.select {
            write!(f, " AS {}", select)?;
        } else {
            write!(f, " ({}", DisplayCommaSeparated(&self.columns))?;
            for constraint in &self.constraints {
                write!(f, ", {}", constraint)?;
            }
            f.write_char(')')?;
        }

        if self.without_rowid {
            f.write_str(" WITHOUT ROWID")?;
            if self.strict {
                f.write_str(", STRICT")?;
            }
        } else if self.strict {
            f.write_str(" STRICT")?;
        }
        Ok(())
    }
}

/// One column of a `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnDefinition {
    pub name: Ident,
    pub col_type: Option<Type>,
    pub constraints: Vec<Constraint>,
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(col_type) = &self.col_type {
            write!(f, " {}", col_type)?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// A column or table constraint. The same family covers both; table
/// constraints use the subset that carries column lists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constraint {
    PrimaryKey(PrimaryKeyConstraint),
    NotNull(NotNullConstraint),
    Unique(UniqueConstraint),
    Check(CheckConstraint),
    Default(DefaultConstraint),
    Generated(GeneratedConstraint),
    Collate(CollateConstraint),
    ForeignKey(ForeignKeyConstraint),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constraint::PrimaryKey(c) => c.fmt(f),
            Constraint::NotNull(c) => c.fmt(f),
            Constraint::Unique(c) => c.fmt(f),
            Constraint::Check(c) => c.fmt(f),
            Constraint::Default(c) => c.fmt(f),
            Constraint::Generated(c) => c.fmt(f),
            Constraint::Collate(c) => c.fmt(f),
            Constraint::ForeignKey(c) => c.fmt(f),
        }
    }
}

// Writes the optional "CONSTRAINT name " prefix shared by all constraints.
fn write_constraint_name(f: &mut fmt::Formatter, name: &Option<Ident>) -> fmt::Result {
    if let Some(name) = name {
        write!(f, "CONSTRAINT {} ", name)?;
    }
    Ok(())
}

/// `PRIMARY KEY`, as a column constraint (sort direction, AUTOINCREMENT)
/// or a table constraint (column list).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimaryKeyConstraint {
    pub name: Option<Ident>,
    pub direction: Option<SortDirection>,
    pub conflict: Option<ConflictClause>,
    /// Indexed columns; table-constraint form only.
    pub columns: Vec<Ident>,
    pub autoincrement: bool,
}

impl fmt::Display for PrimaryKeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        f.write_str("PRIMARY KEY")?;
        if let Some(direction) = &self.direction {
            write!(f, " {}", direction)?;
        }
        if let Some(conflict) = &self.conflict {
            write!(f, " {}", conflict)?;
        }
        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
        }
        if self.autoincrement {
            f.write_str(" AUTOINCREMENT")?;
        }
        Ok(())
    }
}

/// `NOT NULL`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotNullConstraint {
    pub name: Option<Ident>,
    pub conflict: Option<ConflictClause>,
}

impl fmt::Display for NotNullConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        f.write_str("NOT NULL")?;
        if let Some(conflict) = &self.conflict {
            write!(f, " {}", conflict)?;
        }
        Ok(())
    }
}

/// `UNIQUE`, with an indexed-column list in the table-constraint form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniqueConstraint {
    pub name: Option<Ident>,
    pub conflict: Option<ConflictClause>,
    pub columns: Vec<IndexedColumn>,
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        f.write_str("UNIQUE")?;
        if let Some(conflict) = &self.conflict {
            write!(f, " {}", conflict)?;
        }
        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
        }
        Ok(())
    }
}

/// `CHECK (expr)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckConstraint {
    pub name: Option<Ident>,
    pub expr: Expr,
}

impl fmt::Display for CheckConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        write!(f, "CHECK ({})", self.expr)
    }
}

/// `DEFAULT literal` or `DEFAULT (expr)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefaultConstraint {
    pub name: Option<Ident>,
    pub expr: Expr,
}

impl fmt::Display for DefaultConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        // Only literal defaults may print bare; the grammar requires any
        // other default expression to sit in parentheses.
        match &self.expr {
            Expr::String(_)
            | Expr::Number(_)
            | Expr::Blob(_)
            | Expr::Bool(_)
            | Expr::Null(_)
            | Expr::Timestamp(_) => write!(f, "DEFAULT {}", self.expr),
            expr => write!(f, "DEFAULT ({})", expr),
        }
    }
}

/// `[GENERATED ALWAYS] AS (expr) [STORED|VIRTUAL]`. The canonical string
/// form drops the `GENERATED ALWAYS` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratedConstraint {
    pub name: Option<Ident>,
    pub expr: Expr,
    pub storage: Option<GeneratedStorage>,
}

impl fmt::Display for GeneratedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        write!(f, "AS ({})", self.expr)?;
        if let Some(storage) = &self.storage {
            write!(f, " {}", storage)?;
        }
        Ok(())
    }
}

/// Storage of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeneratedStorage {
    Stored,
    Virtual,
}

impl fmt::Display for GeneratedStorage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            GeneratedStorage::Stored => "STORED",
            GeneratedStorage::Virtual => "VIRTUAL",
        })
    }
}

/// `COLLATE collation-name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollateConstraint {
    pub name: Option<Ident>,
    pub collation: Ident,
}

impl fmt::Display for CollateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        write!(f, "COLLATE {}", self.collation)
    }
}

/// A foreign-key constraint: `[FOREIGN KEY (cols)] REFERENCES table
/// [(cols)] [ON UPDATE|DELETE action]... [[NOT] DEFERRABLE [INITIALLY
/// DEFERRED|IMMEDIATE]]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForeignKeyConstraint {
    pub name: Option<Ident>,
    /// Referencing columns; table-constraint form only.
    pub columns: Vec<Ident>,
    pub foreign_table: Ident,
    pub foreign_columns: Vec<Ident>,
    pub args: Vec<ForeignKeyArg>,
    pub deferrable: Option<Deferrable>,
    pub initially: Option<Initially>,
}

impl fmt::Display for ForeignKeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_constraint_name(f, &self.name)?;
        if !self.columns.is_empty() {
            write!(f, "FOREIGN KEY ({}) ", DisplayCommaSeparated(&self.columns))?;
        }
        write!(f, "REFERENCES {}", self.foreign_table)?;
        if !self.foreign_columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.foreign_columns))?;
        }
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let Some(deferrable) = &self.deferrable {
            write!(f, " {}", deferrable)?;
        }
        if let Some(initially) = &self.initially {
            write!(f, " {}", initially)?;
        }
        Ok(())
    }
}

/// One `ON UPDATE ...` / `ON DELETE ...` action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForeignKeyArg {
    pub on: ForeignKeyEvent,
    pub action: ForeignKeyAction,
}

impl fmt::Display for ForeignKeyArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ON {} {}", self.on, self.action)
    }
}

/// The triggering event of a foreign-key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForeignKeyEvent {
    Update,
    Delete,
}

impl fmt::Display for ForeignKeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ForeignKeyEvent::Update => "UPDATE",
            ForeignKeyEvent::Delete => "DELETE",
        })
    }
}

/// The action a foreign key takes on its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForeignKeyAction {
    SetNull,
    SetDefault,
    Cascade,
    Restrict,
    NoAction,
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ForeignKeyAction::SetNull => "SET NULL",
            ForeignKeyAction::SetDefault => "SET DEFAULT",
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::Restrict => "RESTRICT",
            ForeignKeyAction::NoAction => "NO ACTION",
        })
    }
}

/// `DEFERRABLE` / `NOT DEFERRABLE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Deferrable {
    Deferrable,
    NotDeferrable,
}

impl fmt::Display for Deferrable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Deferrable::Deferrable => "DEFERRABLE",
            Deferrable::NotDeferrable => "NOT DEFERRABLE",
        })
    }
}

/// `INITIALLY DEFERRED` / `INITIALLY IMMEDIATE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Initially {
    Deferred,
    Immediate,
}

impl fmt::Display for Initially {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Initially::Deferred => "INITIALLY DEFERRED",
            Initially::Immediate => "INITIALLY IMMEDIATE",
        })
    }
}

/// The `ON CONFLICT` clause of PRIMARY KEY / NOT NULL / UNIQUE column
/// constraints. Exactly one resolution is always named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConflictClause {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl fmt::Display for ConflictClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ConflictClause::Rollback => "ON CONFLICT ROLLBACK",
            ConflictClause::Abort => "ON CONFLICT ABORT",
            ConflictClause::Fail => "ON CONFLICT FAIL",
            ConflictClause::Ignore => "ON CONFLICT IGNORE",
            ConflictClause::Replace => "ON CONFLICT REPLACE",
        })
    }
}

/// A column of an index or upsert target: an expression with an optional
/// sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedColumn {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

impl fmt::Display for IndexedColumn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = &self.direction {
            write!(f, " {}", direction)?;
        }
        Ok(())
    }
}

/// `CREATE VIRTUAL TABLE name USING module (...)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateVirtualTableStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub module_name: Ident,
    pub arguments: Vec<ModuleArgument>,
}

impl fmt::Display for CreateVirtualTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CREATE VIRTUAL TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} USING {}", self.name, self.module_name)?;
        if !self.arguments.is_empty() {
            f.write_str(" (")?;
            let mut first = true;
            for argument in &self.arguments {
                if !first {
                    f.write_char(',')?;
                }
                first = false;
                write!(f, "{}", argument)?;
            }
            f.write_char(')')?;
        }
        Ok(())
    }
}

/// One argument of a virtual-table module: a name, optionally with a
/// `= literal` assignment or a column type. Assignment and type are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleArgument {
    pub name: Ident,
    pub literal: Option<Expr>,
    pub arg_type: Option<Type>,
}

impl fmt::Display for ModuleArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(literal) = &self.literal {
            write!(f, "={}", literal)?;
        } else if let Some(arg_type) = &self.arg_type {
            write!(f, " {}", arg_type)?;
        }
        Ok(())
    }
}

/// `CREATE [TEMP] VIEW name [(columns)] AS select`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateViewStatement {
    pub temp: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub columns: Vec<Ident>,
    pub select: Box<SelectStatement>,
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temp {
            f.write_str("TEMP ")?;
        }
        f.write_str("VIEW ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
        }
        write!(f, " AS {}", self.select)
    }
}

/// `CREATE [UNIQUE] INDEX name ON table (columns) [WHERE expr]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateIndexStatement {
    pub unique: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub table: Ident,
    pub columns: Vec<IndexedColumn>,
    pub where_expr: Option<Expr>,
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CREATE")?;
        if self.unique {
            f.write_str(" UNIQUE")?;
        }
        f.write_str(" INDEX")?;
        if self.if_not_exists {
            f.write_str(" IF NOT EXISTS")?;
        }
        write!(
            f,
            " {} ON {} ({})",
            self.name,
            self.table,
            DisplayCommaSeparated(&self.columns)
        )?;
        if let Some(where_expr) = &self.where_expr {
            write!(f, " WHERE {}", where_expr)?;
        }
        Ok(())
    }
}

/// `CREATE [TEMP] TRIGGER ... BEGIN stmt; ... END`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateTriggerStatement {
    pub temp: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub time: Option<TriggerTime>,
    pub event: TriggerEvent,
    pub table: Ident,
    pub for_each_row: bool,
    pub when_expr: Option<Expr>,
    pub body: Vec<Statement>,
}

impl fmt::Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temp {
            f.write_str("TEMP ")?;
        }
        f.write_str("TRIGGER ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(time) = &self.time {
            write!(f, " {}", time)?;
        }
        write!(f, " {}", self.event)?;
        write!(f, " ON {}", self.table)?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        if let Some(when_expr) = &self.when_expr {
            write!(f, " WHEN {}", when_expr)?;
        }
        f.write_str(" BEGIN")?;
        for stmt in &self.body {
            write!(f, " {};", stmt)?;
        }
        f.write_str(" END")
    }
}

/// When the trigger fires relative to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerTime {
    Before,
    After,
    InsteadOf,
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TriggerTime::Before => "BEFORE",
            TriggerTime::After => "AFTER",
            TriggerTime::InsteadOf => "INSTEAD OF",
        })
    }
}

/// The statement kind the trigger reacts to. `UPDATE` optionally names the
/// watched columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriggerEvent {
    Delete,
    Insert,
    Update(Vec<Ident>),
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriggerEvent::Delete => f.write_str("DELETE"),
            TriggerEvent::Insert => f.write_str("INSERT"),
            TriggerEvent::Update(columns) => {
                f.write_str("UPDATE")?;
                if !columns.is_empty() {
                    write!(f, " OF {}", DisplayCommaSeparated(columns))?;
                }
                Ok(())
            }
        }
    }
}

/// `DROP TABLE [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropTableStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

impl fmt::Display for DropTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("DROP TABLE ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// `DROP VIEW [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropViewStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

impl fmt::Display for DropViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("DROP VIEW ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// `DROP INDEX [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropIndexStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

impl fmt::Display for DropIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("DROP INDEX ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// `DROP TRIGGER [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropTriggerStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

impl fmt::Display for DropTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("DROP TRIGGER ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// `ALTER TABLE name <action>`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlterTableStatement {
    pub name: QualifiedName,
    pub action: AlterTableAction,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, self.action)
    }
}

/// The action of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlterTableAction {
    /// `RENAME TO new-name`
    RenameTo(Ident),
    /// `RENAME [COLUMN] column TO new-name`
    RenameColumn { column: Ident, to: Ident },
    /// `ADD [COLUMN] column-def`
    AddColumn(ColumnDefinition),
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlterTableAction::RenameTo(name) => write!(f, "RENAME TO {}", name),
            AlterTableAction::RenameColumn { column, to } => {
                write!(f, "RENAME COLUMN {} TO {}", column, to)
            }
            AlterTableAction::AddColumn(def) => write!(f, "ADD COLUMN {}", def),
        }
    }
}
