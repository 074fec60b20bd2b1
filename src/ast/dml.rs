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

//! Data manipulation statements: INSERT (with upsert), UPDATE, DELETE.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::ddl::{ConflictClause, IndexedColumn};
use crate::ast::expr::{Expr, ExprList};
use crate::ast::query::{OrderingTerm, ResultColumn, SelectStatement, WithClause};
use crate::ast::{DisplayCommaSeparated, Ident, QualifiedName};

/// An `INSERT` (or `REPLACE`) statement.
///
/// Exactly one of `value_lists`, `select`, or `default_values` is
/// populated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertStatement {
    pub with: Option<WithClause>,
    /// True for the `REPLACE INTO` spelling.
    pub replace: bool,
    /// `INSERT OR ROLLBACK|REPLACE|ABORT|FAIL|IGNORE`.
    pub or_conflict: Option<ConflictClause>,
    pub table: QualifiedName,
    pub columns: Vec<Ident>,
    pub value_lists: Vec<ExprList>,
    pub select: Option<Box<SelectStatement>>,
    pub default_values: bool,
    pub upsert: Option<UpsertClause>,
    pub returning: Vec<ResultColumn>,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }

        if self.replace {
            f.write_str("REPLACE")?;
        } else {
            f.write_str("INSERT")?;
            if let Some(or_conflict) = &self.or_conflict {
                write!(f, " OR {}", conflict_keyword(or_conflict))?;
            }
        }

        write!(f, " INTO {}", self.table)?;

        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
        }

        if self.default_values {
            f.write_str(" DEFAULT VALUES")?;
        } else if let Some(select) = &self.select {
            write!(f, " {}", select)?;
        } else {
            write!(f, " VALUES {}", DisplayCommaSeparated(&self.value_lists))?;
        }

        if let Some(upsert) = &self.upsert {
            write!(f, " {}", upsert)?;
        }

        if !self.returning.is_empty() {
            write!(f, " RETURNING {}", DisplayCommaSeparated(&self.returning))?;
        }
        Ok(())
    }
}

// The bare resolution keyword, without the "ON CONFLICT" prefix the
// ConflictClause display carries.
pub(crate) fn conflict_keyword(clause: &ConflictClause) -> &'static str {
    match clause {
        ConflictClause::Rollback => "ROLLBACK",
        ConflictClause::Abort => "ABORT",
        ConflictClause::Fail => "FAIL",
        ConflictClause::Ignore => "IGNORE",
        ConflictClause::Replace => "REPLACE",
    }
}

/// The `ON CONFLICT` tail of an INSERT that promotes a duplicate-key
/// conflict into an update or a silent skip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpsertClause {
    /// The conflict target columns, possibly with a partial-index WHERE.
    pub columns: Vec<IndexedColumn>,
    pub where_expr: Option<Expr>,
    pub action: UpsertAction,
}

impl fmt::Display for UpsertClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ON CONFLICT")?;
        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
            if let Some(where_expr) = &self.where_expr {
                write!(f, " WHERE {}", where_expr)?;
            }
        }

        f.write_str(" DO")?;
        match &self.action {
            UpsertAction::Nothing => f.write_str(" NOTHING"),
            UpsertAction::UpdateSet {
                assignments,
                where_expr,
            } => {
                write!(f, " UPDATE SET {}", DisplayCommaSeparated(assignments))?;
                if let Some(where_expr) = where_expr {
                    write!(f, " WHERE {}", where_expr)?;
                }
                Ok(())
            }
        }
    }
}

/// What an upsert does on conflict. The `UpdateSet` assignment list is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpsertAction {
    Nothing,
    UpdateSet {
        assignments: Vec<Assignment>,
        where_expr: Option<Expr>,
    },
}

/// An `UPDATE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    /// `UPDATE OR ROLLBACK|REPLACE|ABORT|FAIL|IGNORE`.
    pub or_conflict: Option<ConflictClause>,
    pub table: QualifiedName,
    pub assignments: Vec<Assignment>,
    pub where_expr: Option<Expr>,
    pub returning: Vec<ResultColumn>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }

        f.write_str("UPDATE")?;
        if let Some(or_conflict) = &self.or_conflict {
            write!(f, " OR {}", conflict_keyword(or_conflict))?;
        }

        write!(f, " {} SET {}", self.table, DisplayCommaSeparated(&self.assignments))?;

        if let Some(where_expr) = &self.where_expr {
            write!(f, " WHERE {}", where_expr)?;
        }
        if !self.returning.is_empty() {
            write!(f, " RETURNING {}", DisplayCommaSeparated(&self.returning))?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", DisplayCommaSeparated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
            if let Some(offset) = &self.offset {
                write!(f, " OFFSET {}", offset)?;
            }
        }
        Ok(())
    }
}

/// A `DELETE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    pub table: QualifiedName,
    pub where_expr: Option<Expr>,
    pub returning: Vec<ResultColumn>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }

        write!(f, "DELETE FROM {}", self.table)?;

        if let Some(where_expr) = &self.where_expr {
            write!(f, " WHERE {}", where_expr)?;
        }
        if !self.returning.is_empty() {
            write!(f, " RETURNING {}", DisplayCommaSeparated(&self.returning))?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", DisplayCommaSeparated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
            if let Some(offset) = &self.offset {
                write!(f, " OFFSET {}", offset)?;
            }
        }
        Ok(())
    }
}

/// A column assignment in an UPDATE or upsert: `col = expr` or
/// `(a, b) = expr`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub columns: Vec<Ident>,
    pub expr: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.columns.len() == 1 {
            write!(f, "{}", self.columns[0])?;
        } else if !self.columns.is_empty() {
            write!(f, "({})", DisplayCommaSeparated(&self.columns))?;
        }
        write!(f, " = {}", self.expr)
    }
}
