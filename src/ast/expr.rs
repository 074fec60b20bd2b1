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

//! Expression nodes.

use std::fmt;
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::operator::Op;
use crate::ast::query::{OrderingTerm, SelectStatement, WindowDefinition};
use crate::ast::{
    BlobLit, BoolLit, DisplayCommaSeparated, Ident, NullLit, NumberLit, QualifiedName, StringLit,
    TimestampLit, Type,
};

/// An SQL expression.
///
/// A `SELECT` may appear wherever an expression may (scalar subqueries),
/// which is why [`Expr::Select`] exists alongside the statement form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Bind(BindExpr),
    Binary(BinaryExpr),
    Blob(BlobLit),
    Bool(BoolLit),
    Call(Box<Call>),
    Case(CaseExpr),
    Cast(CastExpr),
    Exists(Exists),
    Ident(Ident),
    In(Box<InExpr>),
    List(ExprList),
    Null(NullLit),
    NullTest(NullTest),
    Number(NumberLit),
    Paren(ParenExpr),
    QualifiedRef(QualifiedRef),
    Raise(Raise),
    Select(Box<SelectStatement>),
    String(StringLit),
    Timestamp(TimestampLit),
    Unary(UnaryExpr),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Bind(e) => e.fmt(f),
            Expr::Binary(e) => e.fmt(f),
            Expr::Blob(e) => e.fmt(f),
            Expr::Bool(e) => e.fmt(f),
            Expr::Call(e) => e.fmt(f),
            Expr::Case(e) => e.fmt(f),
            Expr::Cast(e) => e.fmt(f),
            Expr::Exists(e) => e.fmt(f),
            Expr::Ident(e) => e.fmt(f),
            Expr::In(e) => e.fmt(f),
            Expr::List(e) => e.fmt(f),
            Expr::Null(e) => e.fmt(f),
            Expr::NullTest(e) => e.fmt(f),
            Expr::Number(e) => e.fmt(f),
            Expr::Paren(e) => e.fmt(f),
            Expr::QualifiedRef(e) => e.fmt(f),
            Expr::Raise(e) => e.fmt(f),
            Expr::Select(e) => e.fmt(f),
            Expr::String(e) => e.fmt(f),
            Expr::Timestamp(e) => e.fmt(f),
            Expr::Unary(e) => e.fmt(f),
        }
    }
}

/// A bind parameter: `?`, `?NNN`, `:name`, `@name`, or `$name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BindExpr {
    /// The bind as written, including its prefix character.
    pub name: String,
}

impl fmt::Display for BindExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A prefix operator applied to an expression. The operator is one of
/// [`Op::Plus`], [`Op::Minus`], [`Op::Not`], or [`Op::BitNot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryExpr {
    pub op: Op,
    pub expr: Box<Expr>,
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op {
            // NOT needs a separating space; the sigils do not.
            Op::Not => write!(f, "NOT {}", self.expr),
            op => write!(f, "{}{}", op, self.expr),
        }
    }
}

/// A binary operator with both operands. `BETWEEN` carries its two bounds
/// as a nested `AND` on the right-hand side, mirroring the surface syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: Op,
    pub right: Box<Expr>,
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// `CAST(expr AS type)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastExpr {
    pub expr: Box<Expr>,
    pub to_type: Type,
}

impl fmt::Display for CastExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CAST({} AS {})", self.expr, self.to_type)
    }
}

/// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseExpr {
    pub operand: Option<Box<Expr>>,
    pub blocks: Vec<CaseBlock>,
    pub else_expr: Option<Box<Expr>>,
}

impl fmt::Display for CaseExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {}", operand)?;
        }
        for block in &self.blocks {
            write!(f, " {}", block)?;
        }
        if let Some(else_expr) = &self.else_expr {
            write!(f, " ELSE {}", else_expr)?;
        }
        f.write_str(" END")
    }
}

/// One `WHEN condition THEN body` pair of a CASE expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseBlock {
    pub condition: Expr,
    pub body: Expr,
}

impl fmt::Display for CaseBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.body)
    }
}

/// The `RAISE(...)` function, valid only inside trigger bodies. Every form
/// but `IGNORE` carries an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Raise {
    Ignore,
    Rollback(StringLit),
    Abort(StringLit),
    Fail(StringLit),
}

impl fmt::Display for Raise {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Raise::Ignore => f.write_str("RAISE(IGNORE)"),
            Raise::Rollback(error) => write!(f, "RAISE(ROLLBACK, {})", error),
            Raise::Abort(error) => write!(f, "RAISE(ABORT, {})", error),
            Raise::Fail(error) => write!(f, "RAISE(FAIL, {})", error),
        }
    }
}

/// `[NOT] EXISTS (select)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exists {
    pub not: bool,
    pub select: Box<SelectStatement>,
}

impl fmt::Display for Exists {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.not {
            write!(f, "NOT EXISTS ({})", self.select)
        } else {
            write!(f, "EXISTS ({})", self.select)
        }
    }
}

/// An `IS NULL` / `NOT NULL` predicate. The operator is [`Op::IsNull`] or
/// [`Op::NotNull`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NullTest {
    pub expr: Box<Expr>,
    pub op: Op,
}

impl fmt::Display for NullTest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.op)
    }
}

/// A parenthesized, comma-separated expression list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExprList {
    pub exprs: Vec<Expr>,
}

impl fmt::Display for ExprList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", DisplayCommaSeparated(&self.exprs))
    }
}

/// A column reference qualified by a table name: `tbl.col`,
/// `schema.tbl.col`, or `tbl.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualifiedRef {
    pub table: QualifiedName,
    pub star: bool,
    /// The column; absent when `star` is set.
    pub column: Option<Ident>,
}

impl fmt::Display for QualifiedRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.star {
            write!(f, "{}.*", self.table)
        } else if let Some(column) = &self.column {
            write!(f, "{}.{}", self.table, column)
        } else {
            write!(f, "{}", self.table)
        }
    }
}

/// A function invocation, with optional FILTER and OVER clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function name and arguments (`function_call` is always set).
    pub name: QualifiedName,
    /// `FILTER (WHERE expr)`
    pub filter: Option<Expr>,
    /// `OVER window-name`
    pub over_name: Option<Ident>,
    /// `OVER (window-definition)`
    pub over_window: Option<WindowDefinition>,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {})", filter)?;
        }

        if let Some(over_name) = &self.over_name {
            write!(f, " OVER {}", over_name)?;
        } else if let Some(over_window) = &self.over_window {
            write!(f, " OVER {}", over_window)?;
        }
        Ok(())
    }
}

/// An argument to a function call, with the ordering terms some aggregates
/// accept (`group_concat(x ORDER BY y)`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionArg {
    pub expr: Expr,
    pub order_by: Vec<OrderingTerm>,
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", DisplayCommaSeparated(&self.order_by))?;
        }
        Ok(())
    }
}

/// An `[NOT] IN` predicate. Exactly one of `select`, `values`, or
/// `table_or_function` is populated; the operator is [`Op::In`] or
/// [`Op::NotIn`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InExpr {
    pub expr: Expr,
    pub op: Op,
    /// `x IN (SELECT ...)`
    pub select: Option<Box<SelectStatement>>,
    /// `x IN (a, b, c)` — possibly empty.
    pub values: Option<ExprList>,
    /// `x IN table` or `x IN table_function(...)`
    pub table_or_function: Option<QualifiedName>,
}

impl fmt::Display for InExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ", self.expr, self.op)?;
        if let Some(table_or_function) = &self.table_or_function {
            write!(f, "{}", table_or_function)
        } else if let Some(select) = &self.select {
            write!(f, "({})", select)
        } else if let Some(values) = &self.values {
            write!(f, "{}", values)
        } else {
            // Unreachable for parser-built trees.
            f.write_char('(')?;
            f.write_char(')')
        }
    }
}

/// An expression wrapped in parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParenExpr {
    pub expr: Box<Expr>,
}

impl fmt::Display for ParenExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
