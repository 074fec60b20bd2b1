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

//! Query (SELECT) nodes: result columns, FROM sources and joins, common
//! table expressions, windows, and ordering.

use std::fmt;
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ast::expr::{Expr, ExprList};
use crate::ast::{DisplayCommaSeparated, Ident, QualifiedName};

/// A `SELECT` or `VALUES` statement, possibly compounded.
///
/// When `values` is non-empty this is a `VALUES` statement and the
/// SELECT-specific fields are unused. A compound select (`UNION` etc.)
/// nests its right-hand side in `compound`; ORDER BY and LIMIT always
/// attach to the outermost select.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub values: Vec<ExprList>,
    pub quantifier: Option<SelectQuantifier>,
    pub columns: Vec<ResultColumn>,
    pub source: Option<Source>,
    pub where_expr: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub windows: Vec<Window>,
    pub compound: Option<CompoundSelect>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }

        if !self.values.is_empty() {
            write!(f, "VALUES {}", DisplayCommaSeparated(&self.values))?;
        } else {
            f.write_str("SELECT ")?;
            if let Some(quantifier) = &self.quantifier {
                write!(f, "{} ", quantifier)?;
            }
            write!(f, "{}", DisplayCommaSeparated(&self.columns))?;

            if let Some(source) = &self.source {
                write!(f, " FROM {}", source)?;
            }
            if let Some(where_expr) = &self.where_expr {
                write!(f, " WHERE {}", where_expr)?;
            }
            if !self.group_by.is_empty() {
                write!(f, " GROUP BY {}", DisplayCommaSeparated(&self.group_by))?;
                if let Some(having) = &self.having {
                    write!(f, " HAVING {}", having)?;
                }
            }
            if !self.windows.is_empty() {
                write!(f, " WINDOW {}", DisplayCommaSeparated(&self.windows))?;
            }
        }

        if let Some(compound) = &self.compound {
            write!(f, " {} {}", compound.op, compound.select)?;
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

/// `DISTINCT` or `ALL` after `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectQuantifier {
    Distinct,
    All,
}

impl fmt::Display for SelectQuantifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SelectQuantifier::Distinct => "DISTINCT",
            SelectQuantifier::All => "ALL",
        })
    }
}

/// The right-hand side of a compound select.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompoundSelect {
    pub op: CompoundOperator,
    pub select: Box<SelectStatement>,
}

/// A compound select operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompoundOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl fmt::Display for CompoundOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            CompoundOperator::Union => "UNION",
            CompoundOperator::UnionAll => "UNION ALL",
            CompoundOperator::Intersect => "INTERSECT",
            CompoundOperator::Except => "EXCEPT",
        })
    }
}

/// A single result column: `*`, an expression, or an aliased expression.
/// `tbl.*` arrives as a [`crate::ast::QualifiedRef`] expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultColumn {
    pub star: bool,
    pub expr: Option<Expr>,
    pub alias: Option<Ident>,
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.star {
            return f.write_char('*');
        }
        match (&self.expr, &self.alias) {
            (Some(expr), Some(alias)) => write!(f, "{} AS {}", expr, alias),
            (Some(expr), None) => write!(f, "{}", expr),
            _ => Ok(()),
        }
    }
}

/// A FROM-clause source: a table reference, a parenthesized source, a join,
/// or a nested select (`VALUES` rows).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Source {
    Table(QualifiedName),
    Paren(Box<ParenSource>),
    Join(Box<JoinClause>),
    Select(Box<SelectStatement>),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Table(s) => s.fmt(f),
            Source::Paren(s) => s.fmt(f),
            Source::Join(s) => s.fmt(f),
            Source::Select(s) => s.fmt(f),
        }
    }
}

/// A parenthesized source, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParenSource {
    pub source: Source,
    pub alias: Option<Ident>,
}

impl fmt::Display for ParenSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "({}) AS {}", self.source, alias)
        } else {
            write!(f, "({})", self.source)
        }
    }
}

/// A join of two sources.
///
/// The parser rewrites a run of joins into a right-leaning tree:
/// `X JOIN Y ON c1 JOIN Z ON c2` parses as
/// `Join(X, Join(Y, Z, c2), c1)` so join constraints stay attached to the
/// operator they followed. The printer below reverses the rewrite to
/// reproduce the surface order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JoinClause {
    pub left: Source,
    pub operator: JoinOperator,
    pub right: Source,
    pub constraint: Option<JoinConstraint>,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.left, self.operator)?;

        match &self.right {
            Source::Join(y) => match &y.left {
                Source::Join(yx) => {
                    // Two rewritten levels: print the three sources with
                    // each constraint restored after its own join.
                    write!(f, "{}", yx.left)?;
                    if let Some(constraint) = &self.constraint {
                        write!(f, " {}", constraint)?;
                    }
                    write!(f, "{}{}", yx.operator, yx.right)?;
                    if let Some(constraint) = &yx.constraint {
                        write!(f, " {}", constraint)?;
                    }
                    write!(f, "{}{}", y.operator, y.right)?;
                    if let Some(constraint) = &y.constraint {
                        write!(f, " {}", constraint)?;
                    }
                }
                _ => {
                    write!(f, "{}", y.left)?;
                    if let Some(constraint) = &self.constraint {
                        write!(f, " {}", constraint)?;
                    }
                    write!(f, "{}{}", y.operator, y.right)?;
                    if let Some(constraint) = &y.constraint {
                        write!(f, " {}", constraint)?;
                    }
                }
            },
            _ => {
                write!(f, "{}", self.right)?;
                if let Some(constraint) = &self.constraint {
                    write!(f, " {}", constraint)?;
                }
            }
        }
        Ok(())
    }
}

/// A join operator. All flags false denotes the bare comma join.
///
/// `left`, `right`, and `full` are distinct flags; `outer` may accompany
/// any of the three.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JoinOperator {
    pub natural: bool,
    pub left: bool,
    pub right: bool,
    pub full: bool,
    pub outer: bool,
    pub inner: bool,
    pub cross: bool,
}

impl JoinOperator {
    /// True for the bare comma join.
    pub fn is_comma(&self) -> bool {
        let JoinOperator {
            natural,
            left,
            right,
            full,
            outer,
            inner,
            cross,
        } = self;
        !(natural | left | right | full | outer | inner | cross)
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_comma() {
            return f.write_str(", ");
        }

        if self.natural {
            f.write_str(" NATURAL")?;
        }
        if self.left {
            f.write_str(" LEFT")?;
            if self.outer {
                f.write_str(" OUTER")?;
            }
        } else if self.right {
            f.write_str(" RIGHT")?;
            if self.outer {
                f.write_str(" OUTER")?;
            }
        } else if self.full {
            f.write_str(" FULL")?;
            if self.outer {
                f.write_str(" OUTER")?;
            }
        } else if self.inner {
            f.write_str(" INNER")?;
        } else if self.cross {
            f.write_str(" CROSS")?;
        }
        f.write_str(" JOIN ")
    }
}

/// An `ON` or `USING` join constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinConstraint {
    On(OnConstraint),
    Using(UsingConstraint),
}

impl fmt::Display for JoinConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JoinConstraint::On(c) => c.fmt(f),
            JoinConstraint::Using(c) => c.fmt(f),
        }
    }
}

/// `ON expr`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OnConstraint {
    pub expr: Expr,
}

impl fmt::Display for OnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ON {}", self.expr)
    }
}

/// `USING (col, ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsingConstraint {
    pub columns: Vec<Ident>,
}

impl fmt::Display for UsingConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "USING ({})", DisplayCommaSeparated(&self.columns))
    }
}

/// `WITH [RECURSIVE] cte, cte, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        write!(f, "{}", DisplayCommaSeparated(&self.ctes))
    }
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cte {
    pub table_name: Ident,
    pub columns: Vec<Ident>,
    pub select: SelectStatement,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.table_name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", DisplayCommaSeparated(&self.columns))?;
        }
        write!(f, " AS ({})", self.select)
    }
}

/// A named window in a `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Window {
    pub name: Ident,
    pub definition: WindowDefinition,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} AS {}", self.name, self.definition)
    }
}

/// A parenthesized window definition, optionally extending a base window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowDefinition {
    pub base: Option<Ident>,
    pub partitions: Vec<Expr>,
    pub order_by: Vec<OrderingTerm>,
    pub frame: Option<FrameSpec>,
}

impl fmt::Display for WindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('(')?;
        let mut wrote = false;
        if let Some(base) = &self.base {
            write!(f, "{}", base)?;
            wrote = true;
        }
        if !self.partitions.is_empty() {
            if wrote {
                f.write_char(' ')?;
            }
            write!(f, "PARTITION BY {}", DisplayCommaSeparated(&self.partitions))?;
            wrote = true;
        }
        if !self.order_by.is_empty() {
            if wrote {
                f.write_char(' ')?;
            }
            write!(f, "ORDER BY {}", DisplayCommaSeparated(&self.order_by))?;
            wrote = true;
        }
        if let Some(frame) = &self.frame {
            if wrote {
                f.write_char(' ')?;
            }
            write!(f, "{}", frame)?;
        }
        f.write_char(')')
    }
}

/// A window frame specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSpec {
    pub units: FrameUnits,
    /// True for the two-boundary `BETWEEN ... AND ...` form; `end` is
    /// present exactly when this is set.
    pub between: bool,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
    pub exclude: Option<FrameExclude>,
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.units)?;
        if self.between {
            write!(f, " BETWEEN {}", self.start)?;
            if let Some(end) = &self.end {
                write!(f, " AND {}", end)?;
            }
        } else {
            write!(f, " {}", self.start)?;
        }
        if let Some(exclude) = &self.exclude {
            write!(f, " EXCLUDE {}", exclude)?;
        }
        Ok(())
    }
}

/// `RANGE`, `ROWS`, or `GROUPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameUnits {
    Range,
    Rows,
    Groups,
}

impl fmt::Display for FrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FrameUnits::Range => "RANGE",
            FrameUnits::Rows => "ROWS",
            FrameUnits::Groups => "GROUPS",
        })
    }
}

/// One boundary of a window frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Expr),
    CurrentRow,
    Following(Expr),
    UnboundedFollowing,
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameBound::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            FrameBound::Preceding(expr) => write!(f, "{} PRECEDING", expr),
            FrameBound::CurrentRow => f.write_str("CURRENT ROW"),
            FrameBound::Following(expr) => write!(f, "{} FOLLOWING", expr),
            FrameBound::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

/// The `EXCLUDE` clause of a frame spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameExclude {
    NoOthers,
    CurrentRow,
    Group,
    Ties,
}

impl fmt::Display for FrameExclude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FrameExclude::NoOthers => "NO OTHERS",
            FrameExclude::CurrentRow => "CURRENT ROW",
            FrameExclude::Group => "GROUP",
            FrameExclude::Ties => "TIES",
        })
    }
}

/// A term of an ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderingTerm {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
    pub nulls: Option<NullsOrder>,
}

impl fmt::Display for OrderingTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = &self.direction {
            write!(f, " {}", direction)?;
        }
        if let Some(nulls) = &self.nulls {
            write!(f, " NULLS {}", nulls)?;
        }
        Ok(())
    }
}

/// `ASC` or `DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        })
    }
}

/// `NULLS FIRST` or `NULLS LAST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NullsOrder {
    First,
    Last,
}

impl fmt::Display for NullsOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NullsOrder::First => "FIRST",
            NullsOrder::Last => "LAST",
        })
    }
}
