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

//! Generic AST traversal.
//!
//! [`walk`] visits a tree depth-first in pre-order: each node is yielded to
//! the callback before its children, and children are visited in their
//! declared field order. The callback returns `false` to abort the entire
//! walk.
//!
//! Nodes that live inside a family enum ([`Statement`], [`Expr`],
//! [`Source`], [`Constraint`], [`JoinConstraint`]) are yielded as that
//! enum; a nested `SELECT` stored outside those enums (in a CTE, an
//! `EXISTS`, an `INSERT`, ...) is yielded as
//! [`NodeRef::SelectStatement`].

use std::fmt;

use crate::ast::*;

/// A borrowed reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Statement(&'a Statement),
    Expr(&'a Expr),
    Source(&'a Source),
    Constraint(&'a Constraint),
    JoinConstraint(&'a JoinConstraint),
    SelectStatement(&'a SelectStatement),
    Ident(&'a Ident),
    QualifiedName(&'a QualifiedName),
    ColumnDefinition(&'a ColumnDefinition),
    Type(&'a Type),
    ConflictClause(&'a ConflictClause),
    IndexedColumn(&'a IndexedColumn),
    ForeignKeyArg(&'a ForeignKeyArg),
    ModuleArgument(&'a ModuleArgument),
    CaseBlock(&'a CaseBlock),
    Window(&'a Window),
    WindowDefinition(&'a WindowDefinition),
    FrameSpec(&'a FrameSpec),
    WithClause(&'a WithClause),
    Cte(&'a Cte),
    UpsertClause(&'a UpsertClause),
    ResultColumn(&'a ResultColumn),
    Assignment(&'a Assignment),
    OrderingTerm(&'a OrderingTerm),
    FunctionArg(&'a FunctionArg),
    JoinOperator(&'a JoinOperator),
    ExprList(&'a ExprList),
    StringLit(&'a StringLit),
    NumberLit(&'a NumberLit),
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeRef::Statement(n) => n.fmt(f),
            NodeRef::Expr(n) => n.fmt(f),
            NodeRef::Source(n) => n.fmt(f),
            NodeRef::Constraint(n) => n.fmt(f),
            NodeRef::JoinConstraint(n) => n.fmt(f),
            NodeRef::SelectStatement(n) => n.fmt(f),
            NodeRef::Ident(n) => n.fmt(f),
            NodeRef::QualifiedName(n) => n.fmt(f),
            NodeRef::ColumnDefinition(n) => n.fmt(f),
            NodeRef::Type(n) => n.fmt(f),
            NodeRef::ConflictClause(n) => n.fmt(f),
            NodeRef::IndexedColumn(n) => n.fmt(f),
            NodeRef::ForeignKeyArg(n) => n.fmt(f),
            NodeRef::ModuleArgument(n) => n.fmt(f),
            NodeRef::CaseBlock(n) => n.fmt(f),
            NodeRef::Window(n) => n.fmt(f),
            NodeRef::WindowDefinition(n) => n.fmt(f),
            NodeRef::FrameSpec(n) => n.fmt(f),
            NodeRef::WithClause(n) => n.fmt(f),
            NodeRef::Cte(n) => n.fmt(f),
            NodeRef::UpsertClause(n) => n.fmt(f),
            NodeRef::ResultColumn(n) => n.fmt(f),
            NodeRef::Assignment(n) => n.fmt(f),
            NodeRef::OrderingTerm(n) => n.fmt(f),
            NodeRef::FunctionArg(n) => n.fmt(f),
            NodeRef::JoinOperator(n) => n.fmt(f),
            NodeRef::ExprList(n) => n.fmt(f),
            NodeRef::StringLit(n) => n.fmt(f),
            NodeRef::NumberLit(n) => n.fmt(f),
        }
    }
}

macro_rules! node_ref_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    NodeRef::$variant(node)
                }
            }
        )*
    };
}

node_ref_from! {
    Statement => Statement,
    Expr => Expr,
    Source => Source,
    Constraint => Constraint,
    JoinConstraint => JoinConstraint,
    SelectStatement => SelectStatement,
    Ident => Ident,
    QualifiedName => QualifiedName,
    ColumnDefinition => ColumnDefinition,
    Type => Type,
    ConflictClause => ConflictClause,
    IndexedColumn => IndexedColumn,
    ForeignKeyArg => ForeignKeyArg,
    ModuleArgument => ModuleArgument,
    CaseBlock => CaseBlock,
    Window => Window,
    WindowDefinition => WindowDefinition,
    FrameSpec => FrameSpec,
    WithClause => WithClause,
    Cte => Cte,
    UpsertClause => UpsertClause,
    ResultColumn => ResultColumn,
    Assignment => Assignment,
    OrderingTerm => OrderingTerm,
    FunctionArg => FunctionArg,
    JoinOperator => JoinOperator,
    ExprList => ExprList,
    StringLit => StringLit,
    NumberLit => NumberLit,
}

/// Walks the tree rooted at `node` depth-first in pre-order, yielding every
/// node to `f`. Returns `false` if the callback aborted the walk.
pub fn walk<'a, N, F>(node: N, mut f: F) -> bool
where
    N: Into<NodeRef<'a>>,
    F: FnMut(NodeRef<'a>) -> bool,
{
    walk_ref(node.into(), &mut f)
}

/// Yields every expression in the tree, in walk order.
pub fn visit_expressions<'a, N, F>(node: N, mut f: F) -> bool
where
    N: Into<NodeRef<'a>>,
    F: FnMut(&'a Expr) -> bool,
{
    walk(node, |n| match n {
        NodeRef::Expr(expr) => f(expr),
        _ => true,
    })
}

/// Yields every identifier appearing outside expressions (aliases, column
/// names, constraint names, ...), in walk order.
pub fn visit_idents<'a, N, F>(node: N, mut f: F) -> bool
where
    N: Into<NodeRef<'a>>,
    F: FnMut(&'a Ident) -> bool,
{
    walk(node, |n| match n {
        NodeRef::Ident(ident) => f(ident),
        _ => true,
    })
}

/// Yields every FROM-clause source, in walk order.
pub fn visit_sources<'a, N, F>(node: N, mut f: F) -> bool
where
    N: Into<NodeRef<'a>>,
    F: FnMut(&'a Source) -> bool,
{
    walk(node, |n| match n {
        NodeRef::Source(source) => f(source),
        _ => true,
    })
}

/// Yields every top-level statement node (including those nested in
/// EXPLAIN and trigger bodies), in walk order.
pub fn visit_statements<'a, N, F>(node: N, mut f: F) -> bool
where
    N: Into<NodeRef<'a>>,
    F: FnMut(&'a Statement) -> bool,
{
    walk(node, |n| match n {
        NodeRef::Statement(stmt) => f(stmt),
        _ => true,
    })
}

fn walk_ref<'a, F>(node: NodeRef<'a>, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    if !f(node) {
        return false;
    }
    subnodes(node, f)
}

// Walks one child node, propagating an abort.
macro_rules! visit {
    ($f:expr, $child:expr) => {
        if !walk_ref(NodeRef::from($child), $f) {
            return false;
        }
    };
}

// Walks an optional child.
macro_rules! visit_opt {
    ($f:expr, $child:expr) => {
        if let Some(child) = $child {
            visit!($f, child);
        }
    };
}

// Walks every element of a list.
macro_rules! visit_all {
    ($f:expr, $children:expr) => {
        for child in $children {
            visit!($f, child);
        }
    };
}

// Yields the direct children of `node`, in declared order.
fn subnodes<'a, F>(node: NodeRef<'a>, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    match node {
        NodeRef::Statement(stmt) => statement_subnodes(stmt, f),
        NodeRef::Expr(expr) => expr_subnodes(expr, f),
        NodeRef::Source(source) => source_subnodes(source, f),
        NodeRef::Constraint(constraint) => constraint_subnodes(constraint, f),
        NodeRef::JoinConstraint(constraint) => match constraint {
            JoinConstraint::On(c) => {
                visit!(f, &c.expr);
                true
            }
            JoinConstraint::Using(c) => {
                visit_all!(f, &c.columns);
                true
            }
        },
        NodeRef::SelectStatement(select) => select_subnodes(select, f),
        NodeRef::QualifiedName(name) => qualified_name_subnodes(name, f),
        NodeRef::ColumnDefinition(def) => {
            visit!(f, &def.name);
            visit_opt!(f, &def.col_type);
            visit_all!(f, &def.constraints);
            true
        }
        NodeRef::Type(col_type) => {
            visit!(f, &col_type.name);
            visit_opt!(f, &col_type.precision);
            visit_opt!(f, &col_type.scale);
            true
        }
        NodeRef::IndexedColumn(column) => {
            visit!(f, &column.expr);
            true
        }
        NodeRef::ModuleArgument(argument) => {
            visit!(f, &argument.name);
            visit_opt!(f, &argument.literal);
            visit_opt!(f, &argument.arg_type);
            true
        }
        NodeRef::CaseBlock(block) => {
            visit!(f, &block.condition);
            visit!(f, &block.body);
            true
        }
        NodeRef::Window(window) => {
            visit!(f, &window.name);
            visit!(f, &window.definition);
            true
        }
        NodeRef::WindowDefinition(definition) => {
            visit_opt!(f, &definition.base);
            visit_all!(f, &definition.partitions);
            visit_all!(f, &definition.order_by);
            visit_opt!(f, &definition.frame);
            true
        }
        NodeRef::FrameSpec(frame) => {
            if let FrameBound::Preceding(expr) | FrameBound::Following(expr) = &frame.start {
                visit!(f, expr);
            }
            if let Some(FrameBound::Preceding(expr) | FrameBound::Following(expr)) = &frame.end {
                visit!(f, expr);
            }
            true
        }
        NodeRef::WithClause(with) => {
            visit_all!(f, &with.ctes);
            true
        }
        NodeRef::Cte(cte) => {
            visit!(f, &cte.table_name);
            visit_all!(f, &cte.columns);
            visit!(f, &cte.select);
            true
        }
        NodeRef::UpsertClause(upsert) => {
            visit_all!(f, &upsert.columns);
            visit_opt!(f, &upsert.where_expr);
            if let UpsertAction::UpdateSet {
                assignments,
                where_expr,
            } = &upsert.action
            {
                visit_all!(f, assignments);
                visit_opt!(f, where_expr);
            }
            true
        }
        NodeRef::ResultColumn(column) => {
            visit_opt!(f, &column.expr);
            visit_opt!(f, &column.alias);
            true
        }
        NodeRef::Assignment(assignment) => {
            visit_all!(f, &assignment.columns);
            visit!(f, &assignment.expr);
            true
        }
        NodeRef::OrderingTerm(term) => {
            visit!(f, &term.expr);
            true
        }
        NodeRef::FunctionArg(argument) => {
            visit!(f, &argument.expr);
            visit_all!(f, &argument.order_by);
            true
        }
        NodeRef::ExprList(list) => {
            visit_all!(f, &list.exprs);
            true
        }
        // Leaves.
        NodeRef::Ident(_)
        | NodeRef::ConflictClause(_)
        | NodeRef::ForeignKeyArg(_)
        | NodeRef::JoinOperator(_)
        | NodeRef::StringLit(_)
        | NodeRef::NumberLit(_) => true,
    }
}

fn statement_subnodes<'a, F>(stmt: &'a Statement, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    match stmt {
        Statement::AlterTable(s) => {
            visit!(f, &s.name);
            match &s.action {
                AlterTableAction::RenameTo(name) => visit!(f, name),
                AlterTableAction::RenameColumn { column, to } => {
                    visit!(f, column);
                    visit!(f, to);
                }
                AlterTableAction::AddColumn(def) => visit!(f, def),
            }
            true
        }
        Statement::Analyze(s) => {
            visit_opt!(f, &s.name);
            true
        }
        Statement::Attach(s) => {
            visit!(f, &s.expr);
            visit!(f, &s.schema);
            true
        }
        Statement::Begin(_) | Statement::Commit(_) => true,
        Statement::CreateIndex(s) => {
            visit!(f, &s.name);
            visit!(f, &s.table);
            visit_all!(f, &s.columns);
            visit_opt!(f, &s.where_expr);
            true
        }
        Statement::CreateTable(s) => {
            visit!(f, &s.name);
            visit_all!(f, &s.columns);
            visit_all!(f, &s.constraints);
            if let Some(select) = &s.select {
                visit!(f, select.as_ref());
            }
            true
        }
        Statement::CreateTrigger(s) => {
            visit!(f, &s.name);
            if let TriggerEvent::Update(columns) = &s.event {
                visit_all!(f, columns);
            }
            visit!(f, &s.table);
            visit_opt!(f, &s.when_expr);
            visit_all!(f, &s.body);
            true
        }
        Statement::CreateView(s) => {
            visit!(f, &s.name);
            visit_all!(f, &s.columns);
            visit!(f, s.select.as_ref());
            true
        }
        Statement::CreateVirtualTable(s) => {
            visit!(f, &s.name);
            visit!(f, &s.module_name);
            visit_all!(f, &s.arguments);
            true
        }
        Statement::Delete(s) => {
            visit_opt!(f, &s.with);
            visit!(f, &s.table);
            visit_opt!(f, &s.where_expr);
            visit_all!(f, &s.returning);
            visit_all!(f, &s.order_by);
            visit_opt!(f, &s.limit);
            visit_opt!(f, &s.offset);
            true
        }
        Statement::Detach(s) => {
            visit!(f, &s.schema);
            true
        }
        Statement::DropIndex(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::DropTable(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::DropTrigger(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::DropView(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::Explain(s) => {
            visit!(f, s.stmt.as_ref());
            true
        }
        Statement::Insert(s) => {
            visit_opt!(f, &s.with);
            visit!(f, &s.table);
            visit_all!(f, &s.columns);
            visit_all!(f, &s.value_lists);
            if let Some(select) = &s.select {
                visit!(f, select.as_ref());
            }
            visit_opt!(f, &s.upsert);
            visit_all!(f, &s.returning);
            true
        }
        Statement::Pragma(s) => {
            visit_opt!(f, &s.schema);
            visit!(f, &s.expr);
            true
        }
        Statement::Reindex(s) => {
            visit_opt!(f, &s.name);
            true
        }
        Statement::Release(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::Rollback(s) => {
            visit_opt!(f, &s.savepoint_name);
            true
        }
        Statement::Savepoint(s) => {
            visit!(f, &s.name);
            true
        }
        Statement::Select(s) => select_subnodes(s, f),
        Statement::Update(s) => {
            visit_opt!(f, &s.with);
            visit!(f, &s.table);
            visit_all!(f, &s.assignments);
            visit_opt!(f, &s.where_expr);
            visit_all!(f, &s.returning);
            visit_all!(f, &s.order_by);
            visit_opt!(f, &s.limit);
            visit_opt!(f, &s.offset);
            true
        }
        Statement::Vacuum(s) => {
            visit_opt!(f, &s.schema);
            visit_opt!(f, &s.into);
            true
        }
    }
}

fn select_subnodes<'a, F>(select: &'a SelectStatement, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    visit_opt!(f, &select.with);
    visit_all!(f, &select.values);
    visit_all!(f, &select.columns);
    visit_opt!(f, &select.source);
    visit_opt!(f, &select.where_expr);
    visit_all!(f, &select.group_by);
    visit_opt!(f, &select.having);
    visit_all!(f, &select.windows);
    if let Some(compound) = &select.compound {
        visit!(f, compound.select.as_ref());
    }
    visit_all!(f, &select.order_by);
    visit_opt!(f, &select.limit);
    visit_opt!(f, &select.offset);
    true
}

fn expr_subnodes<'a, F>(expr: &'a Expr, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    match expr {
        Expr::Bind(_)
        | Expr::Blob(_)
        | Expr::Bool(_)
        | Expr::Ident(_)
        | Expr::Null(_)
        | Expr::Number(_)
        | Expr::String(_)
        | Expr::Timestamp(_) => true,
        Expr::Unary(e) => {
            visit!(f, e.expr.as_ref());
            true
        }
        Expr::Binary(e) => {
            visit!(f, e.left.as_ref());
            visit!(f, e.right.as_ref());
            true
        }
        Expr::Call(e) => {
            visit!(f, &e.name);
            visit_opt!(f, &e.filter);
            visit_opt!(f, &e.over_name);
            visit_opt!(f, &e.over_window);
            true
        }
        Expr::Case(e) => {
            if let Some(operand) = &e.operand {
                visit!(f, operand.as_ref());
            }
            visit_all!(f, &e.blocks);
            if let Some(else_expr) = &e.else_expr {
                visit!(f, else_expr.as_ref());
            }
            true
        }
        Expr::Cast(e) => {
            visit!(f, e.expr.as_ref());
            visit!(f, &e.to_type);
            true
        }
        Expr::Exists(e) => {
            visit!(f, e.select.as_ref());
            true
        }
        Expr::In(e) => {
            visit!(f, &e.expr);
            if let Some(select) = &e.select {
                visit!(f, select.as_ref());
            }
            visit_opt!(f, &e.values);
            visit_opt!(f, &e.table_or_function);
            true
        }
        Expr::List(e) => {
            visit_all!(f, &e.exprs);
            true
        }
        Expr::NullTest(e) => {
            visit!(f, e.expr.as_ref());
            true
        }
        Expr::Paren(e) => {
            visit!(f, e.expr.as_ref());
            true
        }
        Expr::QualifiedRef(e) => {
            visit!(f, &e.table);
            visit_opt!(f, &e.column);
            true
        }
        Expr::Raise(e) => {
            match e {
                Raise::Ignore => {}
                Raise::Rollback(error) | Raise::Abort(error) | Raise::Fail(error) => {
                    visit!(f, error);
                }
            }
            true
        }
        Expr::Select(e) => select_subnodes(e, f),
    }
}

fn source_subnodes<'a, F>(source: &'a Source, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    match source {
        Source::Table(name) => qualified_name_subnodes(name, f),
        Source::Paren(paren) => {
            visit!(f, &paren.source);
            visit_opt!(f, &paren.alias);
            true
        }
        Source::Join(join) => {
            visit!(f, &join.left);
            visit!(f, &join.operator);
            visit!(f, &join.right);
            visit_opt!(f, &join.constraint);
            true
        }
        Source::Select(select) => select_subnodes(select, f),
    }
}

fn qualified_name_subnodes<'a, F>(name: &'a QualifiedName, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    visit_opt!(f, &name.schema);
    visit!(f, &name.name);
    visit_all!(f, &name.function_args);
    visit_opt!(f, &name.alias);
    visit_opt!(f, &name.index);
    true
}

fn constraint_subnodes<'a, F>(constraint: &'a Constraint, f: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    match constraint {
        Constraint::PrimaryKey(c) => {
            visit_opt!(f, &c.name);
            visit_opt!(f, &c.conflict);
            visit_all!(f, &c.columns);
            true
        }
        Constraint::NotNull(c) => {
            visit_opt!(f, &c.name);
            visit_opt!(f, &c.conflict);
            true
        }
        Constraint::Unique(c) => {
            visit_opt!(f, &c.name);
            visit_opt!(f, &c.conflict);
            visit_all!(f, &c.columns);
            true
        }
        Constraint::Check(c) => {
            visit_opt!(f, &c.name);
            visit!(f, &c.expr);
            true
        }
        Constraint::Default(c) => {
            visit_opt!(f, &c.name);
            visit!(f, &c.expr);
            true
        }
        Constraint::Generated(c) => {
            visit_opt!(f, &c.name);
            visit!(f, &c.expr);
            true
        }
        Constraint::Collate(c) => {
            visit_opt!(f, &c.name);
            visit!(f, &c.collation);
            true
        }
        Constraint::ForeignKey(c) => {
            visit_opt!(f, &c.name);
            visit_all!(f, &c.columns);
            visit!(f, &c.foreign_table);
            visit_all!(f, &c.foreign_columns);
            visit_all!(f, &c.args);
            true
        }
    }
}
