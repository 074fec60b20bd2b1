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

//! Abstract syntax tree for the SQLite SQL dialect.
//!
//! Every node implements [`std::fmt::Display`]; the string form of a parsed
//! tree re-parses to a structurally equal tree. Nodes own their children
//! outright (no references into the original input), so an AST outlives the
//! string it was parsed from.

use std::fmt;
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod ddl;
pub mod dml;
pub mod expr;
pub mod operator;
pub mod query;
pub mod visitor;

pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use operator::Op;
pub use query::*;
pub use visitor::{visit_expressions, visit_idents, visit_sources, visit_statements, walk, NodeRef};

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    AlterTable(AlterTableStatement),
    Analyze(AnalyzeStatement),
    Attach(AttachStatement),
    Begin(BeginStatement),
    Commit(CommitStatement),
    CreateIndex(Box<CreateIndexStatement>),
    CreateTable(Box<CreateTableStatement>),
    CreateTrigger(Box<CreateTriggerStatement>),
    CreateView(Box<CreateViewStatement>),
    CreateVirtualTable(CreateVirtualTableStatement),
    Delete(Box<DeleteStatement>),
    Detach(DetachStatement),
    DropIndex(DropIndexStatement),
    DropTable(DropTableStatement),
    DropTrigger(DropTriggerStatement),
    DropView(DropViewStatement),
    Explain(ExplainStatement),
    Insert(Box<InsertStatement>),
    Pragma(PragmaStatement),
    Reindex(ReindexStatement),
    Release(ReleaseStatement),
    Rollback(RollbackStatement),
    Savepoint(SavepointStatement),
    Select(Box<SelectStatement>),
    Update(Box<UpdateStatement>),
    Vacuum(VacuumStatement),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::AlterTable(s) => s.fmt(f),
            Statement::Analyze(s) => s.fmt(f),
            Statement::Attach(s) => s.fmt(f),
            Statement::Begin(s) => s.fmt(f),
            Statement::Commit(s) => s.fmt(f),
            Statement::CreateIndex(s) => s.fmt(f),
            Statement::CreateTable(s) => s.fmt(f),
            Statement::CreateTrigger(s) => s.fmt(f),
            Statement::CreateView(s) => s.fmt(f),
            Statement::CreateVirtualTable(s) => s.fmt(f),
            Statement::Delete(s) => s.fmt(f),
            Statement::Detach(s) => s.fmt(f),
            Statement::DropIndex(s) => s.fmt(f),
            Statement::DropTable(s) => s.fmt(f),
            Statement::DropTrigger(s) => s.fmt(f),
            Statement::DropView(s) => s.fmt(f),
            Statement::Explain(s) => s.fmt(f),
            Statement::Insert(s) => s.fmt(f),
            Statement::Pragma(s) => s.fmt(f),
            Statement::Reindex(s) => s.fmt(f),
            Statement::Release(s) => s.fmt(f),
            Statement::Rollback(s) => s.fmt(f),
            Statement::Savepoint(s) => s.fmt(f),
            Statement::Select(s) => s.fmt(f),
            Statement::Update(s) => s.fmt(f),
            Statement::Vacuum(s) => s.fmt(f),
        }
    }
}

/// Displays a comma-separated list of values.
pub(crate) struct DisplayCommaSeparated<'a, T: fmt::Display>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for DisplayCommaSeparated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for t in self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            t.fmt(f)?;
        }
        Ok(())
    }
}

/// An identifier, possibly double-quoted in the source.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ident {
    /// The identifier text without enclosing quotes, with escape sequences
    /// resolved.
    pub name: String,
    /// True if the identifier was quoted (or written as a string literal).
    pub quoted: bool,
}

impl Ident {
    /// An unquoted identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: name.into(),
            quoted: false,
        }
    }
}

// Quoting is remembered from the source but carries no meaning once the
// name is resolved: the canonical string form always quotes, so two idents
// are equal when their names are. Without this, printed trees would never
// compare equal to the trees they were printed from.
impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.name.replace('"', "\"\""))
    }
}

/// A possibly schema-qualified name, optionally extended with function-call
/// arguments, an alias, and an index hint. This is the workhorse of
/// reference parsing: table names, index names, table-valued functions, and
/// aggregate calls all go through it.
///
/// `function_call` gates all function-shape fields: `function_star`,
/// `function_distinct`, and `function_args` are only meaningful when it is
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualifiedName {
    /// Schema prefix, as in `schema.table`.
    pub schema: Option<Ident>,
    pub name: Ident,
    pub function_call: bool,
    /// `count(*)`
    pub function_star: bool,
    /// `count(DISTINCT x)`
    pub function_distinct: bool,
    pub function_args: Vec<FunctionArg>,
    pub alias: Option<Ident>,
    /// `NOT INDEXED`
    pub not_indexed: bool,
    /// `INDEXED BY index-name`
    pub index: Option<Ident>,
}

impl QualifiedName {
    /// A bare, unqualified name.
    pub fn named(name: Ident) -> Self {
        QualifiedName {
            name,
            ..QualifiedName::default()
        }
    }
}

impl Default for Ident {
    fn default() -> Self {
        Ident::new("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        write!(f, "{}", self.name)?;

        if self.function_call {
            f.write_char('(')?;
            if self.function_star {
                f.write_char('*')?;
            }
            if self.function_distinct {
                f.write_str("DISTINCT ")?;
            }
            write!(f, "{}", DisplayCommaSeparated(&self.function_args))?;
            f.write_char(')')?;
        }

        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }

        if let Some(index) = &self.index {
            write!(f, " INDEXED BY {}", index)?;
        } else if self.not_indexed {
            f.write_str(" NOT INDEXED")?;
        }
        Ok(())
    }
}

/// A column type: a (possibly multi-word) name with optional precision and
/// scale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Type {
    pub name: Ident,
    pub precision: Option<NumberLit>,
    pub scale: Option<NumberLit>,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Type names print unquoted.
        match (&self.precision, &self.scale) {
            (Some(precision), Some(scale)) => {
                write!(f, "{}({},{})", self.name.name, precision, scale)
            }
            (Some(precision), None) => write!(f, "{}({})", self.name.name, precision),
            _ => f.write_str(&self.name.name),
        }
    }
}

/// A single-quoted string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StringLit {
    /// The value without quotes, with `''` escapes resolved.
    pub value: String,
}

impl fmt::Display for StringLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'", self.value.replace('\'', "''"))
    }
}

/// A `CURRENT_TIME`, `CURRENT_DATE`, or `CURRENT_TIMESTAMP` literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimestampLit {
    pub value: String,
}

impl fmt::Display for TimestampLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A hex blob literal, `x'...'`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlobLit {
    /// The hex digits without the `x'...'` wrapper.
    pub value: String,
}

impl fmt::Display for BlobLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x'{}'", self.value)
    }
}

/// An integer or float literal, kept as its source lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberLit {
    pub value: String,
}

impl NumberLit {
    pub fn new(value: impl Into<String>) -> Self {
        NumberLit {
            value: value.into(),
        }
    }
}

impl fmt::Display for NumberLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The `NULL` literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NullLit;

impl fmt::Display for NullLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("NULL")
    }
}

/// A `TRUE` or `FALSE` literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoolLit {
    pub value: bool,
}

impl fmt::Display for BoolLit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.value { "TRUE" } else { "FALSE" })
    }
}
