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

//! SQL parser for the SQLite dialect.
//!
//! This crate parses SQL text into a typed abstract syntax tree, prints any
//! tree back to SQL that re-parses to an equal tree, and walks trees
//! generically. It serves tools that inspect or rewrite SQL — linters,
//! query rewriters, schema differs, access filters — and is not an
//! execution engine: there is no planner, no catalog, and no evaluation.
//!
//! Example:
//!
//! ```
//! use litesql::ast::{self, NodeRef, Source};
//!
//! let stmt = litesql::parse_stmt("SELECT name FROM users WHERE id = ?")?;
//!
//! // Pretty-print the tree back to SQL.
//! assert_eq!(stmt.to_string(), "SELECT \"name\" FROM \"users\" WHERE \"id\" = ?");
//!
//! // Collect every table referenced in the statement.
//! let mut tables = vec![];
//! ast::walk(&stmt, |node| {
//!     if let NodeRef::Source(Source::Table(name)) = node {
//!         tables.push(name.name.name.clone());
//!     }
//!     true
//! });
//! assert_eq!(tables, ["users"]);
//! # Ok::<(), litesql::Error>(())
//! ```
//!
//! Parsing never executes anything and allocates only the tree it returns;
//! the tree owns all of its strings and outlives the input.

pub mod ast;
pub mod location;
pub mod parser;
pub mod tokenizer;

pub use crate::ast::Statement;
pub use crate::location::Location;
pub use crate::parser::{parse_expr, parse_multi_stmt, parse_stmt, Error, Parser};
pub use crate::tokenizer::{Token, Tokenizer};
