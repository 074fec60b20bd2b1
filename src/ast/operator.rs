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

//! Unary and binary operators.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Every operator the expression grammar recognizes, including the
/// multi-word forms assembled by the parser (`IS NOT DISTINCT FROM`,
/// `NOT LIKE`, `NOT BETWEEN`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Op {
    Or,
    And,
    Not,
    IsNull,
    NotNull,
    In,
    NotIn,
    Match,
    NotMatch,
    Like,
    NotLike,
    Regexp,
    NotRegexp,
    Glob,
    NotGlob,
    Between,
    NotBetween,
    IsDistinctFrom,
    IsNotDistinctFrom,
    Eq,
    Ne,
    Is,
    IsNot,
    Lt,
    Le,
    Gt,
    Ge,
    Escape,
    BitAnd,
    BitOr,
    Lshift,
    Rshift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Concat,
    /// `->`, JSON extraction returning JSON.
    Arrow,
    /// `->>`, JSON extraction returning an SQL value.
    LongArrow,
    Collate,
    BitNot,
}

impl Op {
    /// The binding power of the operator in the binary-expression loop.
    /// Higher binds tighter; binary expressions are left-associative.
    pub fn precedence(self) -> u8 {
        use Op::*;
        match self {
            Or => 1,
            And => 2,
            Not | IsNull | NotNull | In | NotIn | Match | NotMatch | Like | NotLike | Regexp
            | NotRegexp | Glob | NotGlob | Between | NotBetween | IsDistinctFrom
            | IsNotDistinctFrom | Eq | Ne | Is | IsNot => 3,
            Lt | Le | Gt | Ge => 4,
            Escape => 5,
            BitAnd | BitOr | Lshift | Rshift => 6,
            Plus | Minus => 7,
            Multiply | Divide | Modulo => 8,
            Concat | Arrow | LongArrow => 9,
            Collate => 10,
            BitNot => 11,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Op::Or => "OR",
            Op::And => "AND",
            Op::Not => "NOT",
            Op::IsNull => "IS NULL",
            Op::NotNull => "NOT NULL",
            Op::In => "IN",
            Op::NotIn => "NOT IN",
            Op::Match => "MATCH",
            Op::NotMatch => "NOT MATCH",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::Regexp => "REGEXP",
            Op::NotRegexp => "NOT REGEXP",
            Op::Glob => "GLOB",
            Op::NotGlob => "NOT GLOB",
            Op::Between => "BETWEEN",
            Op::NotBetween => "NOT BETWEEN",
            Op::IsDistinctFrom => "IS DISTINCT FROM",
            Op::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Is => "IS",
            Op::IsNot => "IS NOT",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Escape => "ESCAPE",
            Op::BitAnd => "&",
            Op::BitOr => "|",
            Op::Lshift => "<<",
            Op::Rshift => ">>",
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Modulo => "%",
            Op::Concat => "||",
            Op::Arrow => "->",
            Op::LongArrow => "->>",
            Op::Collate => "COLLATE",
            Op::BitNot => "~",
        })
    }
}

/// The binding power of the binary operator that starts with `tok`, or 0
/// when `tok` cannot start a binary operator. This drives the Pratt loop's
/// continue-or-stop decision before the full (possibly multi-token)
/// operator is scanned.
pub(crate) fn start_token_precedence(tok: Token) -> u8 {
    match tok {
        Token::Plus => Op::Plus.precedence(),
        Token::Minus => Op::Minus.precedence(),
        Token::Mult => Op::Multiply.precedence(),
        Token::Div => Op::Divide.precedence(),
        Token::Mod => Op::Modulo.precedence(),
        Token::StringConcat => Op::Concat.precedence(),
        Token::Between => Op::Between.precedence(),
        Token::ShiftLeft => Op::Lshift.precedence(),
        Token::ShiftRight => Op::Rshift.precedence(),
        Token::Ampersand => Op::BitAnd.precedence(),
        Token::Pipe => Op::BitOr.precedence(),
        Token::Lt => Op::Lt.precedence(),
        Token::LtEq => Op::Le.precedence(),
        Token::Gt => Op::Gt.precedence(),
        Token::GtEq => Op::Ge.precedence(),
        Token::Eq => Op::Eq.precedence(),
        Token::Neq => Op::Ne.precedence(),
        Token::Arrow => Op::Arrow.precedence(),
        Token::LongArrow => Op::LongArrow.precedence(),
        Token::In => Op::In.precedence(),
        Token::Like => Op::Like.precedence(),
        Token::Glob => Op::Glob.precedence(),
        Token::Match => Op::Match.precedence(),
        Token::Regexp => Op::Regexp.precedence(),
        Token::And => Op::And.precedence(),
        Token::Or => Op::Or.precedence(),
        Token::IsNull => Op::IsNull.precedence(),
        Token::NotNull => Op::NotNull.precedence(),
        Token::Escape => Op::Escape.precedence(),
        Token::Collate => Op::Collate.precedence(),
        Token::Is => Op::Is.precedence(),
        Token::Not => Op::NotNull.precedence(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_levels() {
        assert!(Op::Or.precedence() < Op::And.precedence());
        assert!(Op::And.precedence() < Op::Eq.precedence());
        assert!(Op::Eq.precedence() < Op::Lt.precedence());
        assert!(Op::Lt.precedence() < Op::Escape.precedence());
        assert!(Op::Escape.precedence() < Op::BitAnd.precedence());
        assert!(Op::BitAnd.precedence() < Op::Plus.precedence());
        assert!(Op::Plus.precedence() < Op::Multiply.precedence());
        assert!(Op::Multiply.precedence() < Op::Concat.precedence());
        assert!(Op::Concat.precedence() < Op::Collate.precedence());
        assert!(Op::Collate.precedence() < Op::BitNot.precedence());
        assert_eq!(Op::BitNot.precedence(), 11);
    }
}
