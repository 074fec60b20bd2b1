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

//! Source locations.
//!
//! A [`Location`] identifies a byte offset in the input string. With the
//! default `line-column` feature it also carries a 1-based line and a
//! 1-based, byte-counting column, and displays as `line:column`; without
//! the feature it is a bare offset and displays as a decimal integer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the input string.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    offset: usize,
    #[cfg(feature = "line-column")]
    line: u32,
    #[cfg(feature = "line-column")]
    column: u32,
}

impl Location {
    /// The location of the first byte of the input.
    pub fn start() -> Self {
        Location {
            offset: 0,
            #[cfg(feature = "line-column")]
            line: 1,
            #[cfg(feature = "line-column")]
            column: 1,
        }
    }

    /// The byte offset into the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    #[cfg(feature = "line-column")]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number, counting bytes rather than code points.
    #[cfg(feature = "line-column")]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Advances past one input byte. A newline starts the next line; every
    /// other byte moves one column to the right.
    pub(crate) fn advance(&mut self, byte: u8) {
        self.offset += 1;
        #[cfg(feature = "line-column")]
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        #[cfg(not(feature = "line-column"))]
        let _ = byte;
    }
}

#[cfg(feature = "line-column")]
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 || self.column == 0 {
            f.write_str("-")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

#[cfg(not(feature = "line-column"))]
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_offsets() {
        let mut loc = Location::start();
        for b in "ab\ncd".bytes() {
            loc.advance(b);
        }
        assert_eq!(loc.offset(), 5);
    }

    #[cfg(feature = "line-column")]
    #[test]
    fn advance_tracks_lines_and_columns() {
        let mut loc = Location::start();
        assert_eq!(loc.to_string(), "1:1");
        for b in "ab\ncd".bytes() {
            loc.advance(b);
        }
        assert_eq!(loc.line(), 2);
        assert_eq!(loc.column(), 3);
        assert_eq!(loc.to_string(), "2:3");
    }

    #[cfg(feature = "line-column")]
    #[test]
    fn default_location_is_invalid() {
        assert_eq!(Location::default().to_string(), "-");
    }
}
