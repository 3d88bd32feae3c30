// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Eq;
use std::sync::Arc;

use crate::source::Input;

/// Where a character was read from. `line` is 1-based. `col` counts
/// the characters read so far on the line, i.e. the first character
/// of a line is at column 1, and a newline character itself is
/// reported at column 0 of the line it starts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Location {
    pub file: Option<Arc<str>>,
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub fn start(file: Option<Arc<str>>) -> Location {
        Location { file, line: 1, col: 0 }
    }

    /// Update the line/column bookkeeping for having read `input`.
    pub fn advance(&mut self, input: Input) {
        match input {
            Input::Char('\n') => {
                self.line += 1;
                self.col = 0;
            }
            Input::Char('\u{8}') => {
                if self.col > 0 {
                    self.col -= 1;
                }
            }
            Input::Char(_) => self.col += 1,
            Input::StartOfInclusion => {
                self.line = 1;
                self.col = 0;
            }
            Input::EndOfInclusion | Input::Eof => {}
        }
    }

    pub fn same_file(&self, other: &Location) -> bool {
        self.file.as_deref() == other.file.as_deref()
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::start(None)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        // Following the Emacs convention for location information,
        // like the "in <path>@line.col" messages of error reports.
        if let Some(file) = &self.file {
            f.write_fmt(format_args!("{:?}", file))?;
        }
        f.write_fmt(format_args!("@{}.{}", self.line, self.col))
    }
}

/// The locations of the first and the last character of a token.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Span {
        Span { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        if self.start.same_file(&self.end) {
            f.write_fmt(format_args!("{}-{}.{}",
                                     self.start,
                                     self.end.line,
                                     self.end.col))
        } else {
            // can happen with tokens straddling an inclusion boundary
            f.write_fmt(format_args!("{}-{}", self.start, self.end))
        }
    }
}
