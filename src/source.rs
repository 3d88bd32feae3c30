// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The pull-based character sources the tokenizer reads from, and the
//! capabilities (peeking, arbitrary lookahead) some of them offer.

use crate::pos::Location;
use std::path::PathBuf;
use thiserror::Error;

/// What a character source yields: a character, or one of the
/// sentinels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Input {
    Char(char),
    /// Only returned once the outermost source is exhausted. Sources
    /// keep returning it when read again.
    Eof,
    /// An inclusion starts (only visible in non-seamless mode).
    StartOfInclusion,
    /// An inclusion ended and the including source resumes (only
    /// visible in non-seamless mode).
    EndOfInclusion,
}

impl Input {
    pub fn char(self) -> Option<char> {
        match self {
            Input::Char(c) => Some(c),
            _ => None
        }
    }

    pub fn is(self, c: char) -> bool {
        self == Input::Char(c)
    }

    pub fn is_eof(self) -> bool {
        self == Input::Eof
    }

    pub fn is_decimal_digit(self) -> bool {
        matches!(self, Input::Char('0'..='9'))
    }

    pub fn is_octal_digit(self) -> bool {
        matches!(self, Input::Char('0'..='7'))
    }

    pub fn hex_value(self) -> Option<u32> {
        self.char().and_then(|c| c.to_digit(16))
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Input::Char(c) => f.write_fmt(format_args!("{:?}", c)),
            Input::Eof => f.write_str("EOF"),
            Input::StartOfInclusion => f.write_str("SOI"),
            Input::EndOfInclusion => f.write_str("EOI"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("file not found: {0:?}")]
    FileNotFound(PathBuf),
    #[error("circular inclusion of file {0:?}")]
    CircularInclusion(PathBuf),
    #[error("invalid UTF-8 byte sequence {0:?}")]
    InvalidUtf8(Vec<u8>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait CharSource {
    /// Consume and return the next character or sentinel.
    fn read(&mut self) -> Result<Input, SourceError>;

    /// Release the underlying resources. Reading after closing
    /// yields `Input::Eof`.
    fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    /// The location right after the input most recently returned by
    /// `read`, for sources that keep track of it (see
    /// `Location::advance` for the convention). `None` means the
    /// reader of this source has to count by itself.
    fn position(&self) -> Option<Location> {
        None
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read(&mut self) -> Result<Input, SourceError> {
        (**self).read()
    }
    fn close(&mut self) -> Result<(), SourceError> {
        (**self).close()
    }
    fn position(&self) -> Option<Location> {
        (**self).position()
    }
}

/// Sources that can show the next input without consuming it.
pub trait Peek: CharSource {
    fn peek(&mut self) -> Result<Input, SourceError>;
}

/// Sources that can show an arbitrary number of upcoming characters
/// without consuming them.
pub trait Lookahead: Peek {
    /// The next `n` characters, shorter if the input ends (or an
    /// inclusion sentinel comes) before.
    fn lookahead(&mut self, n: usize) -> Result<String, SourceError>;
}
