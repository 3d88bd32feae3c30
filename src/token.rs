// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::pos::Span;
use kstring::KString;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// No token has been read yet.
    Nothing,
    Eof,
    /// A newline, if end-of-line is significant.
    Eol,
    Word,
    Number,
    /// A quoted word, with the opening quote character.
    Quoted(char),
    /// A whitespace character, if whitespace is significant.
    Whitespace(char),
    Ordinary(char),
    /// An inclusion boundary (only seen with non-seamless inclusion).
    Special,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The text of `Word` and `Quoted` tokens (without the quotes).
    pub string_value: Option<KString>,
    pub numeric_value: Option<f64>,
    pub is_integer: bool,
    /// The closing quote of a `Quoted` token.
    pub closing_quote: Option<char>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Token {
        Token {
            kind,
            string_value: None,
            numeric_value: None,
            is_integer: false,
            closing_quote: None,
            span,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        self.string_value.as_deref()
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(TokenKind::Nothing, Span::default())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        let s = self.string_value().unwrap_or("");
        match self.kind {
            TokenKind::Nothing => f.write_str("NOTHING"),
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Eol => f.write_str("EOL"),
            TokenKind::Word => f.write_fmt(format_args!("WORD({})", s)),
            TokenKind::Number => {
                let n = self.numeric_value.unwrap_or(f64::NAN);
                if self.is_integer {
                    f.write_fmt(format_args!("NUMBER({})", n))
                } else {
                    f.write_fmt(format_args!("NUMBER({:?})", n))
                }
            }
            TokenKind::Quoted(left) => {
                f.write_str("QUOTE(")?;
                f.write_char(left)?;
                f.write_str(s)?;
                f.write_char(self.closing_quote.unwrap_or(left))?;
                f.write_char(')')
            }
            TokenKind::Whitespace(c) | TokenKind::Ordinary(c) =>
                f.write_fmt(format_args!("{:?}", c)),
            TokenKind::Special => f.write_str("SPECIAL"),
        }
    }
}
