// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! How the tokenizer recognizes and skips comments.
//!
//! There are two policies:
//!
//! * `SlashComments` knows `//` and `/* */` only, recognized by
//!   looking at the current and the following character. In addition,
//!   characters of the `Comment` category start comments extending to
//!   the end of the line.
//!
//! * `MarkerComments` takes arbitrary strings to start line comments
//!   and to start and end bracketed comments, recognized using
//!   arbitrary lookahead (hence it requires a `Lookahead` source). It
//!   has no `Comment` category.

use crate::cursor::Cursor;
use crate::source::{Input, Lookahead, Peek};
use crate::syntax::{Category, WITH_COMMENT_CHARS, WITHOUT_COMMENT_CHARS};
use crate::tokenizer::TokenError;

pub trait CommentPolicy<S> {
    /// The categories the precedence order is a permutation of.
    const CATEGORIES: &'static [Category];

    /// The default setting: C and C++ style comments are skipped.
    fn new() -> Self;

    /// Skip all kinds of comments configured.
    fn enable(&mut self);

    /// Skip no comments (other than via `Comment` characters).
    fn disable(&mut self);

    /// If a comment starts at the current character of the cursor,
    /// skip it and return true; the current character is then the last
    /// one of the comment (line comments end before the newline).
    fn skip_comment(&mut self, cursor: &mut Cursor<S>)
                    -> Result<bool, TokenError>;
}

/// Skip to the end of the line, leaving the newline to be read next.
pub fn skip_line<S: Peek>(cursor: &mut Cursor<S>) -> Result<(), TokenError> {
    loop {
        let following = cursor.following();
        if following.is('\n') || following.is_eof() {
            return Ok(())
        }
        cursor.advance()?;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashComments {
    pub slash_slash: bool,
    pub slash_star: bool,
}

impl<S: Peek> CommentPolicy<S> for SlashComments {
    const CATEGORIES: &'static [Category] = WITH_COMMENT_CHARS;

    fn new() -> Self {
        SlashComments { slash_slash: true, slash_star: true }
    }

    fn enable(&mut self) {
        self.slash_slash = true;
        self.slash_star = true;
    }

    fn disable(&mut self) {
        self.slash_slash = false;
        self.slash_star = false;
    }

    fn skip_comment(&mut self, cursor: &mut Cursor<S>)
                    -> Result<bool, TokenError> {
        if !cursor.current().is('/') {
            return Ok(false)
        }
        let following = cursor.following();
        if self.slash_slash && following.is('/') {
            skip_line(cursor)?;
            Ok(true)
        } else if self.slash_star && following.is('*') {
            cursor.advance()?;
            loop {
                match cursor.advance()? {
                    Input::Eof =>
                        return Err(TokenError::UnterminatedComment("*/".into())),
                    Input::Char('*') if cursor.following().is('/') => break,
                    _ => {}
                }
            }
            cursor.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerComments {
    pub line: String,
    pub start: String,
    pub end: String,
    pub skip_line: bool,
    pub skip_brackets: bool,
}

// Whether `marker` begins at the current character; the empty marker
// never does.
fn at_marker<S: Lookahead>(cursor: &mut Cursor<S>, marker: &str)
                           -> Result<bool, TokenError> {
    if marker.is_empty() {
        return Ok(false)
    }
    Ok(cursor.upcoming(marker.chars().count())? == marker)
}

fn skip_chars<S: Peek>(cursor: &mut Cursor<S>, n: usize)
                       -> Result<(), TokenError> {
    for _ in 0..n {
        cursor.advance()?;
    }
    Ok(())
}

impl MarkerComments {
    pub fn set_line(&mut self, marker: &str) {
        self.line = marker.into();
        self.skip_line = true;
    }

    pub fn set_brackets(&mut self, start: &str, end: &str) {
        self.start = start.into();
        self.end = end.into();
        self.skip_brackets = true;
    }
}

impl<S: Lookahead> CommentPolicy<S> for MarkerComments {
    const CATEGORIES: &'static [Category] = WITHOUT_COMMENT_CHARS;

    fn new() -> Self {
        MarkerComments {
            line: "//".into(),
            start: "/*".into(),
            end: "*/".into(),
            skip_line: true,
            skip_brackets: true,
        }
    }

    fn enable(&mut self) {
        self.skip_line = true;
        self.skip_brackets = true;
    }

    fn disable(&mut self) {
        self.skip_line = false;
        self.skip_brackets = false;
    }

    fn skip_comment(&mut self, cursor: &mut Cursor<S>)
                    -> Result<bool, TokenError> {
        if self.skip_line && at_marker(cursor, &self.line)? {
            skip_line(cursor)?;
            return Ok(true)
        }
        if self.skip_brackets && at_marker(cursor, &self.start)? {
            skip_chars(cursor, self.start.chars().count() - 1)?;
            let end_len = self.end.chars().count();
            loop {
                if cursor.advance()?.is_eof() {
                    return Err(TokenError::UnterminatedComment(self.end.clone()))
                }
                if at_marker(cursor, &self.end)? {
                    break;
                }
            }
            skip_chars(cursor, end_len.saturating_sub(1))?;
            return Ok(true)
        }
        Ok(false)
    }
}
