// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a token stream.
//!
//! A `Tokenizer` pulls characters from its source on demand, one
//! token per `next_token` call. What the characters mean is decided
//! by its `Syntax` (see [syntax](../syntax/index.html)), which
//! belongs to the tokenizer alone and can be changed between any two
//! calls. Comments are recognized according to the `CommentPolicy`:
//! `Tokenizer::new` gives fixed `//` and `/* */` markers,
//! `Tokenizer::with_lookahead` arbitrary marker strings.
//!
//! The most recent token is kept (`token()`), and can be pushed back
//! once to be returned again by the next call.

use crate::comments::{self, CommentPolicy, MarkerComments, SlashComments};
use crate::cursor::Cursor;
use crate::lookahead::LookaheadBuffer;
use crate::number::read_number;
use crate::pos::{Location, Span};
use crate::pushback::Pushback;
use crate::quoted::read_quoted;
use crate::settings::{Modes, DEFAULT_MODES, RAW_MODES};
use crate::source::{CharSource, Input, Lookahead, Peek, SourceError};
use crate::syntax::{Category, Neighbours, Syntax};
use crate::token::{Token, TokenKind};
use kstring::KString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("bad number format")]
    MalformedNumber,
    #[error("end of input in word quoted with '{0}'")]
    UnterminatedQuote(char),
    #[error("non-hexadecimal digit {0} in unicode escape")]
    InvalidUnicodeEscape(Input),
    #[error("invalid code point {0}")]
    InvalidCodePoint(u32),
    #[error("end of input in comment, missing {0:?}")]
    UnterminatedComment(String),
    #[error("{0}")]
    Source(#[from] SourceError),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct TokenErrorWithPos {
    pub err: TokenError,
    pub pos: Location,
}

impl TokenError {
    pub fn at(self, pos: Location) -> TokenErrorWithPos {
        TokenErrorWithPos {
            err: self,
            pos
        }
    }
}

/// Which end of the current token `skip_char_marking` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Start,
    End,
}

pub struct Tokenizer<S, C> {
    cursor: Cursor<S>,
    syntax: Syntax,
    comments: C,
    modes: Modes,
    token: Token,
    /// The span of the token before `token`.
    previous_span: Span,
    pushed_back: bool,
}

impl<S: CharSource> Tokenizer<Pushback<S>, SlashComments> {
    /// A tokenizer with the default syntax, recognizing `//` and
    /// `/* */` comments.
    pub fn new(source: S) -> Self {
        Tokenizer::from_source(Pushback::new(source))
    }
}

impl<S: CharSource> Tokenizer<LookaheadBuffer<S>, MarkerComments> {
    /// A tokenizer with the default syntax and configurable comment
    /// markers, initially `//`, `/*` and `*/`.
    pub fn with_lookahead(source: S) -> Self {
        Tokenizer::from_source(LookaheadBuffer::new(source))
    }

    pub fn with_lookahead_capacity(source: S, capacity: usize) -> Self {
        Tokenizer::from_source(LookaheadBuffer::with_capacity(source, capacity))
    }
}

impl<S: Peek, C: CommentPolicy<S>> Tokenizer<S, C> {
    pub fn from_source(source: S) -> Self {
        Tokenizer {
            cursor: Cursor::new(source),
            syntax: Syntax::new(C::CATEGORIES),
            comments: C::new(),
            modes: DEFAULT_MODES,
            token: Token::default(),
            previous_span: Span::default(),
            pushed_back: false,
        }
    }

    // ---- configuration ------------------------------------------------

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    pub fn syntax_mut(&mut self) -> &mut Syntax {
        &mut self.syntax
    }

    pub fn comments(&self) -> &C {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut C {
        &mut self.comments
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn set_modes(&mut self, modes: Modes) {
        self.modes = modes;
    }

    /// Whether newlines are returned as `TokenKind::Eol` tokens.
    pub fn eol_is_significant(&mut self, on: bool) {
        self.modes.eol_is_significant = on;
    }

    /// Whether whitespace characters are returned as
    /// `TokenKind::Whitespace` tokens.
    pub fn space_is_significant(&mut self, on: bool) {
        self.modes.space_is_significant = on;
    }

    pub fn enable_comments(&mut self) {
        self.comments.enable();
    }

    pub fn disable_comments(&mut self) {
        self.comments.disable();
    }

    /// The syntax a new tokenizer has (see `Syntax::set_default`);
    /// newlines and whitespace are skipped, C and C++ style comments
    /// too.
    pub fn set_default_syntax(&mut self) {
        self.syntax.set_default();
        self.modes = DEFAULT_MODES;
        self.comments = C::new();
    }

    /// All characters are ordinary, numbers are not parsed, comments
    /// are not skipped, and newlines and whitespace are significant.
    pub fn reset_syntax(&mut self) {
        log::trace!("resetting syntax");
        self.syntax.reset();
        self.modes = RAW_MODES;
        self.comments.disable();
    }

    // ---- tokens -------------------------------------------------------

    /// Read the next token (or return the pushed back one), and return
    /// its kind. Once the input is exhausted, `TokenKind::Eof` is
    /// returned forever.
    pub fn next_token(&mut self) -> Result<TokenKind, TokenErrorWithPos> {
        if self.pushed_back {
            self.pushed_back = false;
            if !self.skipped_on_replay(self.token.kind) {
                return Ok(self.token.kind)
            }
        }
        match self.read_token() {
            Ok(token) => {
                self.previous_span = std::mem::replace(&mut self.token, token).span;
                Ok(self.token.kind)
            }
            Err(e) => Err(e.at(self.cursor.current_location().clone()))
        }
    }

    /// Have the next `next_token` call return the current token again.
    /// Does nothing before the first token; pushing back twice is the
    /// same as once.
    pub fn push_back(&mut self) {
        if self.token.kind != TokenKind::Nothing {
            self.pushed_back = true;
        }
    }

    // Eol and whitespace tokens are dropped on replay if they are not
    // significant anymore.
    fn skipped_on_replay(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Eol => !self.modes.eol_is_significant,
            TokenKind::Whitespace(_) => !self.modes.space_is_significant,
            _ => false
        }
    }

    fn finish(&self, kind: TokenKind, start: Location) -> Token {
        Token::new(kind, Span::new(start, self.cursor.current_location().clone()))
    }

    fn category(&mut self) -> Result<Category, SourceError> {
        let current = self.cursor.current();
        let following = self.cursor.following();
        let after_following =
            if (current.is('+') || current.is('-')) && following.is('.') {
                Some(self.cursor.after_following()?)
            } else {
                None
            };
        let around = Neighbours {
            previous: self.cursor.previous(),
            following,
            after_following,
        };
        Ok(self.syntax.classify(current, &around))
    }

    fn read_word(&mut self, first: char) -> Result<String, TokenError> {
        let mut s = String::new();
        s.push(first);
        loop {
            match self.cursor.following().char() {
                Some(c) if self.syntax.is_word_char(c) => {
                    s.push(c);
                    self.cursor.advance()?;
                }
                _ => return Ok(s)
            }
        }
    }

    fn read_token(&mut self) -> Result<Token, TokenError> {
        loop {
            let current = self.cursor.advance()?;
            let start = self.cursor.current_location().clone();
            let c = match current {
                Input::Char(c) => c,
                Input::Eof => return Ok(self.finish(TokenKind::Eof, start)),
                _ => return Ok(self.finish(TokenKind::Special, start)),
            };
            if self.comments.skip_comment(&mut self.cursor)? {
                continue;
            }
            let token = match self.category()? {
                Category::Special => self.finish(TokenKind::Special, start),
                Category::Comment => {
                    comments::skip_line(&mut self.cursor)?;
                    continue;
                }
                Category::Whitespace => {
                    if c == '\n' && self.modes.eol_is_significant {
                        self.finish(TokenKind::Eol, start)
                    } else if self.modes.space_is_significant {
                        self.finish(TokenKind::Whitespace(c), start)
                    } else {
                        continue;
                    }
                }
                Category::Ordinary => self.finish(TokenKind::Ordinary(c), start),
                Category::Numeric => {
                    let number = read_number(&mut self.cursor, &self.syntax)?;
                    let mut token = self.finish(TokenKind::Number, start);
                    token.numeric_value = Some(number.value);
                    token.is_integer = number.is_integer;
                    token
                }
                Category::Quote => {
                    let (right, escape) = self.syntax.quote_info(c);
                    let s = read_quoted(&mut self.cursor, c, right, escape)?;
                    let mut token = self.finish(TokenKind::Quoted(c), start);
                    token.string_value = Some(KString::from_string(s));
                    token.closing_quote = Some(right);
                    token
                }
                Category::Word => {
                    let s = self.read_word(c)?;
                    let mut token = self.finish(TokenKind::Word, start);
                    token.string_value = Some(KString::from_string(s));
                    token
                }
            };
            return Ok(token)
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn string_value(&self) -> Option<&str> {
        self.token.string_value()
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.token.numeric_value
    }

    pub fn is_integer(&self) -> bool {
        self.token.is_integer
    }

    /// The span of the current token, or of the one before it while
    /// the current one is pushed back.
    pub fn token_span(&self) -> &Span {
        if self.pushed_back {
            &self.previous_span
        } else {
            &self.token.span
        }
    }

    pub fn token_start(&self) -> &Location {
        &self.token_span().start
    }

    pub fn token_end(&self) -> &Location {
        &self.token_span().end
    }

    // ---- characters ---------------------------------------------------

    /// The character after the current one.
    pub fn peek(&mut self) -> Result<Input, SourceError> {
        self.cursor.prime()?;
        Ok(self.cursor.following())
    }

    /// The character before the current one.
    pub fn peek_back(&self) -> Option<Input> {
        self.cursor.previous()
    }

    /// The last character of the current token, or the one after it
    /// if `skip_char` was used since.
    pub fn current_char(&self) -> Input {
        self.cursor.current()
    }

    pub fn skip_char(&mut self) -> Result<Input, SourceError> {
        self.cursor.advance()
    }

    /// Skip a character and move the start or end of the current
    /// token's span to it.
    pub fn skip_char_marking(&mut self, mark: Mark) -> Result<Input, SourceError> {
        let input = self.cursor.advance()?;
        let at = self.cursor.current_location().clone();
        match mark {
            Mark::Start => self.token.span.start = at,
            Mark::End => self.token.span.end = at,
        }
        Ok(input)
    }

    /// The location of the current character.
    pub fn location(&self) -> &Location {
        self.cursor.current_location()
    }

    pub fn line_number(&self) -> u32 {
        self.location().line
    }

    pub fn file(&self) -> Option<&str> {
        self.location().file.as_deref()
    }

    /// `"file F, line N"`, or `"line N"` if not reading from a file.
    pub fn location_string(&self) -> String {
        match self.file() {
            Some(file) => format!("file {}, line {}", file, self.line_number()),
            None => format!("line {}", self.line_number()),
        }
    }

    // ---- source ------------------------------------------------------

    pub fn source(&self) -> &S {
        self.cursor.source()
    }

    /// The source, e.g. to include another one into it. Note that the
    /// tokenizer has read one character ahead already (two after a
    /// number or a sign). With a `LookaheadBuffer` source, everything
    /// it has buffered comes before the included input too, i.e. up
    /// to its capacity in characters (see `LookaheadBuffer::get_mut`).
    pub fn source_mut(&mut self) -> &mut S {
        self.cursor.source_mut()
    }

    pub fn into_source(self) -> S {
        self.cursor.into_source()
    }

    pub fn close(&mut self) -> Result<(), SourceError> {
        self.source_mut().close()
    }
}

impl<S: Lookahead, C: CommentPolicy<S>> Tokenizer<S, C> {
    /// The next `n` characters starting with the current one, without
    /// consuming them.
    pub fn lookahead(&mut self, n: usize) -> Result<String, SourceError> {
        self.cursor.upcoming(n)
    }
}

impl<S: Peek> Tokenizer<S, SlashComments> {
    /// Make `c` start comments up to the end of the line; it has no
    /// other category from now on.
    pub fn comment_char(&mut self, c: char) {
        self.syntax.comment_char(c);
    }

    pub fn slash_slash_comments(&mut self, on: bool) {
        self.comments.slash_slash = on;
    }

    pub fn slash_star_comments(&mut self, on: bool) {
        self.comments.slash_star = on;
    }
}

impl<S: Lookahead> Tokenizer<S, MarkerComments> {
    /// Make `c` (only) start comments up to the end of the line; it
    /// becomes ordinary, to end words.
    pub fn comment_char(&mut self, c: char) {
        self.syntax.ordinary_char(c);
        self.comments.set_line(c.encode_utf8(&mut [0; 4]));
    }

    pub fn slash_slash_comments(&mut self, on: bool) {
        if on {
            self.comments.set_line("//");
        } else {
            self.comments.skip_line = false;
        }
    }

    pub fn slash_star_comments(&mut self, on: bool) {
        if on {
            self.comments.set_brackets("/*", "*/");
        } else {
            self.comments.skip_brackets = false;
        }
    }

    /// Skip comments from `marker` to the end of the line.
    pub fn comment_line(&mut self, marker: &str) {
        self.comments.set_line(marker);
    }

    /// Skip comments from `start` to `end`. They don't nest.
    pub fn comment_brackets(&mut self, start: &str, end: &str) {
        self.comments.set_brackets(start, end);
    }
}

impl<S: Peek, C: CommentPolicy<S>> std::fmt::Display for Tokenizer<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{}\t{}", self.token_span(), self.token))
    }
}
