// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A configurable stream tokenizer, with the following goals:
//!
//! * Character syntax set up at run time, per tokenizer: which
//!   characters make up words, which are whitespace, quotes (with
//!   their closing quote and escape character), comment starters or
//!   ordinary single-character tokens, and which category wins when
//!   a character belongs to several.
//!
//! * Numbers in the usual programming language formats (signs,
//!   fractions, exponents, type suffixes, octal and hexadecimal).
//!
//! * Streaming: characters are pulled from the source as tokens are
//!   requested; nothing is read ahead beyond what deciding on the
//!   current token requires (except for the lookahead buffer, which
//!   fills in blocks).
//!
//! * Comments with fixed `//` and `/* */` markers, or with arbitrary
//!   marker strings recognized by lookahead of arbitrary length.
//!
//! * Including other files or streams in midstream (see
//!   [include](include/index.html)), e.g. for `#include` directives,
//!   with locations reported in the included file.
//!
//! ```
//! use strtok::{buffered_chars::ReaderSource, token::TokenKind, tokenizer::Tokenizer};
//!
//! let mut t = Tokenizer::new(ReaderSource::from("x = 0x1F; // hex"));
//! assert_eq!(t.next_token().unwrap(), TokenKind::Word);
//! assert_eq!(t.next_token().unwrap(), TokenKind::Ordinary('='));
//! assert_eq!(t.next_token().unwrap(), TokenKind::Number);
//! assert_eq!(t.numeric_value(), Some(31.));
//! assert_eq!(t.next_token().unwrap(), TokenKind::Ordinary(';'));
//! assert_eq!(t.next_token().unwrap(), TokenKind::Eof);
//! ```

pub mod buffered_chars;
pub mod comments;
pub mod cursor;
pub mod debug;
pub mod include;
pub mod lookahead;
pub mod number;
pub mod pos;
pub mod pushback;
pub mod quoted;
pub mod settings;
pub mod source;
pub mod syntax;
pub mod token;
pub mod tokenizer;
