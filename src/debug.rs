// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for looking at token streams

use crate::comments::CommentPolicy;
use crate::source::Peek;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{TokenErrorWithPos, Tokenizer};

/// Read the remaining tokens, EOF excluded.
pub fn read_all<S: Peek, C: CommentPolicy<S>>(
    t: &mut Tokenizer<S, C>
) -> Result<Vec<Token>, TokenErrorWithPos> {
    let mut tokens = Vec::new();
    while t.next_token()? != TokenKind::Eof {
        tokens.push(t.token().clone());
    }
    Ok(tokens)
}

/// Read the remaining tokens, EOF included, each rendered with its
/// span like the tokenizer's `Display`.
pub fn dump<S: Peek, C: CommentPolicy<S>>(
    t: &mut Tokenizer<S, C>
) -> Result<Vec<String>, TokenErrorWithPos> {
    let mut lines = Vec::new();
    loop {
        let kind = t.next_token()?;
        lines.push(t.to_string());
        if kind == TokenKind::Eof {
            return Ok(lines)
        }
    }
}
