// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading quoted words with escapes.

use crate::cursor::Cursor;
use crate::source::{Input, Peek};
use crate::tokenizer::TokenError;

fn try_u32_to_char(code: u32) -> Result<char, TokenError> {
    char::from_u32(code).ok_or(TokenError::InvalidCodePoint(code))
}

/// Read the characters after the cursor's current one (the opening
/// quote `left`) up to and including `right`, and return them without
/// the closing quote. With an `escape` character, the character after
/// it is taken literally, except:
///
/// * up to three octal digits give the character with that code;
/// * `n`, `t`, `b`, `r`, `f` give newline, tab, backspace, carriage
///   return and form feed;
/// * `u` (which may be repeated) and exactly four hex digits give the
///   character with that code.
///
/// Inclusion sentinels within the quotes are ignored.
pub fn read_quoted<S: Peek>(
    cursor: &mut Cursor<S>,
    left: char,
    right: char,
    escape: Option<char>,
) -> Result<String, TokenError> {
    let mut s = String::new();
    loop {
        match cursor.advance()? {
            Input::Eof => return Err(TokenError::UnterminatedQuote(left)),
            Input::StartOfInclusion | Input::EndOfInclusion => {}
            Input::Char(c) if c == right => return Ok(s),
            Input::Char(c) if Some(c) == escape => {
                if let Some(c) = read_escaped(cursor, left)? {
                    s.push(c);
                }
            }
            Input::Char(c) => s.push(c),
        }
    }
}

// The cursor is at the escape character. Returns None if a sentinel
// follows it, which is then left to the caller.
fn read_escaped<S: Peek>(cursor: &mut Cursor<S>, left: char)
                         -> Result<Option<char>, TokenError> {
    let following = cursor.following();
    if following.is_octal_digit() {
        let mut code = 0;
        for _ in 0..3 {
            match cursor.following().char().and_then(|c| c.to_digit(8)) {
                Some(d) => code = code * 8 + d,
                None => break
            }
            cursor.advance()?;
        }
        return try_u32_to_char(code).map(Some)
    }
    let c = match following {
        Input::Eof => return Err(TokenError::UnterminatedQuote(left)),
        Input::StartOfInclusion | Input::EndOfInclusion => return Ok(None),
        Input::Char('n') => '\n',
        Input::Char('t') => '\t',
        Input::Char('b') => '\u{8}',
        Input::Char('r') => '\r',
        Input::Char('f') => '\u{c}',
        Input::Char('u') => {
            while cursor.following().is('u') {
                cursor.advance()?;
            }
            let mut code = 0;
            for _ in 0..4 {
                let digit = cursor.following();
                match digit.hex_value() {
                    Some(d) => code = code * 16 + d,
                    None => return Err(TokenError::InvalidUnicodeEscape(digit))
                }
                cursor.advance()?;
            }
            return try_u32_to_char(code).map(Some)
        }
        Input::Char(c) => c,
    };
    cursor.advance()?;
    Ok(Some(c))
}
