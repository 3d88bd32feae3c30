// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading numeric literals.
//!
//! All numbers are `f64`. They are accumulated digit by digit, and an
//! exponent is applied by repeated multiplication or division by 10,
//! thus large or very precise literals may not come out as the
//! closest `f64`.

use crate::cursor::Cursor;
use crate::settings::Numbers;
use crate::source::{Input, Peek};
use crate::syntax::Syntax;
use crate::tokenizer::TokenError;

/// Fraction digits beyond these (after leading zeros) are read but
/// ignored.
const MAX_SIGNIFICANT_DIGITS: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    pub is_integer: bool,
}

fn decimal_value(input: Input) -> Option<f64> {
    input.char().and_then(|c| c.to_digit(10)).map(f64::from)
}

/// Read the number starting at the cursor's current character, which
/// `Syntax::classify` must have found to be `Numeric`. On return the
/// current character is the last one of the literal.
///
/// A sign is only part of the number if immediately followed by a
/// digit, or a dot and a digit. With non-decimals enabled, `0x` or
/// `0X` starts a hexadecimal integer (`0x` alone is 0), and `0`
/// followed by an octal digit starts an octal integer. Integers may
/// carry an `l` or `L` suffix, and any decimal may carry `f`, `F`,
/// `d` or `D`, which makes it count as non-integer; the suffixes do
/// not change the value.
pub fn read_number<S: Peek>(cursor: &mut Cursor<S>, syntax: &Syntax)
                            -> Result<Number, TokenError> {
    let negative = cursor.current().is('-');
    if negative || cursor.current().is('+') {
        cursor.advance()?;
    }
    let number =
        if cursor.current().is('0')
        && syntax.non_decimals()
        && syntax.numbers() == Numbers::Full
    {
        let following = cursor.following();
        if following.is('x') || following.is('X') {
            cursor.advance()?;
            read_radix(cursor, 16)?
        } else if following.is_octal_digit() {
            read_radix(cursor, 8)?
        } else {
            read_decimal(cursor, syntax)?
        }
    } else {
        read_decimal(cursor, syntax)?
    };
    Ok(if negative {
        Number { value: -number.value, ..number }
    } else {
        number
    })
}

// Digits in `radix` following the current character.
fn read_radix<S: Peek>(cursor: &mut Cursor<S>, radix: u32)
                       -> Result<Number, TokenError> {
    let mut value = 0.;
    while let Some(d) = cursor.following().char().and_then(|c| c.to_digit(radix)) {
        value = value * f64::from(radix) + f64::from(d);
        cursor.advance()?;
    }
    if cursor.following().is('l') || cursor.following().is('L') {
        cursor.advance()?;
    }
    Ok(Number { value, is_integer: true })
}

fn read_decimal<S: Peek>(cursor: &mut Cursor<S>, syntax: &Syntax)
                         -> Result<Number, TokenError> {
    let mut value = 0.;
    let mut is_integer = true;
    let has_digits = !cursor.current().is('.');
    if has_digits {
        value = decimal_value(cursor.current())
            .ok_or(TokenError::MalformedNumber)?;
        while let Some(d) = decimal_value(cursor.following()) {
            value = value * 10. + d;
            cursor.advance()?;
        }
    }
    if syntax.numbers() == Numbers::DigitsOnly {
        return Ok(Number { value, is_integer })
    }

    // Only take a dot after the integer part if another dot doesn't
    // follow it, so that "1.." is 1 and two dots
    if cursor.following().is('.') && !cursor.after_following()?.is('.') {
        cursor.advance()?;
    }
    if cursor.current().is('.') {
        is_integer = false;
        let mut mantissa = 0.;
        let mut precision = 1.;
        let mut has_mantissa_digits = false;
        let mut significant = 0;
        while let Some(d) = decimal_value(cursor.following()) {
            has_mantissa_digits = true;
            // further digits can't change an f64
            if significant < MAX_SIGNIFICANT_DIGITS {
                mantissa = mantissa * 10. + d;
                precision *= 10.;
                if mantissa != 0. {
                    significant += 1;
                }
            }
            cursor.advance()?;
        }
        if !(has_digits || has_mantissa_digits) {
            return Err(TokenError::MalformedNumber)
        }
        value += mantissa / precision;
    }

    if cursor.following().is('e') || cursor.following().is('E') {
        is_integer = false;
        cursor.advance()?;
        let mut fractional = false;
        if cursor.following().is('-') || cursor.following().is('+') {
            fractional = cursor.following().is('-');
            cursor.advance()?;
        }
        let mut exponent: u32 = 0;
        let mut has_exponent_digits = false;
        while let Some(d) = cursor.following().char().and_then(|c| c.to_digit(10)) {
            has_exponent_digits = true;
            exponent = exponent.saturating_mul(10).saturating_add(d);
            cursor.advance()?;
        }
        if !has_exponent_digits {
            return Err(TokenError::MalformedNumber)
        }
        for _ in 0..exponent {
            if fractional {
                value /= 10.;
            } else {
                value *= 10.;
            }
            if value == 0. || value.is_infinite() {
                break;
            }
        }
    }

    match cursor.following().char() {
        Some('l' | 'L') if is_integer => {
            cursor.advance()?;
        }
        Some('f' | 'F' | 'd' | 'D') => {
            is_integer = false;
            cursor.advance()?;
        }
        _ => {}
    }
    Ok(Number { value, is_integer })
}
