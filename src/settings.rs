// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings of a tokenizer that are not about single characters.

/// Which tokens that are normally skipped are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub eol_is_significant: bool,
    pub space_is_significant: bool,
}

pub const DEFAULT_MODES : Modes = Modes {
    eol_is_significant: false,
    space_is_significant: false,
};

/// Every whitespace character, end-of-line included, becomes a
/// token.
pub const RAW_MODES : Modes = Modes {
    eol_is_significant: true,
    space_is_significant: true,
};

/// How numbers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbers {
    /// Digits are whatever else their character type says.
    Off,
    /// Only maximal sequences of decimal digits are numbers; `.`,
    /// `+`, `-`, exponents and type suffixes are not part of them.
    DigitsOnly,
    /// Signs, fractions, exponents, type suffixes and (if enabled)
    /// octal and hexadecimal integers.
    Full,
}

impl Numbers {
    pub fn is_on(self) -> bool {
        self != Numbers::Off
    }
}
