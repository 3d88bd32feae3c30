// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character classification.
//!
//! Every character below `TABLE_SIZE` has a set of categories it
//! belongs to. Exactly one of them is its *prevailing* category: the
//! first one, in the precedence order, that it has. Characters at or
//! beyond `TABLE_SIZE` are always `Word` characters; sentinels are
//! `Special`.
//!
//! `Numeric` is not part of the precedence order: when numbers are
//! parsed, a digit is numeric regardless of its other categories, and
//! `.`, `+` and `-` are numeric only where they can start a number
//! (see `Syntax::classify`).
//!
//! Mutators come in two flavors: the plain ones (`word_char`,
//! `quote_pair`, ..) make the character belong to the given category
//! exclusively, the `set_` ones add the category to those it already
//! has.

use crate::settings::Numbers;
use crate::source::Input;
use thiserror::Error;

pub const TABLE_SIZE: usize = 256;

pub const DEFAULT_ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ordinary,
    Whitespace,
    Quote,
    Word,
    Numeric,
    Comment,
    Special,
}

impl Category {
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The precedence order when comments are recognized by character
/// category.
pub const WITH_COMMENT_CHARS: &[Category] = &[
    Category::Word,
    Category::Whitespace,
    Category::Comment,
    Category::Quote,
    Category::Ordinary,
];

/// The precedence order when comments are recognized by marker
/// strings.
pub const WITHOUT_COMMENT_CHARS: &[Category] = &[
    Category::Word,
    Category::Whitespace,
    Category::Quote,
    Category::Ordinary,
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("illegal type precedence {0:?}, expecting a permutation of {1:?}")]
    IllegalPrecedence(Vec<Category>, &'static [Category]),
}

#[derive(Debug, Clone, Copy)]
pub struct CharInfo {
    kinds: u8,
    /// For a quote character, the one closing it.
    pub right: char,
    /// For a quote character, the escape character within the quote;
    /// `None` disables escapes.
    pub escape: Option<char>,
}

/// What surrounds a character that may start a number.
#[derive(Debug, Clone, Copy)]
pub struct Neighbours {
    pub previous: Option<Input>,
    pub following: Input,
    /// The input after `following`; only needed (and only looked at)
    /// for a sign followed by a `.`.
    pub after_following: Option<Input>,
}

#[derive(Debug, Clone)]
pub struct Syntax {
    table: Vec<CharInfo>,
    precedence: Vec<Category>,
    categories: &'static [Category],
    escape: Option<char>,
    numbers: Numbers,
    non_decimals: bool,
}

fn table_index(c: char) -> Option<usize> {
    let i = c as usize;
    if i < TABLE_SIZE {
        Some(i)
    } else {
        None
    }
}

impl Syntax {
    /// A syntax in its default setting; `categories` is the set (and
    /// initial order) the precedence order is a permutation of.
    pub fn new(categories: &'static [Category]) -> Syntax {
        let mut syntax = Syntax {
            table: (0..TABLE_SIZE).map(|i| CharInfo {
                kinds: 0,
                right: char::from(i as u8),
                escape: Some(DEFAULT_ESCAPE),
            }).collect(),
            precedence: categories.to_vec(),
            categories,
            escape: Some(DEFAULT_ESCAPE),
            numbers: Numbers::Off,
            non_decimals: false,
        };
        syntax.set_default();
        syntax
    }

    /// Make all characters ordinary (only) and do not parse numbers.
    pub fn reset(&mut self) {
        self.precedence = self.categories.to_vec();
        for info in self.table.iter_mut() {
            info.kinds = Category::Ordinary.bit();
        }
        self.parse_numbers(false);
    }

    /// Control characters and space are whitespace; letters, digits,
    /// `_` and `.` are word characters; `"` and `'` are quotes with
    /// backslash escapes; everything else is ordinary; numbers
    /// (including octal and hexadecimal ones) are parsed.
    pub fn set_default(&mut self) {
        log::trace!("setting default syntax");
        self.reset();
        self.escape = Some(DEFAULT_ESCAPE);
        self.whitespace_chars('\0'..=' ');
        self.word_chars('A'..='Z');
        self.word_chars('a'..='z');
        self.word_chars('0'..='9');
        self.word_chars("_.".chars());
        self.quote_char('"');
        self.quote_char('\'');
        self.parse_numbers(true);
    }

    pub fn info(&self, c: char) -> Option<&CharInfo> {
        table_index(c).map(|i| &self.table[i])
    }

    fn info_mut(&mut self, c: char) -> Option<&mut CharInfo> {
        match table_index(c) {
            Some(i) => Some(&mut self.table[i]),
            None => None
        }
    }

    // ---- categories, additive and exclusive -----------------------

    /// Add `category` to those of `c`.
    pub fn set_type(&mut self, c: char, category: Category) {
        if let Some(info) = self.info_mut(c) {
            info.kinds |= category.bit();
        }
    }

    pub fn set_types(&mut self, cs: impl IntoIterator<Item=char>,
                     category: Category) {
        for c in cs {
            self.set_type(c, category);
        }
    }

    /// Remove `category`, but no other one, from those of `c`.
    pub fn unset_type(&mut self, c: char, category: Category) {
        if let Some(info) = self.info_mut(c) {
            info.kinds &= !category.bit();
        }
    }

    pub fn unset_types(&mut self, cs: impl IntoIterator<Item=char>,
                       category: Category) {
        for c in cs {
            self.unset_type(c, category);
        }
    }

    /// Make `category` the only one of `c`.
    pub fn only_type(&mut self, c: char, category: Category) {
        if let Some(info) = self.info_mut(c) {
            info.kinds = category.bit();
        }
    }

    pub fn only_types(&mut self, cs: impl IntoIterator<Item=char>,
                      category: Category) {
        for c in cs {
            self.only_type(c, category);
        }
    }

    /// Whether `c` has `category` among others. Characters beyond the
    /// table only have `Word`.
    pub fn has_type(&self, c: char, category: Category) -> bool {
        match self.info(c) {
            Some(info) => info.kinds & category.bit() != 0,
            None => category == Category::Word,
        }
    }

    pub fn ordinary_char(&mut self, c: char) {
        self.only_type(c, Category::Ordinary)
    }

    pub fn ordinary_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.only_types(cs, Category::Ordinary)
    }

    pub fn set_ordinary_char(&mut self, c: char) {
        self.set_type(c, Category::Ordinary)
    }

    pub fn set_ordinary_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.set_types(cs, Category::Ordinary)
    }

    pub fn word_char(&mut self, c: char) {
        self.only_type(c, Category::Word)
    }

    pub fn word_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.only_types(cs, Category::Word)
    }

    pub fn set_word_char(&mut self, c: char) {
        self.set_type(c, Category::Word)
    }

    pub fn set_word_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.set_types(cs, Category::Word)
    }

    pub fn whitespace_char(&mut self, c: char) {
        self.only_type(c, Category::Whitespace)
    }

    pub fn whitespace_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.only_types(cs, Category::Whitespace)
    }

    pub fn set_whitespace_char(&mut self, c: char) {
        self.set_type(c, Category::Whitespace)
    }

    pub fn set_whitespace_chars(&mut self, cs: impl IntoIterator<Item=char>) {
        self.set_types(cs, Category::Whitespace)
    }

    /// Make `c` a comment character exclusively. Only meaningful if
    /// `Comment` is part of the precedence order.
    pub fn comment_char(&mut self, c: char) {
        self.only_type(c, Category::Comment)
    }

    /// Make `c` a quote character exclusively, closed by itself, with
    /// the current default escape character.
    pub fn quote_char(&mut self, c: char) {
        self.quote_pair(c, c, self.escape)
    }

    pub fn quote_char_with_escape(&mut self, c: char, escape: Option<char>) {
        self.quote_pair(c, c, escape)
    }

    /// Make `left` a quote character exclusively, closed by `right`.
    /// Only `left` changes category. With `escape` `None`, no escapes
    /// are processed within these quotes.
    pub fn quote_pair(&mut self, left: char, right: char,
                      escape: Option<char>) {
        if let Some(info) = self.info_mut(left) {
            info.kinds = Category::Quote.bit();
            info.right = right;
            info.escape = escape;
        }
    }

    pub fn set_quote_char(&mut self, c: char) {
        self.set_quote_pair(c, c, self.escape)
    }

    pub fn set_quote_char_with_escape(&mut self, c: char,
                                      escape: Option<char>) {
        self.set_quote_pair(c, c, escape)
    }

    /// Same as `quote_pair` but `left` keeps its other categories.
    pub fn set_quote_pair(&mut self, left: char, right: char,
                          escape: Option<char>) {
        if let Some(info) = self.info_mut(left) {
            info.kinds |= Category::Quote.bit();
            info.right = right;
            info.escape = escape;
        }
    }

    /// The closing quote and escape character for the quote character
    /// `left`. Characters outside the table close themselves and use
    /// the default escape.
    pub fn quote_info(&self, left: char) -> (char, Option<char>) {
        match self.info(left) {
            Some(info) => (info.right, info.escape),
            None => (left, self.escape),
        }
    }

    pub fn is_ordinary_char(&self, c: char) -> bool {
        self.info(c).is_some() && self.has_type(c, Category::Ordinary)
    }

    pub fn is_numeric_char(&self, c: char) -> bool {
        self.info(c).is_some() && self.has_type(c, Category::Numeric)
    }

    pub fn is_word_char(&self, c: char) -> bool {
        self.has_type(c, Category::Word)
    }

    pub fn is_whitespace_char(&self, c: char) -> bool {
        self.info(c).is_some() && self.has_type(c, Category::Whitespace)
    }

    pub fn is_quote_char(&self, c: char) -> bool {
        self.info(c).is_some() && self.has_type(c, Category::Quote)
    }

    pub fn is_comment_char(&self, c: char) -> bool {
        self.info(c).is_some() && self.has_type(c, Category::Comment)
    }

    // ---- escape, precedence, numbers ------------------------------

    /// The escape character given to quote characters defined from
    /// now on without an explicit one.
    pub fn escape_char(&self) -> Option<char> {
        self.escape
    }

    pub fn set_escape_char(&mut self, escape: Option<char>) {
        self.escape = escape;
    }

    pub fn precedence(&self) -> &[Category] {
        &self.precedence
    }

    /// The categories the precedence order has to be a permutation of.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Change the precedence order; the first category takes
    /// precedence over all the others, and so on. Fails, changing
    /// nothing, unless `order` is a permutation of `categories()`.
    pub fn set_type_precedence(&mut self, order: &[Category])
                               -> Result<(), SyntaxError> {
        let is_permutation =
            order.len() == self.categories.len()
            && self.categories.iter().all(
                |c| order.iter().filter(|o| *o == c).count() == 1);
        if !is_permutation {
            return Err(SyntaxError::IllegalPrecedence(order.to_vec(),
                                                      self.categories))
        }
        log::trace!("type precedence now {:?}", order);
        self.precedence = order.to_vec();
        Ok(())
    }

    pub fn numbers(&self) -> Numbers {
        self.numbers
    }

    pub fn non_decimals(&self) -> bool {
        self.non_decimals
    }

    /// Turn full number parsing (including octal and hexadecimal) on,
    /// or number parsing off.
    pub fn parse_numbers(&mut self, on: bool) {
        if on {
            self.numbers = Numbers::Full;
            self.set_types('0'..='9', Category::Numeric);
            self.set_types("+-.".chars(), Category::Numeric);
            self.non_decimals = true;
        } else {
            self.numbers = Numbers::Off;
            self.unset_types('0'..='9', Category::Numeric);
            self.unset_types("+-.".chars(), Category::Numeric);
        }
    }

    /// Only parse maximal sequences of decimal digits as numbers.
    pub fn parse_digits_only(&mut self) {
        self.parse_numbers(true);
        self.numbers = Numbers::DigitsOnly;
        self.set_types("+-.".chars(), Category::Ordinary);
    }

    pub fn parse_non_decimals(&mut self, on: bool) {
        self.non_decimals = on;
    }

    // ---- classification ---------------------------------------------

    /// The category of `input` according to the precedence order
    /// alone.
    pub fn prevailing(&self, input: Input) -> Category {
        let c = match input {
            Input::Char(c) => c,
            _ => return Category::Special
        };
        let info = match self.info(c) {
            Some(info) => info,
            None => return Category::Word
        };
        self.precedence.iter()
            .copied()
            .find(|cat| info.kinds & cat.bit() != 0)
            .unwrap_or(Category::Special)
    }

    /// The category `input` is to be processed as. When numbers are
    /// parsed, digits are `Numeric`; `.` is too if a digit follows and
    /// the previous character was not also a `.` (so that `1..` is not
    /// read as `1.` and `.`); `+` and `-` are if a digit follows, or a
    /// `.` and then a digit. Otherwise `prevailing` decides.
    pub fn classify(&self, input: Input, around: &Neighbours) -> Category {
        let c = match input {
            Input::Char(c) => c,
            _ => return Category::Special
        };
        if self.info(c).is_none() {
            return Category::Word
        }
        if self.numbers.is_on() && self.has_type(c, Category::Numeric) {
            if self.numbers == Numbers::DigitsOnly {
                if c.is_ascii_digit() {
                    return Category::Numeric
                }
                return self.prevailing(input)
            }
            let starts_number = match c {
                '+' | '-' =>
                    around.following.is_decimal_digit()
                    || (around.following.is('.')
                        && around.after_following
                           .map_or(false, Input::is_decimal_digit)),
                '.' =>
                    around.following.is_decimal_digit()
                    && around.previous != Some(Input::Char('.')),
                _ => true
            };
            if starts_number {
                return Category::Numeric
            }
        }
        self.prevailing(input)
    }
}
