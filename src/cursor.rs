// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The window of characters the tokenizer works on: the current one,
//! the one following it (always read already), and the previous one,
//! with the locations of the current and following ones.
//!
//! Carriage returns are dropped here, so CRLF line endings look like
//! LF to everything above.

use crate::pos::Location;
use crate::source::{CharSource, Input, Lookahead, Peek, SourceError};

pub struct Cursor<S> {
    source: S,
    previous: Option<Input>,
    current: Input,
    current_at: Location,
    following: Input,
    following_at: Location,
    /// Bookkeeping for sources that don't report positions.
    counted: Location,
    /// Whether `following` has been read.
    primed: bool,
    /// Whether `current` has been set.
    started: bool,
}

impl<S: Peek> Cursor<S> {
    pub fn new(source: S) -> Cursor<S> {
        let start = source.position().unwrap_or_default();
        Cursor {
            source,
            previous: None,
            current: Input::Eof,
            current_at: start.clone(),
            following: Input::Eof,
            following_at: start.clone(),
            counted: start,
            primed: false,
            started: false,
        }
    }

    fn read(&mut self) -> Result<(Input, Location), SourceError> {
        loop {
            let input = self.source.read()?;
            if input.is('\r') {
                continue;
            }
            let at = match self.source.position() {
                Some(at) => at,
                None => {
                    self.counted.advance(input);
                    self.counted.clone()
                }
            };
            return Ok((input, at))
        }
    }

    fn read_following(&mut self) -> Result<(), SourceError> {
        let (input, at) = self.read()?;
        self.following = input;
        self.following_at = at;
        Ok(())
    }

    /// Read the first character into `following` if that hasn't
    /// happened yet.
    pub fn prime(&mut self) -> Result<(), SourceError> {
        if !self.primed {
            self.primed = true;
            self.read_following()?;
        }
        Ok(())
    }

    /// Make the following character the current one and return it.
    /// At EOF the source is asked again, as another source may have
    /// been included into it since.
    pub fn advance(&mut self) -> Result<Input, SourceError> {
        if self.primed && self.following.is_eof() {
            self.read_following()?;
        }
        self.prime()?;
        if self.started {
            self.previous = Some(self.current);
        } else {
            self.started = true;
        }
        self.current = self.following;
        self.current_at = self.following_at.clone();
        if !self.following.is_eof() {
            self.read_following()?;
        }
        Ok(self.current)
    }

    pub fn current(&self) -> Input {
        self.current
    }

    pub fn following(&self) -> Input {
        self.following
    }

    /// The character current before the last `advance`, `None` before
    /// the second one.
    pub fn previous(&self) -> Option<Input> {
        self.previous
    }

    /// The input after the following one, without consuming anything.
    pub fn after_following(&mut self) -> Result<Input, SourceError> {
        if self.following.is_eof() {
            return Ok(Input::Eof)
        }
        loop {
            let input = self.source.peek()?;
            if !input.is('\r') {
                return Ok(input)
            }
            // would be dropped anyway
            self.source.read()?;
        }
    }

    pub fn current_location(&self) -> &Location {
        &self.current_at
    }

    pub fn following_location(&self) -> &Location {
        &self.following_at
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: Lookahead> Cursor<S> {
    /// The next `n` characters starting with the current one, without
    /// consuming anything; shorter if the input ends (or an inclusion
    /// sentinel comes) before.
    pub fn upcoming(&mut self, n: usize) -> Result<String, SourceError> {
        let mut s = String::new();
        for input in [self.current, self.following].into_iter().take(n) {
            match input.char() {
                Some(c) => s.push(c),
                None => return Ok(s)
            }
        }
        if n > 2 {
            s.push_str(&self.source.lookahead(n - 2)?);
        }
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffered_chars::ReaderSource;
    use crate::pushback::Pushback;

    #[test]
    fn window_and_counting() {
        let mut c = Cursor::new(Pushback::new(ReaderSource::from("ab\r\nc")));
        assert_eq!(c.advance().unwrap(), Input::Char('a'));
        assert_eq!(c.previous(), None);
        assert_eq!(c.following(), Input::Char('b'));
        assert_eq!(c.current_location().col, 1);
        assert_eq!(c.advance().unwrap(), Input::Char('b'));
        assert_eq!(c.after_following().unwrap(), Input::Char('c'));
        assert_eq!(c.following(), Input::Char('\n'));
        assert_eq!(c.advance().unwrap(), Input::Char('\n'));
        assert_eq!((c.current_location().line, c.current_location().col), (2, 0));
        assert_eq!(c.previous(), Some(Input::Char('b')));
        assert_eq!(c.advance().unwrap(), Input::Char('c'));
        assert_eq!((c.current_location().line, c.current_location().col), (2, 1));
        assert_eq!(c.advance().unwrap(), Input::Eof);
        assert_eq!(c.advance().unwrap(), Input::Eof);
    }
}
