// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single input of peeking over any `CharSource`.

use crate::pos::Location;
use crate::source::{CharSource, Input, Peek, SourceError};

pub struct Pushback<S> {
    inner: S,
    /// An input read ahead by `peek`, with the inner source's
    /// position after it.
    slot: Option<(Input, Option<Location>)>,
    /// The position after the input most recently returned by `read`.
    last: Option<Location>,
}

impl<S: CharSource> Pushback<S> {
    pub fn new(inner: S) -> Pushback<S> {
        let last = inner.position();
        Pushback { inner, slot: None, last }
    }

    /// The wrapped source. Note that one input may already have been
    /// taken from it by `peek`.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// The wrapped source. A peeked EOF is dropped, so that the
    /// wrapped source is read again.
    pub fn get_mut(&mut self) -> &mut S {
        if matches!(self.slot, Some((Input::Eof, _))) {
            self.slot = None;
        }
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: CharSource> CharSource for Pushback<S> {
    fn read(&mut self) -> Result<Input, SourceError> {
        if let Some((input, pos)) = self.slot.take() {
            self.last = pos;
            Ok(input)
        } else {
            let input = self.inner.read()?;
            self.last = self.inner.position();
            Ok(input)
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.slot = None;
        self.inner.close()
    }

    fn position(&self) -> Option<Location> {
        self.last.clone()
    }
}

impl<S: CharSource> Peek for Pushback<S> {
    fn peek(&mut self) -> Result<Input, SourceError> {
        if let Some((input, _)) = &self.slot {
            return Ok(*input)
        }
        let input = self.inner.read()?;
        self.slot = Some((input, self.inner.position()));
        Ok(input)
    }
}
