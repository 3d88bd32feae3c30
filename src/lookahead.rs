// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lookaheads of arbitrary length over any `CharSource`.
//!
//! Characters are read from the wrapped source into a buffer that is
//! refilled (after moving the unconsumed part to its start) whenever a
//! read or a lookahead needs more than it holds. A lookahead longer
//! than the buffer grows it; the buffer never shrinks.

use crate::pos::Location;
use crate::source::{CharSource, Input, Lookahead, Peek, SourceError};

pub const DEFAULT_CAPACITY: usize = 20;

type Slot = (Input, Option<Location>);

const EMPTY_SLOT: Slot = (Input::Eof, None);

pub struct LookaheadBuffer<S> {
    inner: S,
    /// Always `capacity` long; only `start..end` is meaningful.
    buffer: Vec<Slot>,
    start: usize,
    end: usize,
    /// Once set, the wrapped source is not read anymore (until
    /// `get_mut` hands it out); the `Eof` it returned sits at
    /// `end - 1`.
    eof_seen: bool,
    last: Option<Location>,
}

impl<S: CharSource> LookaheadBuffer<S> {
    pub fn new(inner: S) -> LookaheadBuffer<S> {
        LookaheadBuffer::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: S, capacity: usize) -> LookaheadBuffer<S> {
        let last = inner.position();
        LookaheadBuffer {
            inner,
            buffer: vec![EMPTY_SLOT; capacity.max(1)],
            start: 0,
            end: 0,
            eof_seen: false,
            last,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of inputs read from the wrapped source but not consumed
    /// yet.
    pub fn buffered(&self) -> usize {
        self.end - self.start
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// The wrapped source. Inputs already buffered are still
    /// delivered before anything the wrapped source yields from now
    /// on. A buffered EOF is dropped, so that the wrapped source is
    /// read again (it may have been given more input, e.g. by an
    /// inclusion).
    pub fn get_mut(&mut self) -> &mut S {
        if self.eof_seen {
            self.eof_seen = false;
            if self.end > self.start && self.buffer[self.end - 1].0.is_eof() {
                self.end -= 1;
            }
        }
        &mut self.inner
    }

    // Move the unconsumed part to the start of the buffer.
    fn compact(&mut self) {
        if self.start > 0 {
            let capacity = self.buffer.len();
            self.buffer.drain(..self.start);
            self.buffer.resize(capacity, EMPTY_SLOT);
            self.end -= self.start;
            self.start = 0;
        }
    }

    // Read from the wrapped source into `beginning..` until the buffer
    // is full or EOF is read. Expects `start == 0`.
    fn fill_from(&mut self, beginning: usize) -> Result<(), SourceError> {
        if self.eof_seen {
            return Ok(())
        }
        self.start = 0;
        self.end = beginning;
        for i in beginning..self.buffer.len() {
            let input = self.inner.read()?;
            self.buffer[i] = (input, self.inner.position());
            self.end += 1;
            if input.is_eof() {
                self.eof_seen = true;
                break;
            }
        }
        Ok(())
    }

    fn refill(&mut self) -> Result<(), SourceError> {
        if self.eof_seen {
            return Ok(())
        }
        self.compact();
        self.fill_from(self.end)
    }

    /// Grow the buffer to `size`, keeping the buffered inputs, and
    /// fill it. Requests not larger than the current capacity are
    /// ignored.
    pub fn resize(&mut self, size: usize) -> Result<(), SourceError> {
        let old = self.buffer.len();
        if size <= old {
            return Ok(())
        }
        log::trace!("growing lookahead buffer from {} to {}", old, size);
        self.compact();
        self.buffer.resize(size, EMPTY_SLOT);
        self.fill_from(self.end)
    }

    /// A lookahead over the whole current capacity.
    pub fn lookahead_all(&mut self) -> Result<String, SourceError> {
        let n = self.capacity();
        self.lookahead(n)
    }
}

impl<S: CharSource> CharSource for LookaheadBuffer<S> {
    fn read(&mut self) -> Result<Input, SourceError> {
        if self.start == self.end {
            self.fill_from(0)?;
        }
        if self.start == self.end {
            return Ok(Input::Eof)
        }
        let (input, pos) = &self.buffer[self.start];
        let input = *input;
        self.last = pos.clone();
        if !input.is_eof() {
            self.start += 1;
        }
        Ok(input)
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.start = 0;
        self.end = 0;
        self.eof_seen = true;
        self.inner.close()
    }

    fn position(&self) -> Option<Location> {
        self.last.clone()
    }
}

impl<S: CharSource> Peek for LookaheadBuffer<S> {
    fn peek(&mut self) -> Result<Input, SourceError> {
        if self.start == self.end {
            self.refill()?;
        }
        if self.start == self.end {
            return Ok(Input::Eof)
        }
        Ok(self.buffer[self.start].0)
    }
}

impl<S: CharSource> Lookahead for LookaheadBuffer<S> {
    fn lookahead(&mut self, n: usize) -> Result<String, SourceError> {
        if n == 0 {
            return Ok(String::new())
        }
        if n > self.capacity() {
            self.resize(n)?;
        } else if n > self.buffered() {
            self.refill()?;
        }
        let s = self.buffer[self.start..self.end].iter()
            .take(n)
            .map_while(|(input, _)| input.char())
            .collect();
        Ok(s)
    }
}
