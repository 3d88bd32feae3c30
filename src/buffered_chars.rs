// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters from anything implementing `Read`.

// TODO: measure whether the genawaiter generator costs noticeably
// per character compared to a hand-written decode loop.

use crate::source::{CharSource, Input, SourceError};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use utf8::{BufReadDecoder, BufReadDecoderError};
use genawaiter::rc::Gen;


pub fn buffered_chars<'r, R>(
    fh: R
) -> impl Iterator<Item=Result<char, SourceError>> + 'r
    where R: Read + 'r
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        loop {
            if let Some(r) = inp.next_strict() {
                match r {
                    Ok(x) => {
                        for c in x.chars() {
                            co.yield_(Ok(c)).await;
                        }
                    },
                    Err(e) => {
                        let err = match e {
                            BufReadDecoderError::InvalidByteSequence(bytes) =>
                                SourceError::InvalidUtf8(bytes.to_vec()),
                            BufReadDecoderError::Io(e) =>
                                SourceError::Io(e),
                        };
                        co.yield_(Err(err)).await;
                        return;
                    }
                }
            } else {
                return;
            }
        }
    }).into_iter()
}

/// A `CharSource` decoding UTF-8 from a byte stream. Does not track
/// positions.
pub struct ReaderSource<'r> {
    // None once exhausted or closed; the generator must not be
    // resumed after it finished.
    chars: Option<Box<dyn Iterator<Item=Result<char, SourceError>> + 'r>>,
}

impl<'r> ReaderSource<'r> {
    pub fn new<R: Read + 'r>(fh: R) -> ReaderSource<'r> {
        ReaderSource {
            chars: Some(Box::new(buffered_chars(fh)))
        }
    }
}

impl ReaderSource<'static> {
    /// Open the file at `path`, distinguishing a missing file from
    /// other IO errors.
    pub fn open(path: &Path) -> Result<ReaderSource<'static>, SourceError> {
        match File::open(path) {
            Ok(fh) => Ok(ReaderSource::new(fh)),
            Err(e) if e.kind() == io::ErrorKind::NotFound =>
                Err(SourceError::FileNotFound(path.to_path_buf())),
            Err(e) => Err(SourceError::Io(e)),
        }
    }
}

impl<'r> From<&'r str> for ReaderSource<'r> {
    fn from(s: &'r str) -> ReaderSource<'r> {
        ReaderSource::new(s.as_bytes())
    }
}

impl<'r> CharSource for ReaderSource<'r> {
    fn read(&mut self) -> Result<Input, SourceError> {
        match self.chars.as_mut().and_then(|cs| cs.next()) {
            Some(Ok(c)) => Ok(Input::Char(c)),
            Some(Err(e)) => {
                self.chars = None;
                Err(e)
            }
            None => {
                self.chars = None;
                Ok(Input::Eof)
            }
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.chars = None;
        Ok(())
    }
}
