// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A character source that can switch to another source (e.g. an
//! included file) in midstream, and resume reading the suspended one
//! at the exact point it was left once the included one is exhausted.
//!
//! By default inclusions are seamless: the character read after
//! starting or ending an inclusion is the first one of the included
//! source, or the next one of the resumed source. With
//! `set_seamless(false)`, `read` returns `Input::StartOfInclusion`
//! and `Input::EndOfInclusion` at these points instead.
//!
//! Circular inclusion can only be detected for files included by
//! path (`from_path`, `include_path`), since arbitrary sources carry
//! no identity. Including a file that is currently open at any level
//! fails with `SourceError::CircularInclusion`.

use crate::buffered_chars::ReaderSource;
use crate::pos::Location;
use crate::source::{CharSource, Input, SourceError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The name shown in locations, and the canonical path used to
/// recognize a file that is already open.
#[derive(Debug, Clone)]
struct FileId {
    name: Arc<str>,
    canonical: PathBuf,
}

/// A suspended source.
struct Frame<'a> {
    source: Box<dyn CharSource + 'a>,
    file: Option<FileId>,
    line: u32,
    col: u32,
}

pub struct IncludeSource<'a> {
    source: Box<dyn CharSource + 'a>,
    file: Option<FileId>,
    line: u32,
    col: u32,
    frames: Vec<Frame<'a>>,
    active_files: HashSet<PathBuf>,
    seamless: bool,
    inclusion_start: bool,
    reached_end: bool,
    latest: Input,
}

fn identify(path: &Path) -> Result<PathBuf, SourceError> {
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound =>
            Err(SourceError::FileNotFound(path.to_path_buf())),
        Err(e) => Err(SourceError::Io(e)),
    }
}

fn open_file(path: &Path, canonical: PathBuf)
             -> Result<(ReaderSource<'static>, FileId), SourceError> {
    let source = ReaderSource::open(&canonical)?;
    let name: Arc<str> = Arc::from(path.to_string_lossy().as_ref());
    Ok((source, FileId { name, canonical }))
}

impl<'a> IncludeSource<'a> {
    pub fn new(source: impl CharSource + 'a) -> IncludeSource<'a> {
        IncludeSource {
            source: Box::new(source),
            file: None,
            line: 1,
            col: 0,
            frames: Vec::new(),
            active_files: HashSet::new(),
            seamless: true,
            inclusion_start: false,
            reached_end: false,
            latest: Input::StartOfInclusion,
        }
    }

    /// Read from the file at `path`, which counts as open (for the
    /// circularity check) until it is exhausted.
    pub fn from_path(path: impl AsRef<Path>)
                     -> Result<IncludeSource<'a>, SourceError> {
        let path = path.as_ref();
        let (source, id) = open_file(path, identify(path)?)?;
        let mut s = IncludeSource::new(source);
        s.active_files.insert(id.canonical.clone());
        s.file = Some(id);
        Ok(s)
    }

    pub fn set_seamless(&mut self, seamless: bool) {
        self.seamless = seamless;
    }

    pub fn is_seamless(&self) -> bool {
        self.seamless
    }

    /// The number of suspended sources.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_outermost(&self) -> bool {
        self.frames.is_empty()
    }

    /// The name of the file currently read from, if it is one.
    pub fn file(&self) -> Option<&str> {
        self.file.as_ref().map(|id| &*id.name)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.col
    }

    /// The input most recently returned by `read` (including
    /// sentinels swallowed in seamless mode).
    pub fn latest(&self) -> Input {
        self.latest
    }

    /// Whether the end of the outermost source has been read.
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    fn suspend(&mut self, source: Box<dyn CharSource + 'a>,
               file: Option<FileId>) {
        let frame = Frame {
            source: std::mem::replace(&mut self.source, source),
            file: std::mem::replace(&mut self.file, file),
            line: self.line,
            col: self.col,
        };
        self.frames.push(frame);
        self.inclusion_start = true;
        self.reached_end = false;
    }

    /// Continue reading from `source` until it is exhausted.
    pub fn include(&mut self, source: impl CharSource + 'a) {
        log::debug!("including a stream at depth {}", self.depth() + 1);
        self.suspend(Box::new(source), None);
    }

    /// Continue reading from the file at `path` until it is
    /// exhausted. Nothing changes if this fails.
    pub fn include_path(&mut self, path: impl AsRef<Path>)
                        -> Result<(), SourceError> {
        let path = path.as_ref();
        let canonical = identify(path).map_err(|e| {
            log::debug!("cannot include {:?}: {}", path, e);
            e
        })?;
        if self.active_files.contains(&canonical) {
            log::debug!("refusing circular inclusion of {:?}", path);
            return Err(SourceError::CircularInclusion(path.to_path_buf()))
        }
        let (source, id) = open_file(path, canonical)?;
        log::debug!("including file {:?} at depth {}", path, self.depth() + 1);
        self.active_files.insert(id.canonical.clone());
        self.suspend(Box::new(source), Some(id));
        Ok(())
    }

    // Called when the current source is exhausted; returns false if it
    // is the outermost one.
    fn resume(&mut self) -> Result<bool, SourceError> {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return Ok(false)
        };
        let mut finished = std::mem::replace(&mut self.source, frame.source);
        let finished_file = std::mem::replace(&mut self.file, frame.file);
        self.line = frame.line;
        self.col = frame.col;
        if let Some(id) = &finished_file {
            self.active_files.remove(&id.canonical);
        }
        log::debug!("end of inclusion of {:?}, back at depth {}",
                    finished_file.as_ref().map(|id| &*id.name),
                    self.depth());
        finished.close()?;
        Ok(true)
    }

    fn read_raw(&mut self) -> Result<Input, SourceError> {
        if self.inclusion_start {
            self.inclusion_start = false;
            return Ok(Input::StartOfInclusion)
        }
        let input = self.source.read()?;
        if !input.is_eof() {
            return Ok(input)
        }
        if self.resume()? {
            Ok(Input::EndOfInclusion)
        } else {
            self.reached_end = true;
            Ok(Input::Eof)
        }
    }

    /// Skip `n` characters or up to EOF; inclusion sentinels are
    /// skipped without being counted. Returns the number of characters
    /// skipped.
    pub fn skip(&mut self, n: usize) -> Result<usize, SourceError> {
        let mut count = 0;
        while count < n {
            match self.read()? {
                Input::Eof => break,
                Input::Char(_) => count += 1,
                Input::StartOfInclusion | Input::EndOfInclusion => {}
            }
        }
        Ok(count)
    }
}

impl<'a> CharSource for IncludeSource<'a> {
    fn read(&mut self) -> Result<Input, SourceError> {
        loop {
            let input = self.read_raw()?;
            self.latest = input;
            let mut at = Location { file: None, line: self.line, col: self.col };
            at.advance(input);
            (self.line, self.col) = (at.line, at.col);
            let is_seam = matches!(input, Input::StartOfInclusion
                                          | Input::EndOfInclusion);
            if !(self.seamless && is_seam) {
                return Ok(input)
            }
        }
    }

    /// Closes the current source and all suspended ones. All of them
    /// are closed even if some fail; the first error is returned.
    fn close(&mut self) -> Result<(), SourceError> {
        let mut result = self.source.close();
        while let Some(mut frame) = self.frames.pop() {
            let r = frame.source.close();
            if result.is_ok() {
                result = r;
            }
        }
        self.active_files.clear();
        self.inclusion_start = false;
        result
    }

    fn position(&self) -> Option<Location> {
        Some(Location {
            file: self.file.as_ref().map(|id| id.name.clone()),
            line: self.line,
            col: self.col,
        })
    }
}
