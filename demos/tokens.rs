// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use strtok::include::IncludeSource;
use strtok::pushback::Pushback;
use strtok::comments::SlashComments;
use strtok::token::TokenKind;
use strtok::tokenizer::Tokenizer;
use clap::Parser as ClapParser;
use env_logger::Env;
use std::path::{Path, PathBuf};
use anyhow::{Result, bail};

type FileTokenizer<'a> = Tokenizer<Pushback<IncludeSource<'a>>, SlashComments>;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Print the tokens (default: only count them)
    #[clap(long, value_parser)]
    print: bool,
    /// Show the token spans (only with --print)
    #[clap(long, value_parser)]
    pos: bool,
    /// Deliver newlines as EOL tokens
    #[clap(short, long, value_parser)]
    eol: bool,
    /// Deliver whitespace characters as tokens
    #[clap(short, long, value_parser)]
    whitespace: bool,
    /// Do not skip `//` and `/* */` comments
    #[clap(long, value_parser)]
    keep_comments: bool,
    /// Only read sequences of decimal digits as numbers
    #[clap(long, value_parser)]
    digits_only: bool,
    /// Do not follow `#include "path"` directives
    #[clap(long, value_parser)]
    no_include: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

// Paths in directives are relative to the file containing them.
fn resolve(t: &FileTokenizer, path: &str) -> PathBuf {
    let dir = t.file().and_then(|f| Path::new(f).parent());
    match dir {
        Some(dir) => dir.join(path),
        None => PathBuf::from(path),
    }
}

// Having read a `#`, consume `include "path"` if it follows, and
// switch to that file. Otherwise push back what was read after the
// `#` and return false.
fn include_directive(t: &mut FileTokenizer) -> Result<bool> {
    if t.next_token()? != TokenKind::Word || t.string_value() != Some("include") {
        t.push_back();
        return Ok(false)
    }
    if t.next_token()? != TokenKind::Quoted('"') {
        bail!("expecting a quoted path after #include {}", t.token_start())
    }
    let path = resolve(t, t.string_value().unwrap_or(""));
    t.source_mut().get_mut().include_path(&path)?;
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let source = IncludeSource::from_path(&args.input_path)?;
    let mut t = Tokenizer::new(source);
    t.eol_is_significant(args.eol);
    t.space_is_significant(args.whitespace);
    if args.keep_comments {
        t.disable_comments();
    }
    if args.digits_only {
        t.syntax_mut().parse_digits_only();
    }

    let mut count = 0;
    let mut count_words = 0;
    let mut count_numbers = 0;
    loop {
        let kind = t.next_token()?;
        let rendered = match (args.print, args.pos) {
            (false, _) => None,
            (true, true) => Some(t.to_string()),
            (true, false) => Some(t.token().to_string()),
        };
        if kind == TokenKind::Ordinary('#') && !args.no_include
            && include_directive(&mut t)?
        {
            continue;
        }
        if let Some(rendered) = rendered {
            println!("{}", rendered);
        }
        match kind {
            TokenKind::Eof => break,
            TokenKind::Word => count_words += 1,
            TokenKind::Number => count_numbers += 1,
            _ => {}
        }
        count += 1;
    }
    eprintln!("{} tokens ({} words, {} numbers)", count, count_words, count_numbers);
    t.close()?;
    Ok(())
}
