use anyhow::Result;
use strtok::buffered_chars::ReaderSource;
use strtok::lookahead::{LookaheadBuffer, DEFAULT_CAPACITY};
use strtok::source::{CharSource, Input, Lookahead, Peek};

fn read_string<S: CharSource>(s: &mut S, n: usize) -> Result<String> {
    let mut out = String::new();
    for _ in 0..n {
        match s.read()? {
            Input::Char(c) => out.push(c),
            other => panic!("unexpected {}", other)
        }
    }
    Ok(out)
}

#[test]
fn lookahead_does_not_consume() -> Result<()> {
    let mut b = LookaheadBuffer::with_capacity(ReaderSource::from("hello world"), 4);
    assert_eq!(b.lookahead(3)?, "hel");
    assert_eq!(b.lookahead(3)?, "hel");
    assert_eq!(b.peek()?, Input::Char('h'));
    let la = b.lookahead(7)?;
    assert_eq!(la, "hello w");
    assert_eq!(b.capacity(), 7);
    assert_eq!(read_string(&mut b, 7)?, la);
    assert_eq!(b.lookahead(0)?, "");
    assert_eq!(b.lookahead(2)?, "or");
    assert_eq!(read_string(&mut b, 4)?, "orld");
    assert_eq!(b.read()?, Input::Eof);
    Ok(())
}

#[test]
fn lookahead_past_end() -> Result<()> {
    let mut b = LookaheadBuffer::new(ReaderSource::from("abc"));
    assert_eq!(b.capacity(), DEFAULT_CAPACITY);
    assert_eq!(b.lookahead(50)?, "abc");
    assert_eq!(b.lookahead_all()?, "abc");
    assert_eq!(read_string(&mut b, 3)?, "abc");
    assert_eq!(b.lookahead(5)?, "");
    assert_eq!(b.peek()?, Input::Eof);
    assert_eq!(b.read()?, Input::Eof);
    assert_eq!(b.read()?, Input::Eof);
    Ok(())
}

#[test]
fn resize_keeps_buffered() -> Result<()> {
    let mut b = LookaheadBuffer::with_capacity(ReaderSource::from("abcdefghij"), 3);
    assert_eq!(b.read()?, Input::Char('a'));
    assert_eq!(b.lookahead(2)?, "bc");
    b.resize(8)?;
    assert_eq!(b.capacity(), 8);
    assert_eq!(b.lookahead_all()?, "bcdefghi");
    b.resize(2)?;
    assert_eq!(b.capacity(), 8);
    assert_eq!(read_string(&mut b, 9)?, "bcdefghij");
    Ok(())
}

#[test]
fn interleaved_reads_and_lookaheads() -> Result<()> {
    let text = "The quick brown fox jumps over the lazy dog";
    let mut b = LookaheadBuffer::with_capacity(ReaderSource::from(text), 5);
    let mut seen = String::new();
    let mut n = 1;
    while seen.len() < text.len() {
        let la = b.lookahead(n)?;
        assert!(text[seen.len()..].starts_with(&la));
        let k = la.chars().count().min(2);
        seen.push_str(&read_string(&mut b, k)?);
        n = n % 9 + 1;
    }
    assert_eq!(seen, text);
    assert_eq!(b.read()?, Input::Eof);
    Ok(())
}
